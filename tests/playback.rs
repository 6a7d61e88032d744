use pcmhit::engine::{SILENCE, unsigned_to_amplitude};
use pcmhit::format::q31_to_f64;
use pcmhit::{OscParams, PcmHitOscillator, PcmWaveform, UserOscillator};
use rand::{Rng, SeedableRng, rngs::StdRng};

const SAMPLE_RATE: u32 = 48000;
const ROOT: u8 = 69;

fn oscillator(samples: Vec<u8>) -> PcmHitOscillator<SAMPLE_RATE> {
    // Recorded at the output rate so the root note steps exactly one stored sample
    let wave = PcmWaveform::new(samples, ROOT, SAMPLE_RATE as f64).unwrap();
    let mut osc = PcmHitOscillator::new(wave);
    osc.initialize(0, 0);
    osc
}

fn render(osc: &mut PcmHitOscillator<SAMPLE_RATE>, note: u8, frames: usize) -> Vec<f64> {
    let mut out = vec![0.0; frames];
    osc.render_block_f64(&OscParams::from_note(note, 0), &mut out);
    out
}

/// Output samples produced before the voice goes silent.
fn audible_len(osc: &mut PcmHitOscillator<SAMPLE_RATE>, note: u8) -> u32 {
    let mut out = [0.0; 256];
    loop {
        osc.render_block_f64(&OscParams::from_note(note, 0), &mut out);
        if out.iter().all(|&s| s == SILENCE) {
            return osc.playback_state().read_position();
        }
    }
}

#[test]
fn test_plays_table_at_root_pitch() {
    let mut osc = oscillator(vec![0, 64, 128, 192, 255]);
    let out = render(&mut osc, ROOT, 5);
    let expected = [-1.0, -0.5, 0.0, 0.5, 0.9921875];
    for (got, want) in out.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
}

#[test]
fn test_octave_up_retriggers_and_doubles_rate() {
    let mut osc = oscillator(vec![0, 64, 128, 192, 255]);
    render(&mut osc, ROOT, 3);
    assert_eq!(osc.playback_state().read_position(), 3);

    let out = render(&mut osc, ROOT + 12, 4);
    assert_eq!(osc.playback_state().active_note(), Some(ROOT + 12));
    // Stored positions 0, 2, 4, then past the end
    assert_eq!(out, vec![-1.0, 0.0, 0.9921875, SILENCE]);
}

#[test]
fn test_runs_into_silence_mid_block() {
    let table: Vec<u8> = (0..11).map(|i| 100 + i * 5).collect();
    let mut osc = oscillator(table.clone());
    let out = render(&mut osc, ROOT + 12, 10);

    for (n, sample) in out.iter().enumerate().take(6) {
        let want = unsigned_to_amplitude(f64::from(table[n * 2]));
        assert!((sample - want).abs() < 1e-9, "sample {n}");
    }
    assert!(out[6..].iter().all(|&s| s == SILENCE));
    assert_eq!(osc.playback_state().read_position(), 6);
}

#[test]
fn test_retrigger_output_matches_fresh_voice() {
    let table: Vec<u8> = (0..200).map(|i| (i * 7 % 256) as u8).collect();
    let mut fresh = oscillator(table.clone());
    let expected = render(&mut fresh, 64, 16);

    let mut osc = oscillator(table);
    render(&mut osc, 50, 37);
    let out = render(&mut osc, 64, 16);
    assert_eq!(out, expected);
}

#[test]
fn test_position_advances_once_per_sample() {
    let mut osc = oscillator(vec![128; 1000]);
    for block in 1..=10u32 {
        render(&mut osc, 60, 7);
        assert_eq!(osc.playback_state().read_position(), block * 7);
    }
}

#[test]
fn test_silence_is_sticky() {
    let mut osc = oscillator(vec![255; 8]);
    render(&mut osc, ROOT, 8);
    let position = osc.playback_state().read_position();
    for _ in 0..20 {
        let out = render(&mut osc, ROOT, 32);
        assert!(out.iter().all(|&s| s == SILENCE));
        assert_eq!(osc.playback_state().read_position(), position);
    }
}

#[test]
fn test_octave_halves_audible_length() {
    let mut osc = oscillator(vec![200; 4800]);
    let root = audible_len(&mut osc, ROOT);
    let octave = audible_len(&mut osc, ROOT + 12);
    let two_octaves = audible_len(&mut osc, ROOT + 24);

    assert_eq!(root, 4800);
    assert!(octave.abs_diff(2400) <= 1, "{octave}");
    assert!(two_octaves.abs_diff(1200) <= 1, "{two_octaves}");
}

#[test]
fn test_output_always_in_range() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let table: Vec<u8> = (0..2048).map(|_| rng.r#gen()).collect();
    let mut osc = oscillator(table);

    let mut out = [0i32; 32];
    for _ in 0..500 {
        let params = OscParams::new(rng.r#gen());
        if rng.gen_bool(0.05) {
            osc.on_note_on(&params);
        }
        osc.render_block(&params, &mut out);
        for &q in &out {
            let x = q31_to_f64(q);
            assert!((-1.0..1.0).contains(&x), "{x} out of range");
        }
    }
}

#[test]
fn test_extreme_pitch_is_silent_not_fatal() {
    let mut osc = oscillator(vec![0, 255]);
    let mut out = [7i32; 16];
    osc.render_block(&OscParams::new(u16::MAX), &mut out);
    // Position 0 is always audible, then the table is exhausted immediately
    assert_eq!(out[0], -i32::MAX);
    assert!(out[1..].iter().all(|&q| q == 0));
}
