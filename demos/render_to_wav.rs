//! Renders a short phrase of hits into a 48 kHz WAV file.
//!
//! Usage: `cargo run --example render_to_wav [out.wav] [path/to/hit.wav]`

mod common;

use anyhow::Result;
use pcmhit::{NTS1_SAMPLE_RATE, OscParams, PcmHitOscillator, UserOscillator};

const BLOCK_FRAMES: usize = 64;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let out_path = args.next().unwrap_or_else(|| "hit_phrase.wav".to_string());
    let wave = common::load_or_synthesize(args.next().as_deref())?;

    let mut oscillator = PcmHitOscillator::<NTS1_SAMPLE_RATE>::new(wave);
    oscillator.initialize(0, 0);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: NTS1_SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&out_path, spec)?;

    // (note, fine offset, blocks to hold)
    let phrase = [(60u8, 0u8, 300), (64, 0, 300), (67, 128, 300), (72, 0, 600)];
    let mut block = [0i32; BLOCK_FRAMES];
    for (note, offset, blocks) in phrase {
        let params = OscParams::from_note(note, offset);
        for _ in 0..blocks {
            oscillator.render_block(&params, &mut block);
            for &sample in &block {
                writer.write_sample(sample)?;
            }
        }
    }
    writer.finalize()?;

    println!("wrote {}", out_path);
    Ok(())
}
