//! Plays the hit through the default output device at a few pitches.
//!
//! Usage: `cargo run --example play_hit [path/to/hit.wav]`

mod common;

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, StreamConfig};
use pcmhit::{NTS1_SAMPLE_RATE, OscParams, PcmHitOscillator, UserOscillator};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Frames per host block, as on the NTS-1.
const BLOCK_FRAMES: usize = 64;

struct HostState {
    oscillator: PcmHitOscillator<NTS1_SAMPLE_RATE>,
    params: OscParams,
    block: [f64; BLOCK_FRAMES],
    cursor: usize,
}

impl HostState {
    fn next_sample(&mut self) -> f64 {
        if self.cursor == BLOCK_FRAMES {
            self.oscillator
                .render_block_f64(&self.params, &mut self.block);
            self.cursor = 0;
        }
        let sample = self.block[self.cursor];
        self.cursor += 1;
        sample
    }
}

fn create_audio_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    state: Arc<Mutex<HostState>>,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f64> + cpal::SizedSample,
{
    let channels = config.channels as usize;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let mut state = state.lock().unwrap();
            for frame in data.chunks_mut(channels) {
                let value: T = T::from_sample(state.next_sample());
                for s in frame.iter_mut() {
                    *s = value;
                }
            }
        },
        |err| eprintln!("Audio stream error: {}", err),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

fn main() -> Result<()> {
    let path = std::env::args().nth(1);
    let wave = common::load_or_synthesize(path.as_deref())?;
    println!(
        "{} samples at {} Hz, root note {}",
        wave.len(),
        wave.native_sample_rate(),
        wave.root_note()
    );

    let mut oscillator = PcmHitOscillator::new(wave);
    oscillator.initialize(0, 0);

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No output device available"))?;
    let mut config: StreamConfig = device.default_output_config()?.into();
    config.sample_rate = cpal::SampleRate(NTS1_SAMPLE_RATE);
    let sample_format = device.default_output_config()?.sample_format();

    let state = Arc::new(Mutex::new(HostState {
        oscillator,
        params: OscParams::from_note(common::HIT_ROOT_NOTE, 0),
        block: [0.0; BLOCK_FRAMES],
        cursor: BLOCK_FRAMES,
    }));

    let _stream = match sample_format {
        SampleFormat::F32 => create_audio_stream::<f32>(&device, &config, state.clone())?,
        SampleFormat::I16 => create_audio_stream::<i16>(&device, &config, state.clone())?,
        SampleFormat::U16 => create_audio_stream::<u16>(&device, &config, state.clone())?,
        sample_format => {
            return Err(anyhow::anyhow!(
                "Unsupported sample format: {}",
                sample_format
            ));
        }
    };

    // Root, fifth, octave, then the root again via an explicit note-on
    let notes = [0u8, 7, 12, 0];
    for (i, interval) in notes.iter().enumerate() {
        let params = OscParams::from_note(common::HIT_ROOT_NOTE + interval, 0);
        {
            let mut state = state.lock().unwrap();
            if i == notes.len() - 1 {
                state.oscillator.on_note_on(&params);
            }
            state.params = params;
        }
        println!("note {}", params.note());
        std::thread::sleep(Duration::from_millis(700));
    }

    Ok(())
}
