//! pcmhit - A one-shot PCM oscillator for embedded synthesizer hosts
//!
//! This library plays a fixed 8-bit recording (an orchestral hit, a drum) at any
//! MIDI pitch. The host calls in once per audio block; the oscillator resamples
//! the recording with linear interpolation and writes Q31 samples back.
//!
//! ```
//! use pcmhit::{OscParams, PcmHitOscillator, PcmWaveform, UserOscillator, NTS1_SAMPLE_RATE};
//!
//! let wave = PcmWaveform::from_function(4800, 60, 48000.0, |t| (1.0 - t) * 0.5).unwrap();
//! let mut osc = PcmHitOscillator::<NTS1_SAMPLE_RATE>::new(wave);
//! osc.initialize(0, 0);
//!
//! let mut block = [0i32; 64];
//! osc.render_block(&OscParams::from_note(64, 0), &mut block);
//! assert!(block[0] > 0);
//! ```

pub mod core;
pub mod engine;
pub mod format;
pub mod host;
pub mod oscillator;
pub mod pitch;
pub mod voice;
pub mod waveform;

/// Output sample rate of the NTS-1 host, in Hz.
pub const NTS1_SAMPLE_RATE: u32 = 48000;

// Re-export commonly used types at the crate root
pub use crate::core::{AudioSignal, Oscillator, Signal};
pub use engine::SampleEngine;
pub use host::{OscParams, ParamId, UnknownParam, UserOscillator};
pub use oscillator::PcmHitOscillator;
pub use pitch::NotePitch;
pub use voice::{PlaybackState, VoiceState};
pub use waveform::{PcmWaveform, WaveformError};
