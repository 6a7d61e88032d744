//! Audio signal trait for sample-rate-aware signals.

use super::Signal;

/// Common interface for anything that can be played as audio.
///
/// This trait extends `Signal` with the host sample rate at the type level. The
/// sample rate is a const generic, so an oscillator built for a 48 kHz host
/// cannot be handed to code that expects 44.1 kHz.
///
/// # Type Parameters
///
/// * `SAMPLE_RATE` - Output sample rate in Hz (48000 on the NTS-1)
///
/// # Examples
///
/// ```
/// use pcmhit::{AudioSignal, PcmHitOscillator, PcmWaveform};
///
/// let wave = PcmWaveform::new(vec![128, 255, 128, 0], 60, 48000.0).unwrap();
/// let osc = PcmHitOscillator::<48000>::new(wave);
/// assert_eq!(osc.sample_rate(), 48000.0);
/// ```
pub trait AudioSignal<const SAMPLE_RATE: u32>: Signal {
    /// Gets the sample rate at which this audio is being generated.
    fn sample_rate(&self) -> f64 {
        SAMPLE_RATE as f64
    }
}
