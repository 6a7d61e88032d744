//! Shared helpers for the demos.

use pcmhit::PcmWaveform;
use std::f64::consts::PI;

/// Root note of the synthesized hit (C4).
pub const HIT_ROOT_NOTE: u8 = 60;

/// Builds a short orchestral-style hit: a stacked major chord with a fast decay.
///
/// Loads `path` instead when given, treating it as recorded at `HIT_ROOT_NOTE`.
pub fn load_or_synthesize(path: Option<&str>) -> anyhow::Result<PcmWaveform> {
    if let Some(path) = path {
        return Ok(PcmWaveform::from_wav_file(path, HIT_ROOT_NOTE)?);
    }

    let native_rate = 32000.0;
    let len = 16000;
    let root = pcmhit::pitch::midi_to_hz(HIT_ROOT_NOTE);
    let duration = len as f64 / native_rate;
    let wave = PcmWaveform::from_function(len, HIT_ROOT_NOTE, native_rate, |t| {
        let seconds = t * duration;
        let envelope = (-6.0 * t).exp();
        let chord: f64 = [1.0, 1.25, 1.5, 2.0]
            .iter()
            .map(|ratio| (2.0 * PI * root * ratio * seconds).sin())
            .sum();
        0.24 * envelope * chord
    })?;
    Ok(wave)
}
