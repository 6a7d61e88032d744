//! Pitch-correct PCM playback.
//!
//! # Design Overview
//!
//! The engine plays a fixed one-shot recording at any note by resampling it on
//! the fly. For every output sample it computes a fractional read position into
//! the stored table, blends the two stored samples around that position and
//! converts the unsigned 8-bit result to a signed amplitude.
//!
//! ## Read position
//!
//! ```text
//! position = position_scale * w0 * SAMPLE_RATE * read_position
//! ```
//!
//! where `w0` is the target frequency normalized to the output rate and
//! `position_scale = native_rate / (SAMPLE_RATE * root_frequency)`. At the root
//! note the table therefore advances `native_rate / SAMPLE_RATE` stored samples
//! per output sample, and every octave up doubles that rate.
//!
//! ## End of table
//!
//! `L - 1` is the last valid index. A position in `[L - 1, L)` reads the last
//! stored sample on both sides of the blend, so the output holds at that value
//! until the position reaches `L`. From `L` on the engine returns [`SILENCE`]
//! and stops advancing the voice: the hit is over and stays silent until the
//! next retrigger. Huge positions (very high notes) and non-finite positions
//! take the same path.

use crate::pitch::normalized_frequency;
use crate::voice::PlaybackState;
use crate::waveform::PcmWaveform;

/// Output of an exhausted voice.
pub const SILENCE: f64 = 0.0;

/// Zero line of the unsigned 8-bit sample format.
const PCM_MIDPOINT: f64 = 128.0;

/// Derives the coefficient relating output ticks to stored-sample positions.
///
/// # Arguments
///
/// * `output_sample_rate` - Host output rate in Hz
/// * `native_sample_rate` - Rate the waveform was recorded at, in Hz
/// * `root_frequency` - Pitch of the recording in Hz
///
/// # Examples
///
/// ```
/// use pcmhit::engine::compute_position_scale;
///
/// let scale = compute_position_scale(48000.0, 24000.0, 440.0);
/// // At 440 Hz the table advances half a stored sample per output sample
/// assert!((scale * 440.0 - 0.5).abs() < 1e-12);
/// ```
pub fn compute_position_scale(
    output_sample_rate: f64,
    native_sample_rate: f64,
    root_frequency: f64,
) -> f64 {
    native_sample_rate / (output_sample_rate * root_frequency)
}

/// Converts an unsigned 8-bit sample value (possibly interpolated) to `[-1.0, 1.0)`.
///
/// # Examples
///
/// ```
/// use pcmhit::engine::unsigned_to_amplitude;
///
/// assert_eq!(unsigned_to_amplitude(128.0), 0.0);
/// assert_eq!(unsigned_to_amplitude(0.0), -1.0);
/// assert_eq!(unsigned_to_amplitude(255.0), 127.0 / 128.0);
/// ```
#[inline]
pub fn unsigned_to_amplitude(raw: f64) -> f64 {
    (raw - PCM_MIDPOINT) / PCM_MIDPOINT
}

/// Reads the table at a fractional position with linear interpolation.
///
/// Returns `None` once `position` reaches the end of the table. The upper
/// neighbour is clamped to the last index.
#[inline]
pub fn interpolate(table: &[u8], position: f64) -> Option<f64> {
    let len = table.len();
    if len == 0 || position.is_nan() || position >= len as f64 {
        return None;
    }

    let position = position.max(0.0);
    let index = position as usize;
    let frac = position - index as f64;
    let lower = f64::from(table[index]);
    let upper = f64::from(table[(index + 1).min(len - 1)]);

    let raw = frac * upper + (1.0 - frac) * lower;
    Some(unsigned_to_amplitude(raw))
}

/// Resampling playback engine for one stored waveform.
///
/// The engine itself is immutable once built; the per-voice progress lives in
/// the [`PlaybackState`] passed to [`SampleEngine::render_sample`].
///
/// # Type Parameters
///
/// * `SAMPLE_RATE` - Host output rate in Hz
#[derive(Debug, Clone)]
pub struct SampleEngine<const SAMPLE_RATE: u32> {
    waveform: PcmWaveform,
    position_scale: f64,
}

impl<const SAMPLE_RATE: u32> SampleEngine<SAMPLE_RATE> {
    /// Creates an engine and derives its position coefficient.
    pub fn new(waveform: PcmWaveform) -> Self {
        let position_scale = compute_position_scale(
            SAMPLE_RATE as f64,
            waveform.native_sample_rate(),
            waveform.root_frequency(),
        );
        log::debug!(
            "sample engine: {} samples, root note {}, native {} Hz, output {} Hz, scale {}",
            waveform.len(),
            waveform.root_note(),
            waveform.native_sample_rate(),
            SAMPLE_RATE,
            position_scale
        );

        Self {
            waveform,
            position_scale,
        }
    }

    /// The stored waveform.
    pub fn waveform(&self) -> &PcmWaveform {
        &self.waveform
    }

    /// Coefficient derived at construction.
    pub fn position_scale(&self) -> f64 {
        self.position_scale
    }

    /// Stored samples advanced per output sample at the given pitch.
    pub fn step(&self, note: u8, offset: u8) -> f64 {
        let w0 = normalized_frequency(note, offset, SAMPLE_RATE as f64);
        self.position_scale * w0 * SAMPLE_RATE as f64
    }

    /// Fractional table position for the given pitch and read counter.
    pub fn position_for(&self, note: u8, offset: u8, read_position: u32) -> f64 {
        self.step(note, offset) * f64::from(read_position)
    }

    /// Number of output samples a note produces before going silent.
    ///
    /// Exact up to floating-point rounding at the final boundary.
    pub fn samples_until_exhausted(&self, note: u8, offset: u8) -> u64 {
        let step = self.step(note, offset);
        (self.waveform.len() as f64 / step).ceil() as u64
    }

    /// Renders one output sample and advances the voice.
    ///
    /// The voice only advances while the position is inside the table; once it
    /// runs off the end the result is [`SILENCE`] and `state` is left as is.
    #[inline]
    pub fn render_sample(&self, state: &mut PlaybackState, note: u8, offset: u8) -> f64 {
        let position = self.position_for(note, offset, state.read_position());
        match interpolate(self.waveform.samples(), position) {
            Some(amplitude) => {
                state.advance();
                amplitude
            }
            None => SILENCE,
        }
    }
}
