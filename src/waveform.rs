//! The stored PCM waveform.
//!
//! A `PcmWaveform` is an immutable table of unsigned 8-bit samples together
//! with the note it was recorded at and its native sample rate. The table is
//! held behind an `Arc`, so clones share one copy and nothing can write to it
//! after construction.

use crate::pitch::midi_to_hz;
use std::sync::Arc;
use thiserror::Error;

#[cfg(feature = "wav-loader")]
use std::{io::Read, path::Path};

/// Highest valid MIDI note for a waveform's root pitch.
const MAX_ROOT_NOTE: u8 = 127;

/// Errors raised while building a waveform.
#[derive(Debug, Error)]
pub enum WaveformError {
    #[error("waveform contains no samples")]
    Empty,
    #[error("root note {0} is outside the MIDI range 0-127")]
    InvalidRootNote(u8),
    #[error("native sample rate {0} must be finite and positive")]
    InvalidSampleRate(f64),
    #[cfg(feature = "wav-loader")]
    #[error("failed to read WAV data: {0}")]
    Wav(#[from] hound::Error),
}

/// A one-shot PCM recording stored as unsigned 8-bit samples.
///
/// # Examples
///
/// ```
/// use pcmhit::PcmWaveform;
///
/// let wave = PcmWaveform::new(vec![0, 64, 128, 192, 255], 60, 48000.0).unwrap();
/// assert_eq!(wave.len(), 5);
/// assert_eq!(wave.get(2), Some(128));
/// assert!((wave.root_frequency() - 261.6256).abs() < 0.001);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PcmWaveform {
    samples: Arc<[u8]>,
    root_note: u8,
    native_sample_rate: f64,
}

impl PcmWaveform {
    /// Creates a waveform from raw samples.
    ///
    /// # Arguments
    ///
    /// * `samples` - Unsigned 8-bit samples, 128 being the zero line
    /// * `root_note` - MIDI note at which the recording plays at its native rate
    /// * `native_sample_rate` - Rate the recording was made at, in Hz
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, the root note is not a MIDI
    /// note, or the sample rate is not a finite positive number.
    pub fn new(
        samples: Vec<u8>,
        root_note: u8,
        native_sample_rate: f64,
    ) -> Result<Self, WaveformError> {
        if samples.is_empty() {
            return Err(WaveformError::Empty);
        }
        if root_note > MAX_ROOT_NOTE {
            return Err(WaveformError::InvalidRootNote(root_note));
        }
        if !native_sample_rate.is_finite() || native_sample_rate <= 0.0 {
            return Err(WaveformError::InvalidSampleRate(native_sample_rate));
        }

        Ok(Self {
            samples: samples.into(),
            root_note,
            native_sample_rate,
        })
    }

    /// Creates a waveform by sampling a function.
    ///
    /// The function maps normalized time `[0.0, 1.0)` to an amplitude in
    /// `[-1.0, 1.0]`, which is quantized to unsigned 8-bit.
    ///
    /// # Examples
    ///
    /// ```
    /// use pcmhit::PcmWaveform;
    ///
    /// // A decaying ramp, 4800 samples at 48 kHz
    /// let wave = PcmWaveform::from_function(4800, 57, 48000.0, |t| 1.0 - t).unwrap();
    /// assert_eq!(wave.get(0), Some(255));
    /// ```
    pub fn from_function<F>(
        len: usize,
        root_note: u8,
        native_sample_rate: f64,
        f: F,
    ) -> Result<Self, WaveformError>
    where
        F: Fn(f64) -> f64,
    {
        let samples: Vec<u8> = (0..len)
            .map(|i| quantize(f(i as f64 / len as f64)))
            .collect();

        Self::new(samples, root_note, native_sample_rate)
    }

    /// Loads a waveform from a WAV file (requires `wav-loader` feature).
    ///
    /// Only the first channel is kept. Samples of any bit depth are
    /// re-quantized to unsigned 8-bit and the native rate is taken from the
    /// file header.
    #[cfg(feature = "wav-loader")]
    pub fn from_wav_file<P: AsRef<Path>>(path: P, root_note: u8) -> Result<Self, WaveformError> {
        let path = path.as_ref();
        log::debug!("loading waveform from {}", path.display());
        let reader = hound::WavReader::open(path)?;
        Self::from_hound(reader, root_note)
    }

    /// Loads a waveform from any reader producing WAV data (requires `wav-loader` feature).
    #[cfg(feature = "wav-loader")]
    pub fn from_wav_reader<R: Read>(reader: R, root_note: u8) -> Result<Self, WaveformError> {
        let reader = hound::WavReader::new(reader)?;
        Self::from_hound(reader, root_note)
    }

    #[cfg(feature = "wav-loader")]
    fn from_hound<R: Read>(
        mut reader: hound::WavReader<R>,
        root_note: u8,
    ) -> Result<Self, WaveformError> {
        let spec = reader.spec();
        let channels = usize::from(spec.channels.max(1));

        let normalized: Vec<f64> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .step_by(channels)
                .map(|s| s.map(f64::from))
                .collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let max_value = (1i64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .samples::<i32>()
                    .step_by(channels)
                    .map(|s| s.map(|v| f64::from(v) / max_value))
                    .collect::<Result<_, _>>()?
            }
        };

        log::debug!(
            "decoded {} frames at {} Hz ({} channel(s), {} bits)",
            normalized.len(),
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample
        );

        let samples: Vec<u8> = normalized.into_iter().map(quantize).collect();
        Self::new(samples, root_note, f64::from(spec.sample_rate))
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed waveform.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Stored sample at `index`, if any.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.samples.get(index).copied()
    }

    /// The whole stored table.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// MIDI note the recording was made at.
    pub fn root_note(&self) -> u8 {
        self.root_note
    }

    /// Pitch in Hz at which the recording plays back at its native rate.
    pub fn root_frequency(&self) -> f64 {
        midi_to_hz(self.root_note)
    }

    /// Native sample rate in Hz.
    pub fn native_sample_rate(&self) -> f64 {
        self.native_sample_rate
    }

    /// Length of the recording at its native rate, in seconds.
    pub fn duration(&self) -> f64 {
        self.len() as f64 / self.native_sample_rate
    }
}

/// Quantizes a normalized amplitude to unsigned 8-bit.
fn quantize(x: f64) -> u8 {
    (x * 128.0 + 128.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_table() {
        let err = PcmWaveform::new(Vec::new(), 60, 48000.0).unwrap_err();
        assert!(matches!(err, WaveformError::Empty));
    }

    #[test]
    fn test_rejects_bad_root_note() {
        let err = PcmWaveform::new(vec![128], 128, 48000.0).unwrap_err();
        assert!(matches!(err, WaveformError::InvalidRootNote(128)));
    }

    #[test]
    fn test_rejects_bad_sample_rate() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                PcmWaveform::new(vec![128], 60, rate),
                Err(WaveformError::InvalidSampleRate(_))
            ));
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            WaveformError::InvalidRootNote(200).to_string(),
            "root note 200 is outside the MIDI range 0-127"
        );
        assert_eq!(WaveformError::Empty.to_string(), "waveform contains no samples");
    }

    #[test]
    fn test_accessors() {
        let wave = PcmWaveform::new(vec![1, 2, 3, 4], 69, 32000.0).unwrap();
        assert_eq!(wave.len(), 4);
        assert!(!wave.is_empty());
        assert_eq!(wave.get(3), Some(4));
        assert_eq!(wave.get(4), None);
        assert_eq!(wave.samples(), &[1, 2, 3, 4]);
        assert_eq!(wave.root_note(), 69);
        assert!((wave.root_frequency() - 440.0).abs() < 1e-9);
        assert_eq!(wave.native_sample_rate(), 32000.0);
        assert!((wave.duration() - 4.0 / 32000.0).abs() < 1e-12);
    }

    #[test]
    fn test_clones_share_table() {
        let wave = PcmWaveform::new(vec![10, 20], 60, 48000.0).unwrap();
        let copy = wave.clone();
        assert!(std::ptr::eq(wave.samples(), copy.samples()));
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(0.0), 128);
        assert_eq!(quantize(-1.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(0.5), 192);
        assert_eq!(quantize(-3.0), 0);
    }

    #[test]
    fn test_from_function() {
        let wave = PcmWaveform::from_function(4, 60, 48000.0, |t| t * 2.0 - 1.0).unwrap();
        assert_eq!(wave.samples(), &[0, 64, 128, 192]);
    }

    #[test]
    fn test_from_function_zero_len_is_error() {
        assert!(PcmWaveform::from_function(0, 60, 48000.0, |_| 0.0).is_err());
    }

    #[cfg(feature = "wav-loader")]
    #[test]
    fn test_from_wav_reader_keeps_first_channel() {
        use std::io::Cursor;

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for (left, right) in [(0i16, 100i16), (16384, -100), (-32768, 5)] {
                writer.write_sample(left).unwrap();
                writer.write_sample(right).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.set_position(0);

        let wave = PcmWaveform::from_wav_reader(cursor, 48).unwrap();
        assert_eq!(wave.samples(), &[128, 192, 0]);
        assert_eq!(wave.native_sample_rate(), 22050.0);
        assert_eq!(wave.root_note(), 48);
    }

    #[cfg(feature = "wav-loader")]
    #[test]
    fn test_from_wav_reader_rejects_garbage() {
        let err = PcmWaveform::from_wav_reader(&b"not a wav file"[..], 60).unwrap_err();
        assert!(matches!(err, WaveformError::Wav(_)));
    }
}
