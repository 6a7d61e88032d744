//! Note and fine-pitch handling.
//!
//! The host hands the oscillator a packed 16-bit pitch: the MIDI note number in
//! the upper byte and an upward-only fine offset in the lower byte, measured in
//! 1/255 of a semitone. Downward bends arrive already folded into the note
//! number (note decremented, offset raised).

/// Highest index of the host's note-to-frequency table.
pub const MAX_TABLE_NOTE: u8 = 151;

/// Upper bound of any computed note frequency, in Hz.
///
/// Equal to `midi_to_hz(138)`, just under the Nyquist limit of a 48 kHz host.
pub const MAX_NOTE_HZ: f64 = 23679.643054;

/// Number of fine-pitch steps per semitone.
pub const OFFSET_STEPS: f64 = 255.0;

/// A note number combined with an upward fine-pitch offset.
///
/// # Examples
///
/// ```
/// use pcmhit::pitch::NotePitch;
///
/// let pitch = NotePitch::from_packed(0x3C80);
/// assert_eq!(pitch.note, 60);
/// assert_eq!(pitch.offset, 128);
/// assert_eq!(pitch.packed(), 0x3C80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NotePitch {
    /// MIDI note number
    pub note: u8,
    /// Upward fine-pitch offset in 1/255 semitone steps
    pub offset: u8,
}

impl NotePitch {
    /// Creates a pitch from its parts.
    pub fn new(note: u8, offset: u8) -> Self {
        Self { note, offset }
    }

    /// Splits a host pitch word into note (upper byte) and offset (lower byte).
    pub fn from_packed(pitch: u16) -> Self {
        let [note, offset] = pitch.to_be_bytes();
        Self { note, offset }
    }

    /// Packs the pitch back into the host's 16-bit layout.
    pub fn packed(&self) -> u16 {
        u16::from_be_bytes([self.note, self.offset])
    }

    /// Frequency of this pitch in Hz.
    pub fn frequency(&self) -> f64 {
        frequency_for_note(self.note, self.offset)
    }
}

impl From<u16> for NotePitch {
    fn from(pitch: u16) -> Self {
        NotePitch::from_packed(pitch)
    }
}

impl From<NotePitch> for u16 {
    fn from(pitch: NotePitch) -> Self {
        pitch.packed()
    }
}

/// Converts a note number to Hz in twelve-tone equal temperament (A4 = 69 = 440 Hz).
///
/// # Examples
///
/// ```
/// use pcmhit::pitch::midi_to_hz;
///
/// assert!((midi_to_hz(69) - 440.0).abs() < 1e-9);
/// assert!((midi_to_hz(57) - 220.0).abs() < 1e-9);
/// ```
pub fn midi_to_hz(note: u8) -> f64 {
    // f = 440 * 2^((n - 69) / 12)
    440.0 * 2.0_f64.powf((f64::from(note) - 69.0) / 12.0)
}

/// Frequency in Hz of `note` raised by `offset / 255` of a semitone.
///
/// The fine offset interpolates linearly in Hz between the note and the next
/// semitone. Notes are clamped to the host table and the result is clipped to
/// [`MAX_NOTE_HZ`], so the mapping is monotonic non-decreasing in both inputs.
pub fn frequency_for_note(note: u8, offset: u8) -> f64 {
    let note = note.min(MAX_TABLE_NOTE - 1);
    let f0 = midi_to_hz(note);
    let f1 = midi_to_hz(note + 1);
    let frac = f64::from(offset) / OFFSET_STEPS;
    (f0 + frac * (f1 - f0)).min(MAX_NOTE_HZ)
}

/// Frequency normalized to the output rate (cycles per output sample).
pub fn normalized_frequency(note: u8, offset: u8, sample_rate: f64) -> f64 {
    frequency_for_note(note, offset) / sample_rate
}
