//! Host callback interface.
//!
//! The host owns the real-time loop and calls into the oscillator through the
//! [`UserOscillator`] trait: once at start-up, once per audio block, and on
//! note and parameter events. All calls arrive from a single thread.

use crate::pitch::NotePitch;
use thiserror::Error;

/// Per-call parameters supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OscParams {
    /// Note number in the upper byte, upward fine offset in the lower byte
    pub pitch: u16,
}

impl OscParams {
    /// Creates parameters from a packed pitch word.
    pub fn new(pitch: u16) -> Self {
        Self { pitch }
    }

    /// Creates parameters for a note and fine offset.
    pub fn from_note(note: u8, offset: u8) -> Self {
        Self {
            pitch: NotePitch::new(note, offset).packed(),
        }
    }

    /// Decoded note and offset.
    pub fn note_pitch(&self) -> NotePitch {
        NotePitch::from_packed(self.pitch)
    }

    /// MIDI note number.
    pub fn note(&self) -> u8 {
        self.note_pitch().note
    }

    /// Upward fine offset in 1/255 semitone steps.
    pub fn offset(&self) -> u8 {
        self.note_pitch().offset
    }
}

/// Raised for a parameter index the host does not define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown oscillator parameter index {0}")]
pub struct UnknownParam(pub u16);

/// Parameters the host can send to a user oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// User parameter 1
    Id1,
    /// User parameter 2
    Id2,
    /// User parameter 3
    Id3,
    /// User parameter 4
    Id4,
    /// User parameter 5
    Id5,
    /// User parameter 6
    Id6,
    /// Shape knob, 10-bit
    Shape,
    /// Alternate (shift) shape knob, 10-bit
    ShiftShape,
}

impl ParamId {
    /// Every parameter, in index order.
    pub const ALL: [ParamId; 8] = [
        ParamId::Id1,
        ParamId::Id2,
        ParamId::Id3,
        ParamId::Id4,
        ParamId::Id5,
        ParamId::Id6,
        ParamId::Shape,
        ParamId::ShiftShape,
    ];

    /// Host index of this parameter.
    pub fn index(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for ParamId {
    type Error = UnknownParam;

    fn try_from(index: u16) -> Result<Self, Self::Error> {
        ParamId::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(UnknownParam(index))
    }
}

/// Callbacks a host invokes on a user oscillator.
///
/// # Examples
///
/// ```
/// use pcmhit::{OscParams, PcmHitOscillator, PcmWaveform, UserOscillator};
///
/// let wave = PcmWaveform::new(vec![0, 64, 128, 192, 255], 69, 48000.0).unwrap();
/// let mut osc = PcmHitOscillator::<48000>::new(wave);
/// osc.initialize(0, 0);
///
/// let mut block = [0i32; 8];
/// osc.render_block(&OscParams::from_note(69, 0), &mut block);
/// assert_eq!(block[0], -i32::MAX);
/// assert_eq!(block[7], 0);
/// ```
pub trait UserOscillator {
    /// Called once before any rendering. Platform and API identifiers are informational.
    fn initialize(&mut self, platform: u32, api: u32);

    /// Renders one block of Q31 samples, filling all of `out`.
    fn render_block(&mut self, params: &OscParams, out: &mut [i32]);

    /// Note-on; only sent when no note was held.
    fn on_note_on(&mut self, params: &OscParams);

    /// Note-off; only sent when the last held note is released.
    fn on_note_off(&mut self, params: &OscParams);

    /// Knob or menu parameter change.
    fn on_parameter_change(&mut self, index: ParamId, value: u16);
}
