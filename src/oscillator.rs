//! The PCM hit oscillator.
//!
//! `PcmHitOscillator` ties the [`SampleEngine`] to the single [`PlaybackState`]
//! it drives and exposes both through the host callbacks. It is a one-shot,
//! last-note-wins voice: a new note always restarts the recording from the top,
//! and once the recording runs out the voice rests at silence until the next
//! retrigger.

use crate::core::{AudioSignal, Oscillator, Signal};
use crate::engine::SampleEngine;
use crate::format::{param_to_unit, to_q31};
use crate::host::{OscParams, ParamId, UserOscillator};
use crate::pitch::NotePitch;
use crate::voice::PlaybackState;
use crate::waveform::PcmWaveform;

/// One-shot PCM oscillator for a host running at `SAMPLE_RATE`.
///
/// # Examples
///
/// ```
/// use pcmhit::{PcmHitOscillator, PcmWaveform, Signal};
///
/// let wave = PcmWaveform::new(vec![0, 64, 128, 192, 255], 69, 48000.0).unwrap();
/// let mut osc = PcmHitOscillator::<48000>::new(wave);
///
/// osc.set_note(69, 0);
/// let mut buffer = [0.0; 6];
/// osc.process(&mut buffer);
/// assert_eq!(buffer[0], -1.0);
/// assert_eq!(buffer[5], 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct PcmHitOscillator<const SAMPLE_RATE: u32> {
    engine: SampleEngine<SAMPLE_RATE>,
    voice: PlaybackState,
    /// Pitch of the most recent render request
    pitch: NotePitch,
}

impl<const SAMPLE_RATE: u32> PcmHitOscillator<SAMPLE_RATE> {
    /// Creates an idle oscillator for the given waveform.
    pub fn new(waveform: PcmWaveform) -> Self {
        Self {
            engine: SampleEngine::new(waveform),
            voice: PlaybackState::new(),
            pitch: NotePitch::default(),
        }
    }

    /// The resampling engine.
    pub fn engine(&self) -> &SampleEngine<SAMPLE_RATE> {
        &self.engine
    }

    /// State of the voice.
    pub fn playback_state(&self) -> &PlaybackState {
        &self.voice
    }

    /// Pitch of the most recent render request.
    pub fn pitch(&self) -> NotePitch {
        self.pitch
    }

    /// Selects the pitch for subsequent samples, retriggering on a note change.
    ///
    /// Returns true if the voice was retriggered.
    pub fn set_note(&mut self, note: u8, offset: u8) -> bool {
        self.pitch = NotePitch::new(note, offset);
        self.voice.retrigger_if_changed(note)
    }

    /// Renders a block as normalized amplitudes instead of Q31.
    ///
    /// Same retrigger semantics as [`UserOscillator::render_block`].
    pub fn render_block_f64(&mut self, params: &OscParams, out: &mut [f64]) {
        let pitch = params.note_pitch();
        self.set_note(pitch.note, pitch.offset);
        for y in out.iter_mut() {
            *y = self.render_current();
        }
    }

    /// Raw-index form of [`UserOscillator::on_parameter_change`].
    ///
    /// Indices the host does not define are ignored.
    pub fn on_parameter_index(&mut self, index: u16, value: u16) {
        match ParamId::try_from(index) {
            Ok(id) => self.on_parameter_change(id, value),
            Err(err) => log::debug!("{err}, ignoring value {value}"),
        }
    }

    #[inline]
    fn render_current(&mut self) -> f64 {
        self.engine
            .render_sample(&mut self.voice, self.pitch.note, self.pitch.offset)
    }
}

impl<const SAMPLE_RATE: u32> UserOscillator for PcmHitOscillator<SAMPLE_RATE> {
    fn initialize(&mut self, platform: u32, api: u32) {
        log::debug!(
            "initialize: platform {platform:#x}, api {api:#x}, position scale {}",
            self.engine.position_scale()
        );
        self.voice.reset();
        self.pitch = NotePitch::default();
    }

    fn render_block(&mut self, params: &OscParams, out: &mut [i32]) {
        let pitch = params.note_pitch();
        self.set_note(pitch.note, pitch.offset);
        for y in out.iter_mut() {
            *y = to_q31(self.render_current());
        }
    }

    fn on_note_on(&mut self, params: &OscParams) {
        log::trace!("note on {:?}", params.note_pitch());
        self.voice.note_on();
    }

    fn on_note_off(&mut self, params: &OscParams) {
        log::trace!("note off {:?}", params.note_pitch());
        self.voice.note_off();
    }

    fn on_parameter_change(&mut self, index: ParamId, value: u16) {
        // None of the parameters shape this oscillator
        match index {
            ParamId::Shape | ParamId::ShiftShape => {
                log::trace!(
                    "parameter {index:?} = {value} ({:.3}) has no effect",
                    param_to_unit(value)
                );
            }
            ParamId::Id1
            | ParamId::Id2
            | ParamId::Id3
            | ParamId::Id4
            | ParamId::Id5
            | ParamId::Id6 => {
                log::trace!("parameter {index:?} = {value} has no effect");
            }
        }
    }
}

impl<const SAMPLE_RATE: u32> Signal for PcmHitOscillator<SAMPLE_RATE> {
    /// Renders at the last requested pitch. No note-change check happens here;
    /// use [`PcmHitOscillator::set_note`] to change notes.
    fn next_sample(&mut self) -> f64 {
        self.render_current()
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for PcmHitOscillator<SAMPLE_RATE> {}

impl<const SAMPLE_RATE: u32> Oscillator for PcmHitOscillator<SAMPLE_RATE> {
    fn reset(&mut self) {
        self.voice.note_on();
    }
}
