//! Playback state of the single monophonic voice.
//!
//! The voice remembers which note it is sounding and how many output samples
//! it has produced since the last retrigger. Only the retrigger logic and the
//! per-sample advance mutate it.

/// Lifecycle of the voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    /// No note has been rendered yet
    Idle,
    /// A note is advancing through the waveform or resting at silence past its end
    Sounding,
}

/// Active note and read counter of the one-shot voice.
///
/// # Examples
///
/// ```
/// use pcmhit::voice::{PlaybackState, VoiceState};
///
/// let mut state = PlaybackState::new();
/// assert_eq!(state.state(), VoiceState::Idle);
///
/// assert!(state.retrigger_if_changed(60));
/// state.advance();
/// assert_eq!(state.read_position(), 1);
///
/// // Same note: no retrigger
/// assert!(!state.retrigger_if_changed(60));
/// assert_eq!(state.read_position(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    /// `None` until the first note is rendered
    active_note: Option<u8>,
    /// Output samples produced since the last retrigger
    read_position: u32,
}

impl PlaybackState {
    /// Creates an idle voice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> VoiceState {
        match self.active_note {
            None => VoiceState::Idle,
            Some(_) => VoiceState::Sounding,
        }
    }

    /// Note currently sounding, if any.
    pub fn active_note(&self) -> Option<u8> {
        self.active_note
    }

    /// Output samples produced since the last retrigger.
    pub fn read_position(&self) -> u32 {
        self.read_position
    }

    /// Restarts the waveform when `note` differs from the active note.
    ///
    /// Returns true if a retrigger happened.
    pub fn retrigger_if_changed(&mut self, note: u8) -> bool {
        if self.active_note == Some(note) {
            return false;
        }

        log::trace!("retrigger: {:?} -> {}", self.active_note, note);
        self.active_note = Some(note);
        self.read_position = 0;
        true
    }

    /// Explicit note-on: restarts the waveform whether or not the note changed.
    pub fn note_on(&mut self) {
        log::trace!("note on, restarting {:?}", self.active_note);
        self.read_position = 0;
    }

    /// Explicit note-off. A one-shot voice ignores it.
    pub fn note_off(&mut self) {
        log::trace!("note off ignored for {:?}", self.active_note);
    }

    /// Advances the read counter by one output sample.
    pub fn advance(&mut self) {
        self.read_position = self.read_position.saturating_add(1);
    }

    /// Returns the voice to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
