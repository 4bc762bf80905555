//! Presentation shadow of the audio/reader switcher

use readalong_core::PresentationMode;

/// What the mode switcher control displays.
///
/// Mirrors the book's presentation mode and whether the session plays; the
/// coordinator keeps it in sync and never reads transport state from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeSwitchState {
    pub is_reader_mode: bool,
    pub is_playing: bool,
}

impl ModeSwitchState {
    pub fn toggle_play_pause(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn toggle_mode(&mut self) {
        self.is_reader_mode = !self.is_reader_mode;
    }

    pub fn set_is_playing(&mut self, is_playing: bool) {
        self.is_playing = is_playing;
    }

    pub fn set_mode(&mut self, mode: PresentationMode) {
        self.is_reader_mode = mode.is_reader();
    }
}
