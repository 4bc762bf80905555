//! Transport state of a playback session

use std::time::Duration;

/// Fraction of `duration` reached by `current_time`.
///
/// Always within `0.0..=1.0`; an unknown (zero) duration yields `0.0`.
pub fn progress(current_time: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }
    (current_time.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Whether audio is playing, and how far through the chapter
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackMode {
    #[default]
    NotPlaying,
    Playing {
        progress: f64,
    },
}

impl PlaybackMode {
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }
}

/// Observable state of one playback session.
///
/// `current_time` and `duration` are only written through the setters below so
/// that a `Playing` mode always carries the progress derived from them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    mode: PlaybackMode,
    current_time: Duration,
    duration: Duration,
    speed_index: usize,
    current_chapter_index: usize,
    chapter_count: usize,
}

impl PlaybackState {
    /// Creates a stopped state for a book with `chapter_count` chapters
    pub fn new(chapter_count: usize, speed_index: usize) -> Self {
        Self {
            speed_index,
            chapter_count,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.mode.is_playing()
    }

    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn speed_index(&self) -> usize {
        self.speed_index
    }

    pub fn current_chapter_index(&self) -> usize {
        self.current_chapter_index
    }

    pub fn chapter_count(&self) -> usize {
        self.chapter_count
    }

    /// Progress derived from the current time and duration
    pub fn progress(&self) -> f64 {
        progress(self.current_time, self.duration)
    }

    /// Time left in the chapter at the current playhead
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.current_time)
    }

    /// True if a later chapter exists
    pub fn can_play_forward(&self) -> bool {
        self.current_chapter_index + 1 < self.chapter_count
    }

    /// True if an earlier chapter exists
    pub fn can_play_backward(&self) -> bool {
        self.current_chapter_index > 0
    }

    pub(crate) fn set_current_time(&mut self, time: Duration) {
        self.current_time = time;
        self.refresh_progress();
    }

    pub(crate) fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
        self.refresh_progress();
    }

    pub(crate) fn set_speed_index(&mut self, index: usize) {
        self.speed_index = index;
        self.refresh_progress();
    }

    pub(crate) fn set_playing(&mut self) {
        self.mode = PlaybackMode::Playing {
            progress: self.progress(),
        };
    }

    pub(crate) fn set_not_playing(&mut self) {
        self.mode = PlaybackMode::NotPlaying;
    }

    pub(crate) fn set_chapter_index(&mut self, index: usize) {
        self.current_chapter_index = index;
    }

    pub(crate) fn set_chapter_count(&mut self, count: usize) {
        self.chapter_count = count;
    }

    /// Clears the transport for a new chapter: stopped at zero with the given speed
    pub(crate) fn reset_transport(&mut self, speed_index: usize) {
        self.mode = PlaybackMode::NotPlaying;
        self.current_time = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.speed_index = speed_index;
    }

    fn refresh_progress(&mut self) {
        if let PlaybackMode::Playing { .. } = self.mode {
            self.mode = PlaybackMode::Playing {
                progress: self.progress(),
            };
        }
    }
}
