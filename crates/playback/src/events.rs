//! Notifications published by a playback session

use readalong_core::AppError;
use readalong_media_engine::EngineError;
use std::sync::Arc;
use std::time::Duration;

/// Something that happened inside a session.
///
/// Position ticks are not events; observe them through the state watch channel.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A new book replaced the previous one
    BookLoaded { chapter_count: usize },
    /// A play effort was issued for the chapter
    PlaybackRequested {
        chapter_index: usize,
        seek_to: Option<Duration>,
    },
    /// The engine reported that audio is playing
    PlaybackStarted { chapter_index: usize },
    /// A play effort failed; the session is stopped
    PlaybackFailed {
        chapter_index: usize,
        error: Arc<AppError>,
    },
    /// The user paused at the given time
    PlaybackPaused { at: Duration },
    /// The current chapter changed and the transport was reset
    ChapterChanged { index: usize },
    /// The speed button selected a new multiplier
    SpeedChanged { speed: f32 },
    /// The engine reported the chapter length
    DurationUpdated(Duration),
}

impl SessionEvent {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::PlaybackFailed { .. })
    }
}

/// Maps an engine failure for `chapter_index` into the shared error taxonomy
pub fn playback_error(chapter_index: usize, error: &EngineError) -> AppError {
    match error {
        EngineError::NotReady { timeout, .. } => AppError::EngineNotReady {
            seconds: timeout.as_secs(),
        },
        other => AppError::PlaybackFailed {
            chapter_index,
            reason: other.to_string(),
        },
    }
}
