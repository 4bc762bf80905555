//! Observability port for playback sessions

use crate::events::SessionEvent;
use readalong_core::format_countdown;
use std::sync::Mutex;

/// Receives every event a session publishes, in order, on the session task.
///
/// Implementations must not block.
pub trait PlaybackObserver: Send + Sync {
    fn on_event(&self, event: &SessionEvent);
}

/// Writes events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PlaybackObserver for LogObserver {
    fn on_event(&self, event: &SessionEvent) {
        match event {
            SessionEvent::BookLoaded { chapter_count } => {
                log::info!("Loaded book with {} chapters", chapter_count)
            }
            SessionEvent::PlaybackRequested {
                chapter_index,
                seek_to: Some(at),
            } => log::debug!(
                "Play chapter {} from {}",
                chapter_index,
                format_countdown(*at)
            ),
            SessionEvent::PlaybackRequested { chapter_index, .. } => {
                log::debug!("Play chapter {}", chapter_index)
            }
            SessionEvent::PlaybackStarted { chapter_index } => {
                log::info!("Playback started for chapter {}", chapter_index)
            }
            SessionEvent::PlaybackFailed {
                chapter_index,
                error,
            } => log::warn!(
                "Playback failed for chapter {} ({}): {}",
                chapter_index,
                error.severity(),
                error
            ),
            SessionEvent::PlaybackPaused { at } => {
                log::info!("Paused at {}", format_countdown(*at))
            }
            SessionEvent::ChapterChanged { index } => log::info!("Chapter {}", index),
            SessionEvent::SpeedChanged { speed } => log::info!("Speed {}x", speed),
            SessionEvent::DurationUpdated(duration) => {
                log::debug!("Duration {}", format_countdown(*duration))
            }
        }
    }
}

/// Keeps every event in memory; used by tests and diagnostics
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events seen so far, oldest first
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of failure events seen so far
    pub fn failure_count(&self) -> usize {
        self.events().iter().filter(|e| e.is_failure()).count()
    }
}

impl PlaybackObserver for RecordingObserver {
    fn on_event(&self, event: &SessionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        observer.on_event(&SessionEvent::ChapterChanged { index: 1 });
        observer.on_event(&SessionEvent::SpeedChanged { speed: 1.25 });

        let events = observer.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SessionEvent::ChapterChanged { index: 1 }));
        assert_eq!(observer.failure_count(), 0);
    }

    #[test]
    fn test_log_observer_accepts_all_events() {
        let observer = LogObserver;
        observer.on_event(&SessionEvent::PlaybackPaused {
            at: Duration::from_secs(61),
        });
        observer.on_event(&SessionEvent::PlaybackRequested {
            chapter_index: 0,
            seek_to: None,
        });
    }
}
