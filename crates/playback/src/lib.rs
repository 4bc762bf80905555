//! Playback - session state machine for chapter-by-chapter audiobook playback
//!
//! A [`PlaybackSession`] owns the transport state of one book: which chapter is
//! current, whether it plays, where the playhead is and how fast it moves. User
//! intents are queued through a [`SessionHandle`]; the session drives an
//! [`AudioEngine`](readalong_media_engine::AudioEngine) and publishes state
//! snapshots on a watch channel and [`SessionEvent`]s on a broadcast channel.
//!
//! # Example
//!
//! ```no_run
//! use readalong_core::Book;
//! use readalong_media_engine::SimulatedEngine;
//! use readalong_playback::PlaybackSession;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Arc::new(SimulatedEngine::new().with_fallback_duration(Duration::from_secs(300)));
//! let session = PlaybackSession::new(engine).with_book(Book::sample()).spawn()?;
//!
//! session.toggle_play_pause()?;
//! session.change_speed()?;
//! let state = session.snapshot().await?;
//! println!("chapter {} at {:?}", state.current_chapter_index(), state.current_time());
//! session.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod events;
mod navigator;
mod observer;
mod reducer;
mod session;
mod speeds;
mod state;

pub use config::{SessionConfig, DEFAULT_FAST_FORWARD, DEFAULT_POLL_INTERVAL, DEFAULT_REWIND};
pub use error::{SessionError, SessionResult};
pub use events::{playback_error, SessionEvent};
pub use navigator::ChapterNavigator;
pub use observer::{LogObserver, PlaybackObserver, RecordingObserver};
pub use reducer::{Action, Effect, EffortId, PlayEffort, SessionState};
pub use session::{PlaybackSession, SessionHandle};
pub use speeds::{SpeedTable, DEFAULT_SPEEDS};
pub use state::{progress, PlaybackMode, PlaybackState};
