//! Coordinator - keeps audio playback, reader position and presentation mode of one book in step
//!
//! - `coordinator`: [`ModeCoordinator`], the composition root the UI talks to
//! - `reader`: [`BookReaderPosition`], the text-mode chapter index
//! - `mode_switch`: [`ModeSwitchState`], what the audio/reader switcher shows

mod coordinator;
mod error;
mod events;
mod mode_switch;
mod reader;

pub use coordinator::ModeCoordinator;
pub use error::{CoordinatorError, CoordinatorResult};
pub use events::CoordinatorEvent;
pub use mode_switch::ModeSwitchState;
pub use reader::BookReaderPosition;
