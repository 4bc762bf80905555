//! Core domain model for the readalong audiobook client

pub mod error;
pub mod format;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorSeverity, RecoveryAction, Result};
pub use format::{format_countdown, format_speed};
pub use types::{Book, Chapter, PresentationMode};
