// crates/resilience/src/error.rs
//! Error types for resilience operations

use thiserror::Error;

/// Result type for resilience operations
pub type ResilienceResult<T> = Result<T, ResilienceError>;

/// Errors that can occur in resilience operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResilienceError {
    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Operation was cancelled
    #[error("Operation was cancelled")]
    Cancelled,
}

impl ResilienceError {
    /// Returns the elapsed limit for timeouts
    pub fn timeout_duration(&self) -> Option<std::time::Duration> {
        match self {
            Self::Timeout(duration) => Some(*duration),
            Self::Cancelled => None,
        }
    }
}
