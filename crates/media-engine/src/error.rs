// FILE: crates/media-engine/src/error.rs

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Cannot open {url}: {reason}")]
    ResourceUnavailable { url: String, reason: String },

    #[error("{url} was not ready to play after {timeout:?}")]
    NotReady { url: String, timeout: Duration },

    #[error("Invalid speed: {0}")]
    InvalidSpeed(f32),
}

pub type EngineResult<T> = Result<T, EngineError>;
