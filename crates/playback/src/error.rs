// FILE: crates/playback/src/error.rs

use readalong_media_engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Speed table is empty")]
    EmptySpeedTable,

    #[error("Default speed {0}x is not in the speed table")]
    DefaultSpeedMissing(f32),

    #[error("Invalid speed in table: {0}")]
    InvalidSpeed(#[from] EngineError),

    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("Playback session has shut down")]
    Closed,
}

pub type SessionResult<T> = Result<T, SessionError>;
