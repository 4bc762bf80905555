use readalong_content_sources::SourceError;
use readalong_playback::SessionError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinatorError {
    #[error("Failed to fetch book from {provider}: {source}")]
    Fetch {
        provider: String,
        source: SourceError,
    },

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type CoordinatorResult<T> = Result<T, CoordinatorError>;
