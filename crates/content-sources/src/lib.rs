// FILE: crates/content-sources/src/lib.rs

mod fixed;
mod local;
mod remote;
mod traits;

pub use fixed::StaticProvider;
pub use local::FileProvider;
pub use remote::HttpProvider;
pub use traits::ContentProvider;

use readalong_core::AppError;
use readalong_network::Client;
use std::fmt;

/// Result type for content source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors from content sources
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Network error
    NetworkError(String),
    /// Parse error
    ParseError(String),
    /// Document does not exist at the location
    NotFound(String),
    /// Location is neither a readable path nor an http(s) URL
    InvalidLocation(String),
    /// Local read failed
    Io(String),
    /// Source unavailable
    Unavailable(String),
}

impl SourceError {
    /// Converts into the shared taxonomy, naming the provider that failed
    pub fn to_app_error(&self, provider: &str) -> AppError {
        match self {
            SourceError::ParseError(details) => AppError::InvalidContentResponse {
                provider: provider.to_string(),
                details: details.clone(),
            },
            SourceError::InvalidLocation(url) => AppError::InvalidUrl { url: url.clone() },
            other => AppError::ContentSourceUnavailable {
                provider: provider.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NetworkError(e) => write!(f, "Network error: {}", e),
            SourceError::ParseError(e) => write!(f, "Parse error: {}", e),
            SourceError::NotFound(location) => write!(f, "Not found: {}", location),
            SourceError::InvalidLocation(location) => write!(f, "Invalid location: {}", location),
            SourceError::Io(e) => write!(f, "IO error: {}", e),
            SourceError::Unavailable(e) => write!(f, "Source unavailable: {}", e),
        }
    }
}

impl std::error::Error for SourceError {}

/// Picks a provider for `source`: HTTP for `http://` and `https://`, otherwise a file path
pub fn provider_from_source(source: &str, client: &Client) -> Box<dyn ContentProvider> {
    if source.starts_with("http://") || source.starts_with("https://") {
        Box::new(HttpProvider::new(client.clone(), source))
    } else {
        Box::new(FileProvider::new(source))
    }
}
