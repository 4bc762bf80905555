// crates/network/src/error.rs
//! Error types for network operations

use readalong_core::AppError;
use thiserror::Error;

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur during network operations
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Response body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl NetworkError {
    /// Returns true if the error is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        match self {
            NetworkError::Status { status, .. } => (400..500).contains(status),
            NetworkError::Http(e) => e.status().is_some_and(|s| s.is_client_error()),
            _ => false,
        }
    }

    /// Returns true if the error is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        match self {
            NetworkError::Status { status, .. } => (500..600).contains(status),
            NetworkError::Http(e) => e.status().is_some_and(|s| s.is_server_error()),
            _ => false,
        }
    }

    /// Converts into the shared taxonomy, naming the provider that failed
    pub fn into_app_error(self, provider: &str) -> AppError {
        match self {
            NetworkError::InvalidUrl(url) => AppError::InvalidUrl { url },
            NetworkError::Decode(e) => AppError::InvalidContentResponse {
                provider: provider.to_string(),
                details: e.to_string(),
            },
            other => AppError::ContentSourceUnavailable {
                provider: provider.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NetworkError::InvalidUrl("test".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_status_classification() {
        let not_found = NetworkError::Status {
            status: 404,
            url: "https://example.com/book.json".to_string(),
        };
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());
        assert!(not_found.to_string().contains("404"));

        let unavailable = NetworkError::Status {
            status: 503,
            url: "https://example.com/book.json".to_string(),
        };
        assert!(unavailable.is_server_error());
    }

    #[test]
    fn test_into_app_error() {
        let err = NetworkError::Custom("offline".to_string()).into_app_error("http");
        assert!(matches!(err, AppError::ContentSourceUnavailable { .. }));

        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = NetworkError::from(decode).into_app_error("http");
        assert!(matches!(err, AppError::InvalidContentResponse { .. }));
    }
}
