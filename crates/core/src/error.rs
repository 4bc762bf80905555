//! Error taxonomy shared across the readalong crates
//!
//! Every failure that reaches the UI is expressed as an [`AppError`] with a
//! severity tier and an advisory recovery action:
//! - **Recoverable**: the user may simply try again (transient fetch failure)
//! - **Degraded**: one feature is unavailable, the rest keeps working (a chapter will not play)
//! - **Fatal**: the app cannot continue without user action (broken configuration)
//!
//! Recovery actions are never applied automatically. Fetch and playback
//! failures are surfaced once and left for the user to act on.

use std::fmt;
use thiserror::Error;

/// Recovery actions the UI may offer when an error occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Offer the user a manual retry
    OfferRetry,
    /// Leave the failing feature unavailable and continue
    DisableFeature,
    /// Fall back to default configuration values
    ResetConfiguration,
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OfferRetry => write!(f, "Offer retry"),
            Self::DisableFeature => write!(f, "Disabling feature"),
            Self::ResetConfiguration => write!(f, "Reset configuration to defaults"),
        }
    }
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Recoverable,
    Degraded,
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Main error type surfaced to the UI layer
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Content Errors =====
    /// Content provider could not be reached or read
    #[error("Content source '{provider}' unavailable: {reason}")]
    ContentSourceUnavailable { provider: String, reason: String },

    /// Content provider returned something that is not a book document
    #[error("Invalid response from {provider}: {details}")]
    InvalidContentResponse { provider: String, details: String },

    // ===== Playback Errors =====
    /// Chapter audio reference is not a valid resource locator
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Audio engine failed to open or ready the chapter audio
    #[error("Playback failed for chapter {chapter_index}: {reason}")]
    PlaybackFailed { chapter_index: usize, reason: String },

    /// Audio engine did not become ready in time
    #[error("Audio engine not ready after {seconds}s")]
    EngineNotReady { seconds: u64 },

    // ===== Configuration Errors =====
    /// Invalid configuration
    #[error("Invalid configuration: {setting} = '{value}' ({reason})")]
    InvalidConfiguration {
        setting: String,
        value: String,
        reason: String,
    },
}

impl AppError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ContentSourceUnavailable { .. } | Self::EngineNotReady { .. } => {
                ErrorSeverity::Recoverable
            }

            Self::InvalidContentResponse { .. }
            | Self::InvalidUrl { .. }
            | Self::PlaybackFailed { .. } => ErrorSeverity::Degraded,

            Self::InvalidConfiguration { .. } => ErrorSeverity::Fatal,
        }
    }

    /// Returns the recommended recovery action for this error
    pub fn recovery_action(&self) -> RecoveryAction {
        match self {
            Self::ContentSourceUnavailable { .. }
            | Self::EngineNotReady { .. }
            | Self::PlaybackFailed { .. } => RecoveryAction::OfferRetry,

            Self::InvalidUrl { .. } | Self::InvalidContentResponse { .. } => {
                RecoveryAction::DisableFeature
            }

            Self::InvalidConfiguration { .. } => RecoveryAction::ResetConfiguration,
        }
    }

    /// Returns a user-friendly error message suitable for display in the UI
    pub fn user_message(&self) -> String {
        match self {
            Self::ContentSourceUnavailable { provider, .. } => {
                format!("{} is currently unavailable. Please try again later.", provider)
            }
            Self::InvalidContentResponse { .. } => {
                "Received invalid book data from the server.".to_string()
            }
            Self::InvalidUrl { .. } => "This chapter has no playable audio.".to_string(),
            Self::PlaybackFailed { .. } => {
                "Cannot play this chapter. Tap play to try again.".to_string()
            }
            Self::EngineNotReady { .. } => {
                "The audio took too long to load. Tap play to try again.".to_string()
            }
            Self::InvalidConfiguration { setting, .. } => {
                format!("Invalid setting: {}. Please check your configuration.", setting)
            }
        }
    }

    /// Returns true if this error should be logged at ERROR level
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_errors_are_degraded() {
        let err = AppError::PlaybackFailed {
            chapter_index: 2,
            reason: "404".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Degraded);
        assert_eq!(err.recovery_action(), RecoveryAction::OfferRetry);
        assert!(err.to_string().contains("chapter 2"));
    }

    #[test]
    fn test_invalid_url_disables_feature() {
        let err = AppError::InvalidUrl {
            url: "not a url".to_string(),
        };
        assert_eq!(err.recovery_action(), RecoveryAction::DisableFeature);
        assert!(!err.is_critical());
    }

    #[test]
    fn test_fetch_failure_is_recoverable() {
        let err = AppError::ContentSourceUnavailable {
            provider: "file".to_string(),
            reason: "missing".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert!(err.user_message().contains("file"));
    }

    #[test]
    fn test_configuration_errors_are_fatal() {
        let err = AppError::InvalidConfiguration {
            setting: "player.speeds".to_string(),
            value: "[]".to_string(),
            reason: "must not be empty".to_string(),
        };
        assert!(err.is_critical());
        assert_eq!(err.recovery_action(), RecoveryAction::ResetConfiguration);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Recoverable < ErrorSeverity::Degraded);
        assert!(ErrorSeverity::Degraded < ErrorSeverity::Fatal);
    }
}
