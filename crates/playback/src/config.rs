//! Tunables for a playback session

use crate::error::{SessionError, SessionResult};
use crate::speeds::SpeedTable;
use std::time::Duration;

/// Step applied by fast-forward
pub const DEFAULT_FAST_FORWARD: Duration = Duration::from_secs(10);
/// Step applied by rewind
pub const DEFAULT_REWIND: Duration = Duration::from_secs(5);
/// Period of the position-polling loop
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub speeds: SpeedTable,
    pub fast_forward: Duration,
    pub rewind: Duration,
    pub poll_interval: Duration,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speeds(mut self, speeds: SpeedTable) -> Self {
        self.speeds = speeds;
        self
    }

    pub fn with_fast_forward(mut self, step: Duration) -> Self {
        self.fast_forward = step;
        self
    }

    pub fn with_rewind(mut self, step: Duration) -> Self {
        self.rewind = step;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn validate(&self) -> SessionResult<()> {
        if self.poll_interval.is_zero() {
            return Err(SessionError::ZeroPollInterval);
        }
        if self.speeds.is_empty() {
            return Err(SessionError::EmptySpeedTable);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            speeds: SpeedTable::default(),
            fast_forward: DEFAULT_FAST_FORWARD,
            rewind: DEFAULT_REWIND,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.fast_forward, Duration::from_secs(10));
        assert_eq!(config.rewind, Duration::from_secs(5));
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let config = SessionConfig::new().with_poll_interval(Duration::ZERO);
        assert_eq!(config.validate(), Err(SessionError::ZeroPollInterval));
    }
}
