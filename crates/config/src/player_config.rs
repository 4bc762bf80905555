//! Player configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Lowest multiplier the audio engine accepts
pub const MIN_SPEED: f32 = 0.25;
/// Highest multiplier the audio engine accepts
pub const MAX_SPEED: f32 = 4.0;

/// Transport behaviour of the playback session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Speeds cycled by the speed button, in order
    pub speeds: Vec<f32>,

    /// Speed used for a new chapter; must be one of `speeds`
    pub default_speed: f32,

    /// Fast-forward step in seconds
    pub fast_forward_secs: u64,

    /// Rewind step in seconds
    pub rewind_secs: u64,

    /// Position polling period in milliseconds
    pub poll_interval_ms: u64,

    /// How long the engine may take to make a chapter playable
    pub ready_timeout_secs: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speeds: vec![0.5, 1.0, 1.25, 1.5, 1.75, 2.0],
            default_speed: 1.0,
            fast_forward_secs: 10,
            rewind_secs: 5,
            poll_interval_ms: 1000,
            ready_timeout_secs: 10,
        }
    }
}

impl ConfigSection for PlayerConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::in_range(self.default_speed, MIN_SPEED, MAX_SPEED, "player.default_speed"),
            Validator::in_range(self.fast_forward_secs, 1, 300, "player.fast_forward_secs"),
            Validator::in_range(self.rewind_secs, 1, 300, "player.rewind_secs"),
            Validator::in_range(self.poll_interval_ms, 100, 10_000, "player.poll_interval_ms"),
            Validator::in_range(self.ready_timeout_secs, 1, 120, "player.ready_timeout_secs"),
        ];

        if self.speeds.is_empty() {
            results.push(Err(ValidationError::new("player.speeds", "must not be empty")));
        }
        for speed in &self.speeds {
            results.push(Validator::in_range(*speed, MIN_SPEED, MAX_SPEED, "player.speeds"));
        }
        if !self
            .speeds
            .iter()
            .any(|speed| (speed - self.default_speed).abs() < f32::EPSILON)
        {
            results.push(Err(ValidationError::with_value(
                "player.default_speed",
                "must be one of player.speeds",
                self.default_speed,
            )));
        }

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.speeds = other.speeds;
        self.default_speed = other.default_speed;
        self.fast_forward_secs = other.fast_forward_secs;
        self.rewind_secs = other.rewind_secs;
        self.poll_interval_ms = other.poll_interval_ms;
        self.ready_timeout_secs = other.ready_timeout_secs;
    }

    fn section_name(&self) -> &'static str {
        "player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PlayerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_speed_must_be_listed() {
        let config = PlayerConfig {
            default_speed: 3.0,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "player.default_speed");
    }

    #[test]
    fn test_speed_out_of_range() {
        let config = PlayerConfig {
            speeds: vec![1.0, 8.0],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_speeds() {
        let config = PlayerConfig {
            speeds: Vec::new(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.message == "must not be empty"));
    }

    #[test]
    fn test_merge() {
        let mut base = PlayerConfig::default();
        let other = PlayerConfig {
            rewind_secs: 15,
            ..Default::default()
        };

        base.merge(other);
        assert_eq!(base.rewind_secs, 15);
    }

    #[test]
    fn test_multiple_validation_errors() {
        let config = PlayerConfig {
            fast_forward_secs: 0,
            rewind_secs: 0,
            poll_interval_ms: 0,
            ..Default::default()
        };

        let result = config.validate();
        assert_eq!(result.unwrap_err().len(), 3);
    }
}
