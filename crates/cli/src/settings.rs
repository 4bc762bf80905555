// FILE: crates/cli/src/settings.rs
//! Conversions from config sections into runtime types

use readalong_config::{ContentConfig, PlayerConfig};
use readalong_media_engine::SimulatedEngine;
use readalong_network::ClientConfig;
use readalong_playback::{SessionConfig, SessionResult, SpeedTable};
use std::time::Duration;

/// Length given to chapter audio the simulated engine has no entry for
pub const SIMULATED_CHAPTER_LENGTH: Duration = Duration::from_secs(5 * 60);

pub fn session_config(player: &PlayerConfig) -> SessionResult<SessionConfig> {
    let speeds = SpeedTable::new(&player.speeds, player.default_speed)?;
    let config = SessionConfig::new()
        .with_speeds(speeds)
        .with_fast_forward(Duration::from_secs(player.fast_forward_secs))
        .with_rewind(Duration::from_secs(player.rewind_secs))
        .with_poll_interval(Duration::from_millis(player.poll_interval_ms));
    config.validate()?;
    Ok(config)
}

pub fn client_config(content: &ContentConfig) -> ClientConfig {
    ClientConfig::default()
        .with_timeout(Duration::from_secs(content.request_timeout_secs))
        .with_user_agent(content.user_agent.clone())
}

/// Engine that accepts any well-formed chapter locator
pub fn engine(player: &PlayerConfig) -> SimulatedEngine {
    SimulatedEngine::new()
        .with_fallback_duration(SIMULATED_CHAPTER_LENGTH)
        .with_ready_timeout(Duration::from_secs(player.ready_timeout_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use readalong_playback::SessionError;

    #[test]
    fn test_default_player_config_matches_session_defaults() {
        let config = session_config(&PlayerConfig::default()).unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_custom_player_config() {
        let player = PlayerConfig {
            speeds: vec![1.0, 2.0],
            default_speed: 2.0,
            fast_forward_secs: 30,
            rewind_secs: 15,
            poll_interval_ms: 250,
            ready_timeout_secs: 3,
        };

        let config = session_config(&player).unwrap();
        assert_eq!(config.speeds.len(), 2);
        assert_eq!(config.speeds.default_index(), 1);
        assert_eq!(config.fast_forward, Duration::from_secs(30));
        assert_eq!(config.rewind, Duration::from_secs(15));
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_unlisted_default_speed_is_rejected() {
        let player = PlayerConfig {
            default_speed: 3.0,
            ..Default::default()
        };
        assert_eq!(
            session_config(&player),
            Err(SessionError::DefaultSpeedMissing(3.0))
        );
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let player = PlayerConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(session_config(&player), Err(SessionError::ZeroPollInterval));
    }

    #[test]
    fn test_client_config() {
        let content = ContentConfig {
            request_timeout_secs: 5,
            user_agent: "test-agent".to_string(),
            ..Default::default()
        };
        let client = client_config(&content);
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.user_agent, "test-agent");
    }
}
