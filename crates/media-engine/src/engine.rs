//! Capability interface over a platform media player

use crate::{EngineResult, Speed};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Primitives a playback session needs from an audio engine.
///
/// One implementation per platform plus test doubles. An engine instance is
/// shared across chapter transitions so that [`AudioEngine::start`] can detect
/// that a locator is already loaded.
#[async_trait]
pub trait AudioEngine: Send + Sync {
    /// Begins playback of `url` at `rate`.
    ///
    /// If `url` is already loaded, playback resumes in place at `rate` instead of
    /// reloading. Fails when the resource cannot be opened or does not become
    /// ready within the implementation's readiness timeout.
    async fn start(&self, url: &Url, rate: Speed) -> EngineResult<()>;

    /// Pauses output. Idempotent.
    async fn stop(&self);

    /// Moves the playhead. Returns once the engine has acknowledged the seek.
    async fn seek(&self, time: Duration);

    /// Changes the multiplier of the loaded item. No-op if nothing is loaded.
    async fn set_rate(&self, rate: Speed);

    /// Current playhead, `None` when nothing is loaded
    async fn current_position(&self) -> Option<Duration>;

    /// Length of the loaded item, `None` when nothing is loaded
    async fn duration(&self) -> Option<Duration>;
}

/// A command received by an engine, recorded by test doubles
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    Start { url: Url, rate: f32, resumed: bool },
    Stop,
    Seek(Duration),
    SetRate(f32),
}

impl EngineCommand {
    pub fn is_start(&self) -> bool {
        matches!(self, Self::Start { .. })
    }
}
