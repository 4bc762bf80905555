// FILE: crates/media-engine/src/simulated.rs

//! Clock-driven engine used by the CLI and as a scripted test double.
//!
//! No audio is decoded. Each known locator has a length and a readiness
//! behaviour; the playhead advances with the tokio clock multiplied by the
//! current rate, so tests running on a paused clock are deterministic.

use crate::engine::{AudioEngine, EngineCommand};
use crate::{EngineError, EngineResult, Speed};
use async_trait::async_trait;
use readalong_resilience::Timeout;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
enum Readiness {
    /// Becomes playable after the given delay
    After(Duration),
    /// Never becomes playable
    Broken(String),
}

#[derive(Debug, Clone)]
struct Track {
    duration: Duration,
    readiness: Readiness,
}

#[derive(Debug)]
struct LoadedItem {
    url: Url,
    duration: Duration,
    rate: f32,
    /// Playhead at the moment `playing_since` was last set
    anchor: Duration,
    playing_since: Option<Instant>,
}

impl LoadedItem {
    fn position(&self) -> Duration {
        let advanced = self
            .playing_since
            .map(|since| since.elapsed().mul_f64(f64::from(self.rate)))
            .unwrap_or(Duration::ZERO);
        (self.anchor + advanced).min(self.duration)
    }

    fn is_playing(&self) -> bool {
        self.playing_since.is_some()
    }

    fn play(&mut self) {
        if self.playing_since.is_none() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.anchor = self.position();
        self.playing_since = None;
    }

    fn seek(&mut self, time: Duration) {
        self.anchor = time.min(self.duration);
        if self.is_playing() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn set_rate(&mut self, rate: f32) {
        let was_playing = self.is_playing();
        self.pause();
        self.rate = rate;
        if was_playing {
            self.play();
        }
    }
}

#[derive(Debug, Default)]
struct EngineState {
    loaded: Option<LoadedItem>,
    /// Last seek target, applied to whatever the next `start` loads
    pending_seek: Option<Duration>,
    commands: Vec<EngineCommand>,
}

/// Engine with a scripted catalog of locators
pub struct SimulatedEngine {
    tracks: HashMap<Url, Track>,
    fallback_duration: Option<Duration>,
    ready_timeout: Timeout,
    state: Mutex<EngineState>,
}

impl SimulatedEngine {
    /// Creates an engine that knows no locators
    pub fn new() -> Self {
        Self {
            tracks: HashMap::new(),
            fallback_duration: None,
            ready_timeout: Timeout::new(DEFAULT_READY_TIMEOUT),
            state: Mutex::new(EngineState::default()),
        }
    }

    /// Sets how long `start` waits for an item to become ready
    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = Timeout::new(timeout);
        self
    }

    /// Adds a locator that is ready immediately
    pub fn with_track(self, url: Url, duration: Duration) -> Self {
        self.with_slow_track(url, duration, Duration::ZERO)
    }

    /// Adds a locator that becomes ready after `ready_after`
    pub fn with_slow_track(mut self, url: Url, duration: Duration, ready_after: Duration) -> Self {
        self.tracks.insert(
            url,
            Track {
                duration,
                readiness: Readiness::After(ready_after),
            },
        );
        self
    }

    /// Adds a locator that fails to open with `reason`
    pub fn with_broken_track(mut self, url: Url, reason: impl Into<String>) -> Self {
        self.tracks.insert(
            url,
            Track {
                duration: Duration::ZERO,
                readiness: Readiness::Broken(reason.into()),
            },
        );
        self
    }

    /// Accepts any locator not in the catalog, giving it `duration`
    pub fn with_fallback_duration(mut self, duration: Duration) -> Self {
        self.fallback_duration = Some(duration);
        self
    }

    /// Every command received so far, oldest first
    pub async fn commands(&self) -> Vec<EngineCommand> {
        self.state.lock().await.commands.clone()
    }

    /// Forgets recorded commands
    pub async fn clear_commands(&self) {
        self.state.lock().await.commands.clear();
    }

    /// Locator of the loaded item
    pub async fn loaded_url(&self) -> Option<Url> {
        self.state
            .lock()
            .await
            .loaded
            .as_ref()
            .map(|item| item.url.clone())
    }

    /// Returns true while the loaded item is producing output
    pub async fn is_playing(&self) -> bool {
        self.state
            .lock()
            .await
            .loaded
            .as_ref()
            .is_some_and(LoadedItem::is_playing)
    }

    fn track_for(&self, url: &Url) -> EngineResult<Track> {
        if let Some(track) = self.tracks.get(url) {
            return Ok(track.clone());
        }
        self.fallback_duration
            .map(|duration| Track {
                duration,
                readiness: Readiness::After(Duration::ZERO),
            })
            .ok_or_else(|| EngineError::ResourceUnavailable {
                url: url.to_string(),
                reason: "resource not found".to_string(),
            })
    }

    async fn wait_until_ready(&self, url: &Url, track: &Track) -> EngineResult<()> {
        match &track.readiness {
            Readiness::Broken(reason) => {
                log::error!("Status: failed for {}: {}", url, reason);
                Err(EngineError::ResourceUnavailable {
                    url: url.to_string(),
                    reason: reason.clone(),
                })
            }
            Readiness::After(delay) => self
                .ready_timeout
                .execute(tokio::time::sleep(*delay))
                .await
                .map_err(|_| EngineError::NotReady {
                    url: url.to_string(),
                    timeout: self.ready_timeout.duration(),
                }),
        }
    }
}

impl Default for SimulatedEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioEngine for SimulatedEngine {
    async fn start(&self, url: &Url, rate: Speed) -> EngineResult<()> {
        {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;

            if let Some(item) = state.loaded.as_mut().filter(|item| &item.url == url) {
                item.set_rate(rate.value());
                item.play();
                state.pending_seek = None;
                state.commands.push(EngineCommand::Start {
                    url: url.clone(),
                    rate: rate.value(),
                    resumed: true,
                });
                return Ok(());
            }

            state.commands.push(EngineCommand::Start {
                url: url.clone(),
                rate: rate.value(),
                resumed: false,
            });
            state.loaded = None;
        }

        let track = self.track_for(url)?;
        self.wait_until_ready(url, &track).await?;
        log::info!("Status: readyToPlay {}", url);

        let mut guard = self.state.lock().await;
        let anchor = guard
            .pending_seek
            .take()
            .unwrap_or(Duration::ZERO)
            .min(track.duration);
        let mut item = LoadedItem {
            url: url.clone(),
            duration: track.duration,
            rate: rate.value(),
            anchor,
            playing_since: None,
        };
        item.play();
        guard.loaded = Some(item);
        Ok(())
    }

    async fn stop(&self) {
        let mut guard = self.state.lock().await;
        if let Some(item) = guard.loaded.as_mut() {
            item.pause();
        }
        guard.commands.push(EngineCommand::Stop);
    }

    async fn seek(&self, time: Duration) {
        let mut guard = self.state.lock().await;
        if let Some(item) = guard.loaded.as_mut() {
            item.seek(time);
        }
        guard.pending_seek = Some(time);
        guard.commands.push(EngineCommand::Seek(time));
    }

    async fn set_rate(&self, rate: Speed) {
        let mut guard = self.state.lock().await;
        if let Some(item) = guard.loaded.as_mut() {
            item.set_rate(rate.value());
        }
        guard.commands.push(EngineCommand::SetRate(rate.value()));
    }

    async fn current_position(&self) -> Option<Duration> {
        self.state
            .lock()
            .await
            .loaded
            .as_ref()
            .map(LoadedItem::position)
    }

    async fn duration(&self) -> Option<Duration> {
        self.state
            .lock()
            .await
            .loaded
            .as_ref()
            .map(|item| item.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(name: &str) -> Url {
        Url::parse(&format!("https://example.com/{}.mp3", name)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_position_advances_with_rate() {
        let engine = SimulatedEngine::new().with_track(url("a"), Duration::from_secs(100));
        engine.start(&url("a"), Speed::default()).await.unwrap();

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(engine.current_position().await, Some(Duration::from_secs(4)));

        engine.set_rate(Speed::new(2.0).unwrap()).await;
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(engine.current_position().await, Some(Duration::from_secs(10)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_position_clamped_to_duration() {
        let engine = SimulatedEngine::new().with_track(url("a"), Duration::from_secs(5));
        engine.start(&url("a"), Speed::default()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(engine.current_position().await, Some(Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_url_resumes_in_place() {
        let engine = SimulatedEngine::new().with_track(url("a"), Duration::from_secs(100));
        engine.start(&url("a"), Speed::default()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(7)).await;
        engine.stop().await;
        tokio::time::sleep(Duration::from_secs(30)).await;

        engine.start(&url("a"), Speed::default()).await.unwrap();
        assert_eq!(engine.current_position().await, Some(Duration::from_secs(7)));

        let commands = engine.commands().await;
        assert_eq!(
            commands.last(),
            Some(&EngineCommand::Start {
                url: url("a"),
                rate: 1.0,
                resumed: true
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_before_load_applies_to_new_item() {
        let engine = SimulatedEngine::new().with_track(url("a"), Duration::from_secs(100));
        engine.seek(Duration::from_secs(42)).await;
        engine.start(&url("a"), Speed::default()).await.unwrap();
        assert_eq!(engine.current_position().await, Some(Duration::from_secs(42)));
    }

    #[tokio::test]
    async fn test_unknown_url_fails() {
        let engine = SimulatedEngine::new();
        let result = engine.start(&url("missing"), Speed::default()).await;
        assert!(matches!(result, Err(EngineError::ResourceUnavailable { .. })));
        assert_eq!(engine.current_position().await, None);
        assert_eq!(engine.duration().await, None);
    }

    #[tokio::test]
    async fn test_broken_track_fails_with_reason() {
        let engine = SimulatedEngine::new().with_broken_track(url("bad"), "codec error");
        let result = engine.start(&url("bad"), Speed::default()).await;
        match result {
            Err(EngineError::ResourceUnavailable { reason, .. }) => assert_eq!(reason, "codec error"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_track_times_out() {
        let engine = SimulatedEngine::new()
            .with_ready_timeout(Duration::from_secs(2))
            .with_slow_track(url("slow"), Duration::from_secs(10), Duration::from_secs(5));
        let result = engine.start(&url("slow"), Speed::default()).await;
        assert!(matches!(result, Err(EngineError::NotReady { .. })));
        assert!(engine.loaded_url().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_accepts_any_url() {
        let engine = SimulatedEngine::new().with_fallback_duration(Duration::from_secs(30));
        engine.start(&url("anything"), Speed::default()).await.unwrap();
        assert_eq!(engine.duration().await, Some(Duration::from_secs(30)));
        assert!(engine.is_playing().await);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent_without_item() {
        let engine = SimulatedEngine::new();
        engine.stop().await;
        engine.stop().await;
        assert_eq!(engine.commands().await, vec![EngineCommand::Stop, EngineCommand::Stop]);
        engine.clear_commands().await;
        assert!(engine.commands().await.is_empty());
    }
}
