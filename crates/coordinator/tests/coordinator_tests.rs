//! Mode coordinator against a simulated engine on a paused clock

use readalong_content_sources::{SourceError, StaticProvider};
use readalong_coordinator::{CoordinatorError, CoordinatorEvent, ModeCoordinator};
use readalong_core::{Book, PresentationMode};
use readalong_media_engine::{EngineCommand, SimulatedEngine, Url};
use readalong_playback::{PlaybackSession, RecordingObserver};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn engine() -> Arc<SimulatedEngine> {
    Arc::new(SimulatedEngine::new().with_fallback_duration(secs(120)))
}

fn coordinator(engine: &Arc<SimulatedEngine>) -> ModeCoordinator {
    let session = PlaybackSession::new(engine.clone())
        .with_observer(Arc::new(RecordingObserver::new()))
        .spawn()
        .unwrap();
    ModeCoordinator::new(session)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

fn drain(events: &mut broadcast::Receiver<CoordinatorEvent>) -> Vec<CoordinatorEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    seen
}

#[tokio::test(start_paused = true)]
async fn test_fetch_failure_keeps_placeholder() {
    let engine = engine();
    let mut coordinator = coordinator(&engine);
    let mut events = coordinator.subscribe();

    let provider = StaticProvider::failing(SourceError::Unavailable("offline".to_string()));
    let result = coordinator.load(&provider).await;

    assert!(matches!(result, Err(CoordinatorError::Fetch { .. })));
    assert!(coordinator.book().is_idle());
    let seen = drain(&mut events);
    assert_eq!(seen.len(), 1);
    assert!(matches!(&seen[0], CoordinatorEvent::FetchFailed { message } if message.contains("offline")));

    settle().await;
    assert!(engine.commands().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_install_forces_audio_and_starts_first_chapter() {
    let engine = engine();
    let mut coordinator = coordinator(&engine);
    let mut events = coordinator.subscribe();

    let mut book = Book::sample();
    book.mode = PresentationMode::Reader;
    coordinator.load(&StaticProvider::new(book)).await.unwrap();
    settle().await;

    assert_eq!(coordinator.book().mode, PresentationMode::Audio);
    assert!(!coordinator.mode_switch().is_reader_mode);
    assert!(coordinator.mode_switch().is_playing);
    assert_eq!(coordinator.reader().chapter_count(), 3);

    let commands = engine.commands().await;
    assert_eq!(commands.len(), 1);
    assert!(commands[0].is_start());

    let seen = drain(&mut events);
    assert_eq!(seen[0], CoordinatorEvent::BookInstalled { id: Book::sample().id });
    assert!(seen.contains(&CoordinatorEvent::PlayingChanged(true)));
}

#[tokio::test(start_paused = true)]
async fn test_toggle_mode_preserves_transport() {
    let engine = engine();
    let mut coordinator = coordinator(&engine);
    coordinator.load(&StaticProvider::sample()).await.unwrap();
    tokio::time::sleep(secs(3) + Duration::from_millis(500)).await;

    coordinator.toggle_play_pause().await.unwrap();
    let before = coordinator.session().snapshot().await.unwrap();
    assert_eq!(before.current_time(), secs(3));

    assert_eq!(coordinator.toggle_mode(), PresentationMode::Reader);
    assert!(coordinator.mode_switch().is_reader_mode);
    assert_eq!(coordinator.toggle_mode(), PresentationMode::Audio);

    let after = coordinator.session().snapshot().await.unwrap();
    assert_eq!(after.current_chapter_index(), before.current_chapter_index());
    assert_eq!(after.current_time(), before.current_time());
    assert_eq!(after.duration(), before.duration());
}

#[tokio::test(start_paused = true)]
async fn test_audio_keeps_playing_in_reader_mode() {
    let engine = engine();
    let mut coordinator = coordinator(&engine);
    coordinator.load(&StaticProvider::sample()).await.unwrap();
    settle().await;

    coordinator.toggle_mode();
    settle().await;
    assert!(engine.is_playing().await);
    assert!(coordinator.session().is_playing());
}

#[tokio::test(start_paused = true)]
async fn test_reader_swipe_restarts_audio_on_new_chapter() {
    let engine = engine();
    let mut coordinator = coordinator(&engine);
    coordinator.load(&StaticProvider::sample()).await.unwrap();
    tokio::time::sleep(secs(2) + Duration::from_millis(500)).await;
    coordinator.toggle_play_pause().await.unwrap();
    assert!(!coordinator.mode_switch().is_playing);
    let mut events = coordinator.subscribe();

    coordinator.reader_next().await.unwrap();
    settle().await;

    let state = coordinator.session().snapshot().await.unwrap();
    assert_eq!(state.current_chapter_index(), 1);
    assert!(state.is_playing());
    assert_eq!(coordinator.reader().current_chapter_index(), 1);
    assert!(coordinator.mode_switch().is_playing);
    assert_eq!(
        engine.loaded_url().await.map(|u| u.to_string()),
        Some(Book::sample().chapters[1].audio.clone())
    );

    let seen = drain(&mut events);
    assert!(seen.contains(&CoordinatorEvent::ChapterIndexChanged(1)));
    assert!(seen.contains(&CoordinatorEvent::PlayingChanged(true)));
}

#[tokio::test(start_paused = true)]
async fn test_switcher_follows_failed_reader_chapter() {
    let broken = Url::parse(&Book::sample().chapters[1].audio).unwrap();
    let engine = Arc::new(
        SimulatedEngine::new()
            .with_fallback_duration(secs(120))
            .with_broken_track(broken, "missing file"),
    );
    let mut coordinator = coordinator(&engine);
    coordinator.load(&StaticProvider::sample()).await.unwrap();
    settle().await;
    let mut events = coordinator.subscribe();

    coordinator.reader_next().await.unwrap();
    tokio::time::sleep(secs(2)).await;

    assert!(!coordinator.session().is_playing());
    assert!(!coordinator.mode_switch().is_playing);
    assert_eq!(coordinator.reader().current_chapter_index(), 1);
    let seen = drain(&mut events);
    assert_eq!(seen.last(), Some(&CoordinatorEvent::PlayingChanged(false)));
}

#[tokio::test(start_paused = true)]
async fn test_reader_jump_is_clamped() {
    let engine = engine();
    let mut coordinator = coordinator(&engine);
    coordinator.load(&StaticProvider::sample()).await.unwrap();

    coordinator.reader_set_chapter(99).await.unwrap();
    assert_eq!(coordinator.reader().current_chapter_index(), 2);
    let state = coordinator.session().snapshot().await.unwrap();
    assert_eq!(state.current_chapter_index(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_reader_swipe_at_bound_changes_nothing() {
    let engine = engine();
    let mut coordinator = coordinator(&engine);
    coordinator.load(&StaticProvider::sample()).await.unwrap();
    settle().await;
    let mut events = coordinator.subscribe();

    coordinator.reader_previous().await.unwrap();
    assert!(drain(&mut events).is_empty());
    assert_eq!(coordinator.session().snapshot().await.unwrap().current_chapter_index(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_play_forward_moves_reader() {
    let engine = engine();
    let mut coordinator = coordinator(&engine);
    coordinator.load(&StaticProvider::sample()).await.unwrap();
    let mut events = coordinator.subscribe();

    coordinator.play_forward().await.unwrap();
    coordinator.play_forward().await.unwrap();
    coordinator.play_forward().await.unwrap();

    assert_eq!(coordinator.reader().current_chapter_index(), 2);
    assert_eq!(
        drain(&mut events),
        vec![
            CoordinatorEvent::ChapterIndexChanged(1),
            CoordinatorEvent::ChapterIndexChanged(2),
        ]
    );

    coordinator.play_backward().await.unwrap();
    assert_eq!(coordinator.reader().current_chapter_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_transport_routes_reach_engine_in_order() {
    let engine = engine();
    let mut coordinator = coordinator(&engine);
    coordinator.load(&StaticProvider::sample()).await.unwrap();
    tokio::time::sleep(secs(20) + Duration::from_millis(500)).await;
    engine.clear_commands().await;

    coordinator.rewind().await.unwrap();
    settle().await;
    coordinator.fast_forward().await.unwrap();
    settle().await;
    coordinator.change_speed().await.unwrap();
    settle().await;

    let commands = engine.commands().await;
    assert_eq!(commands[0], EngineCommand::Seek(secs(15)));
    assert!(commands[1].is_start());
    assert_eq!(commands[2], EngineCommand::Seek(secs(25)));
    assert!(commands[3].is_start());
    assert_eq!(commands[4], EngineCommand::SetRate(1.25));
}
