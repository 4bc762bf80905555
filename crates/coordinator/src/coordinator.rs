// FILE: crates/coordinator/src/coordinator.rs
//! Top-level composition of book, playback session and reader position.
//!
//! The session is the source of truth for transport state. After every routed
//! transport intent the coordinator reads a session snapshot and reconciles the
//! reader index and the mode switcher shadow from it. A background follower
//! watches the session as well, so changes the session makes on its own (a
//! chapter that fails to start) reach the shadow without a routed intent.

use crate::error::{CoordinatorError, CoordinatorResult};
use crate::events::CoordinatorEvent;
use crate::mode_switch::ModeSwitchState;
use crate::reader::BookReaderPosition;
use readalong_content_sources::ContentProvider;
use readalong_core::{Book, PresentationMode};
use readalong_playback::{PlaybackState, SessionHandle};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

const EVENT_CAPACITY: usize = 32;

pub struct ModeCoordinator {
    book: Book,
    reader: BookReaderPosition,
    mode_switch: Arc<Mutex<ModeSwitchState>>,
    session: SessionHandle,
    events: broadcast::Sender<CoordinatorEvent>,
    follower: JoinHandle<()>,
}

impl ModeCoordinator {
    /// Creates a coordinator holding the idle placeholder book.
    /// Must be called within a tokio runtime.
    pub fn new(session: SessionHandle) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let mode_switch = Arc::new(Mutex::new(ModeSwitchState::default()));
        let follower = tokio::spawn(follow_session(
            session.watch(),
            mode_switch.clone(),
            events.clone(),
        ));
        Self {
            book: Book::idle(),
            reader: BookReaderPosition::default(),
            mode_switch,
            session,
            events,
            follower,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn reader(&self) -> &BookReaderPosition {
        &self.reader
    }

    /// Current mode switcher shadow
    pub fn mode_switch(&self) -> ModeSwitchState {
        *lock(&self.mode_switch)
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.events.subscribe()
    }

    /// Fetches the book once from `provider` and installs it.
    ///
    /// On failure the placeholder book stays in place, a single
    /// [`CoordinatorEvent::FetchFailed`] is published, and the error is returned.
    pub async fn load(&mut self, provider: &dyn ContentProvider) -> CoordinatorResult<()> {
        log::info!("Fetching book from {}", provider.name());
        match provider.fetch_book().await {
            Ok(book) => self.install(book).await,
            Err(e) => {
                let error = e.to_app_error(provider.name());
                log::warn!("Book fetch failed: {}", error);
                self.emit(CoordinatorEvent::FetchFailed {
                    message: error.to_string(),
                });
                Err(CoordinatorError::Fetch {
                    provider: provider.name().to_string(),
                    source: e,
                })
            }
        }
    }

    /// Installs `book` in every sub-state in audio mode and starts the first chapter
    pub async fn install(&mut self, mut book: Book) -> CoordinatorResult<()> {
        book.mode = PresentationMode::Audio;
        let id = book.id;

        self.session.load_book(book.clone())?;
        self.reader = BookReaderPosition::new(book.chapter_count());
        lock(&self.mode_switch).set_mode(book.mode);
        self.book = book;
        log::info!("Installed book {} '{}'", id, self.book.name);
        self.emit(CoordinatorEvent::BookInstalled { id });

        self.session.play_from_start()?;
        self.refresh().await
    }

    /// Flips between audio and reader presentation. Audio is left untouched.
    pub fn toggle_mode(&mut self) -> PresentationMode {
        self.book.mode = self.book.mode.toggled();
        lock(&self.mode_switch).set_mode(self.book.mode);
        self.emit(CoordinatorEvent::ModeToggled(self.book.mode));
        self.book.mode
    }

    pub async fn toggle_play_pause(&mut self) -> CoordinatorResult<()> {
        self.session.toggle_play_pause()?;
        self.refresh().await
    }

    pub async fn fast_forward(&mut self) -> CoordinatorResult<()> {
        self.session.fast_forward()?;
        self.refresh().await
    }

    pub async fn rewind(&mut self) -> CoordinatorResult<()> {
        self.session.rewind()?;
        self.refresh().await
    }

    pub async fn slider_to_time(&mut self, time: Duration) -> CoordinatorResult<()> {
        self.session.slider_to_time(time)?;
        self.refresh().await
    }

    pub async fn change_speed(&mut self) -> CoordinatorResult<()> {
        self.session.change_speed()?;
        self.refresh().await
    }

    /// Next chapter in the session; the reader follows
    pub async fn play_forward(&mut self) -> CoordinatorResult<()> {
        self.session.play_forward()?;
        self.refresh().await
    }

    /// Previous chapter in the session; the reader follows
    pub async fn play_backward(&mut self) -> CoordinatorResult<()> {
        self.session.play_backward()?;
        self.refresh().await
    }

    /// Page swipe forward in the reader
    pub async fn reader_next(&mut self) -> CoordinatorResult<()> {
        let before = self.reader.current_chapter_index();
        let after = self.reader.next_chapter();
        self.reader_moved(before, after).await
    }

    /// Page swipe back in the reader
    pub async fn reader_previous(&mut self) -> CoordinatorResult<()> {
        let before = self.reader.current_chapter_index();
        let after = self.reader.previous_chapter();
        self.reader_moved(before, after).await
    }

    /// Reader jump to `index` (clamped)
    pub async fn reader_set_chapter(&mut self, index: usize) -> CoordinatorResult<()> {
        let before = self.reader.current_chapter_index();
        let after = self.reader.set_chapter_index(index);
        self.reader_moved(before, after).await
    }

    /// Reconciles the reader index and mode switcher with the session
    pub async fn refresh(&mut self) -> CoordinatorResult<()> {
        // The snapshot orders after queued intents; the published state may be newer
        self.session.snapshot().await?;
        let state = self.session.state();

        let index = state.current_chapter_index();
        if index != self.reader.current_chapter_index() {
            self.reader.set_chapter_index(index);
            self.emit(CoordinatorEvent::ChapterIndexChanged(index));
        }
        self.set_playing(state.is_playing());
        Ok(())
    }

    /// Pushes a reader-driven chapter into the session and restarts audio there
    async fn reader_moved(&mut self, before: usize, after: usize) -> CoordinatorResult<()> {
        if before == after {
            return Ok(());
        }
        log::debug!("Reader moved to chapter {}", after);

        self.session.select_chapter(after)?;
        self.session.toggle_play_pause()?;
        self.emit(CoordinatorEvent::ChapterIndexChanged(after));
        self.set_playing(true);
        self.refresh().await
    }

    fn set_playing(&mut self, is_playing: bool) {
        update_playing(&self.mode_switch, &self.events, is_playing);
    }

    fn emit(&self, event: CoordinatorEvent) {
        publish(&self.events, event);
    }
}

impl Drop for ModeCoordinator {
    fn drop(&mut self) {
        self.follower.abort();
    }
}

/// Mirrors every published session state into the shadow until the session ends
async fn follow_session(
    mut state: watch::Receiver<PlaybackState>,
    mode_switch: Arc<Mutex<ModeSwitchState>>,
    events: broadcast::Sender<CoordinatorEvent>,
) {
    while state.changed().await.is_ok() {
        let is_playing = state.borrow_and_update().is_playing();
        update_playing(&mode_switch, &events, is_playing);
    }
    log::debug!("Session closed, shadow follower stopped");
}

fn update_playing(
    mode_switch: &Mutex<ModeSwitchState>,
    events: &broadcast::Sender<CoordinatorEvent>,
    is_playing: bool,
) {
    let changed = {
        let mut shadow = lock(mode_switch);
        let changed = shadow.is_playing != is_playing;
        shadow.set_is_playing(is_playing);
        changed
    };
    if changed {
        publish(events, CoordinatorEvent::PlayingChanged(is_playing));
    }
}

fn lock(mode_switch: &Mutex<ModeSwitchState>) -> MutexGuard<'_, ModeSwitchState> {
    mode_switch.lock().unwrap_or_else(PoisonError::into_inner)
}

fn publish(events: &broadcast::Sender<CoordinatorEvent>, event: CoordinatorEvent) {
    log::debug!("Coordinator event: {:?}", event);
    let _ = events.send(event);
}
