// FILE: crates/playback/src/session.rs
//! Actor that owns a playback session.
//!
//! All intents and engine signals are funnelled through one unbounded queue and
//! applied on a single task, so state transitions never interleave. Engine work
//! runs in spawned effort tasks. At most one effort is live at a time: starting
//! a new one cancels the previous one and waits for it to finish before it
//! touches the engine, which keeps seek, start and stop in issue order.
//! Rate changes go straight to the engine; a start that is still pending when
//! the rate changes re-applies the latest rate once the item is loaded.

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::events::SessionEvent;
use crate::observer::{LogObserver, PlaybackObserver};
use crate::reducer::{Action, Effect, EffortId, PlayEffort, SessionState};
use crate::state::PlaybackState;
use readalong_core::Book;
use readalong_media_engine::{AudioEngine, Speed};
use readalong_resilience::CancellationToken;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

const EVENT_CAPACITY: usize = 64;

enum Message {
    Action(Action),
    Snapshot(oneshot::Sender<PlaybackState>),
    Shutdown(oneshot::Sender<()>),
}

/// Route from effort tasks back into the session queue.
///
/// Holds a weak sender so that running efforts do not keep the session alive
/// once every handle is gone.
#[derive(Clone)]
struct Feedback(mpsc::WeakUnboundedSender<Message>);

impl Feedback {
    fn send(&self, action: Action) -> bool {
        match self.0.upgrade() {
            Some(sender) => sender.send(Message::Action(action)).is_ok(),
            None => false,
        }
    }
}

struct ActiveEffort {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Builder for a playback session
pub struct PlaybackSession {
    engine: Arc<dyn AudioEngine>,
    config: SessionConfig,
    observer: Arc<dyn PlaybackObserver>,
    book: Book,
}

impl PlaybackSession {
    pub fn new(engine: Arc<dyn AudioEngine>) -> Self {
        Self {
            engine,
            config: SessionConfig::default(),
            observer: Arc::new(LogObserver),
            book: Book::idle(),
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn PlaybackObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_book(mut self, book: Book) -> Self {
        self.book = book;
        self
    }

    /// Starts the session task. Must be called within a tokio runtime.
    pub fn spawn(self) -> SessionResult<SessionHandle> {
        self.config.validate()?;

        let state = SessionState::new(self.book, &self.config);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(state.playback().clone());
        let (rate_tx, _) = watch::channel(self.config.speeds.speed(state.playback().speed_index()));
        let config = Arc::new(self.config);

        let runtime = SessionRuntime {
            state,
            config: config.clone(),
            engine: self.engine,
            observer: self.observer,
            events: events_tx.clone(),
            snapshot: snapshot_tx,
            rate: rate_tx,
            feedback: Feedback(inbox_tx.downgrade()),
            active: None,
        };
        tokio::spawn(runtime.run(inbox_rx));

        Ok(SessionHandle {
            inbox: inbox_tx,
            events: events_tx,
            state: snapshot_rx,
            config,
        })
    }
}

struct SessionRuntime {
    state: SessionState,
    config: Arc<SessionConfig>,
    engine: Arc<dyn AudioEngine>,
    observer: Arc<dyn PlaybackObserver>,
    events: broadcast::Sender<SessionEvent>,
    snapshot: watch::Sender<PlaybackState>,
    rate: watch::Sender<Speed>,
    feedback: Feedback,
    active: Option<ActiveEffort>,
}

impl SessionRuntime {
    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Message>) {
        log::debug!("Playback session started");
        while let Some(message) = inbox.recv().await {
            match message {
                Message::Action(action) => self.dispatch(action),
                Message::Snapshot(reply) => {
                    let _ = reply.send(self.state.playback().clone());
                }
                Message::Shutdown(reply) => {
                    inbox.close();
                    self.teardown().await;
                    let _ = reply.send(());
                    return;
                }
            }
        }
        self.teardown().await;
    }

    fn dispatch(&mut self, action: Action) {
        let effects = self.state.reduce(action, &self.config);
        let speed = self.config.speeds.speed(self.state.playback().speed_index());
        self.rate.send_replace(speed);
        for effect in effects {
            self.apply(effect);
        }

        let playback = self.state.playback();
        self.snapshot.send_if_modified(|current| {
            if current == playback {
                return false;
            }
            *current = playback.clone();
            true
        });
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Play(effort) => {
                let engine = self.engine.clone();
                let feedback = self.feedback.clone();
                let rate = self.rate.subscribe();
                self.replace_effort(run_play(engine, effort, rate, feedback));
            }
            Effect::Monitor(id) => {
                let engine = self.engine.clone();
                let feedback = self.feedback.clone();
                let period = self.config.poll_interval;
                self.replace_effort(monitor(engine, id, period, feedback));
            }
            Effect::Stop => {
                let engine = self.engine.clone();
                self.replace_effort(async move { engine.stop().await });
            }
            Effect::SetRate(speed) => {
                let engine = self.engine.clone();
                tokio::spawn(async move { engine.set_rate(speed).await });
            }
            Effect::Emit(event) => {
                self.observer.on_event(&event);
                let _ = self.events.send(event);
            }
        }
    }

    /// Cancels the live effort and schedules `work` to run once it has finished
    fn replace_effort<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let previous = self.active.take().map(|active| {
            active.token.cancel();
            active.handle
        });

        let token = CancellationToken::new();
        let task_token = token.clone();
        let handle = tokio::spawn(async move {
            if let Some(previous) = previous {
                let _ = previous.await;
            }
            tokio::select! {
                biased;
                _ = task_token.cancelled() => {}
                _ = work => {}
            }
        });

        self.active = Some(ActiveEffort { token, handle });
    }

    async fn teardown(&mut self) {
        if let Some(active) = self.active.take() {
            active.token.cancel();
            let _ = active.handle.await;
        }
        if self.state.playback().is_playing() {
            self.engine.stop().await;
        }
        log::debug!("Playback session stopped");
    }
}

/// Seek (if requested), then start, then report the outcome.
///
/// `rate` tracks the session speed; a change made while `start` was pending is
/// applied before reporting success.
async fn run_play(
    engine: Arc<dyn AudioEngine>,
    effort: PlayEffort,
    rate: watch::Receiver<Speed>,
    feedback: Feedback,
) {
    if let Some(at) = effort.seek_to {
        engine.seek(at).await;
    }
    let action = match engine.start(&effort.url, effort.rate).await {
        Ok(()) => {
            let current = *rate.borrow();
            if current != effort.rate {
                log::debug!("Speed changed to {}x during start", current.value());
                engine.set_rate(current).await;
            }
            Action::PlaybackStarted(effort.id)
        }
        Err(e) => {
            log::warn!("Failed to start {}: {}", effort.url, e);
            Action::PlaybackFailed(effort.id, e)
        }
    };
    feedback.send(action);
}

/// Reports the duration once, then the playhead every `period`
async fn monitor(engine: Arc<dyn AudioEngine>, id: EffortId, period: Duration, feedback: Feedback) {
    if let Some(duration) = engine.duration().await {
        if !feedback.send(Action::DurationUpdated(id, duration)) {
            return;
        }
    }

    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Some(position) = engine.current_position().await {
            if !feedback.send(Action::CurrentTimeUpdated(id, position)) {
                return;
            }
        }
    }
}

/// Cloneable handle to a running session.
///
/// Commands are queued and applied in order; they return as soon as the
/// command is queued. Use [`SessionHandle::snapshot`] to read the state after
/// every earlier command has been applied.
#[derive(Clone)]
pub struct SessionHandle {
    inbox: mpsc::UnboundedSender<Message>,
    events: broadcast::Sender<SessionEvent>,
    state: watch::Receiver<PlaybackState>,
    config: Arc<SessionConfig>,
}

impl SessionHandle {
    pub fn toggle_play_pause(&self) -> SessionResult<()> {
        self.send(Action::TogglePlayPause)
    }

    pub fn fast_forward(&self) -> SessionResult<()> {
        self.send(Action::FastForward)
    }

    pub fn rewind(&self) -> SessionResult<()> {
        self.send(Action::Rewind)
    }

    /// Seeks to `time` and plays from there
    pub fn slider_to_time(&self, time: Duration) -> SessionResult<()> {
        self.send(Action::SliderToTime(time))
    }

    pub fn change_speed(&self) -> SessionResult<()> {
        self.send(Action::ChangeSpeed)
    }

    pub fn play_forward(&self) -> SessionResult<()> {
        self.send(Action::PlayForward)
    }

    pub fn play_backward(&self) -> SessionResult<()> {
        self.send(Action::PlayBackward)
    }

    /// Moves to `index` (clamped) without starting playback
    pub fn select_chapter(&self, index: usize) -> SessionResult<()> {
        self.send(Action::SelectChapter(index))
    }

    /// Replaces the book and resets to its first chapter
    pub fn load_book(&self, book: Book) -> SessionResult<()> {
        self.send(Action::LoadBook(book))
    }

    /// Plays the current chapter without seeking
    pub fn play_from_start(&self) -> SessionResult<()> {
        self.send(Action::PlayFromStart)
    }

    /// State after every previously queued command has been applied
    pub async fn snapshot(&self) -> SessionResult<PlaybackState> {
        let (reply, response) = oneshot::channel();
        self.inbox
            .send(Message::Snapshot(reply))
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)
    }

    /// Latest published state, without waiting for queued commands
    pub fn state(&self) -> PlaybackState {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<PlaybackState> {
        self.state.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn progress(&self) -> f64 {
        self.state.borrow().progress()
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().is_playing()
    }

    pub fn current_speed(&self) -> Speed {
        self.config.speeds.speed(self.state.borrow().speed_index())
    }

    pub fn remaining(&self) -> Duration {
        self.state.borrow().remaining()
    }

    pub fn can_play_forward(&self) -> bool {
        self.state.borrow().can_play_forward()
    }

    pub fn can_play_backward(&self) -> bool {
        self.state.borrow().can_play_backward()
    }

    /// Cancels running work, pauses the engine if playing, and ends the session task
    pub async fn shutdown(&self) -> SessionResult<()> {
        let (reply, done) = oneshot::channel();
        self.inbox
            .send(Message::Shutdown(reply))
            .map_err(|_| SessionError::Closed)?;
        done.await.map_err(|_| SessionError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.inbox.is_closed()
    }

    fn send(&self, action: Action) -> SessionResult<()> {
        self.inbox
            .send(Message::Action(action))
            .map_err(|_| SessionError::Closed)
    }
}
