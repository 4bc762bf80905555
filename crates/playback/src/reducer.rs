//! Pure transition function of a playback session.
//!
//! [`SessionState::reduce`] applies one [`Action`] and returns the side effects
//! the runtime must perform. Nothing here touches the engine or the clock, so
//! every transition is testable without a runtime.
//!
//! Asynchronous work is organised as *efforts*. Each play request receives a
//! fresh [`EffortId`]; signals coming back from the engine carry the id of the
//! effort that produced them and are dropped unless that effort is still the
//! active one. A pause or a failure clears the active effort, so no position
//! tick is applied after it.

use crate::config::SessionConfig;
use crate::events::{playback_error, SessionEvent};
use crate::navigator::ChapterNavigator;
use crate::state::PlaybackState;
use readalong_core::{AppError, Book};
use readalong_media_engine::{EngineError, Speed};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Identifies one play effort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffortId(u64);

/// Input to the session: user intents and signals from running efforts
#[derive(Debug, Clone)]
pub enum Action {
    TogglePlayPause,
    /// Skips ahead by the configured step, clamped to the duration. While the
    /// duration is still unknown (zero) the clamp lands on zero, restarting the chapter.
    FastForward,
    Rewind,
    SliderToTime(Duration),
    ChangeSpeed,
    PlayForward,
    PlayBackward,
    SelectChapter(usize),
    LoadBook(Book),
    PlayFromStart,

    PlaybackStarted(EffortId),
    PlaybackFailed(EffortId, EngineError),
    DurationUpdated(EffortId, Duration),
    CurrentTimeUpdated(EffortId, Duration),
}

/// Engine work for one play request
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEffort {
    pub id: EffortId,
    pub url: Url,
    pub seek_to: Option<Duration>,
    pub rate: Speed,
}

/// Side effect requested by a transition
#[derive(Debug, Clone)]
pub enum Effect {
    /// Replace the active effort with a seek-then-start chain
    Play(PlayEffort),
    /// Replace the active effort with the position-polling loop
    Monitor(EffortId),
    /// Cancel the active effort and pause the engine
    Stop,
    /// Change the engine rate without interrupting playback
    SetRate(Speed),
    Emit(SessionEvent),
}

/// Everything the reducer owns
#[derive(Debug, Clone)]
pub struct SessionState {
    playback: PlaybackState,
    book: Book,
    active_effort: Option<EffortId>,
    next_effort: u64,
}

impl SessionState {
    pub fn new(book: Book, config: &SessionConfig) -> Self {
        Self {
            playback: PlaybackState::new(book.chapter_count(), config.speeds.default_index()),
            book,
            active_effort: None,
            next_effort: 0,
        }
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn active_effort(&self) -> Option<EffortId> {
        self.active_effort
    }

    /// Applies `action` and returns the effects to run, in order
    pub fn reduce(&mut self, action: Action, config: &SessionConfig) -> Vec<Effect> {
        let navigator = ChapterNavigator::new(config.speeds.default_index());

        match action {
            Action::TogglePlayPause => {
                if self.playback.is_playing() {
                    self.pause()
                } else if self.playback.current_time().is_zero() {
                    self.start_effort(None, config)
                } else {
                    self.start_effort(Some(self.playback.current_time()), config)
                }
            }

            Action::FastForward => {
                let target = (self.playback.current_time() + config.fast_forward)
                    .min(self.playback.duration());
                self.playback.set_current_time(target);
                self.start_effort(Some(target), config)
            }

            Action::Rewind => {
                let target = self.playback.current_time().saturating_sub(config.rewind);
                self.playback.set_current_time(target);
                self.start_effort(Some(target), config)
            }

            Action::SliderToTime(time) => {
                let duration = self.playback.duration();
                let target = if duration.is_zero() {
                    time
                } else {
                    time.min(duration)
                };
                self.playback.set_current_time(target);
                self.start_effort(Some(target), config)
            }

            Action::ChangeSpeed => {
                let index = config.speeds.next_index(self.playback.speed_index());
                self.playback.set_speed_index(index);
                let speed = config.speeds.speed(index);
                vec![
                    Effect::SetRate(speed),
                    Effect::Emit(SessionEvent::SpeedChanged {
                        speed: speed.value(),
                    }),
                ]
            }

            Action::PlayForward => match navigator.step_forward(&mut self.playback) {
                Some(index) => self.enter_and_play(index, config),
                None => Vec::new(),
            },

            Action::PlayBackward => match navigator.step_backward(&mut self.playback) {
                Some(index) => self.enter_and_play(index, config),
                None => Vec::new(),
            },

            Action::SelectChapter(index) => {
                let was_busy = self.playback.is_playing() || self.active_effort.is_some();
                match navigator.jump_to(&mut self.playback, index) {
                    Some(index) => {
                        self.active_effort = None;
                        let mut effects = Vec::new();
                        if was_busy {
                            effects.push(Effect::Stop);
                        }
                        effects.push(Effect::Emit(SessionEvent::ChapterChanged { index }));
                        effects
                    }
                    None => Vec::new(),
                }
            }

            Action::LoadBook(book) => {
                let was_busy = self.playback.is_playing() || self.active_effort.is_some();
                let chapter_count = book.chapter_count();
                self.book = book;
                self.active_effort = None;
                self.playback.set_chapter_count(chapter_count);
                self.playback.set_chapter_index(0);
                self.playback.reset_transport(config.speeds.default_index());

                let mut effects = Vec::new();
                if was_busy {
                    effects.push(Effect::Stop);
                }
                effects.push(Effect::Emit(SessionEvent::BookLoaded { chapter_count }));
                effects
            }

            Action::PlayFromStart => self.start_effort(None, config),

            Action::PlaybackStarted(id) => {
                if !self.is_active(id) {
                    return Vec::new();
                }
                vec![
                    Effect::Monitor(id),
                    Effect::Emit(SessionEvent::PlaybackStarted {
                        chapter_index: self.playback.current_chapter_index(),
                    }),
                ]
            }

            Action::PlaybackFailed(id, error) => {
                if !self.is_active(id) {
                    return Vec::new();
                }
                self.active_effort = None;
                self.playback.set_not_playing();
                let chapter_index = self.playback.current_chapter_index();
                vec![Effect::Emit(SessionEvent::PlaybackFailed {
                    chapter_index,
                    error: Arc::new(playback_error(chapter_index, &error)),
                })]
            }

            Action::DurationUpdated(id, duration) => {
                if !self.is_active(id) {
                    return Vec::new();
                }
                self.playback.set_duration(duration);
                vec![Effect::Emit(SessionEvent::DurationUpdated(duration))]
            }

            Action::CurrentTimeUpdated(id, time) => {
                if self.is_active(id) {
                    self.playback.set_current_time(time);
                }
                Vec::new()
            }
        }
    }

    fn is_active(&self, id: EffortId) -> bool {
        self.active_effort == Some(id)
    }

    fn pause(&mut self) -> Vec<Effect> {
        self.playback.set_not_playing();
        self.active_effort = None;
        vec![
            Effect::Stop,
            Effect::Emit(SessionEvent::PlaybackPaused {
                at: self.playback.current_time(),
            }),
        ]
    }

    fn enter_and_play(&mut self, index: usize, config: &SessionConfig) -> Vec<Effect> {
        let mut effects = vec![Effect::Emit(SessionEvent::ChapterChanged { index })];
        effects.extend(self.start_effort(None, config));
        effects
    }

    /// Issues a play effort for the current chapter, optionally seeking first
    fn start_effort(&mut self, seek_to: Option<Duration>, config: &SessionConfig) -> Vec<Effect> {
        let chapter_index = self.playback.current_chapter_index();
        let Some(chapter) = self.book.chapter(chapter_index) else {
            log::warn!("No chapter {} to play", chapter_index);
            return Vec::new();
        };

        let url = match Url::parse(&chapter.audio) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Invalid audio locator '{}': {}", chapter.audio, e);
                let error = AppError::InvalidUrl {
                    url: chapter.audio.clone(),
                };
                let had_effort = self.active_effort.take().is_some();
                self.playback.set_not_playing();
                let mut effects = Vec::new();
                if had_effort {
                    effects.push(Effect::Stop);
                }
                effects.push(Effect::Emit(SessionEvent::PlaybackFailed {
                    chapter_index,
                    error: Arc::new(error),
                }));
                return effects;
            }
        };

        self.next_effort += 1;
        let id = EffortId(self.next_effort);
        self.active_effort = Some(id);
        self.playback.set_playing();

        vec![
            Effect::Emit(SessionEvent::PlaybackRequested {
                chapter_index,
                seek_to,
            }),
            Effect::Play(PlayEffort {
                id,
                url,
                seek_to,
                rate: config.speeds.speed(self.playback.speed_index()),
            }),
        ]
    }
}
