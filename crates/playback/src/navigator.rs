// FILE: crates/playback/src/navigator.rs
//! Chapter navigation with transport reset

use crate::state::PlaybackState;

/// Moves the current chapter index and clears the transport on every move.
///
/// A chapter change always leaves the state stopped at zero with an unknown
/// duration and the default speed; starting the new chapter is up to the caller.
#[derive(Debug, Clone, Copy)]
pub struct ChapterNavigator {
    default_speed_index: usize,
}

impl ChapterNavigator {
    pub fn new(default_speed_index: usize) -> Self {
        Self {
            default_speed_index,
        }
    }

    /// Advances to the next chapter. Returns the new index, or `None` at the last chapter.
    pub fn step_forward(&self, state: &mut PlaybackState) -> Option<usize> {
        if !state.can_play_forward() {
            return None;
        }
        let index = state.current_chapter_index() + 1;
        self.enter(state, index);
        Some(index)
    }

    /// Returns to the previous chapter. Returns the new index, or `None` at the first chapter.
    pub fn step_backward(&self, state: &mut PlaybackState) -> Option<usize> {
        if !state.can_play_backward() {
            return None;
        }
        let index = state.current_chapter_index() - 1;
        self.enter(state, index);
        Some(index)
    }

    /// Jumps to `index`, clamped to the last chapter.
    ///
    /// Returns `None` for an empty book or when the clamped index is already current.
    pub fn jump_to(&self, state: &mut PlaybackState, index: usize) -> Option<usize> {
        let last = state.chapter_count().checked_sub(1)?;
        let index = index.min(last);
        if index == state.current_chapter_index() {
            return None;
        }
        self.enter(state, index);
        Some(index)
    }

    fn enter(&self, state: &mut PlaybackState, index: usize) {
        state.set_chapter_index(index);
        state.reset_transport(self.default_speed_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;

    fn playing_state(chapters: usize, index: usize) -> PlaybackState {
        let mut state = PlaybackState::new(chapters, 1);
        state.set_chapter_index(index);
        state.set_duration(Duration::from_secs(60));
        state.set_current_time(Duration::from_secs(30));
        state.set_speed_index(3);
        state.set_playing();
        state
    }

    #[test]
    fn test_step_forward_resets_transport() {
        let navigator = ChapterNavigator::new(1);
        let mut state = playing_state(3, 0);

        assert_eq!(navigator.step_forward(&mut state), Some(1));
        assert_eq!(state.current_chapter_index(), 1);
        assert!(!state.is_playing());
        assert_eq!(state.current_time(), Duration::ZERO);
        assert_eq!(state.duration(), Duration::ZERO);
        assert_eq!(state.speed_index(), 1);
    }

    #[test]
    fn test_step_forward_at_last_chapter_is_noop() {
        let navigator = ChapterNavigator::new(1);
        let mut state = playing_state(3, 2);
        let before = state.clone();

        assert_eq!(navigator.step_forward(&mut state), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_step_backward_at_first_chapter_is_noop() {
        let navigator = ChapterNavigator::new(1);
        let mut state = playing_state(3, 0);
        let before = state.clone();

        assert_eq!(navigator.step_backward(&mut state), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_step_backward() {
        let navigator = ChapterNavigator::new(1);
        let mut state = playing_state(3, 2);
        assert_eq!(navigator.step_backward(&mut state), Some(1));
        assert_eq!(state.speed_index(), 1);
    }

    #[test]
    fn test_jump_is_clamped() {
        let navigator = ChapterNavigator::new(1);
        let mut state = playing_state(3, 0);
        assert_eq!(navigator.jump_to(&mut state, 42), Some(2));
        assert_eq!(state.current_chapter_index(), 2);
    }

    #[test]
    fn test_jump_to_current_or_empty() {
        let navigator = ChapterNavigator::new(1);
        let mut state = playing_state(3, 1);
        assert_eq!(navigator.jump_to(&mut state, 1), None);
        assert!(state.is_playing());

        let mut empty = PlaybackState::new(0, 1);
        assert_eq!(navigator.jump_to(&mut empty, 0), None);
    }

    proptest! {
        #[test]
        fn test_steps_from_every_index(chapters in 1usize..64, default_speed in 0usize..6) {
            let navigator = ChapterNavigator::new(default_speed);

            for index in 0..chapters {
                let mut state = playing_state(chapters, index);
                let before = state.clone();
                match navigator.step_forward(&mut state) {
                    Some(next) => {
                        prop_assert!(index + 1 < chapters);
                        prop_assert_eq!(next, index + 1);
                        prop_assert_eq!(state.current_chapter_index(), next);
                        prop_assert!(!state.is_playing());
                        prop_assert_eq!(state.current_time(), Duration::ZERO);
                        prop_assert_eq!(state.speed_index(), default_speed);
                    }
                    None => {
                        prop_assert_eq!(index, chapters - 1);
                        prop_assert_eq!(&state, &before);
                    }
                }

                let mut state = playing_state(chapters, index);
                match navigator.step_backward(&mut state) {
                    Some(previous) => {
                        prop_assert!(index > 0);
                        prop_assert_eq!(previous, index - 1);
                        prop_assert_eq!(state.current_chapter_index(), previous);
                        prop_assert!(!state.is_playing());
                        prop_assert_eq!(state.duration(), Duration::ZERO);
                    }
                    None => {
                        prop_assert_eq!(index, 0);
                        prop_assert_eq!(&state, &before);
                    }
                }
            }
        }
    }
}
