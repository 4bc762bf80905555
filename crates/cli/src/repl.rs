// FILE: crates/cli/src/repl.rs
//! Line commands accepted by `readalong play`

use anyhow::{bail, Context, Result};
use readalong_coordinator::{CoordinatorResult, ModeCoordinator};
use readalong_core::{format_countdown, format_speed, Book, PresentationMode};
use readalong_playback::PlaybackState;
use std::time::Duration;

pub const HELP: &str = "\
  p        play / pause
  f        fast-forward
  r        rewind
  s        next speed
  n / b    next / previous chapter
  m        switch audio / reader mode
  > / <    reader page forward / back
  t SECS   move the slider to SECS
  h        this help
  q        quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    TogglePlayPause,
    FastForward,
    Rewind,
    ChangeSpeed,
    PlayForward,
    PlayBackward,
    ToggleMode,
    ReaderNext,
    ReaderPrevious,
    SliderTo(Duration),
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };

    let command = match head {
        "p" => ReplCommand::TogglePlayPause,
        "f" => ReplCommand::FastForward,
        "r" => ReplCommand::Rewind,
        "s" => ReplCommand::ChangeSpeed,
        "n" => ReplCommand::PlayForward,
        "b" => ReplCommand::PlayBackward,
        "m" => ReplCommand::ToggleMode,
        ">" => ReplCommand::ReaderNext,
        "<" => ReplCommand::ReaderPrevious,
        "h" | "?" => ReplCommand::Help,
        "q" => ReplCommand::Quit,
        "t" => {
            let secs = parts.next().context("Usage: t SECS")?;
            let secs: f64 = secs
                .parse()
                .with_context(|| format!("Not a number of seconds: {}", secs))?;
            if !secs.is_finite() || secs < 0.0 {
                bail!("Slider time must be zero or positive");
            }
            let time = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("Slider time out of range: {}", secs))?;
            ReplCommand::SliderTo(time)
        }
        other => bail!("Unknown command '{}' (h for help)", other),
    };

    if parts.next().is_some() {
        bail!("Unexpected arguments after '{}'", head);
    }
    Ok(Some(command))
}

/// Routes a transport or reader command to the coordinator
pub async fn apply(coordinator: &mut ModeCoordinator, command: ReplCommand) -> CoordinatorResult<()> {
    match command {
        ReplCommand::TogglePlayPause => coordinator.toggle_play_pause().await,
        ReplCommand::FastForward => coordinator.fast_forward().await,
        ReplCommand::Rewind => coordinator.rewind().await,
        ReplCommand::ChangeSpeed => coordinator.change_speed().await,
        ReplCommand::PlayForward => coordinator.play_forward().await,
        ReplCommand::PlayBackward => coordinator.play_backward().await,
        ReplCommand::ToggleMode => {
            coordinator.toggle_mode();
            Ok(())
        }
        ReplCommand::ReaderNext => coordinator.reader_next().await,
        ReplCommand::ReaderPrevious => coordinator.reader_previous().await,
        ReplCommand::SliderTo(time) => coordinator.slider_to_time(time).await,
        ReplCommand::Help | ReplCommand::Quit => Ok(()),
    }
}

/// One-line summary: chapter, transport, countdown and speed
pub fn status_text(book: &Book, state: &PlaybackState, mode: PresentationMode, speed: f32) -> String {
    let count = book.chapter_count();
    if count == 0 {
        return "No chapters".to_string();
    }

    let index = state.current_chapter_index();
    let title = book
        .chapter(index)
        .map(|chapter| chapter.key_point.as_str())
        .unwrap_or_default();
    let transport = if state.is_playing() { "playing" } else { "paused" };

    format!(
        "[{}/{}] {} | {} {} / -{} | {} | {}",
        index + 1,
        count,
        title,
        transport,
        format_countdown(state.current_time()),
        format_countdown(state.remaining()),
        format_speed(speed),
        mode
    )
}
