// FILE: crates/cli/src/player.rs

use anyhow::{Context, Result};
use console::{style, Term};
use readalong_config::Config;
use readalong_content_sources::ContentProvider;
use readalong_coordinator::ModeCoordinator;
use readalong_core::format_speed;
use readalong_playback::{PlaybackSession, SessionEvent};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::repl::{self, ReplCommand};
use crate::settings;

/// Fetch a book, start its first chapter and read commands until `q` or EOF
pub async fn start_playback(config: &Config, provider: &dyn ContentProvider) -> Result<()> {
    let engine = Arc::new(settings::engine(&config.player));
    let session_config =
        settings::session_config(&config.player).context("Invalid player configuration")?;
    let session = PlaybackSession::new(engine)
        .with_config(session_config)
        .spawn()
        .context("Failed to start playback session")?;

    let term = Term::stdout();
    let notices = spawn_notice_printer(term.clone(), session.subscribe());

    let mut coordinator = ModeCoordinator::new(session.clone());
    let result = run(&term, &mut coordinator, provider).await;

    notices.abort();
    if let Err(e) = session.shutdown().await {
        log::warn!("Session already closed: {}", e);
    }
    result
}

async fn run(
    term: &Term,
    coordinator: &mut ModeCoordinator,
    provider: &dyn ContentProvider,
) -> Result<()> {
    coordinator
        .load(provider)
        .await
        .with_context(|| format!("Failed to load book from {}", provider.name()))?;

    let book = coordinator.book();
    term.write_line(&format!(
        "\n{} {}",
        style("▶").green().bold(),
        style(&book.name).bold()
    ))?;
    term.write_line(&format!("  {} chapters, h for help", book.chapter_count()))?;
    draw_status(term, coordinator)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match repl::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                term.write_line(&format!("  {}", style(e).yellow()))?;
                continue;
            }
        };

        match command {
            ReplCommand::Quit => break,
            ReplCommand::Help => term.write_line(repl::HELP)?,
            command => {
                repl::apply(coordinator, command)
                    .await
                    .context("Playback session stopped")?;
                draw_status(term, coordinator)?;
            }
        }
    }

    Ok(())
}

fn draw_status(term: &Term, coordinator: &ModeCoordinator) -> Result<()> {
    let session = coordinator.session();
    let state = session.state();
    let speed = session.current_speed().value();
    let text = repl::status_text(coordinator.book(), &state, coordinator.book().mode, speed);

    let styled = if state.is_playing() {
        style(text).green()
    } else {
        style(text).dim()
    };
    term.write_line(&format!("  {}", styled))?;
    Ok(())
}

/// Prints session events the user should see without polling
fn spawn_notice_printer(
    term: Term,
    mut events: broadcast::Receiver<SessionEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    log::debug!("Notice printer skipped {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let line = match event {
                SessionEvent::PlaybackFailed { error, .. } => {
                    format!("  {} {}", style("✗").red().bold(), error.user_message())
                }
                SessionEvent::SpeedChanged { speed } => {
                    format!("  speed {}", style(format_speed(speed)).cyan())
                }
                _ => continue,
            };
            if term.write_line(&line).is_err() {
                break;
            }
        }
    })
}
