// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use readalong_config::{ConfigManager, LogLevel};
use std::path::PathBuf;

mod commands;
mod player;
mod repl;
mod settings;

fn source_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .value_name("PATH|URL")
                .help("Book document to load (defaults to content.book_source)"),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Use the built-in three chapter sample book")
                .action(ArgAction::SetTrue)
                .conflicts_with("source"),
        )
}

fn build_cli() -> Command {
    Command::new("readalong")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Chapter-by-chapter audiobook player with a synchronized reader")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(source_args(
            Command::new("play").about("Fetch a book and drive playback from line commands"),
        ))
        .subcommand(source_args(
            Command::new("info").about("Fetch a book and print its chapters"),
        ))
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand_required(true)
                .subcommand(Command::new("init").about("Write a default config file if none exists"))
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("validate").about("Check the config file for invalid values")),
        )
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    match matches.get_one::<PathBuf>("config") {
        Some(dir) => Ok(ConfigManager::with_directory(dir.clone())),
        None => ConfigManager::new().context("Failed to resolve config directory"),
    }
}

fn init_logging(level: LogLevel) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let manager = config_manager(&matches)?;

    // `config` subcommands report load failures themselves
    if let Some(("config", sub_matches)) = matches.subcommand() {
        init_logging(LogLevel::Warn);
        return match sub_matches.subcommand() {
            Some(("init", _)) => commands::init_config(&manager),
            Some(("show", _)) => commands::show_config(&manager),
            Some(("validate", _)) => commands::validate_config(&manager),
            _ => Ok(()),
        };
    }

    let loaded = manager.load_with_env_overrides();
    let level = loaded
        .as_ref()
        .map(|config| config.app.log_level)
        .unwrap_or(LogLevel::Info);
    init_logging(level);
    let config = loaded.with_context(|| {
        format!(
            "Failed to load configuration from {}",
            manager.config_path().display()
        )
    })?;

    match matches.subcommand() {
        Some(("play", sub_matches)) => {
            let provider = commands::provider_for(&config, sub_matches)?;
            player::start_playback(&config, provider.as_ref()).await
        }
        Some(("info", sub_matches)) => {
            let provider = commands::provider_for(&config, sub_matches)?;
            commands::show_book_info(provider.as_ref()).await
        }
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
