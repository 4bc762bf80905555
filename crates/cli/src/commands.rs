// FILE: crates/cli/src/commands.rs

use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use console::style;
use readalong_config::{Config, ConfigManager, ValidationError};
use readalong_content_sources::{provider_from_source, ContentProvider, StaticProvider};
use readalong_core::{AppError, Book};
use readalong_network::Client;

use crate::settings;

/// Chooses the book provider from `--demo`, `--source` or the config
pub fn provider_for(config: &Config, matches: &ArgMatches) -> Result<Box<dyn ContentProvider>> {
    if matches.get_flag("demo") {
        return Ok(Box::new(StaticProvider::sample()));
    }

    let source = matches
        .get_one::<String>("source")
        .map(String::as_str)
        .unwrap_or(&config.content.book_source);

    let client = Client::with_config(settings::client_config(&config.content))
        .context("Failed to build HTTP client")?;
    Ok(provider_from_source(source, &client))
}

/// Fetch a book and print its chapters
pub async fn show_book_info(provider: &dyn ContentProvider) -> Result<()> {
    let book = provider
        .fetch_book()
        .await
        .map_err(|e| e.to_app_error(provider.name()))
        .with_context(|| format!("Failed to fetch book from {}", provider.name()))?;

    print_book(&book);
    Ok(())
}

fn print_book(book: &Book) {
    println!("\n{}", style(&book.name).bold().cyan());
    println!("{}", "=".repeat(80));
    println!("ID: {}", book.id);
    println!("Cover: {}", book.cover_page_image);
    println!("Mode: {}", book.mode);
    println!("\n{} Chapters", style(book.chapter_count()).bold());

    for (index, chapter) in book.chapters.iter().enumerate() {
        println!("  {:>3}. {}", index + 1, style(&chapter.key_point).bold());
        println!("       {}", style(&chapter.audio).dim());
    }
}

/// Write a default config file
pub fn init_config(manager: &ConfigManager) -> Result<()> {
    let created = manager
        .initialize()
        .context("Failed to write default config")?;

    if created {
        println!(
            "{} Config written to {}",
            style("✓").green().bold(),
            manager.config_path().display()
        );
    } else {
        println!(
            "Config already exists at {}",
            manager.config_path().display()
        );
    }
    Ok(())
}

/// Print the effective configuration, env overrides included
pub fn show_config(manager: &ConfigManager) -> Result<()> {
    let config = manager
        .load_with_env_overrides()
        .context("Failed to load config")?;

    println!("# {}", manager.config_path().display());
    print!("{}", config.to_toml().context("Failed to render config")?);
    Ok(())
}

/// Check the config file and list every invalid field
pub fn validate_config(manager: &ConfigManager) -> Result<()> {
    let config = manager.load().context("Failed to load config")?;
    let Err(errors) = config.validate() else {
        println!("{} Config is valid", style("✓").green().bold());
        return Ok(());
    };

    for error in errors.iter().map(invalid_setting) {
        println!("{} {}", style("✗").red().bold(), error);
        println!("  {} ({})", error.user_message(), error.recovery_action());
    }
    bail!("{} invalid value(s) in {}", errors.len(), manager.config_path().display())
}

/// UI-facing form of a config field that failed validation
pub fn invalid_setting(error: &ValidationError) -> AppError {
    AppError::InvalidConfiguration {
        setting: error.field.clone(),
        value: error.value.clone().unwrap_or_default(),
        reason: error.message.clone(),
    }
}
