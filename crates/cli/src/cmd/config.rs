//! Settings command
//!
//! Provides CLI interface to view and edit the settings file.

use crate::settings;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

/// List all settings
pub async fn run_list(config: Option<&Path>) -> Result<()> {
    let path = settings::config_file_path(config)?;
    let settings = settings::load(&path)?;

    println!("{}", "Lull Settings".bold());
    println!("{}: {}\n", "Location".dimmed(), path.display().dimmed());

    println!("{}", "[debounce]".yellow());
    println!(
        "  {} = {} {}",
        "delay_ms".cyan(),
        settings.debounce.delay_ms,
        if settings.debounce.delay_ms == 0 {
            "(next scheduler turn)".dimmed().to_string()
        } else {
            format!("({}ms quiet period)", settings.debounce.delay_ms).dimmed().to_string()
        }
    );

    println!("\n{}", "[search]".yellow());
    println!(
        "  {} = {} {}",
        "limit".cyan(),
        settings.search.limit,
        "(results per search)".dimmed()
    );
    println!(
        "  {} = {}",
        "latency_ms".cyan(),
        settings.search.latency_ms
    );
    println!(
        "  {} = {}",
        "max_term_len".cyan(),
        settings.search.max_term_len
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!("  delay_ms: 0-60000");
    println!("  limit: 1-100");
    println!("  latency_ms: 0-60000");
    println!("  max_term_len: 1-500");

    Ok(())
}

/// Print a single setting
pub async fn run_get(config: Option<&Path>, key: &str) -> Result<()> {
    let path = settings::config_file_path(config)?;
    let settings = settings::load(&path)?;

    println!("{}", settings.get(key)?);
    Ok(())
}

/// Change a single setting
pub async fn run_set(config: Option<&Path>, key: &str, value: &str) -> Result<()> {
    let path = settings::config_file_path(config)?;
    let mut settings = settings::load(&path)?;

    settings.set(key, value)?;
    settings::save(&path, &settings)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the settings file path and optionally create it
pub async fn run_path(config: Option<&Path>, create: bool) -> Result<()> {
    let path = settings::config_file_path(config)?;

    if create && settings::init_if_missing(&path)? {
        println!("{} Created settings file at: {}", "✓".green(), path.display());
    } else {
        println!("{}", path.display());
        if !path.exists() {
            println!("{}", "File does not exist. Use --create to create it.".yellow());
        }
    }

    Ok(())
}

/// Print an annotated example settings file
pub async fn run_example() -> Result<()> {
    print!("{}", settings::example_config());
    Ok(())
}
