//! `promptlink init` — write a default configuration file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;

use promptlink_core::config::{get_config_path, save_config, Config};
use promptlink_core::utils::get_history_path;

/// Run the init command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    println!();
    println!("{}", "Promptlink — Setup".cyan().bold());
    println!();

    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    // 1. Create config if it doesn't exist
    if path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            path.display()
        );
    } else {
        save_config(&Config::default(), Some(&path))?;
        println!("  {} created config at {}", "✓".green(), path.display());
    }

    // 2. Create history directory
    if let Some(history_dir) = get_history_path().parent() {
        std::fs::create_dir_all(history_dir)?;
    }

    println!();
    println!(
        "{}",
        "Next: add an API key under providers.openai.apiKey or providers.gemini.apiKey,"
            .dimmed()
    );
    println!(
        "{}",
        "then run `promptlink send -m \"hello\"`.".dimmed()
    );
    println!();

    Ok(())
}
