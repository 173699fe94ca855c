//! `promptlink status` — show configuration and provider status.
//!
//! - Shows config path and selected platform
//! - Shows API key status, model, and base URL for each provider

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use promptlink_core::config::{get_config_path, load_config};
use promptlink_core::utils::mask_secret;
use promptlink_core::Platform;

/// Run the status command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);
    let config = load_config(Some(&path)).context("failed to load configuration")?;

    println!();
    println!("{}", "Promptlink Status".cyan().bold());
    println!();

    // Config
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        path.display(),
        if path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    println!(
        "  {:<18} {}",
        "Platform:".bold(),
        config.platform.display_name()
    );

    let proxy = if config.proxy.is_empty() {
        "(direct)".dimmed().to_string()
    } else {
        config.proxy.clone()
    };
    println!("  {:<18} {}", "Proxy:".bold(), proxy);

    // Providers
    println!();
    println!("  {}", "Providers:".bold());

    for platform in Platform::ALL {
        let provider = config.providers.get(platform);
        let client = config.client_config(platform);

        let key_status = if provider.is_configured() {
            format!("{} {}", "✓".green(), mask_secret(&provider.api_key).dimmed())
        } else {
            format!("{}", "· not configured".dimmed())
        };
        let marker = if platform == config.platform { "*" } else { " " };

        println!("   {marker}{:<12} {}", platform.display_name(), key_status);
        println!(
            "     {:<12} {}",
            "model".dimmed(),
            client.resolved_model()
        );
        if client.has_base_url() {
            println!("     {:<12} {}", "base url".dimmed(), client.base_url);
        }
    }

    println!();

    Ok(())
}
