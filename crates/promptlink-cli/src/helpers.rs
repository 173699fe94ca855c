//! Shared CLI helpers — client config resolution, response printing, banner.

use anyhow::{bail, Result};
use colored::Colorize;

use promptlink_core::config::Config;
use promptlink_core::{ClientConfig, Platform};

use crate::ClientArgs;

/// Merge command-line overrides into the config for the selected platform.
///
/// Fails when the selected platform has no API key.
pub fn resolve_client_config(config: &Config, args: &ClientArgs) -> Result<ClientConfig> {
    let platform = args.platform.unwrap_or(config.platform);
    let mut client_config = config.client_config(platform);

    if let Some(ref model) = args.model {
        client_config.model = model.clone();
    }
    if let Some(ref proxy) = args.proxy {
        client_config.proxy = proxy.clone();
    }
    if let Some(ref base_url) = args.base_url {
        client_config.base_url = base_url.clone();
    }

    if client_config.api_key.is_empty() {
        bail!(
            "no API key configured for {}. Set providers.{}.apiKey in the config file \
             or PROMPTLINK_PROVIDERS__{}__API_KEY.",
            platform.display_name(),
            platform.as_str(),
            platform.as_str().to_ascii_uppercase()
        );
    }

    Ok(client_config)
}

/// Print a model response to stdout.
pub fn print_response(platform: Platform, response: &str) {
    println!();
    println!("{}", platform.display_name().cyan().bold());
    if response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{response}");
    }
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner(platform: Platform, model: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!(
        "{}  v{}  {}",
        "Promptlink".cyan().bold(),
        version.dimmed(),
        format!("{} · {}", platform.display_name(), model).dimmed()
    );
    println!(
        "{}",
        "Each line is sent as a separate prompt. Type \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print a "thinking" placeholder while a request is in flight.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
