//! Config loader — reads `~/.promptlink/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.promptlink/config.json`
//! 3. Environment variables `PROMPTLINK_<SECTION>__<FIELD>` (override JSON)
//!
//! A missing file is not an error. A file that exists but cannot be read or
//! parsed is, and so is an unknown platform name anywhere in the chain.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::schema::{Config, ProviderConfig};
use crate::types::Platform;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from `path` (or the default path) + env vars.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    let config = load_config_from_path(&config_path)?;
    apply_env_overrides(config)
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> Result<()> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&config_path, json)
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `PROMPTLINK_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `PROMPTLINK_PLATFORM` → `platform`
/// - `PROMPTLINK_PROXY` → `proxy`
/// - `PROMPTLINK_PROVIDERS__<NAME>__API_KEY` → `providers.<name>.api_key`
/// - `PROMPTLINK_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
/// - `PROMPTLINK_PROVIDERS__<NAME>__MODEL` → `providers.<name>.model`
fn apply_env_overrides(config: Config) -> Result<Config> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

fn apply_overrides_from<F>(mut config: Config, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("PROMPTLINK_PLATFORM") {
        config.platform = val
            .parse::<Platform>()
            .context("invalid PROMPTLINK_PLATFORM")?;
    }
    if let Some(val) = lookup("PROMPTLINK_PROXY") {
        config.proxy = val;
    }

    for platform in Platform::ALL {
        let name = platform.as_str().to_ascii_uppercase();
        apply_provider_env(config.providers.get_mut(platform), &name, &lookup);
    }

    Ok(config)
}

/// Apply env var overrides for a single provider.
fn apply_provider_env<F>(provider: &mut ProviderConfig, name: &str, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(format!("PROMPTLINK_PROVIDERS__{name}__API_KEY").as_str()) {
        provider.api_key = val;
    }
    if let Some(val) = lookup(format!("PROMPTLINK_PROVIDERS__{name}__API_BASE").as_str()) {
        provider.api_base = Some(val);
    }
    if let Some(val) = lookup(format!("PROMPTLINK_PROVIDERS__{name}__MODEL").as_str()) {
        provider.model = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
