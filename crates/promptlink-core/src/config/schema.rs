//! Configuration schema for the `promptlink` binary.
//!
//! Hierarchy: `Config` → `ProvidersConfig` → one `ProviderConfig` per platform.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

use crate::types::{ClientConfig, Platform};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.promptlink/config.json` + env vars.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Platform used when the command line does not pick one.
    pub platform: Platform,
    /// Outbound HTTP proxy shared by both platforms (empty = direct).
    pub proxy: String,
    pub providers: ProvidersConfig,
}

impl Config {
    /// Build the immutable client configuration for `platform`.
    pub fn client_config(&self, platform: Platform) -> ClientConfig {
        let provider = self.providers.get(platform);
        ClientConfig {
            platform,
            api_key: provider.api_key.clone(),
            base_url: provider.api_base.clone().unwrap_or_default(),
            proxy: self.proxy.clone(),
            model: provider.model.clone().unwrap_or_default(),
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Credentials and overrides for a single platform.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for authentication.
    #[serde(default)]
    pub api_key: String,
    /// Custom API base URL (overrides provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model name (overrides provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// All provider configurations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: ProviderConfig,
    #[serde(default)]
    pub gemini: ProviderConfig,
}

impl ProvidersConfig {
    pub fn get(&self, platform: Platform) -> &ProviderConfig {
        match platform {
            Platform::OpenAi => &self.openai,
            Platform::Gemini => &self.gemini,
        }
    }

    pub fn get_mut(&mut self, platform: Platform) -> &mut ProviderConfig {
        match platform {
            Platform::OpenAi => &mut self.openai,
            Platform::Gemini => &mut self.gemini,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
