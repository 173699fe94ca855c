//! Core types for Promptlink — the provider selector and the immutable client
//! configuration every send path reads from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────
// Platform
// ─────────────────────────────────────────────

/// The LLM backend a client talks to.
///
/// Closed set: adding a backend means adding a variant, and every `match`
/// over `Platform` then fails to compile until the new branch exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Platform {
    /// GPT-style chat completions API.
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    /// Gemini-style generateContent API.
    Gemini,
}

impl Platform {
    /// All supported platforms, in display order.
    pub const ALL: [Platform; 2] = [Platform::OpenAi, Platform::Gemini];

    /// Lowercase identifier used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::OpenAi => "openai",
            Platform::Gemini => "gemini",
        }
    }

    /// Human-readable name for logs and status output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::OpenAi => "OpenAI",
            Platform::Gemini => "Gemini",
        }
    }

    /// Model used when the configured model is empty.
    pub fn default_model(&self) -> &'static str {
        match self {
            Platform::OpenAi => "gpt-3.5-turbo",
            Platform::Gemini => "gemini-1.5-flash",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a provider selector string names no known platform.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown client type: {0:?}")]
pub struct ParsePlatformError(pub String);

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "gpt" => Ok(Platform::OpenAi),
            "gemini" | "google" => Ok(Platform::Gemini),
            _ => Err(ParsePlatformError(s.to_string())),
        }
    }
}

/// Config files accept the same spellings as the command line.
impl TryFrom<String> for Platform {
    type Error = ParsePlatformError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ─────────────────────────────────────────────
// ClientConfig
// ─────────────────────────────────────────────

/// Everything a client needs to issue one prompt.
///
/// Set once at construction and never mutated. Empty strings mean
/// "use the provider default" for `base_url`, `proxy`, and `model`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub platform: Platform,
    pub api_key: String,
    pub base_url: String,
    pub proxy: String,
    pub model: String,
}

impl ClientConfig {
    pub fn new(
        platform: Platform,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        proxy: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            api_key: api_key.into(),
            base_url: base_url.into(),
            proxy: proxy.into(),
            model: model.into(),
        }
    }

    /// The configured model, or the platform default when none is set.
    pub fn resolved_model(&self) -> &str {
        if self.model.is_empty() {
            self.platform.default_model()
        } else {
            &self.model
        }
    }

    pub fn has_base_url(&self) -> bool {
        !self.base_url.is_empty()
    }

    pub fn has_proxy(&self) -> bool {
        !self.proxy.is_empty()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("platform", &self.platform)
            .field("api_key", &crate::utils::mask_secret(&self.api_key))
            .field("base_url", &self.base_url)
            .field("proxy", &self.proxy)
            .field("model", &self.model)
            .finish()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
