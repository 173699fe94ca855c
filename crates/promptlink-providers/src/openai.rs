//! GPT-style chat completions client.
//!
//! Talks to `/chat/completions` on the OpenAI API or on any compatible
//! endpoint given as a base URL override. Authenticates with a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use promptlink_core::{ClientConfig, Platform};

use crate::error::GenerateError;
use crate::traits::TextGenerator;
use crate::transport::{parse_proxy, read_success_body, DEFAULT_TIMEOUT};

/// API base used when no base URL override is configured.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f64 = 0.8;

/// Which flavour of endpoint the generator targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiType {
    /// The official OpenAI API.
    OpenAi,
    /// A compatible endpoint reached through a base URL override.
    Custom,
}

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ─────────────────────────────────────────────
// OpenAiGenerator
// ─────────────────────────────────────────────

/// Sends one prompt to a chat completions endpoint.
pub struct OpenAiGenerator {
    /// HTTP client (proxied with a fixed timeout when a proxy is configured).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    api_type: ApiType,
    model: String,
    /// Request timeout, if one was set explicitly.
    timeout: Option<Duration>,
}

impl std::fmt::Debug for OpenAiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiGenerator")
            .field("api_base", &self.api_base)
            .field("api_type", &self.api_type)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiGenerator {
    /// Build a generator from the client configuration.
    ///
    /// Fails only when the proxy URL is malformed or the HTTP client cannot
    /// be built. No request is sent.
    pub fn new(config: &ClientConfig) -> Result<Self, GenerateError> {
        let (api_base, api_type) = if config.has_base_url() {
            (config.base_url.clone(), ApiType::Custom)
        } else {
            (DEFAULT_API_BASE.to_string(), ApiType::OpenAi)
        };

        let mut builder = reqwest::Client::builder();
        let timeout = if config.has_proxy() {
            builder = builder
                .proxy(parse_proxy(&config.proxy)?)
                .timeout(DEFAULT_TIMEOUT);
            Some(DEFAULT_TIMEOUT)
        } else {
            None
        };
        let client = builder.build().map_err(GenerateError::ClientBuild)?;

        Ok(Self {
            client,
            api_base,
            api_key: config.api_key.clone(),
            api_type,
            model: config.resolved_model().to_string(),
            timeout,
        })
    }

    /// Build the full chat completions URL.
    pub fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    pub fn api_type(&self) -> ApiType {
        self.api_type
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        debug!(
            provider = "openai",
            model = %self.model,
            api_type = ?self.api_type,
            "Calling LLM"
        );

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let body = read_success_body(response, "openai").await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(GenerateError::NoChoices)?;
        let content = choice.message.content.unwrap_or_default();

        debug!(
            provider = "openai",
            chars = content.chars().count(),
            "LLM response received"
        );
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn display_name(&self) -> &str {
        Platform::OpenAi.display_name()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
