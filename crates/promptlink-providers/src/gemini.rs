//! Gemini-style generateContent client.
//!
//! Every request goes through an [`AuthenticatedTransport`] (or an injected
//! [`Transport`]), which adds the API key as a query parameter. The request
//! built here carries no credentials of its own.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, trace};

use promptlink_core::{ClientConfig, Platform};

use crate::error::GenerateError;
use crate::traits::{TextGenerator, Transport};
use crate::transport::{read_success_body, AuthenticatedTransport};

/// Service endpoint used when no base URL override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// API version prefix appended to the endpoint.
const API_VERSION: &str = "v1beta";

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// A fragment of a candidate's output. Only `Text` contributes to the result.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Other(serde_json::Value),
}

/// Concatenate the text parts of the first candidate, in order.
fn first_candidate_text(response: GenerateContentResponse) -> Result<String, GenerateError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GenerateError::NoCandidates)?;

    let mut content = String::new();
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        match part {
            Part::Text { text } => content.push_str(&text),
            Part::Other(value) => trace!(
                kind = ?value.as_object().and_then(|o| o.keys().next()),
                "skipping non-text part"
            ),
        }
    }
    Ok(content)
}

// ─────────────────────────────────────────────
// GeminiGenerator
// ─────────────────────────────────────────────

/// Sends one prompt to a Gemini-style endpoint.
///
/// Built per call. It owns nothing but its transport handle, so dropping it
/// at the end of the call releases everything on every exit path.
pub struct GeminiGenerator {
    transport: Arc<dyn Transport>,
    endpoint: String,
    model: String,
}

impl std::fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiGenerator {
    /// Build a generator that authenticates through [`AuthenticatedTransport`].
    pub fn new(config: &ClientConfig) -> Result<Self, GenerateError> {
        let transport = AuthenticatedTransport::new(config.api_key.clone(), config.proxy.clone());
        Self::with_transport(config, Arc::new(transport))
    }

    /// Build a generator that sends through `transport`.
    pub fn with_transport(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, GenerateError> {
        let endpoint = if config.has_base_url() {
            config.base_url.trim_end_matches('/').to_string()
        } else {
            DEFAULT_ENDPOINT.to_string()
        };

        url::Url::parse(&endpoint).map_err(|source| GenerateError::InvalidBaseUrl {
            url: endpoint.clone(),
            source,
        })?;

        Ok(Self {
            transport,
            endpoint,
            model: config.resolved_model().to_string(),
        })
    }

    /// Resource path of the model: bare names live under `models/`, while
    /// names that already carry a collection (`tunedModels/x`) are used as-is.
    pub fn model_resource(&self) -> String {
        if self.model.contains('/') {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        }
    }

    /// Full URL of the generateContent call for this model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/{}/{}:generateContent",
            self.endpoint,
            API_VERSION,
            self.model_resource()
        )
    }

    fn build_request(&self, prompt: &str) -> Result<reqwest::Request, GenerateError> {
        let raw_url = self.generate_url();
        let url = reqwest::Url::parse(&raw_url).map_err(|source| GenerateError::InvalidBaseUrl {
            url: raw_url,
            source,
        })?;

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
        });

        let mut request = reqwest::Request::new(reqwest::Method::POST, url);
        *request.body_mut() = Some(serde_json::to_vec(&body)?.into());
        Ok(request)
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        debug!(
            provider = "gemini",
            model = %self.model,
            endpoint = %self.endpoint,
            "Calling LLM"
        );

        let request = self.build_request(prompt)?;
        let response = self.transport.execute(&request).await?;
        let body = read_success_body(response, "gemini").await?;

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let candidates = parsed.candidates.len();
        let text = first_candidate_text(parsed)?;

        debug!(
            provider = "gemini",
            candidates,
            chars = text.chars().count(),
            "LLM response received"
        );
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn display_name(&self) -> &str {
        Platform::Gemini.display_name()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
