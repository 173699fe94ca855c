//! Errors returned by the prompt clients.

use promptlink_core::ParsePlatformError;
use thiserror::Error;

/// Everything that can go wrong while sending one prompt.
///
/// Nothing is retried. Each variant reaches the caller as soon as it occurs.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The provider selector string named no known platform.
    #[error(transparent)]
    UnknownPlatform(#[from] ParsePlatformError),

    /// The configured proxy URL could not be parsed.
    #[error("invalid proxy URL {url:?}: {source}")]
    InvalidProxy {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The configured base URL could not be turned into a request URL.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be built (e.g. unsupported proxy scheme).
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Network or transport failure during the call.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Gemini returned a response with zero candidates.
    #[error("no candidates found")]
    NoCandidates,

    /// The chat completions API returned a response with zero choices.
    #[error("no choices found")]
    NoChoices,

    /// The outgoing request has a streaming body and cannot be cloned.
    #[error("request cannot be cloned")]
    UnclonableRequest,
}

/// Pull `error.message` out of a provider error body, falling back to the raw body.
pub(crate) fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}
