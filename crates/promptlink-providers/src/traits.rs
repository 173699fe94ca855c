//! Seams between the client, the provider send paths, and the network.
//!
//! - [`TextGenerator`] — one prompt in, generated text out. Implemented by
//!   `OpenAiGenerator` and `GeminiGenerator`.
//! - [`Transport`] — executes one prepared HTTP request. Implemented by
//!   `AuthenticatedTransport`; tests substitute recording fakes.

use async_trait::async_trait;

use crate::error::GenerateError;

/// A provider send path.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` as a single user message and return the generated text.
    ///
    /// Issues exactly one request. Failures are returned as-is, never retried.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

    /// The model this generator will request.
    fn model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}

/// Executes an HTTP request on behalf of a generator.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the raw response.
    ///
    /// The caller's request is never mutated; implementations work on a clone.
    async fn execute(&self, request: &reqwest::Request) -> Result<reqwest::Response, GenerateError>;
}
