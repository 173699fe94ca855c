//! Authenticated transport for the Gemini-style API.
//!
//! When a custom HTTP client is used, the API key has to travel on every
//! request explicitly. `AuthenticatedTransport` clones each outgoing request,
//! stamps the `key` query parameter and the headers the endpoint insists on,
//! and sends it through a freshly built `reqwest::Client`, optionally via a
//! proxy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use tracing::{debug, trace};

use crate::error::{extract_error_message, GenerateError};
use crate::traits::Transport;

/// Timeout applied to every request that goes through a custom client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "key";

/// User agent the Gemini endpoint expects from non-browser clients.
pub const GEMINI_USER_AGENT: &str = "google-api-go-client";

// ─────────────────────────────────────────────
// AuthenticatedTransport
// ─────────────────────────────────────────────

/// Injects the API key and required headers into each request.
#[derive(Clone)]
pub struct AuthenticatedTransport {
    api_key: String,
    /// Proxy URL; empty means connect directly.
    proxy: String,
    timeout: Duration,
}

impl std::fmt::Debug for AuthenticatedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedTransport")
            .field("proxy", &self.proxy)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl AuthenticatedTransport {
    pub fn new(api_key: impl Into<String>, proxy: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            proxy: proxy.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Clone `request` and stamp the key and required headers on the copy.
    ///
    /// Any existing `key` query parameter is replaced; other parameters are kept.
    pub fn prepare(&self, request: &reqwest::Request) -> Result<reqwest::Request, GenerateError> {
        let mut prepared = request.try_clone().ok_or(GenerateError::UnclonableRequest)?;

        let kept: Vec<(String, String)> = prepared
            .url()
            .query_pairs()
            .filter(|(k, _)| k != API_KEY_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        prepared
            .url_mut()
            .query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair(API_KEY_PARAM, &self.api_key);

        let headers = prepared.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(GEMINI_USER_AGENT));

        Ok(prepared)
    }

    /// Build the per-request HTTP client.
    fn build_client(&self) -> Result<reqwest::Client, GenerateError> {
        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if !self.proxy.is_empty() {
            builder = builder.proxy(parse_proxy(&self.proxy)?);
        }
        builder.build().map_err(GenerateError::ClientBuild)
    }
}

#[async_trait]
impl Transport for AuthenticatedTransport {
    async fn execute(&self, request: &reqwest::Request) -> Result<reqwest::Response, GenerateError> {
        let client = self.build_client()?;
        let prepared = self.prepare(request)?;

        trace!(
            method = %prepared.method(),
            host = prepared.url().host_str().unwrap_or(""),
            proxy = !self.proxy.is_empty(),
            "Executing authenticated request"
        );

        Ok(client.execute(prepared).await?)
    }
}

// ─────────────────────────────────────────────
// Shared helpers
// ─────────────────────────────────────────────

/// Parse a proxy URL into a `reqwest::Proxy` routing all traffic through it.
pub(crate) fn parse_proxy(raw: &str) -> Result<reqwest::Proxy, GenerateError> {
    let url = url::Url::parse(raw).map_err(|source| GenerateError::InvalidProxy {
        url: raw.to_string(),
        source,
    })?;
    reqwest::Proxy::all(url).map_err(GenerateError::ClientBuild)
}

/// Read a response body, turning non-success statuses into `GenerateError::Api`.
pub(crate) async fn read_success_body(
    response: reqwest::Response,
    provider: &str,
) -> Result<String, GenerateError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = extract_error_message(&body);
        debug!(provider, status = %status, "API error");
        return Err(GenerateError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
