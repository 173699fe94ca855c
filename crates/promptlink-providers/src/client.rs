//! The public entry point: one config, one `send_message` per prompt.

use tracing::{debug, warn};

use promptlink_core::{ClientConfig, Platform};

use crate::error::GenerateError;
use crate::gemini::GeminiGenerator;
use crate::openai::OpenAiGenerator;
use crate::traits::TextGenerator;

/// Sends prompts to the platform chosen at construction.
///
/// The configuration never changes after construction and every call builds
/// its own generator and transport, so a `Client` can be shared freely
/// between tasks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Create a client. Empty `base_url`, `proxy`, or `model` selects the
    /// provider default.
    pub fn new(
        platform: Platform,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        proxy: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self::from_config(ClientConfig::new(platform, api_key, base_url, proxy, model))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Create a client from a provider name such as `"openai"` or `"gemini"`.
    ///
    /// Unknown names fail here with `GenerateError::UnknownPlatform`, before
    /// any network activity is possible.
    pub fn with_selector(
        selector: &str,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        proxy: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GenerateError> {
        let platform = selector.parse::<Platform>()?;
        Ok(Self::new(platform, api_key, base_url, proxy, model))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.config.platform
    }

    /// Send `prompt` and return the generated text.
    ///
    /// Exactly one request is made to the configured platform. Errors from
    /// construction, transport, or response parsing are returned unchanged.
    pub async fn send_message(&self, prompt: &str) -> Result<String, GenerateError> {
        debug!(
            platform = %self.config.platform,
            model = self.config.resolved_model(),
            proxy = self.config.has_proxy(),
            custom_base = self.config.has_base_url(),
            "Sending prompt"
        );

        let result = match self.config.platform {
            Platform::OpenAi => self.send_openai_message(prompt).await,
            Platform::Gemini => self.send_gemini_message(prompt).await,
        };

        if let Err(ref e) = result {
            warn!(platform = %self.config.platform, error = %e, "Prompt failed");
        }
        result
    }

    async fn send_openai_message(&self, prompt: &str) -> Result<String, GenerateError> {
        let generator = OpenAiGenerator::new(&self.config)?;
        generator.generate(prompt).await
    }

    async fn send_gemini_message(&self, prompt: &str) -> Result<String, GenerateError> {
        // Dropped at the end of this scope whether `generate` succeeds or not.
        let generator = GeminiGenerator::new(&self.config)?;
        generator.generate(prompt).await
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{any, body_partial_json, method, path, path_regex, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GEMINI_DEFAULT_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

    fn openai_reply(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }]
        }))
    }

    fn gemini_reply(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        }))
    }

    /// Mount both providers' endpoints with the given call-count expectations.
    async fn mount_both(server: &MockServer, openai_calls: u64, gemini_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(openai_reply("from openai"))
            .expect(openai_calls)
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
            .respond_with(gemini_reply("from gemini"))
            .expect(gemini_calls)
            .mount(server)
            .await;
    }

    #[test]
    fn test_new_and_from_config_agree() {
        let a = Client::new(Platform::Gemini, "k", "https://b", "", "m");
        let b = Client::from_config(ClientConfig::new(Platform::Gemini, "k", "https://b", "", "m"));
        assert_eq!(a, b);
        assert_eq!(a.platform(), Platform::Gemini);
        assert_eq!(a.config().model, "m");
    }

    #[test]
    fn test_with_selector_known_names() {
        let c = Client::with_selector("openai", "k", "", "", "").unwrap();
        assert_eq!(c.platform(), Platform::OpenAi);
        let c = Client::with_selector("Gemini", "k", "", "", "").unwrap();
        assert_eq!(c.platform(), Platform::Gemini);
    }

    #[tokio::test]
    async fn test_unknown_selector_fails_without_network() {
        let mock_server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = Client::with_selector("anthropic", "k", mock_server.uri(), "", "").unwrap_err();
        assert!(matches!(err, GenerateError::UnknownPlatform(_)));
        assert!(err.to_string().contains("unknown client type"));
    }

    #[tokio::test]
    async fn test_openai_platform_only_hits_openai() {
        let mock_server = MockServer::start().await;
        mount_both(&mock_server, 1, 0).await;

        let client = Client::new(Platform::OpenAi, "sk", mock_server.uri(), "", "");
        assert_eq!(client.send_message("hi").await.unwrap(), "from openai");
    }

    #[tokio::test]
    async fn test_gemini_platform_only_hits_gemini() {
        let mock_server = MockServer::start().await;
        mount_both(&mock_server, 0, 1).await;

        let client = Client::new(Platform::Gemini, "g", mock_server.uri(), "", "");
        assert_eq!(client.send_message("hi").await.unwrap(), "from gemini");
    }

    #[tokio::test]
    async fn test_malformed_proxy_fails_on_both_paths_without_network() {
        let mock_server = MockServer::start().await;
        mount_both(&mock_server, 0, 0).await;

        for platform in Platform::ALL {
            let client = Client::new(platform, "k", mock_server.uri(), "http://[::1", "");
            let err = client.send_message("hi").await.unwrap_err();
            assert!(
                matches!(err, GenerateError::InvalidProxy { .. }),
                "{platform}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_empty_model_resolves_to_openai_default() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({ "model": "gpt-3.5-turbo" })))
            .respond_with(openai_reply("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = Client::new(Platform::OpenAi, "k", mock_server.uri(), "", "");
        assert_eq!(client.send_message("x").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_empty_model_resolves_to_gemini_default() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GEMINI_DEFAULT_PATH))
            .and(query_param("key", "g-key"))
            .respond_with(gemini_reply("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = Client::new(Platform::Gemini, "g-key", mock_server.uri(), "", "");
        assert_eq!(client.send_message("x").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_explicit_model_is_sent_verbatim() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash-exp:generateContent"))
            .respond_with(gemini_reply("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = Client::new(
            Platform::Gemini,
            "k",
            mock_server.uri(),
            "",
            "gemini-2.0-flash-exp",
        );
        assert_eq!(client.send_message("x").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_gemini_model_with_collection_prefix() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
            .respond_with(gemini_reply("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1beta/tunedModels/my-tune:generateContent"))
            .respond_with(gemini_reply("tuned"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = Client::new(
            Platform::Gemini,
            "k",
            mock_server.uri(),
            "",
            "models/gemini-1.5-pro",
        );
        assert_eq!(client.send_message("x").await.unwrap(), "ok");

        let client = Client::new(Platform::Gemini, "k", mock_server.uri(), "", "tunedModels/my-tune");
        assert_eq!(client.send_message("x").await.unwrap(), "tuned");
    }

    #[tokio::test]
    async fn test_both_paths_route_through_proxy() {
        for platform in Platform::ALL {
            let proxy = MockServer::start().await;
            let reply = match platform {
                Platform::OpenAi => openai_reply("via proxy"),
                Platform::Gemini => gemini_reply("via proxy"),
            };
            Mock::given(method("POST"))
                .respond_with(reply)
                .expect(1)
                .mount(&proxy)
                .await;

            let client = Client::new(platform, "k", "http://unreachable.invalid", proxy.uri(), "");
            assert_eq!(
                client.send_message("x").await.unwrap(),
                "via proxy",
                "{platform}"
            );
        }
    }

    #[tokio::test]
    async fn test_gemini_zero_candidates_surfaces_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&mock_server)
            .await;

        let client = Client::new(Platform::Gemini, "k", mock_server.uri(), "", "");
        let err = client.send_message("x").await.unwrap_err();
        assert_eq!(err.to_string(), "no candidates found");
    }

    #[tokio::test]
    async fn test_concurrent_calls_on_one_client_do_not_interfere() {
        let mock_server = MockServer::start().await;
        for (prompt, reply) in [("ping", "pong"), ("marco", "polo"), ("knock", "who")] {
            Mock::given(method("POST"))
                .and(path("/chat/completions"))
                .and(body_partial_json(json!({
                    "messages": [{ "role": "user", "content": prompt }]
                })))
                .respond_with(openai_reply(reply))
                .expect(2)
                .mount(&mock_server)
                .await;
        }

        let client = Arc::new(Client::new(Platform::OpenAi, "k", mock_server.uri(), "", ""));
        let before = client.config().clone();

        let (a, b, c) = tokio::join!(
            client.send_message("ping"),
            client.send_message("marco"),
            client.send_message("knock"),
        );
        assert_eq!(a.unwrap(), "pong");
        assert_eq!(b.unwrap(), "polo");
        assert_eq!(c.unwrap(), "who");

        let handles: Vec<_> = [("ping", "pong"), ("marco", "polo"), ("knock", "who")]
            .into_iter()
            .map(|(prompt, reply)| {
                let client = Arc::clone(&client);
                tokio::spawn(async move { (client.send_message(prompt).await.unwrap(), reply) })
            })
            .collect();
        for handle in handles {
            let (got, want) = handle.await.unwrap();
            assert_eq!(got, want);
        }

        assert_eq!(client.config(), &before);
    }
}
