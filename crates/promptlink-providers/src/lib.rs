//! Prompt clients for Promptlink.
//!
//! Sends a single text prompt to a GPT-style or Gemini-style provider and
//! returns the generated text.
//!
//! # Architecture
//!
//! - [`client::Client`] — holds the immutable config and dispatches each call
//! - [`traits::TextGenerator`] — capability implemented by both send paths
//! - [`openai::OpenAiGenerator`] — chat completions, bearer auth
//! - [`gemini::GeminiGenerator`] — generateContent, key via the transport
//! - [`transport::AuthenticatedTransport`] — injects key and headers, optional proxy
//!
//! ```no_run
//! # async fn demo() -> Result<(), promptlink_providers::GenerateError> {
//! use promptlink_providers::{Client, Platform};
//!
//! let client = Client::new(Platform::Gemini, "api-key", "", "", "");
//! let text = client.send_message("Write a haiku about crabs").await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod traits;
pub mod transport;

// Re-export main types for convenience
pub use client::Client;
pub use error::GenerateError;
pub use gemini::GeminiGenerator;
pub use openai::{ApiType, OpenAiGenerator};
pub use promptlink_core::{ClientConfig, Platform};
pub use traits::{TextGenerator, Transport};
pub use transport::AuthenticatedTransport;
