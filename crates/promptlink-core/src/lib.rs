//! Core types, configuration, and utilities shared by the Promptlink crates.
//!
//! - [`types`] — `Platform` selector and immutable `ClientConfig`
//! - [`config`] — on-disk config schema, loader, and env var overrides
//! - [`utils`] — data directory resolution and small string helpers

pub mod config;
pub mod types;
pub mod utils;

pub use types::{ClientConfig, ParsePlatformError, Platform};
