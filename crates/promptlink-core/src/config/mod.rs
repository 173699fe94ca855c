//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use promptlink_core::config;
//!
//! let cfg = config::load_config(None).unwrap();
//! println!("Platform: {}", cfg.platform);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{get_config_path, load_config, save_config};
pub use schema::{Config, ProviderConfig, ProvidersConfig};
