//! Promptlink CLI — entry point.
//!
//! # Commands
//!
//! - `promptlink send [-m MESSAGE]` — send one prompt (reads stdin without `-m`)
//! - `promptlink chat` — interactive REPL, one independent prompt per line
//! - `promptlink init` — write a default config file
//! - `promptlink status` — show configuration and provider status

mod helpers;
mod init;
mod repl;
mod status;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use promptlink_core::config::load_config;
use promptlink_core::Platform;
use promptlink_providers::Client;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Promptlink — send a prompt to a GPT-style or Gemini-style model
#[derive(Parser)]
#[command(name = "promptlink", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.promptlink/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Per-invocation overrides on top of the config file.
#[derive(Args, Clone, Debug, Default)]
pub struct ClientArgs {
    /// Platform to use: "openai" or "gemini"
    #[arg(short, long)]
    pub platform: Option<Platform>,

    /// Model name (defaults to the platform's default model)
    #[arg(long)]
    pub model: Option<String>,

    /// HTTP proxy URL, e.g. http://127.0.0.1:7890
    #[arg(long)]
    pub proxy: Option<String>,

    /// Custom API base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single prompt and print the reply
    Send {
        /// Prompt text. Read from stdin when omitted.
        #[arg(short, long)]
        message: Option<String>,

        #[command(flatten)]
        client: ClientArgs,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Interactive prompt loop (each line is sent on its own)
    Chat {
        #[command(flatten)]
        client: ClientArgs,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Write a default configuration file
    Init,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Send {
            message,
            client,
            logs,
        } => {
            init_logging(logs);
            let client = build_client(config_path, &client)?;
            run_send(&client, message).await
        }
        Commands::Chat { client, logs } => {
            init_logging(logs);
            let client = build_client(config_path, &client)?;
            repl::run(client).await
        }
        Commands::Init => init::run(config_path),
        Commands::Status => status::run(config_path),
    }
}

// ─────────────────────────────────────────────
// Send command
// ─────────────────────────────────────────────

async fn run_send(client: &Client, message: Option<String>) -> Result<()> {
    let prompt = match message {
        Some(msg) => msg,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read prompt from stdin")?;
            buf
        }
    };

    if prompt.trim().is_empty() {
        bail!("no prompt given (use -m or pipe text on stdin)");
    }

    info!(platform = %client.platform(), "sending single prompt");
    let response = client
        .send_message(&prompt)
        .await
        .context("prompt failed")?;
    helpers::print_response(client.platform(), &response);

    Ok(())
}

/// Build a `Client` from the loaded configuration plus command-line overrides.
pub fn build_client(config_path: Option<&std::path::Path>, args: &ClientArgs) -> Result<Client> {
    let config = load_config(config_path).context("failed to load configuration")?;
    let client_config = helpers::resolve_client_config(&config, args)?;
    Ok(Client::from_config(client_config))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("promptlink=debug,promptlink_providers=debug,promptlink_core=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
