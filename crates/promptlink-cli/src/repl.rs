//! Interactive prompt loop.
//!
//! Every submitted input is a standalone prompt: nothing from earlier turns
//! is sent along. A line ending in `\` continues onto the next line, and
//! Ctrl-C while a request is in flight abandons that request only.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use promptlink_core::utils::get_history_path;
use promptlink_providers::Client;

use crate::helpers;

const PROMPT: &str = "You: ";
const CONTINUATION_PROMPT: &str = "...  ";

/// What a submitted input asks the loop to do.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Blank,
    Exit,
    Help,
    Info,
    Prompt(&'a str),
}

impl<'a> Input<'a> {
    fn classify(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Input::Blank,
            "exit" | "quit" | "/exit" | "/quit" | ":q" => Input::Exit,
            "/help" | "?" => Input::Help,
            "/info" => Input::Info,
            _ => Input::Prompt(trimmed),
        }
    }
}

/// Run the prompt loop until EOF, Ctrl-C at the prompt, or an exit command.
pub async fn run(client: Client) -> Result<()> {
    helpers::print_banner(client.platform(), client.config().resolved_model());

    let mut editor = DefaultEditor::new()?;
    let history_path = get_history_path();
    if editor.load_history(&history_path).is_ok() {
        debug!("loaded REPL history from {}", history_path.display());
    }

    while let Some(text) = read_input(&mut editor)? {
        match Input::classify(&text) {
            Input::Blank => continue,
            Input::Exit => break,
            Input::Help => print_help(),
            Input::Info => print_info(&client),
            Input::Prompt(prompt) => {
                let _ = editor.add_history_entry(text.as_str());
                send(&client, prompt).await;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&history_path) {
        debug!("failed to save history: {e}");
    }
    println!("\nGoodbye!");

    Ok(())
}

/// Read one logical input, joining `\`-continued lines. `None` ends the loop.
fn read_input(editor: &mut DefaultEditor) -> Result<Option<String>> {
    let mut buf = String::new();
    let mut prompt = PROMPT;

    loop {
        match editor.readline(prompt) {
            Ok(line) => match line.strip_suffix('\\') {
                Some(head) => {
                    buf.push_str(head);
                    buf.push('\n');
                    prompt = CONTINUATION_PROMPT;
                }
                None => {
                    buf.push_str(&line);
                    return Ok(Some(buf));
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(None),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Send one prompt, racing it against Ctrl-C.
async fn send(client: &Client, prompt: &str) {
    debug!(chars = prompt.chars().count(), "sending REPL prompt");
    helpers::print_thinking();

    let outcome = tokio::select! {
        result = client.send_message(prompt) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };
    helpers::clear_thinking();

    match outcome {
        Some(Ok(response)) => helpers::print_response(client.platform(), &response),
        Some(Err(e)) => eprintln!("\n{} {e}\n", "Error:".red().bold()),
        None => eprintln!("\n{}\n", "(cancelled)".dimmed()),
    }
}

fn print_help() {
    println!();
    println!("  {:<10} {}", "/info", "show platform, model, and proxy".dimmed());
    println!("  {:<10} {}", "/help", "show this help".dimmed());
    println!("  {:<10} {}", "exit", "leave (also quit, /exit, :q, Ctrl-D)".dimmed());
    println!("  {}", "End a line with \\ to continue it on the next line.".dimmed());
    println!();
}

fn print_info(client: &Client) {
    let config = client.config();
    let proxy = if config.has_proxy() {
        config.proxy.as_str()
    } else {
        "(direct)"
    };
    println!();
    println!("  {:<10} {}", "platform".dimmed(), client.platform().display_name());
    println!("  {:<10} {}", "model".dimmed(), config.resolved_model());
    println!("  {:<10} {}", "proxy".dimmed(), proxy);
    if config.has_base_url() {
        println!("  {:<10} {}", "base url".dimmed(), config.base_url);
    }
    println!();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands() {
        for raw in ["exit", "EXIT", " quit ", "/quit", ":q"] {
            assert_eq!(Input::classify(raw), Input::Exit, "{raw}");
        }
    }

    #[test]
    fn test_meta_commands() {
        assert_eq!(Input::classify("/help"), Input::Help);
        assert_eq!(Input::classify("?"), Input::Help);
        assert_eq!(Input::classify("/INFO"), Input::Info);
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(Input::classify(""), Input::Blank);
        assert_eq!(Input::classify("  \n "), Input::Blank);
    }

    #[test]
    fn test_prompt_is_trimmed_and_keeps_case() {
        assert_eq!(Input::classify("  Hello World \n"), Input::Prompt("Hello World"));
        assert_eq!(
            Input::classify("first line\nsecond line"),
            Input::Prompt("first line\nsecond line")
        );
    }

    #[test]
    fn test_exit_word_inside_prompt_is_a_prompt() {
        assert_eq!(Input::classify("exit the loop"), Input::Prompt("exit the loop"));
    }
}
