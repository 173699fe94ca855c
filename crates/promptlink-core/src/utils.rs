//! Utility helpers — path resolution and secret masking.

use std::path::PathBuf;

/// Get the Promptlink data directory (e.g. `~/.promptlink/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".promptlink")
}

/// Get the REPL history file (e.g. `~/.promptlink/history/cli_history`).
pub fn get_history_path() -> PathBuf {
    get_data_path().join("history").join("cli_history")
}

/// Mask a secret for display, keeping only a short prefix.
///
/// Secrets of 8 characters or fewer are fully masked. Unicode-safe.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let count = secret.chars().count();
    if count <= 8 {
        return "*".repeat(count);
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}…{}", "*".repeat(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_path_ends_with_promptlink() {
        let path = get_data_path();
        assert!(path.ends_with(".promptlink"));
    }

    #[test]
    fn test_history_path_under_data_dir() {
        let path = get_history_path();
        assert!(path.ends_with("history/cli_history"));
        assert!(path.to_string_lossy().contains(".promptlink"));
    }

    #[test]
    fn test_mask_secret_long() {
        assert_eq!(mask_secret("sk-abcdefghijkl"), "sk-a…****");
    }

    #[test]
    fn test_mask_secret_short() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_mask_secret_unicode() {
        assert_eq!(mask_secret("鍵鍵鍵鍵鍵鍵鍵鍵鍵鍵"), "鍵鍵鍵鍵…****");
    }
}
