use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a local default; a malformed value fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the saved resume file.
    pub data_dir: PathBuf,
    /// Quiet period after the last edit before a background export starts.
    pub export_debounce: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            export_debounce: Duration::from_millis(
                std::env::var("EXPORT_DEBOUNCE_MS")
                    .unwrap_or_else(|_| "500".to_string())
                    .parse::<u64>()
                    .context("EXPORT_DEBOUNCE_MS must be a whole number of milliseconds")?,
            ),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            data_dir: PathBuf::from("./data"),
            export_debounce: Duration::from_millis(500),
        }
    }
}
