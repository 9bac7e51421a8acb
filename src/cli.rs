//! CLI command implementations for Spacewars.

pub(crate) mod batch;
pub(crate) mod scores;
pub(crate) mod simulate;
pub(crate) mod snapshot;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::Path;

use spacewars::{BoardError, ConfigError, GameConfig, StoreError};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<BoardError> for CliError {
    fn from(e: BoardError) -> Self {
        Self::new(format!("Failed to generate board: {e}"))
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(format!("Score file error: {e}"))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Load the engine configuration, or the stock one without a file.
pub(crate) fn load_config(path: Option<&Path>) -> Result<GameConfig, CliError> {
    match path {
        Some(path) => Ok(GameConfig::load(path)?),
        None => Ok(GameConfig::default()),
    }
}

/// Use the given seed or draw one.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
