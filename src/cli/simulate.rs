//! Simulate command implementation.

use super::output::format_run_text;
use super::{CliError, OutputFormat, load_config, resolve_seed};
use spacewars::autoplay::{AutoplayConfig, run_autoplay_with_store};
use spacewars::scores::{JsonFileStore, MemoryScoreStore, ScoreStore};
use std::path::{Path, PathBuf};

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the run cannot start.
pub(crate) fn execute(
    config: Option<&Path>,
    seed: Option<u64>,
    levels: u32,
    format: OutputFormat,
    scores: Option<PathBuf>,
) -> Result<(), CliError> {
    let game_config = load_config(config)?;
    let seed = resolve_seed(seed);
    let autoplay = AutoplayConfig {
        max_levels: levels,
        ..AutoplayConfig::default()
    };

    let store: Box<dyn ScoreStore> = match scores {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryScoreStore::new()),
    };

    if format == OutputFormat::Text {
        println!("Running autopilot with seed {seed}...");
        println!();
    }

    let result = run_autoplay_with_store(seed, &autoplay, game_config, store)?;

    match format {
        OutputFormat::Text => print!("{}", format_run_text(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    if result.violations.is_empty() {
        Ok(())
    } else {
        Err(CliError::new(format!(
            "{} invariant violations in seed {seed}",
            result.violations.len()
        )))
    }
}
