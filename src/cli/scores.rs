//! Scores command implementation.

use super::output::format_scores_text;
use super::{CliError, OutputFormat};
use spacewars::scores::{JsonFileStore, ScoreStore, rank};
use std::path::PathBuf;

/// List the ranked score table.
///
/// # Errors
///
/// Returns an error if the score file exists but cannot be read.
pub(crate) fn list(file: PathBuf, format: OutputFormat) -> Result<(), CliError> {
    let store = JsonFileStore::new(file);
    let mut records = store.load()?;
    rank(&mut records);

    match format {
        OutputFormat::Text => print!("{}", format_scores_text(&records)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
    }
    Ok(())
}

/// Remove every stored score. Store errors are logged, not returned.
pub(crate) fn clear(file: PathBuf) {
    let mut store = JsonFileStore::new(file);
    store.clear_scores();
    println!("Cleared scores in {}", store.path().display());
}
