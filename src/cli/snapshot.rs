//! Snapshot command implementation.

use super::{CliError, load_config, resolve_seed};
use spacewars::config::LEVEL_COUNT;
use spacewars::scores::MemoryScoreStore;
use spacewars::session::GameSession;
use std::path::Path;

/// Execute the snapshot command: print a freshly generated level as JSON.
///
/// # Errors
///
/// Returns an error if the level is out of range or cannot be generated.
pub(crate) fn execute(
    config: Option<&Path>,
    level: u32,
    seed: Option<u64>,
    username: &str,
) -> Result<(), CliError> {
    if !(1..=LEVEL_COUNT).contains(&level) {
        return Err(CliError::new(format!(
            "Level must be between 1 and {LEVEL_COUNT}, got {level}"
        )));
    }
    let game_config = load_config(config)?;
    let session = GameSession::starting_at(
        level,
        game_config,
        username,
        Box::new(MemoryScoreStore::new()),
        Some(resolve_seed(seed)),
    )?;
    println!("{}", session.snapshot().to_json()?);
    Ok(())
}
