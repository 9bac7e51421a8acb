//! Error types for the engine.
//!
//! Gameplay commands never fail loudly: a rejected command is a no-op.
//! These types exist for the library boundaries (attack validation, board
//! generation input, configuration files and the score file) so callers can
//! tell what went wrong.

use std::path::PathBuf;

use thiserror::Error;

use crate::game::{PlanetId, PlayerId};

/// Reasons an attack order is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CombatError {
    /// The order names no attacking planet.
    #[error("attack has no source planets")]
    NoSources,
    /// A referenced planet does not exist on the board.
    #[error("planet {0} does not exist")]
    UnknownPlanet(PlanetId),
    /// The same planet appears twice among the sources.
    #[error("planet {0} is listed twice as a source")]
    DuplicateSource(PlanetId),
    /// A source planet is neutral.
    #[error("source planet {0} has no owner")]
    NeutralSource(PlanetId),
    /// Source planets belong to different players.
    #[error("source planets belong to players {0} and {1}")]
    MixedOwners(PlayerId, PlayerId),
    /// The target is also one of the sources.
    #[error("planet {0} cannot attack itself")]
    TargetIsSource(PlanetId),
    /// The percentage of the pooled garrison rounds down to nothing.
    #[error("attack would send no soldiers")]
    NoForce,
    /// The attacking planets do not belong to the player whose turn it is.
    #[error("player {0} cannot attack out of turn")]
    OutOfTurn(PlayerId),
    /// The level already ended.
    #[error("the level is over")]
    LevelOver,
}

/// Errors from board generation inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The roster has no human seat at index 0.
    #[error("first player must be the human seat")]
    MissingHuman,
    /// There are more players than planets to give them.
    #[error("{players} players need more than {planets} planets")]
    TooFewPlanets {
        /// Players in the roster.
        players: usize,
        /// Planets requested.
        planets: usize,
    },
}

/// Errors loading a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The TOML did not parse into a config.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The values parsed but cannot drive a game.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors inside a score store. Never surfaced to the session.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The stored data is not a valid score list.
    #[error("malformed score data: {0}")]
    Json(#[from] serde_json::Error),
}
