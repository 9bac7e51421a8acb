// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Spacewars: a turn-based planetary conquest engine.
//!
//! One human and several AI players share a board of planets. Owned planets
//! produce soldiers on a game-clock timer, players take turns sending a
//! share of their garrisons at other planets, and the last owner standing
//! wins the level. Twenty levels escalate the board, the opponents and
//! their speed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / Autoplay / Presentation     │
//! ├─────────────────────────────────────┤
//! │   Session (clock, timers, scores)   │
//! ├─────────────────────────────────────┤
//! │   Game Logic (board, combat, AI)    │
//! └─────────────────────────────────────┘
//! ```
//!
//! The session is the only writer of game state. The presentation layer
//! reads [`Snapshot`]s and sends commands; it never mutates state directly.

pub mod autoplay;
pub mod config;
pub mod error;
pub mod game;
pub mod scores;
pub mod session;

pub use autoplay::{
    AutoplayConfig, LevelResult, LevelSummary, RunOutcome, RunResult, run_autoplay,
    run_autoplay_with_store,
};
pub use config::{GameConfig, LEVEL_COUNT, LEVELS, LevelConfig, level_config};
pub use error::{BoardError, CombatError, ConfigError, StoreError};

// Re-export key game types at crate root for convenience
pub use game::{
    AiDifficulty, AttackPercentage, GameState, Phase, Planet, PlanetId, PlanetSize, Player,
    PlayerId, SpecialType,
};
pub use scores::{JsonFileStore, MemoryScoreStore, ScoreRecord, ScoreStore};
pub use session::{GameSession, Snapshot};
