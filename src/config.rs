//! Level table and engine tuning.
//!
//! The level table is fixed data: twenty levels of escalating planet count,
//! opponent count, difficulty tier and AI decision latency. Everything else
//! lives in [`GameConfig`], which defaults to the stock game and can be
//! overridden from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::AiDifficulty;

/// Number of configured levels. Advancing past this ends the run.
pub const LEVEL_COUNT: u32 = 20;

/// Per-level board and opponent configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    /// Level number (1-based).
    pub level: u32,
    /// Planets on the board, including the home planets.
    pub planet_count: usize,
    /// Number of AI opponents.
    pub ai_players: usize,
    /// Difficulty tier of every AI on this level.
    pub ai_difficulty: AiDifficulty,
    /// Delay between control passing to an AI and the AI acting.
    pub ai_thinking_ms: u64,
}

const fn level(
    level: u32,
    planet_count: usize,
    ai_players: usize,
    ai_difficulty: AiDifficulty,
    ai_thinking_ms: u64,
) -> LevelConfig {
    LevelConfig {
        level,
        planet_count,
        ai_players,
        ai_difficulty,
        ai_thinking_ms,
    }
}

/// The twenty levels, easiest first.
pub static LEVELS: [LevelConfig; LEVEL_COUNT as usize] = [
    level(1, 6, 1, AiDifficulty::Easy, 2500),
    level(2, 7, 1, AiDifficulty::Medium, 2200),
    level(3, 8, 1, AiDifficulty::Medium, 2000),
    level(4, 9, 2, AiDifficulty::Medium, 1800),
    level(5, 10, 2, AiDifficulty::Hard, 1600),
    level(6, 11, 2, AiDifficulty::Hard, 1500),
    level(7, 12, 2, AiDifficulty::Hard, 1400),
    level(8, 13, 3, AiDifficulty::Hard, 1300),
    level(9, 14, 3, AiDifficulty::Hard, 1200),
    level(10, 15, 3, AiDifficulty::Hard, 1100),
    level(11, 16, 3, AiDifficulty::Hard, 1000),
    level(12, 17, 4, AiDifficulty::Hard, 900),
    level(13, 18, 4, AiDifficulty::Hard, 800),
    level(14, 19, 4, AiDifficulty::Hard, 700),
    level(15, 20, 4, AiDifficulty::Hard, 600),
    level(16, 22, 5, AiDifficulty::Hard, 500),
    level(17, 24, 5, AiDifficulty::Hard, 400),
    level(18, 26, 6, AiDifficulty::Hard, 300),
    level(19, 28, 6, AiDifficulty::Hard, 250),
    level(20, 30, 7, AiDifficulty::Hard, 200),
];

/// Look up a level. Unknown levels fall back to level 1.
#[must_use]
pub fn level_config(level: u32) -> &'static LevelConfig {
    LEVELS
        .iter()
        .find(|cfg| cfg.level == level)
        .unwrap_or(&LEVELS[0])
}

/// Engine tuning shared by every level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width.
    pub board_width: f64,
    /// Board height.
    pub board_height: f64,
    /// Planets are placed at least this far from the board edge.
    pub margin: f64,
    /// Minimum distance between planet centers.
    pub min_separation: f64,
    /// Placement samples per planet before accepting an overlapping position.
    pub placement_attempts: u32,
    /// Planets within this distance count as neighbors for factory bonuses.
    pub neighbor_radius: f64,
    /// Production interval.
    pub production_interval_ms: u64,
    /// Delay before a resolved attack's visual units are reconciled.
    pub attack_settle_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 800.0,
            board_height: 600.0,
            margin: 80.0,
            min_separation: 70.0,
            placement_attempts: 200,
            neighbor_radius: 120.0,
            production_interval_ms: 1000,
            attack_settle_ms: 2500,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the values are unusable.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Check that the board has an interior and the timers can fire.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interior_width() <= 0.0 || self.interior_height() <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "board {}x{} has no interior with margin {}",
                self.board_width, self.board_height, self.margin
            )));
        }
        if self.production_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "production_interval_ms must be positive".to_string(),
            ));
        }
        if self.min_separation < 0.0 || self.neighbor_radius < 0.0 {
            return Err(ConfigError::Invalid(
                "distances must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Width of the placement area.
    #[must_use]
    pub fn interior_width(&self) -> f64 {
        self.board_width - 2.0 * self.margin
    }

    /// Height of the placement area.
    #[must_use]
    pub fn interior_height(&self) -> f64 {
        self.board_height - 2.0 * self.margin
    }
}
