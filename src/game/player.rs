//! Player roster.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player.
pub type PlayerId = u8;

/// Identifier of the human seat. Stable across levels.
pub const HUMAN_ID: PlayerId = 1;

/// Color token of the human player.
pub const HUMAN_COLOR: &str = "#4CAF50";

/// Palette used for AI players, cycled when there are more AIs than colors.
pub const AI_COLORS: [&str; 12] = [
    "#F44336", "#9C27B0", "#3F51B5", "#FF9800", "#795548", "#607D8B", "#E91E63", "#00BCD4",
    "#4CAF50", "#FFEB3B", "#009688", "#8BC34A",
];

/// How strong an AI opponent plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiDifficulty {
    /// Small, hesitant attacks.
    Easy,
    /// Balanced play.
    Medium,
    /// Commits fully against weaker targets.
    Hard,
}

/// A participant in a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Unique identifier for this player.
    pub id: PlayerId,
    /// Display name. Only the human's name ever changes.
    pub name: String,
    /// Identity color token, used by the presentation layer for palette lookup.
    pub color: String,
    /// Whether this seat is driven by the AI policy.
    pub is_ai: bool,
    /// Difficulty tier for AI seats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_difficulty: Option<AiDifficulty>,
}

impl Player {
    /// Create the human player.
    #[must_use]
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            id: HUMAN_ID,
            name: name.into(),
            color: HUMAN_COLOR.to_string(),
            is_ai: false,
            ai_difficulty: None,
        }
    }

    /// Create the `index`-th AI opponent (0-based).
    #[must_use]
    pub fn ai(index: usize, difficulty: AiDifficulty) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let id = HUMAN_ID + 1 + index as PlayerId;
        Self {
            id,
            name: format!("AI {}", index + 1),
            color: AI_COLORS[index % AI_COLORS.len()].to_string(),
            is_ai: true,
            ai_difficulty: Some(difficulty),
        }
    }

    /// Difficulty the AI policy should play with. Seats without a tier play medium.
    #[must_use]
    pub fn difficulty(&self) -> AiDifficulty {
        self.ai_difficulty.unwrap_or(AiDifficulty::Medium)
    }
}

/// Build the roster for a level: the human first, then `ai_count` opponents.
#[must_use]
pub fn create_players(username: &str, ai_count: usize, difficulty: AiDifficulty) -> Vec<Player> {
    let mut players = Vec::with_capacity(ai_count + 1);
    players.push(Player::human(username));
    players.extend((0..ai_count).map(|i| Player::ai(i, difficulty)));
    players
}
