//! Serializable view of a session for the presentation layer.

use serde::Serialize;

use crate::game::{AttackAnimation, Phase, Planet, PlanetId, Player, PlayerId, Ship};

/// Everything a renderer needs for one frame. Borrowed from the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    /// Current level.
    pub level: u32,
    /// Interaction phase.
    pub phase: Phase,
    /// All planets.
    pub planets: &'a [Planet],
    /// All players in turn order.
    pub players: &'a [Player],
    /// Player whose turn it is.
    pub current_player: Option<PlayerId>,
    /// Selected source planets.
    pub selected_planets: &'a [PlanetId],
    /// Chosen target planet.
    pub target_planet: Option<PlanetId>,
    /// Whether the level ended.
    pub is_game_over: bool,
    /// Whether the human won the level.
    pub level_completed: bool,
    /// Sole remaining owner.
    pub winner: Option<PlayerId>,
    /// Whether the final level was completed and advanced past.
    pub run_complete: bool,
    /// Human display name.
    pub username: &'a str,
    /// Game-clock time spent in this level.
    pub game_time_ms: u64,
    /// Whole seconds since the run started.
    pub total_time_secs: u64,
    /// Visual units.
    pub ships: &'a [Ship],
    /// Attacks still animating.
    pub attack_animations: &'a [AttackAnimation],
}

impl Snapshot<'_> {
    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
