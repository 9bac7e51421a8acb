//! Game invariants - sanity checks that detect bugs.
//!
//! None of these can trigger through the public commands. They run after
//! every step in autoplay, the property suites and the fuzz targets, so a
//! violation means the engine itself broke a rule.

use std::collections::HashSet;

use crate::game::{GameState, HUMAN_ID, Phase};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut report = |message: String| violations.push(InvariantViolation { message });

    let player_ids: HashSet<_> = state.players.iter().map(|p| p.id).collect();
    let mut planet_ids = HashSet::new();

    for planet in &state.planets {
        if planet.soldier_count > planet.max_soldiers {
            report(format!(
                "Planet {} has {} soldiers > capacity {}",
                planet.id, planet.soldier_count, planet.max_soldiers
            ));
        }
        if let Some(owner) = planet.owner.filter(|o| !player_ids.contains(o)) {
            report(format!("Planet {} owned by unknown player {owner}", planet.id));
        }
        if !planet_ids.insert(planet.id) {
            report(format!("Planet id {} appears twice", planet.id));
        }
    }

    if state.current >= state.players.len() {
        report(format!(
            "Current player index {} out of range for {} players",
            state.current,
            state.players.len()
        ));
    }

    let phase = state.interaction.phase();
    if phase.is_terminal() != state.is_game_over {
        report(format!(
            "Phase {phase:?} disagrees with game over flag {}",
            state.is_game_over
        ));
    }
    if state.level_completed != (state.is_game_over && state.winner == Some(HUMAN_ID)) {
        report(format!(
            "Level completed flag {} with winner {:?}",
            state.level_completed, state.winner
        ));
    }
    if state.level_completed != (phase == Phase::LevelComplete) {
        report(format!(
            "Level completed flag {} in phase {phase:?}",
            state.level_completed
        ));
    }
    if let Some(winner) = state.winner {
        let others = state
            .remaining_players()
            .filter(|p| p.id != winner)
            .count();
        if others > 0 {
            report(format!("Winner {winner} declared while {others} rivals own planets"));
        }
    }

    let selected = state.interaction.selected();
    if matches!(phase, Phase::MultiSelection | Phase::Attack) == selected.is_empty() {
        report(format!(
            "Phase {phase:?} with {} selected planets",
            selected.len()
        ));
    }
    if (phase == Phase::Attack) != state.interaction.target().is_some() {
        report(format!(
            "Phase {phase:?} with target {:?}",
            state.interaction.target()
        ));
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
