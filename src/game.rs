//! Game layer for Spacewars.
//!
//! Implements the rules of a single level:
//! - Planets with size classes and special types
//! - Players (one human seat, several AI seats)
//! - Board generation, soldier production and combat resolution
//! - The AI decision policy
//! - Turn order, selection phases and win detection

mod ai;
mod board;
mod combat;
mod fleet;
mod invariants;
mod phase;
mod planet;
mod player;
mod production;
mod state;

pub use ai::{AiMove, decide, min_soldiers_to_attack, strongest_planet};
pub use board::{generate_board, generate_planets, is_position_clear};
pub use combat::{AttackOutcome, AttackPercentage, attacking_force, defending_force, resolve_attack};
pub use fleet::{
    AttackAnimation, Fleet, MAX_SHIPS_PER_ATTACK, MAX_SHIPS_PER_PLANET, SOLDIERS_PER_SHIP, Ship,
    ShipId, ShipStatus, attack_ship_count, target_ship_count,
};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use phase::{ClickEffect, Interaction, Phase};
pub use planet::{Planet, PlanetId, PlanetSize, SpecialType};
pub use player::{
    AI_COLORS, AiDifficulty, HUMAN_COLOR, HUMAN_ID, Player, PlayerId, create_players,
};
pub use production::{ProductionResult, apply_production, factory_neighbor_count, production_amount};
pub use state::GameState;
