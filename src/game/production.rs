//! Soldier production.
//!
//! Every owned planet whose last credit is at least one interval old gains
//! `floor(base × special multiplier + factory neighbors)` soldiers, capped at
//! its capacity. A factory neighbor is any other planet within the neighbor
//! radius, owned by the same player, whose special type is factory. The
//! bonus applies the same way whether or not the receiving planet is itself
//! a factory.
//!
//! Planets that have not crossed the interval keep their timestamp so the
//! next tick catches them up.

// Production rates are small non-negative floats floored into soldier counts
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::game::{Planet, SpecialType};

/// Summary of one production pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductionResult {
    /// Planets that crossed the interval and were credited.
    pub planets_credited: u32,
    /// Soldiers actually added after capacity clamping.
    pub soldiers_added: u32,
}

/// Count same-owner factory planets within `radius` of `planets[index]`.
///
/// Returns 0 for neutral planets and for an index past the end of the board.
#[must_use]
pub fn factory_neighbor_count(planets: &[Planet], index: usize, radius: f64) -> u32 {
    let Some(planet) = planets.get(index) else {
        return 0;
    };
    let Some(owner) = planet.owner else {
        return 0;
    };

    let count = planets
        .iter()
        .filter(|other| other.id != planet.id)
        .filter(|other| other.is_owned_by(owner) && other.special_type == SpecialType::Factory)
        .filter(|other| planet.distance_to(other) <= radius)
        .count();
    count as u32
}

/// Soldiers `planets[index]` would gain this tick, before capacity clamping.
///
/// An index past the end of the board produces nothing.
#[must_use]
pub fn production_amount(planets: &[Planet], index: usize, radius: f64) -> u32 {
    let Some(planet) = planets.get(index) else {
        return 0;
    };
    let base = f64::from(planet.production_rate) * planet.special_type.production_multiplier();
    let bonus = factory_neighbor_count(planets, index, radius)
        * SpecialType::Factory.neighbor_bonus();
    (base + f64::from(bonus)).floor() as u32
}

/// Credit production to every eligible planet.
///
/// Rates are computed against the board as it was before the pass so the
/// order of planets never matters.
pub fn apply_production(
    planets: &mut [Planet],
    now_ms: u64,
    interval_ms: u64,
    neighbor_radius: f64,
) -> ProductionResult {
    let board: &[Planet] = planets;
    let amounts: Vec<Option<u32>> = board
        .iter()
        .enumerate()
        .map(|(i, planet)| {
            let due = now_ms.saturating_sub(planet.last_production_ms) >= interval_ms;
            (planet.owner.is_some() && due).then(|| production_amount(board, i, neighbor_radius))
        })
        .collect();

    let mut result = ProductionResult::default();
    for (planet, amount) in planets.iter_mut().zip(amounts) {
        let Some(amount) = amount else {
            continue;
        };
        let before = planet.soldier_count;
        planet.set_soldiers(before.saturating_add(amount));
        planet.last_production_ms = now_ms;

        result.planets_credited += 1;
        result.soldiers_added += planet.soldier_count - before;
    }

    result
}
