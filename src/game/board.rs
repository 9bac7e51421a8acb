//! Board generation.
//!
//! Planet 0 goes to the human, planets `1..players.len()` to the AI seats in
//! roster order, and the rest start neutral. Sizes are drawn from level bands
//! that skew larger as the level rises; only neutral planets may carry a
//! special type.

// Board generation mixes float positions with integer weights
#![allow(clippy::cast_possible_truncation)]

use rand::Rng;

use crate::config::{GameConfig, level_config};
use crate::error::BoardError;
use crate::game::{Planet, PlanetId, PlanetSize, Player, SpecialType};

/// Chance that a neutral planet on level 6+ is special.
pub(crate) const SPECIAL_CHANCE: f64 = 0.3;

/// Neutral size weights for levels 1-5: mostly small planets.
const EARLY_WEIGHTS: [(PlanetSize, u32); 5] = [
    (PlanetSize::Tiny, 5),
    (PlanetSize::Small, 4),
    (PlanetSize::Medium, 2),
    (PlanetSize::Large, 1),
    (PlanetSize::Huge, 1),
];

/// Neutral size weights for levels 6-10.
const MID_WEIGHTS: [(PlanetSize, u32); 5] = [
    (PlanetSize::Tiny, 3),
    (PlanetSize::Small, 3),
    (PlanetSize::Medium, 3),
    (PlanetSize::Large, 2),
    (PlanetSize::Huge, 1),
];

/// Neutral size weights for levels 11+: bigger planets dominate.
const LATE_WEIGHTS: [(PlanetSize, u32); 5] = [
    (PlanetSize::Tiny, 2),
    (PlanetSize::Small, 2),
    (PlanetSize::Medium, 3),
    (PlanetSize::Large, 3),
    (PlanetSize::Huge, 2),
];

/// Generate the board for `level` using the level table's planet count.
///
/// # Errors
///
/// Returns an error if the roster does not start with the human seat or
/// has more players than the level has planets.
pub fn generate_board<R: Rng + ?Sized>(
    level: u32,
    players: &[Player],
    config: &GameConfig,
    rng: &mut R,
    now_ms: u64,
) -> Result<Vec<Planet>, BoardError> {
    let count = level_config(level).planet_count;
    generate_planets(count, level, players, config, rng, now_ms)
}

/// Generate `count` planets for `level`.
///
/// # Errors
///
/// See [`generate_board`].
pub fn generate_planets<R: Rng + ?Sized>(
    count: usize,
    level: u32,
    players: &[Player],
    config: &GameConfig,
    rng: &mut R,
    now_ms: u64,
) -> Result<Vec<Planet>, BoardError> {
    if players.first().is_none_or(|p| p.is_ai) {
        return Err(BoardError::MissingHuman);
    }
    if count < players.len() {
        return Err(BoardError::TooFewPlanets {
            players: players.len(),
            planets: count,
        });
    }

    let mut planets: Vec<Planet> = Vec::with_capacity(count);
    for index in 0..count {
        let (size, owner) = if index == 0 {
            (human_home_size(level), Some(players[0].id))
        } else if index < players.len() {
            (ai_home_size(level, rng), Some(players[index].id))
        } else {
            (neutral_size(level, rng), None)
        };

        let special = if owner.is_some() {
            SpecialType::Normal
        } else {
            roll_special_type(level, rng)
        };

        let position = find_position(&planets, config, rng);
        planets.push(Planet::new(
            index as PlanetId,
            position,
            size,
            owner,
            special,
            now_ms,
        ));
    }

    Ok(planets)
}

/// Human home size: medium early, large while the AI ramps up, then shrinking.
#[must_use]
pub(crate) const fn human_home_size(level: u32) -> PlanetSize {
    match level {
        0..=3 => PlanetSize::Medium,
        4..=8 => PlanetSize::Large,
        9..=15 => PlanetSize::Medium,
        _ => PlanetSize::Small,
    }
}

/// Draw an AI home size from the level's band.
pub(crate) fn ai_home_size<R: Rng + ?Sized>(level: u32, rng: &mut R) -> PlanetSize {
    let band: &[PlanetSize] = match level {
        0..=2 => &[PlanetSize::Tiny],
        3..=5 => &[PlanetSize::Tiny, PlanetSize::Small],
        6..=10 => &[PlanetSize::Small, PlanetSize::Medium],
        11..=15 => &[PlanetSize::Medium, PlanetSize::Large],
        _ => &[PlanetSize::Large, PlanetSize::Huge],
    };
    band[rng.random_range(0..band.len())]
}

/// Draw a neutral planet size from the level's weighted distribution.
pub(crate) fn neutral_size<R: Rng + ?Sized>(level: u32, rng: &mut R) -> PlanetSize {
    let weights = match level {
        0..=5 => &EARLY_WEIGHTS,
        6..=10 => &MID_WEIGHTS,
        _ => &LATE_WEIGHTS,
    };
    let total: u32 = weights.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random_range(0..total);
    for &(size, weight) in weights {
        if roll < weight {
            return size;
        }
        roll -= weight;
    }
    PlanetSize::Tiny
}

/// Roll a neutral planet's special type.
///
/// Levels 1-5 are always normal. Later, 30% of neutrals are special, drawn
/// uniformly from the types unlocked at this level.
pub(crate) fn roll_special_type<R: Rng + ?Sized>(level: u32, rng: &mut R) -> SpecialType {
    if level <= 5 || !rng.random_bool(SPECIAL_CHANCE) {
        return SpecialType::Normal;
    }
    let unlocked = SpecialType::SPECIALS
        .iter()
        .take_while(|s| s.unlock_level() <= level)
        .count();
    SpecialType::SPECIALS[rng.random_range(0..unlocked)]
}

/// Sample a position at least `min_separation` from every placed planet.
///
/// After `placement_attempts` misses the last sample is accepted even if it
/// overlaps, so generation always terminates.
pub(crate) fn find_position<R: Rng + ?Sized>(
    placed: &[Planet],
    config: &GameConfig,
    rng: &mut R,
) -> (f64, f64) {
    let mut sample = || {
        (
            config.margin + rng.random::<f64>() * config.interior_width(),
            config.margin + rng.random::<f64>() * config.interior_height(),
        )
    };

    let mut candidate = sample();
    for _ in 0..config.placement_attempts {
        if is_position_clear(candidate, placed, config.min_separation) {
            return candidate;
        }
        candidate = sample();
    }
    tracing::debug!(
        planets = placed.len(),
        "no clear position after {} attempts, accepting overlap",
        config.placement_attempts
    );
    candidate
}

/// Check whether `(x, y)` keeps `min_separation` from every planet.
#[must_use]
pub fn is_position_clear(position: (f64, f64), placed: &[Planet], min_separation: f64) -> bool {
    placed
        .iter()
        .all(|p| p.distance_to_point(position.0, position.1) >= min_separation)
}
