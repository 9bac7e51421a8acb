//! Visual unit bookkeeping for the presentation layer.
//!
//! Ships are a hint, not gameplay state: each owned planet shows
//! `min(soldiers / 5, 20)` orbiting ships. Reconciliation keeps the identity
//! of ships that survive, appends new ones when the target grows and drops the
//! newest when it shrinks. Ships launched by an attack stay in flight until the
//! attack settles, then join the target planet's orbit.

// Ship counts and angles are small values
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;

use crate::game::{Planet, PlanetId};

/// Soldiers represented by one ship.
pub const SOLDIERS_PER_SHIP: u32 = 5;

/// Most ships a planet shows.
pub const MAX_SHIPS_PER_PLANET: u32 = 20;

/// Most ships one attack launches.
pub const MAX_SHIPS_PER_ATTACK: u32 = 10;

/// Unique identifier of a ship within a level.
pub type ShipId = u64;

/// What a ship is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ShipStatus {
    /// Circling its planet.
    Orbiting,
    /// Flying to an attacked planet.
    Attacking {
        /// Planet the ship is flying to.
        target: PlanetId,
    },
}

/// A single visual unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    /// Ship identifier.
    pub id: ShipId,
    /// Planet the ship belongs to.
    pub planet: PlanetId,
    /// Orbit angle in degrees.
    pub angle: f64,
    /// Current activity.
    #[serde(flatten)]
    pub status: ShipStatus,
}

impl Ship {
    /// Check whether the ship is orbiting `planet`.
    #[must_use]
    pub fn orbits(&self, planet: PlanetId) -> bool {
        self.planet == planet && self.status == ShipStatus::Orbiting
    }
}

/// Number of ships a garrison shows.
#[must_use]
pub const fn target_ship_count(soldiers: u32) -> u32 {
    let ships = soldiers / SOLDIERS_PER_SHIP;
    if ships > MAX_SHIPS_PER_PLANET {
        MAX_SHIPS_PER_PLANET
    } else {
        ships
    }
}

/// Number of ships an attack of `force` soldiers launches.
#[must_use]
pub const fn attack_ship_count(force: u32) -> u32 {
    let ships = force / SOLDIERS_PER_SHIP;
    if ships > MAX_SHIPS_PER_ATTACK {
        MAX_SHIPS_PER_ATTACK
    } else {
        ships
    }
}

/// All ships on the board.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    ships: Vec<Ship>,
    next_id: ShipId,
}

impl Fleet {
    /// Create an empty fleet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All ships, orbiting first in planet order, then ships in flight.
    #[must_use]
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Ships currently orbiting `planet`, oldest first.
    pub fn orbiting(&self, planet: PlanetId) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(move |s| s.orbits(planet))
    }

    /// Ships currently in flight.
    pub fn in_flight(&self) -> impl Iterator<Item = &Ship> {
        self.ships
            .iter()
            .filter(|s| matches!(s.status, ShipStatus::Attacking { .. }))
    }

    /// Bring every owned planet's orbit to its target count.
    ///
    /// Ships of neutral planets are dropped; ships in flight are kept.
    pub fn reconcile(&mut self, planets: &[Planet]) {
        let mut next = Vec::with_capacity(self.ships.len());

        for planet in planets.iter().filter(|p| p.owner.is_some()) {
            let target = target_ship_count(planet.soldier_count) as usize;
            let current: Vec<Ship> = self.orbiting(planet.id).copied().collect();
            let kept = current.len().min(target);
            next.extend_from_slice(&current[..kept]);

            for index in kept..target {
                next.push(Ship {
                    id: self.next_id,
                    planet: planet.id,
                    angle: (index * 360) as f64 / target as f64,
                    status: ShipStatus::Orbiting,
                });
                self.next_id += 1;
            }
        }

        next.extend(self.in_flight().copied());
        self.ships = next;
    }

    /// Send up to `count` of `from`'s orbiting ships toward `to`.
    ///
    /// Returns the ids of the ships launched.
    pub fn launch(&mut self, from: PlanetId, to: PlanetId, count: u32) -> Vec<ShipId> {
        let mut launched = Vec::new();
        for ship in self.ships.iter_mut().filter(|s| s.orbits(from)) {
            if launched.len() >= count as usize {
                break;
            }
            ship.status = ShipStatus::Attacking { target: to };
            launched.push(ship.id);
        }
        launched
    }

    /// Put the given ships into orbit around `planet`, spread evenly.
    pub fn land(&mut self, ids: &[ShipId], planet: PlanetId) {
        let count = ids.len().max(1) as f64;
        let landing = self.ships.iter_mut().filter(|s| ids.contains(&s.id));
        for (index, ship) in landing.enumerate() {
            ship.planet = planet;
            ship.angle = index as f64 * 360.0 / count;
            ship.status = ShipStatus::Orbiting;
        }
    }

    /// Remove every ship.
    pub fn clear(&mut self) {
        self.ships.clear();
    }
}

/// A resolved attack, kept for the presentation layer while it animates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackAnimation {
    /// Animation identifier.
    pub id: u64,
    /// First attacking planet.
    pub from_planet: PlanetId,
    /// Attacked planet.
    pub to_planet: PlanetId,
    /// Soldiers sent.
    pub soldiers: u32,
    /// Game-clock start time.
    pub start_ms: u64,
    /// Animation length.
    pub duration_ms: u64,
    /// Ships carrying the attack.
    pub ship_ids: Vec<ShipId>,
}

impl AttackAnimation {
    /// Check whether the animation finished at least `linger_ms` ago.
    #[must_use]
    pub fn is_expired(&self, now_ms: u64, linger_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms + linger_ms
    }
}
