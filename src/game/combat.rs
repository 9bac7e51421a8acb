//! Combat resolution.
//!
//! An attack pools a percentage of every source planet's garrison against
//! one target. The pooled force is `floor(total × pct / 100)`, while each
//! source is debited `floor(own × pct / 100)` independently, so the debits
//! can sum to less than the force sent.
//!
//! The defender counts its full garrison, or ×1.5 (floored) on a fortress.
//! Reinforcing a planet you already own meets no defense. When the attack
//! fails the target keeps its owner and its garrison drops to zero.

// Defense bonuses are small multipliers floored back into soldier counts
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CombatError;
use crate::game::{Planet, PlanetId, PlayerId};

/// Share of the selected garrisons sent in one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AttackPercentage {
    /// 25%.
    Quarter,
    /// 50%.
    Half,
    /// 100%.
    Full,
}

impl AttackPercentage {
    /// The percentage as a number.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            AttackPercentage::Quarter => 25,
            AttackPercentage::Half => 50,
            AttackPercentage::Full => 100,
        }
    }

    /// Portion of `soldiers` this percentage sends, rounded down.
    #[must_use]
    pub fn portion(self, soldiers: u32) -> u32 {
        (u64::from(soldiers) * u64::from(self.value()) / 100) as u32
    }
}

impl From<AttackPercentage> for u8 {
    fn from(pct: AttackPercentage) -> Self {
        pct.value() as u8
    }
}

impl TryFrom<u8> for AttackPercentage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            25 => Ok(AttackPercentage::Quarter),
            50 => Ok(AttackPercentage::Half),
            100 => Ok(AttackPercentage::Full),
            other => Err(format!("attack percentage must be 25, 50 or 100, got {other}")),
        }
    }
}

impl fmt::Display for AttackPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.value())
    }
}

/// Result of a resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Owner of the source planets.
    pub attacker: PlayerId,
    /// Owner of the target before the attack.
    pub defender: Option<PlayerId>,
    /// First source planet, used as the animation origin.
    pub lead_source: PlanetId,
    /// Target planet.
    pub target: PlanetId,
    /// Pooled force sent.
    pub attacking_force: u32,
    /// Total removed from the source planets.
    pub debited: u32,
    /// Effective defense after bonuses.
    pub defending_force: u32,
    /// Attackers left after the fight.
    pub survivors: u32,
    /// Whether ownership changed hands (or stayed with a reinforcing attacker).
    pub captured: bool,
}

/// Effective defense of `target` against `attacker`.
#[must_use]
pub fn defending_force(target: &Planet, attacker: PlayerId) -> u32 {
    if target.is_owned_by(attacker) {
        return 0;
    }
    let garrison = f64::from(target.soldier_count);
    (garrison * (1.0 + target.special_type.defense_bonus())).floor() as u32
}

/// Pooled force `pct` of the given garrisons would send.
#[must_use]
pub fn attacking_force(garrisons: impl IntoIterator<Item = u32>, pct: AttackPercentage) -> u32 {
    let total = garrisons.into_iter().fold(0u32, u32::saturating_add);
    pct.portion(total)
}

/// Validate an order and return the attacking player.
fn validate(
    planets: &[Planet],
    sources: &[PlanetId],
    target: PlanetId,
) -> Result<PlayerId, CombatError> {
    let Some(&lead) = sources.first() else {
        return Err(CombatError::NoSources);
    };
    if find(planets, target).is_none() {
        return Err(CombatError::UnknownPlanet(target));
    }

    let attacker = find(planets, lead)
        .ok_or(CombatError::UnknownPlanet(lead))?
        .owner
        .ok_or(CombatError::NeutralSource(lead))?;

    for (i, &id) in sources.iter().enumerate() {
        if id == target {
            return Err(CombatError::TargetIsSource(id));
        }
        if sources[..i].contains(&id) {
            return Err(CombatError::DuplicateSource(id));
        }
        let planet = find(planets, id).ok_or(CombatError::UnknownPlanet(id))?;
        match planet.owner {
            None => return Err(CombatError::NeutralSource(id)),
            Some(owner) if owner != attacker => {
                return Err(CombatError::MixedOwners(attacker, owner));
            }
            Some(_) => {}
        }
    }

    Ok(attacker)
}

fn find(planets: &[Planet], id: PlanetId) -> Option<&Planet> {
    planets.iter().find(|p| p.id == id)
}

/// Resolve an attack from `sources` against `target`, mutating the board.
///
/// # Errors
///
/// Rejects the order without touching the board if it names no or unknown
/// planets, mixes owners, includes neutral sources or the target itself, or
/// would send no soldiers.
pub fn resolve_attack(
    planets: &mut [Planet],
    sources: &[PlanetId],
    target: PlanetId,
    pct: AttackPercentage,
) -> Result<AttackOutcome, CombatError> {
    let attacker = validate(planets, sources, target)?;

    let force = attacking_force(
        planets
            .iter()
            .filter(|p| sources.contains(&p.id))
            .map(|p| p.soldier_count),
        pct,
    );
    if force == 0 {
        return Err(CombatError::NoForce);
    }

    let mut debited = 0u32;
    for planet in planets.iter_mut().filter(|p| sources.contains(&p.id)) {
        let sent = pct.portion(planet.soldier_count);
        planet.soldier_count -= sent;
        debited += sent;
    }

    let defender_planet = planets
        .iter_mut()
        .find(|p| p.id == target)
        .ok_or(CombatError::UnknownPlanet(target))?;
    let defender = defender_planet.owner;
    let defense = defending_force(defender_planet, attacker);
    let survivors = force.saturating_sub(defense);

    if survivors > 0 {
        defender_planet.owner = Some(attacker);
    }
    defender_planet.set_soldiers(survivors);

    Ok(AttackOutcome {
        attacker,
        defender,
        lead_source: sources[0],
        target,
        attacking_force: force,
        debited,
        defending_force: defense,
        survivors,
        captured: survivors > 0,
    })
}

/// Kani formal verification proofs.
///
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Per-planet debits never exceed the pooled force.
    #[kani::proof]
    fn prove_debits_bounded_by_force() {
        let a: u32 = kani::any();
        let b: u32 = kani::any();
        kani::assume(a < 1_000_000 && b < 1_000_000);
        for pct in [AttackPercentage::Quarter, AttackPercentage::Half, AttackPercentage::Full] {
            let force = attacking_force([a, b], pct);
            assert!(pct.portion(a) + pct.portion(b) <= force);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PlanetSize, SpecialType};

    fn planet(id: PlanetId, owner: Option<PlayerId>, soldiers: u32) -> Planet {
        Planet::new(id, (0.0, 0.0), PlanetSize::Huge, owner, SpecialType::Normal, 0)
            .with_soldiers(soldiers)
    }

    #[test]
    fn test_capture_neutral() {
        let mut planets = vec![planet(0, Some(1), 10), planet(1, None, 4)];
        let outcome = resolve_attack(&mut planets, &[0], 1, AttackPercentage::Full).unwrap();

        assert_eq!(outcome.attacking_force, 10);
        assert_eq!(outcome.defending_force, 4);
        assert_eq!(outcome.survivors, 6);
        assert!(outcome.captured);
        assert_eq!(outcome.defender, None);
        assert_eq!(planets[0].soldier_count, 0);
        assert_eq!(planets[1].owner, Some(1));
        assert_eq!(planets[1].soldier_count, 6);
    }

    #[test]
    fn test_fortress_repels() {
        let mut fortress =
            Planet::new(1, (0.0, 0.0), PlanetSize::Medium, Some(2), SpecialType::Fortress, 0);
        fortress.set_soldiers(10);
        let mut planets = vec![planet(0, Some(1), 12), fortress];

        let outcome = resolve_attack(&mut planets, &[0], 1, AttackPercentage::Full).unwrap();
        assert_eq!(outcome.attacking_force, 12);
        assert_eq!(outcome.defending_force, 15);
        assert_eq!(outcome.survivors, 0);
        assert!(!outcome.captured);
        assert_eq!(planets[1].owner, Some(2));
        assert_eq!(planets[1].soldier_count, 0);
    }

    #[test]
    fn test_neutral_fortress_gets_bonus() {
        let mut fortress =
            Planet::new(1, (0.0, 0.0), PlanetSize::Medium, None, SpecialType::Fortress, 0);
        fortress.set_soldiers(10);
        assert_eq!(defending_force(&fortress, 1), 15);
    }

    #[test]
    fn test_repelled_attack_zeroes_garrison() {
        let mut planets = vec![planet(0, Some(1), 10), planet(1, Some(2), 50)];
        let outcome = resolve_attack(&mut planets, &[0], 1, AttackPercentage::Half).unwrap();
        assert_eq!(outcome.attacking_force, 5);
        assert_eq!(planets[0].soldier_count, 5);
        assert_eq!(planets[1].owner, Some(2));
        assert_eq!(planets[1].soldier_count, 0);
    }

    #[test]
    fn test_reinforcement_has_no_defense() {
        let mut planets = vec![planet(0, Some(1), 20), planet(1, Some(1), 90)];
        let outcome = resolve_attack(&mut planets, &[0], 1, AttackPercentage::Half).unwrap();
        assert_eq!(outcome.defending_force, 0);
        assert_eq!(outcome.survivors, 10);
        assert_eq!(planets[1].owner, Some(1));
        assert_eq!(planets[1].soldier_count, 10);
    }

    #[test]
    fn test_independent_flooring_of_debits() {
        // 3 + 3 = 6 pooled, 25% = 1; each planet's own 25% floors to 0
        let mut planets = vec![planet(0, Some(1), 3), planet(1, Some(1), 3), planet(2, None, 0)];
        let outcome = resolve_attack(&mut planets, &[0, 1], 2, AttackPercentage::Quarter).unwrap();
        assert_eq!(outcome.attacking_force, 1);
        assert_eq!(outcome.debited, 0);
        assert_eq!(planets[0].soldier_count, 3);
        assert_eq!(planets[1].soldier_count, 3);
        assert_eq!(planets[2].owner, Some(1));
        assert_eq!(planets[2].soldier_count, 1);
    }

    #[test]
    fn test_multi_source_pooling() {
        let mut planets = vec![
            planet(0, Some(1), 30),
            planet(1, Some(1), 21),
            planet(2, Some(2), 20),
        ];
        let outcome = resolve_attack(&mut planets, &[0, 1], 2, AttackPercentage::Half).unwrap();
        assert_eq!(outcome.attacking_force, 25);
        assert_eq!(outcome.debited, 25);
        assert_eq!(planets[0].soldier_count, 15);
        assert_eq!(planets[1].soldier_count, 11);
        assert_eq!(planets[2].owner, Some(1));
        assert_eq!(planets[2].soldier_count, 5);
    }

    #[test]
    fn test_survivors_clamped_to_capacity() {
        let tiny = Planet::new(1, (0.0, 0.0), PlanetSize::Tiny, None, SpecialType::Normal, 0);
        let mut planets = vec![planet(0, Some(1), 200), tiny];
        let outcome = resolve_attack(&mut planets, &[0], 1, AttackPercentage::Full).unwrap();
        assert_eq!(outcome.survivors, 200);
        assert_eq!(planets[1].soldier_count, 30);
    }

    #[test]
    fn test_zero_force_is_rejected_untouched() {
        let mut planets = vec![planet(0, Some(1), 3), planet(1, None, 0)];
        let before = planets.clone();
        let err = resolve_attack(&mut planets, &[0], 1, AttackPercentage::Quarter).unwrap_err();
        assert_eq!(err, CombatError::NoForce);
        assert_eq!(planets, before);
    }

    #[test]
    fn test_invalid_orders() {
        let mut planets = vec![planet(0, Some(1), 10), planet(1, Some(2), 10), planet(2, None, 10)];
        let full = AttackPercentage::Full;
        assert_eq!(resolve_attack(&mut planets, &[], 2, full), Err(CombatError::NoSources));
        assert_eq!(resolve_attack(&mut planets, &[0], 9, full), Err(CombatError::UnknownPlanet(9)));
        assert_eq!(resolve_attack(&mut planets, &[2], 0, full), Err(CombatError::NeutralSource(2)));
        assert_eq!(
            resolve_attack(&mut planets, &[0, 1], 2, full),
            Err(CombatError::MixedOwners(1, 2))
        );
        assert_eq!(resolve_attack(&mut planets, &[0], 0, full), Err(CombatError::TargetIsSource(0)));
        assert_eq!(
            resolve_attack(&mut planets, &[0, 0], 2, full),
            Err(CombatError::DuplicateSource(0))
        );
    }

    #[test]
    fn test_percentage_conversions() {
        assert_eq!(AttackPercentage::try_from(50), Ok(AttackPercentage::Half));
        assert!(AttackPercentage::try_from(30).is_err());
        assert_eq!(u8::from(AttackPercentage::Full), 100);
        assert_eq!(AttackPercentage::Quarter.to_string(), "25%");
    }
}
