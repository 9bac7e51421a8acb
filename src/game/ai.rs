//! AI decision policy.
//!
//! Deterministic and allocation-light: the AI sees the whole board, picks its
//! strongest planet as the only source, narrows the candidate targets by level
//! band, then chooses a target and a percentage from its difficulty tier.
//!
//! Ties always go to the planet encountered first in board order.

// Distances and ratios are compared as floats against soldier counts
#![allow(clippy::cast_precision_loss)]

use crate::game::{
    AiDifficulty, AttackPercentage, HUMAN_ID, Planet, PlanetId, PlayerId, SpecialType,
};

/// An attack the AI wants to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiMove {
    /// Planet to attack from.
    pub source: PlanetId,
    /// Planet to attack.
    pub target: PlanetId,
    /// Share of the source garrison to send.
    pub percentage: AttackPercentage,
}

/// Smallest garrison the AI's strongest planet needs before it attacks.
#[must_use]
pub const fn min_soldiers_to_attack(level: u32) -> u32 {
    match level {
        0..=3 => 3,
        4..=8 => 4,
        9..=15 => 3,
        _ => 2,
    }
}

/// Pick an attack for `player`, or `None` to pass.
#[must_use]
pub fn decide(
    planets: &[Planet],
    player: PlayerId,
    difficulty: AiDifficulty,
    level: u32,
) -> Option<AiMove> {
    let source = strongest_planet(planets, player)?;
    if source.soldier_count < min_soldiers_to_attack(level) {
        return None;
    }

    let candidates = candidate_targets(planets, player, level);
    let target = if difficulty == AiDifficulty::Hard || level > 3 {
        first_min_by(&candidates, |p| {
            source.distance_to(p) / 2.0 + f64::from(p.soldier_count) - human_bonus(p, 30.0)
        })
    } else {
        first_min_by(&candidates, |p| source.distance_to(p))
    }?;

    let mut percentage = choose_percentage(difficulty, level, source.soldier_count, target.soldier_count);
    if percentage.portion(source.soldier_count) <= target.soldier_count && level > 2 {
        percentage = AttackPercentage::Full;
    }

    tracing::debug!(
        player,
        source = source.id,
        target = target.id,
        %percentage,
        "ai decision"
    );
    Some(AiMove {
        source: source.id,
        target: target.id,
        percentage,
    })
}

/// The player's planet with the most soldiers.
#[must_use]
pub fn strongest_planet(planets: &[Planet], player: PlayerId) -> Option<&Planet> {
    planets
        .iter()
        .filter(|p| p.is_owned_by(player))
        .fold(None, |best: Option<&Planet>, p| match best {
            Some(b) if p.soldier_count <= b.soldier_count => Some(b),
            _ => Some(p),
        })
}

/// Planets the AI would consider attacking, in preference order.
#[must_use]
pub(crate) fn candidate_targets(planets: &[Planet], player: PlayerId, level: u32) -> Vec<&Planet> {
    let neutrals = planets.iter().filter(|p| p.is_neutral());
    let human = planets
        .iter()
        .filter(|p| p.is_owned_by(HUMAN_ID) && !p.is_owned_by(player));
    let rivals = planets
        .iter()
        .filter(|p| p.owner.is_some_and(|o| o != player && o != HUMAN_ID));

    match level {
        0..=3 => {
            let mut targets: Vec<&Planet> = neutrals.collect();
            if targets.len() <= 2 {
                targets.extend(human);
            }
            targets
        }
        4..=8 => neutrals.chain(human).chain(rivals).collect(),
        _ => {
            let mut targets: Vec<&Planet> = planets
                .iter()
                .filter(|p| p.is_neutral())
                .chain(planets.iter().filter(|p| p.owner.is_some_and(|o| o != player)))
                .collect();
            targets.sort_by_key(|p| priority_score(p));
            targets
        }
    }
}

/// Ranking used on late levels; lower is more attractive.
#[must_use]
pub(crate) fn priority_score(planet: &Planet) -> i64 {
    let owner_bonus = if planet.is_owned_by(HUMAN_ID) { -50 } else { 0 };
    let special_bonus = match planet.special_type {
        SpecialType::Energy => -20,
        SpecialType::Factory => -15,
        SpecialType::Fortress => 10,
        SpecialType::Normal | SpecialType::Rare => 0,
    };
    i64::from(planet.soldier_count) + owner_bonus + special_bonus
}

/// Percentage before escalation.
#[must_use]
pub(crate) fn choose_percentage(
    difficulty: AiDifficulty,
    level: u32,
    source_soldiers: u32,
    target_soldiers: u32,
) -> AttackPercentage {
    let ratio = match (difficulty, level) {
        (AiDifficulty::Easy, 0..=5) => return AttackPercentage::Quarter,
        (AiDifficulty::Easy, _) | (_, 0..=3) => return AttackPercentage::Half,
        (AiDifficulty::Hard, 16..) => 1.2,
        (_, 9..) => 1.5,
        _ => 2.0,
    };
    if f64::from(source_soldiers) > f64::from(target_soldiers) * ratio {
        AttackPercentage::Full
    } else {
        AttackPercentage::Half
    }
}

fn human_bonus(planet: &Planet, bonus: f64) -> f64 {
    if planet.is_owned_by(HUMAN_ID) { bonus } else { 0.0 }
}

/// First candidate with the strictly smallest key.
fn first_min_by<'a>(candidates: &[&'a Planet], key: impl Fn(&Planet) -> f64) -> Option<&'a Planet> {
    let mut best: Option<(&Planet, f64)> = None;
    for &planet in candidates {
        let score = key(planet);
        if best.is_none_or(|(_, s)| score < s) {
            best = Some((planet, score));
        }
    }
    best.map(|(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PlanetSize;

    fn planet(id: PlanetId, x: f64, owner: Option<PlayerId>, soldiers: u32) -> Planet {
        Planet::new(id, (x, 100.0), PlanetSize::Huge, owner, SpecialType::Normal, 0)
            .with_soldiers(soldiers)
    }

    #[test]
    fn test_no_planets_passes() {
        let planets = vec![planet(0, 100.0, Some(HUMAN_ID), 10)];
        assert_eq!(decide(&planets, 2, AiDifficulty::Hard, 5), None);
    }

    #[test]
    fn test_below_threshold_passes() {
        let planets = vec![planet(0, 100.0, Some(2), 2), planet(1, 200.0, None, 0)];
        assert_eq!(decide(&planets, 2, AiDifficulty::Medium, 1), None);
        assert!(decide(&planets, 2, AiDifficulty::Medium, 16).is_some());
    }

    #[test]
    fn test_strongest_source_first_on_ties() {
        let planets = vec![
            planet(0, 100.0, Some(2), 5),
            planet(1, 200.0, Some(2), 9),
            planet(2, 300.0, Some(2), 9),
        ];
        assert_eq!(strongest_planet(&planets, 2).map(|p| p.id), Some(1));
    }

    #[test]
    fn test_easy_early_picks_nearest_neutral() {
        let planets = vec![
            planet(0, 100.0, Some(HUMAN_ID), 1),
            planet(1, 400.0, Some(2), 20),
            planet(2, 700.0, None, 0),
            planet(3, 450.0, None, 30),
            planet(4, 150.0, None, 0),
        ];
        let mv = decide(&planets, 2, AiDifficulty::Easy, 1).unwrap();
        assert_eq!(mv.source, 1);
        assert_eq!(mv.target, 3);
        assert_eq!(mv.percentage, AttackPercentage::Quarter);
    }

    #[test]
    fn test_low_levels_add_human_when_few_neutrals() {
        let planets = vec![
            planet(0, 100.0, Some(HUMAN_ID), 1),
            planet(1, 400.0, Some(2), 20),
            planet(2, 700.0, None, 0),
        ];
        let ids: Vec<PlanetId> = candidate_targets(&planets, 2, 2).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 0]);
    }

    #[test]
    fn test_mid_levels_include_rivals() {
        let planets = vec![
            planet(0, 100.0, Some(3), 1),
            planet(1, 400.0, Some(2), 20),
            planet(2, 700.0, Some(HUMAN_ID), 0),
            planet(3, 500.0, None, 0),
        ];
        let ids: Vec<PlanetId> = candidate_targets(&planets, 2, 5).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 0]);
    }

    #[test]
    fn test_late_levels_rank_by_priority() {
        let mut energy = Planet::new(3, (500.0, 100.0), PlanetSize::Medium, None, SpecialType::Energy, 0);
        energy.set_soldiers(25);
        let mut fortress = Planet::new(4, (550.0, 100.0), PlanetSize::Medium, None, SpecialType::Fortress, 0);
        fortress.set_soldiers(0);
        let planets = vec![
            planet(0, 100.0, Some(HUMAN_ID), 45),
            planet(1, 400.0, Some(2), 50),
            planet(2, 700.0, Some(3), 8),
            energy,
            fortress,
        ];
        let ids: Vec<PlanetId> = candidate_targets(&planets, 2, 12).iter().map(|p| p.id).collect();
        // human -5, energy 5, rival 8, fortress 10
        assert_eq!(ids, vec![0, 3, 2, 4]);
    }

    #[test]
    fn test_strategic_target_prefers_human() {
        let planets = vec![
            planet(0, 460.0, Some(HUMAN_ID), 30),
            planet(1, 400.0, Some(2), 100),
            planet(2, 420.0, None, 10),
        ];
        // human: 30 + 30 - 30 = 30; neutral: 10 + 10 = 20
        let mv = decide(&planets, 2, AiDifficulty::Hard, 5).unwrap();
        assert_eq!(mv.target, 2);

        let planets = vec![
            planet(0, 420.0, Some(HUMAN_ID), 15),
            planet(1, 400.0, Some(2), 100),
            planet(2, 420.0, None, 10),
        ];
        // human: 10 + 15 - 30 = -5 beats neutral 20
        let mv = decide(&planets, 2, AiDifficulty::Hard, 5).unwrap();
        assert_eq!(mv.target, 0);
    }

    #[test]
    fn test_percentage_table() {
        assert_eq!(choose_percentage(AiDifficulty::Easy, 3, 100, 1), AttackPercentage::Quarter);
        assert_eq!(choose_percentage(AiDifficulty::Easy, 6, 100, 1), AttackPercentage::Half);
        assert_eq!(choose_percentage(AiDifficulty::Hard, 2, 100, 1), AttackPercentage::Half);
        assert_eq!(choose_percentage(AiDifficulty::Medium, 5, 21, 10), AttackPercentage::Full);
        assert_eq!(choose_percentage(AiDifficulty::Medium, 5, 20, 10), AttackPercentage::Half);
        assert_eq!(choose_percentage(AiDifficulty::Medium, 9, 16, 10), AttackPercentage::Full);
        assert_eq!(choose_percentage(AiDifficulty::Medium, 16, 13, 10), AttackPercentage::Half);
        assert_eq!(choose_percentage(AiDifficulty::Hard, 16, 13, 10), AttackPercentage::Full);
    }

    #[test]
    fn test_escalates_sub_lethal_attacks() {
        let planets = vec![planet(0, 400.0, Some(2), 20), planet(1, 450.0, None, 15)];
        // 50% of 20 = 10 cannot beat 15, so level 3 commits everything
        let mv = decide(&planets, 2, AiDifficulty::Medium, 3).unwrap();
        assert_eq!(mv.percentage, AttackPercentage::Full);

        // Level 2 keeps the table's choice
        let mv = decide(&planets, 2, AiDifficulty::Medium, 2).unwrap();
        assert_eq!(mv.percentage, AttackPercentage::Half);
    }

    #[test]
    fn test_no_candidates_passes() {
        let planets = vec![planet(0, 400.0, Some(2), 20)];
        assert_eq!(decide(&planets, 2, AiDifficulty::Hard, 10), None);
    }
}
