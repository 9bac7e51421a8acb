#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spacewars::game::{
    AttackPercentage, Planet, PlanetSize, SpecialType, defending_force, resolve_attack,
};

/// Structured input for combat fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    /// Garrisons of up to four source planets.
    sources: Vec<u16>,
    /// Target garrison.
    target_soldiers: u16,
    /// Target owner: 0 = neutral, 1 = attacker, else a rival.
    target_owner: u8,
    /// Target size selector.
    target_size: u8,
    /// Target special type selector.
    target_special: u8,
    /// Percentage selector.
    percentage: u8,
}

const SIZES: [PlanetSize; 5] = PlanetSize::ALL;
const SPECIALS: [SpecialType; 5] = [
    SpecialType::Normal,
    SpecialType::Energy,
    SpecialType::Fortress,
    SpecialType::Factory,
    SpecialType::Rare,
];
const PERCENTAGES: [AttackPercentage; 3] = [
    AttackPercentage::Quarter,
    AttackPercentage::Half,
    AttackPercentage::Full,
];

fuzz_target!(|input: CombatInput| {
    let garrisons: Vec<u32> = input.sources.iter().take(4).map(|&g| u32::from(g)).collect();
    if garrisons.is_empty() {
        return;
    }

    let mut planets: Vec<Planet> = garrisons
        .iter()
        .enumerate()
        .map(|(i, &g)| {
            Planet::new(i as u16, (0.0, 0.0), PlanetSize::Huge, Some(1), SpecialType::Normal, 0)
                .with_soldiers(g)
        })
        .collect();

    let target_id = planets.len() as u16;
    let owner = match input.target_owner {
        0 => None,
        1 => Some(1),
        other => Some(2 + other % 6),
    };
    let target = Planet::new(
        target_id,
        (100.0, 100.0),
        SIZES[usize::from(input.target_size) % SIZES.len()],
        owner,
        SPECIALS[usize::from(input.target_special) % SPECIALS.len()],
        0,
    )
    .with_soldiers(u32::from(input.target_soldiers));
    let expected_defense = defending_force(&target, 1);
    planets.push(target);

    let before = planets.clone();
    let sources: Vec<u16> = (0..target_id).collect();
    let pct = PERCENTAGES[usize::from(input.percentage) % PERCENTAGES.len()];

    // Must not panic
    let Ok(outcome) = resolve_attack(&mut planets, &sources, target_id, pct) else {
        assert_eq!(planets, before, "rejected attack changed the board");
        return;
    };

    for planet in &planets {
        assert!(
            planet.soldier_count <= planet.max_soldiers,
            "planet {} over capacity",
            planet.id
        );
    }
    assert!(outcome.debited <= outcome.attacking_force);
    assert_eq!(outcome.defending_force, expected_defense);

    let hit = &planets[usize::from(target_id)];
    if outcome.survivors > 0 {
        assert_eq!(hit.owner, Some(1));
        assert_eq!(hit.soldier_count, outcome.survivors.min(hit.max_soldiers));
    } else {
        assert_eq!(hit.owner, owner);
        assert_eq!(hit.soldier_count, 0);
    }
});
