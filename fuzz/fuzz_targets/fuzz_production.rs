#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spacewars::game::{Planet, PlanetSize, SpecialType, apply_production};

/// One fuzzed planet.
#[derive(Arbitrary, Debug)]
struct PlanetInput {
    x: u16,
    y: u16,
    size: u8,
    special: u8,
    owner: u8,
    soldiers: u16,
    last_production_ms: u32,
}

/// Structured input for production fuzzing.
#[derive(Arbitrary, Debug)]
struct ProductionInput {
    planets: Vec<PlanetInput>,
    ticks: Vec<u16>,
}

const SPECIALS: [SpecialType; 5] = [
    SpecialType::Normal,
    SpecialType::Energy,
    SpecialType::Fortress,
    SpecialType::Factory,
    SpecialType::Rare,
];

fuzz_target!(|input: ProductionInput| {
    let mut planets: Vec<Planet> = input
        .planets
        .iter()
        .take(40)
        .enumerate()
        .map(|(i, p)| {
            let owner = (p.owner % 4 != 0).then_some(p.owner % 4);
            let mut planet = Planet::new(
                i as u16,
                (f64::from(p.x % 800), f64::from(p.y % 600)),
                PlanetSize::ALL[usize::from(p.size) % PlanetSize::ALL.len()],
                owner,
                SPECIALS[usize::from(p.special) % SPECIALS.len()],
                u64::from(p.last_production_ms),
            );
            planet.set_soldiers(u32::from(p.soldiers));
            planet
        })
        .collect();

    let mut now = planets.iter().map(|p| p.last_production_ms).max().unwrap_or(0);
    for &delta in input.ticks.iter().take(64) {
        now += u64::from(delta);
        let before: Vec<(u32, u64)> = planets
            .iter()
            .map(|p| (p.soldier_count, p.last_production_ms))
            .collect();

        // Must not panic
        let result = apply_production(&mut planets, now, 1000, 120.0);

        let mut credited = 0;
        for (planet, &(soldiers, last)) in planets.iter().zip(&before) {
            assert!(planet.soldier_count <= planet.max_soldiers);
            assert!(planet.soldier_count >= soldiers);
            if planet.is_neutral() {
                assert_eq!(planet.soldier_count, soldiers);
                assert_eq!(planet.last_production_ms, last);
            }
            if planet.last_production_ms != last {
                assert_eq!(planet.last_production_ms, now);
                assert!(now - last >= 1000);
                credited += 1;
            }
        }
        assert!(result.planets_credited >= credited);
    }
});
