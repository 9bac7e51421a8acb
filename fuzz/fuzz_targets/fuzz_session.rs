#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spacewars::config::{GameConfig, LEVEL_COUNT};
use spacewars::game::{AttackPercentage, check_invariants};
use spacewars::scores::MemoryScoreStore;
use spacewars::session::GameSession;

/// One command a presentation layer could send.
#[derive(Arbitrary, Debug)]
enum Command {
    Select(u8),
    Clear,
    Attack(u8),
    Advance(u16),
    AdvanceLevel,
    Restart,
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    seed: u64,
    level: u8,
    commands: Vec<Command>,
}

const PERCENTAGES: [AttackPercentage; 3] = [
    AttackPercentage::Quarter,
    AttackPercentage::Half,
    AttackPercentage::Full,
];

fuzz_target!(|input: SessionInput| {
    let level = 1 + u32::from(input.level) % LEVEL_COUNT;
    let Ok(mut session) = GameSession::starting_at(
        level,
        GameConfig::default(),
        "fuzz",
        Box::new(MemoryScoreStore::new()),
        Some(input.seed),
    ) else {
        return;
    };

    for command in input.commands.iter().take(256) {
        match command {
            Command::Select(i) => {
                let planets = &session.state().planets;
                let id = planets[usize::from(*i) % planets.len()].id;
                session.select_planet(id);
            }
            Command::Clear => {
                session.clear_selection();
            }
            Command::Attack(p) => {
                session.execute_attack(PERCENTAGES[usize::from(*p) % PERCENTAGES.len()]);
            }
            Command::Advance(ms) => session.advance(u64::from(*ms)),
            Command::AdvanceLevel => {
                session.advance_level();
            }
            Command::Restart => {
                session.restart("fuzz");
            }
        }

        let violations = check_invariants(session.state());
        assert!(violations.is_empty(), "after {command:?}: {violations:?}");
    }
});
