//! Extended fuzzing tests for the game session.
//!
//! Random command streams go through the same entry points a presentation
//! layer uses; the state must stay consistent after every step.
//!
//! Run with: PROPTEST_CASES=100000 cargo test --release fuzz_session

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use spacewars::config::{GameConfig, LEVEL_COUNT};
use spacewars::game::{AttackPercentage, Phase, check_invariants};
use spacewars::scores::MemoryScoreStore;
use spacewars::session::GameSession;

#[derive(Debug, Clone)]
enum Command {
    Select(prop::sample::Index),
    Clear,
    Attack(AttackPercentage),
    Advance(u64),
    AdvanceLevel,
    Restart,
    Rename,
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => any::<prop::sample::Index>().prop_map(Command::Select),
        1 => Just(Command::Clear),
        3 => prop::sample::select(vec![
            AttackPercentage::Quarter,
            AttackPercentage::Half,
            AttackPercentage::Full,
        ])
        .prop_map(Command::Attack),
        4 => (0u64..5_000).prop_map(Command::Advance),
        1 => Just(Command::AdvanceLevel),
        1 => Just(Command::Restart),
        1 => Just(Command::Rename),
    ]
}

fn apply(session: &mut GameSession, command: &Command) {
    match command {
        Command::Select(index) => {
            let planet = session.state().planets[index.index(session.state().planets.len())].id;
            session.select_planet(planet);
        }
        Command::Clear => {
            session.clear_selection();
        }
        Command::Attack(pct) => {
            session.execute_attack(*pct);
        }
        Command::Advance(ms) => session.advance(*ms),
        Command::AdvanceLevel => {
            session.advance_level();
        }
        Command::Restart => {
            session.restart("fuzz");
        }
        Command::Rename => session.set_username("renamed"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any command stream keeps the session consistent.
    #[test]
    fn fuzz_command_streams(
        seed in any::<u64>(),
        level in 1u32..=LEVEL_COUNT,
        commands in prop::collection::vec(command_strategy(), 1..120),
    ) {
        let mut session = GameSession::starting_at(
            level,
            GameConfig::default(),
            "fuzz",
            Box::new(MemoryScoreStore::new()),
            Some(seed),
        )
        .unwrap();

        for command in &commands {
            let level_before = session.state().level;
            let clock_before = session.now_ms();
            apply(&mut session, command);

            let violations = check_invariants(session.state());
            prop_assert!(violations.is_empty(), "after {:?}: {:?}", command, violations);
            prop_assert!(session.now_ms() >= clock_before);
            prop_assert!(session.state().level <= LEVEL_COUNT);

            let phase = session.state().interaction.phase();
            prop_assert_eq!(phase.is_terminal(), session.state().is_game_over);
            if phase == Phase::LevelComplete {
                prop_assert!(session.store().scores().iter().any(|r| r.completed_levels >= level_before));
            }
            prop_assert!(session.snapshot().to_json().is_ok());
        }
    }

    /// Sessions with the same seed and commands end in the same state.
    #[test]
    fn fuzz_deterministic_replay(
        seed in any::<u64>(),
        commands in prop::collection::vec(command_strategy(), 1..60),
    ) {
        let run = || {
            let mut session = GameSession::new(
                GameConfig::default(),
                "fuzz",
                Box::new(MemoryScoreStore::new()),
                Some(seed),
            )
            .unwrap();
            for command in &commands {
                apply(&mut session, command);
            }
            session.snapshot().to_json().unwrap()
        };
        prop_assert_eq!(run(), run());
    }
}
