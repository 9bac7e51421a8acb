//! Headless runs with the human seat played by an autopilot.
//!
//! Provides a pure function interface: `(seed, config) -> RunResult`
//!
//! The autopilot plays through the same session commands a person would:
//! select a source, select a target, attack. It thinks with the hard AI
//! policy and, when that policy has nothing to attack, goes after the enemy
//! planet with the weakest effective defense. Batches of runs measure how
//! far the level table lets a competent player get and double as a soak
//! test of the session's invariants.

use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, LEVEL_COUNT};
use crate::error::BoardError;
use crate::game::{
    AiDifficulty, AiMove, AttackPercentage, GameState, HUMAN_ID, check_invariants, decide,
    defending_force, strongest_planet,
};
use crate::scores::{MemoryScoreStore, ScoreStore};
use crate::session::GameSession;

/// Name the autopilot plays under.
pub const AUTOPILOT_NAME: &str = "autopilot";

/// Limits for one headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Stop after completing this many levels.
    pub max_levels: u32,
    /// Give up on a level after this much game time.
    pub max_level_ms: u64,
    /// Game-clock step between autopilot looks at the board.
    pub step_ms: u64,
    /// How long the autopilot waits on its turn before acting.
    pub human_think_ms: u64,
    /// Check state invariants after every step.
    pub check_invariants: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            max_levels: LEVEL_COUNT,
            max_level_ms: 600_000,
            step_ms: 100,
            human_think_ms: 500,
            check_invariants: true,
        }
    }
}

/// How a headless run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunOutcome {
    /// Every level was completed.
    Completed,
    /// An AI took the last human planet.
    Defeated,
    /// A level ran past its time limit.
    TimedOut,
    /// The level limit was reached, or a level could not be generated.
    Stopped,
}

impl RunOutcome {
    /// Every outcome, in reporting order.
    pub const ALL: [RunOutcome; 4] = [
        RunOutcome::Completed,
        RunOutcome::Defeated,
        RunOutcome::TimedOut,
        RunOutcome::Stopped,
    ];

    /// Lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RunOutcome::Completed => "completed",
            RunOutcome::Defeated => "defeated",
            RunOutcome::TimedOut => "timed out",
            RunOutcome::Stopped => "stopped",
        }
    }
}

/// Final result of a headless run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    /// The seed used for this run.
    pub seed: u64,
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Levels the autopilot won.
    pub levels_completed: u32,
    /// Level being played when the run ended.
    pub final_level: u32,
    /// Attacks resolved by every seat.
    pub attacks: u64,
    /// Game-clock time of the whole run.
    pub game_time_ms: u64,
    /// Per-level results, in play order.
    pub levels: Vec<LevelSummary>,
    /// Invariant violations observed, in order.
    pub violations: Vec<String>,
}

/// How a single level ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LevelResult {
    /// The autopilot was the last owner.
    Won,
    /// An AI was the last owner.
    Lost,
    /// The level hit its time limit.
    TimedOut,
}

/// One played level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSummary {
    /// Level number.
    pub level: u32,
    /// How it ended.
    pub result: LevelResult,
    /// Game-clock time spent in the level.
    pub game_time_ms: u64,
    /// Attacks resolved in the level.
    pub attacks: u64,
}

/// Play one run from level 1, keeping scores in memory.
///
/// # Errors
///
/// Returns an error if the first board cannot be generated.
pub fn run_autoplay(
    seed: u64,
    autoplay: &AutoplayConfig,
    config: GameConfig,
) -> Result<RunResult, BoardError> {
    run_autoplay_with_store(seed, autoplay, config, Box::new(MemoryScoreStore::new()))
}

/// Play one run from level 1, saving scores to `store`.
///
/// # Errors
///
/// Returns an error if the first board cannot be generated.
pub fn run_autoplay_with_store(
    seed: u64,
    autoplay: &AutoplayConfig,
    config: GameConfig,
    store: Box<dyn ScoreStore>,
) -> Result<RunResult, BoardError> {
    let mut session = GameSession::new(config, AUTOPILOT_NAME, store, Some(seed))?;
    let mut levels_completed = 0;
    let mut levels = Vec::new();
    let mut violations = Vec::new();

    let outcome = loop {
        let attacks_before = session.attacks();
        let result = play_level(&mut session, autoplay, &mut violations);
        levels.push(LevelSummary {
            level: session.state().level,
            result,
            game_time_ms: session.game_time_ms(),
            attacks: session.attacks() - attacks_before,
        });
        match result {
            LevelResult::Lost => break RunOutcome::Defeated,
            LevelResult::TimedOut => break RunOutcome::TimedOut,
            LevelResult::Won => levels_completed += 1,
        }
        if levels_completed >= autoplay.max_levels && session.state().level < LEVEL_COUNT {
            break RunOutcome::Stopped;
        }
        if !session.advance_level() {
            break RunOutcome::Stopped;
        }
        if session.is_run_complete() {
            break RunOutcome::Completed;
        }
    };

    tracing::debug!(seed, ?outcome, levels_completed, "autoplay finished");
    Ok(RunResult {
        seed,
        outcome,
        levels_completed,
        final_level: session.state().level,
        attacks: session.attacks(),
        game_time_ms: session.now_ms(),
        levels,
        violations,
    })
}

fn play_level(
    session: &mut GameSession,
    autoplay: &AutoplayConfig,
    violations: &mut Vec<String>,
) -> LevelResult {
    let deadline = session.now_ms().saturating_add(autoplay.max_level_ms);
    let step = autoplay.step_ms.max(1);

    while !session.state().is_game_over {
        if session.now_ms() >= deadline {
            tracing::debug!(level = session.state().level, "level timed out");
            return LevelResult::TimedOut;
        }
        let ready = session.now_ms() >= session.turn_started_ms() + autoplay.human_think_ms;
        if ready && session.state().is_human_turn() {
            human_move(session);
        }
        session.advance(step);

        if autoplay.check_invariants {
            let now = session.now_ms();
            violations.extend(
                check_invariants(session.state())
                    .into_iter()
                    .map(|v| format!("t={now}ms: {v}")),
            );
        }
    }

    if session.state().level_completed {
        LevelResult::Won
    } else {
        LevelResult::Lost
    }
}

/// Issue the autopilot's move as clicks. Returns `true` if an attack went out.
fn human_move(session: &mut GameSession) -> bool {
    let Some(mv) = autopilot_move(session.state()) else {
        return false;
    };
    session.clear_selection();
    session.select_planet(mv.source)
        && session.select_planet(mv.target)
        && session.execute_attack(mv.percentage)
}

/// The autopilot's choice for the human seat, or `None` to wait.
#[must_use]
pub fn autopilot_move(state: &GameState) -> Option<AiMove> {
    decide(&state.planets, HUMAN_ID, AiDifficulty::Hard, state.level)
        .or_else(|| weakest_enemy_move(state))
}

/// Full attack on the enemy planet with the weakest effective defense, if
/// the strongest own planet can take it.
fn weakest_enemy_move(state: &GameState) -> Option<AiMove> {
    let source = strongest_planet(&state.planets, HUMAN_ID)?;
    let (target, defense) = state
        .planets
        .iter()
        .filter(|p| !p.is_owned_by(HUMAN_ID))
        .map(|p| (p, defending_force(p, HUMAN_ID)))
        .min_by_key(|&(_, defense)| defense)?;

    (source.soldier_count > defense).then_some(AiMove {
        source: source.id,
        target: target.id,
        percentage: AttackPercentage::Full,
    })
}
