//! Output formatting utilities for CLI.

// Averages over run counts
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use spacewars::autoplay::{LevelResult, RunOutcome, RunResult};
use spacewars::scores::{ScoreRecord, format_time};
use spacewars::LEVEL_COUNT;

/// Format one autoplay run as human-readable text.
pub(super) fn format_run_text(result: &RunResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Run Result (seed: {})\n", result.seed));
    output.push_str(&format!("  Outcome: {}\n", result.outcome.label()));
    output.push_str(&format!(
        "  Levels completed: {}/{LEVEL_COUNT}\n",
        result.levels_completed
    ));
    output.push_str(&format!("  Attacks: {}\n", result.attacks));
    output.push_str(&format!(
        "  Game time: {}\n\n",
        format_time(result.game_time_ms / 1000)
    ));

    for level in &result.levels {
        let result = match level.result {
            LevelResult::Won => "won",
            LevelResult::Lost => "lost",
            LevelResult::TimedOut => "timed out",
        };
        output.push_str(&format!(
            "  Level {:>2}: {:<9} {:>6} {:>4} attacks\n",
            level.level,
            result,
            format_time(level.game_time_ms / 1000),
            level.attacks
        ));
    }

    if !result.violations.is_empty() {
        output.push_str(&format!("\n  Invariant violations: {}\n", result.violations.len()));
        for violation in &result.violations {
            output.push_str(&format!("    {violation}\n"));
        }
    }

    output
}

/// Aggregated statistics over many autoplay runs.
#[derive(Debug, Default)]
pub(super) struct BatchStats {
    /// Runs that produced a result.
    pub(super) runs: u64,
    /// Runs whose first board could not be generated.
    pub(super) failures: u64,
    /// Count per outcome, indexed like `RunOutcome::ALL`.
    outcomes: [u64; 4],
    /// Runs by levels completed (index = levels completed).
    levels_reached: Vec<u64>,
    /// Sum of levels completed.
    total_levels: u64,
    /// Sum of attacks.
    total_attacks: u64,
    /// Sum of game time.
    total_game_ms: u64,
    /// Total invariant violations.
    violations: u64,
    /// Seeds of runs that broke an invariant.
    pub(super) violating_seeds: Vec<u64>,
}

impl BatchStats {
    /// Create empty stats.
    pub(super) fn new() -> Self {
        Self {
            levels_reached: vec![0; LEVEL_COUNT as usize + 1],
            ..Self::default()
        }
    }

    /// Add a run result to the stats.
    pub(super) fn add_result(&mut self, result: &RunResult) {
        self.runs += 1;
        if let Some(i) = RunOutcome::ALL.iter().position(|&o| o == result.outcome) {
            self.outcomes[i] += 1;
        }
        let reached = (result.levels_completed as usize).min(self.levels_reached.len() - 1);
        self.levels_reached[reached] += 1;
        self.total_levels += u64::from(result.levels_completed);
        self.total_attacks += result.attacks;
        self.total_game_ms += result.game_time_ms;
        if !result.violations.is_empty() {
            self.violations += result.violations.len() as u64;
            self.violating_seeds.push(result.seed);
        }
    }

    /// Record a run that failed to start.
    pub(super) fn add_failure(&mut self) {
        self.failures += 1;
    }

    /// Merge another thread's stats into this one.
    pub(super) fn merge(&mut self, other: &BatchStats) {
        self.runs += other.runs;
        self.failures += other.failures;
        for (a, b) in self.outcomes.iter_mut().zip(other.outcomes) {
            *a += b;
        }
        for (a, b) in self.levels_reached.iter_mut().zip(&other.levels_reached) {
            *a += b;
        }
        self.total_levels += other.total_levels;
        self.total_attacks += other.total_attacks;
        self.total_game_ms += other.total_game_ms;
        self.violations += other.violations;
        self.violating_seeds.extend_from_slice(&other.violating_seeds);
    }

    /// Number of runs that ended with `outcome`.
    pub(super) fn outcome_count(&self, outcome: RunOutcome) -> u64 {
        RunOutcome::ALL
            .iter()
            .position(|&o| o == outcome)
            .map_or(0, |i| self.outcomes[i])
    }

    fn average(&self, total: u64) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        total as f64 / self.runs as f64
    }

    /// Average levels completed per run.
    pub(super) fn avg_levels(&self) -> f64 {
        self.average(self.total_levels)
    }

    /// Average attacks per run.
    pub(super) fn avg_attacks(&self) -> f64 {
        self.average(self.total_attacks)
    }

    /// Average game time per run, in seconds.
    pub(super) fn avg_game_secs(&self) -> f64 {
        self.average(self.total_game_ms) / 1000.0
    }
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JsonBatchResult {
    runs: u64,
    failures: u64,
    completed: u64,
    defeated: u64,
    timed_out: u64,
    stopped: u64,
    avg_levels: f64,
    avg_attacks: f64,
    avg_game_secs: f64,
    levels_reached: Vec<u64>,
    violations: u64,
    violating_seeds: Vec<u64>,
}

impl JsonBatchResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &BatchStats) -> Self {
        let mut violating_seeds = stats.violating_seeds.clone();
        violating_seeds.sort_unstable();
        Self {
            runs: stats.runs,
            failures: stats.failures,
            completed: stats.outcome_count(RunOutcome::Completed),
            defeated: stats.outcome_count(RunOutcome::Defeated),
            timed_out: stats.outcome_count(RunOutcome::TimedOut),
            stopped: stats.outcome_count(RunOutcome::Stopped),
            avg_levels: stats.avg_levels(),
            avg_attacks: stats.avg_attacks(),
            avg_game_secs: stats.avg_game_secs(),
            levels_reached: stats.levels_reached.clone(),
            violations: stats.violations,
            violating_seeds,
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Batch Results ({} runs)\n", stats.runs));
    output.push_str("========================================\n\n");

    output.push_str("Outcomes:\n");
    for outcome in RunOutcome::ALL {
        let count = stats.outcome_count(outcome);
        let rate = if stats.runs == 0 {
            0.0
        } else {
            count as f64 / stats.runs as f64 * 100.0
        };
        output.push_str(&format!("  {:<10} {count:>6} ({rate:.1}%)\n", outcome.label()));
    }
    if stats.failures > 0 {
        output.push_str(&format!("  {:<10} {:>6}\n", "failed", stats.failures));
    }

    output.push_str("\nLevels completed:\n");
    for (levels, &count) in stats.levels_reached.iter().enumerate() {
        if count > 0 {
            output.push_str(&format!("  {levels:>2}: {count}\n"));
        }
    }

    output.push_str(&format!("\nAverage levels completed: {:.2}\n", stats.avg_levels()));
    output.push_str(&format!("Average attacks per run: {:.1}\n", stats.avg_attacks()));
    output.push_str(&format!("Average game time: {:.0}s\n", stats.avg_game_secs()));

    if stats.violations > 0 {
        output.push_str(&format!(
            "\nInvariant violations: {} in {} runs\n",
            stats.violations,
            stats.violating_seeds.len()
        ));
    }

    output
}

/// Format ranked score records as a table.
pub(super) fn format_scores_text(records: &[ScoreRecord]) -> String {
    if records.is_empty() {
        return "No scores recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<20} {:>6} {:>8}  {}\n",
        "Rank", "Player", "Levels", "Time", "Date"
    ));
    for (rank, record) in records.iter().enumerate() {
        output.push_str(&format!(
            "{:>4}  {:<20} {:>6} {:>8}  {}\n",
            rank + 1,
            record.username,
            record.completed_levels,
            format_time(record.total_time),
            record.date
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacewars::autoplay::LevelSummary;

    fn result(seed: u64, outcome: RunOutcome, levels_completed: u32) -> RunResult {
        RunResult {
            seed,
            outcome,
            levels_completed,
            final_level: levels_completed + 1,
            attacks: 10,
            game_time_ms: 60_000,
            levels: vec![LevelSummary {
                level: 1,
                result: LevelResult::Won,
                game_time_ms: 60_000,
                attacks: 10,
            }],
            violations: Vec::new(),
        }
    }

    #[test]
    fn test_stats_merge() {
        let mut a = BatchStats::new();
        a.add_result(&result(1, RunOutcome::Defeated, 2));
        let mut b = BatchStats::new();
        b.add_result(&result(2, RunOutcome::Completed, 20));
        b.add_failure();

        a.merge(&b);
        assert_eq!(a.runs, 2);
        assert_eq!(a.failures, 1);
        assert_eq!(a.outcome_count(RunOutcome::Completed), 1);
        assert_eq!(a.outcome_count(RunOutcome::Defeated), 1);
        assert!((a.avg_levels() - 11.0).abs() < 1e-9);
        assert!((a.avg_game_secs() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_text_lists_levels() {
        let text = format_run_text(&result(5, RunOutcome::Defeated, 1));
        assert!(text.contains("seed: 5"));
        assert!(text.contains("defeated"));
        assert!(text.contains("Level  1: won"));
    }

    #[test]
    fn test_empty_scores() {
        assert_eq!(format_scores_text(&[]), "No scores recorded.\n");
    }
}
