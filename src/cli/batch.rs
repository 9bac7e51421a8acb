//! Batch command implementation.

use super::output::{BatchStats, JsonBatchResult, format_batch_text};
use super::{CliError, OutputFormat, load_config, resolve_seed};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use spacewars::autoplay::{AutoplayConfig, run_autoplay};
use std::path::Path;
use std::time::Instant;

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or any run broke
/// an invariant.
pub(crate) fn execute(
    config: Option<&Path>,
    runs: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    levels: u32,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    let game_config = load_config(config)?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = resolve_seed(seed);
    let autoplay = AutoplayConfig {
        max_levels: levels,
        ..AutoplayConfig::default()
    };

    let pb = if progress {
        let pb = ProgressBar::new(runs);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread accumulates into its own BatchStats, merged at the end
    let stats = (0..runs)
        .into_par_iter()
        .fold(BatchStats::new, |mut local, i| {
            let run_seed = base_seed.wrapping_add(i);
            match run_autoplay(run_seed, &autoplay, game_config) {
                Ok(result) => local.add_result(&result),
                Err(e) => {
                    tracing::warn!(seed = run_seed, error = %e, "run failed to start");
                    local.add_failure();
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(BatchStats::new, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let runs_per_sec = if duration.as_secs_f64() > 0.0 {
        #[allow(clippy::cast_precision_loss)]
        let runs = stats.runs as f64;
        runs / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats));
            println!();
            println!("Duration: {:.2}s ({runs_per_sec:.1} runs/sec)", duration.as_secs_f64());
            if !stats.violating_seeds.is_empty() {
                let mut seeds = stats.violating_seeds.clone();
                seeds.sort_unstable();
                println!("Violating seeds: {seeds:?}");
            }
        }
        OutputFormat::Json => {
            let json = JsonBatchResult::from_stats(&stats);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    if stats.violating_seeds.is_empty() {
        Ok(())
    } else {
        Err(CliError::new(format!(
            "{} runs broke an invariant",
            stats.violating_seeds.len()
        )))
    }
}
