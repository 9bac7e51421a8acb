//! Spacewars CLI - headless runs, level snapshots and the score table.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Spacewars - a turn-based planetary conquest engine
#[derive(Parser, Debug)]
#[command(name = "spacewars")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one run with the autopilot in the human seat
    Simulate {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Stop after this many completed levels (default: 20)
        #[arg(short, long, default_value = "20")]
        levels: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save scores to this JSON file
        #[arg(long)]
        scores: Option<PathBuf>,
    },

    /// Run many autopilot runs in parallel and aggregate statistics
    Batch {
        /// Number of runs (default: 100)
        #[arg(short, long, default_value = "100")]
        runs: u64,

        /// Starting seed (increments for each run)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Stop each run after this many completed levels (default: 20)
        #[arg(short, long, default_value = "20")]
        levels: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Print a freshly generated level as a JSON snapshot
    Snapshot {
        /// Level to generate (1-20)
        #[arg(short, long, default_value = "1")]
        level: u32,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Human player name
        #[arg(short, long, default_value = "Player")]
        username: String,
    },

    /// Show or clear the score table
    Scores {
        /// Score file
        #[arg(long, default_value = "spacewars-scores.json")]
        file: PathBuf,

        #[command(subcommand)]
        action: ScoresAction,
    },
}

/// Score table actions
#[derive(Subcommand, Debug)]
enum ScoresAction {
    /// List scores, most levels first, then fastest
    List {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
    /// Remove every score
    Clear,
}

fn init_logging(verbose: u8, quiet_default: bool) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if quiet_default {
                "spacewars=warn"
            } else {
                "spacewars=info"
            })
        }),
        1 => EnvFilter::new("spacewars=debug"),
        _ => EnvFilter::new("spacewars=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Per-attack logs would drown a batch report
    init_logging(args.verbose, matches!(args.command, Commands::Batch { .. }));
    let config = args.config.as_deref();

    let result = match args.command {
        Commands::Simulate {
            seed,
            levels,
            format,
            scores,
        } => cli::simulate::execute(config, seed, levels, format, scores),

        Commands::Batch {
            runs,
            seed,
            threads,
            levels,
            format,
            progress,
        } => cli::batch::execute(config, runs, seed, threads, levels, format, progress),

        Commands::Snapshot {
            level,
            seed,
            username,
        } => cli::snapshot::execute(config, level, seed, &username),

        Commands::Scores { file, action } => match action {
            ScoresAction::List { format } => cli::scores::list(file, format),
            ScoresAction::Clear => {
                cli::scores::clear(file);
                Ok(())
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
