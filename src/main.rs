//! Sleuth CLI - Command-line interface for simulating and inspecting games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Sleuth - A deterministic Clue-style deduction engine
#[derive(Parser, Debug)]
#[command(name = "sleuth")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Layout CSV file (default: built-in classic board)
    #[arg(long, global = true)]
    layout: Option<PathBuf>,

    /// Setup file declaring rooms, weapons and players
    #[arg(long, global = true)]
    setup: Option<PathBuf>,

    /// Random seed (default: random)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a single game between computer players
    Run {
        /// Maximum turns (default: 500)
        #[arg(short, long, default_value = "500")]
        turns: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the header and turn log
        #[arg(short, long, conflicts_with = "verbose")]
        quiet: bool,

        /// Print every turn
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run mass parallel games and aggregate statistics
    Tournament {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum turns per game (default: 500)
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Show every cell reachable from a cell with an exact roll
    Targets {
        /// Starting row
        row: u16,

        /// Starting column
        col: u16,

        /// Die roll
        roll: u32,
    },

    /// Validate layout and setup files
    Validate,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let files = cli::BoardFiles::new(args.layout, args.setup);

    let result = match args.command {
        Commands::Run {
            turns,
            format,
            quiet,
            verbose,
        } => cli::run::execute(&files, args.seed, turns, format, quiet, verbose),

        Commands::Tournament {
            games,
            threads,
            max_turns,
            format,
            progress,
        } => cli::tournament::execute(&files, games, args.seed, threads, max_turns, format, progress),

        Commands::Targets { row, col, roll } => cli::targets::execute(&files, row, col, roll),

        Commands::Validate => cli::validate::execute(&files),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
