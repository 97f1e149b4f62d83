//! Tournament command implementation.

use super::output::{JsonTournamentResult, TournamentStats, format_tournament_csv, format_tournament_text};
use super::{BoardFiles, CliError, TournamentFormat, seed_or_now};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use sleuth::board::Board;
use sleuth::simulation::{SimulationConfig, run_game_on};
use std::time::Instant;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the board cannot be loaded or the setup cannot be
/// dealt.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn execute(
    files: &BoardFiles,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_turns: Option<u32>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Build the board once, each game gets a clone
    let (spec, setup) = files.load()?;
    let board = Board::new(&spec)?;
    let seat_names: Vec<String> = setup.seats.iter().map(|seat| seat.name.clone()).collect();

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_now(seed);

    let mut config = SimulationConfig::default();
    if let Some(t) = max_turns {
        config.max_turns = t;
    }

    // Surface setup errors once, before fanning out
    run_game_on(base_seed, board.clone(), &setup, SimulationConfig { max_turns: 0 }, |_, _| {})?;

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let num_seats = seat_names.len();

    // Each thread accumulates into its own TournamentStats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(
            || TournamentStats::new(num_seats),
            |mut local_stats, i| {
                let game_seed = base_seed.wrapping_add(i);
                match run_game_on(game_seed, board.clone(), &setup, config, |_, _| {}) {
                    Ok(result) => local_stats.add_result(&result),
                    Err(e) => tracing::warn!(seed = game_seed, error = %e, "game failed"),
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                local_stats
            },
        )
        .reduce(
            || TournamentStats::new(num_seats),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats, &seat_names));
            println!();
            println!("Duration: {:.2}s ({:.0} games/sec)", duration.as_secs_f64(), games_per_sec);
        }
        TournamentFormat::Json => {
            let json_result = JsonTournamentResult::from_stats(&stats, &seat_names);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats, &seat_names));
        }
    }

    Ok(())
}
