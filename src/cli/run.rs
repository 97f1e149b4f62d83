//! Run command implementation.

use super::output::{format_text, format_turn};
use super::{BoardFiles, CliError, OutputFormat, seed_or_now};
use sleuth::board::Board;
use sleuth::simulation::{SimulationConfig, run_game_on};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the board cannot be loaded or the game fails to run.
pub(crate) fn execute(
    files: &BoardFiles,
    seed: Option<u64>,
    turns: u32,
    format: OutputFormat,
    quiet: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let (spec, setup) = files.load()?;
    let board = Board::new(&spec)?;
    let seat_names: Vec<String> = setup.seats.iter().map(|seat| seat.name.clone()).collect();

    let seed = seed_or_now(seed);
    let config = SimulationConfig { max_turns: turns };
    let text = format == OutputFormat::Text;

    if text && !quiet {
        println!("Running game with seed {seed} on the {}...", files.describe());
        println!("Players: {}", seat_names.join(", "));
        println!();
    }

    let result = run_game_on(seed, board, &setup, config, |game, report| {
        if verbose && text {
            println!("{}", format_turn(game, report));
        }
    })?;

    match format {
        OutputFormat::Text => {
            if verbose {
                println!();
            }
            print!("{}", format_text(&result, &seat_names));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
