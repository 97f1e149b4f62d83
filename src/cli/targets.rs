//! Targets command implementation.

use super::output::render_board;
use super::{BoardFiles, CliError};
use sleuth::board::{Board, Coord};

/// Execute the targets command.
///
/// # Errors
///
/// Returns an error if the board cannot be loaded or the start cell is off
/// the board.
pub(crate) fn execute(files: &BoardFiles, row: u16, col: u16, roll: u32) -> Result<(), CliError> {
    let (spec, _setup) = files.load()?;
    let board = Board::new(&spec)?;
    let start = Coord::new(row, col);
    if !board.in_bounds(start) {
        return Err(CliError::new(format!(
            "{start} is off the {}x{} board",
            board.height(),
            board.width()
        )));
    }

    let targets = board.compute_targets(start, roll);
    let initials: Vec<char> = spec.rooms.iter().map(|room| room.initial).collect();

    println!("Targets from {start} with a roll of {roll}: {}", targets.len());
    for target in &targets {
        match board.room_at(*target) {
            Some(room) => println!("  {target} {}", room.name),
            None => println!("  {target}"),
        }
    }
    println!();
    print!("{}", render_board(&board, &initials, start, &targets));

    Ok(())
}
