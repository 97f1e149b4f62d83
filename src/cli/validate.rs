//! Board validation command implementation.

use super::{BoardFiles, CliError};
use sleuth::board::Board;
use sleuth::cards::CardType;
use sleuth::game::Game;

/// Execute the validate command.
///
/// # Errors
///
/// Returns the first load, board or setup error found.
pub(crate) fn execute(files: &BoardFiles) -> Result<(), CliError> {
    println!("Validating: {}", files.describe());
    println!();

    let loaded = files.load();
    print_check("Layout and setup parse", loaded.is_ok());
    let (spec, setup) = loaded?;

    let board = Board::new(&spec);
    print_check("Board structure", board.is_ok());
    let board = board?;

    let game = Game::with_board(board, &setup, 0);
    print_check("Setup deals", game.is_ok());
    let game = game.map_err(|e| CliError::new(e.to_string()))?;

    let board = game.board();
    let walkways = board.cells().iter().filter(|cell| cell.tile.is_walkway()).count();
    let room_tiles = board.cells().iter().filter(|cell| cell.tile.room_id().is_some()).count();
    let count = |kind: CardType| game.cards().iter().filter(|card| card.kind == kind).count();
    let computers = setup.seats.iter().filter(|seat| seat.computer).count();

    println!();
    println!("Summary:");
    println!("  Board:     {}x{}", board.height(), board.width());
    println!("  Rooms:     {}", board.rooms().len());
    println!("  Cells:     {walkways} walkway, {room_tiles} room");
    println!("  Doors:     {}", board.door_count());
    println!("  Passages:  {}", board.passage_count());
    println!(
        "  Cards:     {} ({} people, {} weapons, {} rooms)",
        game.cards().len(),
        count(CardType::Person),
        count(CardType::Weapon),
        count(CardType::Room)
    );
    println!(
        "  Players:   {} ({} human, {computers} computer)",
        setup.seats.len(),
        setup.seats.len() - computers
    );
    println!("  Undealt:   {}", game.undealt().len());

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
