//! Loader tests against files on disk.
//!
//! Run with: cargo test loader

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use sleuth::board::{Board, Coord, Direction};
use sleuth::error::{BoardError, LayoutRowError, LoadError, SetupLineError};
use sleuth::game::Game;
use sleuth::loader::{self, CLASSIC_LAYOUT, CLASSIC_SETUP};
use tempfile::tempdir;

const SETUP: &str = "\
Room, Attic, A
Room, Barn, B
Space, Walkway, W
Weapon, Rope
Player, Ada, red, 3, 0
NPC, Bo, blue, 3, 5
";

const LAYOUT: &str = "\
A,AB,A,W,B,B
A,A*,A,W,B*,B
A,A,A,W,BA,B
W,W,W^,W,W^,W
";

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_load_files_roundtrip() {
    let dir = tempdir().unwrap();
    let layout = write(dir.path(), "layout.csv", LAYOUT);
    let setup = write(dir.path(), "setup.txt", SETUP);

    let (spec, game_setup) = loader::load_files(&layout, &setup).unwrap();
    assert_eq!(spec.height(), 4);
    assert_eq!(spec.width(), 6);
    assert_eq!(game_setup.seats.len(), 2);

    let board = Board::new(&spec).unwrap();
    assert_eq!(board.door_count(), 2);
    assert_eq!(board.passage_count(), 2);
    let attic = board.room_by_name("Attic").unwrap().center;
    let barn = board.room_by_name("Barn").unwrap().center;
    assert!(board.adjacency(attic).any(|c| c == barn));
    assert!(board.adjacency(Coord::new(3, 2)).any(|c| c == attic));

    let game = Game::new(&spec, &game_setup, 5).unwrap();
    assert_eq!(game.cards().len(), 5);
}

#[test]
fn test_classic_files_match_embedded() {
    let dir = tempdir().unwrap();
    let layout = write(dir.path(), "ClueLayout.csv", CLASSIC_LAYOUT);
    let setup = write(dir.path(), "ClueSetup.txt", CLASSIC_SETUP);

    let from_disk = loader::load_files(&layout, &setup).unwrap();
    let embedded = loader::classic().unwrap();
    assert_eq!(from_disk.0, embedded.0);
    assert_eq!(from_disk.1.seats, embedded.1.seats);
}

#[test]
fn test_setup_error_reports_line() {
    let dir = tempdir().unwrap();
    let layout = write(dir.path(), "layout.csv", LAYOUT);
    let setup = write(dir.path(), "setup.txt", "Room, Attic, A\n\nWeapon\n");

    let err = loader::load_files(&layout, &setup).unwrap_err();
    match err {
        LoadError::Setup { line, kind } => {
            assert_eq!(line, 3);
            assert!(matches!(kind, SetupLineError::WrongFieldCount { expected: 2, found: 1, .. }));
        }
        other => panic!("expected a setup error, got {other}"),
    }
}

#[test]
fn test_layout_error_reports_row() {
    let dir = tempdir().unwrap();
    let layout = write(dir.path(), "layout.csv", "A,A*,W\nA,Q,W\n");
    let setup = write(dir.path(), "setup.txt", SETUP);

    let err = loader::load_files(&layout, &setup).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Layout {
            row: 1,
            kind: LayoutRowError::UnknownInitial('Q')
        }
    ));
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn test_structural_errors_surface_from_board() {
    let (spec, _) = loader::parse("A,A,W,B,B*\nA,A,W,B,B\n", SETUP).unwrap();
    assert_eq!(
        Board::new(&spec).unwrap_err(),
        BoardError::MissingCenter {
            room: "Attic".into()
        }
    );

    let (spec, _) = loader::parse("A*,W>,W,B*\n", SETUP).unwrap();
    assert_eq!(
        Board::new(&spec).unwrap_err(),
        BoardError::DoorWithoutRoom {
            coord: Coord::new(0, 1),
            direction: Direction::Right
        }
    );
}

#[test]
fn test_unreadable_layout() {
    let dir = tempdir().unwrap();
    let setup = write(dir.path(), "setup.txt", SETUP);
    let missing = dir.path().join("nope.csv");

    let err = loader::load_files(&missing, &setup).unwrap_err();
    assert!(matches!(err, LoadError::Io { ref path, .. } if path == &missing));
    assert!(err.to_string().contains("nope.csv"));
}
