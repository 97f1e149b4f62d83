#![no_main]

//! Target engine fuzzer.
//!
//! Builds a small board from fuzzer-chosen tiles, blocks arbitrary cells and
//! computes targets from an arbitrary start. Checks that:
//! 1. Board construction either succeeds or returns an error (no panics)
//! 2. Adjacency stays symmetric
//! 3. Every target is on the board, free or a room center, and not the start

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sleuth::board::{Board, BoardSpec, Coord, Direction, RoomId, RoomSpec, RoomTile, Tile};

/// A fuzzer-chosen tile.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzTile {
    Unused,
    Walkway,
    Door(u8),
    Interior(u8),
    Center(u8),
    Passage(u8, u8),
}

impl FuzzTile {
    fn decode(self, rooms: usize) -> Tile {
        let room = |r: u8| RoomId(usize::from(r) % rooms.max(1));
        let direction = |d: u8| match d % 4 {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        };
        match self {
            Self::Unused => Tile::Unused,
            Self::Walkway => Tile::walkway(),
            Self::Door(d) => Tile::door(direction(d)),
            Self::Interior(r) => Tile::room(room(r), RoomTile::Interior),
            Self::Center(r) => Tile::room(room(r), RoomTile::Center),
            Self::Passage(r, t) => Tile::room(room(r), RoomTile::Passage(room(t))),
        }
    }
}

/// Structured input for target fuzzing.
#[derive(Arbitrary, Debug)]
struct TargetInput {
    rooms: u8,
    width: u8,
    tiles: Vec<FuzzTile>,
    blocked: Vec<(u8, u8)>,
    start: (u8, u8),
    roll: u8,
}

fuzz_target!(|input: TargetInput| {
    let rooms = usize::from(input.rooms % 4);
    let width = usize::from(input.width % 8) + 1;
    let tiles: Vec<Tile> = input.tiles.iter().take(64).map(|t| t.decode(rooms)).collect();
    if tiles.len() < width {
        return;
    }
    let rows: Vec<Vec<Tile>> = tiles.chunks_exact(width).map(<[Tile]>::to_vec).collect();
    let registry = (0..rooms)
        .map(|i| RoomSpec::new(format!("Room {i}"), char::from(b'A' + i as u8)))
        .collect();

    let Ok(mut board) = Board::new(&BoardSpec::new(registry, rows)) else {
        return;
    };

    for &(r, c) in input.blocked.iter().take(16) {
        board.set_occupied(Coord::new(u16::from(r), u16::from(c)), true);
    }

    for cell in board.cells() {
        for next in board.adjacency(cell.coord) {
            assert!(board.adjacency(next).any(|back| back == cell.coord));
        }
    }

    let start = Coord::new(u16::from(input.start.0), u16::from(input.start.1));
    let roll = u32::from(input.roll % 7);
    for target in board.compute_targets(start, roll) {
        let cell = board.cell(target).expect("target on board");
        assert!(!cell.occupied || cell.tile.is_center());
        if roll > 0 {
            assert_ne!(target, start);
        }
    }
});
