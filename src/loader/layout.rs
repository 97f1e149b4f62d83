//! Layout CSV parsing.

use super::setup::{UNUSED, WALKWAY};
use crate::board::{BoardSpec, Direction, RoomId, RoomSpec, RoomTile, Tile};
use crate::error::{LayoutRowError, LoadError};

/// Parse a layout grid against a room registry.
///
/// Each token is one or two characters. The first is `X` (unused), `W`
/// (walkway) or a room initial. A walkway may add a door glyph `^ v < >`. A
/// room tile may add `*` (center), `#` (label) or another room's initial
/// (secret passage). Blank lines are skipped.
///
/// # Errors
///
/// Returns [`LoadError::Layout`] with the 0-based row of the first malformed
/// row. Structural problems such as missing centers are left to
/// [`Board::new`](crate::board::Board::new).
pub fn parse_layout(text: &str, rooms: &[RoomSpec]) -> Result<BoardSpec, LoadError> {
    let mut rows: Vec<Vec<Tile>> = Vec::new();
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let row = rows.len();
        let tiles = line
            .split(',')
            .map(|token| parse_token(token.trim(), rooms))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|kind| LoadError::Layout { row, kind })?;
        let expected = rows.first().map_or(tiles.len(), Vec::len);
        if tiles.len() != expected {
            return Err(LoadError::Layout {
                row,
                kind: LayoutRowError::WrongWidth {
                    expected,
                    found: tiles.len(),
                },
            });
        }
        rows.push(tiles);
    }
    if rows.is_empty() {
        return Err(LoadError::Layout {
            row: 0,
            kind: LayoutRowError::Empty,
        });
    }
    Ok(BoardSpec::new(rooms.to_vec(), rows))
}

fn parse_token(token: &str, rooms: &[RoomSpec]) -> Result<Tile, LayoutRowError> {
    let mut chars = token.chars();
    let (Some(first), modifier, None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(LayoutRowError::BadToken(token.to_string()));
    };
    let room_id = |initial: char| rooms.iter().position(|room| room.initial == initial).map(RoomId);

    match (first, modifier) {
        (UNUSED, None) => Ok(Tile::Unused),
        (WALKWAY, None) => Ok(Tile::walkway()),
        (WALKWAY, Some(glyph)) => Direction::from_glyph(glyph)
            .map(Tile::door)
            .ok_or_else(|| LayoutRowError::BadModifier(token.to_string())),
        (UNUSED, Some(_)) => Err(LayoutRowError::BadModifier(token.to_string())),
        (initial, modifier) => {
            let room = room_id(initial).ok_or(LayoutRowError::UnknownInitial(initial))?;
            let role = match modifier {
                None => RoomTile::Interior,
                Some('*') => RoomTile::Center,
                Some('#') => RoomTile::Label,
                Some(target) => {
                    RoomTile::Passage(room_id(target).ok_or(LayoutRowError::BadSecretPassage(target))?)
                }
            };
            Ok(Tile::room(room, role))
        }
    }
}
