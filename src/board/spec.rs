//! Validated board input consumed by [`Board::new`](super::Board::new).

use serde::{Deserialize, Serialize};

use super::cell::{Coord, RoomId, Tile};

/// A registered room as declared by the setup data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    /// Display name, also the name of the room's card.
    pub name: String,
    /// Single-character initial used in the layout grid.
    pub initial: char,
}

impl RoomSpec {
    /// Create a new room declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, initial: char) -> Self {
        Self {
            name: name.into(),
            initial,
        }
    }
}

/// A rectangular grid of decoded tiles plus the room registry it refers to.
///
/// Rows are stored top to bottom. [`RoomId`]s inside the tiles index into
/// `rooms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSpec {
    /// Room registry, indexed by [`RoomId`].
    pub rooms: Vec<RoomSpec>,
    /// Tile grid in row-major order.
    pub rows: Vec<Vec<Tile>>,
}

impl BoardSpec {
    /// Create a spec from a room registry and a tile grid.
    #[must_use]
    pub fn new(rooms: Vec<RoomSpec>, rows: Vec<Vec<Tile>>) -> Self {
        Self { rooms, rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row (0 when there are no rows).
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Look up a room by initial.
    #[must_use]
    pub fn room_by_initial(&self, initial: char) -> Option<RoomId> {
        self.rooms
            .iter()
            .position(|room| room.initial == initial)
            .map(RoomId)
    }

    /// Tile at a coordinate, if it exists.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> Option<Tile> {
        self.rows
            .get(usize::from(coord.row))
            .and_then(|row| row.get(usize::from(coord.col)))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RoomTile;

    #[test]
    fn test_room_by_initial() {
        let spec = BoardSpec::new(
            vec![RoomSpec::new("Kitchen", 'K'), RoomSpec::new("Study", 'S')],
            vec![vec![Tile::room(RoomId(1), RoomTile::Center)]],
        );
        assert_eq!(spec.room_by_initial('S'), Some(RoomId(1)));
        assert_eq!(spec.room_by_initial('Q'), None);
        assert_eq!(spec.width(), 1);
        assert_eq!(spec.height(), 1);
        assert!(spec.tile(Coord::new(0, 0)).is_some_and(Tile::is_center));
        assert_eq!(spec.tile(Coord::new(1, 0)), None);
    }
}
