//! Coordinates, tiles and cells.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row, counted from the top.
    pub row: u16,
    /// Column, counted from the left.
    pub col: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Get the in-bounds grid neighbours with the direction leading to each.
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid entries in indices 0..count.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, height: u16, width: u16) -> ([(Direction, Coord); 4], u8) {
        let mut result = [(Direction::Up, *self); 4];
        let mut count = 0u8;

        if self.row > 0 {
            result[count as usize] = (Direction::Up, Coord::new(self.row - 1, self.col));
            count += 1;
        }
        if self.row + 1 < height {
            result[count as usize] = (Direction::Down, Coord::new(self.row + 1, self.col));
            count += 1;
        }
        if self.col > 0 {
            result[count as usize] = (Direction::Left, Coord::new(self.row, self.col - 1));
            count += 1;
        }
        if self.col + 1 < width {
            result[count as usize] = (Direction::Right, Coord::new(self.row, self.col + 1));
            count += 1;
        }

        (result, count)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four grid directions. Doors face the room they open into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Direction {
    /// Parse a layout door glyph (`^`, `v`, `<`, `>`).
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '^' => Some(Self::Up),
            'v' => Some(Self::Down),
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            _ => None,
        }
    }

    /// The layout glyph for this direction.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Up => '^',
            Self::Down => 'v',
            Self::Left => '<',
            Self::Right => '>',
        }
    }
}

/// Index of a room in the board's room registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

impl RoomId {
    /// Position in the registry.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Role of a tile inside a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomTile {
    /// Plain interior; never part of the movement graph.
    Interior,
    /// The room's single movement node.
    Center,
    /// Where the room name is displayed. No movement meaning.
    Label,
    /// Marks a secret passage to the given room.
    Passage(RoomId),
}

/// Static description of a grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Off-limits.
    Unused,
    /// Corridor tile, optionally a door facing a room.
    Walkway {
        /// Facing direction if this walkway is a door.
        door: Option<Direction>,
    },
    /// Part of a room.
    Room {
        /// Owning room.
        room: RoomId,
        /// What this tile does in the room.
        role: RoomTile,
    },
}

impl Tile {
    /// A plain walkway tile.
    #[must_use]
    pub const fn walkway() -> Self {
        Self::Walkway { door: None }
    }

    /// A door facing `direction`.
    #[must_use]
    pub const fn door(direction: Direction) -> Self {
        Self::Walkway {
            door: Some(direction),
        }
    }

    /// A room tile.
    #[must_use]
    pub const fn room(room: RoomId, role: RoomTile) -> Self {
        Self::Room { room, role }
    }

    /// Check if this tile is a walkway (doors included).
    #[must_use]
    pub const fn is_walkway(self) -> bool {
        matches!(self, Self::Walkway { .. })
    }

    /// The door direction, if this tile is a door.
    #[must_use]
    pub const fn door_direction(self) -> Option<Direction> {
        match self {
            Self::Walkway { door } => door,
            _ => None,
        }
    }

    /// Check if this tile is a door.
    #[must_use]
    pub const fn is_door(self) -> bool {
        self.door_direction().is_some()
    }

    /// The room this tile belongs to.
    #[must_use]
    pub const fn room_id(self) -> Option<RoomId> {
        match self {
            Self::Room { room, .. } => Some(room),
            _ => None,
        }
    }

    /// Check if this tile is a room center.
    #[must_use]
    pub const fn is_center(self) -> bool {
        matches!(
            self,
            Self::Room {
                role: RoomTile::Center,
                ..
            }
        )
    }

    /// Check if this tile is a room label.
    #[must_use]
    pub const fn is_label(self) -> bool {
        matches!(
            self,
            Self::Room {
                role: RoomTile::Label,
                ..
            }
        )
    }

    /// The room a secret passage on this tile leads to.
    #[must_use]
    pub const fn secret_passage(self) -> Option<RoomId> {
        match self {
            Self::Room {
                role: RoomTile::Passage(target),
                ..
            } => Some(target),
            _ => None,
        }
    }
}

/// A grid position with its tile and occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Position.
    pub coord: Coord,
    /// Static tile data.
    pub tile: Tile,
    /// Whether a token stands here. Mutated only by movement.
    pub occupied: bool,
}

impl Cell {
    /// Create an unoccupied cell.
    #[must_use]
    pub const fn new(coord: Coord, tile: Tile) -> Self {
        Self {
            coord,
            tile,
            occupied: false,
        }
    }

    /// Check if a token moving along a path may enter this cell.
    ///
    /// Room centers allow any number of tokens.
    #[must_use]
    pub const fn is_enterable(&self) -> bool {
        !self.occupied || self.tile.is_center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_adjacent() {
        let coord = Coord::new(5, 5);
        let (adj, count) = coord.adjacent(10, 10);
        let adj_slice = &adj[..count as usize];
        assert_eq!(count, 4);
        assert!(adj_slice.contains(&(Direction::Up, Coord::new(4, 5))));
        assert!(adj_slice.contains(&(Direction::Down, Coord::new(6, 5))));
        assert!(adj_slice.contains(&(Direction::Left, Coord::new(5, 4))));
        assert!(adj_slice.contains(&(Direction::Right, Coord::new(5, 6))));
    }

    #[test]
    fn test_coord_adjacent_corner() {
        let (adj, count) = Coord::new(0, 0).adjacent(10, 10);
        let adj_slice = &adj[..count as usize];
        assert_eq!(count, 2);
        assert!(adj_slice.contains(&(Direction::Down, Coord::new(1, 0))));
        assert!(adj_slice.contains(&(Direction::Right, Coord::new(0, 1))));
    }

    #[test]
    fn test_direction_glyph_roundtrip() {
        for glyph in ['^', 'v', '<', '>'] {
            let dir = Direction::from_glyph(glyph).unwrap();
            assert_eq!(dir.glyph(), glyph);
        }
        assert_eq!(Direction::from_glyph('*'), None);
    }

    #[test]
    fn test_tile_queries() {
        let center = Tile::room(RoomId(2), RoomTile::Center);
        assert!(center.is_center());
        assert_eq!(center.room_id(), Some(RoomId(2)));
        assert!(!center.is_walkway());

        let door = Tile::door(Direction::Left);
        assert!(door.is_door());
        assert!(door.is_walkway());
        assert_eq!(door.room_id(), None);

        let passage = Tile::room(RoomId(0), RoomTile::Passage(RoomId(3)));
        assert_eq!(passage.secret_passage(), Some(RoomId(3)));
        assert!(!passage.is_center());
    }

    #[test]
    fn test_occupied_center_is_enterable() {
        let mut cell = Cell::new(Coord::new(1, 1), Tile::room(RoomId(0), RoomTile::Center));
        cell.occupied = true;
        assert!(cell.is_enterable());

        let mut walk = Cell::new(Coord::new(1, 2), Tile::walkway());
        walk.occupied = true;
        assert!(!walk.is_enterable());
    }
}
