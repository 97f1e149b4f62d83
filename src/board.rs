//! The cell graph and room registry.
//!
//! A [`Board`] is built once from a [`BoardSpec`]. Cells live in a flat arena
//! in row-major order and the movement graph is stored as adjacency lists of
//! arena indices. Only room centers represent rooms in the graph: doors link
//! to the center of the room they face, secret passages link two centers, and
//! every other room tile is isolated.

mod cell;
mod spec;
mod targets;

pub use cell::{Cell, Coord, Direction, RoomId, RoomTile, Tile};
pub use spec::{BoardSpec, RoomSpec};

use crate::error::BoardError;

/// A room in the registry with the cells that matter for play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Registry index.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Layout initial.
    pub initial: char,
    /// The room's only movement node.
    pub center: Coord,
    /// Display-only label position.
    pub label: Option<Coord>,
    /// Door cells linked to the center.
    pub doors: Vec<Coord>,
    /// Rooms reachable through a secret passage.
    pub passages: Vec<RoomId>,
}

/// The cell graph plus room registry.
#[derive(Debug, Clone)]
pub struct Board {
    height: u16,
    width: u16,
    /// Cells in row-major order.
    cells: Vec<Cell>,
    /// Neighbour indices for each cell.
    adjacency: Vec<Vec<usize>>,
    rooms: Vec<Room>,
}

impl Board {
    /// Build the cell graph from a spec.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the grid is empty or ragged, if a tile refers
    /// to an unregistered room, if a room has no center or more than one, if
    /// a door does not face a room, or if a secret passage is invalid.
    pub fn new(spec: &BoardSpec) -> Result<Self, BoardError> {
        let rows = spec.height();
        let cols = spec.width();
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyBoard);
        }
        for (row, tiles) in spec.rows.iter().enumerate() {
            if tiles.len() != cols {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: cols,
                    found: tiles.len(),
                });
            }
        }
        let (Ok(height), Ok(width)) = (u16::try_from(rows), u16::try_from(cols)) else {
            return Err(BoardError::CoordOutOfRange { rows, cols });
        };

        let mut centers: Vec<Option<Coord>> = vec![None; spec.rooms.len()];
        let mut labels: Vec<Option<Coord>> = vec![None; spec.rooms.len()];
        let mut cells = Vec::with_capacity(rows * cols);

        for (r, tiles) in (0..height).zip(&spec.rows) {
            for (c, &tile) in (0..width).zip(tiles) {
                let coord = Coord::new(r, c);
                if let Tile::Room { room, role } = tile {
                    let Some(room_spec) = spec.rooms.get(room.index()) else {
                        return Err(BoardError::UnknownRoom {
                            coord,
                            room: room.index(),
                        });
                    };
                    match role {
                        RoomTile::Center => {
                            if let Some(first) = centers[room.index()] {
                                return Err(BoardError::DuplicateCenter {
                                    room: room_spec.name.clone(),
                                    first,
                                    second: coord,
                                });
                            }
                            centers[room.index()] = Some(coord);
                        }
                        RoomTile::Label => {
                            if labels[room.index()].is_some() {
                                return Err(BoardError::DuplicateLabel {
                                    room: room_spec.name.clone(),
                                });
                            }
                            labels[room.index()] = Some(coord);
                        }
                        RoomTile::Passage(target) => {
                            if target == room || target.index() >= spec.rooms.len() {
                                return Err(BoardError::InvalidSecretPassage {
                                    coord,
                                    target: target.index(),
                                });
                            }
                        }
                        RoomTile::Interior => {}
                    }
                }
                cells.push(Cell::new(coord, tile));
            }
        }

        let mut rooms = Vec::with_capacity(spec.rooms.len());
        for (i, room_spec) in spec.rooms.iter().enumerate() {
            let Some(center) = centers[i] else {
                return Err(BoardError::MissingCenter {
                    room: room_spec.name.clone(),
                });
            };
            rooms.push(Room {
                id: RoomId(i),
                name: room_spec.name.clone(),
                initial: room_spec.initial,
                center,
                label: labels[i],
                doors: Vec::new(),
                passages: Vec::new(),
            });
        }

        let mut board = Self {
            height,
            width,
            adjacency: vec![Vec::new(); cells.len()],
            cells,
            rooms,
        };
        board.link_walkways()?;
        board.link_passages();
        Ok(board)
    }

    /// Add walkway edges and door-to-center edges.
    fn link_walkways(&mut self) -> Result<(), BoardError> {
        for idx in 0..self.cells.len() {
            let cell = self.cells[idx];
            if !cell.tile.is_walkway() {
                continue;
            }
            let facing = cell.tile.door_direction();
            let mut door_resolved = facing.is_none();

            let (neighbours, count) = cell.coord.adjacent(self.height, self.width);
            for &(direction, coord) in &neighbours[..count as usize] {
                let next = self.index(coord);
                let tile = self.cells[next].tile;
                match tile.room_id() {
                    None if tile.is_walkway() => self.link(idx, next),
                    Some(room) if facing == Some(direction) => {
                        let center_idx = self.index(self.rooms[room.index()].center);
                        self.link(idx, center_idx);
                        let doors = &mut self.rooms[room.index()].doors;
                        if !doors.contains(&cell.coord) {
                            doors.push(cell.coord);
                        }
                        door_resolved = true;
                    }
                    _ => {}
                }
            }

            if let (false, Some(direction)) = (door_resolved, facing) {
                return Err(BoardError::DoorWithoutRoom {
                    coord: cell.coord,
                    direction,
                });
            }
        }
        Ok(())
    }

    /// Link the centers of rooms joined by a secret passage.
    fn link_passages(&mut self) {
        for idx in 0..self.cells.len() {
            let Tile::Room {
                room,
                role: RoomTile::Passage(target),
            } = self.cells[idx].tile
            else {
                continue;
            };
            let from = self.index(self.rooms[room.index()].center);
            let to = self.index(self.rooms[target.index()].center);
            self.link(from, to);
            for (a, b) in [(room, target), (target, room)] {
                let passages = &mut self.rooms[a.index()].passages;
                if !passages.contains(&b) {
                    passages.push(b);
                }
            }
        }
    }

    /// Add an undirected edge, ignoring duplicates.
    fn link(&mut self, a: usize, b: usize) {
        if !self.adjacency[a].contains(&b) {
            self.adjacency[a].push(b);
        }
        if !self.adjacency[b].contains(&a) {
            self.adjacency[b].push(a);
        }
    }

    /// Arena index of an in-bounds coordinate.
    #[inline]
    fn index(&self, coord: Coord) -> usize {
        usize::from(coord.row) * usize::from(self.width) + usize::from(coord.col)
    }

    /// Arena index of a coordinate, if it is on the board.
    #[must_use]
    #[inline]
    pub(crate) fn index_of(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord).then(|| self.index(coord))
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Check if a coordinate is on the board.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at a coordinate.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index_of(coord).map(|idx| &self.cells[idx])
    }

    /// Cell at `(row, col)`.
    #[must_use]
    pub fn cell_at(&self, row: u16, col: u16) -> Option<&Cell> {
        self.cell(Coord::new(row, col))
    }

    /// Neighbours of a cell in the movement graph. Empty for off-board coordinates.
    pub fn adjacency(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.index_of(coord)
            .map(|idx| self.adjacency[idx].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&next| self.cells[next].coord)
    }

    /// The room registry.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Room by id.
    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    /// Room by display name.
    #[must_use]
    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name == name)
    }

    /// The room whose tile is at `coord`.
    #[must_use]
    pub fn room_at(&self, coord: Coord) -> Option<&Room> {
        self.cell(coord)
            .and_then(|cell| cell.tile.room_id())
            .and_then(|id| self.room(id))
    }

    /// Check if `coord` is a room center.
    #[must_use]
    pub fn is_room_center(&self, coord: Coord) -> bool {
        self.cell(coord).is_some_and(|cell| cell.tile.is_center())
    }

    /// Check if a token may stand on `coord` at the start of play.
    #[must_use]
    pub fn is_walkable(&self, coord: Coord) -> bool {
        self.cell(coord)
            .is_some_and(|cell| cell.tile.is_walkway() || cell.tile.is_center())
    }

    /// Set the occupancy flag of a cell. Off-board coordinates are ignored.
    pub fn set_occupied(&mut self, coord: Coord, occupied: bool) {
        if let Some(idx) = self.index_of(coord) {
            self.cells[idx].occupied = occupied;
        }
    }

    /// Clear every occupancy flag.
    pub fn clear_occupancy(&mut self) {
        for cell in &mut self.cells {
            cell.occupied = false;
        }
    }

    /// Number of door cells.
    #[must_use]
    pub fn door_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.tile.is_door()).count()
    }

    /// Number of secret-passage marker cells.
    #[must_use]
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.tile.secret_passage().is_some())
            .count()
    }
}
