//! Target computation: where can a token stop after an exact roll.

use std::collections::BTreeSet;

use super::{Board, Coord};

impl Board {
    /// Compute every cell a token on `start` could stop on after moving exactly
    /// `roll` steps.
    ///
    /// A path never revisits one of its own cells and never enters an occupied
    /// cell unless it is a room center. Entering a room center after leaving
    /// the start ends the move early, so centers reachable within the roll are
    /// targets. A roll of 0 returns `start` itself if it is free or a room
    /// center. Off-board starts yield an empty set.
    ///
    /// The set is ordered only so that seeded choices over it are
    /// reproducible; callers should not read meaning into the order.
    #[must_use]
    pub fn compute_targets(&self, start: Coord, roll: u32) -> BTreeSet<Coord> {
        let mut targets = BTreeSet::new();
        let Some(origin) = self.index_of(start) else {
            return targets;
        };

        let mut path = Vec::with_capacity(roll as usize + 1);
        path.push(origin);
        self.walk(origin, roll, &mut path, &mut targets);

        tracing::trace!(%start, roll, targets = targets.len(), "computed targets");
        targets
    }

    /// Depth-first search with the current path as an undo stack.
    fn walk(&self, at: usize, remaining: u32, path: &mut Vec<usize>, targets: &mut BTreeSet<Coord>) {
        let cell = &self.cells[at];
        if remaining == 0 {
            if cell.is_enterable() {
                targets.insert(cell.coord);
            }
            return;
        }
        if cell.tile.is_center() && path.len() > 1 {
            targets.insert(cell.coord);
            return;
        }

        for &next in &self.adjacency[at] {
            if path.contains(&next) || !self.cells[next].is_enterable() {
                continue;
            }
            path.push(next);
            self.walk(next, remaining - 1, path, targets);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardSpec, Tile};

    fn open_grid(rows: usize, cols: usize) -> Board {
        let spec = BoardSpec::new(Vec::new(), vec![vec![Tile::walkway(); cols]; rows]);
        Board::new(&spec).unwrap()
    }

    fn coords(list: &[(u16, u16)]) -> BTreeSet<Coord> {
        list.iter().map(|&(r, c)| Coord::new(r, c)).collect()
    }

    #[test]
    fn test_roll_one_from_center_of_grid() {
        let board = open_grid(4, 4);
        let targets = board.compute_targets(Coord::new(1, 1), 1);
        assert_eq!(targets, coords(&[(0, 1), (1, 0), (1, 2), (2, 1)]));
    }

    #[test]
    fn test_roll_zero() {
        let mut board = open_grid(4, 4);
        let start = Coord::new(2, 2);
        assert_eq!(board.compute_targets(start, 0), coords(&[(2, 2)]));

        board.set_occupied(start, true);
        assert!(board.compute_targets(start, 0).is_empty());
    }

    #[test]
    fn test_corner_rolls() {
        let board = open_grid(4, 4);
        let targets = board.compute_targets(Coord::new(0, 0), 2);
        // No backtracking onto the start.
        assert_eq!(targets, coords(&[(0, 2), (1, 1), (2, 0)]));

        let targets = board.compute_targets(Coord::new(0, 0), 3);
        assert_eq!(
            targets,
            coords(&[(0, 1), (0, 3), (1, 0), (1, 2), (2, 1), (3, 0)])
        );
    }

    #[test]
    fn test_occupied_cell_blocks_paths() {
        let mut board = open_grid(1, 5);
        board.set_occupied(Coord::new(0, 2), true);
        assert!(board.compute_targets(Coord::new(0, 0), 3).is_empty());
        assert_eq!(
            board.compute_targets(Coord::new(0, 0), 1),
            coords(&[(0, 1)])
        );
    }

    #[test]
    fn test_off_board_start() {
        let board = open_grid(2, 2);
        assert!(board.compute_targets(Coord::new(5, 5), 1).is_empty());
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let board = open_grid(5, 5);
        let first = board.compute_targets(Coord::new(2, 2), 3);
        let _ = board.compute_targets(Coord::new(0, 0), 6);
        assert_eq!(board.compute_targets(Coord::new(2, 2), 3), first);
    }
}
