//! Property-based tests for the board graph, targets and deduction.
//!
//! Target sets are checked against a brute-force path enumerator that shares
//! no code with the engine's search.
//! Run with: cargo test --release prop_game

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;
use std::sync::OnceLock;

use proptest::prelude::*;

use sleuth::board::{Board, BoardSpec, Coord, Tile};
use sleuth::cards::{Card, Guess};
use sleuth::deduction::{check_accusation, disprove_suggestion};
use sleuth::loader;
use sleuth::player::{Controller, MAX_HAND, Player};

fn classic_board() -> &'static Board {
    static BOARD: OnceLock<Board> = OnceLock::new();
    BOARD.get_or_init(|| {
        let (spec, _) = loader::classic().unwrap();
        Board::new(&spec).unwrap()
    })
}

/// Every cell where a token may stop after exactly `roll` steps, found by
/// expanding whole paths breadth first.
fn brute_force_targets(board: &Board, start: Coord, roll: u32) -> BTreeSet<Coord> {
    let mut found = BTreeSet::new();
    let free = |c: Coord| board.cell(c).is_some_and(|cell| !cell.occupied || cell.tile.is_center());
    if board.cell(start).is_none() {
        return found;
    }

    let mut frontier: Vec<Vec<Coord>> = vec![vec![start]];
    for step in 1..=roll {
        let mut next_frontier = Vec::new();
        for path in frontier {
            let Some(&last) = path.last() else { continue };
            for next in board.adjacency(last) {
                if path.contains(&next) || !free(next) {
                    continue;
                }
                let center = board.is_room_center(next);
                if step == roll || center {
                    found.insert(next);
                    continue;
                }
                let mut longer = path.clone();
                longer.push(next);
                next_frontier.push(longer);
            }
        }
        frontier = next_frontier;
    }
    if roll == 0 && free(start) {
        found.insert(start);
    }
    found
}

fn classic_cell() -> impl Strategy<Value = Coord> {
    (0u16..22, 0u16..23).prop_map(|(r, c)| Coord::new(r, c))
}

fn occupy(board: &Board, cells: &[Coord]) -> Board {
    let mut board = board.clone();
    for &cell in cells {
        board.set_occupied(cell, true);
    }
    board
}

fn deck(people: usize, weapons: usize, rooms: usize) -> Vec<Card> {
    (0..people)
        .map(|i| Card::person(format!("P{i}")))
        .chain((0..weapons).map(|i| Card::weapon(format!("W{i}"))))
        .chain((0..rooms).map(|i| Card::room(format!("R{i}"))))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Adjacency is symmetric on random open grids.
    #[test]
    fn prop_open_grid_symmetric(rows in 1usize..8, cols in 1usize..8) {
        let spec = BoardSpec::new(Vec::new(), vec![vec![Tile::walkway(); cols]; rows]);
        let board = Board::new(&spec).unwrap();
        for cell in board.cells() {
            for next in board.adjacency(cell.coord) {
                prop_assert!(board.adjacency(next).any(|back| back == cell.coord));
            }
        }
    }

    /// Targets match the brute-force enumeration for any start, roll and
    /// set of blocked cells.
    #[test]
    fn prop_targets_match_brute_force(
        start in classic_cell(),
        roll in 0u32..=6,
        blocked in prop::collection::vec(classic_cell(), 0..12),
    ) {
        let board = occupy(classic_board(), &blocked);
        prop_assert_eq!(board.compute_targets(start, roll), brute_force_targets(&board, start, roll));
    }

    /// Every target is free or a room center and never the start itself.
    #[test]
    fn prop_targets_are_enterable(
        start in classic_cell(),
        roll in 1u32..=6,
        blocked in prop::collection::vec(classic_cell(), 0..12),
    ) {
        let board = occupy(classic_board(), &blocked);
        for target in board.compute_targets(start, roll) {
            let cell = board.cell(target).unwrap();
            prop_assert!(!cell.occupied || cell.tile.is_center());
            prop_assert_ne!(target, start);
        }
    }

    /// Occupying a target that is not a room center removes it.
    #[test]
    fn prop_occupancy_blocks(start in classic_cell(), roll in 1u32..=6, pick in any::<prop::sample::Index>()) {
        let board = classic_board();
        let targets: Vec<Coord> = board.compute_targets(start, roll).into_iter().collect();
        prop_assume!(!targets.is_empty());
        let victim = targets[pick.index(targets.len())];

        let blocked = occupy(board, &[victim]);
        let after = blocked.compute_targets(start, roll);
        prop_assert_eq!(after.contains(&victim), board.is_room_center(victim));
    }

    /// Hands never exceed the cap and an overflow card changes nothing.
    #[test]
    fn prop_hand_cap(count in 0usize..10) {
        let mut player = Player::new("Ada", "red", Controller::Computer, Coord::new(0, 0));
        for card in deck(count, 0, 0) {
            let before = player.hand().to_vec();
            let added = player.update_hand(card.clone());
            prop_assert_eq!(added, before.len() < MAX_HAND);
            if !added {
                prop_assert_eq!(player.hand(), before.as_slice());
                prop_assert!(!player.has_seen(&card));
            }
        }
        prop_assert!(player.hand().len() <= MAX_HAND);
        prop_assert_eq!(player.hand().len(), count.min(MAX_HAND));
    }

    /// The solution accuses correctly; changing any single card does not.
    #[test]
    fn prop_accusation_exact(p in 0usize..4, w in 0usize..4, r in 0usize..4, swap in 0usize..3) {
        let solution = Guess::new(
            Card::person(format!("P{p}")),
            Card::weapon(format!("W{w}")),
            Card::room(format!("R{r}")),
        );
        prop_assert!(check_accusation(&solution, &solution));

        let mut wrong = solution.clone();
        match swap {
            0 => wrong.person = Card::person(format!("P{}", p + 1)),
            1 => wrong.weapon = Card::weapon(format!("W{}", w + 1)),
            _ => wrong.room = Card::room(format!("R{}", r + 1)),
        }
        prop_assert!(!check_accusation(&solution, &wrong));
    }

    /// A disproof never comes from the suggester and always matches the guess.
    #[test]
    fn prop_disproof_excludes_suggester(
        seats in 2usize..7,
        suggester_pick in any::<prop::sample::Index>(),
        order in Just(deck(4, 4, 4)).prop_shuffle(),
        guess_picks in (0usize..4, 0usize..4, 0usize..4),
    ) {
        let mut players: Vec<Player> = (0..seats)
            .map(|i| Player::new(format!("S{i}"), "grey", Controller::Computer, Coord::new(0, 0)))
            .collect();
        for (i, card) in order.into_iter().enumerate() {
            players[i % seats].update_hand(card);
        }
        let suggester = suggester_pick.index(seats);
        let guess = Guess::new(
            Card::person(format!("P{}", guess_picks.0)),
            Card::weapon(format!("W{}", guess_picks.1)),
            Card::room(format!("R{}", guess_picks.2)),
        );

        let others_hold = players
            .iter()
            .enumerate()
            .any(|(i, p)| i != suggester && p.first_match(&guess).is_some());
        match disprove_suggestion(&players, suggester, &guess) {
            Some(disproof) => {
                prop_assert_ne!(disproof.holder, suggester);
                prop_assert!(guess.contains(&disproof.card));
                prop_assert!(players[disproof.holder].holds(&disproof.card));
                prop_assert!(!players[suggester].holds(&disproof.card));
            }
            None => prop_assert!(!others_hold),
        }
    }
}

#[test]
fn test_classic_graph_symmetric_and_rooms_isolated() {
    let board = classic_board();
    for cell in board.cells() {
        for next in board.adjacency(cell.coord) {
            assert!(
                board.adjacency(next).any(|back| back == cell.coord),
                "{} -> {next} is one way",
                cell.coord
            );
        }
        if cell.tile.room_id().is_some() && !cell.tile.is_center() {
            assert_eq!(board.adjacency(cell.coord).count(), 0, "{} is linked", cell.coord);
        }
    }
}
