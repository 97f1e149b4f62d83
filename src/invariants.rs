//! Game invariants: sanity checks that detect bugs.
//!
//! None of these should ever fire for a session driven through the public
//! turn operations. They exist for tests, fuzzing and the simulation loop.

use std::collections::HashMap;
use std::fmt;

use crate::board::Board;
use crate::cards::{Card, Solution};
use crate::game::Game;
use crate::player::{MAX_HAND, Player};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all invariants of a session.
///
/// Returns every violation found, or an empty list if all hold.
#[must_use]
pub fn check_invariants(game: &Game) -> Vec<InvariantViolation> {
    let mut violations = check_board(game.board());
    violations.extend(check_occupancy(game.board(), game.players()));
    violations.extend(check_cards(
        game.players(),
        game.solution(),
        game.cards(),
        game.undealt(),
    ));
    violations
}

/// Graph symmetry and room isolation.
fn check_board(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for cell in board.cells() {
        for next in board.adjacency(cell.coord) {
            if !board.adjacency(next).any(|back| back == cell.coord) {
                violations.push(InvariantViolation {
                    message: format!("{} lists {} as adjacent but not vice versa", cell.coord, next),
                });
            }
        }
        if cell.tile.room_id().is_some()
            && !cell.tile.is_center()
            && board.adjacency(cell.coord).next().is_some()
        {
            violations.push(InvariantViolation {
                message: format!("room tile {} is not a center but has neighbours", cell.coord),
            });
        }
    }
    violations
}

/// Occupied flags match player positions.
fn check_occupancy(board: &Board, players: &[Player]) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for cell in board.cells() {
        let holds_token = players.iter().any(|player| player.position == cell.coord);
        if cell.occupied != holds_token {
            violations.push(InvariantViolation {
                message: format!(
                    "{} occupied flag is {} but {} token stands there",
                    cell.coord,
                    cell.occupied,
                    if holds_token { "a" } else { "no" }
                ),
            });
        }
    }
    for player in players {
        if board.cell(player.position).is_none() {
            violations.push(InvariantViolation {
                message: format!("{} stands off the board at {}", player.name, player.position),
            });
        }
    }
    violations
}

/// Hand caps, seen sets and card conservation.
fn check_cards(
    players: &[Player],
    solution: &Solution,
    cards: &[Card],
    undealt: &[Card],
) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut holders: HashMap<&Card, usize> = HashMap::new();

    for player in players {
        if player.hand().len() > MAX_HAND {
            violations.push(InvariantViolation {
                message: format!(
                    "{} holds {} cards > max {MAX_HAND}",
                    player.name,
                    player.hand().len()
                ),
            });
        }
        for card in player.hand() {
            if !player.has_seen(card) {
                violations.push(InvariantViolation {
                    message: format!("{} holds {card} but has not seen it", player.name),
                });
            }
            if solution.contains(card) {
                violations.push(InvariantViolation {
                    message: format!("{} holds solution card {card}", player.name),
                });
            }
            *holders.entry(card).or_default() += 1;
        }
    }
    for card in solution.cards().into_iter().chain(undealt) {
        *holders.entry(card).or_default() += 1;
    }

    for card in cards {
        match holders.remove(card) {
            Some(1) => {}
            Some(n) => violations.push(InvariantViolation {
                message: format!("{card} appears {n} times"),
            }),
            None => violations.push(InvariantViolation {
                message: format!("{card} is missing from hands, solution and leftovers"),
            }),
        }
    }
    for card in holders.keys() {
        violations.push(InvariantViolation {
            message: format!("{card} is not part of the deck"),
        });
    }
    violations
}

/// Assert all invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(game: &Game) {
    let violations = check_invariants(game);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_game: &Game) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::loader;
    use crate::player::Controller;

    fn classic_game(seed: u64) -> Game {
        let (spec, setup) = loader::classic().unwrap();
        Game::new(&spec, &setup, seed).unwrap()
    }

    #[test]
    fn test_fresh_game_is_valid() {
        let game = classic_game(4);
        assert!(check_invariants(&game).is_empty());
        assert_invariants(&game);
    }

    #[test]
    fn test_valid_after_computer_turns() {
        let (spec, setup) = loader::classic().unwrap();
        let mut game = Game::new(&spec, &setup.all_computer(), 8).unwrap();
        for _ in 0..60 {
            if game.is_over() {
                break;
            }
            game.advance_turn().unwrap();
            let violations = check_invariants(&game);
            assert!(violations.is_empty(), "{violations:?}");
        }
    }

    #[test]
    fn test_detects_stale_occupancy() {
        let game = classic_game(4);
        let mut board = game.board().clone();
        board.set_occupied(Coord::new(5, 6), true);
        let violations = check_occupancy(&board, game.players());
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("(5, 6)"));
    }

    #[test]
    fn test_detects_card_problems() {
        let game = classic_game(4);
        let mut players = game.players().to_vec();

        let mut cheat = Player::new("Cheat", "black", Controller::Computer, Coord::new(0, 6));
        cheat.update_hand(game.solution().room.clone());
        players.push(cheat);
        let violations = check_cards(&players, game.solution(), game.cards(), game.undealt());
        assert!(violations.iter().any(|v| v.message.contains("holds solution card")));
        assert!(violations.iter().any(|v| v.message.contains("appears 2 times")));

        let violations = check_cards(&game.players()[1..], game.solution(), game.cards(), game.undealt());
        assert!(violations.iter().any(|v| v.message.contains("is missing")));
    }
}
