//! Suggestion disproof and accusation verdicts.
//!
//! Both are pure reads: a disproving card is revealed, never transferred.

use serde::Serialize;

use crate::cards::{Card, Guess, Solution};
use crate::player::{Player, PlayerId};

/// A card shown to refute a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disproof {
    /// The revealed card.
    pub card: Card,
    /// Seat of the player who revealed it.
    pub holder: PlayerId,
}

/// Find the first player after `suggester` in turn order who can refute
/// `guess`, wrapping around and never asking the suggester.
///
/// The revealed card is the first matching card in that player's hand. A
/// `suggester` that is not a seat gets no answer.
#[must_use]
pub fn disprove_suggestion(
    players: &[Player],
    suggester: PlayerId,
    guess: &Guess,
) -> Option<Disproof> {
    let n = players.len();
    if suggester >= n {
        return None;
    }
    (1..=n)
        .map(|offset| (suggester + offset) % n)
        .filter(|&seat| seat != suggester)
        .find_map(|seat| {
            players[seat].first_match(guess).map(|card| Disproof {
                card: card.clone(),
                holder: seat,
            })
        })
}

/// Check an accusation against the solution. Every card must match.
#[must_use]
pub fn check_accusation(solution: &Solution, accusation: &Guess) -> bool {
    solution.person == accusation.person
        && solution.weapon == accusation.weapon
        && solution.room == accusation.room
}
