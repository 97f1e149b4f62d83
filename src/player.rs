//! Player state and the computer heuristics.

use std::collections::{BTreeSet, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::board::{Board, Coord};
use crate::cards::{Card, CardType, Guess};

/// Seat index in turn order.
pub type PlayerId = usize;

/// Maximum number of cards in a hand.
pub const MAX_HAND: usize = 3;

/// Who makes a player's choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Controller {
    /// Moves and suggestions come from outside the engine.
    Human,
    /// Moves, suggestions and accusations are chosen by the engine.
    Computer,
}

/// A seated player.
///
/// Equality compares controller, name and color only.
#[derive(Debug, Clone)]
pub struct Player {
    /// Display name, also the name of the player's person card.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Human or computer.
    pub controller: Controller,
    /// Current cell.
    pub position: Coord,
    /// Set when the player was dragged into a room by someone else's
    /// suggestion. Lets them stay there on their next turn.
    pub can_stay: bool,
    /// Set after a wrong accusation. Eliminated players no longer take turns
    /// but still disprove suggestions.
    pub eliminated: bool,
    hand: Vec<Card>,
    seen: HashSet<Card>,
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.controller == other.controller && self.name == other.name && self.color == other.color
    }
}

impl Eq for Player {}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        controller: Controller,
        position: Coord,
    ) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            controller,
            position,
            can_stay: false,
            eliminated: false,
            hand: Vec::with_capacity(MAX_HAND),
            seen: HashSet::new(),
        }
    }

    /// Cards in hand, in the order they were dealt.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Every card this player has observed.
    #[must_use]
    pub fn seen(&self) -> &HashSet<Card> {
        &self.seen
    }

    /// Check if this player has observed `card`.
    #[must_use]
    pub fn has_seen(&self, card: &Card) -> bool {
        self.seen.contains(card)
    }

    /// Check if this player holds `card`.
    #[must_use]
    pub fn holds(&self, card: &Card) -> bool {
        self.hand.contains(card)
    }

    /// Check if this player can still take turns.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.eliminated
    }

    /// Add a card to the hand and mark it seen.
    ///
    /// A card beyond [`MAX_HAND`] is dropped and `false` is returned.
    pub fn update_hand(&mut self, card: Card) -> bool {
        if self.hand.len() >= MAX_HAND {
            tracing::warn!(player = %self.name, card = %card, "hand is full, card dropped");
            return false;
        }
        self.seen.insert(card.clone());
        self.hand.push(card);
        true
    }

    /// Record a card revealed to this player.
    pub fn add_seen(&mut self, card: Card) {
        self.seen.insert(card);
    }

    /// The first card in hand that appears in `guess`.
    #[must_use]
    pub fn first_match(&self, guess: &Guess) -> Option<&Card> {
        self.hand.iter().find(|card| guess.contains(card))
    }

    /// Pick a destination from `targets`.
    ///
    /// Human players always return `None`; their move comes from outside.
    /// Computer players head for the center of a room whose card they have not
    /// seen when one is reachable, otherwise they pick any target. Both picks
    /// are uniform over the candidates.
    pub fn select_target<R: Rng + ?Sized>(
        &self,
        board: &Board,
        targets: &BTreeSet<Coord>,
        rng: &mut R,
    ) -> Option<Coord> {
        if self.controller == Controller::Human {
            return None;
        }
        let unseen_rooms: Vec<Coord> = targets
            .iter()
            .copied()
            .filter(|&coord| {
                board.is_room_center(coord)
                    && board
                        .room_at(coord)
                        .is_some_and(|room| !self.has_seen(&Card::room(room.name.as_str())))
            })
            .collect();
        if let Some(&pick) = unseen_rooms.choose(rng) {
            return Some(pick);
        }
        let all: Vec<Coord> = targets.iter().copied().collect();
        all.choose(rng).copied()
    }

    /// Build a suggestion from the current room.
    ///
    /// The person and weapon are drawn uniformly from the cards in `deck` this
    /// player has not seen. Returns `None` outside a room center or when
    /// either unseen pool is empty.
    pub fn create_suggestion<R: Rng + ?Sized>(
        &self,
        board: &Board,
        deck: &[Card],
        rng: &mut R,
    ) -> Option<Guess> {
        if !board.is_room_center(self.position) {
            return None;
        }
        let room = board.room_at(self.position)?;
        let person = self.unseen(deck, CardType::Person).choose(rng).copied()?;
        let weapon = self.unseen(deck, CardType::Weapon).choose(rng).copied()?;
        Some(Guess::new(
            person.clone(),
            weapon.clone(),
            Card::room(room.name.as_str()),
        ))
    }

    /// The solution, if exactly one card of each type is still unseen.
    #[must_use]
    pub fn deduced_solution(&self, deck: &[Card]) -> Option<Guess> {
        let only = |kind| match self.unseen(deck, kind).as_slice() {
            [card] => Some((*card).clone()),
            _ => None,
        };
        Some(Guess::new(
            only(CardType::Person)?,
            only(CardType::Weapon)?,
            only(CardType::Room)?,
        ))
    }

    fn unseen<'a>(&self, deck: &'a [Card], kind: CardType) -> Vec<&'a Card> {
        deck.iter()
            .filter(|card| card.kind == kind && !self.has_seen(card))
            .collect()
    }
}
