//! Drawing the solution and dealing hands.

use rand::Rng;

use super::{Card, CardType, Solution};
use crate::error::SetupError;
use crate::player::{MAX_HAND, Player};

/// Cards still in circulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a deck from a list of cards.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Build the full deck: one card per room, weapon and person.
    #[must_use]
    pub fn from_names<'a>(
        rooms: impl IntoIterator<Item = &'a str>,
        weapons: impl IntoIterator<Item = &'a str>,
        people: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let cards = rooms
            .into_iter()
            .map(Card::room)
            .chain(weapons.into_iter().map(Card::weapon))
            .chain(people.into_iter().map(Card::person))
            .collect();
        Self { cards }
    }

    /// Remaining cards.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of remaining cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Consume the deck, returning what was never dealt.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    /// Draw one card of each type uniformly at random and remove them.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingCardType`] if any type has no card. The
    /// deck is left untouched in that case.
    pub fn draw_solution<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Solution, SetupError> {
        for kind in CardType::ALL {
            if !self.cards.iter().any(|card| card.kind == kind) {
                return Err(SetupError::MissingCardType(kind));
            }
        }
        let person = self.draw_kind(CardType::Person, rng);
        let weapon = self.draw_kind(CardType::Weapon, rng);
        let room = self.draw_kind(CardType::Room, rng);
        match (person, weapon, room) {
            (Some(person), Some(weapon), Some(room)) => Ok(Solution::new(person, weapon, room)),
            (None, _, _) => Err(SetupError::MissingCardType(CardType::Person)),
            (_, None, _) => Err(SetupError::MissingCardType(CardType::Weapon)),
            (_, _, None) => Err(SetupError::MissingCardType(CardType::Room)),
        }
    }

    fn draw_kind<R: Rng + ?Sized>(&mut self, kind: CardType, rng: &mut R) -> Option<Card> {
        let candidates: Vec<usize> = (0..self.cards.len())
            .filter(|&i| self.cards[i].kind == kind)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let pick = candidates[rng.gen_range(0..candidates.len())];
        Some(self.cards.remove(pick))
    }

    /// Remove and return a uniformly random card.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let pick = rng.gen_range(0..self.cards.len());
        Some(self.cards.remove(pick))
    }

    /// Deal to each player in seat order until their hand is full or the deck
    /// runs out.
    pub fn deal<R: Rng + ?Sized>(&mut self, players: &mut [Player], rng: &mut R) {
        for player in players.iter_mut() {
            while player.hand().len() < MAX_HAND {
                let Some(card) = self.draw(rng) else {
                    return;
                };
                player.update_hand(card);
            }
        }
    }
}
