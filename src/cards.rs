//! Cards, guesses and the hidden solution.

mod deck;

pub use deck::Deck;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TurnError;

/// The three kinds of card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardType {
    /// A suspect.
    Person,
    /// A murder weapon.
    Weapon,
    /// A room on the board.
    Room,
}

impl CardType {
    /// All card types in guess order.
    pub const ALL: [CardType; 3] = [CardType::Person, CardType::Weapon, CardType::Room];
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Person => "person",
            Self::Weapon => "weapon",
            Self::Room => "room",
        };
        f.write_str(name)
    }
}

/// A card. Two cards are equal when both name and type match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    /// Display name.
    pub name: String,
    /// Card type.
    pub kind: CardType,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: CardType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a person card.
    #[must_use]
    pub fn person(name: impl Into<String>) -> Self {
        Self::new(name, CardType::Person)
    }

    /// Create a weapon card.
    #[must_use]
    pub fn weapon(name: impl Into<String>) -> Self {
        Self::new(name, CardType::Weapon)
    }

    /// Create a room card.
    #[must_use]
    pub fn room(name: impl Into<String>) -> Self {
        Self::new(name, CardType::Room)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// One card of each type: a suggestion, an accusation or the solution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guess {
    /// The suspect.
    pub person: Card,
    /// The weapon.
    pub weapon: Card,
    /// The room.
    pub room: Card,
}

/// The hidden triple every accusation is checked against.
pub type Solution = Guess;

impl Guess {
    /// Create a guess from its three cards.
    #[must_use]
    pub const fn new(person: Card, weapon: Card, room: Card) -> Self {
        Self {
            person,
            weapon,
            room,
        }
    }

    /// The cards in person, weapon, room order.
    #[must_use]
    pub const fn cards(&self) -> [&Card; 3] {
        [&self.person, &self.weapon, &self.room]
    }

    /// Check if `card` is one of the three.
    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.cards().contains(&card)
    }

    /// The card of the given type.
    #[must_use]
    pub const fn get(&self, kind: CardType) -> &Card {
        match kind {
            CardType::Person => &self.person,
            CardType::Weapon => &self.weapon,
            CardType::Room => &self.room,
        }
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} with the {} in the {}",
            self.person.name, self.weapon.name, self.room.name
        )
    }
}

/// An accusation being assembled. Every slot must be filled before it can be
/// evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accusation {
    /// Accused person.
    pub person: Option<Card>,
    /// Accused weapon.
    pub weapon: Option<Card>,
    /// Accused room.
    pub room: Option<Card>,
}

impl Accusation {
    /// An empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `card` in the slot for its type, replacing what was there.
    #[must_use]
    pub fn with(mut self, card: Card) -> Self {
        let slot = match card.kind {
            CardType::Person => &mut self.person,
            CardType::Weapon => &mut self.weapon,
            CardType::Room => &mut self.room,
        };
        *slot = Some(card);
        self
    }

    /// Turn the draft into a [`Guess`].
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::IncompleteAccusation`] listing every unset type.
    pub fn complete(self) -> Result<Guess, TurnError> {
        match (self.person, self.weapon, self.room) {
            (Some(person), Some(weapon), Some(room)) => Ok(Guess::new(person, weapon, room)),
            (person, weapon, room) => {
                let missing = [
                    (person.is_none(), CardType::Person),
                    (weapon.is_none(), CardType::Weapon),
                    (room.is_none(), CardType::Room),
                ]
                .into_iter()
                .filter_map(|(unset, kind)| unset.then_some(kind))
                .collect();
                Err(TurnError::IncompleteAccusation { missing })
            }
        }
    }
}

impl From<Guess> for Accusation {
    fn from(guess: Guess) -> Self {
        Self {
            person: Some(guess.person),
            weapon: Some(guess.weapon),
            room: Some(guess.room),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess() -> Guess {
        Guess::new(Card::person("Ada"), Card::weapon("Rope"), Card::room("Hall"))
    }

    #[test]
    fn test_card_equality_is_by_name_and_type() {
        assert_eq!(Card::room("Study"), Card::room("Study"));
        assert_ne!(Card::room("Study"), Card::weapon("Study"));
        assert_ne!(Card::room("Study"), Card::room("Hall"));
    }

    #[test]
    fn test_guess_contains() {
        let g = guess();
        assert!(g.contains(&Card::weapon("Rope")));
        assert!(!g.contains(&Card::person("Rope")));
        assert_eq!(g.get(CardType::Room), &Card::room("Hall"));
        assert_eq!(g.to_string(), "Ada with the Rope in the Hall");
    }

    #[test]
    fn test_complete_accusation() {
        let draft = Accusation::new()
            .with(Card::room("Hall"))
            .with(Card::person("Ada"))
            .with(Card::weapon("Rope"));
        assert_eq!(draft.complete().unwrap(), guess());
        assert_eq!(Accusation::from(guess()).complete().unwrap(), guess());
    }

    #[test]
    fn test_incomplete_accusation() {
        let err = Accusation::new()
            .with(Card::person("Ada"))
            .complete()
            .unwrap_err();
        assert_eq!(
            err,
            TurnError::IncompleteAccusation {
                missing: vec![CardType::Weapon, CardType::Room]
            }
        );

        let err = Accusation::new().complete().unwrap_err();
        assert_eq!(
            err,
            TurnError::IncompleteAccusation {
                missing: CardType::ALL.to_vec()
            }
        );
    }
}
