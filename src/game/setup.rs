//! Setup data: rooms, weapons and seats.

use serde::{Deserialize, Serialize};

use crate::board::{Coord, RoomSpec};
use crate::player::Controller;

/// One typed setup record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupRecord {
    /// A room with its layout initial.
    Room {
        /// Room name.
        name: String,
        /// Layout initial.
        initial: char,
    },
    /// A non-room tile kind (walkway or unused) with its layout initial.
    Space {
        /// Display name.
        name: String,
        /// Layout initial.
        initial: char,
    },
    /// A weapon.
    Weapon {
        /// Weapon name.
        name: String,
    },
    /// A seated player.
    Player(Seat),
}

/// A player as declared at setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Player name, also a person card.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Starting cell.
    pub start: Coord,
    /// Whether the engine plays this seat.
    pub computer: bool,
}

impl Seat {
    /// The controller this seat is played by.
    #[must_use]
    pub const fn controller(&self) -> Controller {
        if self.computer {
            Controller::Computer
        } else {
            Controller::Human
        }
    }
}

/// Everything a session needs besides the board grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSetup {
    /// Rooms in declaration order. The board registry is built from these.
    pub rooms: Vec<RoomSpec>,
    /// Weapon names.
    pub weapons: Vec<String>,
    /// Players in turn order.
    pub seats: Vec<Seat>,
}

impl GameSetup {
    /// Collect records into a setup. Space records carry no game data and are
    /// skipped.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = SetupRecord>) -> Self {
        let mut setup = Self::default();
        for record in records {
            match record {
                SetupRecord::Room { name, initial } => setup.rooms.push(RoomSpec::new(name, initial)),
                SetupRecord::Space { .. } => {}
                SetupRecord::Weapon { name } => setup.weapons.push(name),
                SetupRecord::Player(seat) => setup.seats.push(seat),
            }
        }
        setup
    }

    /// A copy with every seat played by the engine.
    #[must_use]
    pub fn all_computer(&self) -> Self {
        let mut setup = self.clone();
        for seat in &mut setup.seats {
            seat.computer = true;
        }
        setup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records() {
        let setup = GameSetup::from_records([
            SetupRecord::Room {
                name: "Hall".into(),
                initial: 'H',
            },
            SetupRecord::Space {
                name: "Walkway".into(),
                initial: 'W',
            },
            SetupRecord::Weapon {
                name: "Rope".into(),
            },
            SetupRecord::Player(Seat {
                name: "Ada".into(),
                color: "red".into(),
                start: Coord::new(0, 1),
                computer: false,
            }),
        ]);
        assert_eq!(setup.rooms, vec![RoomSpec::new("Hall", 'H')]);
        assert_eq!(setup.weapons, vec!["Rope".to_string()]);
        assert_eq!(setup.seats.len(), 1);
        assert_eq!(setup.seats[0].controller(), Controller::Human);
        assert_eq!(setup.all_computer().seats[0].controller(), Controller::Computer);
    }
}
