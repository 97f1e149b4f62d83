//! Error types for the deduction engine.
//!
//! Load-time errors ([`BoardError`], [`SetupError`], [`LoadError`]) abort session
//! construction. Per-turn errors ([`TurnError`]) are recoverable and never leave
//! the session in a partially mutated state.

use std::path::PathBuf;

use thiserror::Error;

use crate::board::{Coord, Direction};
use crate::cards::CardType;

/// Structural inconsistency in a [`BoardSpec`](crate::board::BoardSpec).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The grid has no rows or no columns.
    #[error("board has no cells")]
    EmptyBoard,
    /// A row does not have the same width as the first row.
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        /// Offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },
    /// The grid is larger than a [`Coord`] can address.
    #[error("board of {rows}x{cols} exceeds the addressable size")]
    CoordOutOfRange {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
    /// A room tile names a room that is not in the registry.
    #[error("tile at {coord} refers to unregistered room #{room}")]
    UnknownRoom {
        /// Offending tile.
        coord: Coord,
        /// Index that failed to resolve.
        room: usize,
    },
    /// A registered room has no center tile.
    #[error("room '{room}' has no center tile")]
    MissingCenter {
        /// Room name.
        room: String,
    },
    /// A registered room has more than one center tile.
    #[error("room '{room}' has two center tiles ({first} and {second})")]
    DuplicateCenter {
        /// Room name.
        room: String,
        /// First center seen in row-major order.
        first: Coord,
        /// Second center seen.
        second: Coord,
    },
    /// A registered room has more than one label tile.
    #[error("room '{room}' has more than one label tile")]
    DuplicateLabel {
        /// Room name.
        room: String,
    },
    /// A door faces off the board or onto a tile that is not part of a room.
    #[error("door at {coord} faces {direction:?} but there is no room there")]
    DoorWithoutRoom {
        /// The door tile.
        coord: Coord,
        /// Direction the door faces.
        direction: Direction,
    },
    /// A secret-passage marker names an unregistered room or its own room.
    #[error("secret passage at {coord} leads to invalid room #{target}")]
    InvalidSecretPassage {
        /// The marker tile.
        coord: Coord,
        /// Index that failed to resolve.
        target: usize,
    },
}

/// Inconsistent game setup data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The setup does not yield at least one card of this type.
    #[error("setup has no {0:?} cards")]
    MissingCardType(CardType),
    /// The setup seats nobody.
    #[error("setup has no players")]
    NoPlayers,
    /// Two cards or two players share a name.
    #[error("name '{0}' is used twice")]
    DuplicateName(String),
    /// A starting position lies outside the board.
    #[error("player '{player}' starts at {coord}, outside the board")]
    StartOutOfBounds {
        /// Player name.
        player: String,
        /// Requested start.
        coord: Coord,
    },
    /// A starting position is not a walkway or room center.
    #[error("player '{player}' starts at {coord}, which is not walkable")]
    StartNotWalkable {
        /// Player name.
        player: String,
        /// Requested start.
        coord: Coord,
    },
    /// Two players start on the same walkway cell.
    #[error("players '{first}' and '{second}' both start at {coord}")]
    DuplicateStart {
        /// Player seated first.
        first: String,
        /// Player seated second.
        second: String,
        /// Shared start.
        coord: Coord,
    },
}

/// A per-turn request that was rejected. No state was changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// The requested destination is not in the last computed target set.
    #[error("{destination} is not a legal target for this roll")]
    InvalidMove {
        /// Requested destination.
        destination: Coord,
    },
    /// A new turn was requested while the current player still has to move.
    #[error("the current turn is not complete")]
    TurnNotComplete,
    /// No human move is pending.
    #[error("no move is pending for the current player")]
    NotYourMove,
    /// An accusation was submitted with unset cards.
    #[error("accusation is missing: {}", missing.iter().map(|t| format!("{t:?}")).collect::<Vec<_>>().join(", "))]
    IncompleteAccusation {
        /// Card types left unset.
        missing: Vec<CardType>,
    },
    /// A card was supplied in a slot of another type.
    #[error("'{card}' is not a {expected:?} card")]
    WrongCardType {
        /// Card name.
        card: String,
        /// Type the slot requires.
        expected: CardType,
    },
    /// Suggestions can only be made from a room center.
    #[error("suggestions can only be made from inside a room")]
    NotInRoom,
    /// Suggestions are limited to one per turn, after moving.
    #[error("a suggestion is not allowed right now")]
    AlreadySuggested,
    /// Suggestions for computer seats are made by the computer itself.
    #[error("the current player is computer controlled")]
    ComputerControlled,
    /// The current player was eliminated by a wrong accusation.
    #[error("the current player has been eliminated")]
    Eliminated,
    /// The game has ended.
    #[error("the game is over")]
    GameOver,
}

/// Kinds of malformed setup lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupLineError {
    /// Record has the wrong number of comma-separated fields.
    #[error("'{record}' records take {expected} fields, found {found}")]
    WrongFieldCount {
        /// Record type.
        record: String,
        /// Required field count.
        expected: usize,
        /// Fields present.
        found: usize,
    },
    /// Unknown record type.
    #[error("unknown record type '{0}'")]
    UnknownRecord(String),
    /// Initial is empty or longer than one character.
    #[error("'{0}' is not a single-character initial")]
    BadInitial(String),
    /// `W` and `X` are reserved for walkway and unused tiles.
    #[error("initial '{0}' is reserved")]
    ReservedInitial(char),
    /// A room initial is declared twice.
    #[error("initial '{0}' is declared twice")]
    DuplicateInitial(char),
    /// A numeric field does not parse.
    #[error("'{0}' is not a valid number")]
    BadNumber(String),
}

/// Kinds of malformed layout rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutRowError {
    /// Layout contains no rows.
    #[error("layout is empty")]
    Empty,
    /// Row width differs from the first row.
    #[error("expected {expected} tiles, found {found}")]
    WrongWidth {
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },
    /// A tile token is empty or longer than two characters.
    #[error("tile '{0}' is not one or two characters")]
    BadToken(String),
    /// A tile's first character is not a known initial.
    #[error("unknown tile initial '{0}'")]
    UnknownInitial(char),
    /// A walkway or unused tile carries an unknown modifier.
    #[error("tile '{0}' has an invalid modifier")]
    BadModifier(String),
    /// A secret passage leads to an unregistered room.
    #[error("secret passage to unknown room '{0}'")]
    BadSecretPassage(char),
}

/// Failure while reading layout or setup text.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A setup line is malformed (1-based line number).
    #[error("malformed setup at line {line}: {kind}")]
    Setup {
        /// Offending line.
        line: usize,
        /// What is wrong with it.
        kind: SetupLineError,
    },
    /// A layout row is malformed (0-based row index).
    #[error("malformed layout at row {row}: {kind}")]
    Layout {
        /// Offending row.
        row: usize,
        /// What is wrong with it.
        kind: LayoutRowError,
    },
}

/// Any error produced by the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed board.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// Malformed setup.
    #[error(transparent)]
    Setup(#[from] SetupError),
    /// Rejected turn request.
    #[error(transparent)]
    Turn(#[from] TurnError),
    /// Unreadable layout or setup text.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_accusation_lists_missing_types() {
        let err = TurnError::IncompleteAccusation {
            missing: vec![CardType::Weapon, CardType::Room],
        };
        assert_eq!(err.to_string(), "accusation is missing: Weapon, Room");
    }

    #[test]
    fn test_board_error_converts() {
        let err: Error = BoardError::EmptyBoard.into();
        assert!(matches!(err, Error::Board(BoardError::EmptyBoard)));
        assert_eq!(err.to_string(), "board has no cells");
    }
}
