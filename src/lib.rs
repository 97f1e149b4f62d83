// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Sleuth: a deterministic engine for Clue-style deduction board games.
//!
//! The crate models the board as a graph of cells, finds every cell a token
//! can reach with an exact die roll, and runs the deduction loop of
//! suggestions, disproofs and accusations against a hidden solution.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Simulation / CLI host           │
//! ├─────────────────────────────────────┤
//! │  Game session (turn controller)     │
//! ├──────────────────┬──────────────────┤
//! │ Board + targets  │ Cards + deduction│
//! └──────────────────┴──────────────────┘
//! ```
//!
//! The core consumes an already validated [`BoardSpec`](board::BoardSpec) and
//! [`GameSetup`](game::GameSetup). The [`loader`] module turns the classic text
//! files into those structures.

pub mod board;
pub mod cards;
pub mod deduction;
pub mod error;
pub mod game;
pub mod invariants;
pub mod loader;
pub mod player;
pub mod simulation;

pub use error::{Error, Result};

// Re-export key types at crate root for convenience
pub use board::{Board, BoardSpec, Coord};
pub use cards::{Accusation, Card, CardType, Guess, Solution};
pub use game::{Game, GameSetup, GameStatus, TurnPhase};
pub use player::{Controller, Player, PlayerId};
