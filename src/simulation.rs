//! Seeded all-computer games.
//!
//! Provides a pure function interface: `(seed, board, setup, config) -> GameResult`.
//! Every seat is handed to the engine, so a game needs no outside input and
//! the same arguments always produce the same result.

use serde::Serialize;

use crate::board::{Board, BoardSpec};
use crate::cards::Solution;
use crate::error::Result;
use crate::game::{Game, GameSetup, GameStatus, TurnReport};
use crate::invariants;
use crate::player::PlayerId;

/// Configuration for simulated games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Turns to play before the game is called unsolved.
    pub max_turns: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { max_turns: 500 }
    }
}

/// Final result of a simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// How the game ended.
    pub status: GameStatus,
    /// Seat of the winner, if anyone accused correctly.
    pub winner: Option<PlayerId>,
    /// Name of the winner.
    pub winner_name: Option<String>,
    /// Total turns played.
    pub turns_played: u32,
    /// Suggestions made.
    pub suggestions: u32,
    /// Suggestions nobody could refute.
    pub unrefuted_suggestions: u32,
    /// Wrong accusations made.
    pub wrong_accusations: u32,
    /// The hidden solution.
    pub solution: Solution,
}

/// Run a complete game with the given seed.
///
/// # Determinism
///
/// Given the same seed, board and setup, this function always produces the
/// same [`GameResult`].
///
/// # Errors
///
/// Returns an error if the board or setup is malformed.
pub fn run_game(
    seed: u64,
    spec: &BoardSpec,
    setup: &GameSetup,
    config: SimulationConfig,
) -> Result<GameResult> {
    let board = Board::new(spec)?;
    run_game_on(seed, board, setup, config, |_, _| {})
}

/// Run a complete game on a prebuilt board, calling `on_turn` after every turn.
///
/// Building the board once and cloning it per game saves work in batches.
///
/// # Errors
///
/// Returns an error if the setup is malformed.
#[tracing::instrument(level = "debug", skip(board, setup, on_turn))]
pub fn run_game_on(
    seed: u64,
    board: Board,
    setup: &GameSetup,
    config: SimulationConfig,
    mut on_turn: impl FnMut(&Game, &TurnReport),
) -> Result<GameResult> {
    let mut game = Game::with_board(board, &setup.all_computer(), seed)?;
    let mut suggestions = 0;
    let mut unrefuted_suggestions = 0;
    let mut wrong_accusations = 0;

    while !game.is_over() && game.turn() < config.max_turns {
        let report = game.advance_turn()?;
        if let Some(suggestion) = &report.suggestion {
            suggestions += 1;
            if suggestion.disproof.is_none() {
                unrefuted_suggestions += 1;
            }
        }
        if report.accusation.as_ref().is_some_and(|a| !a.correct) {
            wrong_accusations += 1;
        }
        invariants::assert_invariants(&game);
        on_turn(&game, &report);
    }

    let winner = match game.status() {
        GameStatus::Won { winner } => Some(winner),
        GameStatus::InProgress | GameStatus::Unsolved => None,
    };
    let status = match game.status() {
        GameStatus::InProgress => GameStatus::Unsolved,
        done => done,
    };
    tracing::info!(seed, turns = game.turn(), ?winner, "game finished");

    Ok(GameResult {
        seed,
        status,
        winner,
        winner_name: winner.and_then(|id| game.player(id)).map(|p| p.name.clone()),
        turns_played: game.turn(),
        suggestions,
        unrefuted_suggestions,
        wrong_accusations,
        solution: game.solution().clone(),
    })
}
