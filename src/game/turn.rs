//! The turn controller: roll, move, suggest, accuse, advance.

use rand::Rng;
use serde::Serialize;

use super::Game;
use crate::board::Coord;
use crate::cards::{Accusation, Card, CardType, Guess};
use crate::deduction::{self, Disproof};
use crate::error::TurnError;
use crate::player::{Controller, PlayerId};

/// Faces on the die. Rolls are uniform over `1..=DICE_SIDES`.
pub const DICE_SIDES: u32 = 6;

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnPhase {
    /// The current player has not rolled yet.
    AwaitingRoll,
    /// Targets are computed and a human must pick one.
    AwaitingHumanChoice,
    /// The player has moved (or could not). The next turn may start.
    TurnComplete,
}

/// Whether the game has ended and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    /// Turns are still being played.
    InProgress,
    /// A correct accusation was made.
    Won {
        /// Seat of the winner.
        winner: PlayerId,
    },
    /// Every player accused wrongly.
    Unsolved,
}

/// What came of a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionOutcome {
    /// Who suggested.
    pub suggester: PlayerId,
    /// The suggestion, room included.
    pub guess: Guess,
    /// The card shown to the suggester, if anyone could refute.
    pub disproof: Option<Disproof>,
    /// Seat whose token was pulled into the room.
    pub dragged: Option<PlayerId>,
}

/// What came of an accusation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccusationOutcome {
    /// Who accused.
    pub player: PlayerId,
    /// The accusation.
    pub guess: Guess,
    /// Whether it matched the solution.
    pub correct: bool,
}

/// Summary of one call to [`Game::advance_turn`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// Turn number, starting at 1.
    pub turn: u32,
    /// Seat whose turn it is.
    pub player: PlayerId,
    /// The roll, absent if the player accused before rolling.
    pub roll: Option<u32>,
    /// Size of the target set.
    pub targets: usize,
    /// Position at the start of the turn.
    pub from: Coord,
    /// Where a computer player moved.
    pub moved_to: Option<Coord>,
    /// Whether a human choice is now pending.
    pub awaiting_choice: bool,
    /// A computer suggestion made this turn.
    pub suggestion: Option<SuggestionOutcome>,
    /// A computer accusation made this turn.
    pub accusation: Option<AccusationOutcome>,
}

impl Game {
    /// Start the next turn.
    ///
    /// Rotates to the next active player (unless no turn has been played
    /// yet), rolls the die and computes targets. A human player is left
    /// waiting for [`Game::move_current_player`]. A computer player accuses
    /// if it has deduced the solution, otherwise moves and, if it ends in a
    /// room, suggests.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::TurnNotComplete`] while a human move is pending and
    /// [`TurnError::GameOver`] once the game has ended.
    pub fn advance_turn(&mut self) -> Result<TurnReport, TurnError> {
        self.ensure_in_progress()?;
        match self.phase {
            TurnPhase::AwaitingHumanChoice => return Err(TurnError::TurnNotComplete),
            TurnPhase::TurnComplete => {
                self.current = self.next_active(self.current).ok_or(TurnError::GameOver)?;
            }
            TurnPhase::AwaitingRoll => {}
        }

        self.turn += 1;
        self.roll = 0;
        self.targets.clear();
        self.suggested = false;
        self.last_suggestion = None;
        self.last_disprover = None;

        let id = self.current;
        let from = self.players[id].position;
        let controller = self.players[id].controller;
        tracing::info!(turn = self.turn, player = %self.players[id].name, "turn started");

        let mut report = TurnReport {
            turn: self.turn,
            player: id,
            roll: None,
            targets: 0,
            from,
            moved_to: None,
            awaiting_choice: false,
            suggestion: None,
            accusation: None,
        };

        let deduced = match controller {
            Controller::Computer => self.players[id].deduced_solution(&self.cards),
            Controller::Human => None,
        };
        if let Some(guess) = deduced {
            report.accusation = Some(self.resolve_accusation(guess));
            return Ok(report);
        }

        let roll = self.rng.gen_range(1..=DICE_SIDES);
        self.roll = roll;
        self.targets = self.board.compute_targets(from, roll);
        let player = &mut self.players[id];
        if player.can_stay {
            if self.board.is_room_center(from) {
                self.targets.insert(from);
            }
            player.can_stay = false;
        }
        report.roll = Some(roll);
        report.targets = self.targets.len();
        tracing::debug!(roll, targets = self.targets.len(), "rolled");

        match controller {
            Controller::Human if !self.targets.is_empty() => {
                self.phase = TurnPhase::AwaitingHumanChoice;
                report.awaiting_choice = true;
            }
            Controller::Human => {
                tracing::debug!("no targets, turn ends in place");
                self.phase = TurnPhase::TurnComplete;
            }
            Controller::Computer => {
                let choice = self.players[id].select_target(&self.board, &self.targets, &mut self.rng);
                if let Some(to) = choice {
                    self.relocate(id, to);
                    report.moved_to = Some(to);
                }
                self.phase = TurnPhase::TurnComplete;

                let guess = self.players[id].create_suggestion(&self.board, &self.cards, &mut self.rng);
                if let Some(guess) = guess {
                    report.suggestion = Some(self.resolve_suggestion(guess));
                }
            }
        }
        Ok(report)
    }

    /// Move the current human player to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::NotYourMove`] if no human choice is pending and
    /// [`TurnError::InvalidMove`] if `destination` is not a current target.
    /// Nothing changes on error.
    pub fn move_current_player(&mut self, destination: Coord) -> Result<(), TurnError> {
        self.ensure_in_progress()?;
        if self.phase != TurnPhase::AwaitingHumanChoice {
            return Err(TurnError::NotYourMove);
        }
        if !self.targets.contains(&destination) {
            return Err(TurnError::InvalidMove { destination });
        }
        self.relocate(self.current, destination);
        self.phase = TurnPhase::TurnComplete;
        Ok(())
    }

    /// Suggest `person` with `weapon` in the current player's room.
    ///
    /// Allowed once per turn after moving, from a room center. The suggested
    /// person's token is pulled into the room and the first refuting card is
    /// shown to the suggester.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::WrongCardType`] for a mistyped card,
    /// [`TurnError::AlreadySuggested`] before moving or after a suggestion or
    /// accusation this turn, [`TurnError::NotInRoom`] off a room center and
    /// [`TurnError::ComputerControlled`] on a computer player's turn.
    pub fn suggest(&mut self, person: Card, weapon: Card) -> Result<SuggestionOutcome, TurnError> {
        self.ensure_in_progress()?;
        if self.players[self.current].controller == Controller::Computer {
            return Err(TurnError::ComputerControlled);
        }
        expect_kind(&person, CardType::Person)?;
        expect_kind(&weapon, CardType::Weapon)?;
        if self.phase != TurnPhase::TurnComplete || self.suggested {
            return Err(TurnError::AlreadySuggested);
        }
        let position = self.players[self.current].position;
        if !self.board.is_room_center(position) {
            return Err(TurnError::NotInRoom);
        }
        let room = self
            .board
            .room_at(position)
            .map(|room| Card::room(room.name.as_str()))
            .ok_or(TurnError::NotInRoom)?;
        Ok(self.resolve_suggestion(Guess::new(person, weapon, room)))
    }

    /// Accuse on behalf of the current player.
    ///
    /// A correct accusation wins. A wrong one eliminates the player from the
    /// rotation; the game ends unsolved when nobody is left. Either way the
    /// turn is over.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::IncompleteAccusation`] if a slot is unset,
    /// [`TurnError::WrongCardType`] if a slot holds the wrong type and
    /// [`TurnError::Eliminated`] if the current player already accused wrongly.
    pub fn accuse(&mut self, accusation: Accusation) -> Result<AccusationOutcome, TurnError> {
        self.ensure_in_progress()?;
        if !self.players[self.current].is_active() {
            return Err(TurnError::Eliminated);
        }
        let guess = accusation.complete()?;
        for kind in CardType::ALL {
            expect_kind(guess.get(kind), kind)?;
        }
        Ok(self.resolve_accusation(guess))
    }

    fn ensure_in_progress(&self) -> Result<(), TurnError> {
        if self.is_over() {
            return Err(TurnError::GameOver);
        }
        Ok(())
    }

    fn resolve_suggestion(&mut self, guess: Guess) -> SuggestionOutcome {
        let suggester = self.current;
        let room = self.players[suggester].position;

        let dragged = self
            .players
            .iter()
            .position(|player| player.name == guess.person.name)
            .filter(|&id| id != suggester && self.players[id].position != room);
        if let Some(id) = dragged {
            self.relocate(id, room);
            self.players[id].can_stay = true;
        }

        let disproof = deduction::disprove_suggestion(&self.players, suggester, &guess);
        if let Some(shown) = &disproof {
            self.players[suggester].add_seen(shown.card.clone());
        }
        tracing::debug!(
            player = %self.players[suggester].name,
            suggestion = %guess,
            disprover = ?disproof.as_ref().map(|d| d.holder),
            "suggestion"
        );

        self.suggested = true;
        self.last_suggestion = Some(guess.clone());
        self.last_disprover = disproof.as_ref().map(|shown| shown.holder);
        SuggestionOutcome {
            suggester,
            guess,
            disproof,
            dragged,
        }
    }

    fn resolve_accusation(&mut self, guess: Guess) -> AccusationOutcome {
        let player = self.current;
        let correct = deduction::check_accusation(&self.solution, &guess);
        if correct {
            self.status = GameStatus::Won { winner: player };
            tracing::info!(player = %self.players[player].name, accusation = %guess, "correct accusation, game over");
        } else {
            self.players[player].eliminated = true;
            tracing::info!(player = %self.players[player].name, accusation = %guess, "wrong accusation, player eliminated");
            if self.players.iter().all(|p| p.eliminated) {
                self.status = GameStatus::Unsolved;
                tracing::info!("every player eliminated, game over");
            }
        }
        self.phase = TurnPhase::TurnComplete;
        self.targets.clear();
        self.suggested = true;
        AccusationOutcome {
            player,
            guess,
            correct,
        }
    }
}

fn expect_kind(card: &Card, expected: CardType) -> Result<(), TurnError> {
    if card.kind == expected {
        Ok(())
    } else {
        Err(TurnError::WrongCardType {
            card: card.name.clone(),
            expected,
        })
    }
}
