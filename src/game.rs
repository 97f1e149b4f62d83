//! The game session: board, players, deck and turn state.

mod setup;
mod turn;

pub use setup::{GameSetup, Seat, SetupRecord};
pub use turn::{AccusationOutcome, DICE_SIDES, GameStatus, SuggestionOutcome, TurnPhase, TurnReport};

use std::collections::{BTreeSet, HashSet};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::board::{Board, BoardSpec, Coord};
use crate::cards::{Card, Deck, Guess, Solution};
use crate::deduction::{self, Disproof};
use crate::error::{Result, SetupError};
use crate::player::{Player, PlayerId};

/// A single game in progress.
///
/// Owns the board, players, solution and turn state. All mutation goes
/// through the turn operations, so any number of sessions can coexist.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: Vec<Player>,
    /// Every card in play, including the solution.
    cards: Vec<Card>,
    solution: Solution,
    /// Cards left over after dealing.
    undealt: Vec<Card>,
    rng: StdRng,
    seed: u64,
    current: PlayerId,
    roll: u32,
    targets: BTreeSet<Coord>,
    phase: TurnPhase,
    turn: u32,
    suggested: bool,
    last_suggestion: Option<Guess>,
    last_disprover: Option<PlayerId>,
    status: GameStatus,
}

impl Game {
    /// Build the board from `spec` and start a session.
    ///
    /// # Errors
    ///
    /// Returns a board error if the board spec is malformed and a setup error if the
    /// setup cannot be dealt.
    pub fn new(spec: &BoardSpec, setup: &GameSetup, seed: u64) -> Result<Self> {
        let board = Board::new(spec)?;
        Ok(Self::with_board(board, setup, seed)?)
    }

    /// Start a session on an already built board.
    ///
    /// The solution is drawn and the hands dealt from an RNG seeded with
    /// `seed`, so the same inputs always produce the same deal.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if nobody is seated, if a name repeats, if a
    /// start cell is off the board, not walkable or shared on a walkway, or if
    /// a card type has no cards.
    pub fn with_board(mut board: Board, setup: &GameSetup, seed: u64) -> Result<Self, SetupError> {
        if setup.seats.is_empty() {
            return Err(SetupError::NoPlayers);
        }

        let cards = Deck::from_names(
            board.rooms().iter().map(|room| room.name.as_str()),
            setup.weapons.iter().map(String::as_str),
            setup.seats.iter().map(|seat| seat.name.as_str()),
        )
        .into_cards();
        let mut distinct = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !distinct.insert(card) {
                return Err(SetupError::DuplicateName(card.name.clone()));
            }
        }

        for (i, seat) in setup.seats.iter().enumerate() {
            if !board.in_bounds(seat.start) {
                return Err(SetupError::StartOutOfBounds {
                    player: seat.name.clone(),
                    coord: seat.start,
                });
            }
            if !board.is_walkable(seat.start) {
                return Err(SetupError::StartNotWalkable {
                    player: seat.name.clone(),
                    coord: seat.start,
                });
            }
            if board.is_room_center(seat.start) {
                continue;
            }
            if let Some(first) = setup.seats[..i].iter().find(|other| other.start == seat.start) {
                return Err(SetupError::DuplicateStart {
                    first: first.name.clone(),
                    second: seat.name.clone(),
                    coord: seat.start,
                });
            }
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = Deck::new(cards.clone());
        let solution = deck.draw_solution(&mut rng)?;

        let mut players: Vec<Player> = setup
            .seats
            .iter()
            .map(|seat| Player::new(&*seat.name, &*seat.color, seat.controller(), seat.start))
            .collect();
        deck.deal(&mut players, &mut rng);

        board.clear_occupancy();
        for player in &players {
            board.set_occupied(player.position, true);
        }

        tracing::info!(
            seed,
            players = players.len(),
            cards = cards.len(),
            undealt = deck.len(),
            "game created"
        );

        Ok(Self {
            board,
            players,
            cards,
            solution,
            undealt: deck.into_cards(),
            rng,
            seed,
            current: 0,
            roll: 0,
            targets: BTreeSet::new(),
            phase: TurnPhase::AwaitingRoll,
            turn: 0,
            suggested: false,
            last_suggestion: None,
            last_disprover: None,
            status: GameStatus::InProgress,
        })
    }

    /// The board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// All players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Player by seat.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Every card in play, solution included.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The hidden solution. Meant for tests and debugging.
    #[must_use]
    pub const fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Cards nobody was dealt.
    #[must_use]
    pub fn undealt(&self) -> &[Card] {
        &self.undealt
    }

    /// Seed the session was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Seat of the player whose turn it is.
    #[must_use]
    pub const fn current_player_id(&self) -> PlayerId {
        self.current
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// The current roll, 0 before the first roll of a turn.
    #[must_use]
    pub const fn current_roll(&self) -> u32 {
        self.roll
    }

    /// Targets computed for the current roll.
    #[must_use]
    pub const fn targets(&self) -> &BTreeSet<Coord> {
        &self.targets
    }

    /// Where the current turn stands.
    #[must_use]
    pub const fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Whether the game is still going.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Number of turns started so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// The suggestion made this turn, if any.
    #[must_use]
    pub const fn last_suggestion(&self) -> Option<&Guess> {
        self.last_suggestion.as_ref()
    }

    /// Who disproved this turn's suggestion, if anyone.
    #[must_use]
    pub const fn last_disprover(&self) -> Option<PlayerId> {
        self.last_disprover
    }

    /// Compute targets on this session's board without touching turn state.
    #[must_use]
    pub fn compute_targets(&self, start: Coord, roll: u32) -> BTreeSet<Coord> {
        self.board.compute_targets(start, roll)
    }

    /// Ask the players after `suggester` to refute `guess`. Changes nothing.
    /// Returns `None` if `suggester` is not a seat.
    #[must_use]
    pub fn disprove_suggestion(&self, guess: &Guess, suggester: PlayerId) -> Option<Disproof> {
        deduction::disprove_suggestion(&self.players, suggester, guess)
    }

    /// Compare `guess` with the solution. Changes nothing.
    #[must_use]
    pub fn check_accusation(&self, guess: &Guess) -> bool {
        deduction::check_accusation(&self.solution, guess)
    }

    /// Next seat after `from` that can still play, possibly `from` itself.
    fn next_active(&self, from: PlayerId) -> Option<PlayerId> {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&seat| self.players[seat].is_active())
    }

    /// Move a token and keep occupancy in step with player positions.
    fn relocate(&mut self, id: PlayerId, to: Coord) {
        let from = self.players[id].position;
        self.players[id].position = to;
        let still_occupied = self.players.iter().any(|player| player.position == from);
        self.board.set_occupied(from, still_occupied);
        self.board.set_occupied(to, true);
        tracing::debug!(player = %self.players[id].name, %from, %to, "moved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::loader;

    #[test]
    fn test_classic_game_deal() {
        let (spec, setup) = loader::classic().unwrap();
        let game = Game::new(&spec, &setup, 42).unwrap();
        assert_eq!(game.players().len(), 6);
        assert_eq!(game.cards().len(), 21);
        assert!(game.undealt().is_empty());
        for player in game.players() {
            assert_eq!(player.hand().len(), 3);
            for card in game.solution().cards() {
                assert!(!player.holds(card));
            }
        }
        assert_eq!(game.phase(), TurnPhase::AwaitingRoll);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.check_accusation(&game.solution().clone()));
    }

    #[test]
    fn test_start_cells_are_occupied() {
        let (spec, setup) = loader::classic().unwrap();
        let game = Game::new(&spec, &setup, 1).unwrap();
        for player in game.players() {
            assert!(game.board().cell(player.position).unwrap().occupied);
        }
        let occupied = game.board().cells().iter().filter(|c| c.occupied).count();
        assert_eq!(occupied, game.players().len());
    }

    #[test]
    fn test_same_seed_same_deal() {
        let (spec, setup) = loader::classic().unwrap();
        let a = Game::new(&spec, &setup, 9).unwrap();
        let b = Game::new(&spec, &setup, 9).unwrap();
        assert_eq!(a.solution(), b.solution());
        for (x, y) in a.players().iter().zip(b.players()) {
            assert_eq!(x.hand(), y.hand());
        }
    }

    #[test]
    fn test_setup_errors() {
        let (spec, setup) = loader::classic().unwrap();

        let mut empty = setup.clone();
        empty.seats.clear();
        assert!(matches!(
            Game::new(&spec, &empty, 0),
            Err(Error::Setup(SetupError::NoPlayers))
        ));

        let mut no_weapons = setup.clone();
        no_weapons.weapons.clear();
        assert!(matches!(
            Game::new(&spec, &no_weapons, 0),
            Err(Error::Setup(SetupError::MissingCardType(_)))
        ));

        let mut twins = setup.clone();
        twins.weapons.push(twins.weapons[0].clone());
        assert!(matches!(
            Game::new(&spec, &twins, 0),
            Err(Error::Setup(SetupError::DuplicateName(_)))
        ));

        let mut off_board = setup.clone();
        off_board.seats[0].start = Coord::new(100, 0);
        assert!(matches!(
            Game::new(&spec, &off_board, 0),
            Err(Error::Setup(SetupError::StartOutOfBounds { .. }))
        ));

        let mut in_wall = setup.clone();
        in_wall.seats[0].start = Coord::new(1, 1);
        assert!(matches!(
            Game::new(&spec, &in_wall, 0),
            Err(Error::Setup(SetupError::StartNotWalkable { .. }))
        ));

        let mut shared = setup;
        shared.seats[1].start = shared.seats[0].start;
        assert!(matches!(
            Game::new(&spec, &shared, 0),
            Err(Error::Setup(SetupError::DuplicateStart { .. }))
        ));
    }

    #[test]
    fn test_shared_room_start_is_allowed() {
        let (spec, mut setup) = loader::classic().unwrap();
        setup.seats[0].start = Coord::new(2, 2);
        setup.seats[1].start = Coord::new(2, 2);
        let game = Game::new(&spec, &setup, 0).unwrap();
        assert!(game.board().cell_at(2, 2).unwrap().occupied);
    }
}
