#![no_main]

//! Turn sequence fuzzer.
//!
//! Drives a classic game with a human seat through arbitrary sequences of
//! turn operations, valid or not. After every step the session invariants
//! must hold, and a rejected request must leave positions untouched.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sleuth::board::Coord;
use sleuth::cards::{Accusation, CardType};
use sleuth::game::Game;
use sleuth::invariants::check_invariants;
use sleuth::loader;

/// A fuzzer-generated request.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzAction {
    /// Start the next turn.
    Advance,
    /// Move to the n-th current target.
    MoveToTarget(u8),
    /// Move to any cell, usually invalid.
    MoveTo(u8, u8),
    /// Suggest the n-th person and weapon card.
    Suggest(u8, u8),
    /// Accuse with cards picked by index; `None` leaves a slot empty.
    Accuse(Option<u8>, Option<u8>, Option<u8>),
}

/// Structured input for turn fuzzing.
#[derive(Arbitrary, Debug)]
struct TurnInput {
    seed: u64,
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: TurnInput| {
    let (spec, setup) = loader::classic().expect("classic board loads");
    let mut game = Game::new(&spec, &setup, input.seed).expect("classic game deals");
    let cards = game.cards().to_vec();
    let pick = |kind: CardType, n: u8| {
        let pool: Vec<_> = cards.iter().filter(|card| card.kind == kind).collect();
        pool[usize::from(n) % pool.len()].clone()
    };

    for action in input.actions.into_iter().take(200) {
        let before: Vec<Coord> = game.players().iter().map(|p| p.position).collect();
        let result = match action {
            FuzzAction::Advance => game.advance_turn().map(|_| ()),
            FuzzAction::MoveToTarget(n) => {
                let targets: Vec<Coord> = game.targets().iter().copied().collect();
                let destination = if targets.is_empty() {
                    Coord::new(0, 0)
                } else {
                    targets[usize::from(n) % targets.len()]
                };
                game.move_current_player(destination)
            }
            FuzzAction::MoveTo(r, c) => game.move_current_player(Coord::new(u16::from(r), u16::from(c))),
            FuzzAction::Suggest(p, w) => game
                .suggest(pick(CardType::Person, p), pick(CardType::Weapon, w))
                .map(|_| ()),
            FuzzAction::Accuse(p, w, r) => {
                let mut draft = Accusation::new();
                for (slot, kind) in [(p, CardType::Person), (w, CardType::Weapon), (r, CardType::Room)] {
                    if let Some(n) = slot {
                        draft = draft.with(pick(kind, n));
                    }
                }
                game.accuse(draft).map(|_| ())
            }
        };

        if result.is_err() {
            let after: Vec<Coord> = game.players().iter().map(|p| p.position).collect();
            assert_eq!(before, after, "rejected request moved a token");
        }
        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{violations:?}");
    }
});
