//! Benchmarks for running complete games.
//!
//! This benchmarks the full simulation loop used by the tournament command.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sleuth::board::Board;
use sleuth::game::Game;
use sleuth::loader;
use sleuth::simulation::{SimulationConfig, run_game, run_game_on};

fn bench_single_game(c: &mut Criterion) {
    let (spec, setup) = loader::classic().unwrap();
    let config = SimulationConfig::default();

    c.bench_function("single_game_classic", |b| {
        b.iter(|| {
            let result = run_game(black_box(42), black_box(&spec), black_box(&setup), black_box(config));
            black_box(result)
        });
    });
}

fn bench_game_batch(c: &mut Criterion) {
    // Build the board once, as the tournament does
    let (spec, setup) = loader::classic().unwrap();
    let board = Board::new(&spec).unwrap();
    let config = SimulationConfig::default();

    c.bench_function("10_games_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = run_game_on(black_box(seed), board.clone(), &setup, config, |_, _| {});
                black_box(result).ok();
            }
        });
    });
}

fn bench_game_setup(c: &mut Criterion) {
    let (spec, setup) = loader::classic().unwrap();

    c.bench_function("board_build_and_deal", |b| {
        b.iter(|| {
            let game = Game::new(black_box(&spec), black_box(&setup), black_box(7));
            black_box(game)
        });
    });
}

criterion_group!(benches, bench_single_game, bench_game_batch, bench_game_setup);
criterion_main!(benches);
