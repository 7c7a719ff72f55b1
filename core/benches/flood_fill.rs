use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use hexsweeper_core::*;
use rand::prelude::*;

fn build_board(c: &mut Criterion) {
    let size = GameConfig::CLASSIC.size;
    c.bench_function("build classic board", |b| {
        b.iter(|| Board::new(black_box(size)).unwrap())
    });
}

fn place_mines(c: &mut Criterion) {
    let config = GameConfig::CLASSIC;
    let mut board = Board::new(config.size).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    c.bench_function("place classic mines", |b| {
        b.iter(|| board.place_mines(black_box(config.mines), &mut rng).unwrap())
    });
}

fn cascade_empty_board(c: &mut Criterion) {
    let board = Board::new(GameConfig::CLASSIC.size).unwrap();
    c.bench_function("cascade across empty classic board", |b| {
        b.iter_batched(
            || GameEngine::new(board.clone()),
            |mut engine| engine.reveal(black_box(0)).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, build_board, place_mines, cascade_empty_board);
criterion_main!(benches);
