//! Benchmarks for legal-move generation.
//!
//! Compares materializing every move against stopping at the first one.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rust_ludeme::core::{BoardConfig, GameConfig, GameRng};
use rust_ludeme::functions::ints::Mover;
use rust_ludeme::functions::regions::{SitesEmpty, SitesOccupied};
use rust_ludeme::game::Game;
use rust_ludeme::moves::{Add, And, FromTo};
use rust_ludeme::{Context, Rules};

fn board_game(size: usize) -> Game {
    Game::from_config(GameConfig::new("bench", 2, BoardConfig::square(size, size)).with_player_pieces("Stone"))
        .unwrap()
}

/// Place anywhere empty, or slide any piece to any empty site.
fn rules(game: &Game) -> Rules {
    let place = Box::new(Add::new(Box::new(Mover), Box::new(SitesEmpty::board())));
    let slide = Box::new(FromTo::new(Box::new(SitesOccupied::any()), Box::new(SitesEmpty::board())));
    Rules::compile(game, Box::new(And::new(place, slide))).unwrap()
}

/// A position a few plies into a seeded playout.
fn midgame<'g>(game: &'g Game, rules: &Rules, plies: usize) -> Context<'g> {
    let mut context = Context::new(game, GameRng::new(7));
    for _ in 0..plies {
        let moves = rules.legal_moves(&mut context);
        let Some(mv) = context.rng_mut().choose(moves.as_slice()).cloned() else {
            break;
        };
        rules.play(&mut context, &mv);
    }
    context
}

fn bench_legal_moves(c: &mut Criterion) {
    let game = board_game(9);
    let rules = rules(&game);
    let mut context = midgame(&game, &rules, 20);

    c.bench_function("legal_moves_9x9", |b| {
        b.iter(|| black_box(rules.legal_moves(black_box(&mut context))));
    });
}

fn bench_any_legal_move(c: &mut Criterion) {
    let game = board_game(9);
    let rules = rules(&game);
    let mut context = midgame(&game, &rules, 20);

    c.bench_function("eager_is_empty_9x9", |b| {
        b.iter(|| black_box(rules.legal_moves(black_box(&mut context)).is_empty()));
    });

    c.bench_function("lazy_can_move_9x9", |b| {
        b.iter(|| black_box(rules.can_move(black_box(&mut context))));
    });
}

fn bench_playout(c: &mut Criterion) {
    let game = board_game(5);
    let rules = rules(&game);

    c.bench_function("playout_5x5_30_plies", |b| {
        b.iter(|| black_box(midgame(&game, &rules, black_box(30))));
    });
}

criterion_group!(benches, bench_legal_moves, bench_any_legal_move, bench_playout);
criterion_main!(benches);
