//! Benchmarks for the engine's hot paths.
//!
//! Production and combat run every tick or turn; the AI decides once per AI
//! turn; whole autoplay runs are what `batch` executes in bulk.

#![allow(missing_docs)]
#![allow(clippy::cast_possible_truncation)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use spacewars::autoplay::{AutoplayConfig, run_autoplay};
use spacewars::config::{GameConfig, level_config};
use spacewars::game::{
    AttackPercentage, GameState, apply_production, decide, generate_board, resolve_attack,
};

fn level_state(level: u32, seed: u64) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::generate(level, "bench", &GameConfig::default(), &mut rng, 0)
        .unwrap_or_else(|e| panic!("level {level} failed to generate: {e}"));
    for (i, planet) in state.planets.iter_mut().enumerate() {
        planet.set_soldiers(10 + (i as u32 * 7) % 60);
    }
    state
}

fn bench_generate_board(c: &mut Criterion) {
    let table = level_config(20);
    let players = spacewars::game::create_players("bench", table.ai_players, table.ai_difficulty);
    let config = GameConfig::default();

    c.bench_function("generate_board_level_20", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        b.iter(|| black_box(generate_board(black_box(20), &players, &config, &mut rng, 0)));
    });
}

fn bench_production_tick(c: &mut Criterion) {
    let state = level_state(20, 42);

    c.bench_function("production_tick_30_planets", |b| {
        let mut planets = state.planets.clone();
        let mut now = 0;
        b.iter(|| {
            now += 1000;
            black_box(apply_production(&mut planets, now, 1000, 120.0))
        });
    });
}

fn bench_resolve_attack(c: &mut Criterion) {
    let state = level_state(20, 42);

    c.bench_function("resolve_attack", |b| {
        b.iter(|| {
            let mut planets = state.planets.clone();
            black_box(resolve_attack(&mut planets, black_box(&[0]), black_box(9), AttackPercentage::Full))
        });
    });
}

fn bench_ai_decision(c: &mut Criterion) {
    let state = level_state(20, 42);
    let ai = &state.players[1];

    c.bench_function("ai_decide_level_20", |b| {
        b.iter(|| black_box(decide(black_box(&state.planets), ai.id, ai.difficulty(), 20)));
    });
}

fn bench_autoplay_run(c: &mut Criterion) {
    let autoplay = AutoplayConfig {
        max_levels: 3,
        check_invariants: false,
        ..AutoplayConfig::default()
    };

    let mut group = c.benchmark_group("autoplay");
    group.sample_size(10);
    group.bench_function("three_levels", |b| {
        b.iter(|| black_box(run_autoplay(black_box(42), &autoplay, GameConfig::default())));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_generate_board,
    bench_production_tick,
    bench_resolve_attack,
    bench_ai_decision,
    bench_autoplay_run
);
criterion_main!(benches);
