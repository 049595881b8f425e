//! Benchmarks for the MOISMCTS search.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kariba_mcts::core::PlayerId;
use kariba_mcts::game::{GameConfig, GameState};
use kariba_mcts::mcts::{Search, SearchConfig};

fn small_root() -> GameState {
    GameState::builder(GameConfig::new(2, 2, 2))
        .deck(&[4, 4])
        .hand(PlayerId::new(0), &[1, 1])
        .hand(PlayerId::new(1), &[2, 0])
        .build()
}

fn standard_root() -> GameState {
    let mut state = GameState::new(GameConfig::default());
    let mut rng = kariba_mcts::core::GameRng::new(42);

    // Deal both opening hands so the root is a decision point.
    for _ in 0..2 {
        let draw = state.random_draw(&mut rng).expect("fresh deck");
        state.apply_event(&draw);
        state.advance_turn();
    }
    state
}

fn small_game_benchmark(c: &mut Criterion) {
    let root = small_root();

    c.bench_function("small_game_200_iterations", |b| {
        b.iter(|| {
            let mut search = Search::new(SearchConfig::default().with_seed(42));
            search.run(black_box(&root), 200)
        })
    });
}

fn standard_game_benchmark(c: &mut Criterion) {
    let root = standard_root();

    c.bench_function("standard_game_100_iterations", |b| {
        b.iter(|| {
            let mut search = Search::new(SearchConfig::default().with_seed(42));
            search.run(black_box(&root), 100)
        })
    });
}

criterion_group!(benches, small_game_benchmark, standard_game_benchmark);
criterion_main!(benches);
