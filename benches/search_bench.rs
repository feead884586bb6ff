use checkers_engine::agent::ai::{CheckersRules, SearchConfig, SearchDriver};
use checkers_engine::game_repr::BoardState;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn driver(max_depth: u32) -> SearchDriver<CheckersRules> {
    let config = SearchConfig {
        max_depth,
        seed: Some(7),
        ..SearchConfig::default()
    };
    SearchDriver::new(CheckersRules::with_cache_capacity(config.cache_capacity), config).unwrap()
}

fn bench_search_depth_4(c: &mut Criterion) {
    let board = BoardState::starting();
    let mut driver = driver(4);
    c.bench_function("search depth 4", |b| b.iter(|| black_box(driver.choose_move(&board).unwrap())));
}

fn bench_search_default_depth(c: &mut Criterion) {
    let board = BoardState::starting();
    let mut driver = driver(7);
    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    group.bench_function("default depth", |b| b.iter(|| black_box(driver.choose_move(&board).unwrap())));
    group.finish();
}

criterion_group!(benches, bench_search_depth_4, bench_search_default_depth);
criterion_main!(benches);
