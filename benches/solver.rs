//! Benchmarks for the peg solitaire search.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pegsearch::board::{COLUMN_ENDGAME, ENGLISH};
use pegsearch::grid::canonical_state;
use pegsearch::solver::{solve, SearchConfig};
use pegsearch::space::generate_moves;
use pegsearch::{Algorithm, BoardTopology, HeuristicKind, PegSolitaire};

/// Benchmark successor generation on the opening position.
fn bench_generate_moves(c: &mut Criterion) {
    let topology = BoardTopology::from_raw(ENGLISH.cells).unwrap();
    let state = canonical_state(ENGLISH.cells).unwrap();

    c.bench_function("generate_moves_english", |b| {
        b.iter(|| generate_moves(black_box(&topology), black_box(&state)))
    });
}

/// Benchmark decoding the raw English board.
fn bench_canonical_state(c: &mut Criterion) {
    c.bench_function("canonical_state_english", |b| {
        b.iter(|| canonical_state(black_box(ENGLISH.cells)))
    });
}

/// Benchmark A* on the column endgame.
fn bench_solve_column(c: &mut Criterion) {
    let (space, initial) = PegSolitaire::from_definition(&COLUMN_ENDGAME, None).unwrap();

    c.bench_function("astar_column_endgame", |b| {
        b.iter(|| {
            let scheduler = space.scheduler(Algorithm::AStar, HeuristicKind::RemainingCount);
            solve(
                &space,
                scheduler,
                SearchConfig::default(),
                black_box(initial),
            )
        })
    });
}

/// Benchmark a bounded uniform cost search on the full English board.
fn bench_bounded_english(c: &mut Criterion) {
    let (space, initial) = PegSolitaire::from_definition(&ENGLISH, None).unwrap();
    let config = SearchConfig::default().with_max_expansions(10_000);

    let mut group = c.benchmark_group("english");
    group.sample_size(10);
    for algorithm in [Algorithm::UniformCost, Algorithm::GreedyBestFirst] {
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| {
                let scheduler = space.scheduler(algorithm, HeuristicKind::AverageDistance);
                solve(&space, scheduler, config.clone(), black_box(initial))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generate_moves,
    bench_canonical_state,
    bench_solve_column,
    bench_bounded_english
);
criterion_main!(benches);
