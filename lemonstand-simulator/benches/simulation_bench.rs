#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use lemonstand_core::plan::Recipe;
use lemonstand_core::stand::StandState;
use lemonstand_simulator::{GreedyPolicy, RandomPolicy, SimulationEngine};

/// Benchmark a full simulated year under the greedy policy.
fn benchmark_greedy_year(c: &mut Criterion) {
    let days = 365;
    let seed = 42;

    c.bench_function("greedy_year", |b| {
        b.iter(|| {
            let state = StandState::new(20.0, Recipe::default(), 0.25);
            let mut engine = SimulationEngine::new(seed, state);
            let mut policy = GreedyPolicy::default();
            black_box(engine.run_days(days, &mut policy).map(|d| d.len()).ok());
        })
    });
}

/// Random plans hit the rejection path, so days are played one at a time.
fn benchmark_random_plans(c: &mut Criterion) {
    c.bench_function("random_plans_100_days", |b| {
        b.iter(|| {
            let state = StandState::new(20.0, Recipe::default(), 0.25);
            let mut engine = SimulationEngine::new(7, state);
            let mut policy = RandomPolicy::new(7);
            let mut committed = 0u32;
            for _ in 0..100 {
                if engine.run_day(&mut policy).is_ok() {
                    committed += 1;
                }
            }
            black_box(committed);
        })
    });
}

criterion_group!(benches, benchmark_greedy_year, benchmark_random_plans);
criterion_main!(benches);
