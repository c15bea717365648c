//! Criterion benchmarks for the schedule optimizer.
//!
//! Uses random Euclidean instances so timings reflect the annealing loop
//! and cost evaluation rather than any particular data set.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use u_siteplan::cost::CostModel;
use u_siteplan::models::{CostMatrix, ScheduleState, Site};
use u_siteplan::sa::{ScheduleConfig, ScheduleOptimizer};
use u_siteplan::ScheduleProblem;

fn euclidean_problem(n_sites: usize, seed: u64) -> ScheduleProblem {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..n_sites)
        .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect();
    let edges = CostMatrix::from_fn(n_sites, |i, j| {
        let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
        (dx * dx + dy * dy).sqrt()
    })
    .unwrap();
    let sites = (0..n_sites).map(|i| Site::new(i, format!("site {i}"))).collect();
    ScheduleProblem::new(sites, edges, None).unwrap()
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    for &n_sites in &[10usize, 30, 60] {
        let problem = euclidean_problem(n_sites, 7);
        let config = ScheduleConfig::default()
            .with_max_stops_per_day(5)
            .with_annealing_iters(1_000)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n_sites),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = ScheduleOptimizer::run(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_total_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("total_cost");

    for &n_sites in &[30usize, 120] {
        let problem = euclidean_problem(n_sites, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let state = ScheduleState::random(n_sites, n_sites.div_ceil(6), 6, &mut rng).unwrap();
        let model: CostModel<'_> = problem.cost_model();
        group.bench_with_input(BenchmarkId::from_parameter(n_sites), &state, |b, s| {
            b.iter(|| black_box(model.total_cost(black_box(s))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solve, bench_total_cost);
criterion_main!(benches);
