//! Criterion benchmarks for the TSP genetic algorithm.
//!
//! Uses synthetic instances (cities on a jittered grid) so the numbers
//! measure algorithm overhead only.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_tspga::distance::DistanceMatrix;
use u_tspga::ga::{operators, seed::nearest_neighbor, TspGaConfig, TspGaRunner};
use u_tspga::random::create_rng;

fn grid_coords(n: usize) -> Vec<(i64, i64)> {
    let mut rng = create_rng(42);
    let side = (n as f64).sqrt().ceil() as i64;
    (0..n as i64)
        .map(|i| {
            let x = (i % side) * 100 + rng.random_range(0..50);
            let y = (i / side) * 100 + rng.random_range(0..50);
            (x, y)
        })
        .collect()
}

fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_matrix");
    for &n in &[48usize, 200, 500] {
        let coords = grid_coords(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &coords, |b, coords| {
            b.iter(|| black_box(DistanceMatrix::from_coordinates(black_box(coords))))
        });
    }
    group.finish();
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_neighbor");
    for &n in &[48usize, 200, 500] {
        let m = DistanceMatrix::from_coordinates(&grid_coords(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &m, |b, m| {
            b.iter(|| black_box(nearest_neighbor(black_box(m))))
        });
    }
    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    let n = 100;
    let m = DistanceMatrix::from_coordinates(&grid_coords(n));
    let a: Vec<usize> = (0..n).collect();
    let b: Vec<usize> = (0..n).rev().collect();

    c.bench_function("edge_recombination_100", |bench| {
        let mut rng = create_rng(1);
        bench.iter(|| black_box(operators::edge_recombination(&a, &b, &m, &mut rng)))
    });

    c.bench_function("two_opt_mutation_100x100", |bench| {
        let mut rng = create_rng(1);
        let mut tour = a.clone();
        bench.iter(|| black_box(operators::two_opt_mutation(&mut tour, &m, 100, &mut rng)))
    });
}

fn bench_ga(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_run");
    group.sample_size(10);

    for (n, pop, gen) in [(48usize, 100usize, 100usize), (100, 100, 50)] {
        let m = DistanceMatrix::from_coordinates(&grid_coords(n));
        let config = TspGaConfig::default()
            .with_population_size(pop)
            .with_generations(gen)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_g{}", n, pop, gen), n),
            &(m, config),
            |b, (m, c)| {
                b.iter(|| {
                    let result = TspGaRunner::run(black_box(m), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_matrix, bench_greedy, bench_operators, bench_ga);
criterion_main!(benches);
