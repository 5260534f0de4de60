//! Benchmarks for the heavy matrix operations.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use densegauss::{Matrix, Vector};
use rand::{rngs::SmallRng, SeedableRng};
use std::hint::black_box;

fn bench_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("mul");
    for size in [16usize, 64, 128] {
        let mut rng = SmallRng::seed_from_u64(1);
        let a = Matrix::random(&mut rng, size, size);
        let b = Matrix::random(&mut rng, size, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| black_box(&a) * black_box(&b));
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for size in [16usize, 64, 128] {
        let mut rng = SmallRng::seed_from_u64(2);
        let a = Matrix::random_invertible(&mut rng, size);
        let b = Vector::random(&mut rng, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| a.solve(black_box(&b)).unwrap());
        });
    }
    group.finish();
}

fn bench_exp(c: &mut Criterion) {
    let mut group = c.benchmark_group("exp");
    for size in [8usize, 16, 32] {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut m = Matrix::random(&mut rng, size, size);
        m *= 0.5;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| black_box(&m).exp(1e-12).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mul, bench_solve, bench_exp);
criterion_main!(benches);
