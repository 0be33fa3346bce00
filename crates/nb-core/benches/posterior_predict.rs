//! Criterion benchmarks for fitting and posterior prediction in `nb-core`.
//!
//! Inputs are synthetic and seeded so runs are comparable across machines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nb_core::{BernoulliNb, Dataset, MultinomialNb, MultinomialParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn binary_dataset(n: usize, width: usize, seed: u64) -> Dataset<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for _ in 0..n {
        let label: u8 = rng.random_range(0..3);
        // Feature rate depends on the class so the posterior has signal.
        let rate = 0.2 + 0.3 * f64::from(label);
        samples.push((0..width).map(|_| u8::from(rng.random_bool(rate))).collect());
        labels.push(label);
    }
    Dataset::new(samples, labels).expect("synthetic dataset is rectangular")
}

fn count_rows(n: usize, width: usize, seed: u64) -> (Vec<Vec<f64>>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n)
        .map(|_| (0..width).map(|_| f64::from(rng.random_range(0u8..6))).collect())
        .collect();
    let labels = (0..n).map(|_| rng.random_range(0u8..2)).collect();
    (rows, labels)
}

fn bench_bernoulli(c: &mut Criterion) {
    let mut group = c.benchmark_group("bernoulli");

    for width in [8usize, 64, 256] {
        let dataset = binary_dataset(1_000, width, 7);
        group.bench_with_input(BenchmarkId::new("fit", width), &dataset, |b, ds| {
            b.iter(|| {
                let model = BernoulliNb::fit(black_box(ds), 1.0).expect("fit should succeed");
                black_box(model.n_features());
            })
        });

        let model = BernoulliNb::fit(&dataset, 1.0).expect("fit should succeed");
        group.bench_with_input(
            BenchmarkId::new("predict_proba", width),
            dataset.samples(),
            |b, samples| {
                b.iter(|| {
                    let posteriors = model
                        .predict_proba(black_box(samples))
                        .expect("posterior should normalize");
                    black_box(posteriors.len());
                })
            },
        );
    }

    group.finish();
}

fn bench_multinomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("multinomial");

    // Roughly the shape of the movie experiment: a few thousand users.
    let (rows, labels) = count_rows(3_000, 200, 11);
    group.bench_function("fit_3k_x_200", |b| {
        b.iter(|| {
            let model = MultinomialNb::fit(black_box(&rows), &labels, MultinomialParams::default())
                .expect("fit should succeed");
            black_box(model.n_features());
        })
    });

    let model = MultinomialNb::fit(&rows, &labels, MultinomialParams::default())
        .expect("fit should succeed");
    group.bench_function("predict_proba_3k_x_200", |b| {
        b.iter(|| {
            let proba = model
                .predict_proba(black_box(&rows))
                .expect("probabilities should normalize");
            black_box(proba.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_bernoulli, bench_multinomial);
criterion_main!(benches);
