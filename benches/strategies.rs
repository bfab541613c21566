//! Strategy benchmarks for brick-sort
//!
//! Compares the three orchestration strategies on random and nearly-sorted
//! input, where early exit should pay off.
//!
//! Run with: cargo bench --bench strategies

use brick_sort::{LaunchConfig, Sorter, Strategy};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;

fn random_input(len: usize, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

/// Sorted input with a few adjacent pairs swapped.
fn nearly_sorted_input(len: usize, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data: Vec<u32> = (0..len as u32).collect();
    for _ in 0..len / 100 + 1 {
        let i = rng.gen_range(0..len - 1);
        data.swap(i, i + 1);
    }
    data
}

const STRATEGIES: [(&str, Strategy); 4] = [
    ("fixed", Strategy::Fixed),
    ("early_exit", Strategy::EarlyExit),
    ("hybrid_50", Strategy::Hybrid { trigger_percent: 50 }),
    ("hybrid_90", Strategy::Hybrid { trigger_percent: 90 }),
];

fn bench_input(c: &mut Criterion, group_name: &str, make: fn(usize, u64) -> Vec<u32>) {
    let mut group = c.benchmark_group(group_name);
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for size in [256usize, 1024, 4096] {
        group.throughput(Throughput::Elements(size as u64));
        let input = make(size, 42);

        for (name, strategy) in STRATEGIES {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |bench, _| {
                let mut sorter = Sorter::new(LaunchConfig::default());
                bench.iter(|| {
                    let mut data = input.clone();
                    sorter.sort(&mut data, strategy).unwrap();
                    data
                })
            });
        }
    }
    group.finish();
}

fn bench_random(c: &mut Criterion) {
    bench_input(c, "random", random_input);
}

fn bench_nearly_sorted(c: &mut Criterion) {
    bench_input(c, "nearly_sorted", nearly_sorted_input);
}

criterion_group!(benches, bench_random, bench_nearly_sorted);
criterion_main!(benches);
