// Titan Bench kernel micro-benchmarks
//
// Cost of one 100k-application batch and of the clock read between batches.
// The ratio between the two shows how little the time checks cost.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;
use titan_bench::constants::kernel::SEED;
use titan_bench::kernel::{run_batch, transform};
use titan_bench::{Clock, MonotonicClock};

fn bench_transform(c: &mut Criterion) {
    c.bench_function("transform_single", |b| {
        b.iter(|| transform(black_box(SEED)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_batch");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("batch_100k", |b| {
        b.iter(|| run_batch(black_box(SEED)))
    });

    let clock = MonotonicClock::new();
    group.bench_function("clock_read", |b| b.iter(|| black_box(clock.now_ms())));

    group.finish();
}

criterion_group!(benches, bench_transform, bench_batch);
criterion_main!(benches);
