//! Benchmarks for the series pipeline
//!
//! Run with: cargo bench

use chrono::{Offset, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tally::series::{bucketize, densify, Granularity, SeriesSummary};
use tally::store::Event;

fn create_test_events(count: usize) -> Vec<Event> {
    // One event every 26 hours from 2020-01-01, so day series stay sparse
    (0..count)
        .map(|i| Event::with_timestamp("press", 1577836800000 + i as i64 * 26 * 3600 * 1000))
        .collect()
}

fn bench_bucketize(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucketize");

    for size in [100, 1000, 10000] {
        let events = create_test_events(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("day_{}", size), |b| {
            b.iter(|| bucketize(black_box(&events), Granularity::Day, "press", Utc.fix()).unwrap())
        });

        group.bench_function(format!("month_{}", size), |b| {
            b.iter(|| {
                bucketize(black_box(&events), Granularity::Month, "press", Utc.fix()).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_densify(c: &mut Criterion) {
    let mut group = c.benchmark_group("densify");

    for size in [100, 1000, 10000] {
        let events = create_test_events(size);
        let sparse = bucketize(&events, Granularity::Day, "press", Utc.fix()).unwrap();

        group.throughput(Throughput::Elements(sparse.len() as u64));

        group.bench_function(format!("day_{}", size), |b| {
            b.iter(|| densify(black_box(sparse.clone()), Granularity::Day).unwrap())
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let events = create_test_events(10000);

    group.throughput(Throughput::Elements(10000));

    group.bench_function("bucketize_densify_summarize", |b| {
        b.iter(|| {
            let sparse =
                bucketize(black_box(&events), Granularity::Day, "press", Utc.fix()).unwrap();
            let dense = densify(sparse, Granularity::Day).unwrap();
            SeriesSummary::compute(&dense)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_bucketize, bench_densify, bench_pipeline);
criterion_main!(benches);
