//! Performance benchmarks for windowed dispatch overhead

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use repeat_calls::plan::plan_windows;
use repeat_calls::{BatchInvoker, CallArgument, InvocationPlan};
use std::hint::black_box;
use std::time::Duration;
use tokio::runtime::Runtime;

fn bench_window_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_planning");

    for total in [100, 10_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::new("plan_windows", total), &total, |b, &total| {
            b.iter(|| black_box(plan_windows(black_box(total), 64)));
        });
    }

    group.finish();
}

fn bench_indexed_runs(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("indexed_runs");
    group.measurement_time(Duration::from_secs(5));

    for chunk_size in [1, 16, 256] {
        group.bench_with_input(
            BenchmarkId::new("chunk_size", chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.to_async(&rt).iter(|| async move {
                    let results = BatchInvoker::new()
                        .run_indexed(1_000, chunk_size, Duration::ZERO, |index| {
                            std::future::ready(Ok::<_, ()>(index))
                        })
                        .await
                        .unwrap();
                    black_box(results)
                });
            },
        );
    }

    group.finish();
}

fn bench_payload_runs(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let payload: Vec<Vec<u64>> = (0..1_000).map(|i| vec![i, i + 1, i + 2]).collect();

    c.bench_function("tuple_payload_1000", |b| {
        b.to_async(&rt).iter(|| {
            let payload = payload.clone();
            async move {
                let plan = InvocationPlan::builder(|argument: CallArgument<u64>| {
                    std::future::ready(Ok::<_, ()>(argument.values().iter().sum::<u64>()))
                })
                .chunk_size(32)
                .tuples(payload)
                .build()
                .unwrap();
                black_box(BatchInvoker::new().run(plan).await.unwrap())
            }
        });
    });
}

criterion_group!(
    benches,
    bench_window_planning,
    bench_indexed_runs,
    bench_payload_runs
);
criterion_main!(benches);
