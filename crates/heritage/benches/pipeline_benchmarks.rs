//! Curation and aggregation throughput benchmarks.

#[path = "../tests/common/mod.rs"]
mod common;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tempfile::TempDir;

use common::{catalogue, write_exhibits};
use heritage::{Curator, FieldPath, Session, top_n};

/// Benchmark curation of raw exports of various sizes.
fn bench_curate(c: &mut Criterion) {
    let mut group = c.benchmark_group("curate");
    let dir = TempDir::new().unwrap();

    for rows in [1_000, 10_000, 50_000].iter() {
        let raw = write_exhibits(
            &dir.path().join(format!("raw_{}.parquet", rows)),
            &catalogue(*rows),
            8192,
        );

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &raw, |b, raw| {
            let session = Session::new();
            b.iter(|| black_box(Curator::new().curate(&session, raw).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark the qualifying-row count used by the timing harness.
fn bench_count_qualifying(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let raw = write_exhibits(&dir.path().join("raw.parquet"), &catalogue(50_000), 8192);
    let session = Session::new();

    c.bench_function("count_qualifying_50k", |b| {
        b.iter(|| {
            black_box(
                Curator::new()
                    .with_limit(20_000)
                    .count_qualifying(&session, &raw)
                    .unwrap(),
            )
        })
    });
}

/// Benchmark top-N over an in-memory curated relation.
fn bench_top_n(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let raw = write_exhibits(&dir.path().join("raw.parquet"), &catalogue(50_000), 8192);
    let session = Session::new();
    let curated = Curator::new().curate(&session, &raw).unwrap();
    let column = FieldPath::from("museum_name");

    c.bench_function("top_n_museums_40k", |b| {
        b.iter(|| black_box(top_n(&curated, &column, 20).unwrap()))
    });
}

criterion_group!(benches, bench_curate, bench_count_qualifying, bench_top_n);
criterion_main!(benches);
