//! Blob directory benchmarks.

use blobdir_bench::{populated_store, random_data};
use blobdir_core::{BlobDir, Config};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;

/// Benchmark create operations.
fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");
    group.sample_size(50);

    for size in [64, 1024, 16 * 1024].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let temp_dir = TempDir::new().unwrap();
            let mut store = BlobDir::open(temp_dir.path()).unwrap();
            let data = random_data(size);

            b.iter(|| {
                let id = store.create(black_box(&data)).unwrap();
                black_box(id);
            });
        });
    }

    group.finish();
}

/// Benchmark synced create operations.
fn bench_create_synced(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_synced");
    group.sample_size(20);

    group.bench_function("1024", |b| {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new().sync_writes(true);
        let mut store = BlobDir::open_with_config(temp_dir.path(), config).unwrap();
        let data = random_data(1024);

        b.iter(|| {
            let id = store.create(black_box(&data)).unwrap();
            black_box(id);
        });
    });

    group.finish();
}

/// Benchmark point loads.
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in [64, 1024, 16 * 1024].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let (_temp, store, ids) = populated_store(100, size);

            let mut idx = 0;
            b.iter(|| {
                let blob = store.load(black_box(ids[(idx * 7) % ids.len()])).unwrap();
                idx += 1;
                black_box(blob);
            });
        });
    }

    group.finish();
}

/// Benchmark full loads, which include the directory scan.
fn bench_load_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_all");
    group.sample_size(20);

    for count in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let (_temp, store, _ids) = populated_store(count, 256);

            b.iter(|| {
                let items = store.load_all().unwrap();
                black_box(items);
            });
        });
    }

    group.finish();
}

/// Benchmark open, which claims the lock and scans the directory.
fn bench_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_close");
    group.sample_size(20);

    group.bench_function("1000_objects", |b| {
        let (temp, store, _ids) = populated_store(1000, 64);
        store.close().unwrap();

        b.iter(|| {
            let store = BlobDir::open(black_box(temp.path())).unwrap();
            store.close().unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_create,
    bench_create_synced,
    bench_load,
    bench_load_all,
    bench_open,
);

criterion_main!(benches);
