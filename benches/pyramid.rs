use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wavelet_db::{MinMax, MinMaxAggregation, Store};

type BenchStore = Store<MinMaxAggregation<f64>, ()>;

fn populated(height: u32, count: i64) -> BenchStore {
    let mut store = Store::new(height, MinMaxAggregation::new(0.0)).unwrap();
    for i in 0..count {
        store.write_entry(i, (i % 1000) as f64, None).unwrap();
    }
    store
}

/// Benchmark write throughput (leaf append + fold up the path)
fn bench_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_entry");
    let count = 10_000i64;
    group.throughput(Throughput::Elements(count as u64));

    for height in [5u32, 10, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(height), &height, |b, &height| {
            b.iter(|| {
                let store = populated(height, count);
                black_box(store.stats());
            });
        });
    }

    group.finish();
}

/// Benchmark level reads across 100K positions
fn bench_read_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_range_100k");
    let store = populated(10, 100_000);

    for level in [0u32, 4, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
            b.iter(|| {
                let summaries = store.read_range(black_box(0), black_box(99_999), level).unwrap();
                black_box(summaries);
            });
        });
    }

    group.finish();
}

/// Benchmark value searches: rare matches prune most subtrees
fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_in_range_100k");
    let mut store = populated(10, 100_000);
    store.write_entry(54_321, 5000.0, None).unwrap();

    group.bench_function("rare_match", |b| {
        let needle = MinMax::new(4000.0, 6000.0);
        b.iter(|| black_box(store.find_in_range(0, 99_999, &needle).unwrap()));
    });

    group.bench_function("dense_match", |b| {
        let needle = MinMax::new(0.0, 100.0);
        b.iter(|| black_box(store.find_in_range(0, 99_999, &needle).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_writes, bench_read_levels, bench_find);
criterion_main!(benches);
