use avl_collections::{AvlMap, Sequence, algorithm};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("AvlMap", keys.len()), |b| {
        b.iter(|| {
            let mut map = AvlMap::new();
            for &k in keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", keys.len()), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_insert_ordered(c: &mut Criterion) {
    bench_map_insert(c, "map_insert_ordered", &ordered_keys(N));
}

fn bench_map_insert_random(c: &mut Criterion) {
    bench_map_insert(c, "map_insert_random", &random_keys(N));
}

fn bench_map_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let avl_map: AvlMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("AvlMap", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(avl_map.get(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(bt_map.get(k));
            }
        });
    });

    group.finish();
}

fn bench_map_get_or_default(c: &mut Criterion) {
    let keys: Vec<i64> = random_keys(N).into_iter().map(|k| k % 1_000).collect();

    let mut group = c.benchmark_group("map_get_or_default");

    group.bench_function(BenchmarkId::new("AvlMap", N), |b| {
        b.iter(|| {
            let mut counts: AvlMap<i64, u32> = AvlMap::new();
            for &k in &keys {
                *counts.get_or_default(k) += 1;
            }
            counts
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut counts: BTreeMap<i64, u32> = BTreeMap::new();
            for &k in &keys {
                *counts.entry(k).or_default() += 1;
            }
            counts
        });
    });

    group.finish();
}

// ─── Sequence Benchmarks ────────────────────────────────────────────────────

fn bench_sequence_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_push");

    group.bench_function(BenchmarkId::new("Sequence", N), |b| {
        b.iter(|| {
            let mut values = Sequence::new();
            for i in 0..N as i64 {
                values.push(i);
            }
            values
        });
    });

    group.bench_function(BenchmarkId::new("Vec", N), |b| {
        b.iter(|| {
            let mut values = Vec::new();
            for i in 0..N as i64 {
                values.push(i);
            }
            values
        });
    });

    group.finish();
}

fn bench_quicksort_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("sort_random");

    group.bench_function(BenchmarkId::new("quicksort", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<Sequence<i64>>(),
            |mut values| {
                let (first, last) = (values.begin(), values.end());
                algorithm::quicksort(&mut values, first, last);
                values
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("sort_unstable", N), |b| {
        b.iter_batched(
            || keys.clone(),
            |mut values| {
                values.sort_unstable();
                values
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_linear_search(c: &mut Criterion) {
    let values: Sequence<i64> = ordered_keys(N).into_iter().collect();
    let target = (N as i64) - 1;

    c.bench_function("linear_search_last", |b| {
        b.iter(|| algorithm::linear_search(&values, values.begin(), values.end(), black_box(&target)));
    });
}

criterion_group!(map_benches, bench_map_insert_ordered, bench_map_insert_random, bench_map_get_random, bench_map_get_or_default,);

criterion_group!(sequence_benches, bench_sequence_push, bench_quicksort_random, bench_linear_search,);

criterion_main!(map_benches, sequence_benches);
