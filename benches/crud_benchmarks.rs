use avl_table::AvlMap;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Key sequences ──────────────────────────────────────────────────────────

#[allow(clippy::cast_possible_wrap)]
fn ascending_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn descending_keys(n: usize) -> Vec<i64> {
    let mut keys = ascending_keys(n);
    keys.reverse();
    keys
}

#[allow(clippy::cast_possible_wrap)]
fn scattered_keys(n: usize) -> Vec<i64> {
    // Deterministic LCG so runs are comparable.
    let mut state: u64 = 0x5eed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            (state >> 33) as i64
        })
        .collect()
}

fn key_orders() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ascending", ascending_keys(N)),
        ("descending", descending_keys(N)),
        ("scattered", scattered_keys(N)),
    ]
}

// ─── Map operations ─────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for (order, keys) in key_orders() {
        group.bench_with_input(BenchmarkId::new("AvlMap", order), &keys, |b, keys| {
            b.iter(|| keys.iter().map(|&k| (k, k)).collect::<AvlMap<_, _>>());
        });
        group.bench_with_input(BenchmarkId::new("BTreeMap", order), &keys, |b, keys| {
            b.iter(|| keys.iter().map(|&k| (k, k)).collect::<BTreeMap<_, _>>());
        });
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for (order, keys) in key_orders() {
        let avl: AvlMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let btree: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_with_input(BenchmarkId::new("AvlMap", order), &keys, |b, keys| {
            b.iter(|| keys.iter().filter(|k| avl.get(black_box(*k)).is_some()).count());
        });
        group.bench_with_input(BenchmarkId::new("BTreeMap", order), &keys, |b, keys| {
            b.iter(|| keys.iter().filter(|k| btree.get(black_box(*k)).is_some()).count());
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for (order, keys) in key_orders() {
        let avl: AvlMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let btree: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_with_input(BenchmarkId::new("AvlMap", order), &keys, |b, keys| {
            b.iter_batched_ref(
                || avl.clone(),
                |map| keys.iter().for_each(|k| _ = map.remove(k)),
                BatchSize::LargeInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("BTreeMap", order), &keys, |b, keys| {
            b.iter_batched_ref(
                || btree.clone(),
                |map| keys.iter().for_each(|k| _ = map.remove(k)),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

// ─── Order statistics ───────────────────────────────────────────────────────

fn bench_order_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_statistics");
    let keys = scattered_keys(N);
    let avl: AvlMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let btree: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let len = avl.len();

    group.bench_function(BenchmarkId::new("AvlMap::select", len), |b| {
        b.iter(|| (0..len).step_by(97).filter_map(|rank| avl.select(black_box(rank)).ok()).count());
    });
    group.bench_function(BenchmarkId::new("BTreeMap::nth", len), |b| {
        b.iter(|| (0..len).step_by(97).filter_map(|rank| btree.keys().nth(black_box(rank))).count());
    });
    group.bench_function(BenchmarkId::new("AvlMap::rank", len), |b| {
        b.iter(|| keys.iter().step_by(97).map(|k| avl.rank(black_box(k))).sum::<usize>());
    });
    group.bench_function(BenchmarkId::new("BTreeMap::range_count", len), |b| {
        b.iter(|| keys.iter().step_by(97).map(|k| btree.range(..black_box(k)).count()).sum::<usize>());
    });
    group.bench_function(BenchmarkId::new("AvlMap::size_in_range", len), |b| {
        b.iter(|| keys.windows(2).step_by(97).map(|w| avl.size_in_range(&w[0], &w[1])).sum::<usize>());
    });
    group.finish();
}

criterion_group!(crud_benches, bench_insert, bench_get, bench_remove);

criterion_group!(order_statistic_benches, bench_order_statistics);

criterion_main!(crud_benches, order_statistic_benches);
