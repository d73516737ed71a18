// Compares the incrementally maintained occupied range against a full
// bucket rescan. Needs `--features bench_internal`.
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use twin_maps::ChainedHashMap;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn sparse_map() -> ChainedHashMap<u64, u64> {
    let mut m = ChainedHashMap::new();
    for x in lcg(17).take(1_000) {
        let _ = m.insert(x >> 20, x);
    }
    m
}

fn bench_range_lookup(c: &mut Criterion) {
    let m = sparse_map();
    c.bench_function("chained::occupied_range_cached", |b| {
        b.iter(|| black_box(m.occupied_range()))
    });
    c.bench_function("chained::occupied_range_rescan", |b| {
        b.iter(|| black_box(m.rescan_occupied_range()))
    });
}

// Removing boundary entries is where the cached range does its scanning.
fn bench_drain_from_min(c: &mut Criterion) {
    c.bench_function("chained::drain_from_min_1k", |b| {
        b.iter_batched(
            sparse_map,
            |mut m| {
                while let Some(k) = { let k = m.keys().next().copied(); k } {
                    let _ = m.remove(&k);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_range_lookup, bench_drain_from_min
}
criterion_main!(benches);
