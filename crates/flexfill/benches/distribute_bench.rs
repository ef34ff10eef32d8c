//! Benchmarks for the distributor.
//!
//! Run with: cargo bench -p flexfill

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flexfill::{Distributor, GroupSpec, RegionSpec, quantize};

/// Build `count` single-region groups spread over three priority tiers
/// with mixed bounds.
fn layout_groups(count: usize) -> BTreeMap<String, GroupSpec> {
    (0..count)
        .map(|i| {
            let region = match i % 4 {
                0 => RegionSpec::new().min(2.0).max(40.0).priority(2),
                1 => RegionSpec::new().min(10.0).max(120.0).priority(1).share(2.0),
                2 => RegionSpec::fixed(8.0),
                _ => RegionSpec::new().min(1.0),
            };
            (format!("region{i:03}"), GroupSpec::Single(region))
        })
        .collect()
}

fn bench_distribute(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribute");
    let distributor = Distributor::new();

    for count in [4usize, 16, 64, 256] {
        let groups = layout_groups(count);
        let total = 50.0 * count as f64;
        group.bench_with_input(BenchmarkId::new("tiered", count), &groups, |b, groups| {
            b.iter(|| {
                let sizes = distributor
                    .distribute(black_box(total), black_box(groups))
                    .expect("feasible");
                black_box(sizes);
            })
        });
    }
    group.finish();
}

fn bench_quantize(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantize");
    let distributor = Distributor::new();

    for count in [16usize, 256] {
        let groups = layout_groups(count);
        let total = 50.0 * count as f64;
        let sizes = distributor.distribute(total, &groups).expect("feasible");
        group.bench_with_input(BenchmarkId::new("cells", count), &sizes, |b, sizes| {
            b.iter(|| {
                let cells = quantize(black_box(sizes), total as u64);
                black_box(cells);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_distribute, bench_quantize);
criterion_main!(benches);
