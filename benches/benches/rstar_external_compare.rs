// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_neighbors::{KdTreeIndex, Neighbors, PointSet};

use rstar::RTree;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_points(count: usize, extent: f64, seed: u64) -> Vec<[f64; 3]> {
    let mut rng = Rng(seed);
    (0..count)
        .map(|_| {
            [
                rng.next_f64() * extent,
                rng.next_f64() * extent,
                rng.next_f64() * extent,
            ]
        })
        .collect()
}

fn bench_rstar_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_external_compare");
    let queries = gen_points(256, 100.0, 0xBADC_F00D_1234_5678);
    for &n in &[10_000usize, 100_000] {
        let pts = gen_points(n, 100.0, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("understory_build_n{n}"), |b| {
            b.iter_batched(
                || pts.clone(),
                |pts| {
                    let idx = KdTreeIndex::from_points(PointSet::from_points(&pts).unwrap())
                        .unwrap();
                    black_box(idx.len());
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_function(format!("rstar_build_bulk_n{n}"), |b| {
            b.iter_batched(
                || pts.clone(),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    black_box(tree.size());
                },
                BatchSize::LargeInput,
            )
        });

        let idx = KdTreeIndex::from_points(PointSet::from_points(&pts).unwrap()).unwrap();
        let tree = RTree::bulk_load(pts.clone());

        group.bench_function(format!("understory_knn_30_n{n}"), |b| {
            let mut out = Neighbors::with_capacity(30);
            b.iter(|| {
                let mut total = 0usize;
                for q in &queries {
                    total += idx.knn(q, 30, &mut out).unwrap();
                }
                black_box(total);
            })
        });

        group.bench_function(format!("rstar_knn_30_n{n}"), |b| {
            b.iter(|| {
                let mut total = 0usize;
                for q in &queries {
                    total += tree.nearest_neighbor_iter(q).take(30).count();
                }
                black_box(total);
            })
        });

        group.bench_function(format!("understory_radius_5_n{n}"), |b| {
            let mut out = Neighbors::new();
            b.iter(|| {
                let mut total = 0usize;
                for q in &queries {
                    total += idx.radius(q, 5.0, &mut out).unwrap();
                }
                black_box(total);
            })
        });

        group.bench_function(format!("rstar_radius_5_n{n}"), |b| {
            b.iter(|| {
                let mut total = 0usize;
                for q in &queries {
                    // rstar takes a squared distance here.
                    total += tree.locate_within_distance(*q, 25.0).count();
                }
                black_box(total);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_external_compare);
criterion_main!(benches);
