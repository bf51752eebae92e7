// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_neighbors::{
    Backend, FlatIndex, IndexConfig, KdTreeIndex, Neighbors, PointSet, SearchIndex, SearchParam,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_cloud(count: usize, extent: f64, seed: u64) -> PointSet {
    let mut rng = Rng::new(seed);
    let data: Vec<f64> = (0..count * 3).map(|_| rng.next_f64() * extent).collect();
    PointSet::from_vec(3, data).unwrap()
}

/// A wavy sheet sampled on a jittered grid, closer to a scanned surface than uniform noise.
fn gen_surface(n: usize, spacing: f64) -> PointSet {
    let mut rng = Rng::new(0x5EED_5EED_1234_ABCD);
    let mut pts = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let px = x as f64 * spacing + (rng.next_f64() - 0.5) * spacing * 0.2;
            let py = y as f64 * spacing + (rng.next_f64() - 0.5) * spacing * 0.2;
            let pz = (px * 0.05).sin() * (py * 0.05).cos() * 4.0;
            pts.push([px, py, pz]);
        }
    }
    PointSet::from_points(&pts).unwrap()
}

fn bench_build<B: Backend>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("{name}_build"));
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = gen_uniform_cloud(n, 100.0, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("uniform_n{n}"), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let idx = SearchIndex::<B>::from_points(points).unwrap();
                    black_box(idx.len());
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_queries<B: Backend>(c: &mut Criterion, name: &str, n: usize) {
    let mut group = c.benchmark_group(format!("{name}_query_n{n}"));
    let points = gen_uniform_cloud(n, 100.0, 0xFACE_FEED_CAFE_BABE);
    let queries = gen_uniform_cloud(256, 100.0, 0xBADC_F00D_1234_5678);
    let idx = SearchIndex::<B>::from_points(points).unwrap();
    group.throughput(Throughput::Elements(queries.len() as u64));

    let params = [
        ("knn_30", SearchParam::Knn { knn: 30 }),
        ("radius_5", SearchParam::Radius { radius: 5.0 }),
        (
            "hybrid_5_30",
            SearchParam::Hybrid {
                radius: 5.0,
                max_nn: 30,
            },
        ),
    ];
    for (label, param) in params {
        group.bench_function(label, |b| {
            let mut out = Neighbors::with_capacity(64);
            b.iter(|| {
                let mut total = 0usize;
                for q in queries.iter() {
                    total += idx.search(q, &param, &mut out).unwrap();
                }
                black_box(total);
            })
        });
    }
    group.finish();
}

fn bench_flatvec(c: &mut Criterion) {
    bench_build::<understory_neighbors::FlatVec>(c, "flatvec");
    bench_queries::<understory_neighbors::FlatVec>(c, "flatvec", 10_000);
}

fn bench_kdtree(c: &mut Criterion) {
    bench_build::<understory_neighbors::KdTree>(c, "kdtree");
    bench_queries::<understory_neighbors::KdTree>(c, "kdtree", 10_000);
    bench_queries::<understory_neighbors::KdTree>(c, "kdtree", 100_000);
}

fn bench_kdtree_leaf_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_leaf_size");
    let points = gen_uniform_cloud(50_000, 100.0, 0xC1A5_7E55_9999_ABCD);
    let queries = gen_uniform_cloud(256, 100.0, 0x0DDB_A115_0000_0001);
    for &leaf_size in &[1usize, 4, 15, 32, 64] {
        let mut idx = KdTreeIndex::with_config(IndexConfig::new().with_leaf_size(leaf_size)).unwrap();
        idx.set_points(points.clone()).unwrap();
        group.bench_function(format!("knn_30_leaf{leaf_size}"), |b| {
            let mut out = Neighbors::with_capacity(30);
            b.iter(|| {
                let mut total = 0usize;
                for q in queries.iter() {
                    total += idx.knn(q, 30, &mut out).unwrap();
                }
                black_box(total);
            })
        });
    }
    group.finish();
}

fn bench_chain_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("nn_chain_surface");
    let points = gen_surface(128, 1.0);
    let kd = KdTreeIndex::from_points(points.clone()).unwrap();
    let flat = FlatIndex::from_points(points).unwrap();
    for &hops in &[2usize, 4, 8] {
        let param = SearchParam::NnChain {
            radius_local: 1.5,
            chain_length: hops,
        };
        group.bench_function(format!("kdtree_hops{hops}"), |b| {
            let mut out = Neighbors::new();
            b.iter(|| black_box(kd.search(&[64.0, 64.0, 0.0], &param, &mut out).unwrap()))
        });
        group.bench_function(format!("flatvec_hops{hops}"), |b| {
            let mut out = Neighbors::new();
            b.iter(|| black_box(flat.search(&[64.0, 64.0, 0.0], &param, &mut out).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_flatvec,
    bench_kdtree,
    bench_kdtree_leaf_size,
    bench_chain_surface,
);
criterion_main!(benches);
