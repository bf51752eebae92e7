// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Neighbors basics.
//!
//! Build an index over a few points, run each query kind, and show how
//! failures are reported.
//!
//! Run:
//! - `cargo run -p understory_demos --example neighbors_basics`
//! - `RUST_LOG=understory_neighbors=debug cargo run -p understory_demos --example neighbors_basics`

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_neighbors::{Geometry, KdTreeIndex, Neighbors, PointSet, SearchError, SearchParam};

fn main() -> Result<(), SearchError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Five points on a line.
    let index = KdTreeIndex::from_points(PointSet::from_matrix(1, &[0.0, 1.0, 2.0, 3.0, 4.0])?)?;
    let mut out = Neighbors::new();

    let queries = [
        ("knn", SearchParam::Knn { knn: 3 }),
        ("radius", SearchParam::Radius { radius: 1.5 }),
        (
            "hybrid",
            SearchParam::Hybrid {
                radius: 1.5,
                max_nn: 2,
            },
        ),
        (
            "nn_chain",
            SearchParam::NnChain {
                radius_local: 1.1,
                chain_length: 2,
            },
        ),
    ];
    for (label, param) in &queries {
        let seed = if matches!(param, SearchParam::NnChain { .. }) {
            0.0
        } else {
            2.0
        };
        let n = index.search(&[seed], param, &mut out)?;
        println!("{label:>8} from x={seed}: {n} hits");
        for (i, d2) in out.iter() {
            println!("           index {i} (d2 = {d2})");
        }
    }

    // 2D points straight from kurbo.
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(3.0, 4.0),
        Point::new(1.0, 1.0),
    ];
    let index = KdTreeIndex::from_points(PointSet::try_from(&pts[..])?)?;
    index.knn(&[0.0, 0.0], 2, &mut out)?;
    println!("kurbo knn: {:?}", out.indices());

    // Failures leave `out` empty and return a typed error.
    let mut index = KdTreeIndex::new();
    if let Err(e) = index.knn(&[0.0], 1, &mut out) {
        println!("empty index: {e}");
    }
    if let Err(e) = index.set_geometry(&Geometry::Image) {
        println!("image: {e}");
    }
    index.set_geometry(&Geometry::PointCloud(&[[0.0, 0.0, 0.0]]))?;
    if let Err(e) = index.knn(&[0.0, 0.0], 1, &mut out) {
        println!("wrong dimension: {e}");
    }
    Ok(())
}
