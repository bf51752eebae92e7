// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region growing with chained radius search.
//!
//! Two sheets sit close together in space. A single large ball around a seed
//! picks up points from both; chaining small balls stays on the seed's sheet.
//!
//! Run:
//! - `cargo run -p understory_demos --example region_growing`
//! - `RUST_LOG=understory_neighbors=trace cargo run -p understory_demos --example region_growing`

use tracing_subscriber::EnvFilter;
use understory_neighbors::{
    Geometry, IndexConfig, KdTreeIndex, Neighbors, SearchError, SearchParam,
};

fn main() -> Result<(), SearchError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Two 20 × 20 sheets at z = 0 and z = 2, sampled every 0.5.
    let mut cloud = Vec::new();
    for z in [0.0, 2.0] {
        for y in 0..20 {
            for x in 0..20 {
                cloud.push([f64::from(x) * 0.5, f64::from(y) * 0.5, z]);
            }
        }
    }

    let mut index = KdTreeIndex::with_config(IndexConfig::new().with_leaf_size(8))?;
    index.set_geometry(&Geometry::PointCloud(&cloud))?;
    let mut out = Neighbors::new();
    let seed = [5.0, 5.0, 0.0];

    let ball = SearchParam::Radius { radius: 6.0 };
    index.search(&seed, &ball, &mut out)?;
    let (lower, upper) = split_by_sheet(&cloud, &out);
    println!("single ball r=6.0: {lower} on seed sheet, {upper} on the other");

    let chain = SearchParam::NnChain {
        radius_local: 0.6,
        chain_length: 10,
    };
    index.search(&seed, &chain, &mut out)?;
    let (lower, upper) = split_by_sheet(&cloud, &out);
    println!("chain r=0.6 x 10 hops: {lower} on seed sheet, {upper} on the other");
    Ok(())
}

fn split_by_sheet(cloud: &[[f64; 3]], out: &Neighbors) -> (usize, usize) {
    let lower = out.indices().iter().filter(|&&i| cloud[i][2] == 0.0).count();
    (lower, out.len() - lower)
}
