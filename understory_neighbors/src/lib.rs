// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_neighbors --heading-base-level=0

//! Understory Neighbors: a nearest-neighbor index over fixed point sets.
//!
//! Understory Neighbors is a reusable building block for point-cloud processing,
//! feature matching, and correspondence search.
//!
//! - Build once over an immutable [`PointSet`] of `d`-dimensional points.
//! - Query by k-nearest, radius, hybrid k/radius, or chained radius (region growing).
//! - Reuse one [`Neighbors`] buffer across queries to keep hot loops allocation-free.
//!
//! Every query is described by a [`SearchParam`] and dispatched through
//! [`SearchIndex::search`]. Results are parallel sequences of point indices
//! (in ingestion order) and squared Euclidean distances.
//!
//! # Example
//!
//! ```rust
//! use understory_neighbors::{KdTreeIndex, Neighbors, PointSet, SearchParam};
//!
//! // Five points on a line, one dimension each.
//! let points = PointSet::from_matrix(1, &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
//! let index = KdTreeIndex::from_points(points).unwrap();
//! let mut out = Neighbors::new();
//!
//! // Three nearest to x = 2; ties resolve toward lower indices.
//! index.search(&[2.0], &SearchParam::Knn { knn: 3 }, &mut out).unwrap();
//! assert_eq!(out.indices(), &[2, 1, 3]);
//! assert_eq!(out.distance2(), &[0.0, 1.0, 1.0]);
//!
//! // Grow a region from x = 0 with two hops of radius 1.1.
//! let chain = SearchParam::NnChain { radius_local: 1.1, chain_length: 2 };
//! index.search(&[0.0], &chain, &mut out).unwrap();
//! assert_eq!(out.indices(), &[0, 1, 2]);
//! ```
//!
//! Geometry containers are ingested through borrowed views:
//!
//! ```rust
//! use understory_neighbors::{Geometry, KdTreeIndex, Neighbors, SearchError};
//!
//! let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
//! let mut index = KdTreeIndex::new();
//! index.set_geometry(&Geometry::TriangleMesh(&vertices)).unwrap();
//!
//! let mut out = Neighbors::new();
//! assert_eq!(
//!     index.knn(&[0.0, 0.0], 1, &mut out),
//!     Err(SearchError::DimensionMismatch { expected: 3, actual: 2 })
//! );
//! ```
//!
//! ## Query kinds
//!
//! - `Knn`: up to `knn` nearest points, ascending by distance.
//! - `Radius`: every point within `radius`, unordered.
//! - `Hybrid`: the k-nearest result cut at `radius` by binary search; ascending.
//! - `NnChain`: points reachable through at most `chain_length` hops of
//!   `radius_local`, intersected with the ball of `radius_local * chain_length`.
//!   See the [`chain`] module docs.
//!
//! ## Choosing a backend
//!
//! - `KdTree` (default, [`KdTreeIndex`]): bucketed k-d tree; `leaf_size` in
//!   [`IndexConfig`] tunes bucket granularity (default 15).
//! - `FlatVec` ([`FlatIndex`]): linear scans. Good for very small sets and as a reference.
//!
//! Custom structures plug in by implementing [`Backend`].
//!
//! ### Float semantics
//!
//! Coordinates are assumed finite. Equal distances order by ascending index so
//! results are deterministic across backends.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod chain;
pub mod config;
pub mod error;
pub mod index;
pub mod ingest;
pub mod param;
pub mod points;
pub mod result;
pub mod search;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::kdtree::KdTree;
pub use config::{DEFAULT_LEAF_SIZE, IndexConfig};
pub use error::SearchError;
pub use index::{FlatIndex, KdTreeIndex, SearchIndex};
pub use ingest::{Feature, Geometry};
pub use param::{SearchParam, SearchType};
pub use points::PointSet;
pub use result::Neighbors;
