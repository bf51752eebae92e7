// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different search strategies.
//!
//! - `kdtree`: static k-d tree with median splits on the widest axis and bucketed leaves.
//! - `flatvec`: linear scans over every point (small, simple, exact reference).
//!
//! k-d tree note
//! -------------
//! Each node stores the tight bounding box of its points. Queries skip a subtree
//! when the squared distance from the query to its box exceeds the current bound:
//! the search radius for radius queries, or the worst retained candidate once
//! `k` candidates are held for k-nearest queries. Near children are visited first
//! so the k-nearest bound shrinks early.
//!
//! `leaf_size` trades tree depth against bucket scan length. Points that all
//! coincide are never split, so such a bucket may exceed `leaf_size`.

pub mod flatvec;
pub mod kdtree;
