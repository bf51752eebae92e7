// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial search structures.

use crate::points::PointSet;
use crate::result::Neighbors;

/// Spatial backend abstraction used by `SearchIndex`.
///
/// A backend owns only its acceleration structure. The points are passed to
/// every call, and the index guarantees they are the same points the backend
/// was built from. Query points always have the index dimension; callers check
/// this before reaching the backend.
///
/// # Panics
///
/// Query methods may panic when `points` is not the set the backend was built
/// from, or when `query` does not have its dimension. Debug builds assert the
/// dimension.
pub trait Backend: Sized {
    /// Build the structure over `points`, with at most `leaf_size` points per bucket.
    fn build(points: &PointSet, leaf_size: usize) -> Self;

    /// Clear `out` and write up to `k` nearest points, ascending by `(distance2, index)`.
    fn knn(&self, points: &PointSet, query: &[f64], k: usize, out: &mut Neighbors);

    /// Append every point with squared distance `<= radius2`, in any order.
    ///
    /// This does not clear `out`.
    fn radius(&self, points: &PointSet, query: &[f64], radius2: f64, out: &mut Neighbors);

    /// Append radius results for each query in a flat, point-major buffer.
    ///
    /// Results for different queries are concatenated and may repeat indices.
    fn radius_batch(&self, points: &PointSet, queries: &[f64], radius2: f64, out: &mut Neighbors) {
        for query in queries.chunks_exact(points.dimension()) {
            self.radius(points, query, radius2, out);
        }
    }
}
