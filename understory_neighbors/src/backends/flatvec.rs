// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat backend with linear scans. Small and simple; good for tiny sets.

use crate::backend::Backend;
use crate::points::{PointSet, distance2};
use crate::result::{Candidate, Neighbors};

/// Flat backend with linear scans.
///
/// Holds no structure of its own. Every query touches every point, which also
/// makes it the reference the tree backends are tested against.
#[derive(Clone, Debug, Default)]
pub struct FlatVec {
    len: usize,
}

impl Backend for FlatVec {
    fn build(points: &PointSet, _leaf_size: usize) -> Self {
        Self { len: points.len() }
    }

    fn knn(&self, points: &PointSet, query: &[f64], k: usize, out: &mut Neighbors) {
        debug_assert_eq!(query.len(), points.dimension(), "query dimension must match the points");
        out.clear();
        out.heap.clear();
        if k == 0 {
            return;
        }
        for index in 0..self.len {
            let c = Candidate {
                distance2: distance2(points.point(index), query),
                index,
            };
            if out.heap.len() < k {
                out.heap.push(c);
            } else if let Some(mut worst) = out.heap.peek_mut()
                && c < *worst
            {
                *worst = c;
            }
        }
        out.drain_heap_sorted();
    }

    fn radius(&self, points: &PointSet, query: &[f64], radius2: f64, out: &mut Neighbors) {
        debug_assert_eq!(query.len(), points.dimension(), "query dimension must match the points");
        for index in 0..self.len {
            let d2 = distance2(points.point(index), query);
            if d2 <= radius2 {
                out.push(index, d2);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> PointSet {
        PointSet::from_matrix(1, &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap()
    }

    #[test]
    fn knn_breaks_ties_by_index() {
        let ps = line();
        let b = FlatVec::build(&ps, 15);
        let mut out = Neighbors::new();
        b.knn(&ps, &[2.0], 3, &mut out);
        assert_eq!(out.indices(), &[2, 1, 3]);
        assert_eq!(out.distance2(), &[0.0, 1.0, 1.0]);
    }

    #[test]
    fn knn_caps_at_point_count() {
        let ps = line();
        let b = FlatVec::build(&ps, 15);
        let mut out = Neighbors::new();
        b.knn(&ps, &[10.0], 50, &mut out);
        assert_eq!(out.len(), 5);
        assert_eq!(out.indices(), &[4, 3, 2, 1, 0]);
        b.knn(&ps, &[10.0], 0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn radius_appends_without_clearing() {
        let ps = line();
        let b = FlatVec::build(&ps, 15);
        let mut out = Neighbors::new();
        b.radius(&ps, &[0.0], 0.0, &mut out);
        b.radius(&ps, &[4.0], 1.0, &mut out);
        assert_eq!(out.indices(), &[0, 3, 4]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "query dimension must match the points")]
    fn wrong_query_dimension_panics_in_debug() {
        let ps = line();
        let b = FlatVec::build(&ps, 15);
        let mut out = Neighbors::new();
        b.radius(&ps, &[0.0, 0.0], 1.0, &mut out);
    }
}
