// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable query output buffers.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// Query output: parallel sequences of point indices and squared distances.
///
/// Reuse one `Neighbors` across many queries to avoid repeated heap allocation
/// in hot loops. Every query clears the previous contents before writing.
///
/// # Example
///
/// ```
/// use understory_neighbors::{KdTreeIndex, Neighbors, PointSet, SearchParam};
///
/// let points = PointSet::from_matrix(1, &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
/// let index = KdTreeIndex::from_points(points).unwrap();
/// let mut out = Neighbors::with_capacity(8);
/// for x in [0.5, 2.5] {
///     index.search(&[x], &SearchParam::Knn { knn: 2 }, &mut out).unwrap();
///     assert_eq!(out.len(), 2);
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    indices: Vec<usize>,
    distance2: Vec<f64>,
    /// Bounded max-heap used by k-selection in backends.
    pub(crate) heap: BinaryHeap<Candidate>,
}

impl Neighbors {
    /// Create empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create buffers with room for `capacity` neighbors.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            distance2: Vec::with_capacity(capacity),
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Point indices, in the order defined by the query kind.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Squared Euclidean distances, parallel to [`indices`](Self::indices).
    pub fn distance2(&self) -> &[f64] {
        &self.distance2
    }

    /// Number of neighbors found.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True if no neighbors were found.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate `(index, distance2)` pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, f64)> + '_ {
        self.indices
            .iter()
            .copied()
            .zip(self.distance2.iter().copied())
    }

    /// Remove all neighbors, keeping allocations.
    pub fn clear(&mut self) {
        self.indices.clear();
        self.distance2.clear();
    }

    #[inline]
    pub(crate) fn push(&mut self, index: usize, distance2: f64) {
        self.indices.push(index);
        self.distance2.push(distance2);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.indices.truncate(len);
        self.distance2.truncate(len);
    }

    /// Drain the k-selection heap into the output in ascending order.
    pub(crate) fn drain_heap_sorted(&mut self) {
        let heap = core::mem::take(&mut self.heap);
        let mut sorted = heap.into_sorted_vec();
        for c in &sorted {
            self.push(c.index, c.distance2);
        }
        sorted.clear();
        // Hand the allocation back for the next query.
        self.heap = BinaryHeap::from(sorted);
    }
}

/// A k-selection candidate ordered by `(distance2, index)`.
///
/// The max-heap keeps the current worst candidate on top, so equal distances
/// resolve toward lower indices.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Candidate {
    pub(crate) distance2: f64,
    pub(crate) index: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance2
            .total_cmp(&other.distance2)
            .then(self.index.cmp(&other.index))
    }
}
