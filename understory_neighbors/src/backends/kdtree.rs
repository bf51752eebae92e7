// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static k-d tree backend with median splits and bucketed leaves.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::points::{PointSet, distance2};
use crate::result::{Candidate, Neighbors};

/// A k-d tree over a fixed point set.
///
/// Internal nodes split at the median along the axis of widest extent. Leaves
/// hold at most `leaf_size` points unless all of their points coincide.
/// Every node keeps its tight bounding box for pruning.
pub struct KdTree {
    leaf_size: usize,
    dimension: usize,
    // A `PointSet` is never empty, so every tree has a root.
    root: NodeIdx,
    arena: Vec<Node>,
    /// Per-node `[lo; dimension]` followed by `[hi; dimension]`.
    bounds: Vec<f64>,
    /// Point indices permuted so every leaf owns a contiguous range.
    order: Vec<usize>,
}

#[derive(Copy, Clone)]
enum Node {
    Leaf {
        start: usize,
        end: usize,
    },
    Internal {
        axis: usize,
        split: f64,
        left: NodeIdx,
        right: NodeIdx,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

impl KdTree {
    fn build_node(&mut self, points: &PointSet, start: usize, end: usize) -> NodeIdx {
        let idx = self.arena.len();
        self.arena.push(Node::Leaf { start, end });

        let d = self.dimension;
        let base = self.bounds.len();
        self.bounds.resize(base + 2 * d, 0.0);
        self.bounds[base..base + d].copy_from_slice(points.point(self.order[start]));
        self.bounds[base + d..base + 2 * d].copy_from_slice(points.point(self.order[start]));
        for &i in &self.order[start + 1..end] {
            let p = points.point(i);
            for axis in 0..d {
                if p[axis] < self.bounds[base + axis] {
                    self.bounds[base + axis] = p[axis];
                }
                if p[axis] > self.bounds[base + d + axis] {
                    self.bounds[base + d + axis] = p[axis];
                }
            }
        }

        // Widest axis; a zero extent means every point coincides and cannot split.
        let mut axis = 0;
        let mut extent = 0.0;
        for a in 0..d {
            let e = self.bounds[base + d + a] - self.bounds[base + a];
            if e > extent {
                extent = e;
                axis = a;
            }
        }
        let count = end - start;
        if count <= self.leaf_size || extent <= 0.0 {
            return NodeIdx::new(idx);
        }

        let half = count / 2;
        self.order[start..end].select_nth_unstable_by(half, |&a, &b| {
            points.point(a)[axis].total_cmp(&points.point(b)[axis])
        });
        let mid = start + half;
        let split = points.point(self.order[mid])[axis];

        let left = self.build_node(points, start, mid);
        let right = self.build_node(points, mid, end);
        self.arena[idx] = Node::Internal {
            axis,
            split,
            left,
            right,
        };
        NodeIdx::new(idx)
    }

    /// Squared distance from `query` to the bounding box of `node`.
    #[inline]
    fn box_distance2(&self, node: NodeIdx, query: &[f64]) -> f64 {
        let d = self.dimension;
        let base = node.get() * 2 * d;
        let lo = &self.bounds[base..base + d];
        let hi = &self.bounds[base + d..base + 2 * d];
        let mut acc = 0.0;
        for axis in 0..d {
            let q = query[axis];
            let gap = if q < lo[axis] {
                lo[axis] - q
            } else if q > hi[axis] {
                q - hi[axis]
            } else {
                0.0
            };
            acc += gap * gap;
        }
        acc
    }

    fn knn_node(
        &self,
        points: &PointSet,
        node: NodeIdx,
        query: &[f64],
        k: usize,
        heap: &mut BinaryHeap<Candidate>,
    ) {
        // Strict comparison keeps equally distant boxes so index tie-breaks match a full scan.
        if heap.len() == k
            && let Some(worst) = heap.peek()
            && self.box_distance2(node, query) > worst.distance2
        {
            return;
        }
        match self.arena[node.get()] {
            Node::Leaf { start, end } => {
                for &index in &self.order[start..end] {
                    let c = Candidate {
                        distance2: distance2(points.point(index), query),
                        index,
                    };
                    if heap.len() < k {
                        heap.push(c);
                    } else if let Some(mut worst) = heap.peek_mut()
                        && c < *worst
                    {
                        *worst = c;
                    }
                }
            }
            Node::Internal {
                axis,
                split,
                left,
                right,
            } => {
                let (near, far) = if query[axis] < split {
                    (left, right)
                } else {
                    (right, left)
                };
                self.knn_node(points, near, query, k, heap);
                self.knn_node(points, far, query, k, heap);
            }
        }
    }

    fn radius_node(
        &self,
        points: &PointSet,
        node: NodeIdx,
        query: &[f64],
        radius2: f64,
        out: &mut Neighbors,
    ) {
        if self.box_distance2(node, query) > radius2 {
            return;
        }
        match self.arena[node.get()] {
            Node::Leaf { start, end } => {
                for &index in &self.order[start..end] {
                    let d2 = distance2(points.point(index), query);
                    if d2 <= radius2 {
                        out.push(index, d2);
                    }
                }
            }
            Node::Internal { left, right, .. } => {
                self.radius_node(points, left, query, radius2, out);
                self.radius_node(points, right, query, radius2, out);
            }
        }
    }
}

impl Backend for KdTree {
    fn build(points: &PointSet, leaf_size: usize) -> Self {
        let mut tree = Self {
            leaf_size: leaf_size.max(1),
            dimension: points.dimension(),
            root: NodeIdx::new(0),
            arena: Vec::new(),
            bounds: Vec::new(),
            order: (0..points.len()).collect(),
        };
        tree.root = tree.build_node(points, 0, points.len());
        tree
    }

    fn knn(&self, points: &PointSet, query: &[f64], k: usize, out: &mut Neighbors) {
        debug_assert_eq!(query.len(), self.dimension, "query dimension must match the tree");
        out.clear();
        out.heap.clear();
        if k == 0 {
            return;
        }
        self.knn_node(points, self.root, query, k, &mut out.heap);
        out.drain_heap_sorted();
    }

    fn radius(&self, points: &PointSet, query: &[f64], radius2: f64, out: &mut Neighbors) {
        debug_assert_eq!(query.len(), self.dimension, "query dimension must match the tree");
        self.radius_node(points, self.root, query, radius2, out);
    }
}

impl Debug for KdTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self
            .arena
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count();
        f.debug_struct("KdTree")
            .field("leaf_size", &self.leaf_size)
            .field("dimension", &self.dimension)
            .field("points", &self.order.len())
            .field("arena_nodes", &self.arena.len())
            .field("leaves", &leaves)
            .finish_non_exhaustive()
    }
}
