// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chained radius search: region growing through successive local balls.
//!
//! A single large ball around the seed pulls in points that are close in
//! space but not connected to the seed through the sampled surface. Chaining
//! many small balls follows connectivity instead:
//!
//! 1. Every point within `radius_local * chain_length` of the seed is a candidate.
//! 2. Hop one explores the ball of `radius_local` around the seed.
//! 3. Each later hop explores the balls around the points first reached by the
//!    previous hop. Points already reached are never explored twice.
//! 4. The result is every reached point that is also a candidate, with its squared
//!    distance to the seed, in the order points were reached.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::backend::Backend;
use crate::error::SearchError;
use crate::index::SearchIndex;
use crate::result::Neighbors;

impl<B: Backend> SearchIndex<B> {
    /// Points reachable from `query` in at most `chain_length` hops of `radius_local`.
    ///
    /// `chain_length == 0` reaches nothing. When a hop reaches no new points the
    /// search stops early; the candidate filter still applies.
    ///
    /// ```
    /// use understory_neighbors::{KdTreeIndex, Neighbors, PointSet};
    ///
    /// let points = PointSet::from_matrix(1, &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let index = KdTreeIndex::from_points(points).unwrap();
    /// let mut out = Neighbors::new();
    ///
    /// assert_eq!(index.nn_chain(&[0.0], 1.1, 2, &mut out), Ok(3));
    /// assert_eq!(out.indices(), &[0, 1, 2]);
    /// assert_eq!(out.distance2(), &[0.0, 1.0, 4.0]);
    /// ```
    pub fn nn_chain(
        &self,
        query: &[f64],
        radius_local: f64,
        chain_length: usize,
        out: &mut Neighbors,
    ) -> Result<usize, SearchError> {
        let built = self.checked(query, out)?;
        if !radius_local.is_finite() || radius_local < 0.0 {
            debug!(radius_local, "chain query rejected: invalid local radius");
            return Err(SearchError::InvalidArgument {
                reason: "radius_local must be finite and non-negative",
            });
        }
        let points = built.points();
        let backend = built.backend();
        let dim = points.dimension();

        let reach = radius_local * chain_length as f64;
        let mut hits = Neighbors::new();
        backend.radius(points, query, reach * reach, &mut hits);
        let candidates: BTreeMap<usize, f64> = hits.iter().collect();

        let radius2 = radius_local * radius_local;
        let mut visited = BTreeSet::new();
        let mut reached: Vec<usize> = Vec::new();
        let mut frontier: Vec<usize> = Vec::new();

        for hop in 0..chain_length {
            // Scratch coordinates for this hop only.
            let queries: Vec<f64> = if hop == 0 {
                query.to_vec()
            } else {
                let mut q = Vec::with_capacity(frontier.len() * dim);
                for &i in &frontier {
                    q.extend_from_slice(points.point(i));
                }
                q
            };
            hits.clear();
            backend.radius_batch(points, &queries, radius2, &mut hits);

            frontier.clear();
            for &i in hits.indices() {
                if visited.insert(i) {
                    reached.push(i);
                    frontier.push(i);
                }
            }
            trace!(hop, discovered = frontier.len(), total = reached.len(), "chain hop");
            if frontier.is_empty() {
                break;
            }
        }

        for i in reached {
            if let Some(&d2) = candidates.get(&i) {
                out.push(i, d2);
            }
        }
        Ok(out.len())
    }
}
