// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query dispatch over [`SearchParam`] descriptors.

use crate::backend::Backend;
use crate::error::SearchError;
use crate::index::{SearchIndex, check_radius};
use crate::param::SearchParam;
use crate::result::Neighbors;

impl<B: Backend> SearchIndex<B> {
    /// Run the query described by `param` around `query`.
    ///
    /// Writes the neighbors to `out` and returns their count. On failure `out`
    /// is left empty.
    ///
    /// ```
    /// use understory_neighbors::{KdTreeIndex, Neighbors, PointSet, SearchParam};
    ///
    /// let points = PointSet::from_matrix(1, &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let index = KdTreeIndex::from_points(points).unwrap();
    /// let mut out = Neighbors::new();
    ///
    /// let param = SearchParam::Hybrid { radius: 1.0, max_nn: 10 };
    /// assert_eq!(index.search(&[2.0], &param, &mut out), Ok(3));
    /// assert_eq!(out.indices(), &[2, 1, 3]);
    /// ```
    pub fn search(
        &self,
        query: &[f64],
        param: &SearchParam,
        out: &mut Neighbors,
    ) -> Result<usize, SearchError> {
        match *param {
            SearchParam::Knn { knn } => self.knn(query, knn, out),
            SearchParam::Radius { radius } => self.radius(query, radius, out),
            SearchParam::Hybrid { radius, max_nn } => self.hybrid(query, radius, max_nn, out),
            SearchParam::NnChain {
                radius_local,
                chain_length,
            } => self.nn_chain(query, radius_local, chain_length, out),
        }
    }

    /// Up to `max_nn` nearest points within Euclidean `radius`, ascending by distance.
    ///
    /// The k-nearest result is already sorted, so the radius cut is a binary
    /// search rather than a second tree pass.
    pub fn hybrid(
        &self,
        query: &[f64],
        radius: f64,
        max_nn: usize,
        out: &mut Neighbors,
    ) -> Result<usize, SearchError> {
        let built = self.checked(query, out)?;
        check_radius(radius, out)?;
        built.backend().knn(built.points(), query, max_nn, out);
        let radius2 = radius * radius;
        let keep = out.distance2().partition_point(|&d2| d2 <= radius2);
        out.truncate(keep);
        Ok(keep)
    }
}
