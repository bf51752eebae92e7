// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned point storage the index is built over.

use alloc::vec::Vec;

use tracing::warn;

use crate::error::SearchError;

/// An owned, contiguous snapshot of `len()` points of `dimension()` coordinates.
///
/// Coordinates are stored point-major: point `i` occupies
/// `data[i * dimension..(i + 1) * dimension]`. This is the same layout as a
/// column-major `dimension × count` matrix, so matrix inputs copy straight in.
///
/// A `PointSet` always holds at least one point of at least one dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    dimension: usize,
    data: Vec<f64>,
}

impl PointSet {
    /// Copy a column-major `dimension × count` matrix.
    ///
    /// Fails with [`SearchError::EmptyData`] when either extent is zero, and with
    /// [`SearchError::InvalidArgument`] when `data.len()` is not a multiple of
    /// `dimension`.
    pub fn from_matrix(dimension: usize, data: &[f64]) -> Result<Self, SearchError> {
        Self::from_vec(dimension, data.to_vec())
    }

    /// Take ownership of a column-major `dimension × count` buffer.
    pub fn from_vec(dimension: usize, data: Vec<f64>) -> Result<Self, SearchError> {
        let count = data.len().checked_div(dimension).unwrap_or(0);
        if dimension == 0 || count == 0 {
            warn!(dimension, count, "point set ingestion failed due to no data");
            return Err(SearchError::EmptyData { dimension, count });
        }
        if data.len() != dimension * count {
            warn!(
                dimension,
                len = data.len(),
                "point buffer length is not a multiple of the dimension"
            );
            return Err(SearchError::InvalidArgument {
                reason: "buffer length must be a multiple of the dimension",
            });
        }
        Ok(Self { dimension, data })
    }

    /// Copy a slice of fixed-size points.
    pub fn from_points<const D: usize>(points: &[[f64; D]]) -> Result<Self, SearchError> {
        Self::from_vec(D, points.as_flattened().to_vec())
    }

    /// Dimension of every point.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// True if the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Coordinates of point `index`.
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn point(&self, index: usize) -> &[f64] {
        let start = index * self.dimension;
        &self.data[start..start + self.dimension]
    }

    /// Flat coordinate buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterate points in ingestion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.dimension)
    }
}

/// Squared Euclidean distance between two equal-length coordinate slices.
#[inline]
pub(crate) fn distance2(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "coordinate slices must match");
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
