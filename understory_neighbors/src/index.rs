// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `SearchIndex` API and generic implementation over a pluggable backend.

use alloc::sync::Arc;
use core::fmt::Debug;

use tracing::debug;

use crate::backend::Backend;
use crate::backends::flatvec::FlatVec;
use crate::backends::kdtree::KdTree;
use crate::config::IndexConfig;
use crate::error::SearchError;
use crate::ingest::{Feature, Geometry};
use crate::points::PointSet;
use crate::result::Neighbors;

/// A nearest-neighbor index parameterized by a spatial backend.
///
/// The index is either empty or built over exactly one [`PointSet`]. Every
/// `set_*` call drops the previous points and structure first, so a failed
/// ingestion leaves the index empty. Queries on an empty index fail with
/// [`SearchError::IndexNotBuilt`].
///
/// Queries take `&self` and never mutate the index, so a built index can be
/// shared across threads; each thread brings its own [`Neighbors`].
pub struct SearchIndex<B: Backend> {
    config: IndexConfig,
    built: Option<Built<B>>,
}

pub(crate) struct Built<B> {
    points: Arc<PointSet>,
    backend: B,
}

/// Default index using a k-d tree backend.
pub type KdTreeIndex = SearchIndex<KdTree>;

/// Index using linear scans.
pub type FlatIndex = SearchIndex<FlatVec>;

impl<B: Backend> Default for SearchIndex<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> SearchIndex<B> {
    /// Create an empty index with default options.
    pub fn new() -> Self {
        Self {
            config: IndexConfig::default(),
            built: None,
        }
    }

    /// Create an empty index with the given options.
    pub fn with_config(config: IndexConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            built: None,
        })
    }

    /// Build an index over `points` with default options.
    pub fn from_points(points: PointSet) -> Result<Self, SearchError> {
        let mut idx = Self::new();
        idx.set_points(points)?;
        Ok(idx)
    }

    /// Options this index builds with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Replace the points and rebuild.
    pub fn set_points(&mut self, points: PointSet) -> Result<(), SearchError> {
        self.set_shared_points(Arc::new(points))
    }

    /// Replace the points with a shared snapshot and rebuild.
    ///
    /// The snapshot is immutable, so other holders of the `Arc` can keep reading it.
    pub fn set_shared_points(&mut self, points: Arc<PointSet>) -> Result<(), SearchError> {
        self.built = None;
        self.config.validate()?;
        let backend = B::build(&points, self.config.leaf_size);
        debug!(
            points = points.len(),
            dimension = points.dimension(),
            leaf_size = self.config.leaf_size,
            "built search index"
        );
        self.built = Some(Built { points, backend });
        Ok(())
    }

    /// Copy a column-major `dimension × count` matrix and rebuild.
    pub fn set_matrix_data(&mut self, dimension: usize, data: &[f64]) -> Result<(), SearchError> {
        self.built = None;
        self.set_points(PointSet::from_matrix(dimension, data)?)
    }

    /// Index the coordinates of a geometry container.
    pub fn set_geometry(&mut self, geometry: &Geometry<'_>) -> Result<(), SearchError> {
        self.built = None;
        self.set_points(PointSet::try_from(geometry)?)
    }

    /// Index the descriptors of a feature matrix.
    pub fn set_feature(&mut self, feature: &Feature) -> Result<(), SearchError> {
        self.built = None;
        self.set_points(PointSet::try_from(feature)?)
    }

    /// Drop the points and structure.
    pub fn clear(&mut self) {
        self.built = None;
    }

    /// Whether a build has succeeded since the last replacement.
    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    /// The indexed points, if built.
    pub fn points(&self) -> Option<&Arc<PointSet>> {
        self.built.as_ref().map(|b| &b.points)
    }

    /// Dimension of the indexed points, if built.
    pub fn dimension(&self) -> Option<usize> {
        self.built.as_ref().map(|b| b.points.dimension())
    }

    /// Number of indexed points; zero when empty.
    pub fn len(&self) -> usize {
        self.built.as_ref().map_or(0, |b| b.points.len())
    }

    /// True when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.built.is_none()
    }

    /// Up to `k` nearest points to `query`, ascending by distance.
    ///
    /// Equal distances are ordered by ascending point index. Returns the number of
    /// neighbors written to `out`.
    pub fn knn(&self, query: &[f64], k: usize, out: &mut Neighbors) -> Result<usize, SearchError> {
        let built = self.checked(query, out)?;
        built.backend.knn(&built.points, query, k, out);
        Ok(out.len())
    }

    /// Every point within Euclidean `radius` of `query`, in no particular order.
    pub fn radius(
        &self,
        query: &[f64],
        radius: f64,
        out: &mut Neighbors,
    ) -> Result<usize, SearchError> {
        let built = self.checked(query, out)?;
        check_radius(radius, out)?;
        built
            .backend
            .radius(&built.points, query, radius * radius, out);
        Ok(out.len())
    }

    /// Clears `out` and validates state and query dimension before any backend call.
    pub(crate) fn checked(
        &self,
        query: &[f64],
        out: &mut Neighbors,
    ) -> Result<&Built<B>, SearchError> {
        out.clear();
        let Some(built) = self.built.as_ref() else {
            debug!("query rejected: index not built");
            return Err(SearchError::IndexNotBuilt);
        };
        let expected = built.points.dimension();
        if query.len() != expected {
            debug!(expected, actual = query.len(), "query rejected: dimension mismatch");
            return Err(SearchError::DimensionMismatch {
                expected,
                actual: query.len(),
            });
        }
        Ok(built)
    }
}

impl<B> Built<B> {
    pub(crate) fn points(&self) -> &PointSet {
        &self.points
    }

    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }
}

pub(crate) fn check_radius(radius: f64, out: &mut Neighbors) -> Result<(), SearchError> {
    // NaN fails this too.
    if radius >= 0.0 {
        Ok(())
    } else {
        out.clear();
        debug!(radius, "query rejected: negative radius");
        Err(SearchError::InvalidArgument {
            reason: "radius must be non-negative",
        })
    }
}

impl<B: Backend + Debug> Debug for SearchIndex<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("SearchIndex");
        s.field("config", &self.config);
        match &self.built {
            Some(b) => s
                .field("points", &b.points.len())
                .field("dimension", &b.points.dimension())
                .field("backend", &b.backend),
            None => s.field("built", &false),
        };
        s.finish()
    }
}

/// Collect `(index, distance2)` pairs sorted by index, for order-insensitive checks.
#[cfg(test)]
pub(crate) fn sorted_pairs(out: &Neighbors) -> alloc::vec::Vec<(usize, f64)> {
    let mut v: alloc::vec::Vec<_> = out.iter().collect();
    v.sort_by_key(|p| p.0);
    v
}
