// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions from external geometry containers into a [`PointSet`].
//!
//! The containers themselves live elsewhere; this module only borrows their
//! coordinate buffers. Mesh kinds contribute their vertices.

use alloc::vec::Vec;

use tracing::warn;

use crate::error::SearchError;
use crate::points::PointSet;

/// A borrowed view of an external geometry container.
#[derive(Copy, Clone, Debug)]
pub enum Geometry<'a> {
    /// Point cloud positions.
    PointCloud(&'a [[f64; 3]]),
    /// Triangle mesh vertex positions.
    TriangleMesh(&'a [[f64; 3]]),
    /// Half-edge triangle mesh vertex positions.
    HalfEdgeTriangleMesh(&'a [[f64; 3]]),
    /// A raster image. Has no point coordinates.
    Image,
    /// A container of unknown kind.
    Unspecified,
}

impl Geometry<'_> {
    /// Human-readable container kind, used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::PointCloud(_) => "PointCloud",
            Self::TriangleMesh(_) => "TriangleMesh",
            Self::HalfEdgeTriangleMesh(_) => "HalfEdgeTriangleMesh",
            Self::Image => "Image",
            Self::Unspecified => "Unspecified",
        }
    }
}

impl TryFrom<&Geometry<'_>> for PointSet {
    type Error = SearchError;

    fn try_from(geometry: &Geometry<'_>) -> Result<Self, Self::Error> {
        match geometry {
            Geometry::PointCloud(v)
            | Geometry::TriangleMesh(v)
            | Geometry::HalfEdgeTriangleMesh(v) => Self::from_points(*v),
            Geometry::Image | Geometry::Unspecified => {
                let kind = geometry.kind_name();
                warn!(kind, "unsupported geometry type for point indexing");
                Err(SearchError::UnsupportedContainer { kind })
            }
        }
    }
}

/// A feature matrix: one `dimension`-length descriptor per point, column-major.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feature {
    dimension: usize,
    data: Vec<f64>,
}

impl Feature {
    /// Create a feature matrix from column-major `dimension × count` data.
    pub fn new(dimension: usize, data: Vec<f64>) -> Self {
        Self { dimension, data }
    }

    /// Descriptor length.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of descriptors.
    pub fn num(&self) -> usize {
        self.data.len().checked_div(self.dimension).unwrap_or(0)
    }

    /// Flat descriptor buffer.
    pub fn data(&self) -> &[f64] {
        &self.data
    }
}

impl TryFrom<&Feature> for PointSet {
    type Error = SearchError;

    fn try_from(feature: &Feature) -> Result<Self, Self::Error> {
        Self::from_matrix(feature.dimension, &feature.data)
    }
}

#[cfg(feature = "kurbo")]
impl TryFrom<&[kurbo::Point]> for PointSet {
    type Error = SearchError;

    /// Ingest 2D points as `[x, y]` rows.
    fn try_from(points: &[kurbo::Point]) -> Result<Self, Self::Error> {
        let mut data = Vec::with_capacity(points.len() * 2);
        for p in points {
            data.push(p.x);
            data.push(p.y);
        }
        Self::from_vec(2, data)
    }
}
