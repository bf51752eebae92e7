// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query descriptors and their numeric type codes.

use crate::error::SearchError;

/// Which neighbors a [`search`](crate::SearchIndex::search) call returns.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum SearchParam {
    /// The `knn` nearest points, ascending by distance.
    Knn {
        /// Number of neighbors requested.
        knn: usize,
    },
    /// Every point within `radius`, unordered.
    Radius {
        /// Euclidean search radius (not squared).
        radius: f64,
    },
    /// Up to `max_nn` nearest points, cut off at `radius`. Ascending by distance.
    Hybrid {
        /// Euclidean search radius (not squared).
        radius: f64,
        /// At most this many neighbors are returned.
        max_nn: usize,
    },
    /// Points reachable from the seed through at most `chain_length` hops of
    /// `radius_local`, in discovery order.
    NnChain {
        /// Radius of each hop.
        radius_local: f64,
        /// Maximum number of hops.
        chain_length: usize,
    },
}

impl Default for SearchParam {
    fn default() -> Self {
        Self::Knn { knn: 30 }
    }
}

impl SearchParam {
    /// The type code of this descriptor.
    pub const fn search_type(&self) -> SearchType {
        match self {
            Self::Knn { .. } => SearchType::Knn,
            Self::Radius { .. } => SearchType::Radius,
            Self::Hybrid { .. } => SearchType::Hybrid,
            Self::NnChain { .. } => SearchType::NnChain,
        }
    }
}

/// Numeric search type codes, for hosts that store query kinds as integers.
///
/// ```
/// use understory_neighbors::{SearchError, SearchType};
///
/// assert_eq!(SearchType::try_from(2), Ok(SearchType::Hybrid));
/// assert_eq!(
///     SearchType::try_from(7),
///     Err(SearchError::UnsupportedQuery { tag: 7 })
/// );
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SearchType {
    /// Pure k-nearest search.
    Knn = 0,
    /// Pure radius search.
    Radius = 1,
    /// k-nearest capped by a radius.
    Hybrid = 2,
    /// Chained radius search.
    NnChain = 3,
}

impl TryFrom<u8> for SearchType {
    type Error = SearchError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Knn),
            1 => Ok(Self::Radius),
            2 => Ok(Self::Hybrid),
            3 => Ok(Self::NnChain),
            _ => Err(SearchError::UnsupportedQuery { tag }),
        }
    }
}

impl From<SearchType> for u8 {
    fn from(t: SearchType) -> Self {
        t as Self
    }
}
