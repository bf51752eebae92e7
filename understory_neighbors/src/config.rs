// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index construction options.

use crate::error::SearchError;

/// Default number of points per k-d tree bucket.
pub const DEFAULT_LEAF_SIZE: usize = 15;

/// Construction options for a [`SearchIndex`](crate::SearchIndex).
///
/// ```
/// use understory_neighbors::IndexConfig;
///
/// let config = IndexConfig::new().with_leaf_size(32);
/// assert!(config.validate().is_ok());
/// assert!(IndexConfig::new().with_leaf_size(0).validate().is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct IndexConfig {
    /// Maximum points per leaf bucket. Larger values make shallower trees with longer scans.
    pub leaf_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            leaf_size: DEFAULT_LEAF_SIZE,
        }
    }
}

impl IndexConfig {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leaf bucket size.
    #[must_use]
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Check option ranges.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.leaf_size == 0 {
            return Err(SearchError::InvalidArgument {
                reason: "leaf_size must be at least 1",
            });
        }
        Ok(())
    }
}
