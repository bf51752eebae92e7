// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by ingestion, build, and query operations.

/// Error type for all fallible operations in this crate.
///
/// Every variant is a local, recoverable condition. Query loops can match on
/// the variant and keep going.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Ingestion produced zero points or zero dimensions.
    #[error("no data to index (dimension {dimension}, count {count})")]
    EmptyData {
        /// Dimension of the rejected input.
        dimension: usize,
        /// Number of points in the rejected input.
        count: usize,
    },

    /// Ingestion was given a container kind with no coordinate extraction.
    #[error("unsupported geometry container: {kind}")]
    UnsupportedContainer {
        /// Name of the container kind.
        kind: &'static str,
    },

    /// A query was issued before a successful build.
    #[error("index has not been built")]
    IndexNotBuilt,

    /// The query point dimension differs from the index dimension.
    #[error("query dimension {actual} does not match index dimension {expected}")]
    DimensionMismatch {
        /// Dimension of the indexed points.
        expected: usize,
        /// Dimension of the query point.
        actual: usize,
    },

    /// A parameter is out of range.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },

    /// A search type code does not name a known query kind.
    #[error("unsupported search type {tag}")]
    UnsupportedQuery {
        /// The unrecognized type code.
        tag: u8,
    },
}
