// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Error types for skeletonization operations
//!
//! Degenerate geometric input (empty or faceless meshes) is never an error:
//! the affected operations degrade to no-ops. Only programmer-error-class
//! conditions (bad indices, absent selection, empty reversal stack) surface
//! here.

use thiserror::Error;

/// Errors that can occur during skeleton extraction and segmentation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkelError {
    /// Mesh vertex index outside the valid range.
    #[error("Invalid vertex index {index} (mesh has {len} vertices)")]
    InvalidVertexIndex { index: usize, len: usize },

    /// Mesh face index outside the valid range.
    #[error("Invalid face index {index} (mesh has {len} faces)")]
    InvalidFaceIndex { index: usize, len: usize },

    /// Segment id outside the valid range.
    #[error("Invalid segment index {index} (segmentation has {count} segments)")]
    InvalidSegmentIndex { index: usize, count: usize },

    /// Skeleton-local edge index outside the appended batch.
    #[error("Invalid skeleton node index {index} (batch has {len} nodes)")]
    InvalidSkeletonIndex { index: usize, len: usize },

    /// Reversal requested with no contraction step on record.
    #[error("No contraction step recorded to reverse")]
    NothingToReverse,

    /// A segment-dependent operation was invoked with no segment selected.
    #[error("No segment is selected")]
    NoSegmentSelected,

    /// A segment-dependent operation was invoked before segmentation ran.
    #[error("Segments have not been computed")]
    SegmentsNotComputed,
}

/// Result type for skeletonization operations.
pub type SkelResult<T> = std::result::Result<T, SkelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SkelError::NothingToReverse;
        assert_eq!(format!("{err}"), "No contraction step recorded to reverse");

        let err = SkelError::InvalidSegmentIndex { index: 7, count: 3 };
        assert!(format!("{err}").contains('7'));
    }
}
