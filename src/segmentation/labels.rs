// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Per-face segment label map

use crate::error::{SkelError, SkelResult};
use crate::geometry::Mesh;
use serde::{Deserialize, Serialize};

/// Identifier of a segment, dense in `0..segment_count`.
pub type SegmentId = usize;

/// External mesh partitioning oracle. Implementations return one label per
/// face; the crate never looks inside the algorithm.
pub trait Segmenter {
    fn segment(&self, mesh: &Mesh) -> SegmentLabels;
}

/// A validated face-to-segment assignment: every face carries exactly one
/// label in `0..segment_count`. Stable until the mesh topology changes or
/// segmentation is recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentLabels {
    face_labels: Vec<SegmentId>,
    segment_count: usize,
}

impl SegmentLabels {
    /// Validate and wrap a label assignment. Every label must be below
    /// `segment_count`.
    pub fn new(face_labels: Vec<SegmentId>, segment_count: usize) -> SkelResult<Self> {
        for &label in &face_labels {
            if label >= segment_count {
                return Err(SkelError::InvalidSegmentIndex {
                    index: label,
                    count: segment_count,
                });
            }
        }
        Ok(Self {
            face_labels,
            segment_count,
        })
    }

    /// Label of `face`.
    pub fn label_of(&self, face: usize) -> SkelResult<SegmentId> {
        self.face_labels
            .get(face)
            .copied()
            .ok_or(SkelError::InvalidFaceIndex {
                index: face,
                len: self.face_labels.len(),
            })
    }

    /// Faces carrying `segment`, ascending.
    pub fn faces_of(&self, segment: SegmentId) -> SkelResult<Vec<usize>> {
        if segment >= self.segment_count {
            return Err(SkelError::InvalidSegmentIndex {
                index: segment,
                count: self.segment_count,
            });
        }
        Ok(self
            .face_labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == segment)
            .map(|(face, _)| face)
            .collect())
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn face_count(&self) -> usize {
        self.face_labels.len()
    }
}
