// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Segment labels, segment adjacency topology, and sub-mesh extraction
//!
//! The partitioning algorithm itself is an external oracle behind the
//! [`Segmenter`] trait; this module only consumes its per-face label map.

mod graph;
mod labels;
mod submesh;

pub use graph::SegmentGraph;
pub use labels::{SegmentId, SegmentLabels, Segmenter};
pub use submesh::MeshSegment;
