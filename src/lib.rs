// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Curveskel
//!
//! A geometric-topological kernel for curve-skeleton extraction from
//! triangulated surface meshes: volume-aware iterative contraction,
//! connectivity surgery into an explicit skeleton graph, segment adjacency
//! topology, and a multi-pass skeleton accumulator for interactive editing.

pub mod contraction;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod segmentation;
pub mod skeleton;
pub mod surgery;
pub mod utils;

pub use contraction::{ContractionOutcome, ContractionParams, MeshContractor, OneRingAreaTracker};
pub use editor::SkeletonEditor;
pub use error::{SkelError, SkelResult};
pub use geometry::{BoundingBox, Mesh, MeshAdjacency, Primitive, Triangle, Vertex};
pub use segmentation::{MeshSegment, SegmentGraph, SegmentId, SegmentLabels, Segmenter};
pub use skeleton::Skeleton;
pub use surgery::ConnectivitySurgeon;

/// One-call whole-mesh pipeline: contract to convergence, run connectivity
/// surgery, and collect the result into a fresh skeleton.
pub fn extract_skeleton(mesh: &Mesh, params: &ContractionParams) -> SkelResult<Skeleton> {
    let mut contractor = MeshContractor::with_params(mesh, params.clone());
    contractor.contract_mesh();
    let contracted = contractor.contracted_mesh();

    let mut surgeon = ConnectivitySurgeon::new(&contracted);
    surgeon.execute_connectivity_surgery();

    let mut skeleton = Skeleton::new();
    skeleton.append_mesh_edges(&surgeon.skeleton_edges(), &contracted)?;
    Ok(skeleton)
}
