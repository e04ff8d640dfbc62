// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Editor API for interactive multi-pass skeleton extraction

use crate::contraction::{ContractionOutcome, ContractionParams, MeshContractor};
use crate::error::{SkelError, SkelResult};
use crate::geometry::Mesh;
use crate::segmentation::{MeshSegment, SegmentGraph, SegmentId, SegmentLabels, Segmenter};
use crate::skeleton::Skeleton;
use crate::surgery::ConnectivitySurgeon;
use crate::utils::math::vertex_centroid;
use nalgebra::Point3;
use tracing::info;

/// Orchestrates skeleton extraction over an owned mesh: whole-mesh
/// contraction and surgery, segmentation-driven per-segment passes, and the
/// accumulated skeleton that merges them.
///
/// Holds at most one whole-mesh contractor and, independently, at most one
/// selected-segment contractor; changing the selection discards and rebuilds
/// the latter, so the two working copies never alias.
pub struct SkeletonEditor {
    mesh: Mesh,
    params: ContractionParams,
    contractor: MeshContractor,
    labels: Option<SegmentLabels>,
    segment_graph: Option<SegmentGraph>,
    selected_segment: Option<SegmentId>,
    segment: Option<MeshSegment>,
    segment_contractor: Option<MeshContractor>,
    skeleton: Skeleton,
    skeleton_mesh_mapping: Vec<Vec<usize>>,
}

impl SkeletonEditor {
    /// Editor with default contraction parameters.
    pub fn new(mesh: Mesh) -> Self {
        Self::with_params(mesh, ContractionParams::default())
    }

    pub fn with_params(mesh: Mesh, params: ContractionParams) -> Self {
        let contractor = MeshContractor::with_params(&mesh, params.clone());
        Self {
            mesh,
            params,
            contractor,
            labels: None,
            segment_graph: None,
            selected_segment: None,
            segment: None,
            segment_contractor: None,
            skeleton: Skeleton::new(),
            skeleton_mesh_mapping: Vec::new(),
        }
    }

    /// Replace the working mesh, discarding segmentation, selection, the
    /// accumulated skeleton, and all contraction state.
    pub fn reset(&mut self, mesh: Mesh) {
        *self = Self::with_params(mesh, self.params.clone());
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn segment_graph(&self) -> Option<&SegmentGraph> {
        self.segment_graph.as_ref()
    }

    pub fn segment_labels(&self) -> Option<&SegmentLabels> {
        self.labels.as_ref()
    }

    pub fn selected_segment(&self) -> Option<SegmentId> {
        self.selected_segment
    }

    /// Fibers of the last whole-mesh surgery pass, indexed by mesh vertex.
    pub fn skeleton_mesh_mapping(&self) -> &[Vec<usize>] {
        &self.skeleton_mesh_mapping
    }

    /// One whole-mesh contraction step, read back into the owned mesh.
    pub fn contract_step(&mut self) {
        self.contractor.execute_contraction_step();
        self.mesh = self.contractor.contracted_mesh();
    }

    /// Automatic whole-mesh contraction to convergence (or the iteration cap).
    pub fn contract(&mut self) -> ContractionOutcome {
        let outcome = self.contractor.contract_mesh();
        self.mesh = self.contractor.contracted_mesh();
        outcome
    }

    /// Undo the latest whole-mesh contraction step.
    pub fn reverse_contraction_step(&mut self) -> SkelResult<()> {
        self.contractor.execute_contraction_reversing_step()?;
        self.mesh = self.contractor.contracted_mesh();
        Ok(())
    }

    /// Diagnostic: collapsed vertices of the whole-mesh contraction.
    pub fn low_area_vertices(&self) -> Vec<usize> {
        self.contractor.low_one_ring_area_vertices()
    }

    /// Diagnostic: under-contracted vertices of the whole-mesh contraction.
    pub fn high_area_vertices(&self) -> Vec<usize> {
        self.contractor.high_one_ring_area_vertices()
    }

    /// Run connectivity surgery on the owned (contracted) mesh and merge the
    /// resulting skeleton edges into the accumulated skeleton.
    pub fn connectivity_surgery(&mut self) -> SkelResult<()> {
        let mut surgeon = ConnectivitySurgeon::new(&self.mesh);
        surgeon.execute_connectivity_surgery();
        let edges = surgeon.skeleton_edges();
        self.skeleton_mesh_mapping = surgeon.skeleton_mesh_mapping();
        self.skeleton.append_mesh_edges(&edges, &self.mesh)?;
        info!(
            edges = edges.len(),
            skeleton_nodes = self.skeleton.node_count(),
            "whole-mesh surgery merged into skeleton"
        );
        Ok(())
    }

    /// Run the external segmenter and rebuild the segment adjacency graph.
    /// Clears any current selection. Returns the number of segments.
    pub fn compute_segments(&mut self, segmenter: &dyn Segmenter) -> SkelResult<usize> {
        let labels = segmenter.segment(&self.mesh);
        let graph = SegmentGraph::from_labels(&self.mesh, &labels)?;
        let count = labels.segment_count();
        info!(segments = count, "segmentation recomputed");

        self.labels = Some(labels);
        self.segment_graph = Some(graph);
        self.unselect_segment();
        Ok(count)
    }

    /// Select a segment: extracts its sub-mesh and constructs a fresh
    /// per-segment contractor over it.
    pub fn select_segment(&mut self, segment_id: SegmentId) -> SkelResult<()> {
        let labels = self.labels.as_ref().ok_or(SkelError::SegmentsNotComputed)?;
        let segment = MeshSegment::extract(&self.mesh, labels, segment_id)?;
        self.segment_contractor = Some(MeshContractor::with_params(
            segment.mesh(),
            self.params.clone(),
        ));
        self.segment = Some(segment);
        self.selected_segment = Some(segment_id);
        Ok(())
    }

    /// Drop the selection and its working copies.
    pub fn unselect_segment(&mut self) {
        self.selected_segment = None;
        self.segment = None;
        self.segment_contractor = None;
    }

    /// One contraction step on the selected segment's sub-mesh.
    pub fn contract_segment_step(&mut self) -> SkelResult<()> {
        match (&mut self.segment_contractor, &mut self.segment) {
            (Some(contractor), Some(segment)) => {
                contractor.execute_contraction_step();
                segment.set_mesh(contractor.contracted_mesh())
            }
            _ => Err(SkelError::NoSegmentSelected),
        }
    }

    /// Automatic contraction of the selected segment's sub-mesh.
    pub fn contract_segment(&mut self) -> SkelResult<ContractionOutcome> {
        match (&mut self.segment_contractor, &mut self.segment) {
            (Some(contractor), Some(segment)) => {
                let outcome = contractor.contract_mesh();
                segment.set_mesh(contractor.contracted_mesh())?;
                Ok(outcome)
            }
            _ => Err(SkelError::NoSegmentSelected),
        }
    }

    /// Surgery on the contracted sub-mesh; its skeleton (with sub-mesh
    /// positions) is appended to the accumulated skeleton as a new pass.
    pub fn segment_connectivity_surgery(&mut self) -> SkelResult<()> {
        let segment = self.segment.as_ref().ok_or(SkelError::NoSegmentSelected)?;
        let mut surgeon = ConnectivitySurgeon::new(segment.mesh());
        surgeon.execute_connectivity_surgery();
        let edges = surgeon.skeleton_edges();
        self.skeleton.append_mesh_edges(&edges, segment.mesh())?;
        info!(
            segment = segment.segment_id(),
            edges = edges.len(),
            "segment surgery merged into skeleton"
        );
        Ok(())
    }

    /// Copy the selected segment's edited vertex positions back into the
    /// owned mesh through the correspondence array.
    pub fn write_back_segment(&mut self) -> SkelResult<()> {
        let segment = self.segment.as_ref().ok_or(SkelError::NoSegmentSelected)?;
        segment.write_back(&mut self.mesh)
    }

    /// Center of mass of the surgery fiber that collapsed onto `vertex`;
    /// `None` when nothing folded into that index.
    pub fn fiber_centroid(&self, vertex: usize) -> SkelResult<Option<Point3<f64>>> {
        let fiber = self
            .skeleton_mesh_mapping
            .get(vertex)
            .ok_or(SkelError::InvalidVertexIndex {
                index: vertex,
                len: self.skeleton_mesh_mapping.len(),
            })?;
        Ok(vertex_centroid(&self.mesh, fiber))
    }
}
