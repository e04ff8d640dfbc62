// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Per-vertex one-ring area tracking

use crate::geometry::{Mesh, MeshAdjacency};
use crate::utils::math::triangle_area;

const AREA_FLOOR: f64 = 1e-12;

/// Tracks, per vertex, the total area of its incident faces: the value at
/// contraction start and the value after the latest step. The ratio of the
/// two classifies vertices as collapsed (low) or under-contracted (high).
#[derive(Debug, Clone)]
pub struct OneRingAreaTracker {
    original: Vec<f64>,
    current: Vec<f64>,
}

impl OneRingAreaTracker {
    /// Capture the one-ring areas of the mesh as the contraction baseline.
    pub fn capture(mesh: &Mesh, adjacency: &MeshAdjacency) -> Self {
        let areas = one_ring_areas(mesh, adjacency);
        Self {
            original: areas.clone(),
            current: areas,
        }
    }

    /// Recompute the current one-ring areas after a displacement step.
    pub fn update(&mut self, mesh: &Mesh, adjacency: &MeshAdjacency) {
        self.current = one_ring_areas(mesh, adjacency);
    }

    /// Replace the current-area state, e.g. when reversing a step.
    pub fn restore(&mut self, current: Vec<f64>) {
        self.current = current;
    }

    /// Snapshot of the current-area state for the reversal record.
    pub fn current_areas(&self) -> &[f64] {
        &self.current
    }

    /// Original one-ring area of `vertex`, captured at contraction start.
    pub fn original_area(&self, vertex: usize) -> f64 {
        self.original[vertex]
    }

    /// Ratio of current to original one-ring area; 1.0 for vertices whose
    /// original ring was already degenerate.
    pub fn ratio(&self, vertex: usize) -> f64 {
        if self.original[vertex] <= AREA_FLOOR {
            return 1.0;
        }
        self.current[vertex] / self.original[vertex]
    }

    /// Mean area ratio over all vertices; 1.0 for an empty mesh.
    pub fn mean_ratio(&self) -> f64 {
        if self.original.is_empty() {
            return 1.0;
        }
        let sum: f64 = (0..self.original.len()).map(|v| self.ratio(v)).sum();
        sum / self.original.len() as f64
    }

    /// Vertices whose area ratio fell below `threshold` (collapsed).
    pub fn vertices_below(&self, threshold: f64) -> Vec<usize> {
        (0..self.original.len())
            .filter(|&v| self.ratio(v) < threshold)
            .collect()
    }

    /// Vertices whose area ratio exceeds `threshold` (expanding).
    pub fn vertices_above(&self, threshold: f64) -> Vec<usize> {
        (0..self.original.len())
            .filter(|&v| self.ratio(v) > threshold)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}

fn one_ring_areas(mesh: &Mesh, adjacency: &MeshAdjacency) -> Vec<f64> {
    let mut face_areas = Vec::with_capacity(mesh.triangle_count());
    for triangle in &mesh.triangles {
        face_areas.push(triangle_area(
            &mesh.vertices[triangle.indices[0]].position,
            &mesh.vertices[triangle.indices[1]].position,
            &mesh.vertices[triangle.indices[2]].position,
        ));
    }

    (0..mesh.vertex_count())
        .map(|v| adjacency.vertex_faces(v).iter().map(|&f| face_areas[f]).sum())
        .collect()
}
