// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Append-only accumulator for multi-pass skeleton extraction
//!
//! Successive extraction passes (whole mesh, then individual segments) merge
//! their output here. Nodes are pass-local: a batch's nodes are renumbered
//! past the running count and concatenated. Passes over overlapping regions
//! therefore produce coincident but distinct nodes; no cross-pass
//! deduplication by position is attempted.

use crate::error::{SkelError, SkelResult};
use crate::geometry::Mesh;
use ahash::AHashMap;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Accumulated curve skeleton: node positions plus index-pair edges, both
/// append-only across the structure's lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skeleton {
    positions: Vec<Point3<f64>>,
    edges: Vec<[usize; 2]>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the empty skeleton.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.edges.clear();
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Append a batch already renumbered to its own dense index space
    /// `0..positions.len()`. Edges are offset by the running node count;
    /// previously stored nodes and edges are never renumbered or removed.
    pub fn append(&mut self, edges: &[[usize; 2]], positions: &[Point3<f64>]) -> SkelResult<()> {
        for edge in edges {
            for &node in edge {
                if node >= positions.len() {
                    return Err(SkelError::InvalidSkeletonIndex {
                        index: node,
                        len: positions.len(),
                    });
                }
            }
        }

        let offset = self.positions.len();
        self.positions.extend_from_slice(positions);
        self.edges
            .extend(edges.iter().map(|&[a, b]| [a + offset, b + offset]));
        Ok(())
    }

    /// Append a batch of edges given in mesh-index form: distinct mesh
    /// vertices are assigned dense batch-local indices in first-seen order,
    /// their positions pulled from `mesh`, then the batch is appended.
    pub fn append_mesh_edges(
        &mut self,
        edges_in_mesh_indices: &[[usize; 2]],
        mesh: &Mesh,
    ) -> SkelResult<()> {
        let mut remap: AHashMap<usize, usize> = AHashMap::new();
        let mut batch_positions: Vec<Point3<f64>> = Vec::new();
        let mut batch_edges: Vec<[usize; 2]> = Vec::with_capacity(edges_in_mesh_indices.len());

        for edge in edges_in_mesh_indices {
            let mut local = [0usize; 2];
            for (slot, &mesh_index) in edge.iter().enumerate() {
                if mesh_index >= mesh.vertex_count() {
                    return Err(SkelError::InvalidVertexIndex {
                        index: mesh_index,
                        len: mesh.vertex_count(),
                    });
                }
                let next = batch_positions.len();
                let dense = *remap.entry(mesh_index).or_insert(next);
                if dense == next {
                    batch_positions.push(mesh.vertices[mesh_index].position);
                }
                local[slot] = dense;
            }
            batch_edges.push(local);
        }

        self.append(&batch_edges, &batch_positions)
    }
}
