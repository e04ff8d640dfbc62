// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Undirected adjacency graph over segment labels

use super::SegmentLabels;
use crate::error::{SkelError, SkelResult};
use crate::geometry::{Mesh, MeshAdjacency};
use std::collections::BTreeSet;
use tracing::debug;

/// Undirected graph whose vertices are segment ids and whose edges record
/// "these two segments share a mesh boundary". At most one edge per unordered
/// pair, never a self-loop.
#[derive(Debug, Clone)]
pub struct SegmentGraph {
    adjacency: Vec<BTreeSet<usize>>,
    edge_count: usize,
}

impl SegmentGraph {
    /// Edgeless graph over `vertex_count` segment ids.
    pub fn with_vertices(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Build the graph from a label map: one edge wherever two faces of
    /// different segments are adjacent across a shared (non-boundary) edge.
    pub fn from_labels(mesh: &Mesh, labels: &SegmentLabels) -> SkelResult<Self> {
        if labels.face_count() != mesh.triangle_count() {
            return Err(SkelError::InvalidFaceIndex {
                index: mesh.triangle_count(),
                len: labels.face_count(),
            });
        }

        let adjacency = MeshAdjacency::build(mesh);
        let mut graph = Self::with_vertices(labels.segment_count());

        for face in 0..mesh.triangle_count() {
            let label = labels.label_of(face)?;
            for neighbor in adjacency.face_neighbors(face).iter().flatten() {
                let neighbor_label = labels.label_of(*neighbor)?;
                if label != neighbor_label {
                    graph.add_edge(label, neighbor_label)?;
                }
            }
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "built segment adjacency graph"
        );
        Ok(graph)
    }

    /// Insert the unordered edge `a`-`b`. Returns whether the edge was new;
    /// repeated insertion and self-loops leave the graph unchanged.
    pub fn add_edge(&mut self, a: usize, b: usize) -> SkelResult<bool> {
        let count = self.adjacency.len();
        for id in [a, b] {
            if id >= count {
                return Err(SkelError::InvalidSegmentIndex { index: id, count });
            }
        }
        if a == b {
            return Ok(false);
        }
        if self.adjacency[a].insert(b) {
            self.adjacency[b].insert(a);
            self.edge_count += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Whether the unordered edge `a`-`b` is present.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency.get(a).is_some_and(|set| set.contains(&b))
    }

    /// Segments adjacent to `segment`, ascending.
    pub fn neighbors(&self, segment: usize) -> SkelResult<impl Iterator<Item = usize> + '_> {
        self.adjacency
            .get(segment)
            .map(|set| set.iter().copied())
            .ok_or(SkelError::InvalidSegmentIndex {
                index: segment,
                count: self.adjacency.len(),
            })
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
