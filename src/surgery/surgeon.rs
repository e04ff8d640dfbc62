// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Thinning collapse of a near-degenerate mesh into a skeleton graph
//!
//! Works on a snapshot of the mesh connectivity: while any triangle survives,
//! each surviving triangle nominates its shortest edge and the candidates are
//! collapsed shortest-first through a union-find, one independent set of
//! merges per pass. When no 2D region is left, the surviving edges form a
//! curve network over the original vertex index space.

use crate::geometry::Mesh;
use ahash::AHashSet;
use nalgebra::Point3;
use tracing::debug;

/// Collapses the degenerate regions of a (typically contracted) mesh into a
/// 1-skeleton. Vertex indices in the output refer to the mesh the surgeon was
/// constructed from; positions stay untouched, so the surviving indices can
/// be resolved against that same mesh.
pub struct ConnectivitySurgeon {
    positions: Vec<Point3<f64>>,
    faces: Vec<[usize; 3]>,
    parent: Vec<usize>,
}

impl ConnectivitySurgeon {
    /// Snapshot the mesh connectivity. Degenerate and out-of-range triangles
    /// are ignored from the start.
    pub fn new(mesh: &Mesh) -> Self {
        let positions: Vec<Point3<f64>> = mesh.vertices.iter().map(|v| v.position).collect();
        let faces = mesh
            .triangles
            .iter()
            .filter(|t| !t.is_degenerate() && t.indices.iter().all(|&i| i < positions.len()))
            .map(|t| t.indices)
            .collect();
        let parent = (0..positions.len()).collect();
        Self {
            positions,
            faces,
            parent,
        }
    }

    /// Collapse until no triangle survives. Safe to call on empty, faceless,
    /// or already-minimal meshes: the collapse map degrades to the identity.
    pub fn execute_connectivity_surgery(&mut self) {
        let vertex_count = self.positions.len();
        let mut merges = 0usize;

        // Each pass merges at least one pair while faces survive, so the
        // vertex count bounds the number of passes.
        for _ in 0..=vertex_count {
            let active = self.active_faces();
            if active.is_empty() {
                break;
            }

            let mut candidates: Vec<(f64, usize, usize)> = active
                .iter()
                .map(|&face| self.shortest_edge(face))
                .collect();
            candidates
                .sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            let mut touched: AHashSet<usize> = AHashSet::new();
            for (_, a, b) in candidates {
                let ra = self.root(a);
                let rb = self.root(b);
                if ra == rb || touched.contains(&ra) || touched.contains(&rb) {
                    continue;
                }
                let (keep, gone) = if ra < rb { (ra, rb) } else { (rb, ra) };
                self.parent[gone] = keep;
                touched.insert(keep);
                touched.insert(gone);
                merges += 1;
            }
        }

        debug!(merges, vertices = vertex_count, "connectivity surgery finished");
    }

    /// Surviving edges as unordered pairs of original vertex indices, sorted
    /// and deduplicated.
    pub fn skeleton_edges(&self) -> Vec<[usize; 2]> {
        let mut seen: AHashSet<(usize, usize)> = AHashSet::new();
        let mut edges = Vec::new();
        for face in &self.faces {
            for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                let ra = self.root(a);
                let rb = self.root(b);
                if ra == rb {
                    continue;
                }
                let key = if ra < rb { (ra, rb) } else { (rb, ra) };
                if seen.insert(key) {
                    edges.push([key.0, key.1]);
                }
            }
        }
        edges.sort_unstable();
        edges
    }

    /// Fiber of every vertex index: for a surviving representative, all
    /// original vertices (itself included) folded into it; empty for indices
    /// that collapsed away. Every referenced index is within the vertex range
    /// of the mesh the surgeon was built from.
    pub fn skeleton_mesh_mapping(&self) -> Vec<Vec<usize>> {
        let mut mapping: Vec<Vec<usize>> = vec![Vec::new(); self.positions.len()];
        for v in 0..self.positions.len() {
            mapping[self.root(v)].push(v);
        }
        mapping
    }

    /// Faces that still span three distinct representatives, deduplicated by
    /// their sorted representative triple.
    fn active_faces(&self) -> Vec<[usize; 3]> {
        let mut seen: AHashSet<[usize; 3]> = AHashSet::new();
        let mut active = Vec::new();
        for face in &self.faces {
            let mapped = [self.root(face[0]), self.root(face[1]), self.root(face[2])];
            if mapped[0] == mapped[1] || mapped[1] == mapped[2] || mapped[0] == mapped[2] {
                continue;
            }
            let mut key = mapped;
            key.sort_unstable();
            if seen.insert(key) {
                active.push(mapped);
            }
        }
        active
    }

    /// Shortest edge of a representative-space face, as (length, a, b) with
    /// the pair in canonical order for deterministic tie-breaking.
    fn shortest_edge(&self, face: [usize; 3]) -> (f64, usize, usize) {
        let mut best: Option<(f64, usize, usize)> = None;
        for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            let length = (self.positions[lo] - self.positions[hi]).norm();
            let candidate = (length, lo, hi);
            if best.map_or(true, |current| candidate < current) {
                best = Some(candidate);
            }
        }
        // Face has three edges; best is always set
        best.unwrap_or((0.0, face[0], face[1]))
    }

    /// Representative of `v` without path mutation, keeping accessors `&self`.
    fn root(&self, mut v: usize) -> usize {
        while self.parent[v] != v {
            v = self.parent[v];
        }
        v
    }
}
