// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! One-ring and face-adjacency queries derived from a mesh snapshot
//!
//! Built once from the current connectivity; any structural edit to the mesh
//! invalidates the structure and it must be rebuilt.

use super::Mesh;
use ahash::AHashMap;

/// Derived adjacency over a mesh snapshot: per-vertex one-rings, per-vertex
/// incident faces, and per-face edge-adjacent faces with a boundary sentinel.
#[derive(Debug, Clone)]
pub struct MeshAdjacency {
    vertex_neighbors: Vec<Vec<usize>>,
    vertex_faces: Vec<Vec<usize>>,
    face_neighbors: Vec<[Option<usize>; 3]>,
    boundary_vertex: Vec<bool>,
}

impl MeshAdjacency {
    /// Build adjacency from the mesh's current connectivity. Degenerate or
    /// out-of-range triangles contribute nothing.
    pub fn build(mesh: &Mesh) -> Self {
        let vertex_count = mesh.vertex_count();
        let face_count = mesh.triangle_count();

        // Canonical (min, max) edge -> up to two incident faces
        let mut edge_faces: AHashMap<(usize, usize), (usize, [Option<usize>; 2])> =
            AHashMap::new();

        for (face_idx, triangle) in mesh.triangles.iter().enumerate() {
            if triangle.is_degenerate() || triangle.indices.iter().any(|&i| i >= vertex_count) {
                continue;
            }
            for (a, b) in triangle.edges() {
                let key = if a < b { (a, b) } else { (b, a) };
                let entry = edge_faces.entry(key).or_insert((0, [None, None]));
                if entry.0 < 2 {
                    entry.1[entry.0] = Some(face_idx);
                }
                entry.0 += 1;
            }
        }

        let mut vertex_neighbors: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
        let mut boundary_vertex = vec![false; vertex_count];
        for (&(a, b), &(count, _)) in &edge_faces {
            vertex_neighbors[a].push(b);
            vertex_neighbors[b].push(a);
            if count == 1 {
                boundary_vertex[a] = true;
                boundary_vertex[b] = true;
            }
        }
        for ring in &mut vertex_neighbors {
            ring.sort_unstable();
            ring.dedup();
        }

        let mut vertex_faces: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
        let mut face_neighbors = vec![[None, None, None]; face_count];

        for (face_idx, triangle) in mesh.triangles.iter().enumerate() {
            if triangle.is_degenerate() || triangle.indices.iter().any(|&i| i >= vertex_count) {
                continue;
            }
            for &v in &triangle.indices {
                vertex_faces[v].push(face_idx);
            }
            for (slot, (a, b)) in triangle.edges().into_iter().enumerate() {
                let key = if a < b { (a, b) } else { (b, a) };
                if let Some(&(_, faces)) = edge_faces.get(&key) {
                    face_neighbors[face_idx][slot] = faces
                        .into_iter()
                        .flatten()
                        .find(|&other| other != face_idx);
                }
            }
        }

        Self {
            vertex_neighbors,
            vertex_faces,
            face_neighbors,
            boundary_vertex,
        }
    }

    /// Vertices sharing an edge with `vertex`, ascending
    pub fn vertex_neighbors(&self, vertex: usize) -> &[usize] {
        &self.vertex_neighbors[vertex]
    }

    /// Faces incident to `vertex` (the one-ring faces)
    pub fn vertex_faces(&self, vertex: usize) -> &[usize] {
        &self.vertex_faces[vertex]
    }

    /// For each edge slot of `face`, the face across that edge; `None` marks a
    /// mesh boundary
    pub fn face_neighbors(&self, face: usize) -> &[Option<usize>; 3] {
        &self.face_neighbors[face]
    }

    /// Whether `vertex` lies on an edge with fewer than two incident faces
    pub fn is_boundary_vertex(&self, vertex: usize) -> bool {
        self.boundary_vertex[vertex]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_neighbors.len()
    }

    pub fn face_count(&self) -> usize {
        self.face_neighbors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Triangle, Vertex};
    use nalgebra::{Point3, Vector3};

    fn quad() -> Mesh {
        // Two triangles sharing the 0-2 diagonal
        let mut mesh = Mesh::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            mesh.add_vertex(Vertex::new(Point3::new(x, y, 0.0), Vector3::z()));
        }
        mesh.add_triangle(Triangle::new([0, 1, 2]));
        mesh.add_triangle(Triangle::new([0, 2, 3]));
        mesh
    }

    #[test]
    fn test_quad_neighbors() {
        let adjacency = MeshAdjacency::build(&quad());
        assert_eq!(adjacency.vertex_neighbors(0), &[1, 2, 3]);
        assert_eq!(adjacency.vertex_neighbors(1), &[0, 2]);
        assert_eq!(adjacency.vertex_faces(3), &[1]);
    }

    #[test]
    fn test_quad_face_adjacency() {
        let adjacency = MeshAdjacency::build(&quad());
        // Faces meet across the 0-2 diagonal; every other edge is boundary
        assert_eq!(adjacency.face_neighbors(0), &[None, None, Some(1)]);
        assert_eq!(adjacency.face_neighbors(1), &[Some(0), None, None]);
    }

    #[test]
    fn test_quad_boundary() {
        let adjacency = MeshAdjacency::build(&quad());
        for v in 0..4 {
            assert!(adjacency.is_boundary_vertex(v));
        }
    }

    #[test]
    fn test_empty_mesh() {
        let adjacency = MeshAdjacency::build(&Mesh::empty());
        assert_eq!(adjacency.vertex_count(), 0);
        assert_eq!(adjacency.face_count(), 0);
    }
}
