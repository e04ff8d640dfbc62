// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Surface mesh representation and in-place editing utilities

use super::BoundingBox;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Vertex with position and normal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }
}

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }

    /// The three directed edges of the triangle, in winding order
    pub fn edges(&self) -> [(usize, usize); 3] {
        [
            (self.indices[0], self.indices[1]),
            (self.indices[1], self.indices[2]),
            (self.indices[2], self.indices[0]),
        ]
    }

    /// A triangle is degenerate when it repeats a vertex index
    pub fn is_degenerate(&self) -> bool {
        self.indices[0] == self.indices[1]
            || self.indices[1] == self.indices[2]
            || self.indices[2] == self.indices[0]
    }
}

/// Triangular surface mesh.
///
/// Vertex and triangle indices are stable across in-place position edits.
/// Structural edits (removing triangles, collapsing vertices) leave garbage
/// behind; indices are only re-densified by an explicit [`Mesh::collect_garbage`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(&self.vertices)
    }

    /// Mean of all vertex positions
    pub fn center_of_mass(&self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let mut sum = Vector3::zeros();
        for vertex in &self.vertices {
            sum += vertex.position.coords;
        }
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Whether the mesh carries garbage: degenerate or out-of-range triangles,
    /// or vertices no triangle references
    pub fn has_garbage(&self) -> bool {
        let mut referenced = vec![false; self.vertices.len()];
        for triangle in &self.triangles {
            if triangle.is_degenerate() {
                return true;
            }
            for &idx in &triangle.indices {
                if idx >= self.vertices.len() {
                    return true;
                }
                referenced[idx] = true;
            }
        }
        !self.triangles.is_empty() && referenced.iter().any(|&used| !used)
    }

    /// Drop degenerate/out-of-range triangles and orphaned vertices, compacting
    /// both arrays. Returns the old-to-new vertex index remap (`None` marks a
    /// removed vertex). A faceless mesh keeps its vertices untouched.
    pub fn collect_garbage(&mut self) -> Vec<Option<usize>> {
        if self.triangles.is_empty() {
            return (0..self.vertices.len()).map(Some).collect();
        }

        let vertex_count = self.vertices.len();
        self.triangles
            .retain(|t| !t.is_degenerate() && t.indices.iter().all(|&i| i < vertex_count));

        let mut referenced = vec![false; self.vertices.len()];
        for triangle in &self.triangles {
            for &idx in &triangle.indices {
                referenced[idx] = true;
            }
        }

        let mut remap: Vec<Option<usize>> = vec![None; self.vertices.len()];
        let mut new_vertices = Vec::new();
        for (old_idx, &used) in referenced.iter().enumerate() {
            if used {
                remap[old_idx] = Some(new_vertices.len());
                new_vertices.push(self.vertices[old_idx]);
            }
        }

        for triangle in &mut self.triangles {
            for idx in &mut triangle.indices {
                // retain above guarantees every surviving index is referenced
                *idx = remap[*idx].unwrap_or(0);
            }
        }

        self.vertices = new_vertices;
        remap
    }

    /// Recompute vertex normals from triangle geometry, area-weighted
    pub fn recompute_normals(&mut self) {
        if self.vertices.is_empty() || self.triangles.is_empty() {
            return;
        }

        let mut normal_sums: Vec<Vector3<f64>> = vec![Vector3::zeros(); self.vertices.len()];

        for triangle in &self.triangles {
            let v0 = &self.vertices[triangle.indices[0]].position;
            let v1 = &self.vertices[triangle.indices[1]].position;
            let v2 = &self.vertices[triangle.indices[2]].position;

            let face_normal = (v1 - v0).cross(&(v2 - v0));
            if face_normal.norm() > 1e-12 {
                for &idx in &triangle.indices {
                    normal_sums[idx] += face_normal;
                }
            }
        }

        for (i, vertex) in self.vertices.iter_mut().enumerate() {
            vertex.normal = if normal_sums[i].norm() > 1e-12 {
                normal_sums[i].normalize()
            } else {
                Vector3::new(0.0, 0.0, 1.0)
            };
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
