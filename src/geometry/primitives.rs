// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Geometric primitives generator
//!
//! Closed, vertex-welded meshes suitable for one-ring adjacency queries;
//! every generated mesh is manifold and watertight.

use super::{Mesh, Triangle, Vertex};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Geometric primitives
pub enum Primitive {
    Cube { size: Vector3<f64>, center: bool },
    Icosahedron { r: f64 },
    Cylinder { h: f64, r: f64, fn_: u32 },
}

impl Primitive {
    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn icosahedron(r: f64) -> Self {
        Self::Icosahedron { r }
    }

    pub fn cylinder(h: f64, r: f64, fn_: u32) -> Self {
        let segments = if fn_ > 2 { fn_ } else { 32 };
        Self::Cylinder {
            h,
            r,
            fn_: segments,
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Icosahedron { r } => generate_icosahedron_mesh(*r),
            Self::Cylinder { h, r, fn_ } => generate_cylinder_mesh(*h, *r, *fn_),
        }
    }
}

fn generate_cube_mesh(size: Vector3<f64>, center: bool) -> Mesh {
    let mut mesh = Mesh::new();

    let (min_x, max_x) = if center {
        (-size.x / 2.0, size.x / 2.0)
    } else {
        (0.0, size.x)
    };
    let (min_y, max_y) = if center {
        (-size.y / 2.0, size.y / 2.0)
    } else {
        (0.0, size.y)
    };
    let (min_z, max_z) = if center {
        (-size.z / 2.0, size.z / 2.0)
    } else {
        (0.0, size.z)
    };

    // 8 shared corner vertices
    let positions = [
        Point3::new(min_x, min_y, min_z),
        Point3::new(max_x, min_y, min_z),
        Point3::new(max_x, max_y, min_z),
        Point3::new(min_x, max_y, min_z),
        Point3::new(min_x, min_y, max_z),
        Point3::new(max_x, min_y, max_z),
        Point3::new(max_x, max_y, max_z),
        Point3::new(min_x, max_y, max_z),
    ];

    for position in positions {
        mesh.add_vertex(Vertex::new(position, Vector3::zeros()));
    }

    // 6 faces, two triangles each, outward winding
    let faces = [
        // Front (z+)
        [4, 5, 6],
        [4, 6, 7],
        // Back (z-)
        [1, 0, 3],
        [1, 3, 2],
        // Right (x+)
        [5, 1, 2],
        [5, 2, 6],
        // Left (x-)
        [0, 4, 7],
        [0, 7, 3],
        // Top (y+)
        [7, 6, 2],
        [7, 2, 3],
        // Bottom (y-)
        [0, 1, 5],
        [0, 5, 4],
    ];

    for indices in faces {
        mesh.add_triangle(Triangle::new(indices));
    }

    mesh.recompute_normals();
    mesh
}

fn generate_icosahedron_mesh(radius: f64) -> Mesh {
    let mut mesh = Mesh::new();
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;

    let raw = [
        (-1.0, phi, 0.0),
        (1.0, phi, 0.0),
        (-1.0, -phi, 0.0),
        (1.0, -phi, 0.0),
        (0.0, -1.0, phi),
        (0.0, 1.0, phi),
        (0.0, -1.0, -phi),
        (0.0, 1.0, -phi),
        (phi, 0.0, -1.0),
        (phi, 0.0, 1.0),
        (-phi, 0.0, -1.0),
        (-phi, 0.0, 1.0),
    ];

    for (x, y, z) in raw {
        let direction = Vector3::new(x, y, z).normalize();
        mesh.add_vertex(Vertex::new(Point3::from(direction * radius), direction));
    }

    let faces = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for indices in faces {
        mesh.add_triangle(Triangle::new(indices));
    }

    mesh
}

fn generate_cylinder_mesh(height: f64, radius: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::new();

    // Cap centers at z=0 and z=height
    let bottom_center_idx = mesh.add_vertex(Vertex::new(
        Point3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, -1.0),
    ));
    let top_center_idx = mesh.add_vertex(Vertex::new(
        Point3::new(0.0, 0.0, height),
        Vector3::new(0.0, 0.0, 1.0),
    ));

    let mut bottom_indices = Vec::new();
    let mut top_indices = Vec::new();

    for i in 0..segments {
        let angle = 2.0 * PI * f64::from(i) / f64::from(segments);
        let cos = angle.cos();
        let sin = angle.sin();

        let bottom_pos = Point3::new(radius * cos, radius * sin, 0.0);
        bottom_indices.push(mesh.add_vertex(Vertex::new(bottom_pos, Vector3::zeros())));

        let top_pos = Point3::new(radius * cos, radius * sin, height);
        top_indices.push(mesh.add_vertex(Vertex::new(top_pos, Vector3::zeros())));
    }

    // Caps
    for i in 0..segments as usize {
        let next = (i + 1) % segments as usize;
        mesh.add_triangle(Triangle::new([
            bottom_center_idx,
            bottom_indices[next],
            bottom_indices[i],
        ]));
        mesh.add_triangle(Triangle::new([
            top_center_idx,
            top_indices[i],
            top_indices[next],
        ]));
    }

    // Sides - rim vertices are shared with the caps, keeping the mesh welded
    for i in 0..segments as usize {
        let next = (i + 1) % segments as usize;
        let bi = bottom_indices[i];
        let ti = top_indices[i];
        let bn = bottom_indices[next];
        let tn = top_indices[next];

        mesh.add_triangle(Triangle::new([bi, ti, bn]));
        mesh.add_triangle(Triangle::new([ti, tn, bn]));
    }

    mesh.recompute_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MeshAdjacency;

    #[test]
    fn test_icosahedron_counts() {
        let mesh = generate_icosahedron_mesh(1.0);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 20);
    }

    #[test]
    fn test_icosahedron_is_closed() {
        let mesh = generate_icosahedron_mesh(1.0);
        let adjacency = MeshAdjacency::build(&mesh);
        for v in 0..mesh.vertex_count() {
            assert_eq!(adjacency.vertex_neighbors(v).len(), 5);
            assert!(!adjacency.is_boundary_vertex(v));
        }
    }

    #[test]
    fn test_cube_is_welded() {
        let mesh = generate_cube_mesh(Vector3::new(1.0, 1.0, 1.0), false);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);

        let adjacency = MeshAdjacency::build(&mesh);
        for v in 0..mesh.vertex_count() {
            assert!(!adjacency.is_boundary_vertex(v));
        }
    }

    #[test]
    fn test_cylinder_is_closed() {
        let mesh = generate_cylinder_mesh(2.0, 0.5, 16);
        assert_eq!(mesh.vertex_count(), 2 + 16 * 2);

        let adjacency = MeshAdjacency::build(&mesh);
        for f in 0..mesh.triangle_count() {
            assert!(adjacency.face_neighbors(f).iter().all(Option::is_some));
        }
    }
}
