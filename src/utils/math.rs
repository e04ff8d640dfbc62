// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Math utilities

use crate::geometry::Mesh;
use nalgebra::{Point3, Vector3};

/// Area of the triangle spanned by three points
pub fn triangle_area(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    let e1 = p1 - p0;
    let e2 = p2 - p0;
    e1.cross(&e2).norm() * 0.5
}

/// Cotangent of the angle between two edge vectors, guarded against
/// near-degenerate corners
pub fn cotangent(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b) / a.cross(b).norm().max(1e-12)
}

/// Mean position of the given mesh vertices; `None` for an empty selection or
/// an out-of-range index
pub fn vertex_centroid(mesh: &Mesh, vertex_indices: &[usize]) -> Option<Point3<f64>> {
    if vertex_indices.is_empty() {
        return None;
    }
    let mut sum = Vector3::zeros();
    for &index in vertex_indices {
        sum += mesh.vertices.get(index)?.position.coords;
    }
    Some(Point3::from(sum / vertex_indices.len() as f64))
}

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
