// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Standalone sub-mesh of one segment, with vertex correspondence

use super::{SegmentId, SegmentLabels};
use crate::error::{SkelError, SkelResult};
use crate::geometry::{Mesh, Triangle};
use ahash::AHashMap;

/// All faces of one segment compacted into a standalone mesh, plus the map
/// from sub-mesh-local vertex index back to the originating mesh's index.
///
/// Contraction and surgery operate on the sub-mesh exactly as on a full mesh;
/// edited positions flow back to the original through
/// [`MeshSegment::write_back`]. Topology changes never propagate back.
#[derive(Debug, Clone)]
pub struct MeshSegment {
    mesh: Mesh,
    vertex_correspondence: Vec<usize>,
    segment_id: SegmentId,
}

impl MeshSegment {
    /// Extract the faces labeled `segment_id` into a standalone mesh. Local
    /// vertex indices are assigned in first-seen face order.
    pub fn extract(mesh: &Mesh, labels: &SegmentLabels, segment_id: SegmentId) -> SkelResult<Self> {
        if labels.face_count() != mesh.triangle_count() {
            return Err(SkelError::InvalidFaceIndex {
                index: mesh.triangle_count(),
                len: labels.face_count(),
            });
        }

        let faces = labels.faces_of(segment_id)?;
        let mut local_index: AHashMap<usize, usize> = AHashMap::new();
        let mut submesh = Mesh::new();
        let mut vertex_correspondence = Vec::new();

        for face in faces {
            let triangle = &mesh.triangles[face];
            let mut local = [0usize; 3];
            for (slot, &original) in triangle.indices.iter().enumerate() {
                if original >= mesh.vertex_count() {
                    return Err(SkelError::InvalidVertexIndex {
                        index: original,
                        len: mesh.vertex_count(),
                    });
                }
                let next = submesh.vertex_count();
                let dense = *local_index.entry(original).or_insert(next);
                if dense == next {
                    submesh.add_vertex(mesh.vertices[original]);
                    vertex_correspondence.push(original);
                }
                local[slot] = dense;
            }
            submesh.add_triangle(Triangle::new(local));
        }

        Ok(Self {
            mesh: submesh,
            vertex_correspondence,
            segment_id,
        })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Replace the sub-mesh with an edited copy of itself, e.g. the result of
    /// contraction. The replacement must keep the vertex count so the
    /// correspondence stays valid.
    pub fn set_mesh(&mut self, mesh: Mesh) -> SkelResult<()> {
        if mesh.vertex_count() != self.vertex_correspondence.len() {
            return Err(SkelError::InvalidVertexIndex {
                index: mesh.vertex_count(),
                len: self.vertex_correspondence.len(),
            });
        }
        self.mesh = mesh;
        Ok(())
    }

    /// Sub-mesh-local vertex index to original-mesh vertex index.
    pub fn vertex_correspondence(&self) -> &[usize] {
        &self.vertex_correspondence
    }

    pub fn segment_id(&self) -> SegmentId {
        self.segment_id
    }

    /// Copy the sub-mesh's vertex positions back into the original mesh
    /// through the correspondence array. Position-only; the original's
    /// topology is untouched.
    pub fn write_back(&self, original: &mut Mesh) -> SkelResult<()> {
        for (local, &original_index) in self.vertex_correspondence.iter().enumerate() {
            if original_index >= original.vertex_count() {
                return Err(SkelError::InvalidVertexIndex {
                    index: original_index,
                    len: original.vertex_count(),
                });
            }
            original.vertices[original_index].position = self.mesh.vertices[local].position;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;

    fn split_cube() -> (Mesh, SegmentLabels) {
        let mesh = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_mesh();
        // First half of the triangles one segment, second half the other
        let labels: Vec<usize> = (0..mesh.triangle_count())
            .map(|f| usize::from(f >= mesh.triangle_count() / 2))
            .collect();
        let labels = SegmentLabels::new(labels, 2).unwrap();
        (mesh, labels)
    }

    #[test]
    fn test_extract_covers_segment_faces() {
        let (mesh, labels) = split_cube();
        let segment = MeshSegment::extract(&mesh, &labels, 0).unwrap();

        assert_eq!(segment.mesh().triangle_count(), 6);
        assert_eq!(
            segment.mesh().vertex_count(),
            segment.vertex_correspondence().len()
        );
        for &original in segment.vertex_correspondence() {
            assert!(original < mesh.vertex_count());
        }
    }

    #[test]
    fn test_extract_rejects_bad_segment() {
        let (mesh, labels) = split_cube();
        assert_eq!(
            MeshSegment::extract(&mesh, &labels, 9).unwrap_err(),
            SkelError::InvalidSegmentIndex { index: 9, count: 2 }
        );
    }

    #[test]
    fn test_write_back_positions() {
        let (mesh, labels) = split_cube();
        let mut original = mesh.clone();
        let mut segment = MeshSegment::extract(&mesh, &labels, 1).unwrap();

        let mut edited = segment.mesh().clone();
        for vertex in &mut edited.vertices {
            vertex.position.z += 2.5;
        }
        segment.set_mesh(edited).unwrap();
        segment.write_back(&mut original).unwrap();

        for (local, &orig) in segment.vertex_correspondence().iter().enumerate() {
            assert_eq!(
                original.vertices[orig].position,
                segment.mesh().vertices[local].position
            );
        }
    }

    #[test]
    fn test_set_mesh_guards_vertex_count() {
        let (mesh, labels) = split_cube();
        let mut segment = MeshSegment::extract(&mesh, &labels, 0).unwrap();
        assert!(segment.set_mesh(Mesh::empty()).is_err());
    }
}
