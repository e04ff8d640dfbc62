// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Iterative contraction of a privately owned mesh copy

use super::{ContractionParams, OneRingAreaTracker};
use crate::error::{SkelError, SkelResult};
use crate::geometry::{Mesh, MeshAdjacency};
use crate::utils::math::cotangent;
use ahash::AHashMap;
use nalgebra::Point3;
use tracing::debug;

/// Result of an automatic contraction run.
#[derive(Debug, Clone, Copy)]
pub struct ContractionOutcome {
    /// Steps actually executed.
    pub iterations: usize,
    /// Whether the convergence predicate was met before the iteration cap.
    /// Non-convergence is a soft condition: the contracted state is still the
    /// best effort reached.
    pub converged: bool,
    /// Mean one-ring area ratio at the end of the run.
    pub mean_area_ratio: f64,
}

/// Undo record for one contraction step.
#[derive(Debug, Clone)]
struct StepRecord {
    positions: Vec<Point3<f64>>,
    current_areas: Vec<f64>,
    laplacian_weight: f64,
}

/// Runs iterative, volume-aware contraction on an internally owned copy of
/// the input mesh. The caller's mesh is never mutated; read the result back
/// with [`MeshContractor::contracted_mesh`].
///
/// Each step moves every vertex toward the cotangent-weighted average of its
/// one-ring, blended against an attraction term `w_H * sqrt(A_orig / A_cur)`
/// that stiffens as the local area collapses, so the surface sinks toward a
/// medial curve instead of imploding to a point.
pub struct MeshContractor {
    mesh: Mesh,
    adjacency: MeshAdjacency,
    params: ContractionParams,
    areas: OneRingAreaTracker,
    history: Vec<StepRecord>,
    laplacian_weight: f64,
}

impl MeshContractor {
    /// Contractor with default parameters.
    pub fn new(mesh: &Mesh) -> Self {
        Self::with_params(mesh, ContractionParams::default())
    }

    /// Contractor over a garbage-collected private copy of `mesh`.
    pub fn with_params(mesh: &Mesh, params: ContractionParams) -> Self {
        let mut working = mesh.clone();
        if working.has_garbage() {
            working.collect_garbage();
        }
        let adjacency = MeshAdjacency::build(&working);
        let areas = OneRingAreaTracker::capture(&working, &adjacency);
        let laplacian_weight = params.contraction_weight;
        Self {
            mesh: working,
            adjacency,
            params,
            areas,
            history: Vec::new(),
            laplacian_weight,
        }
    }

    /// Perform one contraction step. A no-op on meshes without faces.
    pub fn execute_contraction_step(&mut self) {
        if self.mesh.triangle_count() == 0 {
            return;
        }

        self.history.push(StepRecord {
            positions: self.mesh.vertices.iter().map(|v| v.position).collect(),
            current_areas: self.areas.current_areas().to_vec(),
            laplacian_weight: self.laplacian_weight,
        });

        let edge_weights = self.cotangent_edge_weights();
        let new_positions: Vec<Point3<f64>> = (0..self.mesh.vertex_count())
            .map(|v| self.displaced_position(v, &edge_weights))
            .collect();

        for (vertex, position) in self.mesh.vertices.iter_mut().zip(new_positions) {
            vertex.position = position;
        }

        self.areas.update(&self.mesh, &self.adjacency);
        self.laplacian_weight =
            (self.laplacian_weight * self.params.weight_growth).min(self.params.max_contraction_weight);
    }

    /// Run steps until the mean area ratio settles or the iteration cap is
    /// reached. Termination is guaranteed by the cap; hitting it is reported
    /// as `converged: false`, not as an error.
    pub fn contract_mesh(&mut self) -> ContractionOutcome {
        if self.mesh.triangle_count() == 0 {
            return ContractionOutcome {
                iterations: 0,
                converged: true,
                mean_area_ratio: self.areas.mean_ratio(),
            };
        }

        let mut previous = self.areas.mean_ratio();
        for iteration in 0..self.params.max_iterations {
            self.execute_contraction_step();
            let mean = self.areas.mean_ratio();
            if (previous - mean).abs() < self.params.convergence_threshold {
                debug!(iterations = iteration + 1, mean_area_ratio = mean, "contraction converged");
                return ContractionOutcome {
                    iterations: iteration + 1,
                    converged: true,
                    mean_area_ratio: mean,
                };
            }
            previous = mean;
        }

        let mean = self.areas.mean_ratio();
        debug!(
            iterations = self.params.max_iterations,
            mean_area_ratio = mean,
            "contraction hit iteration cap"
        );
        ContractionOutcome {
            iterations: self.params.max_iterations,
            converged: false,
            mean_area_ratio: mean,
        }
    }

    /// Undo the most recent step, restoring positions and area state exactly.
    pub fn execute_contraction_reversing_step(&mut self) -> SkelResult<()> {
        let record = self.history.pop().ok_or(SkelError::NothingToReverse)?;
        for (vertex, position) in self.mesh.vertices.iter_mut().zip(record.positions) {
            vertex.position = position;
        }
        self.areas.restore(record.current_areas);
        self.laplacian_weight = record.laplacian_weight;
        Ok(())
    }

    /// Value snapshot of the contracted state, with normals refreshed.
    pub fn contracted_mesh(&self) -> Mesh {
        let mut snapshot = self.mesh.clone();
        snapshot.recompute_normals();
        snapshot
    }

    /// Vertices whose one-ring area collapsed below the configured threshold.
    pub fn low_one_ring_area_vertices(&self) -> Vec<usize> {
        self.areas.vertices_below(self.params.low_area_ratio_threshold)
    }

    /// Vertices whose one-ring area grew past the configured threshold.
    pub fn high_one_ring_area_vertices(&self) -> Vec<usize> {
        self.areas.vertices_above(self.params.high_area_ratio_threshold)
    }

    /// Mean one-ring area ratio of the current state.
    pub fn mean_area_ratio(&self) -> f64 {
        self.areas.mean_ratio()
    }

    /// Number of steps available for reversal.
    pub fn steps_taken(&self) -> usize {
        self.history.len()
    }

    /// Accumulate clamped cotangent weights per canonical edge. Degenerate
    /// corners contribute nothing; vertices whose ring ends up weightless
    /// fall back to uniform weights in [`Self::displaced_position`].
    fn cotangent_edge_weights(&self) -> AHashMap<(usize, usize), f64> {
        let mut weights: AHashMap<(usize, usize), f64> = AHashMap::new();
        for triangle in &self.mesh.triangles {
            let [i, j, k] = triangle.indices;
            let pi = self.mesh.vertices[i].position;
            let pj = self.mesh.vertices[j].position;
            let pk = self.mesh.vertices[k].position;

            // Each corner's cotangent weights the opposite edge
            let corners = [
                (pi, j, k, pj, pk),
                (pj, k, i, pk, pi),
                (pk, i, j, pi, pj),
            ];
            for (p_apex, a, b, pa, pb) in corners {
                let cot = cotangent(&(pa - p_apex), &(pb - p_apex)).max(0.0);
                if cot > 0.0 {
                    let key = if a < b { (a, b) } else { (b, a) };
                    *weights.entry(key).or_insert(0.0) += cot;
                }
            }
        }
        weights
    }

    fn displaced_position(
        &self,
        vertex: usize,
        edge_weights: &AHashMap<(usize, usize), f64>,
    ) -> Point3<f64> {
        let position = self.mesh.vertices[vertex].position;
        let ring = self.adjacency.vertex_neighbors(vertex);
        if ring.is_empty() {
            return position;
        }

        let mut weight_sum = 0.0;
        let mut target = nalgebra::Vector3::zeros();
        for &neighbor in ring {
            let key = if vertex < neighbor {
                (vertex, neighbor)
            } else {
                (neighbor, vertex)
            };
            let w = edge_weights.get(&key).copied().unwrap_or(0.0);
            weight_sum += w;
            target += self.mesh.vertices[neighbor].position.coords * w;
        }

        // Weightless ring (fully degenerate one-ring): uniform fallback
        if weight_sum <= 1e-12 {
            weight_sum = ring.len() as f64;
            target = ring
                .iter()
                .map(|&n| self.mesh.vertices[n].position.coords)
                .sum();
        }
        let target = Point3::from(target / weight_sum);

        let original = self.areas.original_area(vertex);
        let current = self.areas.current_areas()[vertex].max(1e-12);
        let attraction = if original <= 1e-12 {
            self.params.attraction_weight
        } else {
            self.params.attraction_weight * (original / current).sqrt()
        };

        let w_l = self.laplacian_weight;
        Point3::from((target.coords * w_l + position.coords * attraction) / (w_l + attraction))
    }
}
