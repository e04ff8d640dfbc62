// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Parameters for mesh contraction

/// Parameters for iterative mesh contraction.
#[derive(Debug, Clone)]
pub struct ContractionParams {
    /// Iteration cap for automatic contraction. Default: 100
    pub max_iterations: usize,

    /// Automatic contraction stops once the mean one-ring area ratio changes
    /// by less than this between steps. Default: 1e-4
    pub convergence_threshold: f64,

    /// Initial weight of the Laplacian displacement term. Default: 1.0
    pub contraction_weight: f64,

    /// Base weight of the position-attraction term; scaled per vertex by
    /// `sqrt(original_area / current_area)`. Default: 1.0
    pub attraction_weight: f64,

    /// Multiplier applied to the contraction weight after every step.
    /// Default: 2.0
    pub weight_growth: f64,

    /// Ceiling for the grown contraction weight. Default: 2048.0
    pub max_contraction_weight: f64,

    /// Vertices with area ratio below this are reported as collapsed
    /// (skeleton candidates). Default: 0.01
    pub low_area_ratio_threshold: f64,

    /// Vertices with area ratio above this are reported as under-contracted
    /// (expansion/problem regions). Default: 1.0
    pub high_area_ratio_threshold: f64,
}

impl Default for ContractionParams {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            convergence_threshold: 1e-4,
            contraction_weight: 1.0,
            attraction_weight: 1.0,
            weight_growth: 2.0,
            max_contraction_weight: 2048.0,
            low_area_ratio_threshold: 0.01,
            high_area_ratio_threshold: 1.0,
        }
    }
}

impl ContractionParams {
    /// Params for aggressive contraction (faster collapse, looser stop).
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            contraction_weight: 2.0,
            weight_growth: 4.0,
            convergence_threshold: 1e-3,
            ..Default::default()
        }
    }

    /// Params for cautious contraction (slow weight growth, tight stop).
    #[must_use]
    pub fn conservative() -> Self {
        Self {
            weight_growth: 1.2,
            convergence_threshold: 1e-6,
            max_iterations: 500,
            ..Default::default()
        }
    }

    /// Override the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}
