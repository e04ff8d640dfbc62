// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Iterative volume-aware mesh contraction
//!
//! Collapses a surface toward its medial structure by repeatedly displacing
//! each vertex toward a cotangent-weighted average of its one-ring, blended
//! against a per-vertex attraction term that grows as the local one-ring area
//! shrinks. The area-ratio history doubles as the undo record and as the
//! low/high-area diagnostic signal.

mod area;
mod contractor;
mod params;

pub use area::OneRingAreaTracker;
pub use contractor::{ContractionOutcome, MeshContractor};
pub use params::ContractionParams;
