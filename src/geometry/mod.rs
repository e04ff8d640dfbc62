// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Geometry module - mesh representation and adjacency queries

mod adjacency;
mod bbox;
mod mesh;
mod primitives;

pub use adjacency::MeshAdjacency;
pub use bbox::BoundingBox;
pub use mesh::{Mesh, Triangle, Vertex};
pub use primitives::Primitive;
