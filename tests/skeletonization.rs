// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Contraction, surgery, and accumulator integration scenarios

use anyhow::Result;
use curveskel::{
    extract_skeleton, ConnectivitySurgeon, ContractionParams, MeshContractor, Primitive, Skeleton,
};
use nalgebra::Point3;

#[test]
fn test_icosahedron_fifty_steps_preserves_topology() -> Result<()> {
    let mesh = Primitive::icosahedron(1.0).to_mesh();
    let input_diagonal = mesh.bounding_box().diagonal();

    let mut contractor = MeshContractor::new(&mesh);
    for _ in 0..50 {
        contractor.execute_contraction_step();
    }

    let contracted = contractor.contracted_mesh();
    println!(
        "Icosahedron after 50 steps: diagonal {:.6} -> {:.6}",
        input_diagonal,
        contracted.bounding_box().diagonal()
    );

    assert_eq!(contracted.vertex_count(), 12);
    assert_eq!(contracted.triangle_count(), 20);
    assert!(contracted.bounding_box().diagonal() < input_diagonal);
    assert!(contracted
        .vertices
        .iter()
        .all(|v| v.position.coords.iter().all(|c| c.is_finite())));
    Ok(())
}

#[test]
fn test_reversal_round_trip() -> Result<()> {
    let mesh = Primitive::icosahedron(1.0).to_mesh();
    let mut contractor = MeshContractor::new(&mesh);

    let before: Vec<Point3<f64>> = mesh.vertices.iter().map(|v| v.position).collect();
    let ratio_before = contractor.mean_area_ratio();

    contractor.execute_contraction_step();
    contractor.execute_contraction_reversing_step()?;

    let restored = contractor.contracted_mesh();
    for (vertex, original) in restored.vertices.iter().zip(&before) {
        assert!((vertex.position - original).norm() < 1e-12);
    }
    assert!((contractor.mean_area_ratio() - ratio_before).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_mean_area_ratio_decays_on_convex_input() {
    let mesh = Primitive::icosahedron(1.0).to_mesh();
    let mut contractor = MeshContractor::new(&mesh);

    let mut previous = contractor.mean_area_ratio();
    for step in 0..5 {
        contractor.execute_contraction_step();
        let mean = contractor.mean_area_ratio();
        assert!(
            mean <= previous + 1e-9,
            "mean area ratio rose at step {step}: {previous} -> {mean}"
        );
        previous = mean;
    }
}

#[test]
fn test_low_area_vertices_appear_under_heavy_contraction() {
    let mesh = Primitive::icosahedron(1.0).to_mesh();
    let mut contractor = MeshContractor::new(&mesh);
    for _ in 0..50 {
        contractor.execute_contraction_step();
    }
    // After heavy contraction every one-ring has collapsed
    assert_eq!(contractor.low_one_ring_area_vertices().len(), 12);
    assert!(contractor.high_one_ring_area_vertices().is_empty());
}

#[test]
fn test_automatic_contraction_is_bounded() {
    let mesh = Primitive::cylinder(4.0, 0.5, 24).to_mesh();
    let params = ContractionParams::default().with_max_iterations(25);
    let mut contractor = MeshContractor::with_params(&mesh, params);

    let outcome = contractor.contract_mesh();
    assert!(outcome.iterations <= 25);
    assert!(outcome.mean_area_ratio.is_finite());
    // Best-effort state is returned either way
    assert_eq!(contractor.contracted_mesh().vertex_count(), mesh.vertex_count());
}

#[test]
fn test_surgery_index_space_is_valid() {
    let mesh = Primitive::cylinder(4.0, 0.5, 16).to_mesh();
    let mut contractor = MeshContractor::new(&mesh);
    contractor.contract_mesh();
    let contracted = contractor.contracted_mesh();

    let mut surgeon = ConnectivitySurgeon::new(&contracted);
    surgeon.execute_connectivity_surgery();

    let mapping = surgeon.skeleton_mesh_mapping();
    assert_eq!(mapping.len(), contracted.vertex_count());
    for fiber in &mapping {
        for &v in fiber {
            assert!(v < contracted.vertex_count());
        }
    }

    // Every vertex folded somewhere: the fibers partition the index space
    let total: usize = mapping.iter().map(Vec::len).sum();
    assert_eq!(total, contracted.vertex_count());
}

#[test]
fn test_accumulator_growth_across_passes() -> Result<()> {
    let mut skeleton = Skeleton::new();

    let batch1: Vec<Point3<f64>> = (0..4).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
    skeleton.append(&[[0, 1], [1, 2], [2, 3]], &batch1)?;

    let batch2: Vec<Point3<f64>> = (0..3).map(|i| Point3::new(0.0, f64::from(i), 0.0)).collect();
    skeleton.append(&[[0, 1], [1, 2]], &batch2)?;

    assert_eq!(skeleton.node_count(), 7);
    assert_eq!(skeleton.edge_count(), 5);
    assert!(skeleton.edges().iter().flatten().all(|&n| n < 7));

    // Coincident positions across passes stay distinct nodes
    assert_eq!(skeleton.node_positions()[0], skeleton.node_positions()[4]);
    Ok(())
}

#[test]
fn test_extract_skeleton_end_to_end() -> Result<()> {
    let mesh = Primitive::cylinder(6.0, 0.4, 12).to_mesh();
    let skeleton = extract_skeleton(&mesh, &ContractionParams::default())?;

    println!(
        "Cylinder skeleton: {} nodes, {} edges",
        skeleton.node_count(),
        skeleton.edge_count()
    );
    assert!(skeleton.node_count() <= mesh.vertex_count());
    for &[a, b] in skeleton.edges() {
        assert!(a < skeleton.node_count());
        assert!(b < skeleton.node_count());
        assert_ne!(a, b);
    }
    Ok(())
}
