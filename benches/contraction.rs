// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Contraction and surgery benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use curveskel::{ConnectivitySurgeon, ContractionParams, MeshContractor, Primitive};

fn bench_contraction_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("contraction_step");

    for segments in [16u32, 48, 96] {
        let mesh = Primitive::cylinder(4.0, 0.5, segments).to_mesh();
        group.bench_with_input(
            BenchmarkId::new("cylinder", segments),
            &mesh,
            |b, mesh| {
                b.iter(|| {
                    let mut contractor = MeshContractor::new(black_box(mesh));
                    contractor.execute_contraction_step();
                    contractor.mean_area_ratio()
                });
            },
        );
    }

    group.finish();
}

fn bench_automatic_contraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("contract_mesh");
    group.sample_size(20);

    let mesh = Primitive::cylinder(4.0, 0.5, 48).to_mesh();
    let params = ContractionParams::default().with_max_iterations(20);
    group.bench_function("cylinder_48", |b| {
        b.iter(|| {
            let mut contractor =
                MeshContractor::with_params(black_box(&mesh), params.clone());
            contractor.contract_mesh()
        });
    });

    group.finish();
}

fn bench_surgery(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity_surgery");

    let mesh = Primitive::cylinder(4.0, 0.5, 48).to_mesh();
    let mut contractor = MeshContractor::new(&mesh);
    contractor.contract_mesh();
    let contracted = contractor.contracted_mesh();

    group.bench_function("contracted_cylinder_48", |b| {
        b.iter(|| {
            let mut surgeon = ConnectivitySurgeon::new(black_box(&contracted));
            surgeon.execute_connectivity_surgery();
            surgeon.skeleton_edges().len()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_contraction_step,
    bench_automatic_contraction,
    bench_surgery
);
criterion_main!(benches);
