use mosaic_core::prelude::*;
use mosaic_mesh::{voxelize_mesh, Mesh, MeshTransform};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn voxelize_scaled_cube(c: &mut Criterion) {
    let mesh = Mesh::parse(utilities::data_sets::UNIT_CUBE_OBJ).unwrap();

    let mut group = c.benchmark_group("voxelize_scaled_cube");
    for scale in [8.0, 32.0, 64.0].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(scale), scale, |b, &scale| {
            let transform = MeshTransform {
                origin: Point3f::ZERO,
                scale,
            };
            b.iter(|| {
                let mut sum = PointN([0, 0, 0]);
                voxelize_mesh(&mesh, &transform, &mut |p, _| {
                    sum += p;
                    true
                });
                sum
            });
        });
    }
    group.finish();
}

criterion_group!(benches, voxelize_scaled_cube);
criterion_main!(benches);
