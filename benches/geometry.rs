use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shape_viewer::geometry::create_geometry;
use shape_viewer::particles::{project, ColorBuffer};
use shape_viewer::ShapeType;

fn bench_create_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_geometry");

    for shape in ShapeType::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(shape), &shape, |b, shape| {
            b.iter(|| create_geometry(black_box(shape)))
        });
    }

    group.finish();
}

fn bench_project(c: &mut Criterion) {
    let torus = create_geometry(&ShapeType::Torus);

    c.bench_function("project_torus", |b| b.iter(|| project(black_box(&torus))));
}

/// Per-frame hue rewrite at point counts of the shipped shapes and beyond
fn bench_fill_rainbow(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_rainbow");

    for count in [3, 1089, 1717, 10_000].iter() {
        let mut colors = ColorBuffer::new(*count);
        let mut phase = 0.0_f64;

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                phase += 0.0016;
                colors.fill_rainbow(black_box(phase));
                colors.mark_needs_update();
            })
        });
    }

    group.finish();
}

fn bench_mesh_vertices(c: &mut Criterion) {
    let sphere = create_geometry(&ShapeType::Sphere);

    c.bench_function("sphere_vertices", |b| b.iter(|| black_box(&sphere).vertices()));
}

criterion_group!(
    benches,
    bench_create_geometry,
    bench_project,
    bench_fill_rainbow,
    bench_mesh_vertices
);
criterion_main!(benches);
