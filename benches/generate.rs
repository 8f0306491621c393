use criterion::{criterion_group, criterion_main, Criterion};
use msdfgen_rs::{
    edge_coloring, generate_msdf, generate_sdf, Bitmap, GeneratorConfig, Projection, Shape,
    Vector2,
};

fn unit_square() -> Shape {
    let mut shape = Shape::new();
    let c = shape.add_contour();
    c.add_line(0.0, 0.0, 1.0, 0.0);
    c.add_line(1.0, 0.0, 1.0, 1.0);
    c.add_line(1.0, 1.0, 0.0, 1.0);
    c.add_line(0.0, 1.0, 0.0, 0.0);
    shape
}

fn bench_generate_sdf(c: &mut Criterion) {
    let shape = unit_square();
    let projection = Projection::new(Vector2::new(64.0, 64.0), Vector2::new(0.0, 0.0));
    let config = GeneratorConfig::default();
    c.bench_function("generate_sdf_64x64", |b| {
        b.iter(|| {
            let mut bitmap: Bitmap<1> = Bitmap::new(64, 64);
            generate_sdf(&mut bitmap, &shape, &projection, 0.125, &config);
        });
    });
}

fn bench_generate_msdf(c: &mut Criterion) {
    let mut shape = unit_square();
    edge_coloring::simple(&mut shape, 3.0, 0);
    let projection = Projection::new(Vector2::new(64.0, 64.0), Vector2::new(0.0, 0.0));
    let config = GeneratorConfig::default();
    c.bench_function("generate_msdf_64x64", |b| {
        b.iter(|| {
            let mut bitmap: Bitmap<3> = Bitmap::new(64, 64);
            generate_msdf(&mut bitmap, &shape, &projection, 0.125, &config);
        });
    });
}

criterion_group!(benches, bench_generate_sdf, bench_generate_msdf);
criterion_main!(benches);
