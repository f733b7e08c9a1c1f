use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tradeoff_chart::core::FigureConfig;
use tradeoff_chart::render::{
    Color, EllipsePrimitive, Renderer, SketchParams, SvgRenderer,
};
use tradeoff_chart::{build_render_frame, wasm_runtime_tradeoffs};

fn bench_sketched_outline(c: &mut Criterion) {
    let ellipse = EllipsePrimitive::new("bench", 320.0, 180.0, 120.0, 30.0, Color::WHITE)
        .with_sketch(SketchParams::new(1.0, 100.0, 3.0));

    c.bench_function("sketched_ellipse_outline", |b| {
        b.iter(|| {
            let _ = black_box(&ellipse).outline();
        })
    });
}

fn bench_full_svg_render(c: &mut Criterion) {
    let spec = wasm_runtime_tradeoffs();
    let figure = FigureConfig::default();

    c.bench_function("tradeoffs_frame_and_svg", |b| {
        b.iter(|| {
            let frame = build_render_frame(black_box(&spec), black_box(&figure))
                .expect("frame should build");
            let mut renderer = SvgRenderer::new();
            renderer.render(&frame).expect("svg should render");
            black_box(renderer.document().len());
        })
    });
}

criterion_group!(benches, bench_sketched_outline, bench_full_svg_render);
criterion_main!(benches);
