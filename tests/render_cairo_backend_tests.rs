#![cfg(feature = "cairo-backend")]

use std::fs;

use tradeoff_chart::core::FigureConfig;
use tradeoff_chart::render::{CairoRenderer, EncodingRenderer, Renderer};
use tradeoff_chart::{
    ChartError, OutputFormat, build_render_frame, wasm_runtime_tradeoffs, write_tradeoffs_chart,
};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 378).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn png_output_is_written_with_signature() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("impl-tradeoffs.png");

    let summary = write_tradeoffs_chart(&path).expect("render png");

    assert_eq!(summary.format, OutputFormat::Png);
    let written = fs::read(&path).expect("read output");
    assert!(written.starts_with(&PNG_SIGNATURE));
    assert_eq!(summary.bytes, written.len());
}

#[test]
fn cairo_renderer_draws_every_tradeoffs_primitive() {
    let frame =
        build_render_frame(&wasm_runtime_tradeoffs(), &FigureConfig::default()).expect("frame");
    let mut renderer = CairoRenderer::for_frame(&frame).expect("renderer");

    renderer.render(&frame).expect("render");
    let stats = renderer.last_stats();

    assert_eq!(stats.ellipses_drawn, 4);
    assert_eq!(stats.markers_drawn, 2);
    assert_eq!(stats.lines_drawn, 2);
    assert_eq!(stats.texts_drawn, 8);
    assert!(renderer.encoded().expect("png").starts_with(&PNG_SIGNATURE));
}
