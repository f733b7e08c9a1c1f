mod frame;
mod null_renderer;
mod primitives;
mod sketch;
mod svg_renderer;

pub use frame::{RENDER_FRAME_JSON_SCHEMA_V1, RenderFrame, RenderFrameJsonContractV1};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, EllipsePrimitive, LinePrimitive, MarkerDirection, MarkerPrimitive, StrokeStyle,
    TextHAlign, TextPrimitive, TextRole, TextVAlign,
};
pub use sketch::{SketchParams, apply_sketch, segmentize};
pub use svg_renderer::{SvgRenderStats, SvgRenderer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart content and layout.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

/// Backends whose result is a self-contained file image.
pub trait EncodingRenderer: Renderer {
    /// Encoded bytes of the most recently rendered frame.
    fn encoded(&self) -> ChartResult<Vec<u8>>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
