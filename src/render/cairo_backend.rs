use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, EncodingRenderer, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub ellipses_drawn: usize,
    pub markers_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Renders offscreen into an ARGB image surface sized from the frame viewport
/// and encodes it as PNG.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    /// Creates a renderer whose surface matches `frame`'s viewport.
    pub fn for_frame(frame: &RenderFrame) -> ChartResult<Self> {
        let width = i32::try_from(frame.viewport.width).map_err(|_| {
            ChartError::InvalidViewport {
                width: frame.viewport.width,
                height: frame.viewport.height,
            }
        })?;
        let height = i32::try_from(frame.viewport.height).map_err(|_| {
            ChartError::InvalidViewport {
                width: frame.viewport.width,
                height: frame.viewport.height,
            }
        })?;
        Self::new(width, height)
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for ellipse in &frame.ellipses {
            append_polygon_path(context, &ellipse.outline());
            apply_color(context, ellipse.fill_color);
            match ellipse.stroke {
                Some(stroke) => {
                    context
                        .fill_preserve()
                        .map_err(|err| map_backend_error("failed to fill ellipse", err))?;
                    apply_color(context, stroke.color);
                    context.set_line_width(stroke.width);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke ellipse", err))?;
                }
                None => {
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill ellipse", err))?;
                }
            }
            stats.ellipses_drawn += 1;
        }

        for marker in &frame.markers {
            append_polygon_path(context, &marker.vertices());
            apply_color(context, marker.color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill marker", err))?;
            stats.markers_drawn += 1;
        }

        context.set_line_cap(cairo::LineCap::Square);
        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for text in &frame.texts {
            let font_description = FontDescription::from_string(&format!(
                "{} {}px",
                frame.font_family, text.font_size_px
            ));

            context
                .save()
                .map_err(|err| map_backend_error("failed to save cairo state", err))?;
            context.translate(text.x, text.y);
            context.rotate(-text.rotation_deg.to_radians());

            let top = text.block_top_offset();
            for (index, line) in text.lines().iter().enumerate() {
                let layout = pangocairo::functions::create_layout(context);
                layout.set_font_description(Some(&font_description));
                layout.set_text(line);

                let (line_width, line_height) = layout.pixel_size();
                let x = match text.h_align {
                    TextHAlign::Left => 0.0,
                    TextHAlign::Center => -f64::from(line_width) / 2.0,
                    TextHAlign::Right => -f64::from(line_width),
                };
                let line_center =
                    top + text.font_size_px / 2.0 + index as f64 * text.line_height_px();

                apply_color(context, text.color);
                context.move_to(x, line_center - f64::from(line_height) / 2.0);
                pangocairo::functions::show_layout(context, &layout);
            }

            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
            stats.texts_drawn += 1;
        }

        debug!(
            ellipses = stats.ellipses_drawn,
            markers = stats.markers_drawn,
            lines = stats.lines_drawn,
            texts = stats.texts_drawn,
            "rendered cairo frame"
        );
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl EncodingRenderer for CairoRenderer {
    fn encoded(&self) -> ChartResult<Vec<u8>> {
        self.surface.flush();
        let mut png = Vec::new();
        self.surface
            .write_to_png(&mut png)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))?;
        Ok(png)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_polygon_path(context: &Context, points: &[(f64, f64)]) {
    context.new_path();
    for (index, &(x, y)) in points.iter().enumerate() {
        if index == 0 {
            context.move_to(x, y);
        } else {
            context.line_to(x, y);
        }
    }
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
