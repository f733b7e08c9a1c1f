use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chart::{ChartSpec, SpineStyle};
use crate::core::{FigureConfig, LinearScale, PlotRect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, EllipsePrimitive, LinePrimitive, MarkerDirection, MarkerPrimitive, RenderFrame,
    TextHAlign, TextPrimitive, TextRole, TextVAlign,
};

/// Padding around the tight bounding box, in font sizes.
const TIGHT_PAD_FONT_SIZES: f64 = 1.08;
/// Gap between the axes box and an axis label, in points.
const LABEL_PAD_PT: f64 = 4.0;
/// Gap between the axes box and the title, in points.
const TITLE_PAD_PT: f64 = 6.0;
/// Rough advance width of one glyph, in font sizes.
const GLYPH_WIDTH_FONT_SIZES: f64 = 0.6;

/// Resolved geometry of one chart on one figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub plot: PlotRect,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
}

impl ChartLayout {
    /// Maps a data position to pixel space.
    pub fn to_pixel(&self, x: f64, y: f64) -> ChartResult<(f64, f64)> {
        Ok((
            self.x_scale.domain_to_pixel(x, self.plot.x_range())?,
            self.y_scale.domain_to_pixel(y, self.plot.y_range())?,
        ))
    }
}

/// Fits the axes box into the figure, leaving room for the title, both axis
/// labels and the arrow glyph past the right end of the x axis.
pub fn compute_layout(spec: &ChartSpec, figure: &FigureConfig) -> ChartResult<ChartLayout> {
    spec.validate()?;
    figure.validate()?;

    let viewport = figure.viewport()?;
    let font_px = figure.font_size_px();
    let pad = TIGHT_PAD_FONT_SIZES * font_px;
    let label_pad = figure.points_to_pixels(LABEL_PAD_PT);
    let title_pad = figure.points_to_pixels(TITLE_PAD_PT);
    let arrow_half = figure.points_to_pixels(spec.arrow_size_pt) / 2.0;

    let x_label = label_block_height(&spec.x_axis.label, font_px, figure.line_spacing);
    let y_label = label_block_height(&spec.y_axis.label, font_px, figure.line_spacing);
    let title = label_block_height(&spec.title, figure.title_font_size_px(), figure.line_spacing);

    let left = pad + y_label + label_pad;
    let right = pad + arrow_half;
    let top = pad + title + title_pad;
    let bottom = pad + x_label + label_pad;

    let plot = PlotRect::new(
        left,
        top,
        f64::from(viewport.width) - left - right,
        f64::from(viewport.height) - top - bottom,
    );
    if !plot.is_valid() {
        return Err(ChartError::InvalidData(format!(
            "figure {}x{} px is too small for the chart decorations",
            viewport.width, viewport.height
        )));
    }

    let title_width = estimate_text_width_px(&spec.title, figure.title_font_size_px());
    if title_width > f64::from(viewport.width) {
        warn!(
            title_width,
            figure_width = viewport.width,
            "title is likely wider than the figure"
        );
    }

    let layout = ChartLayout {
        viewport,
        plot,
        x_scale: LinearScale::new(spec.x_axis.min, spec.x_axis.max)?,
        y_scale: LinearScale::new(spec.y_axis.min, spec.y_axis.max)?,
    };
    debug!(
        left = plot.left,
        top = plot.top,
        width = plot.width,
        height = plot.height,
        "computed chart layout"
    );
    Ok(layout)
}

/// Materializes every shape, glyph and label of `spec` for one draw pass.
pub fn build_render_frame(spec: &ChartSpec, figure: &FigureConfig) -> ChartResult<RenderFrame> {
    let layout = compute_layout(spec, figure)?;
    let plot = layout.plot;
    let font_px = figure.font_size_px();
    let label_pad = figure.points_to_pixels(LABEL_PAD_PT);
    let title_pad = figure.points_to_pixels(TITLE_PAD_PT);

    let mut frame = RenderFrame::new(layout.viewport, figure.font_family.clone());

    for (id, annotation) in &spec.annotations {
        let Some(region) = annotation.region else {
            continue;
        };
        let (cx, cy) = layout.to_pixel(region.center.x, region.center.y)?;
        let radius_x = layout
            .x_scale
            .length_to_pixels(region.width / 2.0, plot.x_range())?;
        let radius_y = layout
            .y_scale
            .length_to_pixels(region.height / 2.0, plot.y_range())?;

        let mut ellipse =
            EllipsePrimitive::new(id.clone(), cx, cy, radius_x, radius_y, region.fill);
        if let Some(sketch) = region.sketch {
            ellipse = ellipse.with_sketch(sketch.scaled(figure.points_to_pixels(1.0)));
        }
        frame.ellipses.push(ellipse);
    }

    let arrow_size = figure.points_to_pixels(spec.arrow_size_pt);
    if let Some(at_y) = spec.x_axis.end_arrow_at {
        let y = layout.y_scale.domain_to_pixel(at_y, plot.y_range())?;
        frame.markers.push(MarkerPrimitive::new(
            plot.right(),
            y,
            arrow_size,
            MarkerDirection::Right,
            Color::BLACK,
        ));
    }
    if let Some(at_x) = spec.y_axis.end_arrow_at {
        let x = layout.x_scale.domain_to_pixel(at_x, plot.x_range())?;
        frame.markers.push(MarkerPrimitive::new(
            x,
            plot.top,
            arrow_size,
            MarkerDirection::Up,
            Color::BLACK,
        ));
    }

    let spines = spec.spines;
    let (left, top, right, bottom) = (plot.left, plot.top, plot.right(), plot.bottom());
    push_spine(&mut frame, figure, spines.left, (left, bottom), (left, top));
    push_spine(&mut frame, figure, spines.bottom, (left, bottom), (right, bottom));
    push_spine(&mut frame, figure, spines.top, (left, top), (right, top));
    push_spine(&mut frame, figure, spines.right, (right, bottom), (right, top));

    for (id, annotation) in &spec.annotations {
        let (x, y) = layout.to_pixel(annotation.position.x, annotation.position.y)?;
        frame.texts.push(
            TextPrimitive::new(
                annotation.label.clone(),
                x,
                y,
                font_px,
                Color::BLACK,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Center)
            .with_line_spacing(figure.line_spacing)
            .with_region_id(id.clone()),
        );
    }

    frame.texts.push(
        TextPrimitive::new(
            spec.title.clone(),
            plot.center_x(),
            plot.top - title_pad,
            figure.title_font_size_px(),
            Color::BLACK,
            TextHAlign::Center,
        )
        .with_v_align(TextVAlign::Bottom)
        .with_role(TextRole::Title)
        .with_line_spacing(figure.line_spacing),
    );
    frame.texts.push(
        TextPrimitive::new(
            spec.x_axis.label.clone(),
            plot.center_x(),
            plot.bottom() + label_pad,
            font_px,
            Color::BLACK,
            TextHAlign::Center,
        )
        .with_v_align(TextVAlign::Top)
        .with_role(TextRole::AxisLabel)
        .with_line_spacing(figure.line_spacing),
    );
    // Rotated a quarter turn, the block's bottom edge faces the axes box.
    frame.texts.push(
        TextPrimitive::new(
            spec.y_axis.label.clone(),
            plot.left - label_pad,
            plot.center_y(),
            font_px,
            Color::BLACK,
            TextHAlign::Center,
        )
        .with_v_align(TextVAlign::Bottom)
        .with_rotation(90.0)
        .with_role(TextRole::AxisLabel)
        .with_line_spacing(figure.line_spacing),
    );

    frame.validate()?;
    debug!(
        ellipses = frame.ellipses.len(),
        markers = frame.markers.len(),
        lines = frame.lines.len(),
        texts = frame.texts.len(),
        "built render frame"
    );
    Ok(frame)
}

fn push_spine(
    frame: &mut RenderFrame,
    figure: &FigureConfig,
    style: SpineStyle,
    from: (f64, f64),
    to: (f64, f64),
) {
    if !style.visible {
        return;
    }
    frame.lines.push(LinePrimitive::new(
        from.0,
        from.1,
        to.0,
        to.1,
        figure.points_to_pixels(style.width_pt),
        Color::BLACK,
    ));
}

fn label_block_height(text: &str, font_px: f64, line_spacing: f64) -> f64 {
    let lines = text.split('\n').count().max(1) as f64;
    font_px + (lines - 1.0) * font_px * line_spacing
}

/// Width of the widest line assuming a fixed average glyph advance.
fn estimate_text_width_px(text: &str, font_px: f64) -> f64 {
    text.split('\n')
        .map(|line| OrderedFloat(line.chars().count() as f64 * GLYPH_WIDTH_FONT_SIZES * font_px))
        .max()
        .map_or(0.0, |width| width.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{build_render_frame, compute_layout, estimate_text_width_px};
    use crate::chart::{AWSM, INTERPRETERS, wasm_runtime_tradeoffs};
    use crate::core::{FigureConfig, Viewport};
    use crate::render::{MarkerDirection, TextRole};

    #[test]
    fn plot_box_fits_inside_the_figure() {
        let layout =
            compute_layout(&wasm_runtime_tradeoffs(), &FigureConfig::default()).expect("layout");

        assert_eq!(layout.viewport, Viewport::new(648, 378));
        assert!(layout.plot.left > 0.0 && layout.plot.top > 0.0);
        assert!(layout.plot.right() < 648.0);
        assert!(layout.plot.bottom() < 378.0);
    }

    #[test]
    fn data_corners_map_to_plot_corners() {
        let layout =
            compute_layout(&wasm_runtime_tradeoffs(), &FigureConfig::default()).expect("layout");
        let (x0, y0) = layout.to_pixel(0.0, 0.5).expect("origin");
        let (x1, y1) = layout.to_pixel(12.5, 6.0).expect("far corner");

        assert_relative_eq!(x0, layout.plot.left, epsilon = 1e-9);
        assert_relative_eq!(y0, layout.plot.bottom(), epsilon = 1e-9);
        assert_relative_eq!(x1, layout.plot.right(), epsilon = 1e-9);
        assert_relative_eq!(y1, layout.plot.top, epsilon = 1e-9);
    }

    #[test]
    fn frame_contains_the_fixed_decorations() {
        let frame =
            build_render_frame(&wasm_runtime_tradeoffs(), &FigureConfig::default()).expect("frame");

        assert_eq!(frame.ellipses.len(), 4);
        assert_eq!(frame.annotations().count(), 5);
        assert_eq!(frame.lines.len(), 2);
        assert!(frame.lines.iter().all(|line| line.stroke_width == 2.0));
        assert_eq!(frame.markers.len(), 2);
        assert_eq!(frame.markers[0].direction, MarkerDirection::Right);
        assert_eq!(frame.markers[1].direction, MarkerDirection::Up);
        assert_eq!(
            frame.texts.iter().filter(|t| t.role == TextRole::Title).count(),
            1
        );
        assert_eq!(
            frame.texts.iter().filter(|t| t.role == TextRole::AxisLabel).count(),
            2
        );
    }

    #[test]
    fn visible_spines_run_along_the_left_and_bottom_edges() {
        let figure = FigureConfig::default();
        let spec = wasm_runtime_tradeoffs();
        let plot = compute_layout(&spec, &figure).expect("layout").plot;
        let frame = build_render_frame(&spec, &figure).expect("frame");

        let left = frame.lines[0];
        assert_relative_eq!(left.x1, plot.left);
        assert_relative_eq!(left.x2, plot.left);
        assert_relative_eq!(left.y1, plot.bottom());
        assert_relative_eq!(left.y2, plot.top);

        let bottom = frame.lines[1];
        assert_relative_eq!(bottom.x1, plot.left);
        assert_relative_eq!(bottom.x2, plot.right());
        assert_relative_eq!(bottom.y1, plot.bottom());
        assert_relative_eq!(bottom.y2, plot.bottom());
    }

    #[test]
    fn ellipse_radii_follow_data_units() {
        let figure = FigureConfig::default();
        let spec = wasm_runtime_tradeoffs();
        let layout = compute_layout(&spec, &figure).expect("layout");
        let frame = build_render_frame(&spec, &figure).expect("frame");

        let interpreters = frame.region(INTERPRETERS).expect("interpreters ellipse");
        assert_relative_eq!(interpreters.radius_x, 1.5 * layout.plot.width / 12.5, epsilon = 1e-9);
        assert_relative_eq!(interpreters.radius_y, 0.5 * layout.plot.height / 5.5, epsilon = 1e-9);

        let awsm = frame.region(AWSM).expect("awsm ellipse");
        let label = frame
            .annotations()
            .find(|t| t.region_id.as_deref() == Some(AWSM))
            .expect("awsm label");
        assert_relative_eq!(awsm.center_x, label.x, epsilon = 1e-9);
        assert_relative_eq!(awsm.center_y, label.y, epsilon = 1e-9);
    }

    #[test]
    fn tiny_figure_is_rejected() {
        let figure = FigureConfig::new(0.5, 0.5);
        assert!(compute_layout(&wasm_runtime_tradeoffs(), &figure).is_err());
    }

    #[test]
    fn text_width_uses_the_widest_line() {
        assert_relative_eq!(estimate_text_width_px("ab\nabcd", 10.0), 24.0);
        assert_eq!(estimate_text_width_px("", 10.0), 0.0);
    }
}
