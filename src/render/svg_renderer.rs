use std::fmt::Write;

use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, EllipsePrimitive, EncodingRenderer, MarkerPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive, TextRole,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub ellipses_drawn: usize,
    pub markers_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Writes a frame as a standalone SVG 1.1 document.
///
/// Output depends only on the frame: no timestamps, ids or random values are
/// embedded, so equal frames produce byte-identical documents. Text is kept
/// as `<text>` elements and every ellipse/annotation carries a
/// `data-region` attribute naming its annotation.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document produced by the most recent `render` call.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_document(&mut self, frame: &RenderFrame) -> Result<SvgRenderStats, std::fmt::Error> {
        let mut stats = SvgRenderStats::default();
        let out = &mut self.document;
        out.clear();

        let width = frame.viewport.width;
        let height = frame.viewport.height;
        writeln!(out, r#"<?xml version="1.0" encoding="utf-8" standalone="no"?>"#)?;
        write!(out, r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1""#)?;
        writeln!(
            out,
            r#" width="{width}pt" height="{height}pt" viewBox="0 0 {width} {height}">"#
        )?;
        writeln!(
            out,
            r#" <rect class="background" x="0" y="0" width="{width}" height="{height}"{}/>"#,
            fill_attrs(frame.background)
        )?;

        writeln!(out, r#" <g id="regions">"#)?;
        for ellipse in &frame.ellipses {
            write_ellipse(out, ellipse)?;
            stats.ellipses_drawn += 1;
        }
        writeln!(out, " </g>")?;

        writeln!(out, r#" <g id="markers">"#)?;
        for marker in &frame.markers {
            write_marker(out, *marker)?;
            stats.markers_drawn += 1;
        }
        writeln!(out, " </g>")?;

        writeln!(out, r#" <g id="spines">"#)?;
        for line in &frame.lines {
            write!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}""#,
                num(line.x1),
                num(line.y1),
                num(line.x2),
                num(line.y2),
            )?;
            writeln!(
                out,
                r#" stroke="{}"{} stroke-width="{}" stroke-linecap="square"/>"#,
                line.color.to_hex_rgb(),
                opacity_attr("stroke-opacity", line.color),
                num(line.stroke_width),
            )?;
            stats.lines_drawn += 1;
        }
        writeln!(out, " </g>")?;

        writeln!(
            out,
            r#" <g id="labels" font-family="{}">"#,
            escape_xml(&frame.font_family)
        )?;
        for text in &frame.texts {
            write_text(out, text)?;
            stats.texts_drawn += 1;
        }
        writeln!(out, " </g>")?;
        writeln!(out, "</svg>")?;

        Ok(stats)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let stats = self
            .write_document(frame)
            .map_err(|err| ChartError::Backend(format!("failed to format svg document: {err}")))?;
        debug!(
            ellipses = stats.ellipses_drawn,
            markers = stats.markers_drawn,
            lines = stats.lines_drawn,
            texts = stats.texts_drawn,
            bytes = self.document.len(),
            "rendered svg document"
        );
        self.last_stats = stats;
        Ok(())
    }
}

impl EncodingRenderer for SvgRenderer {
    fn encoded(&self) -> ChartResult<Vec<u8>> {
        if self.document.is_empty() {
            return Err(ChartError::Backend(
                "svg renderer has not rendered a frame yet".to_owned(),
            ));
        }
        Ok(self.document.clone().into_bytes())
    }
}

fn write_ellipse(out: &mut String, ellipse: &EllipsePrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"  <path class="region" data-region="{}" d=""#,
        escape_xml(&ellipse.region_id)
    )?;
    write_polygon(out, &ellipse.outline())?;
    write!(out, r#"""#)?;
    write!(out, "{}", fill_attrs(ellipse.fill_color))?;
    match ellipse.stroke {
        Some(stroke) => write!(
            out,
            r#" stroke="{}"{} stroke-width="{}""#,
            stroke.color.to_hex_rgb(),
            opacity_attr("stroke-opacity", stroke.color),
            num(stroke.width)
        )?,
        None => write!(out, r#" stroke="none""#)?,
    }
    writeln!(out, "/>")
}

fn write_marker(out: &mut String, marker: MarkerPrimitive) -> std::fmt::Result {
    write!(out, r#"  <path class="marker" d=""#)?;
    write_polygon(out, &marker.vertices())?;
    writeln!(out, r#""{}/>"#, fill_attrs(marker.color))
}

fn write_polygon(out: &mut String, points: &[(f64, f64)]) -> std::fmt::Result {
    for (index, (x, y)) in points.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        if index > 0 {
            out.push(' ');
        }
        write!(out, "{command}{} {}", num(*x), num(*y))?;
    }
    out.push_str(" Z");
    Ok(())
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let class = match text.role {
        TextRole::Annotation => "annotation",
        TextRole::Title => "title",
        TextRole::AxisLabel => "axis-label",
    };
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };

    write!(out, r#"  <text class="{class}""#)?;
    if let Some(region_id) = &text.region_id {
        write!(out, r#" data-region="{}""#, escape_xml(region_id))?;
    }
    write!(
        out,
        r#" x="{}" y="{}" font-size="{}" text-anchor="{anchor}" dominant-baseline="central"{}"#,
        num(text.x),
        num(text.y),
        num(text.font_size_px),
        fill_attrs(text.color)
    )?;
    if text.rotation_deg != 0.0 {
        write!(
            out,
            r#" transform="rotate({} {} {})""#,
            num(-text.rotation_deg),
            num(text.x),
            num(text.y)
        )?;
    }
    write!(out, ">")?;

    let first_center = text.y + text.block_top_offset() + text.font_size_px / 2.0;
    for (index, line) in text.lines().iter().enumerate() {
        let y = first_center + index as f64 * text.line_height_px();
        write!(
            out,
            r#"<tspan x="{}" y="{}">{}</tspan>"#,
            num(text.x),
            num(y),
            escape_xml(line)
        )?;
    }
    writeln!(out, "</text>")
}

fn fill_attrs(color: Color) -> String {
    format!(
        r#" fill="{}"{}"#,
        color.to_hex_rgb(),
        opacity_attr("fill-opacity", color)
    )
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.alpha >= 1.0 {
        String::new()
    } else {
        format!(r#" {name}="{}""#, num(color.alpha))
    }
}

/// Fixed-precision number formatting; trailing zeros are dropped and
/// negative zero is printed as `0`.
fn num(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{SvgRenderer, escape_xml, num};
    use crate::core::Viewport;
    use crate::render::{
        Color, EllipsePrimitive, EncodingRenderer, LinePrimitive, RenderFrame, Renderer,
        TextHAlign, TextPrimitive,
    };

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.25), "1.25");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(2.0 / 3.0), "0.667");
    }

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn multi_line_annotation_becomes_tspans() {
        let frame = RenderFrame::new(Viewport::new(200, 100), "Ubuntu")
            .with_ellipse(EllipsePrimitive::new("awsm", 100.0, 50.0, 30.0, 15.0, Color::WHITE))
            .with_line(LinePrimitive::new(0.0, 99.0, 200.0, 99.0, 2.0, Color::BLACK))
            .with_text(
                TextPrimitive::new(
                    "aWsm\n(LLVM)",
                    100.0,
                    50.0,
                    12.0,
                    Color::BLACK,
                    TextHAlign::Center,
                )
                .with_region_id("awsm"),
            );

        let mut renderer = SvgRenderer::new();
        renderer.render(&frame).expect("render");
        let svg = renderer.document();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert_eq!(svg.matches(r#"data-region="awsm""#).count(), 2);
        assert!(svg.contains("(LLVM)"));

        let stats = renderer.last_stats();
        assert_eq!(stats.ellipses_drawn, 1);
        assert_eq!(stats.lines_drawn, 1);
        assert_eq!(stats.texts_drawn, 1);
    }

    #[test]
    fn ellipse_outline_is_stroked_only_when_requested() {
        let plain = EllipsePrimitive::new("plain", 50.0, 50.0, 20.0, 10.0, Color::WHITE);
        let outlined = plain.clone().with_stroke(1.5, Color::rgba(0.0, 0.0, 0.0, 0.5));
        let frame = RenderFrame::new(Viewport::new(100, 100), "Ubuntu")
            .with_ellipse(plain)
            .with_ellipse(outlined);

        let mut renderer = SvgRenderer::new();
        renderer.render(&frame).expect("render");
        let svg = renderer.document();

        assert_eq!(svg.matches(r#"stroke="none""#).count(), 1);
        assert!(svg.contains(r##"stroke="#000000" stroke-opacity="0.5" stroke-width="1.5""##));
    }

    #[test]
    fn encoding_before_render_fails() {
        assert!(SvgRenderer::new().encoded().is_err());
    }
}
