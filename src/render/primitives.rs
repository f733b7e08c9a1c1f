use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};
use crate::render::sketch::{SketchParams, apply_sketch, segmentize};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> ChartResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(ChartError::InvalidData(format!(
                "color `{hex}` must be #rrggbb or #rrggbbaa"
            )));
        }

        let channel = |index: usize| -> ChartResult<f64> {
            u8::from_str_radix(&digits[index..index + 2], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| ChartError::InvalidData(format!("color `{hex}` is not hexadecimal")))
        };

        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Formats the color channels as `#rrggbb`; alpha is reported separately.
    #[must_use]
    pub fn to_hex_rgb(self) -> String {
        let to_byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue)
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Optional outline drawn around a filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
}

/// Filled ellipse in pixel space, optionally with a hand-drawn outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipsePrimitive {
    /// Identifier of the annotation this ellipse groups.
    pub region_id: String,
    pub center_x: f64,
    pub center_y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub fill_color: Color,
    pub stroke: Option<StrokeStyle>,
    pub sketch: Option<SketchParams>,
}

impl EllipsePrimitive {
    /// Outline vertices are at most this far apart before sketching.
    pub const FLATTEN_STEP_PX: f64 = 1.0;

    #[must_use]
    pub fn new(
        region_id: impl Into<String>,
        center_x: f64,
        center_y: f64,
        radius_x: f64,
        radius_y: f64,
        fill_color: Color,
    ) -> Self {
        Self {
            region_id: region_id.into(),
            center_x,
            center_y,
            radius_x,
            radius_y,
            fill_color,
            stroke: None,
            sketch: None,
        }
    }

    #[must_use]
    pub fn with_sketch(mut self, sketch: SketchParams) -> Self {
        self.sketch = Some(sketch);
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, width: f64, color: Color) -> Self {
        self.stroke = Some(StrokeStyle { width, color });
        self
    }

    /// Closed outline polygon, starting at angle zero and running
    /// counter-clockwise on screen. The last vertex repeats the first one
    /// before the sketch displacement is applied.
    #[must_use]
    pub fn outline(&self) -> Vec<(f64, f64)> {
        let (a, b) = (self.radius_x, self.radius_y);
        let h = ((a - b) / (a + b)).powi(2);
        let perimeter = PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()));
        let segments = (perimeter / (2.0 * Self::FLATTEN_STEP_PX)).ceil().max(32.0) as usize;

        let coarse: Vec<(f64, f64)> = (0..=segments)
            .map(|i| {
                let t = TAU * i as f64 / segments as f64;
                (self.center_x + a * t.cos(), self.center_y - b * t.sin())
            })
            .collect();
        let fine = segmentize(&coarse, Self::FLATTEN_STEP_PX);

        match self.sketch {
            Some(sketch) if sketch.is_enabled() => apply_sketch(&fine, sketch),
            _ => fine,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.region_id.is_empty() {
            return Err(ChartError::InvalidData(
                "ellipse region id must not be empty".to_owned(),
            ));
        }
        if !self.center_x.is_finite() || !self.center_y.is_finite() {
            return Err(ChartError::InvalidData(
                "ellipse center must be finite".to_owned(),
            ));
        }
        if !self.radius_x.is_finite()
            || !self.radius_y.is_finite()
            || self.radius_x <= 0.0
            || self.radius_y <= 0.0
        {
            return Err(ChartError::InvalidData(
                "ellipse radii must be finite and > 0".to_owned(),
            ));
        }
        if let Some(stroke) = self.stroke {
            if !stroke.width.is_finite() || stroke.width <= 0.0 {
                return Err(ChartError::InvalidData(
                    "ellipse stroke width must be finite and > 0".to_owned(),
                ));
            }
            stroke.color.validate()?;
        }
        if let Some(sketch) = self.sketch {
            sketch.validate()?;
        }
        self.fill_color.validate()
    }
}

/// Direction a triangle marker points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerDirection {
    Right,
    Up,
}

/// Filled triangle glyph, used for the arrow heads at the axis ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPrimitive {
    pub x: f64,
    pub y: f64,
    /// Glyph extent in pixels; the triangle fits a `size_px` square.
    pub size_px: f64,
    pub direction: MarkerDirection,
    pub color: Color,
}

impl MarkerPrimitive {
    #[must_use]
    pub const fn new(
        x: f64,
        y: f64,
        size_px: f64,
        direction: MarkerDirection,
        color: Color,
    ) -> Self {
        Self {
            x,
            y,
            size_px,
            direction,
            color,
        }
    }

    /// Triangle vertices centred on (`x`, `y`), tip first.
    #[must_use]
    pub fn vertices(self) -> [(f64, f64); 3] {
        let half = self.size_px / 2.0;
        let rotation = match self.direction {
            MarkerDirection::Up => 0.0,
            MarkerDirection::Right => FRAC_PI_2,
        };
        // Up-pointing unit triangle in a y-down frame, then rotated clockwise.
        [(0.0, -1.0), (-1.0, 1.0), (1.0, 1.0)].map(|(ux, uy)| {
            let (sin, cos) = rotation.sin_cos();
            let rx = ux * cos - uy * sin;
            let ry = ux * sin + uy * cos;
            (self.x + rx * half, self.y + ry * half)
        })
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "marker position must be finite".to_owned(),
            ));
        }
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment of the whole text block relative to
/// `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextVAlign {
    Top,
    Center,
    Bottom,
}

/// What a text label annotates; backends use it for grouping and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextRole {
    Annotation,
    Title,
    AxisLabel,
}

/// Draw command for one label in pixel space.
///
/// `text` may contain `\n`; lines are stacked `line_spacing` font sizes apart
/// and the block as a whole is aligned by `h_align`/`v_align`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
    pub role: TextRole,
    /// Counter-clockwise rotation around (`x`, `y`).
    pub rotation_deg: f64,
    pub line_spacing: f64,
    /// Annotation id, set for `TextRole::Annotation`.
    pub region_id: Option<String>,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            v_align: TextVAlign::Center,
            role: TextRole::Annotation,
            rotation_deg: 0.0,
            line_spacing: 1.2,
            region_id: None,
        }
    }

    #[must_use]
    pub fn with_v_align(mut self, v_align: TextVAlign) -> Self {
        self.v_align = v_align;
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: TextRole) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    #[must_use]
    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    #[must_use]
    pub fn with_region_id(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = Some(region_id.into());
        self
    }

    #[must_use]
    pub fn lines(&self) -> SmallVec<[&str; 2]> {
        self.text.split('\n').collect()
    }

    /// Distance between consecutive baselines in pixels.
    #[must_use]
    pub fn line_height_px(&self) -> f64 {
        self.font_size_px * self.line_spacing
    }

    /// Height of the whole text block in pixels.
    #[must_use]
    pub fn block_height_px(&self) -> f64 {
        let lines = self.lines().len() as f64;
        self.font_size_px + (lines - 1.0) * self.line_height_px()
    }

    /// Vertical offset from `y` to the top of the text block, in the text's
    /// own (unrotated) frame.
    #[must_use]
    pub fn block_top_offset(&self) -> f64 {
        match self.v_align {
            TextVAlign::Top => 0.0,
            TextVAlign::Center => -self.block_height_px() / 2.0,
            TextVAlign::Bottom => -self.block_height_px(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_deg.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(ChartError::InvalidData(
                "line spacing must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
