use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};

/// Page and typography settings for one figure.
///
/// Sizes are in inches and points the way documentation figures are usually
/// specified; `dpi` converts both to device pixels. At the default 72 dpi one
/// point is one pixel, which keeps SVG output in point units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    pub width_in: f64,
    pub height_in: f64,
    #[serde(default = "default_dpi")]
    pub dpi: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size_pt")]
    pub font_size_pt: f64,
    /// Title size relative to `font_size_pt`.
    #[serde(default = "default_title_scale")]
    pub title_scale: f64,
    /// Baseline-to-baseline distance of multi-line labels, in font sizes.
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: 1.5 * 6.0,
            height_in: 1.5 * 3.5,
            dpi: default_dpi(),
            font_family: default_font_family(),
            font_size_pt: default_font_size_pt(),
            title_scale: default_title_scale(),
            line_spacing: default_line_spacing(),
        }
    }
}

impl FigureConfig {
    #[must_use]
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    #[must_use]
    pub fn with_font(mut self, family: impl Into<String>, size_pt: f64) -> Self {
        self.font_family = family.into();
        self.font_size_pt = size_pt;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("width_in", self.width_in),
            ("height_in", self.height_in),
            ("dpi", self.dpi),
            ("font_size_pt", self.font_size_pt),
            ("title_scale", self.title_scale),
            ("line_spacing", self.line_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "figure `{name}` must be finite and > 0"
                )));
            }
        }
        if self.font_family.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "figure font family must not be empty".to_owned(),
            ));
        }
        self.viewport().map(|_| ())
    }

    /// Canvas size in device pixels, rounded to whole pixels.
    pub fn viewport(&self) -> ChartResult<Viewport> {
        let width = (self.width_in * self.dpi).round();
        let height = (self.height_in * self.dpi).round();
        if !(1.0..=f64::from(u16::MAX)).contains(&width)
            || !(1.0..=f64::from(u16::MAX)).contains(&height)
        {
            return Err(ChartError::InvalidViewport {
                width: width.max(0.0) as u32,
                height: height.max(0.0) as u32,
            });
        }
        Ok(Viewport::new(width as u32, height as u32))
    }

    #[must_use]
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }

    #[must_use]
    pub fn font_size_px(&self) -> f64 {
        self.points_to_pixels(self.font_size_pt)
    }

    #[must_use]
    pub fn title_font_size_px(&self) -> f64 {
        self.font_size_px() * self.title_scale
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize figure config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse figure config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_dpi() -> f64 {
    72.0
}

fn default_font_family() -> String {
    "Ubuntu".to_owned()
}

fn default_font_size_pt() -> f64 {
    12.0
}

fn default_title_scale() -> f64 {
    1.2
}

fn default_line_spacing() -> f64 {
    1.2
}
