//! Chart content: annotations, ellipse regions and axis decorations as typed
//! literal data, plus the layout step that turns them into a `RenderFrame`.

mod layout;
mod tradeoffs;

pub use layout::{ChartLayout, build_render_frame, compute_layout};
pub use tradeoffs::{
    AOT_COMPILERS, AWSM, INTERPRETERS, JIT_COMPILERS, WASMTIME, wasm_runtime_tradeoffs,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, SketchParams};

/// Filled oval grouping an annotation, sized in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseRegion {
    pub center: DataPoint,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    /// Sketch amplitude and wavelength are in points.
    #[serde(default)]
    pub sketch: Option<SketchParams>,
}

impl EllipseRegion {
    #[must_use]
    pub fn new(center: DataPoint, width: f64, height: f64, fill: Color) -> Self {
        Self {
            center,
            width,
            height,
            fill,
            sketch: None,
        }
    }

    #[must_use]
    pub fn with_sketch(mut self, scale: f64, length: f64, randomness: f64) -> Self {
        self.sketch = Some(SketchParams::new(scale, length, randomness));
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.center.is_finite() {
            return Err(ChartError::InvalidData(
                "region center must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(ChartError::InvalidData(
                "region width and height must be finite and > 0".to_owned(),
            ));
        }
        if let Some(sketch) = self.sketch {
            sketch.validate()?;
        }
        self.fill.validate()
    }
}

/// Text label centred on a data position, optionally grouped by an ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub label: String,
    pub position: DataPoint,
    #[serde(default)]
    pub region: Option<EllipseRegion>,
}

impl Annotation {
    #[must_use]
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            position: DataPoint::new(x, y),
            region: None,
        }
    }

    #[must_use]
    pub fn with_region(mut self, region: EllipseRegion) -> Self {
        self.region = Some(region);
        self
    }
}

/// Visibility and width of one axes border.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpineStyle {
    pub visible: bool,
    pub width_pt: f64,
}

impl SpineStyle {
    pub const HIDDEN: Self = Self {
        visible: false,
        width_pt: 0.8,
    };

    #[must_use]
    pub const fn visible(width_pt: f64) -> Self {
        Self {
            visible: true,
            width_pt,
        }
    }
}

impl Default for SpineStyle {
    fn default() -> Self {
        Self::visible(0.8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Spines {
    pub left: SpineStyle,
    pub bottom: SpineStyle,
    pub top: SpineStyle,
    pub right: SpineStyle,
}

/// One axis: fixed limits, a label and an optional arrow glyph at its far end.
///
/// Tick marks and tick labels are never drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub label: String,
    pub min: f64,
    pub max: f64,
    /// Data coordinate on the other axis where the end arrow sits.
    #[serde(default)]
    pub end_arrow_at: Option<f64>,
}

impl AxisSpec {
    #[must_use]
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            end_arrow_at: None,
        }
    }

    #[must_use]
    pub fn with_end_arrow_at(mut self, at: f64) -> Self {
        self.end_arrow_at = Some(at);
        self
    }

    fn validate(&self, name: &str) -> ChartResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(ChartError::InvalidData(format!(
                "{name} axis limits must be finite with min < max"
            )));
        }
        if self.end_arrow_at.is_some_and(|at| !at.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "{name} axis arrow position must be finite"
            )));
        }
        Ok(())
    }
}

/// Complete description of one annotated chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    #[serde(default)]
    pub spines: Spines,
    /// Arrow glyph size in points.
    #[serde(default = "default_arrow_size_pt")]
    pub arrow_size_pt: f64,
    /// Annotations keyed by a stable id, drawn in insertion order.
    pub annotations: IndexMap<String, Annotation>,
}

impl ChartSpec {
    #[must_use]
    pub fn new(title: impl Into<String>, x_axis: AxisSpec, y_axis: AxisSpec) -> Self {
        Self {
            title: title.into(),
            x_axis,
            y_axis,
            spines: Spines::default(),
            arrow_size_pt: default_arrow_size_pt(),
            annotations: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_spines(mut self, spines: Spines) -> Self {
        self.spines = spines;
        self
    }

    /// Adds an annotation; an existing id keeps its position and takes the
    /// new content.
    #[must_use]
    pub fn with_annotation(mut self, id: impl Into<String>, annotation: Annotation) -> Self {
        self.annotations.insert(id.into(), annotation);
        self
    }

    #[must_use]
    pub fn annotation(&self, id: &str) -> Option<&Annotation> {
        self.annotations.get(id)
    }

    /// Number of annotations that carry an ellipse.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.annotations
            .values()
            .filter(|annotation| annotation.region.is_some())
            .count()
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.x_axis.validate("x")?;
        self.y_axis.validate("y")?;
        if !self.arrow_size_pt.is_finite() || self.arrow_size_pt <= 0.0 {
            return Err(ChartError::InvalidData(
                "arrow size must be finite and > 0".to_owned(),
            ));
        }
        for (side, spine) in [
            ("left", self.spines.left),
            ("bottom", self.spines.bottom),
            ("top", self.spines.top),
            ("right", self.spines.right),
        ] {
            if spine.visible && (!spine.width_pt.is_finite() || spine.width_pt <= 0.0) {
                return Err(ChartError::InvalidData(format!(
                    "{side} spine width must be finite and > 0"
                )));
            }
        }
        for (id, annotation) in &self.annotations {
            if id.is_empty() || annotation.label.trim().is_empty() {
                return Err(ChartError::InvalidData(format!(
                    "annotation `{id}` must have a non-empty id and label"
                )));
            }
            if !annotation.position.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "annotation `{id}` position must be finite"
                )));
            }
            if let Some(region) = &annotation.region {
                region.validate()?;
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart spec: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let spec: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart spec: {e}")))?;
        spec.validate()?;
        Ok(spec)
    }
}

fn default_arrow_size_pt() -> f64 {
    6.0
}
