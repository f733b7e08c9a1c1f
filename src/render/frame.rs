use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, EllipsePrimitive, LinePrimitive, MarkerPrimitive, TextPrimitive, TextRole,
};

pub const RENDER_FRAME_JSON_SCHEMA_V1: u32 = 1;

/// Backend-agnostic scene for one chart draw pass.
///
/// Backends paint in a fixed order: background, ellipses, markers, lines,
/// texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub font_family: String,
    pub background: Color,
    pub ellipses: Vec<EllipsePrimitive>,
    pub markers: Vec<MarkerPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrameJsonContractV1 {
    pub schema_version: u32,
    pub frame: RenderFrame,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, font_family: impl Into<String>) -> Self {
        Self {
            viewport,
            font_family: font_family.into(),
            background: Color::WHITE,
            ellipses: Vec::new(),
            markers: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_ellipse(mut self, ellipse: EllipsePrimitive) -> Self {
        self.ellipses.push(ellipse);
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: MarkerPrimitive) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.font_family.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "frame font family must not be empty".to_owned(),
            ));
        }
        self.background.validate()?;

        for ellipse in &self.ellipses {
            ellipse.validate()?;
        }
        for marker in &self.markers {
            marker.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ellipses.is_empty()
            && self.markers.is_empty()
            && self.lines.is_empty()
            && self.texts.is_empty()
    }

    /// Annotation labels in draw order.
    pub fn annotations(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.texts
            .iter()
            .filter(|text| text.role == TextRole::Annotation)
    }

    /// Ellipse belonging to the annotation `region_id`, if it has one.
    #[must_use]
    pub fn region(&self, region_id: &str) -> Option<&EllipsePrimitive> {
        self.ellipses
            .iter()
            .find(|ellipse| ellipse.region_id == region_id)
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = RenderFrameJsonContractV1 {
            schema_version: RENDER_FRAME_JSON_SCHEMA_V1,
            frame: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize render frame contract v1: {e}"))
        })
    }

    pub fn from_json_contract_v1_str(input: &str) -> ChartResult<Self> {
        let payload: RenderFrameJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse render frame json payload: {e}"))
        })?;
        if payload.schema_version != RENDER_FRAME_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported render frame schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.frame)
    }
}
