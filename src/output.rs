//! Output-format selection and the single write of the encoded chart.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chart::{ChartSpec, build_render_frame, wasm_runtime_tradeoffs};
use crate::core::FigureConfig;
use crate::error::{ChartError, ChartResult};
use crate::render::{EncodingRenderer, RenderFrame, SvgRenderer};

/// File format implied by an output path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Svg,
    Png,
    /// Scene snapshot in the render-frame JSON contract.
    Json,
}

impl OutputFormat {
    /// Picks the format from the extension, case-insensitively.
    ///
    /// PNG needs the `cairo-backend` feature; without it `.png` is reported
    /// as unsupported.
    pub fn from_path(path: &Path) -> ChartResult<Self> {
        let Some(extension) = path.extension() else {
            return Err(ChartError::MissingExtension {
                path: path.to_path_buf(),
            });
        };
        let extension = extension.to_string_lossy().to_ascii_lowercase();

        match extension.as_str() {
            "svg" => Ok(Self::Svg),
            "json" => Ok(Self::Json),
            "png" if cfg!(feature = "cairo-backend") => Ok(Self::Png),
            _ => Err(ChartError::UnsupportedFormat { extension }),
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Json => "json",
        }
    }
}

/// What a successful write produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub bytes: usize,
    pub regions: usize,
    pub annotations: usize,
}

/// Encodes `frame` in `format` entirely in memory.
pub fn encode_frame(frame: &RenderFrame, format: OutputFormat) -> ChartResult<Vec<u8>> {
    match format {
        OutputFormat::Svg => {
            let mut renderer = SvgRenderer::new();
            encode_with(&mut renderer, frame)
        }
        OutputFormat::Json => Ok(frame.to_json_contract_v1_pretty()?.into_bytes()),
        OutputFormat::Png => encode_png(frame),
    }
}

#[cfg(feature = "cairo-backend")]
fn encode_png(frame: &RenderFrame) -> ChartResult<Vec<u8>> {
    let mut renderer = crate::render::CairoRenderer::for_frame(frame)?;
    encode_with(&mut renderer, frame)
}

#[cfg(not(feature = "cairo-backend"))]
fn encode_png(_frame: &RenderFrame) -> ChartResult<Vec<u8>> {
    Err(ChartError::UnsupportedFormat {
        extension: OutputFormat::Png.extension().to_owned(),
    })
}

fn encode_with<R: EncodingRenderer>(renderer: &mut R, frame: &RenderFrame) -> ChartResult<Vec<u8>> {
    renderer.render(frame)?;
    renderer.encoded()
}

/// Lays out `spec`, encodes it for `path`'s extension and writes the file,
/// replacing any existing one.
///
/// The format is resolved before anything is drawn, and the file is only
/// touched once the whole image is encoded.
pub fn write_chart(
    spec: &ChartSpec,
    figure: &FigureConfig,
    path: impl AsRef<Path>,
) -> ChartResult<RenderSummary> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path)?;
    let frame = build_render_frame(spec, figure)?;
    let bytes = encode_frame(&frame, format)?;

    fs::write(path, &bytes).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let summary = RenderSummary {
        path: path.to_path_buf(),
        format,
        bytes: bytes.len(),
        regions: frame.ellipses.len(),
        annotations: frame.annotations().count(),
    };
    info!(
        path = %summary.path.display(),
        format = summary.format.extension(),
        bytes = summary.bytes,
        "wrote chart"
    );
    Ok(summary)
}

/// Renders the WebAssembly runtime tradeoffs chart with the default figure.
pub fn write_tradeoffs_chart(path: impl AsRef<Path>) -> ChartResult<RenderSummary> {
    write_chart(&wasm_runtime_tradeoffs(), &FigureConfig::default(), path)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::OutputFormat;
    use crate::error::ChartError;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("doc/impl-tradeoffs.svg")).expect("svg"),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("OUT.SVG")).expect("upper-case svg"),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("scene.json")).expect("json"),
            OutputFormat::Json
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = OutputFormat::from_path(Path::new("chart.gif")).expect_err("unsupported");
        assert!(matches!(
            err,
            ChartError::UnsupportedFormat { ref extension } if extension == "gif"
        ));
    }

    #[test]
    fn missing_extension_is_named_in_the_error() {
        let err = OutputFormat::from_path(Path::new("out/chart")).expect_err("no extension");
        assert!(matches!(err, ChartError::MissingExtension { .. }));
        assert!(err.to_string().contains("missing extension"));
        assert_eq!(err.exit_code(), 1);
    }

    #[cfg(not(feature = "cairo-backend"))]
    #[test]
    fn png_requires_cairo_backend() {
        let err = OutputFormat::from_path(Path::new("chart.png")).expect_err("no cairo");
        assert!(matches!(err, ChartError::UnsupportedFormat { extension } if extension == "png"));
    }
}
