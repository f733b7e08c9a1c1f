use std::path::PathBuf;

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("failed to write `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported output format `{extension}`")]
    UnsupportedFormat { extension: String },

    #[error("output path `{}` has a missing extension; use .svg, .json or .png", .path.display())]
    MissingExtension { path: PathBuf },

    #[error("render backend error: {0}")]
    Backend(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    /// Process exit code reported by the CLI for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}
