//! tradeoff-chart: renders the WebAssembly runtime performance-tradeoffs
//! illustration used in the documentation.
//!
//! The chart content is fixed literal data (`chart`), laid out into a
//! backend-agnostic `RenderFrame` and handed to a `Renderer` backend. SVG
//! output is always available; PNG needs the `cairo-backend` feature.

pub mod chart;
pub mod cli;
pub mod core;
pub mod error;
pub mod output;
pub mod render;
pub mod telemetry;

pub use chart::{ChartSpec, build_render_frame, wasm_runtime_tradeoffs};
pub use error::{ChartError, ChartResult};
pub use output::{OutputFormat, RenderSummary, write_chart, write_tradeoffs_chart};
