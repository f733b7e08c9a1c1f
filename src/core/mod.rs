pub mod figure;
pub mod scale;
pub mod types;

pub use figure::FigureConfig;
pub use scale::LinearScale;
pub use types::{DataPoint, PixelRange, PlotRect, Viewport};
