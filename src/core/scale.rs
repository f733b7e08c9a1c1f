use serde::{Deserialize, Serialize};

use crate::core::types::PixelRange;
use crate::error::{ChartError, ChartResult};

/// Linear mapping from a data interval onto a pixel interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.domain_end - self.domain_start
    }

    pub fn domain_to_pixel(self, value: f64, range: PixelRange) -> ChartResult<f64> {
        validate_range(range)?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / self.span();
        Ok(range.start + normalized * range.span())
    }

    pub fn pixel_to_domain(self, pixel: f64, range: PixelRange) -> ChartResult<f64> {
        validate_range(range)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - range.start) / range.span();
        Ok(self.domain_start + normalized * self.span())
    }

    /// Converts a data-space length (for example an ellipse width) to a
    /// non-negative pixel length.
    pub fn length_to_pixels(self, length: f64, range: PixelRange) -> ChartResult<f64> {
        validate_range(range)?;
        if !length.is_finite() {
            return Err(ChartError::InvalidData("length must be finite".to_owned()));
        }
        Ok((length * range.span() / self.span()).abs())
    }
}

fn validate_range(range: PixelRange) -> ChartResult<()> {
    if !range.is_valid() {
        return Err(ChartError::InvalidData(format!(
            "pixel range must be finite and non-empty: {}..{}",
            range.start, range.end
        )));
    }
    Ok(())
}
