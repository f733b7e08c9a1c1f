use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Hand-drawn stroke perturbation.
///
/// The outline is displaced perpendicular to its direction by a sine wave of
/// amplitude `scale` pixels whose wavelength (`length` pixels) is randomly
/// shrunk or stretched by up to a factor of `randomness`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchParams {
    pub scale: f64,
    pub length: f64,
    pub randomness: f64,
}

impl SketchParams {
    #[must_use]
    pub const fn new(scale: f64, length: f64, randomness: f64) -> Self {
        Self {
            scale,
            length,
            randomness,
        }
    }

    /// Returns a copy with `scale` and `length` converted by `factor`
    /// (points to pixels).
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            scale: self.scale * factor,
            length: self.length * factor,
            randomness: self.randomness,
        }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        self.scale != 0.0
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(ChartError::InvalidData(
                "sketch scale must be finite and >= 0".to_owned(),
            ));
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(ChartError::InvalidData(
                "sketch length must be finite and > 0".to_owned(),
            ));
        }
        if !self.randomness.is_finite() || self.randomness <= 0.0 {
            return Err(ChartError::InvalidData(
                "sketch randomness must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// 32-bit linear congruential generator (MSVC `rand()` constants).
///
/// Reseeded to zero for every path so repeated renders are identical.
#[derive(Debug, Clone, Copy, Default)]
struct SketchRng {
    state: u32,
}

impl SketchRng {
    const MULTIPLIER: u32 = 214_013;
    const INCREMENT: u32 = 2_531_011;

    fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        f64::from(self.state) / 4_294_967_296.0
    }
}

/// Splits every segment of `points` into pieces no longer than `max_step`.
#[must_use]
pub fn segmentize(points: &[(f64, f64)], max_step: f64) -> Vec<(f64, f64)> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    if !max_step.is_finite() || max_step <= 0.0 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len());
    out.push(first);
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        let length = (x1 - x0).hypot(y1 - y0);
        let steps = (length / max_step).ceil().max(1.0) as usize;
        for step in 1..=steps {
            let t = step as f64 / steps as f64;
            out.push((x0 + (x1 - x0) * t, y0 + (y1 - y0) * t));
        }
    }
    out
}

/// Applies the sketch displacement to an already segmentized polyline.
///
/// The first vertex is left in place; every following vertex moves along the
/// normal of the segment that ends at it.
#[must_use]
pub fn apply_sketch(points: &[(f64, f64)], params: SketchParams) -> Vec<(f64, f64)> {
    if !params.is_enabled() {
        return points.to_vec();
    }

    let mut rng = SketchRng::default();
    let phase_scale = TAU / (params.length * params.randomness);
    let log_randomness = 2.0 * params.randomness.ln();
    let mut phase = 0.0;

    let mut out = Vec::with_capacity(points.len());
    let mut last: Option<(f64, f64)> = None;
    for &(x, y) in points {
        let Some((last_x, last_y)) = last else {
            last = Some((x, y));
            out.push((x, y));
            continue;
        };

        phase += (rng.next_f64() * log_randomness).exp();
        let den = last_x - x;
        let num = last_y - y;
        last = Some((x, y));

        let len = num.hypot(den);
        if len == 0.0 {
            out.push((x, y));
            continue;
        }
        let r = (phase * phase_scale).sin() * params.scale;
        let r_over_len = r / len;
        out.push((x + r_over_len * num, y - r_over_len * den));
    }
    out
}
