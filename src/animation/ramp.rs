use smallvec::SmallVec;

use crate::foundation::error::{WeaveError, WeaveResult};

/// Piecewise-linear mapping from a scalar input to a scalar output.
///
/// Inputs outside the first/last stop clamp to the first/last output. Stops must be strictly
/// increasing so no segment ever has zero width.
#[derive(Clone, Debug, PartialEq)]
pub struct Ramp {
    stops: SmallVec<[(f64, f64); 4]>,
}

impl Ramp {
    pub fn new(input: &[f64], output: &[f64]) -> WeaveResult<Self> {
        if input.is_empty() {
            return Err(WeaveError::validation("ramp needs at least one stop"));
        }
        if input.len() != output.len() {
            return Err(WeaveError::validation(format!(
                "ramp input/output length mismatch ({} vs {})",
                input.len(),
                output.len()
            )));
        }
        if input.iter().chain(output).any(|v| !v.is_finite()) {
            return Err(WeaveError::validation("ramp stops must be finite"));
        }
        if !input.windows(2).all(|w| w[0] < w[1]) {
            return Err(WeaveError::validation(
                "ramp inputs must be strictly increasing",
            ));
        }
        Ok(Self {
            stops: input.iter().copied().zip(output.iter().copied()).collect(),
        })
    }

    pub fn constant(value: f64) -> Self {
        let mut stops = SmallVec::new();
        stops.push((0.0, value));
        Self { stops }
    }

    /// Build from stops already in input order, dropping any stop that does not advance.
    pub(crate) fn from_ordered(stops: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut out: SmallVec<[(f64, f64); 4]> = SmallVec::new();
        for (x, y) in stops {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            if out.last().is_none_or(|&(last, _)| x > last) {
                out.push((x, y));
            }
        }
        if out.is_empty() {
            return Self::constant(0.0);
        }
        Self { stops: out }
    }

    pub fn sample(&self, x: f64) -> f64 {
        let first = self.stops[0];
        if x.is_nan() || x <= first.0 {
            return first.1;
        }
        let idx = self.stops.partition_point(|(at, _)| *at <= x);
        if idx >= self.stops.len() {
            return self.stops[self.stops.len() - 1].1;
        }
        let (x0, y0) = self.stops[idx - 1];
        let (x1, y1) = self.stops[idx];
        let t = (x - x0) / (x1 - x0);
        y0 + (y1 - y0) * t
    }

    /// Same stops with every output passed through `f`.
    pub fn map_output(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            stops: self.stops.iter().map(|&(x, y)| (x, f(y))).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ramp.rs"]
mod tests;
