use crate::foundation::math::approach;

/// How "move a fraction of the remaining distance" smoothing scales with frame time.
///
/// Factors throughout the engine are written as per-frame fractions at 60 Hz (e.g. `0.1`).
/// `PerFrame` applies them verbatim every tick, so visual speed follows the display refresh rate.
/// `TimeConstant` converts them to an exponential decay over elapsed time that matches the
/// per-frame behavior exactly at `reference_hz`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Smoothing {
    PerFrame,
    TimeConstant { reference_hz: f64 },
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::TimeConstant { reference_hz: 60.0 }
    }
}

impl Smoothing {
    /// Effective blend factor for one step of `dt` seconds.
    pub fn factor(self, per_frame: f64, dt: f64) -> f64 {
        let per_frame = per_frame.clamp(0.0, 1.0);
        match self {
            Self::PerFrame => per_frame,
            Self::TimeConstant { reference_hz } => {
                if !(dt > 0.0) || !dt.is_finite() || !(reference_hz > 0.0) {
                    return 0.0;
                }
                1.0 - (1.0 - per_frame).powf(dt * reference_hz)
            }
        }
    }

    pub fn approach(self, current: f64, target: f64, per_frame: f64, dt: f64) -> f64 {
        approach(current, target, self.factor(per_frame, dt))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/smoothing.rs"]
mod tests;
