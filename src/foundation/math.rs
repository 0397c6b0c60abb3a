/// Clamp into `[0, 1]`; NaN maps to `0`.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `x` inside `[a, b]`, clamped. A non-positive span yields `0`.
#[inline]
pub fn inverse_lerp_clamped(a: f64, b: f64, x: f64) -> f64 {
    let span = b - a;
    if !(span > 0.0) {
        return 0.0;
    }
    clamp01((x - a) / span)
}

/// One step of exponential approach by a fixed fraction of the remaining distance.
#[inline]
pub fn approach(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Frame-rate independent exponential damping toward `target` with rate `lambda` (1/s).
#[inline]
pub fn damp(current: f64, target: f64, lambda: f64, dt: f64) -> f64 {
    if !(dt > 0.0) {
        return current;
    }
    lerp(current, target, 1.0 - (-lambda * dt).exp())
}

/// Replace NaN/infinite values with `fallback`.
#[inline]
pub fn finite_or(x: f64, fallback: f64) -> f64 {
    if x.is_finite() { x } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
