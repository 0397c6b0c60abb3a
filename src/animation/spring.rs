//! Damped harmonic springs.
//!
//! Each [`Spring`] chases a target that may change every frame. Steps are solved in closed form
//! for the under-, critically- and over-damped regimes, so a long frame (background tab, dropped
//! frames) lands on the exact trajectory instead of exploding like an explicit integrator.

use crate::foundation::error::{WeaveError, WeaveResult};

/// Physical parameters of a spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance from target under which the spring may come to rest.
    #[serde(default = "default_rest")]
    pub rest_delta: f64,
    /// Speed under which the spring may come to rest.
    #[serde(default = "default_rest")]
    pub rest_speed: f64,
}

fn default_rest() -> f64 {
    1e-3
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_delta: 1e-3,
            rest_speed: 1e-3,
        }
    }

    /// Spring with exactly critical damping (`c = 2·√(k·m)`).
    pub fn critical(stiffness: f64, mass: f64) -> Self {
        Self::new(stiffness, 2.0 * (stiffness * mass).sqrt(), mass)
    }

    pub fn validate(&self) -> WeaveResult<()> {
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;
        if !finite_positive(self.stiffness) || !finite_positive(self.mass) {
            return Err(WeaveError::validation(
                "spring stiffness and mass must be positive and finite",
            ));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(WeaveError::validation(
                "spring damping must be finite and non-negative",
            ));
        }
        if !(self.rest_delta >= 0.0 && self.rest_speed >= 0.0) {
            return Err(WeaveError::validation(
                "spring rest thresholds must be non-negative",
            ));
        }
        Ok(())
    }

    /// Undamped angular frequency `ω0 = √(k/m)`.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio `ζ = c / (2·√(k·m))`; `1.0` is critical.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(100.0, 10.0, 1.0)
    }
}

/// A spring-smoothed scalar following a moving target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// A spring at rest on `value`.
    pub fn new(config: SpringConfig, value: f64) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Change the target without touching position or velocity. Non-finite targets are ignored.
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Teleport to `value` and stop.
    pub fn jump(&mut self, value: f64) {
        if value.is_finite() {
            self.value = value;
            self.target = value;
            self.velocity = 0.0;
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.velocity == 0.0 && self.value == self.target
    }

    /// Set the target then advance by `dt` seconds.
    pub fn follow(&mut self, target: f64, dt: f64) -> f64 {
        self.set_target(target);
        self.step(dt)
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn step(&mut self, dt: f64) -> f64 {
        if !(dt > 0.0) || !dt.is_finite() || self.is_at_rest() {
            return self.value;
        }

        let x0 = self.value - self.target;
        let v0 = self.velocity;
        let omega0 = self.config.natural_frequency();
        let zeta = self.config.damping_ratio();

        let (x, v) = if (zeta - 1.0).abs() < 1e-6 {
            let e = (-omega0 * dt).exp();
            let b = v0 + omega0 * x0;
            (e * (x0 + b * dt), e * (v0 - omega0 * dt * b))
        } else if zeta < 1.0 {
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            let decay = zeta * omega0;
            let e = (-decay * dt).exp();
            let a = x0;
            let b = (v0 + decay * x0) / omega_d;
            let (sin, cos) = (omega_d * dt).sin_cos();
            let x = e * (a * cos + b * sin);
            let v = e * (-decay * (a * cos + b * sin) + omega_d * (b * cos - a * sin));
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega0 * (zeta - root);
            let r2 = -omega0 * (zeta + root);
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = ((r1 * dt).exp(), (r2 * dt).exp());
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        };

        if !(x.is_finite() && v.is_finite()) {
            self.jump(self.target);
            return self.value;
        }

        if x.abs() < self.config.rest_delta && v.abs() < self.config.rest_speed {
            self.value = self.target;
            self.velocity = 0.0;
        } else {
            self.value = self.target + x;
            self.velocity = v;
        }
        self.value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
