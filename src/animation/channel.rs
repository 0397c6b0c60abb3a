use crate::animation::{
    ramp::Ramp,
    spring::{Spring, SpringConfig},
};

/// A progress-driven value: ramp-mapped, optionally spring-smoothed.
#[derive(Clone, Debug)]
pub struct Channel {
    ramp: Ramp,
    spring: Option<Spring>,
    value: f64,
}

impl Channel {
    /// Raw ramp output with no smoothing.
    pub fn direct(ramp: Ramp, progress: f64) -> Self {
        let value = ramp.sample(progress);
        Self {
            ramp,
            spring: None,
            value,
        }
    }

    /// Spring-smoothed ramp output, starting at rest on the ramp value for `progress`.
    pub fn sprung(ramp: Ramp, config: SpringConfig, progress: f64) -> Self {
        let value = ramp.sample(progress);
        Self {
            ramp,
            spring: Some(Spring::new(config, value)),
            value,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn update(&mut self, progress: f64, dt: f64) -> f64 {
        let target = self.ramp.sample(progress);
        self.value = match &mut self.spring {
            Some(spring) => spring.follow(target, dt),
            None => target,
        };
        self.value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/channel.rs"]
mod tests;
