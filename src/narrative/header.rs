use crate::animation::{channel::Channel, ramp::Ramp, spring::SpringConfig};

const STOPS: [f64; 4] = [0.0, 0.05, 0.95, 1.0];
const Y_SPRING: SpringConfig = SpringConfig::new(120.0, 24.0, 0.9);
const OPACITY_SPRING: SpringConfig = SpringConfig::new(130.0, 24.0, 0.8);

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct HeaderStyle {
    pub y: f64,
    pub opacity: f64,
    pub blur_px: f64,
}

/// Section title block: rises in over the first 5 % of the section and leaves over the last 5 %.
#[derive(Clone, Debug)]
pub struct SectionHeader {
    y: Channel,
    opacity: Channel,
    blur: Channel,
}

impl SectionHeader {
    pub fn new(progress: f64) -> Self {
        Self {
            y: Channel::sprung(
                Ramp::from_ordered(STOPS.into_iter().zip([68.0, 0.0, 0.0, -52.0])),
                Y_SPRING,
                progress,
            ),
            opacity: Channel::sprung(
                Ramp::from_ordered(STOPS.into_iter().zip([0.0, 1.0, 1.0, 0.0])),
                OPACITY_SPRING,
                progress,
            ),
            blur: Channel::direct(
                Ramp::from_ordered(STOPS.into_iter().zip([10.0, 0.0, 0.0, 10.0])),
                progress,
            ),
        }
    }

    pub fn update(&mut self, progress: f64, dt: f64) -> HeaderStyle {
        HeaderStyle {
            y: self.y.update(progress, dt),
            opacity: self.opacity.update(progress, dt),
            blur_px: self.blur.update(progress, dt),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/header.rs"]
mod tests;
