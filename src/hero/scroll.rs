use crate::{animation::ramp::Ramp, foundation::math::clamp01};

/// Hero content and backdrop styling while the hero scrolls away.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct HeroStyle {
    /// Content offset as a percentage of its own height.
    pub content_y_pct: f64,
    pub content_opacity: f64,
    pub content_scale: f64,
    pub video_scale: f64,
    pub overlay_opacity: f64,
}

#[derive(Clone, Debug)]
pub struct HeroScroll {
    content_y: Ramp,
    content_opacity: Ramp,
    content_scale: Ramp,
    video_scale: Ramp,
    overlay: Ramp,
}

impl Default for HeroScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl HeroScroll {
    pub fn new() -> Self {
        let span = |from: f64, to: f64, a: f64, b: f64| Ramp::from_ordered([(from, a), (to, b)]);
        Self {
            content_y: span(0.0, 1.0, 0.0, 30.0),
            content_opacity: span(0.0, 0.5, 1.0, 0.0),
            content_scale: span(0.0, 1.0, 1.0, 0.94),
            video_scale: span(0.0, 1.0, 1.0, 1.1),
            overlay: span(0.0, 0.8, 0.38, 0.62),
        }
    }

    /// Style for hero progress `p` (`"start start"` → `"end start"`).
    pub fn style(&self, progress: f64) -> HeroStyle {
        let p = clamp01(progress);
        HeroStyle {
            content_y_pct: self.content_y.sample(p),
            content_opacity: self.content_opacity.sample(p),
            content_scale: self.content_scale.sample(p),
            video_scale: self.video_scale.sample(p),
            overlay_opacity: self.overlay.sample(p),
        }
    }
}
