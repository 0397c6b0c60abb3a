use crate::{
    animation::smoothing::Smoothing,
    compositor::camera::Placement,
    foundation::{
        core::{Point, Size},
        math::finite_or,
    },
    gallery::item::ItemKey,
    segment::window::SegmentWindow,
    shader::LiquidUniforms,
};

/// Scroll speed (px/s) at which the velocity response saturates.
pub const VELOCITY_SATURATION: f64 = 5000.0;
pub const BORDER_PX: f64 = 2.0;

const OPACITY_RATE: f64 = 0.1;
const SCALE_RATE: f64 = 0.08;
const VELOCITY_RATE: f64 = 0.06;
const HIDDEN_SCALE: f64 = 0.9;

/// Shared per-frame input of every plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneFrame {
    /// Gallery section progress.
    pub progress: f64,
    /// Scroll velocity in px/s.
    pub velocity: f64,
    /// Seconds since the previous frame.
    pub dt: f64,
}

/// Everything a renderer needs to draw one plane this frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlaneDraw {
    pub key: ItemKey,
    pub index: usize,
    /// World-space center on the z = 0 layer.
    pub center: Point,
    /// World-space size after the scale uniform is applied.
    pub size: Size,
    pub rotation_x: f64,
    pub rotation_z: f64,
    pub uniforms: LiquidUniforms,
}

/// Smoothed per-item plane state. Values chase their targets; nothing snaps.
#[derive(Clone, Debug)]
pub struct ImagePlane {
    key: ItemKey,
    window: SegmentWindow,
    opacity: f64,
    scale: f64,
    velocity: f64,
    rotation_x: f64,
    rotation_z: f64,
    local: f64,
    time: f64,
}

impl ImagePlane {
    pub fn new(key: ItemKey, window: SegmentWindow) -> Self {
        Self {
            key,
            window,
            opacity: 0.0,
            scale: HIDDEN_SCALE,
            velocity: 0.0,
            rotation_x: 0.0,
            rotation_z: 0.0,
            local: 0.5,
            time: 0.0,
        }
    }

    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    pub fn window(&self) -> SegmentWindow {
        self.window
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn step(&mut self, frame: &PlaneFrame, smoothing: Smoothing) {
        let dt = finite_or(frame.dt, 0.0).max(0.0);
        let target_opacity = self.window.target_opacity(frame.progress);
        self.opacity = smoothing.approach(self.opacity, target_opacity, OPACITY_RATE, dt);

        self.local = self.window.local_progress(frame.progress);
        let target_scale = if target_opacity > 0.0 {
            0.98 + self.local * 0.04
        } else {
            HIDDEN_SCALE
        };
        self.scale = smoothing.approach(self.scale, target_scale, SCALE_RATE, dt);

        let v = finite_or(frame.velocity, 0.0);
        let norm = (v.abs() / VELOCITY_SATURATION).min(1.0);
        let direction = if v >= 0.0 { 1.0 } else { -1.0 };
        self.rotation_z =
            smoothing.approach(self.rotation_z, direction * norm * 0.012, VELOCITY_RATE, dt);
        self.rotation_x = smoothing.approach(self.rotation_x, -norm * 0.016, VELOCITY_RATE, dt);
        self.velocity = smoothing.approach(self.velocity, norm, VELOCITY_RATE, dt);
        self.time += dt;
    }

    pub fn draw(&self, placement: Placement) -> PlaneDraw {
        PlaneDraw {
            key: self.key.clone(),
            index: self.window.index,
            center: placement.center,
            size: Size::new(
                placement.size.width * self.scale,
                placement.size.height * self.scale,
            ),
            rotation_x: self.rotation_x,
            rotation_z: self.rotation_z,
            uniforms: LiquidUniforms {
                scroll_progress: self.local as f32,
                opacity: self.opacity as f32,
                scale: self.scale as f32,
                velocity: self.velocity as f32,
                time: self.time as f32,
                intro: 1.0,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/plane.rs"]
mod tests;
