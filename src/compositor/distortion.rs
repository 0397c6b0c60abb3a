use crate::{
    animation::smoothing::Smoothing,
    compositor::texture::{Texture, TextureState},
    foundation::{
        core::{Point, Vec2},
        error::WeaveResult,
        math::finite_or,
    },
    shader::DistortionUniforms,
};

const OPACITY_RATE: f64 = 0.08;
const VELOCITY_RATE: f64 = 0.1;
const STRENGTH_RATE: f64 = 0.05;
const MAX_STRENGTH: f64 = 3.0;
const VISIBLE_OPACITY: f64 = 0.01;

/// Optional pointer-reactive image layered over the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DistortionConfig {
    /// Relative image path; `None` disables the layer.
    pub image: Option<String>,
    /// Opacity the layer fades toward while the pointer is over the page.
    pub opacity: f64,
}

impl Default for DistortionConfig {
    fn default() -> Self {
        Self {
            image: None,
            opacity: 1.0,
        }
    }
}

/// Pointer sample for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerInput {
    /// Position in plane uv space (`0..1` on both axes).
    pub uv: Point,
    /// Pointer velocity in uv units per second.
    pub velocity: Vec2,
}

/// Pointer-reactive glass distortion plane.
///
/// While faded out the simulation is frozen, so it resumes where it left off.
#[derive(Clone, Debug)]
pub struct PointerDistortion {
    texture: TextureState,
    opacity: f64,
    time: f64,
    mouse: Point,
    velocity: Vec2,
    strength: f64,
}

impl Default for PointerDistortion {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerDistortion {
    pub fn new() -> Self {
        Self {
            texture: TextureState::Unrequested,
            opacity: 0.0,
            time: 0.0,
            mouse: Point::new(0.5, 0.5),
            velocity: Vec2::ZERO,
            strength: 1.0,
        }
    }

    /// `true` until the texture has been requested.
    pub fn needs_texture(&self) -> bool {
        self.texture == TextureState::Unrequested
    }

    pub fn mark_loading(&mut self) {
        self.texture = TextureState::Loading;
    }

    /// Install the loaded image, or a generated gradient when loading failed.
    pub fn on_texture(&mut self, result: WeaveResult<Texture>) {
        self.texture = match result {
            Ok(t) => TextureState::Ready(t),
            Err(err) => {
                tracing::warn!(%err, "distortion texture failed, using gradient");
                TextureState::Ready(Texture::radial_fallback(512, 320))
            }
        };
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.texture()
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn step(
        &mut self,
        active: bool,
        target_opacity: f64,
        pointer: PointerInput,
        smoothing: Smoothing,
        dt: f64,
    ) -> DistortionUniforms {
        let dt = finite_or(dt, 0.0).max(0.0);
        let target = if active { target_opacity } else { 0.0 };
        self.opacity = smoothing.approach(self.opacity, target, OPACITY_RATE, dt);

        if self.opacity > VISIBLE_OPACITY {
            self.time += dt;
            self.mouse = pointer.uv;
            let k = smoothing.factor(VELOCITY_RATE, dt);
            self.velocity = self.velocity.lerp(pointer.velocity, k);
            let target_strength = (self.velocity.hypot() * 0.05).min(MAX_STRENGTH);
            self.strength = smoothing.approach(self.strength, target_strength, STRENGTH_RATE, dt);
        }
        self.uniforms()
    }

    pub fn uniforms(&self) -> DistortionUniforms {
        DistortionUniforms {
            mouse: [self.mouse.x as f32, self.mouse.y as f32],
            velocity: [self.velocity.x as f32, self.velocity.y as f32],
            strength: self.strength as f32,
            opacity: self.opacity as f32,
            time: self.time as f32,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/distortion.rs"]
mod tests;
