//! GPU programs and the uniform blocks the engine fills for them.
//!
//! Both blocks are eight `f32`s (32 bytes) so they satisfy WGSL uniform alignment without a
//! derive; [`bytemuck::cast_slice`] turns the array into upload bytes.

pub const LIQUID_SCROLL_WGSL: &str = include_str!("liquid_scroll.wgsl");
pub const POINTER_DISTORTION_WGSL: &str = include_str!("pointer_distortion.wgsl");

/// Uniforms of the gallery plane program.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct LiquidUniforms {
    /// Local progress through the item's window.
    pub scroll_progress: f32,
    pub opacity: f32,
    pub scale: f32,
    /// Normalized scroll speed in `[0, 1]`.
    pub velocity: f32,
    /// Seconds since the plane started animating.
    pub time: f32,
    pub intro: f32,
}

impl LiquidUniforms {
    pub const SIZE: usize = 32;

    pub fn to_array(&self) -> [f32; 8] {
        [
            self.scroll_progress,
            self.opacity,
            self.scale,
            self.velocity,
            self.time,
            self.intro,
            0.0,
            0.0,
        ]
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_array()).to_vec()
    }
}

/// Uniforms of the pointer distortion program.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DistortionUniforms {
    /// Pointer position in plane uv space.
    pub mouse: [f32; 2],
    pub velocity: [f32; 2],
    pub strength: f32,
    pub opacity: f32,
    pub time: f32,
}

impl Default for DistortionUniforms {
    fn default() -> Self {
        Self {
            mouse: [0.5, 0.5],
            velocity: [0.0, 0.0],
            strength: 1.0,
            opacity: 0.0,
            time: 0.0,
        }
    }
}

impl DistortionUniforms {
    pub const SIZE: usize = 32;

    pub fn to_array(&self) -> [f32; 8] {
        [
            self.mouse[0],
            self.mouse[1],
            self.velocity[0],
            self.velocity[1],
            self.strength,
            self.opacity,
            self.time,
            0.0,
        ]
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_array()).to_vec()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/mod.rs"]
mod tests;
