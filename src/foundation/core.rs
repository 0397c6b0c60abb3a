use crate::foundation::error::{WeaveError, WeaveResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Layout viewport in CSS pixels plus the device pixel ratio of the display.
///
/// Every screen-space rectangle handled by the engine (anchor rects, section rects) is expressed
/// in the same CSS-pixel space; the ratio only matters when sizing the drawing buffer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    /// Device pixels per CSS pixel.
    #[serde(default = "default_dpr")]
    pub device_pixel_ratio: f64,
}

fn default_dpr() -> f64 {
    1.0
}

impl Viewport {
    /// Create a validated viewport.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> WeaveResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(WeaveError::geometry(format!(
                "viewport must have a positive finite size, got {width}x{height}"
            )));
        }
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(WeaveError::geometry(
                "device pixel ratio must be positive and finite",
            ));
        }
        Ok(Self {
            width,
            height,
            device_pixel_ratio,
        })
    }

    /// Viewport size in CSS pixels.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center of the viewport in CSS pixels.
    pub fn center(self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Width over height; degenerate viewports report `1.0`.
    pub fn aspect(self) -> f64 {
        if self.is_degenerate() {
            1.0
        } else {
            self.width / self.height
        }
    }

    /// `true` when the viewport cannot be mapped (zero, negative or non-finite extent).
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
            device_pixel_ratio: 1.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
