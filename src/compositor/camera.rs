use crate::foundation::{
    core::{Point, Rect, Size, Viewport},
    error::{WeaveError, WeaveResult},
};

/// Perspective camera looking down −z at the plane z = 0.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// Distance from the camera to the plane layer, in world units.
    pub distance: f64,
    /// Allowed device pixel ratio range for the drawing buffer.
    pub dpr_range: [f64; 2],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 50.0,
            distance: 5.0,
            dpr_range: [1.0, 1.5],
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> WeaveResult<()> {
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(WeaveError::validation(format!(
                "camera fov must lie in (0, 180) degrees, got {}",
                self.fov_deg
            )));
        }
        if !(self.distance > 0.0 && self.distance.is_finite()) {
            return Err(WeaveError::validation("camera distance must be positive"));
        }
        let [lo, hi] = self.dpr_range;
        if !(lo > 0.0 && lo <= hi && hi.is_finite()) {
            return Err(WeaveError::validation(format!(
                "invalid dpr range [{lo}, {hi}]"
            )));
        }
        Ok(())
    }
}

/// Description of the full-viewport drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SurfaceDesc {
    /// CSS size of the surface (always the viewport).
    pub css_size: Size,
    pub pixel_ratio: f64,
    pub buffer_width: u32,
    pub buffer_height: u32,
    pub transparent: bool,
    pub pointer_events: bool,
}

/// A plane's world-space placement.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Placement {
    pub center: Point,
    pub size: Size,
}

/// Maps CSS pixels to the world plane seen by a perspective camera.
///
/// Screen y grows downward; world y grows upward with the origin at the viewport center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    config: CameraConfig,
    viewport: Viewport,
}

impl PerspectiveCamera {
    pub fn new(config: CameraConfig, viewport: Viewport) -> Self {
        Self { config, viewport }
    }

    pub fn config(&self) -> CameraConfig {
        self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn css_size(&self) -> Size {
        Size::new(self.viewport.width.max(1.0), self.viewport.height.max(1.0))
    }

    /// Height of the world plane that fills the viewport.
    pub fn visible_height(&self) -> f64 {
        2.0 * self.config.distance * (self.config.fov_deg.to_radians() * 0.5).tan()
    }

    pub fn visible_width(&self) -> f64 {
        let css = self.css_size();
        self.visible_height() * css.width / css.height
    }

    /// CSS pixels per world unit. Equal on both axes for a square-pixel perspective camera.
    pub fn px_per_unit(&self) -> f64 {
        let h = self.visible_height();
        if h > 0.0 && h.is_finite() {
            self.css_size().height / h
        } else {
            1.0
        }
    }

    pub fn screen_to_world(&self, p: Point) -> Point {
        let c = self.css_size();
        let k = self.px_per_unit();
        Point::new((p.x - c.width * 0.5) / k, -(p.y - c.height * 0.5) / k)
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        let c = self.css_size();
        let k = self.px_per_unit();
        Point::new(p.x * k + c.width * 0.5, -p.y * k + c.height * 0.5)
    }

    /// World placement whose edges coincide with `rect` minus a `border_px` frame.
    pub fn place_rect(&self, rect: Rect, border_px: f64) -> Placement {
        let k = self.px_per_unit();
        let w = (rect.width() - border_px).max(0.0);
        let h = (rect.height() - border_px).max(0.0);
        Placement {
            center: self.screen_to_world(rect.center()),
            size: Size::new(w / k, h / k),
        }
    }

    /// Screen rect covered by a world placement.
    pub fn placement_rect(&self, placement: Placement) -> Rect {
        let k = self.px_per_unit();
        Rect::from_center_size(
            self.world_to_screen(placement.center),
            Size::new(placement.size.width * k, placement.size.height * k),
        )
    }

    /// Transparent, non-interactive surface covering the viewport.
    pub fn surface(&self) -> SurfaceDesc {
        let [lo, hi] = self.config.dpr_range;
        let dpr = self.viewport.device_pixel_ratio;
        let pixel_ratio = if dpr.is_finite() { dpr.clamp(lo, hi) } else { lo };
        let css = self.css_size();
        SurfaceDesc {
            css_size: css,
            pixel_ratio,
            buffer_width: (css.width * pixel_ratio).round() as u32,
            buffer_height: (css.height * pixel_ratio).round() as u32,
            transparent: true,
            pointer_events: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/camera.rs"]
mod tests;
