//! Choice between the layered (GPU planes + captions) and stacked-card presentations.

use crate::foundation::error::{WeaveError, WeaveResult};

/// What the environment can do right now.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Capabilities {
    /// A GPU drawing surface can be created.
    pub gpu: bool,
    pub reduced_motion: bool,
    /// Viewport width in CSS pixels.
    pub viewport_width: f64,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            gpu: true,
            reduced_motion: false,
            viewport_width: 1440.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// GPU planes glued to caption placeholders.
    #[default]
    Layered,
    /// Captions only, cards sliding over each other; no GPU layer.
    Stacked,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Viewports this wide or narrower use the stacked presentation.
    pub mobile_breakpoint: f64,
    /// Skip capability detection.
    pub force: Option<PresentationMode>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 767.0,
            force: None,
        }
    }
}

impl PresentationConfig {
    /// Reject a forced layered presentation on an environment without a GPU surface.
    pub fn check(&self, caps: &Capabilities) -> WeaveResult<()> {
        if self.force == Some(PresentationMode::Layered) && !caps.gpu {
            return Err(WeaveError::capability(
                "layered presentation is forced but no GPU surface is available",
            ));
        }
        Ok(())
    }

    pub fn resolve(&self, caps: &Capabilities) -> PresentationMode {
        if let Some(mode) = self.force {
            return mode;
        }
        if !caps.gpu || caps.reduced_motion || caps.viewport_width <= self.mobile_breakpoint {
            PresentationMode::Stacked
        } else {
            PresentationMode::Layered
        }
    }
}

impl PresentationMode {
    /// The GPU layer runs only in layered mode and only when some item has an image.
    pub fn gpu_layer(self, gallery_has_images: bool) -> bool {
        self == Self::Layered && gallery_has_images
    }

    /// Fallback images replace the GPU planes in stacked mode.
    pub fn shows_fallback_images(self) -> bool {
        self == Self::Stacked
    }
}

#[cfg(test)]
#[path = "../tests/unit/presentation.rs"]
mod tests;
