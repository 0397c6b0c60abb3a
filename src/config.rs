//! JSON page configuration.
//!
//! Every section has defaults, so `{}` is a valid (empty-gallery) page.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::{
    animation::smoothing::Smoothing,
    compositor::{camera::CameraConfig, distortion::DistortionConfig},
    foundation::{
        core::Viewport,
        error::{WeaveError, WeaveResult},
    },
    gallery::item::{Gallery, GalleryItemDef, normalize_asset_path},
    hero::HeroConfig,
    presentation::PresentationConfig,
    progress::offset::ScrollOffset,
    scroll::broadcaster::ScrollOptions,
    segment::window::SegmentLayout,
    video::loop_controller::VideoLoopConfig,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub items: Vec<GalleryItemDef>,
    pub overlap: f64,
    pub section_offset: ScrollOffset,
    /// Height of the pinned gallery section, in viewport heights.
    pub section_height_vh: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            overlap: SegmentLayout::DEFAULT_OVERLAP,
            section_offset: ScrollOffset::PINNED,
            section_height_vh: 400.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub viewport: Viewport,
    /// Directory textures and video are resolved against.
    pub asset_root: Option<PathBuf>,
    pub scroll: ScrollOptions,
    pub gallery: GalleryConfig,
    pub camera: CameraConfig,
    pub smoothing: Smoothing,
    pub video: VideoLoopConfig,
    pub distortion: DistortionConfig,
    pub hero: HeroConfig,
    pub presentation: PresentationConfig,
}

impl EngineConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> WeaveResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| WeaveError::serde(format!("parse page config JSON: {e}")))
    }

    #[tracing::instrument]
    pub fn from_path(path: impl AsRef<Path> + std::fmt::Debug) -> WeaveResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WeaveError::validation(format!("open page config '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        if cfg.asset_root.is_none() {
            cfg.asset_root = path.parent().map(Path::to_path_buf);
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> WeaveResult<()> {
        Viewport::new(
            self.viewport.width,
            self.viewport.height,
            self.viewport.device_pixel_ratio,
        )?;
        self.gallery()?;
        self.segment_layout()?;
        if !(self.gallery.section_height_vh > 0.0 && self.gallery.section_height_vh.is_finite()) {
            return Err(WeaveError::validation(
                "gallery section height must be positive",
            ));
        }
        self.camera.validate()?;

        if let Some(lerp) = self.scroll.lerp
            && !(lerp > 0.0 && lerp <= 1.0)
        {
            return Err(WeaveError::validation(format!(
                "scroll lerp must lie in (0, 1], got {lerp}"
            )));
        }
        if !(self.scroll.duration > 0.0 && self.scroll.duration.is_finite()) {
            return Err(WeaveError::validation("scroll duration must be positive"));
        }
        if let Smoothing::TimeConstant { reference_hz } = self.smoothing
            && !(reference_hz > 0.0 && reference_hz.is_finite())
        {
            return Err(WeaveError::validation(
                "smoothing reference rate must be positive",
            ));
        }

        if !(self.video.crossfade_ms > 0.0 && self.video.crossfade_ms.is_finite()) {
            return Err(WeaveError::validation("video crossfade must be positive"));
        }
        if !(self.video.margin_s >= 0.0 && self.video.margin_s.is_finite()) {
            return Err(WeaveError::validation("video margin must be non-negative"));
        }
        if let Some(source) = &self.video.source {
            normalize_asset_path(source)?;
        }

        if let Some(image) = &self.distortion.image {
            normalize_asset_path(image)?;
        }
        if !(0.0..=1.0).contains(&self.distortion.opacity) {
            return Err(WeaveError::validation(
                "distortion opacity must lie in [0, 1]",
            ));
        }

        let t = &self.hero.timing;
        let timings = [
            t.hold_ms,
            t.reduced_hold_ms,
            t.intro_ms,
            t.reduced_intro_ms,
            t.headline_interval_ms,
        ];
        if timings.iter().any(|v| !(*v >= 0.0 && v.is_finite())) {
            return Err(WeaveError::validation(
                "hero timings must be finite and non-negative",
            ));
        }
        Ok(())
    }

    pub fn gallery(&self) -> WeaveResult<Gallery> {
        Gallery::from_defs(&self.gallery.items)
    }

    pub fn segment_layout(&self) -> WeaveResult<SegmentLayout> {
        SegmentLayout::new(self.gallery.items.len(), self.gallery.overlap)
    }

    pub fn asset_root(&self) -> PathBuf {
        self.asset_root.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
