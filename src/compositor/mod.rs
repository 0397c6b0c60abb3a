//! GPU plane layer: one image plane per gallery item, glued to its markup placeholder.
//!
//! Each frame the compositor measures every anchor, converts the screen rect to a world
//! placement through the camera, and steps the plane's smoothed state. Items without an image,
//! with a failed texture, or whose anchor is not mounted produce no draw.

pub mod camera;
pub mod distortion;
pub mod plane;
pub mod texture;

use crate::{
    anchor::registry::AnchorRegistry,
    animation::smoothing::Smoothing,
    compositor::{
        camera::{PerspectiveCamera, SurfaceDesc},
        plane::{BORDER_PX, ImagePlane, PlaneDraw, PlaneFrame},
        texture::{TextureEvent, TextureLoader, TextureState},
    },
    foundation::core::Viewport,
    gallery::item::{Gallery, ItemKey},
    segment::window::SegmentLayout,
};

#[derive(Debug)]
struct Slot {
    plane: ImagePlane,
    image: Option<String>,
    texture: TextureState,
}

#[derive(Debug)]
pub struct Compositor {
    camera: PerspectiveCamera,
    smoothing: Smoothing,
    slots: Vec<Slot>,
}

impl Compositor {
    pub fn new(
        gallery: &Gallery,
        layout: SegmentLayout,
        camera: PerspectiveCamera,
        smoothing: Smoothing,
    ) -> Self {
        let slots = gallery
            .items()
            .iter()
            .zip(layout.windows())
            .map(|(item, window)| Slot {
                plane: ImagePlane::new(item.key.clone(), window),
                image: item.image.clone(),
                texture: TextureState::Unrequested,
            })
            .collect();
        Self {
            camera,
            smoothing,
            slots,
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn surface(&self) -> SurfaceDesc {
        self.camera.surface()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.resize(viewport);
    }

    /// Ask `loader` for every texture not requested yet.
    pub fn request_textures(&mut self, loader: &mut dyn TextureLoader) {
        for slot in &mut self.slots {
            if slot.texture != TextureState::Unrequested {
                continue;
            }
            if let Some(path) = &slot.image {
                loader.request(slot.plane.key(), path);
                slot.texture = TextureState::Loading;
            }
        }
    }

    pub fn on_texture(&mut self, event: TextureEvent) {
        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|s| s.plane.key() == &event.key)
        else {
            tracing::debug!(key = %event.key, "dropping texture for released plane");
            return;
        };
        slot.texture = match event.result {
            Ok(texture) => TextureState::Ready(texture),
            Err(err) => {
                tracing::warn!(key = %event.key, %err, "texture load failed, plane disabled");
                TextureState::Failed
            }
        };
    }

    pub fn texture_state(&self, key: &ItemKey) -> Option<&TextureState> {
        self.slots
            .iter()
            .find(|s| s.plane.key() == key)
            .map(|s| &s.texture)
    }

    pub fn plane(&self, key: &ItemKey) -> Option<&ImagePlane> {
        self.slots
            .iter()
            .find(|s| s.plane.key() == key)
            .map(|s| &s.plane)
    }

    pub fn update(&mut self, frame: &PlaneFrame, anchors: &AnchorRegistry) -> Vec<PlaneDraw> {
        let mut draws = Vec::with_capacity(self.slots.len());
        for slot in &mut self.slots {
            if slot.texture.texture().is_none() {
                continue;
            }
            let Some(rect) = anchors.measure(slot.plane.key()) else {
                tracing::trace!(key = %slot.plane.key(), "anchor not mounted");
                continue;
            };
            slot.plane.step(frame, self.smoothing);
            draws.push(slot.plane.draw(self.camera.place_rect(rect, BORDER_PX)));
        }
        draws
    }

    /// Drop every plane and texture. Completions arriving afterwards are ignored.
    pub fn release(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/mod.rs"]
mod tests;
