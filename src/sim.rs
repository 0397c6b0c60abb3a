//! Headless page driver.
//!
//! Lays out a synthetic document (a 100vh hero followed by the pinned gallery section and one
//! trailing viewport), scrolls it with a constant-speed wheel script and records every
//! [`FrameReport`].

use std::cell::Cell;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::rc::Rc;

use crate::{
    anchor::registry::Measure,
    compositor::texture::{FsTextureLoader, Texture, TextureEvent, TextureLoader},
    config::EngineConfig,
    foundation::{
        core::{Rect, Vec2, Viewport},
        error::{WeaveError, WeaveResult},
    },
    frame::{host::ManualHost, pending::Teardown},
    gallery::item::ItemKey,
    page::{FrameReport, Page},
    presentation::{Capabilities, PresentationMode},
    scroll::state::ScrollInput,
    video::buffer::{BufferSlot, SimClock, SimulatedVideo, VideoBuffer, VideoBufferEvent},
};

/// Where simulated textures come from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TextureSource {
    /// Solid placeholder textures, delivered on the next drain.
    #[default]
    Synthetic,
    /// Decode real files under this directory.
    Directory(PathBuf),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    pub seconds: f64,
    pub fps: f64,
    /// Wheel input per second, in CSS pixels.
    pub scroll_speed: f64,
    pub reduced_motion: bool,
    pub gpu: bool,
    /// Length of the simulated background clip, in seconds.
    pub video_duration: f64,
    pub textures: TextureSource,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            seconds: 12.0,
            fps: 60.0,
            scroll_speed: 900.0,
            reduced_motion: false,
            gpu: true,
            video_duration: 8.0,
            textures: TextureSource::Synthetic,
        }
    }
}

/// Result of a run.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SimTrace {
    pub viewport: Viewport,
    pub document_height: f64,
    pub mode: PresentationMode,
    pub crossfade_starts: Vec<f64>,
    pub frames: Vec<FrameReport>,
}

/// Element that scrolls with the document.
#[derive(Debug)]
pub struct DocumentElement {
    rect: Rect,
    scroll: Rc<Cell<f64>>,
}

impl DocumentElement {
    pub fn new(rect: Rect, scroll: Rc<Cell<f64>>) -> Self {
        Self { rect, scroll }
    }
}

impl Measure for DocumentElement {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(self.rect - Vec2::new(0.0, self.scroll.get()))
    }
}

/// Element inside a `position: sticky; top: 0` viewport-high container pinned in `section`.
#[derive(Debug)]
pub struct StickyElement {
    section: Rect,
    local: Rect,
    viewport_height: f64,
    scroll: Rc<Cell<f64>>,
}

impl StickyElement {
    pub fn new(section: Rect, local: Rect, viewport_height: f64, scroll: Rc<Cell<f64>>) -> Self {
        Self {
            section,
            local,
            viewport_height,
            scroll,
        }
    }
}

impl Measure for StickyElement {
    fn bounding_rect(&self) -> Option<Rect> {
        let scroll = self.scroll.get();
        let natural = self.section.y0 - scroll;
        let floor = self.section.y1 - scroll - self.viewport_height;
        let top = natural.max(0.0).min(floor);
        Some(self.local + Vec2::new(0.0, top))
    }
}

/// Texture loader that fabricates solid textures.
#[derive(Debug, Default)]
pub struct SyntheticTextures {
    failing: BTreeSet<String>,
    queued: Vec<TextureEvent>,
}

impl SyntheticTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader that reports a decode failure for each of `paths`.
    pub fn failing(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            failing: paths.into_iter().map(Into::into).collect(),
            queued: Vec::new(),
        }
    }
}

impl TextureLoader for SyntheticTextures {
    fn request(&mut self, key: &ItemKey, path: &str) {
        let result = if self.failing.contains(path) {
            Err(WeaveError::asset(format!("synthetic failure for '{path}'")))
        } else {
            let shade = path.bytes().fold(0u8, |acc, b| acc.wrapping_mul(31).wrapping_add(b));
            Ok(Texture::solid(4, 4, [shade, 128, 255 - shade, 255]))
        };
        self.queued.push(TextureEvent {
            key: key.clone(),
            result,
        });
    }

    fn drain(&mut self) -> Vec<TextureEvent> {
        std::mem::take(&mut self.queued)
    }
}

const SLOT_PADDING_PX: f64 = 96.0;

pub struct Simulation {
    options: SimOptions,
    host: ManualHost,
    clock: SimClock,
    page: Page,
    loader: Box<dyn TextureLoader>,
    scroll: Rc<Cell<f64>>,
    // Keeps the anchors alive; the page only holds weak handles.
    anchors: Vec<(ItemKey, Rc<dyn Measure>)>,
    document_height: f64,
    video_loaded: bool,
    mode: PresentationMode,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("options", &self.options)
            .field("page", &self.page)
            .field("document_height", &self.document_height)
            .finish()
    }
}

impl Simulation {
    #[tracing::instrument(skip(config))]
    pub fn new(config: &EngineConfig, options: SimOptions) -> WeaveResult<Self> {
        if !(options.fps > 0.0 && options.fps.is_finite()) {
            return Err(WeaveError::validation("simulation fps must be positive"));
        }
        if !(options.seconds >= 0.0 && options.seconds.is_finite()) {
            return Err(WeaveError::validation(
                "simulation length must be finite and non-negative",
            ));
        }

        let clock = SimClock::new();
        let capabilities = Capabilities {
            gpu: options.gpu,
            reduced_motion: options.reduced_motion,
            viewport_width: config.viewport.width,
        };
        let videos = config.video.source.as_ref().map(|_| {
            let d = Some(options.video_duration);
            [
                Box::new(SimulatedVideo::new(clock.clone(), d)) as Box<dyn VideoBuffer>,
                Box::new(SimulatedVideo::new(clock.clone(), d)) as Box<dyn VideoBuffer>,
            ]
        });
        let mut page = Page::new(config, capabilities, videos)?;

        let scroll = Rc::new(Cell::new(0.0));
        let listener = scroll.clone();
        page.broadcaster_mut()
            .subscribe(move |s| listener.set(s.position));

        let vp = config.viewport;
        let hero_rect = Rect::new(0.0, 0.0, vp.width, vp.height);
        let gallery_height = vp.height * config.gallery.section_height_vh / 100.0;
        let gallery_rect = Rect::new(0.0, vp.height, vp.width, vp.height + gallery_height);
        let document_height = gallery_rect.y1 + vp.height;

        let hero: Rc<dyn Measure> = Rc::new(DocumentElement::new(hero_rect, scroll.clone()));
        let section: Rc<dyn Measure> = Rc::new(DocumentElement::new(gallery_rect, scroll.clone()));
        page.set_sections(hero, section);

        let slot_w = ((vp.width - 2.0 * SLOT_PADDING_PX) * 0.5).max(1.0);
        let slot_h = slot_w * 2.0 / 3.0;
        let slot_y = (vp.height - slot_h) * 0.5;
        let mut anchors = Vec::with_capacity(page.gallery().len());
        let items: Vec<_> = page
            .gallery()
            .items()
            .iter()
            .map(|i| (i.key.clone(), i.is_reversed()))
            .collect();
        for (key, reversed) in items {
            let x = if reversed {
                vp.width - SLOT_PADDING_PX - slot_w
            } else {
                SLOT_PADDING_PX
            };
            let local = Rect::new(x, slot_y, x + slot_w, slot_y + slot_h);
            let anchor: Rc<dyn Measure> = Rc::new(StickyElement::new(
                gallery_rect,
                local,
                vp.height,
                scroll.clone(),
            ));
            page.mount_item(key.clone(), &anchor);
            anchors.push((key, anchor));
        }

        let loader: Box<dyn TextureLoader> = match &options.textures {
            TextureSource::Synthetic => Box::new(SyntheticTextures::new()),
            TextureSource::Directory(root) => Box::new(FsTextureLoader::new(root.clone())),
        };

        let mut host = ManualHost::new();
        page.resize(vp, document_height);
        page.init(&mut host);
        page.ready(&mut host);
        let mode = page.mode();

        Ok(Self {
            mode,
            options,
            host,
            clock,
            page,
            loader,
            scroll,
            anchors,
            document_height,
            video_loaded: false,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn host(&self) -> &ManualHost {
        &self.host
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    /// Scroll position last published to the document.
    pub fn scroll_position(&self) -> f64 {
        self.scroll.get()
    }

    pub fn anchor(&self, key: &ItemKey) -> Option<&Rc<dyn Measure>> {
        self.anchors.iter().find(|(k, _)| k == key).map(|(_, a)| a)
    }

    /// Advance to `now_ms` and deliver every callback that became due.
    pub fn step(&mut self, now_ms: f64) -> Vec<FrameReport> {
        self.clock.set(now_ms);
        self.page.request_assets(self.loader.as_mut());
        for event in self.loader.drain() {
            self.page.on_texture(event);
        }
        if !self.video_loaded && self.page.video().is_some() {
            self.video_loaded = true;
            for slot in [BufferSlot::A, BufferSlot::B] {
                self.page
                    .on_video_event(VideoBufferEvent::Loaded(slot), &mut self.host);
            }
        }

        let mut reports = Vec::new();
        for event in self.host.advance_to(now_ms) {
            if let Some(report) = self.page.handle(event, &mut self.host) {
                reports.push(report);
            }
        }
        reports
    }

    /// Run the wheel script for the configured duration.
    #[tracing::instrument(skip(self), fields(seconds = self.options.seconds, fps = self.options.fps))]
    pub fn run(&mut self) -> SimTrace {
        let ticks = (self.options.seconds * self.options.fps).round() as u64;
        let delta = self.options.scroll_speed / self.options.fps;
        let mut frames = Vec::with_capacity(ticks as usize + 1);
        for tick in 0..=ticks {
            let now_ms = tick as f64 * 1000.0 / self.options.fps;
            if tick > 0 && delta != 0.0 {
                self.page.scroll_input(ScrollInput::Wheel { delta });
            }
            frames.extend(self.step(now_ms));
        }
        tracing::debug!(frames = frames.len(), "simulation finished");

        SimTrace {
            viewport: self.page.viewport(),
            document_height: self.document_height,
            mode: self.mode,
            crossfade_starts: self
                .page
                .video()
                .map(|v| v.crossfade_starts().to_vec())
                .unwrap_or_default(),
            frames,
        }
    }

    pub fn teardown(&mut self) {
        self.page.teardown(&mut self.host);
    }
}

#[cfg(test)]
#[path = "../tests/unit/sim.rs"]
mod tests;
