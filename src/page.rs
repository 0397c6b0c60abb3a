//! Page root: owns every component and routes host callbacks to them.
//!
//! A tick runs in a fixed order. The broadcaster's frame advances the scroll simulation and
//! publishes the snapshot (section elements read it through their listeners), then both section
//! progresses are re-measured, and finally the compositor and caption layer consume one
//! [`FrameState`].

use std::rc::Rc;

use crate::{
    anchor::registry::Measure,
    animation::smoothing::Smoothing,
    compositor::{
        Compositor,
        camera::{PerspectiveCamera, SurfaceDesc},
        distortion::{PointerDistortion, PointerInput},
        plane::{PlaneDraw, PlaneFrame},
        texture::{TextureEvent, TextureLoader},
    },
    config::EngineConfig,
    foundation::{core::Viewport, error::WeaveResult, math::finite_or},
    frame::{
        host::{FrameHost, HostEvent},
        pending::Teardown,
    },
    gallery::item::{Gallery, ItemKey, RESERVED_KEY_PREFIX, normalize_asset_path},
    hero::{
        intro::{HeroIntro, IntroPhase},
        scroll::{HeroScroll, HeroStyle},
    },
    narrative::{NarrativeFrame, NarrativeLayer, NarrativeReport},
    presentation::{Capabilities, PresentationConfig, PresentationMode},
    progress::mapper::{ProgressMapper, SectionProgress},
    scroll::{
        broadcaster::ScrollBroadcaster,
        state::{ScrollInput, ScrollState},
    },
    segment::window::SegmentLayout,
    shader::DistortionUniforms,
    video::{
        buffer::{VideoBuffer, VideoBufferEvent},
        gate::ReadyGate,
        loop_controller::{LoopPhase, VideoLayers, VideoLoopController},
    },
};

/// Texture key under which the distortion image is requested.
pub fn distortion_key() -> ItemKey {
    ItemKey::new(format!("{RESERVED_KEY_PREFIX}distortion"))
}

/// The two alternating buffers of the background loop.
pub type VideoBuffers = [Box<dyn VideoBuffer>; 2];

/// Everything measured at the start of one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    pub now_ms: f64,
    /// Seconds since the previous tick.
    pub dt: f64,
    pub scroll: ScrollState,
    pub viewport: Viewport,
    pub hero: SectionProgress,
    pub gallery: SectionProgress,
}

/// Everything a renderer needs for one tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameReport {
    pub now_ms: f64,
    pub scroll: ScrollState,
    pub hero_progress: SectionProgress,
    pub gallery_progress: SectionProgress,
    pub hero: HeroStyle,
    pub intro: IntroPhase,
    pub headline: usize,
    /// `None` when the page has no background video.
    pub video: Option<VideoLayers>,
    pub mode: PresentationMode,
    pub planes: Vec<PlaneDraw>,
    pub distortion: Option<DistortionUniforms>,
    pub narrative: NarrativeReport,
}

/// Section elements the progress mappers measure.
#[derive(Default)]
pub struct PageLayout {
    pub hero: Option<Rc<dyn Measure>>,
    pub gallery: Option<Rc<dyn Measure>>,
}

impl std::fmt::Debug for PageLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageLayout")
            .field("hero", &self.hero.is_some())
            .field("gallery", &self.gallery.is_some())
            .finish()
    }
}

struct Distortion {
    image: String,
    opacity: f64,
    state: PointerDistortion,
}

pub struct Page {
    gallery: Gallery,
    segments: SegmentLayout,
    camera: PerspectiveCamera,
    smoothing: Smoothing,
    presentation: PresentationConfig,
    capabilities: Capabilities,
    viewport: Viewport,
    mode: PresentationMode,
    gate: ReadyGate,
    scroll: ScrollBroadcaster,
    hero_progress: ProgressMapper,
    gallery_progress: ProgressMapper,
    layout: PageLayout,
    compositor: Option<Compositor>,
    narrative: NarrativeLayer,
    video: Option<VideoLoopController>,
    intro: HeroIntro,
    hero_scroll: HeroScroll,
    distortion: Option<Distortion>,
    pointer: Option<PointerInput>,
    last_frame_ms: Option<f64>,
    torn_down: bool,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("mode", &self.mode)
            .field("viewport", &self.viewport)
            .field("items", &self.gallery.len())
            .field("gpu_layer", &self.compositor.is_some())
            .field("video", &self.video)
            .field("intro", &self.intro.phase())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl Page {
    /// Build a page from a validated configuration.
    ///
    /// `video` is only used when the configuration names a background source.
    pub fn new(
        config: &EngineConfig,
        capabilities: Capabilities,
        video: Option<VideoBuffers>,
    ) -> WeaveResult<Self> {
        config.validate()?;
        let gallery = config.gallery()?;
        let segments = config.segment_layout()?;
        let viewport = config.viewport;
        config.presentation.check(&capabilities)?;
        let mode = config.presentation.resolve(&capabilities);
        let camera = PerspectiveCamera::new(config.camera, viewport);

        let video = match (config.video.source.as_ref(), video) {
            (Some(_), Some([a, b])) => Some(VideoLoopController::new(config.video.clone(), a, b)),
            (Some(source), None) => {
                tracing::warn!(%source, "no video buffers supplied, background video disabled");
                None
            }
            (None, _) => None,
        };

        let distortion = match &config.distortion.image {
            Some(image) => Some(Distortion {
                image: normalize_asset_path(image)?,
                opacity: config.distortion.opacity,
                state: PointerDistortion::new(),
            }),
            None => None,
        };

        let compositor = mode
            .gpu_layer(gallery.has_images())
            .then(|| Compositor::new(&gallery, segments, camera, config.smoothing));

        Ok(Self {
            narrative: NarrativeLayer::new(&gallery, segments, mode),
            intro: HeroIntro::new(config.hero.timing.clone(), config.hero.headlines.len()),
            scroll: ScrollBroadcaster::new(config.scroll),
            hero_progress: ProgressMapper::new(config.hero.offset),
            gallery_progress: ProgressMapper::new(config.gallery.section_offset),
            layout: PageLayout::default(),
            hero_scroll: HeroScroll::new(),
            gate: ReadyGate::new(),
            presentation: config.presentation,
            smoothing: config.smoothing,
            last_frame_ms: None,
            pointer: None,
            torn_down: false,
            gallery,
            segments,
            camera,
            capabilities,
            viewport,
            mode,
            compositor,
            video,
            distortion,
        })
    }

    /// Start the scroll loop. Intro and video wait for [`Page::ready`].
    #[tracing::instrument(skip(self, host), fields(mode = ?self.mode, items = self.gallery.len()))]
    pub fn init(&mut self, host: &mut dyn FrameHost) {
        self.scroll.init(host);
    }

    /// Signal that initial content is on screen. Only the first call has an effect.
    pub fn ready(&mut self, host: &mut dyn FrameHost) {
        if self.torn_down || !self.gate.open() {
            return;
        }
        tracing::debug!("page ready");
        self.intro.begin(host, self.capabilities.reduced_motion);
        if let Some(video) = &mut self.video {
            video.start(host);
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn gate(&self) -> ReadyGate {
        self.gate
    }

    pub fn broadcaster(&self) -> &ScrollBroadcaster {
        &self.scroll
    }

    /// Mutable access for subscribing listeners.
    pub fn broadcaster_mut(&mut self) -> &mut ScrollBroadcaster {
        &mut self.scroll
    }

    pub fn compositor(&self) -> Option<&Compositor> {
        self.compositor.as_ref()
    }

    pub fn narrative(&self) -> &NarrativeLayer {
        &self.narrative
    }

    pub fn video(&self) -> Option<&VideoLoopController> {
        self.video.as_ref()
    }

    pub fn intro(&self) -> &HeroIntro {
        &self.intro
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Drawing surface of the GPU layer, when it runs.
    pub fn surface(&self) -> Option<SurfaceDesc> {
        self.compositor.as_ref().map(Compositor::surface)
    }

    pub fn set_sections(&mut self, hero: Rc<dyn Measure>, gallery: Rc<dyn Measure>) {
        self.layout = PageLayout {
            hero: Some(hero),
            gallery: Some(gallery),
        };
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn mount_item(&mut self, key: ItemKey, anchor: &Rc<dyn Measure>) {
        self.narrative.mount(key, anchor);
    }

    pub fn unmount_item(&mut self, key: &ItemKey, anchor: &Rc<dyn Measure>) -> bool {
        self.narrative.unmount(key, anchor)
    }

    pub fn scroll_input(&mut self, input: ScrollInput) {
        self.scroll.input(input);
    }

    /// Pointer over the page, or `None` once it leaves.
    pub fn set_pointer(&mut self, pointer: Option<PointerInput>) {
        self.pointer = pointer;
    }

    /// New viewport and document height. May switch the presentation mode.
    pub fn resize(&mut self, viewport: Viewport, document_height: f64) {
        self.viewport = viewport;
        self.capabilities.viewport_width = viewport.width;
        self.scroll
            .set_limit(finite_or(document_height, 0.0) - viewport.height);
        self.camera.resize(viewport);
        if let Some(c) = &mut self.compositor {
            c.resize(viewport);
        }
        self.set_mode(self.presentation.resolve(&self.capabilities));
    }

    /// Switch presentation. Entering layered mode builds a fresh GPU layer whose textures must be
    /// requested again.
    pub fn set_mode(&mut self, mode: PresentationMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.narrative.set_mode(mode);
        let wants_gpu = mode.gpu_layer(self.gallery.has_images());
        match (&mut self.compositor, wants_gpu) {
            (Some(c), false) => {
                c.release();
                self.compositor = None;
                tracing::debug!("gpu layer released");
            }
            (None, true) => {
                self.narrative.cover_all();
                self.compositor = Some(Compositor::new(
                    &self.gallery,
                    self.segments,
                    self.camera,
                    self.smoothing,
                ));
                tracing::debug!("gpu layer created");
            }
            _ => {}
        }
    }

    /// Ask `loader` for every texture the page still needs.
    pub fn request_assets(&mut self, loader: &mut dyn TextureLoader) {
        if self.torn_down {
            return;
        }
        if let Some(c) = &mut self.compositor {
            c.request_textures(loader);
        }
        if let Some(d) = &mut self.distortion
            && d.state.needs_texture()
        {
            loader.request(&distortion_key(), &d.image);
            d.state.mark_loading();
        }
    }

    pub fn on_texture(&mut self, event: TextureEvent) {
        if self.torn_down {
            tracing::debug!(key = %event.key, "dropping texture for torn down page");
            return;
        }
        if event.key == distortion_key() {
            if let Some(d) = &mut self.distortion {
                d.state.on_texture(event.result);
            }
            return;
        }
        match &mut self.compositor {
            Some(c) => {
                if event.result.is_err() {
                    self.narrative.uncover(&event.key);
                }
                c.on_texture(event);
            }
            None => tracing::debug!(key = %event.key, "dropping texture, gpu layer is off"),
        }
    }

    pub fn on_video_event(&mut self, event: VideoBufferEvent, host: &mut dyn FrameHost) {
        if let Some(video) = &mut self.video {
            video.on_buffer_event(event, host);
        }
    }

    /// Route one host callback. Returns the report when the callback was the page tick.
    pub fn handle(&mut self, event: HostEvent, host: &mut dyn FrameHost) -> Option<FrameReport> {
        if self.torn_down {
            return None;
        }
        match event {
            HostEvent::Frame { handle, now_ms } => {
                if self.scroll.on_frame(handle, now_ms, host) {
                    return Some(self.frame(now_ms));
                }
                if let Some(video) = &mut self.video
                    && video.on_frame(handle, now_ms, host)
                {
                    return None;
                }
                tracing::trace!(?handle, "unrouted frame callback");
            }
            HostEvent::Timer { handle, now_ms } => {
                if self.intro.on_timer(handle, host) {
                    return None;
                }
                if let Some(video) = &mut self.video
                    && video.on_timer(handle, now_ms)
                {
                    return None;
                }
                tracing::trace!(?handle, "unrouted timer callback");
            }
        }
        None
    }

    /// Measure scroll and both sections for this tick.
    pub fn frame_state(&mut self, now_ms: f64) -> FrameState {
        let dt = match self.last_frame_ms {
            Some(last) if now_ms > last => (now_ms - last) / 1000.0,
            _ => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        let scroll = self.scroll.state();
        let viewport = self.viewport;
        let measure = |mapper: &mut ProgressMapper, el: &Option<Rc<dyn Measure>>| match el {
            Some(el) => mapper.update(el.as_ref(), &scroll, viewport, dt),
            None => mapper.progress(),
        };
        let hero = measure(&mut self.hero_progress, &self.layout.hero);
        let gallery = measure(&mut self.gallery_progress, &self.layout.gallery);

        FrameState {
            now_ms,
            dt,
            scroll,
            viewport,
            hero,
            gallery,
        }
    }

    /// Run one tick from the latest published scroll snapshot.
    ///
    /// Called by [`Page::handle`] after the broadcaster's frame; call it directly when the
    /// broadcaster is degraded and frames are driven some other way.
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        let state = self.frame_state(now_ms);
        self.render(&state)
    }

    fn render(&mut self, state: &FrameState) -> FrameReport {
        let planes = match &mut self.compositor {
            Some(c) => c.update(
                &PlaneFrame {
                    progress: state.gallery.get(),
                    velocity: state.scroll.velocity,
                    dt: state.dt,
                },
                self.narrative.anchors(),
            ),
            None => Vec::new(),
        };

        let narrative = self.narrative.update(&NarrativeFrame {
            progress: state.gallery.get(),
            scroll: state.scroll.position,
            viewport: state.viewport,
            dt: state.dt,
        });

        let gpu = self.compositor.is_some();
        let pointer = self.pointer;
        let smoothing = self.smoothing;
        let distortion = self.distortion.as_mut().and_then(|d| {
            d.state.texture()?;
            Some(d.state.step(
                gpu && pointer.is_some(),
                d.opacity,
                pointer.unwrap_or_default(),
                smoothing,
                state.dt,
            ))
        });

        FrameReport {
            now_ms: state.now_ms,
            scroll: state.scroll,
            hero_progress: state.hero,
            gallery_progress: state.gallery,
            hero: self.hero_scroll.style(state.hero.get()),
            intro: self.intro.phase(),
            headline: self.intro.headline(),
            video: self.video.as_ref().map(|v| v.layers(state.now_ms)),
            mode: self.mode,
            planes,
            distortion,
            narrative,
        }
    }

    /// `true` while the background loop is mid-crossfade.
    pub fn is_crossfading(&self) -> bool {
        self.video
            .as_ref()
            .is_some_and(|v| matches!(v.phase(), LoopPhase::Crossfading { .. }))
    }
}

impl Teardown for Page {
    #[tracing::instrument(skip(self, host))]
    fn teardown(&mut self, host: &mut dyn FrameHost) {
        if self.torn_down {
            return;
        }
        self.scroll.teardown(host);
        self.intro.teardown(host);
        if let Some(video) = &mut self.video {
            video.teardown(host);
        }
        if let Some(c) = &mut self.compositor {
            c.release();
        }
        self.torn_down = true;
        tracing::debug!("page torn down");
    }
}

#[cfg(test)]
#[path = "../tests/unit/page.rs"]
mod tests;
