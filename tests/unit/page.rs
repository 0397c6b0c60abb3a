use super::*;
use crate::{
    anchor::registry::SlotElement,
    foundation::{
        core::{Point, Rect, Vec2},
        error::WeaveError,
    },
    frame::host::ManualHost,
    gallery::item::GalleryItemDef,
    sim::{SimOptions, Simulation, SyntheticTextures},
};

fn config(images: bool) -> EngineConfig {
    let mut cfg = EngineConfig::default();
    cfg.gallery.items = (0..4)
        .map(|i| GalleryItemDef {
            key: None,
            title: format!("Item {i}"),
            category: String::new(),
            tag: String::new(),
            image: images.then(|| format!("img/{i}.jpg")),
            description: String::new(),
        })
        .collect();
    cfg.hero.headlines = vec!["One".to_owned(), "Two".to_owned()];
    cfg
}

fn sim(cfg: &EngineConfig, seconds: f64) -> Simulation {
    Simulation::new(
        cfg,
        SimOptions {
            seconds,
            ..SimOptions::default()
        },
    )
    .unwrap()
}

#[test]
fn progress_is_measured_from_the_same_ticks_scroll() {
    let mut s = sim(&config(true), 4.0);
    let trace = s.run();
    assert!(trace.frames.len() > 200);
    let vh = trace.viewport.height;
    let mut moved = false;
    for f in &trace.frames {
        let hero = (f.scroll.position / vh).clamp(0.0, 1.0);
        let gallery = ((f.scroll.position - vh) / (4.0 * vh - vh)).clamp(0.0, 1.0);
        assert!((f.hero_progress.get() - hero).abs() < 1e-9, "{f:?}");
        assert!((f.gallery_progress.get() - gallery).abs() < 1e-9);
        moved |= f.gallery_progress.get() > 0.0;
    }
    assert!(moved);
}

#[test]
fn layered_page_draws_one_plane_per_textured_item() {
    let mut s = sim(&config(true), 0.5);
    let trace = s.run();
    let last = trace.frames.last().unwrap();
    assert_eq!(last.mode, PresentationMode::Layered);
    assert_eq!(last.planes.len(), 4);
    assert!(last.narrative.journey.is_some());
    assert!(s.page().surface().unwrap().transparent);
}

#[test]
fn without_images_there_is_no_gpu_layer() {
    let s = sim(&config(false), 0.0);
    assert_eq!(s.page().mode(), PresentationMode::Layered);
    assert!(s.page().compositor().is_none());
    assert!(s.page().surface().is_none());
}

#[test]
fn missing_gpu_falls_back_to_stacked_cards() {
    let mut s = Simulation::new(
        &config(true),
        SimOptions {
            seconds: 1.0,
            gpu: false,
            ..SimOptions::default()
        },
    )
    .unwrap();
    let trace = s.run();
    let last = trace.frames.last().unwrap();
    assert_eq!(last.mode, PresentationMode::Stacked);
    assert!(last.planes.is_empty());
    assert!(last.narrative.journey.is_none());
    assert!(last.narrative.items.iter().all(|i| i.stack_offset.is_some()));
    assert!(last.narrative.items.iter().all(|i| i.fallback_image.is_some()));
}

#[test]
fn narrowing_the_viewport_switches_presentation() {
    let mut s = sim(&config(true), 0.0);
    s.step(0.0);
    let vp = Viewport::new(390.0, 844.0, 3.0).unwrap();
    s.page_mut().resize(vp, 6.0 * 844.0);
    assert_eq!(s.page().mode(), PresentationMode::Stacked);
    assert!(s.page().compositor().is_none());

    let wide = Viewport::default();
    s.page_mut().resize(wide, 6.0 * 900.0);
    assert_eq!(s.page().mode(), PresentationMode::Layered);
    // fresh layer, textures not requested yet
    let key = ItemKey::new("Item 0");
    assert_eq!(
        s.page().compositor().unwrap().texture_state(&key),
        Some(&crate::compositor::texture::TextureState::Unrequested)
    );
    s.step(16.0);
    assert!(
        s.page()
            .compositor()
            .unwrap()
            .texture_state(&key)
            .unwrap()
            .texture()
            .is_some()
    );
}

#[test]
fn intro_waits_for_the_ready_gate() {
    let mut host = ManualHost::new();
    let mut page = Page::new(&config(true), Capabilities::default(), None).unwrap();
    page.init(&mut host);
    for e in host.advance_to(1000.0) {
        page.handle(e, &mut host);
    }
    assert_eq!(page.intro().phase(), IntroPhase::Waiting);

    page.ready(&mut host);
    page.ready(&mut host);
    assert!(page.gate().is_open());
    assert_eq!(page.intro().phase(), IntroPhase::Holding);
    for e in host.advance_to(1200.0) {
        page.handle(e, &mut host);
    }
    assert_eq!(page.intro().phase(), IntroPhase::Revealing);
    for e in host.advance_to(5200.0) {
        page.handle(e, &mut host);
    }
    assert_eq!(page.intro().phase(), IntroPhase::Complete);
    for e in host.advance_to(10_300.0) {
        page.handle(e, &mut host);
    }
    assert_eq!(page.intro().headline(), 1);
}

#[test]
fn missing_sections_keep_progress_at_start() {
    let mut host = ManualHost::new();
    let mut page = Page::new(&config(true), Capabilities::default(), None).unwrap();
    page.resize(Viewport::default(), 5000.0);
    page.init(&mut host);
    page.scroll_input(ScrollInput::Native { position: 800.0 });
    let mut reports = Vec::new();
    for e in host.advance_to(16.0) {
        reports.extend(page.handle(e, &mut host));
    }
    let r = reports.pop().unwrap();
    assert_eq!(r.scroll.position, 800.0);
    assert_eq!(r.gallery_progress, SectionProgress::START);
    assert!(r.planes.is_empty());
}

#[test]
fn sections_are_measured_when_set() {
    // degraded scroll publishes immediately and frames are driven by hand
    let mut host = ManualHost::without_frames();
    let mut page = Page::new(&config(false), Capabilities::default(), None).unwrap();
    let hero: Rc<dyn Measure> =
        Rc::new(SlotElement::with_rect(Rect::new(0.0, -450.0, 1440.0, 450.0)));
    let gallery: Rc<dyn Measure> = Rc::new(SlotElement::new());
    page.set_sections(hero, gallery);
    page.resize(Viewport::default(), 5000.0);
    page.init(&mut host);
    page.scroll_input(ScrollInput::Native { position: 450.0 });
    assert_eq!(page.broadcaster().state().position, 450.0);
    let r = page.frame(16.0);
    assert!((r.hero_progress.get() - 0.5).abs() < 1e-12);
    assert!((r.hero.content_opacity - 0.0).abs() < 1e-12);
    assert_eq!(r.gallery_progress, SectionProgress::START);
}

#[test]
fn pointer_drives_the_distortion_layer() {
    let mut cfg = config(true);
    cfg.distortion.image = Some("/img/glass.png".to_owned());
    let mut s = sim(&cfg, 0.0);
    s.page_mut().set_pointer(Some(PointerInput {
        uv: Point::new(0.2, 0.3),
        velocity: Vec2::new(40.0, 0.0),
    }));
    let mut last = None;
    for i in 0..120 {
        last = s.step(i as f64 * 1000.0 / 60.0).pop().or(last);
    }
    let u = last.as_ref().unwrap().distortion.as_ref().unwrap();
    assert!(u.opacity > 0.9);
    assert_eq!(u.mouse, [0.2, 0.3]);
    assert!(u.time > 0.0);

    s.page_mut().set_pointer(None);
    for i in 120..400 {
        last = s.step(i as f64 * 1000.0 / 60.0).pop().or(last);
    }
    assert!(last.unwrap().distortion.unwrap().opacity < 0.01);
}

#[test]
fn failed_textures_disable_only_their_plane() {
    let mut host = ManualHost::new();
    let mut page = Page::new(&config(true), Capabilities::default(), None).unwrap();
    let mut loader = SyntheticTextures::failing(["img/1.jpg"]);
    page.request_assets(&mut loader);
    for e in loader.drain() {
        page.on_texture(e);
    }
    let anchors: Vec<Rc<dyn Measure>> = page
        .gallery()
        .items()
        .iter()
        .map(|_| {
            Rc::new(SlotElement::with_rect(Rect::new(96.0, 200.0, 720.0, 616.0))) as Rc<dyn Measure>
        })
        .collect();
    let keys: Vec<_> = page.gallery().items().iter().map(|i| i.key.clone()).collect();
    for (k, a) in keys.iter().zip(&anchors) {
        page.mount_item(k.clone(), a);
    }
    page.init(&mut host);
    let r = page.frame(0.0);
    assert_eq!(r.planes.len(), 3);
    assert!(r.planes.iter().all(|p| p.key != keys[1]));
}

#[test]
fn teardown_is_idempotent_and_silences_the_page() {
    let mut cfg = config(true);
    cfg.video.source = Some("media/loop.mp4".to_owned());
    let mut s = sim(&cfg, 0.5);
    s.run();
    s.teardown();
    s.teardown();
    assert!(s.page().is_torn_down());
    assert_eq!(s.host().pending_frames(), 0);
    assert_eq!(s.host().pending_timers(), 0);
    assert_eq!(s.host().stale_cancels(), 0);
    assert!(s.step(10_000.0).is_empty());
}

#[test]
fn video_needs_buffers() {
    let mut cfg = config(false);
    cfg.video.source = Some("media/loop.mp4".to_owned());
    let page = Page::new(&cfg, Capabilities::default(), None).unwrap();
    assert!(page.video().is_none());
    assert!(!page.is_crossfading());
}

#[test]
fn failed_texture_falls_back_to_the_caption_image() {
    let mut host = ManualHost::new();
    let mut page = Page::new(&config(true), Capabilities::default(), None).unwrap();
    let key = page.gallery().items()[0].key.clone();
    let anchor: Rc<dyn Measure> =
        Rc::new(SlotElement::with_rect(Rect::new(96.0, 200.0, 720.0, 616.0)));
    page.mount_item(key.clone(), &anchor);
    page.init(&mut host);
    page.on_texture(TextureEvent {
        key: key.clone(),
        result: Err(WeaveError::asset("boom")),
    });

    let r = page.frame(16.0);
    assert_eq!(r.mode, PresentationMode::Layered);
    assert!(r.planes.is_empty());
    let item = r.narrative.items.iter().find(|i| i.key == key).unwrap();
    assert!(item.fallback_image.is_some());
    assert!(
        r.narrative
            .items
            .iter()
            .filter(|i| i.key != key)
            .all(|i| i.fallback_image.is_none())
    );
}

#[test]
fn forced_layers_need_a_gpu() {
    let mut cfg = config(true);
    cfg.presentation.force = Some(PresentationMode::Layered);
    let caps = Capabilities {
        gpu: false,
        ..Capabilities::default()
    };
    let err = Page::new(&cfg, caps, None).unwrap_err();
    assert!(matches!(err, WeaveError::Capability(_)));
}
