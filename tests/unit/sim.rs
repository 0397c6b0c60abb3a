use super::*;
use crate::{gallery::item::GalleryItemDef, video::loop_controller::LoopPhase};

fn config() -> EngineConfig {
    let mut cfg = EngineConfig::default();
    cfg.gallery.items = ["North", "East", "South"]
        .iter()
        .map(|t| GalleryItemDef {
            key: None,
            title: (*t).to_owned(),
            category: String::new(),
            tag: String::new(),
            image: Some(format!("img/{}.jpg", t.to_lowercase())),
            description: String::new(),
        })
        .collect();
    cfg
}

#[test]
fn sticky_element_pins_inside_its_section() {
    let scroll = Rc::new(Cell::new(0.0));
    let section = Rect::new(0.0, 900.0, 1440.0, 4500.0);
    let local = Rect::new(96.0, 100.0, 720.0, 500.0);
    let el = StickyElement::new(section, local, 900.0, scroll.clone());

    assert_eq!(el.bounding_rect().unwrap().y0, 1000.0);
    scroll.set(450.0);
    assert_eq!(el.bounding_rect().unwrap().y0, 550.0);
    scroll.set(2000.0);
    assert_eq!(el.bounding_rect().unwrap().y0, 100.0);
    scroll.set(3600.0);
    assert_eq!(el.bounding_rect().unwrap().y0, 100.0);
    scroll.set(4000.0);
    assert_eq!(el.bounding_rect().unwrap().y0, -300.0);
}

#[test]
fn document_element_moves_with_scroll() {
    let scroll = Rc::new(Cell::new(120.0));
    let el = DocumentElement::new(Rect::new(0.0, 900.0, 10.0, 1000.0), scroll);
    assert_eq!(el.bounding_rect().unwrap().y0, 780.0);
}

#[test]
fn synthetic_loader_queues_until_drained() {
    let mut loader = SyntheticTextures::failing(["bad.png"]);
    loader.request(&ItemKey::new("a"), "good.png");
    loader.request(&ItemKey::new("b"), "bad.png");
    let events = loader.drain();
    assert_eq!(events.len(), 2);
    assert!(events[0].result.is_ok());
    assert!(events[1].result.is_err());
    assert!(loader.drain().is_empty());
}

#[test]
fn wheel_script_reaches_the_bottom() {
    let mut sim = Simulation::new(
        &config(),
        SimOptions {
            seconds: 10.0,
            ..SimOptions::default()
        },
    )
    .unwrap();
    assert_eq!(sim.document_height(), 900.0 + 3600.0 + 900.0);
    let trace = sim.run();
    assert_eq!(trace.frames.len(), 601);
    let last = trace.frames.last().unwrap();
    assert!(last.scroll.position > 4400.0, "{}", last.scroll.position);
    assert_eq!(last.gallery_progress, crate::progress::mapper::SectionProgress::END);
    assert_eq!(sim.scroll_position(), last.scroll.position);
    assert!(trace.frames.iter().any(|f| f.scroll.velocity > 0.0));
}

#[test]
fn background_loop_crossfades_before_each_end() {
    let mut cfg = config();
    cfg.video.source = Some("media/loop.mp4".to_owned());
    let mut sim = Simulation::new(
        &cfg,
        SimOptions {
            seconds: 20.0,
            scroll_speed: 0.0,
            ..SimOptions::default()
        },
    )
    .unwrap();
    let trace = sim.run();
    assert_eq!(trace.crossfade_starts.len(), 2);
    let first = trace.crossfade_starts[0];
    assert!((6980.0..7000.0).contains(&first), "{first}");
    assert!(matches!(
        sim.page().video().unwrap().phase(),
        LoopPhase::Playing { .. }
    ));
    let layers = trace.frames.last().unwrap().video.unwrap();
    assert_eq!(layers.a + layers.b, 1.0);
}

#[test]
fn rejects_bad_rates() {
    let err = Simulation::new(
        &config(),
        SimOptions {
            fps: 0.0,
            ..SimOptions::default()
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("fps"));
}
