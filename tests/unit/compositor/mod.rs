use std::rc::Rc;

use super::*;
use crate::{
    anchor::registry::{Measure, SlotElement},
    compositor::{camera::CameraConfig, texture::Texture},
    foundation::{core::Rect, error::WeaveError},
    gallery::item::GalleryItemDef,
};

fn gallery() -> Gallery {
    let def = |title: &str, image: Option<&str>| GalleryItemDef {
        key: None,
        title: title.to_owned(),
        category: String::new(),
        tag: String::new(),
        image: image.map(str::to_owned),
        description: String::new(),
    };
    Gallery::from_defs(&[
        def("a", Some("a.png")),
        def("b", None),
        def("c", Some("c.png")),
    ])
    .unwrap()
}

#[derive(Default)]
struct Recorder {
    requested: Vec<(ItemKey, String)>,
}

impl TextureLoader for Recorder {
    fn request(&mut self, key: &ItemKey, path: &str) {
        self.requested.push((key.clone(), path.to_owned()));
    }

    fn drain(&mut self) -> Vec<TextureEvent> {
        Vec::new()
    }
}

fn compositor() -> Compositor {
    let g = gallery();
    Compositor::new(
        &g,
        SegmentLayout::with_default_overlap(g.len()),
        PerspectiveCamera::new(CameraConfig::default(), Viewport::default()),
        Smoothing::PerFrame,
    )
}

fn ready(c: &mut Compositor, key: &str) {
    c.on_texture(TextureEvent {
        key: ItemKey::new(key),
        result: Ok(Texture::solid(1, 1, [255, 255, 255, 255])),
    });
}

const FRAME: PlaneFrame = PlaneFrame {
    progress: 0.0,
    velocity: 0.0,
    dt: 1.0 / 60.0,
};

#[test]
fn only_items_with_images_are_requested_once() {
    let mut c = compositor();
    let mut loader = Recorder::default();
    c.request_textures(&mut loader);
    c.request_textures(&mut loader);
    assert_eq!(
        loader.requested,
        vec![
            (ItemKey::new("a"), "a.png".to_owned()),
            (ItemKey::new("c"), "c.png".to_owned())
        ]
    );
    assert_eq!(
        c.texture_state(&ItemKey::new("b")),
        Some(&TextureState::Unrequested)
    );
}

#[test]
fn draws_require_texture_and_anchor() {
    let mut c = compositor();
    let mut anchors = AnchorRegistry::new();
    let a: Rc<dyn Measure> = Rc::new(SlotElement::with_rect(Rect::new(100.0, 100.0, 500.0, 400.0)));
    let cc: Rc<dyn Measure> = Rc::new(SlotElement::with_rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
    anchors.register(ItemKey::new("a"), &a);
    anchors.register(ItemKey::new("c"), &cc);

    assert!(c.update(&FRAME, &anchors).is_empty());

    ready(&mut c, "a");
    c.on_texture(TextureEvent {
        key: ItemKey::new("c"),
        result: Err(WeaveError::asset("broken")),
    });
    let draws = c.update(&FRAME, &anchors);
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].key, ItemKey::new("a"));
    assert_eq!(c.texture_state(&ItemKey::new("c")), Some(&TextureState::Failed));

    drop(a);
    assert!(c.update(&FRAME, &anchors).is_empty());
}

#[test]
fn plane_center_tracks_anchor_rect() {
    let mut c = compositor();
    ready(&mut c, "a");
    let slot = Rc::new(SlotElement::with_rect(Rect::new(200.0, 150.0, 600.0, 450.0)));
    let dyn_slot: Rc<dyn Measure> = slot.clone();
    let mut anchors = AnchorRegistry::new();
    anchors.register(ItemKey::new("a"), &dyn_slot);

    let before = c.update(&FRAME, &anchors)[0].center;
    slot.set_rect(Rect::new(200.0, 50.0, 600.0, 350.0));
    let after = c.update(&FRAME, &anchors)[0].center;
    assert!(after.y > before.y, "moving up on screen raises the plane");
    let screen = c.camera().world_to_screen(after);
    assert!((screen.y - 200.0).abs() < 1e-6);
}

#[test]
fn late_texture_after_release_is_dropped() {
    let mut c = compositor();
    c.release();
    ready(&mut c, "a");
    assert!(c.texture_state(&ItemKey::new("a")).is_none());
}
