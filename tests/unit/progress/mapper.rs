use super::*;
use crate::{anchor::registry::SlotElement, foundation::core::Rect};

fn scroll_at(position: f64) -> ScrollState {
    ScrollState::at_rest(position, 10_000.0)
}

/// Element whose document top is `doc_top`, seen at `scroll`.
fn element(doc_top: f64, height: f64, scroll: f64) -> SlotElement {
    SlotElement::with_rect(Rect::new(0.0, doc_top - scroll, 1440.0, doc_top - scroll + height))
}

fn vp() -> Viewport {
    Viewport::new(1440.0, 900.0, 1.0).unwrap()
}

#[test]
fn pinned_section_maps_linearly() {
    // 400vh section starting at 900: progress runs from 900 to 900 + 3600 - 900.
    let mut mapper = ProgressMapper::new(ScrollOffset::PINNED);
    for (scroll, expected) in [(0.0, 0.0), (900.0, 0.0), (2250.0, 0.5), (3600.0, 1.0), (9000.0, 1.0)] {
        let el = element(900.0, 3600.0, scroll);
        let p = mapper.update(&el, &scroll_at(scroll), vp(), 1.0 / 60.0);
        assert!((p.get() - expected).abs() < 1e-9, "scroll {scroll}: {}", p.get());
    }
}

#[test]
fn moving_back_moves_progress_back() {
    let mut mapper = ProgressMapper::new(ScrollOffset::PINNED);
    let a = mapper.update(&element(0.0, 1800.0, 600.0), &scroll_at(600.0), vp(), 0.016);
    let b = mapper.update(&element(0.0, 1800.0, 300.0), &scroll_at(300.0), vp(), 0.016);
    assert!(b < a);
}

#[test]
fn zero_height_section_is_pinned_to_zero() {
    let mut mapper = ProgressMapper::new(ScrollOffset::LEAVING);
    for scroll in [0.0, 10.0, 500.0, 5000.0] {
        let p = mapper.update(&element(400.0, 0.0, scroll), &scroll_at(scroll), vp(), 0.016);
        assert_eq!(p.get(), 0.0);
    }
    // Pinned offset with a section shorter than the viewport has negative traversal.
    let mut pinned = ProgressMapper::new(ScrollOffset::PINNED);
    let p = pinned.update(&element(400.0, 0.0, 450.0), &scroll_at(450.0), vp(), 0.016);
    assert_eq!(p.get(), 0.0);
}

#[test]
fn missing_element_keeps_previous_value() {
    let mut mapper = ProgressMapper::new(ScrollOffset::PINNED);
    mapper.update(&element(0.0, 1800.0, 450.0), &scroll_at(450.0), vp(), 0.016);
    let before = mapper.progress();
    let p = mapper.update(&SlotElement::new(), &scroll_at(900.0), vp(), 0.016);
    assert_eq!(p, before);
    assert!(mapper.is_ready());
}

#[test]
fn springs_start_on_first_measurement_and_converge() {
    let mut mapper = ProgressMapper::new(ScrollOffset::PINNED);
    let id = mapper.add_spring(SpringConfig::new(120.0, 24.0, 0.9));
    mapper.update(&element(0.0, 1800.0, 450.0), &scroll_at(450.0), vp(), 0.016);
    assert!((mapper.spring(id) - 0.5).abs() < 1e-9);

    for _ in 0..600 {
        mapper.update(&element(0.0, 1800.0, 900.0), &scroll_at(900.0), vp(), 1.0 / 60.0);
    }
    assert!((mapper.spring(id) - 1.0).abs() < 1e-3);
}

#[test]
fn section_progress_clamps_nan() {
    assert_eq!(SectionProgress::new(f64::NAN).get(), 0.0);
    assert_eq!(SectionProgress::new(3.0), SectionProgress::END);
}
