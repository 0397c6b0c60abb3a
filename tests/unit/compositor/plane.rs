use super::*;
use crate::segment::window::SegmentLayout;

fn plane(index: usize) -> ImagePlane {
    let layout = SegmentLayout::new(4, 0.05).unwrap();
    ImagePlane::new(ItemKey::new("p"), layout.window(index).unwrap())
}

fn frame(progress: f64, velocity: f64) -> PlaneFrame {
    PlaneFrame {
        progress,
        velocity,
        dt: 1.0 / 60.0,
    }
}

#[test]
fn opacity_approaches_without_snapping() {
    let mut p = plane(1);
    p.step(&frame(0.375, 0.0), Smoothing::PerFrame);
    assert!((p.opacity() - 0.1).abs() < 1e-12);
    for _ in 0..200 {
        p.step(&frame(0.375, 0.0), Smoothing::PerFrame);
    }
    assert!(p.opacity() > 0.999 && p.opacity() <= 1.0);
}

#[test]
fn time_constant_matches_per_frame_at_sixty_hz() {
    let mut a = plane(1);
    let mut b = plane(1);
    for _ in 0..30 {
        a.step(&frame(0.375, 1200.0), Smoothing::PerFrame);
        b.step(&frame(0.375, 1200.0), Smoothing::default());
    }
    assert!((a.opacity() - b.opacity()).abs() < 1e-9);
    assert!((a.scale() - b.scale()).abs() < 1e-9);
}

#[test]
fn hidden_plane_shrinks_toward_rest_scale() {
    let mut p = plane(3);
    for _ in 0..400 {
        p.step(&frame(0.0, 0.0), Smoothing::PerFrame);
    }
    assert!((p.scale() - 0.9).abs() < 1e-6);
    assert!(p.opacity() < 1e-9);
}

#[test]
fn fast_scroll_tilts_and_saturates() {
    let mut p = plane(0);
    for _ in 0..400 {
        p.step(&frame(0.1, -20_000.0), Smoothing::PerFrame);
    }
    let draw = p.draw(Placement {
        center: Point::ORIGIN,
        size: Size::new(2.0, 1.0),
    });
    assert!((draw.rotation_z + 0.012).abs() < 1e-6);
    assert!((draw.rotation_x + 0.016).abs() < 1e-6);
    assert!((draw.uniforms.velocity - 1.0).abs() < 1e-5);
    assert_eq!(draw.uniforms.intro, 1.0);
}

#[test]
fn draw_scales_placement() {
    let mut p = plane(0);
    p.step(&frame(0.0, 0.0), Smoothing::PerFrame);
    let draw = p.draw(Placement {
        center: Point::new(1.0, -1.0),
        size: Size::new(2.0, 1.0),
    });
    assert_eq!(draw.center, Point::new(1.0, -1.0));
    assert!((draw.size.width - 2.0 * p.scale()).abs() < 1e-12);
    assert_eq!(draw.index, 0);
}
