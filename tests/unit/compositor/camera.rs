use super::*;

fn camera(w: f64, h: f64, dpr: f64) -> PerspectiveCamera {
    PerspectiveCamera::new(CameraConfig::default(), Viewport::new(w, h, dpr).unwrap())
}

#[test]
fn visible_height_matches_fov() {
    let cam = camera(1440.0, 900.0, 1.0);
    let expected = 2.0 * 5.0 * 25f64.to_radians().tan();
    assert!((cam.visible_height() - expected).abs() < 1e-12);
    assert!((cam.visible_width() / cam.visible_height() - 1.6).abs() < 1e-12);
}

#[test]
fn viewport_center_is_world_origin() {
    let cam = camera(1440.0, 900.0, 2.0);
    let o = cam.screen_to_world(Point::new(720.0, 450.0));
    assert!(o.x.abs() < 1e-12 && o.y.abs() < 1e-12);
    let top = cam.screen_to_world(Point::new(720.0, 0.0));
    assert!(top.y > 0.0, "screen top maps to positive world y");
}

#[test]
fn rect_round_trips_within_a_pixel() {
    let cam = camera(1280.0, 720.0, 1.5);
    for rect in [
        Rect::new(100.0, 80.0, 700.0, 480.0),
        Rect::new(-300.0, 600.0, 10.0, 1200.0),
        Rect::new(640.0, 360.0, 641.0, 361.0),
    ] {
        let placed = cam.place_rect(rect, 2.0);
        let back = cam.placement_rect(placed);
        assert!((back.center() - rect.center()).hypot() < 1.0);
        assert!((back.width() - (rect.width() - 2.0)).abs() < 1e-9);
    }
}

#[test]
fn border_never_produces_negative_size() {
    let cam = camera(800.0, 600.0, 1.0);
    let placed = cam.place_rect(Rect::new(0.0, 0.0, 1.0, 1.0), 2.0);
    assert_eq!(placed.size, Size::ZERO);
}

#[test]
fn surface_clamps_pixel_ratio() {
    let s = camera(1000.0, 500.0, 3.0).surface();
    assert_eq!(s.pixel_ratio, 1.5);
    assert_eq!((s.buffer_width, s.buffer_height), (1500, 750));
    assert!(s.transparent && !s.pointer_events);
    assert_eq!(camera(1000.0, 500.0, 0.5).surface().pixel_ratio, 1.0);
}

#[test]
fn config_validation() {
    assert!(CameraConfig::default().validate().is_ok());
    let bad = CameraConfig {
        fov_deg: 0.0,
        ..CameraConfig::default()
    };
    assert!(bad.validate().is_err());
    let bad_dpr = CameraConfig {
        dpr_range: [2.0, 1.0],
        ..CameraConfig::default()
    };
    assert!(bad_dpr.validate().is_err());
}
