use super::*;

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(0.0, 900.0, 1.0).is_err());
    assert!(Viewport::new(1440.0, f64::NAN, 1.0).is_err());
    assert!(Viewport::new(1440.0, 900.0, 0.0).is_err());
    assert!(Viewport::new(1440.0, 900.0, 2.0).is_ok());
}

#[test]
fn degenerate_viewport_has_unit_aspect() {
    let vp = Viewport {
        width: 800.0,
        height: 0.0,
        device_pixel_ratio: 1.0,
    };
    assert!(vp.is_degenerate());
    assert_eq!(vp.aspect(), 1.0);
}

#[test]
fn center_is_half_extent() {
    let vp = Viewport::new(1000.0, 500.0, 1.0).unwrap();
    assert_eq!(vp.center(), Point::new(500.0, 250.0));
}
