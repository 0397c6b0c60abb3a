use super::*;

fn settle(mut s: Spring, target: f64, secs: f64) -> (Spring, f64) {
    let dt = 1.0 / 60.0;
    let mut max = f64::MIN;
    let steps = (secs / dt) as usize;
    s.set_target(target);
    for _ in 0..steps {
        max = max.max(s.step(dt));
    }
    (s, max)
}

#[test]
fn damping_ratio_matches_definition() {
    let c = SpringConfig::critical(120.0, 0.9);
    assert!((c.damping_ratio() - 1.0).abs() < 1e-12);
    assert!(SpringConfig::new(130.0, 24.0, 0.8).damping_ratio() > 1.0);
    assert!(SpringConfig::new(150.0, 8.0, 1.0).damping_ratio() < 1.0);
}

#[test]
fn every_regime_converges_to_target() {
    for cfg in [
        SpringConfig::critical(120.0, 0.9),
        SpringConfig::new(130.0, 24.0, 0.8),
        SpringConfig::new(150.0, 8.0, 1.0),
    ] {
        let (s, _) = settle(Spring::new(cfg, 0.0), 1.0, 6.0);
        assert_eq!(s.value(), 1.0, "{cfg:?}");
        assert!(s.is_at_rest());
    }
}

#[test]
fn critical_and_overdamped_never_overshoot() {
    for cfg in [
        SpringConfig::critical(120.0, 0.9),
        SpringConfig::new(130.0, 24.0, 0.8),
    ] {
        let (_, max) = settle(Spring::new(cfg, 0.0), 60.0, 3.0);
        assert!(max <= 60.0 + 1e-9, "{cfg:?} overshot to {max}");
    }
}

#[test]
fn underdamped_overshoots() {
    let (_, max) = settle(Spring::new(SpringConfig::new(150.0, 4.0, 1.0), 0.0), 1.0, 3.0);
    assert!(max > 1.0);
}

#[test]
fn large_step_lands_near_target_without_blowing_up() {
    let mut s = Spring::new(SpringConfig::new(130.0, 24.0, 0.8), 0.0);
    s.set_target(1.0);
    let v = s.step(30.0);
    assert!(v.is_finite());
    assert!((v - 1.0).abs() < 1e-6);
}

#[test]
fn invalid_inputs_are_ignored() {
    let mut s = Spring::new(SpringConfig::default(), 0.5);
    s.set_target(f64::NAN);
    assert_eq!(s.target(), 0.5);
    assert_eq!(s.step(f64::NAN), 0.5);
    assert_eq!(s.step(-1.0), 0.5);
}

#[test]
fn validate_rejects_bad_parameters() {
    assert!(SpringConfig::new(0.0, 1.0, 1.0).validate().is_err());
    assert!(SpringConfig::new(1.0, -1.0, 1.0).validate().is_err());
    assert!(SpringConfig::new(1.0, 1.0, f64::INFINITY).validate().is_err());
    assert!(SpringConfig::new(130.0, 24.0, 0.8).validate().is_ok());
}
