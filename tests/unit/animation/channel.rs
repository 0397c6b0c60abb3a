use super::*;

fn ramp() -> Ramp {
    Ramp::new(&[0.0, 1.0], &[0.0, 10.0]).unwrap()
}

#[test]
fn direct_channel_follows_ramp_immediately() {
    let mut c = Channel::direct(ramp(), 0.2);
    assert_eq!(c.value(), 2.0);
    assert_eq!(c.update(0.7, 0.016), 7.0);
}

#[test]
fn sprung_channel_lags_then_arrives() {
    let mut c = Channel::sprung(ramp(), SpringConfig::new(130.0, 24.0, 0.8), 0.0);
    assert_eq!(c.value(), 0.0);
    let first = c.update(1.0, 1.0 / 60.0);
    assert!(first > 0.0 && first < 10.0);
    for _ in 0..600 {
        c.update(1.0, 1.0 / 60.0);
    }
    assert!((c.value() - 10.0).abs() < 1e-3);
}
