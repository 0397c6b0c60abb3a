use super::*;

fn layout(n: usize) -> SegmentLayout {
    SegmentLayout::new(n, 0.05).unwrap()
}

#[test]
fn four_items_at_midpoint_hand_over_from_second_to_third() {
    let ops = layout(4).target_opacities(0.5);
    assert_eq!(ops[0], 0.0);
    assert!(ops[1] < 1e-9, "item 1 finished ramping out: {}", ops[1]);
    assert!((ops[2] - 1.0).abs() < 1e-9);
    assert_eq!(ops[3], 0.0);
    assert!((ops[1] + ops[2] - 1.0).abs() < 1e-9);

    let mid = layout(4).target_opacities(0.475);
    assert!((mid[1] - 0.5).abs() < 1e-9);
    assert!((mid[2] - 0.5).abs() < 1e-9);
    assert!((mid[1] + mid[2] - 1.0).abs() < 1e-9);
}

#[test]
fn ends_show_only_first_and_last() {
    let l = layout(5);
    assert_eq!(l.target_opacities(0.0), vec![1.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(l.target_opacities(1.0), vec![0.0, 0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn single_item_always_visible() {
    let l = layout(1);
    for p in [0.0, 0.3, 1.0] {
        assert_eq!(l.target_opacities(p), vec![1.0]);
    }
}

#[test]
fn overlap_is_limited_to_window_width() {
    let l = SegmentLayout::new(40, 0.05).unwrap();
    assert!((l.overlap() - 0.025).abs() < 1e-12);
    for i in 0..=200 {
        let p = i as f64 / 200.0;
        let nonzero = l.target_opacities(p).iter().filter(|o| **o > 0.0).count();
        assert!(nonzero <= 2);
    }
}

#[test]
fn rejects_out_of_range_overlap() {
    assert!(SegmentLayout::new(3, 0.0).is_err());
    assert!(SegmentLayout::new(3, 0.6).is_err());
    assert!(SegmentLayout::new(3, f64::NAN).is_err());
}

#[test]
fn local_progress_and_active_index() {
    let l = layout(4);
    let w = l.window(1).unwrap();
    assert_eq!(w.local_progress(0.25), 0.0);
    assert!((w.local_progress(0.375) - 0.5).abs() < 1e-12);
    assert_eq!(w.local_progress(0.9), 1.0);
    assert_eq!(l.active_index(1.0), Some(3));
    assert_eq!(l.active_index(0.26), Some(1));
    assert_eq!(SegmentLayout::with_default_overlap(0).active_index(0.5), None);
}

#[test]
fn channel_ramps_follow_edge_policy() {
    let l = layout(3);
    let first = l.window(0).unwrap().ramp(EdgeValues::new(60.0, 0.0, -60.0));
    assert_eq!(first.sample(0.0), 0.0);
    let last = l.window(2).unwrap().ramp(EdgeValues::new(60.0, 0.0, -60.0));
    assert_eq!(last.sample(1.0), 0.0);
    assert_eq!(last.sample(0.5), 60.0);
}
