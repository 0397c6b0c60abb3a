use super::*;

#[test]
fn parses_keywords_and_numbers() {
    let i: Intersection = "end start".parse().unwrap();
    assert_eq!(i, Intersection::new(1.0, 0.0));
    let i: Intersection = "center 0.25".parse().unwrap();
    assert_eq!(i, Intersection::new(0.5, 0.25));
    assert!("start".parse::<Intersection>().is_err());
    assert!("start middle".parse::<Intersection>().is_err());
    assert!("start end extra".parse::<Intersection>().is_err());
}

#[test]
fn serde_uses_string_pairs() {
    let off: ScrollOffset = serde_json::from_str(r#"["start start", "end end"]"#).unwrap();
    assert_eq!(off, ScrollOffset::PINNED);
    let json = serde_json::to_string(&ScrollOffset::LEAVING).unwrap();
    assert_eq!(json, r#"["start start","end start"]"#);
}

#[test]
fn pinned_range_spans_height_minus_viewport() {
    let (a, b) = ScrollOffset::PINNED.scroll_range(900.0, 3600.0, 900.0);
    assert_eq!(a, 900.0);
    assert_eq!(b, 3600.0);
}
