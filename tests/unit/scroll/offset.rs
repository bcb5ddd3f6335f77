use super::*;

#[test]
fn parses_keyword_pairs() {
    let o: ScrollOffset = "start end".parse().unwrap();
    assert_eq!(o, ScrollOffset::enter());
    let o: ScrollOffset = "  End   START ".parse().unwrap();
    assert_eq!(o, ScrollOffset::exit());
    let o: ScrollOffset = "center".parse().unwrap();
    assert_eq!(o, ScrollOffset::new(Anchor::Center, Anchor::Center));
}

#[test]
fn parses_numeric_anchors() {
    let o: ScrollOffset = "0.25 80%".parse().unwrap();
    assert_eq!(o.container, Anchor::Fraction(0.25));
    assert_eq!(o.viewport, Anchor::Fraction(0.8));
    let o: ScrollOffset = "120px start".parse().unwrap();
    assert_eq!(o.container, Anchor::Pixels(120.0));
}

#[test]
fn rejects_garbage() {
    assert!("".parse::<ScrollOffset>().is_err());
    assert!("start end center".parse::<ScrollOffset>().is_err());
    assert!("middle end".parse::<ScrollOffset>().is_err());
    assert!("nanpx end".parse::<ScrollOffset>().is_err());
}

#[test]
fn resolves_container_top_targets() {
    // Container 400 tall, viewport 1000 tall.
    assert_eq!(ScrollOffset::enter().container_top_at(400.0, 1000.0), 1000.0);
    assert_eq!(ScrollOffset::exit().container_top_at(400.0, 1000.0), -400.0);
    let centered: ScrollOffset = "center center".parse().unwrap();
    assert_eq!(centered.container_top_at(400.0, 1000.0), 300.0);
    let px: ScrollOffset = "100px 25%".parse().unwrap();
    assert_eq!(px.container_top_at(400.0, 1000.0), 150.0);
}

#[test]
fn serde_uses_the_string_form() {
    let o: ScrollOffset = serde_json::from_str("\"start 50%\"").unwrap();
    assert_eq!(o.viewport, Anchor::Fraction(0.5));
    assert_eq!(
        serde_json::to_string(&ScrollOffset::exit()).unwrap(),
        "\"end start\""
    );
    assert!(serde_json::from_str::<ScrollOffset>("\"sideways\"").is_err());
}
