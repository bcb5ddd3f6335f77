use super::*;
use serde_json::json;

#[test]
fn viewport_rejects_negative_or_nan() {
    assert!(Viewport::new(-1.0, 10.0).is_err());
    assert!(Viewport::new(10.0, f64::NAN).is_err());
    assert!(Viewport::new(0.0, 0.0).is_ok());
}

#[test]
fn centered_band_is_symmetric() {
    let vp = Viewport::new(1280.0, 1000.0).unwrap();
    assert_eq!(vp.centered_band(0.2), (400.0, 600.0));
    assert_eq!(vp.centered_band(1.0), (0.0, 1000.0));
    assert_eq!(vp.centered_band(0.0), (500.0, 500.0));
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba8::new(255, 0, 0, 255));

    let c: Rgba8 = serde_json::from_value(json!("#0000FF80")).unwrap();
    assert_eq!(c, Rgba8::new(0, 0, 255, 128));

    assert!(serde_json::from_value::<Rgba8>(json!("#12345")).is_err());
}

#[test]
fn parses_rgba_object_and_array() {
    let c: Rgba8 = serde_json::from_value(json!({"r": 1.0, "g": 0.5, "b": 0.0})).unwrap();
    assert_eq!(c, Rgba8::new(255, 128, 0, 255));

    let c: Rgba8 = serde_json::from_value(json!([0.0, 0.0, 1.0, 0.0])).unwrap();
    assert_eq!(c, Rgba8::new(0, 0, 255, 0));

    assert!(serde_json::from_value::<Rgba8>(json!([0.0, 1.0])).is_err());
}

#[test]
fn serializes_as_hex_and_reads_back() {
    let c = Rgba8::new(18, 20, 28, 128);
    let s = serde_json::to_string(&c).unwrap();
    assert_eq!(s, "\"#12141c80\"");
    let back: Rgba8 = serde_json::from_str(&s).unwrap();
    assert_eq!(back, c);
}
