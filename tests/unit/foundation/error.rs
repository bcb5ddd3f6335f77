use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollyteError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollyteError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        ScrollyteError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        ScrollyteError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollyteError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: ScrollyteError = serde_json::from_str::<f64>("nope").unwrap_err().into();
    assert!(matches!(err, ScrollyteError::Serde(_)));
}
