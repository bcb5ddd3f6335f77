use super::*;

#[test]
fn clamp01_handles_nan_and_bounds() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(-3.0), 0.0);
    assert_eq!(clamp01(0.4), 0.4);
    assert_eq!(clamp01(f64::INFINITY), 1.0);
}

#[test]
fn inverse_lerp_degenerate_span_is_zero() {
    assert_eq!(inverse_lerp(2.0, 2.0, 5.0), 0.0);
    assert_eq!(inverse_lerp(0.0, 10.0, 2.5), 0.25);
    assert_eq!(inverse_lerp(10.0, 0.0, 2.5), 0.75);
}

#[test]
fn approx_eq_is_inclusive() {
    assert!(approx_eq(1.0, 1.0 + 1e-9, 1e-9 * 2.0));
    assert!(!approx_eq(1.0, 1.1, 1e-3));
}
