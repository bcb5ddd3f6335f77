/// Smallest span (in pixels or progress units) treated as non-degenerate.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// Clamp to `[0, 1]`, mapping NaN to 0.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Position of `x` within `[a, b]` as an unclamped fraction. Degenerate spans yield 0.
#[inline]
pub fn inverse_lerp(a: f64, b: f64, x: f64) -> f64 {
    let span = b - a;
    if span.abs() < GEOMETRY_EPSILON {
        return 0.0;
    }
    (x - a) / span
}

#[inline]
pub(crate) fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
