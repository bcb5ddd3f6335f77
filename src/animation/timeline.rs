use crate::{
    animation::ease::Ease,
    foundation::core::{Rgba8, Vec2},
    foundation::error::{ScrollyteError, ScrollyteResult},
};
use serde::{Deserialize, Serialize};

/// Values that can be blended linearly.
pub trait Lerp: Sized {
    /// Blend from `a` (`t = 0`) to `b` (`t = 1`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

// Channels are interpolated independently in sRGB space, no gamma handling.
impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Values a timeline can fall back to when its definition is malformed: progress passes
/// through unchanged.
pub trait ProgressValue: Lerp + Clone {
    /// Identity mapping of `progress` into this value type.
    fn from_progress(progress: f64) -> Self;
}

impl ProgressValue for f64 {
    fn from_progress(progress: f64) -> Self {
        progress
    }
}

impl ProgressValue for f32 {
    fn from_progress(progress: f64) -> Self {
        progress as f32
    }
}

impl ProgressValue for Vec2 {
    fn from_progress(progress: f64) -> Self {
        Vec2::new(progress, progress)
    }
}

impl ProgressValue for Rgba8 {
    fn from_progress(progress: f64) -> Self {
        let v = (progress.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba8::new(v, v, v, 255)
    }
}

/// Map `progress` through `(breakpoint, value)` knots with linear segments.
///
/// Progress below the first breakpoint yields the first value, above the last yields the last
/// value. Degenerate segments (`b[j+1] <= b[j]`) yield the left value. Returns `None` when there
/// are no knots or the slices differ in length.
pub fn interpolate<T>(progress: f64, breakpoints: &[f64], values: &[T]) -> Option<T>
where
    T: Lerp + Clone,
{
    interpolate_eased(progress, breakpoints, values, Ease::Linear)
}

fn interpolate_eased<T>(progress: f64, breakpoints: &[f64], values: &[T], ease: Ease) -> Option<T>
where
    T: Lerp + Clone,
{
    if breakpoints.len() != values.len() || values.is_empty() {
        return None;
    }
    if progress.is_nan() {
        return Some(values[0].clone());
    }

    let idx = breakpoints.partition_point(|b| *b <= progress);
    if idx == 0 {
        return Some(values[0].clone());
    }
    if idx >= values.len() {
        return Some(values[values.len() - 1].clone());
    }

    let (b0, b1) = (breakpoints[idx - 1], breakpoints[idx]);
    let (v0, v1) = (&values[idx - 1], &values[idx]);
    let span = b1 - b0;
    if span <= 0.0 {
        return Some(v0.clone());
    }
    let t = ease.apply((progress - b0) / span);
    Some(T::lerp(v0, v1, t))
}

/// A validated breakpoint timeline for one animated property.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Timeline<T> {
    kind: TimelineKind<T>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
enum TimelineKind<T> {
    Keys {
        breakpoints: Vec<f64>,
        values: Vec<T>,
        ease: Ease,
    },
    Identity,
}

impl<T> Timeline<T>
where
    T: ProgressValue,
{
    /// Breakpoints must be finite, inside `[0, 1]` and strictly increasing, one per value.
    pub fn new(breakpoints: Vec<f64>, values: Vec<T>) -> ScrollyteResult<Self> {
        validate_breakpoints(&breakpoints, values.len())?;
        Ok(Self {
            kind: TimelineKind::Keys {
                breakpoints,
                values,
                ease: Ease::Linear,
            },
        })
    }

    /// Two-point enter ramp.
    pub fn ramp(from: f64, to: f64, start: T, end: T) -> ScrollyteResult<Self> {
        Self::new(vec![from, to], vec![start, end])
    }

    /// Four-point enter → hold → exit shape.
    pub fn enter_hold_exit(breakpoints: [f64; 4], values: [T; 4]) -> ScrollyteResult<Self> {
        Self::new(breakpoints.to_vec(), values.to_vec())
    }

    /// Build a timeline, or fall back to identity with a warning when the definition is malformed.
    pub fn or_identity(breakpoints: Vec<f64>, values: Vec<T>) -> Self {
        match Self::new(breakpoints, values) {
            Ok(tl) => tl,
            Err(e) => {
                tracing::warn!(error = %e, "malformed timeline definition; using identity mapping");
                Self::identity()
            }
        }
    }

    /// Passes progress through unchanged.
    pub fn identity() -> Self {
        Self {
            kind: TimelineKind::Identity,
        }
    }

    /// Ease every segment with `ease`. No effect on identity timelines.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        if let TimelineKind::Keys { ease: e, .. } = &mut self.kind {
            *e = ease;
        }
        self
    }

    /// Whether this is the identity fallback.
    pub fn is_identity(&self) -> bool {
        matches!(self.kind, TimelineKind::Identity)
    }

    /// Knot positions; empty for identity.
    pub fn breakpoints(&self) -> &[f64] {
        match &self.kind {
            TimelineKind::Keys { breakpoints, .. } => breakpoints,
            TimelineKind::Identity => &[],
        }
    }

    /// Knot values; empty for identity.
    pub fn values(&self) -> &[T] {
        match &self.kind {
            TimelineKind::Keys { values, .. } => values,
            TimelineKind::Identity => &[],
        }
    }

    /// Value at `progress`, clamped to the first and last knots.
    pub fn sample(&self, progress: f64) -> T {
        match &self.kind {
            TimelineKind::Keys {
                breakpoints,
                values,
                ease,
            } => interpolate_eased(progress, breakpoints, values, *ease)
                .unwrap_or_else(|| T::from_progress(progress)),
            TimelineKind::Identity => T::from_progress(progress),
        }
    }
}

fn validate_breakpoints(breakpoints: &[f64], value_count: usize) -> ScrollyteResult<()> {
    if breakpoints.is_empty() {
        return Err(ScrollyteError::animation(
            "timeline must have at least one breakpoint",
        ));
    }
    if breakpoints.len() != value_count {
        return Err(ScrollyteError::animation(format!(
            "timeline has {} breakpoints but {} values",
            breakpoints.len(),
            value_count
        )));
    }
    if let Some(b) = breakpoints
        .iter()
        .find(|b| !b.is_finite() || !(0.0..=1.0).contains(*b))
    {
        return Err(ScrollyteError::animation(format!(
            "timeline breakpoint {b} is outside [0, 1]"
        )));
    }
    if !breakpoints.windows(2).all(|w| w[0] < w[1]) {
        return Err(ScrollyteError::animation(
            "timeline breakpoints must be strictly increasing",
        ));
    }
    Ok(())
}

/// Serialized form of a [`Timeline`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineDef<T> {
    /// Knot positions in `[0, 1]`.
    pub breakpoints: Vec<f64>,
    /// One value per breakpoint.
    pub values: Vec<T>,
    /// Per-segment easing, linear by default.
    #[serde(default)]
    pub ease: Ease,
}

impl<T> TimelineDef<T>
where
    T: ProgressValue,
{
    /// Validate and build.
    pub fn build(&self) -> ScrollyteResult<Timeline<T>> {
        Ok(Timeline::new(self.breakpoints.clone(), self.values.clone())?.with_ease(self.ease))
    }

    /// Build, or fall back to identity with a warning.
    pub fn build_or_identity(&self) -> Timeline<T> {
        Timeline::or_identity(self.breakpoints.clone(), self.values.clone()).with_ease(self.ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
