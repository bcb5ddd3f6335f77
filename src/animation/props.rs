use crate::{
    animation::timeline::{Lerp, ProgressValue, Timeline, TimelineDef},
    foundation::core::{Rgba8, Vec2},
    foundation::error::{ScrollyteError, ScrollyteResult},
};
use serde::{Deserialize, Serialize};

/// Rendered visual properties of one element at a given progress.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VisualProps {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Translation in pixels (or percent, per consumer).
    pub offset: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
    /// Blur radius in pixels.
    pub blur: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Tint color, if the element animates one.
    pub color: Option<Rgba8>,
}

impl Default for VisualProps {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            offset: Vec2::ZERO,
            scale: 1.0,
            blur: 0.0,
            rotation_deg: 0.0,
            color: None,
        }
    }
}

impl Lerp for VisualProps {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let color = match (a.color, b.color) {
            (Some(ca), Some(cb)) => Some(<Rgba8 as Lerp>::lerp(&ca, &cb, t)),
            (ca, cb) => {
                if t < 0.5 {
                    ca
                } else {
                    cb
                }
            }
        };
        Self {
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
            offset: <Vec2 as Lerp>::lerp(&a.offset, &b.offset, t),
            scale: <f64 as Lerp>::lerp(&a.scale, &b.scale, t),
            blur: <f64 as Lerp>::lerp(&a.blur, &b.blur, t),
            rotation_deg: <f64 as Lerp>::lerp(&a.rotation_deg, &b.rotation_deg, t),
            color,
        }
    }
}

/// Independent timelines for each animated property of an element, all driven by one progress.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyTimelines {
    /// Opacity timeline; samples are clamped to `[0, 1]`.
    pub opacity: Option<Timeline<f64>>,
    /// Translation timeline.
    pub offset: Option<Timeline<Vec2>>,
    /// Scale timeline.
    pub scale: Option<Timeline<f64>>,
    /// Blur timeline; negative samples clamp to 0.
    pub blur: Option<Timeline<f64>>,
    /// Rotation timeline, in degrees.
    pub rotation_deg: Option<Timeline<f64>>,
    /// Color timeline.
    pub color: Option<Timeline<Rgba8>>,
}

impl PropertyTimelines {
    /// Sample every timeline at `progress`. Absent timelines keep the [`VisualProps`] default.
    pub fn sample(&self, progress: f64) -> VisualProps {
        let base = VisualProps::default();
        VisualProps {
            opacity: self
                .opacity
                .as_ref()
                .map_or(base.opacity, |tl| tl.sample(progress).clamp(0.0, 1.0)),
            offset: self
                .offset
                .as_ref()
                .map_or(base.offset, |tl| tl.sample(progress)),
            scale: self
                .scale
                .as_ref()
                .map_or(base.scale, |tl| tl.sample(progress)),
            blur: self
                .blur
                .as_ref()
                .map_or(base.blur, |tl| tl.sample(progress).max(0.0)),
            rotation_deg: self
                .rotation_deg
                .as_ref()
                .map_or(base.rotation_deg, |tl| tl.sample(progress)),
            color: self.color.as_ref().map(|tl| tl.sample(progress)),
        }
    }

    /// Whether no property is animated.
    pub fn is_empty(&self) -> bool {
        self.opacity.is_none()
            && self.offset.is_none()
            && self.scale.is_none()
            && self.blur.is_none()
            && self.rotation_deg.is_none()
            && self.color.is_none()
    }
}

/// Serialized form of [`PropertyTimelines`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyTimelinesDef {
    /// Opacity knots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<TimelineDef<f64>>,
    /// Translation knots, as `{x, y}` values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<TimelineDef<Vec2>>,
    /// Scale knots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<TimelineDef<f64>>,
    /// Blur knots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<TimelineDef<f64>>,
    /// Rotation knots, in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_deg: Option<TimelineDef<f64>>,
    /// Color knots, as `#rrggbb[aa]` strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<TimelineDef<Rgba8>>,
}

impl PropertyTimelinesDef {
    /// Build every timeline, replacing malformed ones with identity.
    pub fn build_or_identity(&self) -> PropertyTimelines {
        PropertyTimelines {
            opacity: self.opacity.as_ref().map(TimelineDef::build_or_identity),
            offset: self.offset.as_ref().map(TimelineDef::build_or_identity),
            scale: self.scale.as_ref().map(TimelineDef::build_or_identity),
            blur: self.blur.as_ref().map(TimelineDef::build_or_identity),
            rotation_deg: self
                .rotation_deg
                .as_ref()
                .map(TimelineDef::build_or_identity),
            color: self.color.as_ref().map(TimelineDef::build_or_identity),
        }
    }

    /// Strict validation, reporting the first malformed property by name.
    pub fn validate(&self) -> ScrollyteResult<()> {
        fn check<T: ProgressValue>(name: &str, def: Option<&TimelineDef<T>>) -> ScrollyteResult<()> {
            if let Some(def) = def {
                def.build()
                    .map_err(|e| ScrollyteError::validation(format!("{name}: {e}")))?;
            }
            Ok(())
        }

        check("opacity", self.opacity.as_ref())?;
        check("offset", self.offset.as_ref())?;
        check("scale", self.scale.as_ref())?;
        check("blur", self.blur.as_ref())?;
        check("rotation_deg", self.rotation_deg.as_ref())?;
        check("color", self.color.as_ref())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/props.rs"]
mod tests;
