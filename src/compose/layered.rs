//! Layered timelines: `N` layers sharing one progress source, crossfading through their own
//! sub-ranges of `[0, 1]`.
//!
//! Each sub-range is apportioned into entry, hold and exit phases. Opacity ramps from
//! `floor_opacity` to 1 during entry, holds, and ramps back to the floor during exit. Outside its
//! sub-range a layer is fully invisible.

use crate::{
    animation::timeline::{ProgressValue, Timeline},
    foundation::core::Vec2,
    foundation::error::{ScrollyteError, ScrollyteResult},
    foundation::math::approx_eq,
};
use serde::{Deserialize, Serialize};

/// Boundary opacity observed on long-form pages where adjacent layers overlap visually.
pub const OVERLAP_FLOOR_OPACITY: f64 = 0.3;

const FRACTION_TOLERANCE: f64 = 1e-6;

/// How layers split the progress range and fade across their sub-ranges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayeredTimelineOpts {
    /// Relative sub-range widths, one per layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
    /// Explicit `[start, end]` sub-ranges, one per layer. Takes precedence over `weights`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<Vec<[f64; 2]>>,
    /// Share of each sub-range spent fading in.
    #[serde(default = "default_entry")]
    pub entry_frac: f64,
    /// Share of each sub-range held fully visible.
    #[serde(default = "default_hold")]
    pub hold_frac: f64,
    /// Share of each sub-range spent fading out.
    #[serde(default = "default_exit")]
    pub exit_frac: f64,
    /// Opacity at the outer edges of each sub-range.
    #[serde(default)]
    pub floor_opacity: f64,
    /// First layer starts fully visible and last layer ends fully visible.
    #[serde(default)]
    pub hold_edges: bool,
    /// Translation at the start of entry, easing to zero by the hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enter_offset: Option<Vec2>,
    /// Translation reached at the end of exit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_offset: Option<Vec2>,
}

fn default_entry() -> f64 {
    0.25
}

fn default_hold() -> f64 {
    0.5
}

fn default_exit() -> f64 {
    0.25
}

impl Default for LayeredTimelineOpts {
    fn default() -> Self {
        Self {
            weights: None,
            ranges: None,
            entry_frac: default_entry(),
            hold_frac: default_hold(),
            exit_frac: default_exit(),
            floor_opacity: 0.0,
            hold_edges: false,
            enter_offset: None,
            exit_offset: None,
        }
    }
}

impl LayeredTimelineOpts {
    /// Fractions must be non-negative and sum to 1; ranges or weights must match `layer_count`.
    pub fn validate(&self, layer_count: usize) -> ScrollyteResult<()> {
        let fracs = [self.entry_frac, self.hold_frac, self.exit_frac];
        if fracs.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(ScrollyteError::animation(
                "entry/hold/exit fractions must be finite and >= 0",
            ));
        }
        let sum: f64 = fracs.iter().sum();
        if !approx_eq(sum, 1.0, FRACTION_TOLERANCE) {
            return Err(ScrollyteError::animation(format!(
                "entry/hold/exit fractions must sum to 1 (got {sum})"
            )));
        }
        if !self.floor_opacity.is_finite() || !(0.0..1.0).contains(&self.floor_opacity) {
            return Err(ScrollyteError::animation("floor_opacity must be in [0, 1)"));
        }
        if let Some(ranges) = &self.ranges {
            if ranges.len() != layer_count {
                return Err(ScrollyteError::animation(format!(
                    "{} ranges given for {layer_count} layers",
                    ranges.len()
                )));
            }
            for [start, end] in ranges {
                if !(start.is_finite() && end.is_finite())
                    || *start < 0.0
                    || *end > 1.0
                    || start >= end
                {
                    return Err(ScrollyteError::animation(format!(
                        "layer range [{start}, {end}] must satisfy 0 <= start < end <= 1"
                    )));
                }
            }
        } else if let Some(weights) = &self.weights {
            if weights.len() != layer_count {
                return Err(ScrollyteError::animation(format!(
                    "{} weights given for {layer_count} layers",
                    weights.len()
                )));
            }
            if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
                return Err(ScrollyteError::animation(
                    "layer weights must be finite and > 0",
                ));
            }
        }
        for offset in [self.enter_offset, self.exit_offset].into_iter().flatten() {
            if !offset.is_finite() {
                return Err(ScrollyteError::animation("layer offsets must be finite"));
            }
        }
        Ok(())
    }

    fn sub_ranges(&self, layer_count: usize) -> Vec<[f64; 2]> {
        if let Some(ranges) = &self.ranges {
            return ranges.clone();
        }
        let weights = match &self.weights {
            Some(w) => w.clone(),
            None => vec![1.0; layer_count],
        };
        let total: f64 = weights.iter().sum();

        let mut out = Vec::with_capacity(layer_count);
        let mut acc = 0.0;
        for (i, w) in weights.iter().enumerate() {
            let start = acc / total;
            acc += w;
            // Pin the final edge so float drift never leaves a sliver past the last layer.
            let end = if i + 1 == layer_count {
                1.0
            } else {
                acc / total
            };
            out.push([start, end]);
        }
        out
    }
}

/// Where a progress value falls within one layer's sub-range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerPhase {
    /// Ahead of the sub-range.
    Before,
    /// Fading in.
    Entering,
    /// Fully visible.
    Holding,
    /// Fading out.
    Exiting,
    /// Past the sub-range.
    After,
}

impl LayerPhase {
    /// Whether the phase lies inside the sub-range.
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Before | Self::After)
    }
}

/// Per-layer timelines derived from a sub-range and the entry/hold/exit split.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerTimeline {
    /// Layer position, 0-based.
    pub index: usize,
    /// `[start, end]` sub-range of progress.
    pub range: [f64; 2],
    /// Progress at which entry gives way to hold.
    pub entry_end: f64,
    /// Progress at which hold gives way to exit.
    pub exit_start: f64,
    /// Opacity across the sub-range.
    pub opacity: Timeline<f64>,
    /// Translation across the sub-range, when offsets are configured.
    pub offset: Option<Timeline<Vec2>>,
}

impl LayerTimeline {
    /// Whether `progress` lies in the closed sub-range.
    pub fn contains(&self, progress: f64) -> bool {
        progress >= self.range[0] && progress <= self.range[1]
    }

    /// Phase at `progress`. NaN counts as before.
    pub fn phase(&self, progress: f64) -> LayerPhase {
        if progress.is_nan() || progress < self.range[0] {
            LayerPhase::Before
        } else if progress > self.range[1] {
            LayerPhase::After
        } else if progress < self.entry_end {
            LayerPhase::Entering
        } else if progress <= self.exit_start {
            LayerPhase::Holding
        } else {
            LayerPhase::Exiting
        }
    }

    /// Opacity at `progress`; exactly 0 outside the layer's sub-range.
    pub fn opacity_at(&self, progress: f64) -> f64 {
        if !self.contains(progress) {
            return 0.0;
        }
        self.opacity.sample(progress)
    }

    /// Translation at `progress`; zero without offsets.
    pub fn offset_at(&self, progress: f64) -> Vec2 {
        match &self.offset {
            Some(tl) => tl.sample(progress),
            None => Vec2::ZERO,
        }
    }
}

/// Build per-layer timelines for `layer_count` layers.
pub fn create_layered_timeline(
    layer_count: usize,
    opts: &LayeredTimelineOpts,
) -> ScrollyteResult<Vec<LayerTimeline>> {
    opts.validate(layer_count)?;

    let floor = opts.floor_opacity;
    let has_offset = opts.enter_offset.is_some() || opts.exit_offset.is_some();
    let enter_offset = opts.enter_offset.unwrap_or(Vec2::ZERO);
    let exit_offset = opts.exit_offset.unwrap_or(Vec2::ZERO);

    opts.sub_ranges(layer_count)
        .into_iter()
        .enumerate()
        .map(|(index, [start, end])| {
            let width = end - start;
            let entry_end = start + width * opts.entry_frac;
            let exit_start = start + width * (opts.entry_frac + opts.hold_frac);
            let breakpoints = [start, entry_end, exit_start, end];

            let first_value = if opts.hold_edges && index == 0 {
                1.0
            } else {
                floor
            };
            let last_value = if opts.hold_edges && index + 1 == layer_count {
                1.0
            } else {
                floor
            };

            let opacity = knots_to_timeline(breakpoints, [first_value, 1.0, 1.0, last_value])?;
            let offset = if has_offset {
                Some(knots_to_timeline(
                    breakpoints,
                    [enter_offset, Vec2::ZERO, Vec2::ZERO, exit_offset],
                )?)
            } else {
                None
            };

            Ok(LayerTimeline {
                index,
                range: [start, end],
                entry_end,
                exit_start,
                opacity,
                offset,
            })
        })
        .collect()
}

/// Opacity of every layer at `progress`, in layer order.
pub fn crossfade_at(layers: &[LayerTimeline], progress: f64) -> Vec<f64> {
    layers.iter().map(|l| l.opacity_at(progress)).collect()
}

// Zero-width phases collapse so breakpoints stay strictly increasing: a collapsed entry starts at
// the hold value, a collapsed exit ends on it.
fn knots_to_timeline<T: ProgressValue>(
    breakpoints: [f64; 4],
    values: [T; 4],
) -> ScrollyteResult<Timeline<T>> {
    let mut bs: Vec<f64> = Vec::with_capacity(4);
    let mut vs: Vec<T> = Vec::with_capacity(4);
    for (i, (b, v)) in breakpoints.into_iter().zip(values).enumerate() {
        match bs.last() {
            Some(last) if b <= *last => {
                if i < 2 {
                    if let Some(slot) = vs.last_mut() {
                        *slot = v;
                    }
                }
            }
            _ => {
                bs.push(b);
                vs.push(v);
            }
        }
    }
    Timeline::new(bs, vs)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layered.rs"]
mod tests;
