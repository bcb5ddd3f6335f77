use crate::foundation::error::{ScrollyteError, ScrollyteResult};
use crate::foundation::math::clamp01;
use serde::{Deserialize, Serialize};

/// Default fraction of scroll distance held back so the last item settles before the range ends.
pub const DEFAULT_TAIL_RESERVE: f64 = 0.15;

/// Continuous carousel position in `[0, item_count - 1]` (unrounded).
pub fn item_progress(progress: f64, item_count: usize, tail_reserve: f64) -> f64 {
    if item_count <= 1 {
        return 0.0;
    }
    let usable = 1.0 - tail_reserve.clamp(0.0, 1.0);
    let adjusted = if usable <= 0.0 {
        1.0
    } else {
        (clamp01(progress) / usable).min(1.0)
    };
    adjusted * (item_count - 1) as f64
}

/// Quantize progress into a discrete active index over `item_count` items.
///
/// The last `tail_reserve` fraction of progress keeps the final item selected. Counts of 0 or 1
/// always select index 0.
pub fn select_index(progress: f64, item_count: usize, tail_reserve: f64) -> usize {
    if item_count <= 1 {
        return 0;
    }
    let idx = item_progress(progress, item_count, tail_reserve).round();
    (idx.max(0.0) as usize).min(item_count - 1)
}

/// Validated index selection configuration for one carousel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexSelector {
    /// Number of carousel items.
    pub item_count: usize,
    /// Trailing fraction of progress that keeps the last item active.
    #[serde(default = "default_tail_reserve")]
    pub tail_reserve: f64,
}

fn default_tail_reserve() -> f64 {
    DEFAULT_TAIL_RESERVE
}

impl IndexSelector {
    /// Validated selector.
    pub fn new(item_count: usize, tail_reserve: f64) -> ScrollyteResult<Self> {
        let sel = Self {
            item_count,
            tail_reserve,
        };
        sel.validate()?;
        Ok(sel)
    }

    /// `tail_reserve` must be finite and in `[0, 1)`.
    pub fn validate(&self) -> ScrollyteResult<()> {
        if !self.tail_reserve.is_finite() || !(0.0..1.0).contains(&self.tail_reserve) {
            return Err(ScrollyteError::validation(
                "tail_reserve must be finite and in [0, 1)",
            ));
        }
        Ok(())
    }

    /// Active index at `progress`. See [`select_index`].
    pub fn select(&self, progress: f64) -> usize {
        select_index(progress, self.item_count, self.tail_reserve)
    }

    /// Unrounded position at `progress`, the target for a smoothing spring.
    pub fn position(&self, progress: f64) -> f64 {
        item_progress(progress, self.item_count, self.tail_reserve)
    }
}

/// Active carousel item, derived from progress on every tick and never mutated in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CarouselState {
    /// Number of carousel items.
    pub item_count: usize,
    /// Selected item index.
    pub active: usize,
}

impl CarouselState {
    /// Derive the state for `progress`.
    pub fn from_progress(selector: &IndexSelector, progress: f64) -> Self {
        Self {
            item_count: selector.item_count,
            active: selector.select(progress),
        }
    }

    /// Whether the first item is active.
    pub fn is_first(&self) -> bool {
        self.active == 0
    }

    /// Whether the last item is active.
    pub fn is_last(&self) -> bool {
        self.active + 1 >= self.item_count
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/index.rs"]
mod tests;
