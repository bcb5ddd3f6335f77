use crate::{
    foundation::core::{Rect, Viewport},
    foundation::error::{ScrollyteError, ScrollyteResult},
    runtime::subscribers::{Subscribers, Subscription},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Resolves region ids to live viewport-relative geometry. Missing regions return `None`.
pub trait RegionLookup {
    /// Viewport-relative rect of region `id`, if mounted.
    fn region_rect(&self, id: &str) -> Option<Rect>;
}

impl RegionLookup for HashMap<String, Rect> {
    fn region_rect(&self, id: &str) -> Option<Rect> {
        self.get(id).copied()
    }
}

impl RegionLookup for BTreeMap<String, Rect> {
    fn region_rect(&self, id: &str) -> Option<Rect> {
        self.get(id).copied()
    }
}

/// Adapts a closure into a [`RegionLookup`].
pub struct LookupFn<F>(pub F);

impl<F> RegionLookup for LookupFn<F>
where
    F: Fn(&str) -> Option<Rect>,
{
    fn region_rect(&self, id: &str) -> Option<Rect> {
        (self.0)(id)
    }
}

/// Scroll spy output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpyState {
    /// The region group is outside the visibility range.
    #[default]
    Hidden,
    /// Region at this index is active.
    Active(usize),
}

impl SpyState {
    /// Active index, `None` when hidden.
    pub fn step(self) -> Option<usize> {
        match self {
            Self::Hidden => None,
            Self::Active(i) => Some(i),
        }
    }
}

/// Scroll spy windows, as fractions of the viewport height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollSpyOpts {
    /// Height of the centered active window as a fraction of the viewport.
    #[serde(default = "default_active_window")]
    pub active_window_fraction: f64,
    /// Top of the visibility range as a fraction of the viewport height.
    #[serde(default)]
    pub visibility_top: f64,
    /// Bottom of the visibility range as a fraction of the viewport height.
    #[serde(default = "default_visibility_bottom")]
    pub visibility_bottom: f64,
}

fn default_active_window() -> f64 {
    0.2
}

fn default_visibility_bottom() -> f64 {
    1.0
}

impl Default for ScrollSpyOpts {
    fn default() -> Self {
        Self {
            active_window_fraction: default_active_window(),
            visibility_top: 0.0,
            visibility_bottom: default_visibility_bottom(),
        }
    }
}

impl ScrollSpyOpts {
    /// Fractions must lie in `[0, 1]` with `visibility_top < visibility_bottom`.
    pub fn validate(&self) -> ScrollyteResult<()> {
        let in01 = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in01(self.active_window_fraction) {
            return Err(ScrollyteError::validation(
                "active_window_fraction must be in [0, 1]",
            ));
        }
        if !in01(self.visibility_top)
            || !in01(self.visibility_bottom)
            || self.visibility_top >= self.visibility_bottom
        {
            return Err(ScrollyteError::validation(
                "visibility range must satisfy 0 <= top < bottom <= 1",
            ));
        }
        Ok(())
    }
}

/// Tracks which of an ordered set of regions sits in the middle of the viewport.
pub struct ScrollSpy {
    region_ids: Vec<String>,
    opts: ScrollSpyOpts,
    state: SpyState,
    listeners: Subscribers<Option<usize>>,
}

impl ScrollSpy {
    /// Spy over `region_ids` in page order, starting hidden.
    pub fn new(region_ids: Vec<String>, opts: ScrollSpyOpts) -> ScrollyteResult<Self> {
        opts.validate()?;
        Ok(Self {
            region_ids,
            opts,
            state: SpyState::Hidden,
            listeners: Subscribers::new(),
        })
    }

    /// Tracked regions, in page order.
    pub fn region_ids(&self) -> &[String] {
        &self.region_ids
    }

    /// Last committed state.
    pub fn state(&self) -> SpyState {
        self.state
    }

    /// Compute the next state from current geometry without storing it.
    ///
    /// The group is hidden once its combined extent leaves the visibility range. Otherwise the
    /// last region whose vertical center lies in the active window wins; with no qualifying
    /// region the previous state is kept.
    pub fn evaluate(&self, lookup: &impl RegionLookup, viewport: Viewport) -> SpyState {
        let mut group: Option<(f64, f64)> = None;
        let mut hit = None;
        let (win_top, win_bottom) = viewport.centered_band(self.opts.active_window_fraction);

        for (i, id) in self.region_ids.iter().enumerate() {
            let Some(rect) = lookup.region_rect(id) else {
                tracing::trace!(region = %id, "scroll spy region not found; skipping");
                continue;
            };
            group = Some(match group {
                None => (rect.y0, rect.y1),
                Some((top, bottom)) => (top.min(rect.y0), bottom.max(rect.y1)),
            });
            let center = rect.center().y;
            if center >= win_top && center <= win_bottom {
                hit = Some(i);
            }
        }

        let Some((group_top, group_bottom)) = group else {
            return SpyState::Hidden;
        };
        let vis_top = viewport.height * self.opts.visibility_top;
        let vis_bottom = viewport.height * self.opts.visibility_bottom;
        if group_bottom <= vis_top || group_top >= vis_bottom {
            return SpyState::Hidden;
        }

        match hit {
            Some(i) => SpyState::Active(i),
            None => self.state,
        }
    }

    /// Recompute and notify subscribers when the state changes.
    pub fn update(&mut self, lookup: &impl RegionLookup, viewport: Viewport) -> SpyState {
        let next = self.evaluate(lookup, viewport);
        self.commit(next)
    }

    /// Store an already-evaluated state and notify on change.
    pub fn commit(&mut self, next: SpyState) -> SpyState {
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "scroll spy transition");
            self.state = next;
            self.listeners.notify(&next.step());
        }
        self.state
    }

    /// Listen to step changes; `None` means hidden.
    pub fn subscribe(&self, mut listener: impl FnMut(Option<usize>) + 'static) -> Subscription {
        self.listeners.subscribe(move |step| listener(*step))
    }
}

impl std::fmt::Debug for ScrollSpy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSpy")
            .field("region_ids", &self.region_ids)
            .field("opts", &self.opts)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/spy.rs"]
mod tests;
