use crate::{
    foundation::core::{Rect, Viewport},
    foundation::math::{GEOMETRY_EPSILON, clamp01},
    runtime::subscribers::{Subscribers, Subscription},
    scroll::offset::ScrollOffset,
};
use serde::{Deserialize, Serialize};

/// Live geometry of a scroll container, viewport-relative (like `getBoundingClientRect`).
pub trait ContainerGeometry {
    /// `None` while the container is not mounted.
    fn bounding_rect(&self) -> Option<Rect>;
}

impl ContainerGeometry for Rect {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl ContainerGeometry for Option<Rect> {
    fn bounding_rect(&self) -> Option<Rect> {
        *self
    }
}

/// Where progress 0 and progress 1 happen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressOpts {
    /// Alignment at progress 0; defaults to `start end`.
    #[serde(default = "ScrollOffset::enter")]
    pub start: ScrollOffset,
    /// Alignment at progress 1; defaults to `end start`.
    #[serde(default = "ScrollOffset::exit")]
    pub end: ScrollOffset,
}

impl Default for ProgressOpts {
    fn default() -> Self {
        Self {
            start: ScrollOffset::enter(),
            end: ScrollOffset::exit(),
        }
    }
}

/// Progress for one geometry sample, or `None` when the geometry cannot define one
/// (unmounted, zero-height, non-finite, or offsets that collapse the range).
pub fn compute_progress(rect: Rect, viewport: Viewport, opts: &ProgressOpts) -> Option<f64> {
    let height = rect.height();
    if !(rect.y0.is_finite() && height.is_finite()) || height < GEOMETRY_EPSILON {
        return None;
    }
    let top_at_start = opts.start.container_top_at(height, viewport.height);
    let top_at_end = opts.end.container_top_at(height, viewport.height);
    let span = top_at_start - top_at_end;
    if !span.is_finite() || span.abs() < GEOMETRY_EPSILON {
        return None;
    }
    Some(clamp01((top_at_start - rect.y0) / span))
}

/// Normalized scroll progress of one container, recomputed from live geometry every tick.
///
/// The only retained state is the last emitted value, which is held whenever the geometry is
/// unavailable.
pub struct ProgressSource {
    opts: ProgressOpts,
    last: f64,
    listeners: Subscribers<f64>,
}

impl ProgressSource {
    /// Source at progress 0.
    pub fn new(opts: ProgressOpts) -> Self {
        Self {
            opts,
            last: 0.0,
            listeners: Subscribers::new(),
        }
    }

    /// Offset configuration.
    pub fn opts(&self) -> &ProgressOpts {
        &self.opts
    }

    /// Last computed progress, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.last
    }

    /// Measure only: compute progress for `container` without notifying anyone.
    pub fn measure(&self, container: &impl ContainerGeometry, viewport: Viewport) -> f64 {
        container
            .bounding_rect()
            .and_then(|rect| compute_progress(rect, viewport, &self.opts))
            .unwrap_or(self.last)
    }

    /// Recompute from `container` and notify subscribers when the value changed.
    pub fn update(&mut self, container: &impl ContainerGeometry, viewport: Viewport) -> f64 {
        let next = self.measure(container, viewport);
        self.commit(next)
    }

    /// Store an already-measured value and notify on change. Values are clamped into `[0, 1]`.
    pub fn commit(&mut self, progress: f64) -> f64 {
        let next = clamp01(progress);
        if next != self.last {
            self.last = next;
            self.listeners.notify(&next);
        } else {
            tracing::trace!(progress = next, "progress unchanged");
        }
        self.last
    }

    /// Listen to committed changes.
    pub fn subscribe(&self, mut listener: impl FnMut(f64) + 'static) -> Subscription {
        self.listeners.subscribe(move |p| listener(*p))
    }
}

impl std::fmt::Debug for ProgressSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSource")
            .field("opts", &self.opts)
            .field("last", &self.last)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
