use crate::runtime::subscribers::{Subscribers, Subscription};

/// Per-frame tick fan-out. Each subscriber runs exactly once per [`FrameClock::advance`].
#[derive(Default)]
pub struct FrameClock {
    frame: u64,
    elapsed_secs: f64,
    ticks: Subscribers<f64>,
}

impl FrameClock {
    /// Clock at frame 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Sum of all advanced steps, in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Run `on_tick(dt)` on every advance.
    pub fn subscribe(&self, mut on_tick: impl FnMut(f64) + 'static) -> Subscription {
        self.ticks.subscribe(move |dt| on_tick(*dt))
    }

    /// Advance one frame of `dt` seconds. Negative or non-finite steps count as zero.
    pub fn advance(&mut self, dt: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.frame += 1;
        self.elapsed_secs += dt;
        self.ticks.notify(&dt);
    }

    /// Registered tick listeners.
    pub fn subscriber_count(&self) -> usize {
        self.ticks.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/clock.rs"]
mod tests;
