use crate::foundation::core::Vec2;
use crate::foundation::error::{ScrollyteError, ScrollyteResult};
use serde::{Deserialize, Serialize};

/// Longest frame step integrated in one tick, in seconds.
///
/// Longer gaps (background tabs, debugger pauses) are integrated as this step, so a resumed tab
/// does not teleport the spring.
pub const MAX_STEP_SECS: f64 = 1.0 / 30.0;

// Upper bound on integration substeps per tick.
const MAX_SUBSTEPS: usize = 1024;

/// Spring constants. `mass` defaults to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Spring constant `k`.
    pub stiffness: f64,
    /// Damping coefficient `c`.
    pub damping: f64,
    /// Mass `m`.
    #[serde(default = "one")]
    pub mass: f64,
}

fn one() -> f64 {
    1.0
}

impl SpringConfig {
    /// Validated config at unit mass.
    pub fn new(stiffness: f64, damping: f64) -> ScrollyteResult<Self> {
        let cfg = Self {
            stiffness,
            damping,
            mass: 1.0,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Critically damped config (damping ratio exactly 1) for `stiffness` at unit mass.
    pub fn critical(stiffness: f64) -> Self {
        let stiffness = stiffness.max(0.0);
        Self {
            stiffness,
            damping: 2.0 * stiffness.sqrt(),
            mass: 1.0,
        }
    }

    /// Carousel centering: unhurried, no overshoot.
    pub fn carousel() -> Self {
        Self::critical(170.0)
    }

    /// Cursor and drag following: fast and tight.
    pub fn cursor() -> Self {
        Self::critical(400.0)
    }

    /// Radial reveal growth for theme transitions: slow start, slightly over-damped.
    pub fn radial_reveal() -> Self {
        Self {
            stiffness: 120.0,
            damping: 24.0,
            mass: 1.0,
        }
    }

    /// Stiffness and mass must be finite and positive, damping finite and non-negative.
    pub fn validate(&self) -> ScrollyteResult<()> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(ScrollyteError::animation("spring stiffness must be > 0"));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(ScrollyteError::animation("spring damping must be >= 0"));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ScrollyteError::animation("spring mass must be > 0"));
        }
        Ok(())
    }

    /// `c / (2 * sqrt(k * m))`; 1 is critical, above 1 is over-damped.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::carousel()
    }
}

/// One-dimensional damped spring following a target value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
}

impl Spring {
    /// Spring at rest at `initial`.
    pub fn new(initial: f64, config: SpringConfig) -> ScrollyteResult<Self> {
        config.validate()?;
        Ok(Self {
            value: initial,
            velocity: 0.0,
            target: initial,
            config,
        })
    }

    /// Current position.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity, units per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Position the spring is pulled toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Spring constants.
    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Non-finite targets are ignored.
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Jump to `value` at rest.
    pub fn snap_to(&mut self, value: f64) {
        if value.is_finite() {
            self.value = value;
            self.target = value;
            self.velocity = 0.0;
        }
    }

    /// Integrate one frame of `dt` seconds and return the new value.
    ///
    /// Semi-implicit Euler: velocity first, then position with the updated velocity. The frame is
    /// split into substeps short enough that `h * c / m <= 1` and `h * sqrt(k / m) <= 1`, so any
    /// valid config converges at any frame rate.
    pub fn tick(&mut self, dt: f64) -> f64 {
        if !(dt.is_finite() && dt > 0.0) {
            return self.value;
        }
        let dt = dt.min(MAX_STEP_SECS);
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;

        let rate = (damping / mass).max((stiffness / mass).sqrt());
        let steps = (dt * rate).ceil().clamp(1.0, MAX_SUBSTEPS as f64) as usize;
        let h = dt / steps as f64;
        for _ in 0..steps {
            let accel = (stiffness * (self.target - self.value) - damping * self.velocity) / mass;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }
        self.value
    }

    /// Within `eps` of the target and moving slower than `eps`.
    pub fn is_settled(&self, eps: f64) -> bool {
        (self.target - self.value).abs() < eps && self.velocity.abs() < eps
    }
}

/// Two independent springs sharing one config, for 2-D following.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Spring2 {
    x: Spring,
    y: Spring,
}

impl Spring2 {
    /// Spring pair at rest at `initial`.
    pub fn new(initial: Vec2, config: SpringConfig) -> ScrollyteResult<Self> {
        Ok(Self {
            x: Spring::new(initial.x, config)?,
            y: Spring::new(initial.y, config)?,
        })
    }

    /// Current position.
    pub fn value(&self) -> Vec2 {
        Vec2::new(self.x.value(), self.y.value())
    }

    /// Non-finite components are ignored.
    pub fn set_target(&mut self, target: Vec2) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    /// Jump to `value` at rest.
    pub fn snap_to(&mut self, value: Vec2) {
        self.x.snap_to(value.x);
        self.y.snap_to(value.y);
    }

    /// Integrate both axes; see [`Spring::tick`].
    pub fn tick(&mut self, dt: f64) -> Vec2 {
        Vec2::new(self.x.tick(dt), self.y.tick(dt))
    }

    /// Both axes settled.
    pub fn is_settled(&self, eps: f64) -> bool {
        self.x.is_settled(eps) && self.y.is_settled(eps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
