use crate::{
    animation::index::{CarouselState, IndexSelector},
    animation::spring::{Spring, SpringConfig},
    foundation::core::{Rect, Viewport},
    foundation::error::{ScrollyteError, ScrollyteResult},
    runtime::clock::FrameClock,
    runtime::subscribers::{Subscribers, Subscription},
    scene::evaluator::{EvaluatedScene, Evaluator, ProgressMap},
    scene::model::Scene,
    scroll::progress::ProgressSource,
    scroll::spy::{LookupFn, RegionLookup, ScrollSpy, SpyState},
};
use serde::Serialize;
use std::collections::HashMap;

/// Position tolerance under which a carousel spring counts as settled.
pub const SETTLE_EPSILON: f64 = 1e-3;

/// Live page geometry for one frame, viewport-relative.
pub trait GeometrySource {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// `None` while the container is not mounted.
    fn container_rect(&self, id: &str) -> Option<Rect>;

    /// Spy regions share the container lookup unless overridden.
    fn region_rect(&self, id: &str) -> Option<Rect> {
        self.container_rect(id)
    }
}

/// Owned geometry snapshot, keyed by container or region id.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometrySnapshot {
    /// Viewport for this frame.
    pub viewport: Viewport,
    /// Rects by container or region id.
    pub rects: HashMap<String, Rect>,
}

impl GeometrySnapshot {
    /// Snapshot with no rects.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rects: HashMap::new(),
        }
    }

    /// Add or replace the rect for `id`.
    pub fn with_rect(mut self, id: impl Into<String>, rect: Rect) -> Self {
        self.rects.insert(id.into(), rect);
        self
    }
}

impl GeometrySource for GeometrySnapshot {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn container_rect(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }
}

impl RegionLookup for GeometrySnapshot {
    fn region_rect(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Spring-smoothed carousel position for one frame.
pub struct SmoothedCarousel {
    /// Container id.
    pub container: String,
    /// Discrete active index.
    pub active: usize,
    /// Unrounded position the spring is pulled toward.
    pub target: f64,
    /// Smoothed position.
    pub value: f64,
    /// Whether the spring is at rest within [`SETTLE_EPSILON`].
    pub settled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Everything derived during one [`PageSession::frame`].
pub struct FrameOutput {
    /// Frame index after this frame.
    pub frame: u64,
    /// Evaluated scene at this frame's progress.
    pub scene: EvaluatedScene,
    /// Smoothed carousel positions, in container order.
    pub carousels: Vec<SmoothedCarousel>,
    /// Committed spy state; absent without a spy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spy: Option<SpyState>,
}

struct ContainerRuntime {
    id: String,
    source: ProgressSource,
    carousel: Option<CarouselRuntime>,
}

struct CarouselRuntime {
    selector: IndexSelector,
    spring: Spring,
    state: CarouselState,
    listeners: Subscribers<usize>,
}

impl CarouselRuntime {
    fn new(selector: IndexSelector, config: SpringConfig) -> ScrollyteResult<Self> {
        Ok(Self {
            selector,
            spring: Spring::new(0.0, config)?,
            state: CarouselState::from_progress(&selector, 0.0),
            listeners: Subscribers::new(),
        })
    }
}

/// Long-lived runtime for one page: owns every progress source, carousel spring and the optional
/// scroll spy, and advances them together once per animation frame.
///
/// Each frame first reads all geometry, then derives values, then notifies subscribers, so
/// listeners never observe a half-updated page.
pub struct PageSession {
    scene: Scene,
    containers: Vec<ContainerRuntime>,
    spy: Option<ScrollSpy>,
    clock: FrameClock,
}

impl PageSession {
    /// Construct a session for `scene`. The scene is validated first.
    pub fn new(scene: Scene) -> ScrollyteResult<Self> {
        scene.validate()?;

        let containers = scene
            .containers()
            .iter()
            .map(|c| {
                Ok(ContainerRuntime {
                    id: c.id.clone(),
                    source: ProgressSource::new(c.progress),
                    carousel: c
                        .carousel
                        .map(|def| CarouselRuntime::new(def.selector(), def.spring))
                        .transpose()?,
                })
            })
            .collect::<ScrollyteResult<Vec<_>>>()?;

        let spy = scene
            .spy()
            .map(|def| ScrollSpy::new(def.regions.clone(), def.opts))
            .transpose()?;

        Ok(Self {
            scene,
            containers,
            spy,
            clock: FrameClock::new(),
        })
    }

    /// Scene driving this session.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Frames advanced so far.
    pub fn frame_index(&self) -> u64 {
        self.clock.frame()
    }

    /// Last committed progress of `container`.
    pub fn progress(&self, container: &str) -> Option<f64> {
        self.runtime(container).map(|c| c.source.progress())
    }

    /// Committed spy state, if the scene has a spy.
    pub fn spy_state(&self) -> Option<SpyState> {
        self.spy.as_ref().map(ScrollSpy::state)
    }

    /// Advance one animation frame of `dt` seconds against live geometry.
    #[tracing::instrument(skip(self, geometry))]
    pub fn frame(&mut self, geometry: &impl GeometrySource, dt: f64) -> FrameOutput {
        // Read: every measurement happens before any state is written or any listener runs.
        let viewport = geometry.viewport();
        let measured: Vec<f64> = self
            .containers
            .iter()
            .map(|c| c.source.measure(&geometry.container_rect(&c.id), viewport))
            .collect();
        let spy_next = self.spy.as_ref().map(|spy| {
            let lookup = LookupFn(|id: &str| geometry.region_rect(id));
            spy.evaluate(&lookup, viewport)
        });

        // Derive.
        let mut progress = ProgressMap::default();
        let mut index_changes = Vec::new();
        for (i, (c, p)) in self.containers.iter_mut().zip(&measured).enumerate() {
            progress.set(c.id.clone(), *p);
            if let Some(carousel) = c.carousel.as_mut() {
                let next = CarouselState::from_progress(&carousel.selector, *p);
                if next != carousel.state {
                    carousel.state = next;
                    index_changes.push((i, next.active));
                }
                carousel.spring.set_target(carousel.selector.position(*p));
                carousel.spring.tick(dt);
            }
        }
        let scene = match Evaluator::eval(&self.scene, &progress) {
            Ok(scene) => scene,
            Err(e) => {
                tracing::warn!(error = %e, "frame evaluation failed; emitting empty scene");
                EvaluatedScene {
                    containers: Vec::new(),
                }
            }
        };

        // Notify.
        for (c, p) in self.containers.iter_mut().zip(&measured) {
            c.source.commit(*p);
        }
        for (i, active) in index_changes {
            let c = &self.containers[i];
            tracing::debug!(container = %c.id, active, "carousel index changed");
            if let Some(carousel) = &c.carousel {
                carousel.listeners.notify(&active);
            }
        }
        if let (Some(spy), Some(next)) = (self.spy.as_mut(), spy_next) {
            spy.commit(next);
        }
        self.clock.advance(dt);

        let carousels = self
            .containers
            .iter()
            .filter_map(|c| {
                c.carousel.as_ref().map(|carousel| SmoothedCarousel {
                    container: c.id.clone(),
                    active: carousel.state.active,
                    target: carousel.spring.target(),
                    value: carousel.spring.value(),
                    settled: carousel.spring.is_settled(SETTLE_EPSILON),
                })
            })
            .collect();

        FrameOutput {
            frame: self.clock.frame(),
            scene,
            carousels,
            spy: self.spy_state(),
        }
    }

    /// Listen to progress changes of one container.
    pub fn subscribe_progress(
        &self,
        container: &str,
        listener: impl FnMut(f64) + 'static,
    ) -> ScrollyteResult<Subscription> {
        let c = self.runtime(container).ok_or_else(|| unknown(container))?;
        Ok(c.source.subscribe(listener))
    }

    /// Listen to discrete active-index changes of one carousel.
    pub fn subscribe_active_index(
        &self,
        container: &str,
        mut listener: impl FnMut(usize) + 'static,
    ) -> ScrollyteResult<Subscription> {
        let carousel = self
            .runtime(container)
            .ok_or_else(|| unknown(container))?
            .carousel
            .as_ref()
            .ok_or_else(|| {
                ScrollyteError::validation(format!("container '{container}' has no carousel"))
            })?;
        Ok(carousel.listeners.subscribe(move |i| listener(*i)))
    }

    /// Listen to scroll spy step changes. `None` when the scene has no spy.
    pub fn subscribe_spy(
        &self,
        listener: impl FnMut(Option<usize>) + 'static,
    ) -> Option<Subscription> {
        self.spy.as_ref().map(|spy| spy.subscribe(listener))
    }

    /// Run `on_tick(dt)` once per frame, after all other notifications.
    pub fn subscribe_tick(&self, on_tick: impl FnMut(f64) + 'static) -> Subscription {
        self.clock.subscribe(on_tick)
    }

    fn runtime(&self, container: &str) -> Option<&ContainerRuntime> {
        self.containers.iter().find(|c| c.id == container)
    }
}

fn unknown(container: &str) -> ScrollyteError {
    ScrollyteError::validation(format!("unknown container '{container}'"))
}

impl std::fmt::Debug for PageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSession")
            .field("containers", &self.containers.len())
            .field("spy", &self.spy_state())
            .field("frame", &self.clock.frame())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/page_session.rs"]
mod tests;
