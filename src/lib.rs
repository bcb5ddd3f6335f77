//! Scrollyte turns scroll position into animation state.
//!
//! A page declares tall scroll containers. Each container gets a normalized progress in `[0, 1]`
//! recomputed from live geometry every frame, and everything visual is a pure function of that
//! progress: property timelines, discrete carousel indices, layered crossfades. Springs smooth
//! the discrete parts, and a scroll spy reports which region sits in the middle of the viewport.
//!
//! # Pipeline overview
//!
//! 1. **Measure**: container geometry + viewport -> progress ([`ProgressSource`])
//! 2. **Map**: progress -> visual values ([`Timeline`], [`IndexSelector`], [`LayerTimeline`])
//! 3. **Smooth**: discrete targets -> continuous motion ([`Spring`])
//! 4. **Notify**: subscribers hear changes once per frame, after every value is derived
//!    ([`PageSession`])
//!
//! Scenes can be described as JSON ([`Scene`]) and evaluated statelessly for any set of progress
//! values ([`Evaluator`]).
//!
//! Per-frame paths never fail: missing geometry holds the last value and malformed timelines
//! degrade to identity mappings with a warning. Errors surface only at load and construction time.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod compose;
mod foundation;
mod runtime;
mod scene;
mod scroll;
mod session;

pub use animation::ease::Ease;
pub use animation::index::{
    CarouselState, DEFAULT_TAIL_RESERVE, IndexSelector, item_progress, select_index,
};
pub use animation::props::{PropertyTimelines, PropertyTimelinesDef, VisualProps};
pub use animation::spring::{MAX_STEP_SECS, Spring, Spring2, SpringConfig};
pub use animation::timeline::{Lerp, ProgressValue, Timeline, TimelineDef, interpolate};
pub use compose::layered::{
    LayerPhase, LayerTimeline, LayeredTimelineOpts, OVERLAP_FLOOR_OPACITY,
    create_layered_timeline, crossfade_at,
};
pub use foundation::core::{Rect, Rgba8, Vec2, Viewport};
pub use foundation::error::{ScrollyteError, ScrollyteResult};
pub use foundation::math::{GEOMETRY_EPSILON, clamp01, inverse_lerp};
pub use runtime::clock::FrameClock;
pub use runtime::subscribers::{Subscribers, Subscription};
pub use scene::evaluator::{
    EvaluatedCarousel, EvaluatedContainer, EvaluatedElement, EvaluatedLayer, EvaluatedScene,
    Evaluator, ProgressMap,
};
pub use scene::model::{
    CarouselDef, CompiledContainer, ContainerDef, ElementDef, LayersDef, Scene, SceneDef, SpyDef,
};
pub use scroll::offset::{Anchor, ScrollOffset};
pub use scroll::progress::{ContainerGeometry, ProgressOpts, ProgressSource, compute_progress};
pub use scroll::spy::{LookupFn, RegionLookup, ScrollSpy, ScrollSpyOpts, SpyState};
pub use session::page_session::{
    FrameOutput, GeometrySnapshot, GeometrySource, PageSession, SETTLE_EPSILON, SmoothedCarousel,
};
