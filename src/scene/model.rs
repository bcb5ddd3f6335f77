use crate::{
    animation::index::{DEFAULT_TAIL_RESERVE, IndexSelector},
    animation::props::{PropertyTimelines, PropertyTimelinesDef},
    animation::spring::SpringConfig,
    compose::layered::{LayerTimeline, LayeredTimelineOpts, create_layered_timeline},
    foundation::core::Viewport,
    foundation::error::{ScrollyteError, ScrollyteResult},
    scroll::progress::ProgressOpts,
    scroll::spy::ScrollSpyOpts,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// JSON-facing description of a scroll-driven page.
pub struct SceneDef {
    /// Viewport the scene is authored against.
    pub viewport: Viewport,
    /// Scroll containers, each with its own progress source.
    #[serde(default)]
    pub containers: Vec<ContainerDef>,
    /// Optional scroll spy over page regions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spy: Option<SpyDef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One tall scroll container and everything driven by its progress.
pub struct ContainerDef {
    /// Stable container id, also used to look up live geometry.
    pub id: String,
    /// Start/end offsets defining progress 0 and 1.
    #[serde(default)]
    pub progress: ProgressOpts,
    /// Elements animated by this container's progress.
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    /// Optional discrete carousel driven by progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carousel: Option<CarouselDef>,
    /// Optional layered crossfade driven by progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<LayersDef>,
}

/// One animated element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementDef {
    /// Element id, echoed in evaluated output.
    pub id: String,
    /// Property timelines, all optional.
    #[serde(default)]
    pub props: PropertyTimelinesDef,
}

/// Discrete carousel over a container's progress.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarouselDef {
    /// Number of items.
    pub item_count: usize,
    /// Trailing fraction of progress that keeps the last item active.
    #[serde(default = "default_tail_reserve")]
    pub tail_reserve: f64,
    /// Spring used to smooth the carousel position. Defaults to the carousel preset.
    #[serde(default)]
    pub spring: SpringConfig,
}

fn default_tail_reserve() -> f64 {
    DEFAULT_TAIL_RESERVE
}

impl CarouselDef {
    /// Index selector for this carousel.
    pub fn selector(&self) -> IndexSelector {
        IndexSelector {
            item_count: self.item_count,
            tail_reserve: self.tail_reserve,
        }
    }
}

/// Layered crossfade over a container's progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayersDef {
    /// Number of layers.
    pub count: usize,
    /// Sub-range and fade options, flattened into this object.
    #[serde(flatten)]
    pub opts: LayeredTimelineOpts,
}

/// Scroll spy configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpyDef {
    /// Ordered region ids; the index in this list is the reported step.
    pub regions: Vec<String>,
    /// Spy windows, flattened into this object.
    #[serde(flatten)]
    pub opts: ScrollSpyOpts,
}

/// Runtime form of a [`ContainerDef`]: timelines built, layers expanded.
#[derive(Clone, Debug)]
pub struct CompiledContainer {
    /// Container id.
    pub id: String,
    /// Start/end offsets.
    pub progress: ProgressOpts,
    /// Element ids with their built timelines.
    pub elements: Vec<(String, PropertyTimelines)>,
    /// Carousel, if any.
    pub carousel: Option<CarouselDef>,
    /// Per-layer timelines; empty without layers.
    pub layers: Vec<LayerTimeline>,
}

/// A loaded scene.
///
/// Parsing never fails on malformed timelines: they compile to identity mappings with a warning.
/// Call [`Scene::validate`] to reject them up front.
#[derive(Clone, Debug)]
pub struct Scene {
    def: SceneDef,
    containers: Vec<CompiledContainer>,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollyteResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| ScrollyteError::validation(format!("parse scene JSON: {e}")))?;
        Ok(Self::from_def(def))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollyteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollyteError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Compile `def`. Malformed timelines become identity mappings.
    pub fn from_def(def: SceneDef) -> Self {
        let containers = def.containers.iter().map(compile_container).collect();
        Self { def, containers }
    }

    /// Source definition.
    pub fn def(&self) -> &SceneDef {
        &self.def
    }

    /// Authoring viewport.
    pub fn viewport(&self) -> Viewport {
        self.def.viewport
    }

    /// Compiled containers, in definition order.
    pub fn containers(&self) -> &[CompiledContainer] {
        &self.containers
    }

    /// Compiled container `id`, if present.
    pub fn container(&self, id: &str) -> Option<&CompiledContainer> {
        self.containers.iter().find(|c| c.id == id)
    }

    /// Spy configuration, if any.
    pub fn spy(&self) -> Option<&SpyDef> {
        self.def.spy.as_ref()
    }

    /// Validate scene invariants, reporting the first offending container or element.
    pub fn validate(&self) -> ScrollyteResult<()> {
        let vp = self.def.viewport;
        if !(vp.width.is_finite() && vp.height.is_finite()) || vp.width <= 0.0 || vp.height <= 0.0
        {
            return Err(ScrollyteError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }

        let mut seen = BTreeSet::new();
        for c in &self.def.containers {
            if c.id.trim().is_empty() {
                return Err(ScrollyteError::validation("container id must be non-empty"));
            }
            if !seen.insert(c.id.as_str()) {
                return Err(ScrollyteError::validation(format!(
                    "duplicate container id '{}'",
                    c.id
                )));
            }

            let mut element_ids = BTreeSet::new();
            for el in &c.elements {
                if !element_ids.insert(el.id.as_str()) {
                    return Err(ScrollyteError::validation(format!(
                        "container '{}' has duplicate element id '{}'",
                        c.id, el.id
                    )));
                }
                el.props.validate().map_err(|e| {
                    ScrollyteError::validation(format!(
                        "container '{}' element '{}': {e}",
                        c.id, el.id
                    ))
                })?;
            }

            if let Some(carousel) = &c.carousel {
                carousel
                    .selector()
                    .validate()
                    .and_then(|_| carousel.spring.validate())
                    .map_err(|e| {
                        ScrollyteError::validation(format!("container '{}' carousel: {e}", c.id))
                    })?;
            }

            if let Some(layers) = &c.layers {
                layers.opts.validate(layers.count).map_err(|e| {
                    ScrollyteError::validation(format!("container '{}' layers: {e}", c.id))
                })?;
            }
        }

        if let Some(spy) = &self.def.spy {
            if spy.regions.iter().any(|r| r.trim().is_empty()) {
                return Err(ScrollyteError::validation("spy region ids must be non-empty"));
            }
            spy.opts.validate()?;
        }

        Ok(())
    }
}

fn compile_container(def: &ContainerDef) -> CompiledContainer {
    let elements = def
        .elements
        .iter()
        .map(|el| (el.id.clone(), el.props.build_or_identity()))
        .collect();

    let layers = match &def.layers {
        Some(l) => create_layered_timeline(l.count, &l.opts).unwrap_or_else(|e| {
            tracing::warn!(container = %def.id, error = %e, "invalid layer options; layers disabled");
            Vec::new()
        }),
        None => Vec::new(),
    };

    CompiledContainer {
        id: def.id.clone(),
        progress: def.progress,
        elements,
        carousel: def.carousel,
        layers,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
