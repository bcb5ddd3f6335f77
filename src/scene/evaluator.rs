use crate::{
    animation::index::CarouselState,
    animation::props::VisualProps,
    compose::layered::LayerPhase,
    foundation::core::Vec2,
    foundation::error::{ScrollyteError, ScrollyteResult},
    foundation::math::clamp01,
    scene::model::{CompiledContainer, Scene},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Progress per container, with a fallback for containers not listed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressMap {
    fallback: f64,
    by_container: BTreeMap<String, f64>,
}

impl ProgressMap {
    /// Every container at the same progress.
    pub fn uniform(progress: f64) -> Self {
        Self {
            fallback: progress,
            by_container: BTreeMap::new(),
        }
    }

    /// Builder form of [`ProgressMap::set`].
    pub fn with(mut self, container: impl Into<String>, progress: f64) -> Self {
        self.set(container, progress);
        self
    }

    /// Pin `container` to `progress`.
    pub fn set(&mut self, container: impl Into<String>, progress: f64) {
        self.by_container.insert(container.into(), progress);
    }

    /// Progress for `container`, or the fallback.
    pub fn get(&self, container: &str) -> f64 {
        self.by_container
            .get(container)
            .copied()
            .unwrap_or(self.fallback)
    }

    fn explicit_ids(&self) -> impl Iterator<Item = &str> {
        self.by_container.keys().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Every derived value of a scene at one set of progress values.
pub struct EvaluatedScene {
    /// Containers, in scene order.
    pub containers: Vec<EvaluatedContainer>,
}

impl EvaluatedScene {
    /// Evaluated container `id`, if present.
    pub fn container(&self, id: &str) -> Option<&EvaluatedContainer> {
        self.containers.iter().find(|c| c.id == id)
    }
}

/// Derived state of one container.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluatedContainer {
    /// Container id.
    pub id: String,
    /// Progress in `[0, 1]` the container was evaluated at.
    pub progress: f64,
    /// Sampled elements, in definition order.
    pub elements: Vec<EvaluatedElement>,
    /// Carousel selection, if the container has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel: Option<EvaluatedCarousel>,
    /// Layer crossfade values, in layer order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<EvaluatedLayer>,
}

/// Sampled properties of one element.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluatedElement {
    /// Element id.
    pub id: String,
    /// Properties at the container's progress.
    pub props: VisualProps,
}

/// Carousel selection at one progress.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EvaluatedCarousel {
    /// Number of items.
    pub item_count: usize,
    /// Selected item index.
    pub active: usize,
    /// Unrounded position in `[0, item_count - 1]`; the spring target.
    pub position: f64,
}

/// One layer at one progress.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EvaluatedLayer {
    /// Layer position, 0-based.
    pub index: usize,
    /// Opacity; 0 outside the layer's sub-range.
    pub opacity: f64,
    /// Translation.
    pub offset: Vec2,
    /// Phase within the sub-range.
    pub phase: LayerPhase,
}

/// Stateless evaluator from scene + progress values to derived visual state.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(scene, progress))]
    /// Evaluate every container of `scene`.
    ///
    /// Fails when `progress` names a container the scene does not have, or carries a
    /// non-finite value.
    pub fn eval(scene: &Scene, progress: &ProgressMap) -> ScrollyteResult<EvaluatedScene> {
        for id in progress.explicit_ids() {
            if scene.container(id).is_none() {
                return Err(ScrollyteError::evaluation(format!(
                    "progress given for unknown container '{id}'"
                )));
            }
        }

        let containers = scene
            .containers()
            .iter()
            .map(|c| {
                let p = progress.get(&c.id);
                if !p.is_finite() {
                    return Err(ScrollyteError::evaluation(format!(
                        "progress for container '{}' must be finite",
                        c.id
                    )));
                }
                Ok(Self::eval_container(c, p))
            })
            .collect::<ScrollyteResult<Vec<_>>>()?;

        Ok(EvaluatedScene { containers })
    }

    /// Evaluate one container. Progress is clamped into `[0, 1]`.
    pub fn eval_container(container: &CompiledContainer, progress: f64) -> EvaluatedContainer {
        let p = clamp01(progress);

        let elements = container
            .elements
            .iter()
            .map(|(id, timelines)| EvaluatedElement {
                id: id.clone(),
                props: timelines.sample(p),
            })
            .collect();

        let carousel = container.carousel.map(|def| {
            let selector = def.selector();
            let state = CarouselState::from_progress(&selector, p);
            EvaluatedCarousel {
                item_count: state.item_count,
                active: state.active,
                position: selector.position(p),
            }
        });

        let layers = container
            .layers
            .iter()
            .map(|layer| EvaluatedLayer {
                index: layer.index,
                opacity: layer.opacity_at(p),
                offset: layer.offset_at(p),
                phase: layer.phase(p),
            })
            .collect();

        EvaluatedContainer {
            id: container.id.clone(),
            progress: p,
            elements,
            carousel,
            layers,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/evaluator.rs"]
mod tests;
