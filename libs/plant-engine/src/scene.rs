//! # Scene
//!
//! An ordered collection of components. Order carries no meaning beyond
//! export order. Degenerate requests arrive as `None` and are dropped here.

use glam::DVec3;
use plant_mesh::{Component, ComponentKind, Mesh};
use tracing::debug;

use crate::error::EngineError;

/// Components of one plant model.
///
/// # Example
///
/// ```rust
/// use plant_engine::Scene;
/// use plant_mesh::{ComponentKind, ComponentLibrary};
/// use glam::DVec3;
///
/// let library = ComponentLibrary::default();
/// let mut scene = Scene::new();
/// scene.add(library.pipe(DVec3::ZERO, DVec3::ZERO, 1.0));
/// scene.add(library.pipe(DVec3::ZERO, DVec3::X, 1.0));
/// assert_eq!(scene.count(ComponentKind::Pipe), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    components: Vec<Component>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component if present. Returns whether one was added.
    pub fn add(&mut self, component: Option<Component>) -> bool {
        match component {
            Some(component) => {
                self.components.push(component);
                true
            }
            None => {
                debug!("scene skipped a missing component");
                false
            }
        }
    }

    pub fn extend(&mut self, components: impl IntoIterator<Item = Component>) {
        self.components.extend(components);
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of components of one kind.
    pub fn count(&self, kind: ComponentKind) -> usize {
        self.components.iter().filter(|c| c.kind() == kind).count()
    }

    /// First component carrying `label`.
    pub fn find(&self, label: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.label() == label)
    }

    /// Components whose label starts with `prefix`.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Component> {
        self.components
            .iter()
            .filter(move |c| c.label().starts_with(prefix))
    }

    /// All component meshes concatenated into one solid.
    pub fn merged(&self) -> Result<Mesh, EngineError> {
        Ok(Mesh::concatenate(self.components.iter().map(Component::mesh))?)
    }

    /// Area-weighted centroid of the merged solid.
    pub fn centroid(&self) -> Result<DVec3, EngineError> {
        Ok(self.merged()?.centroid())
    }

    /// Returns the scene translated so its centroid sits at the origin.
    pub fn centered(self) -> Result<Self, EngineError> {
        let centroid = self.centroid()?;
        debug!(?centroid, "centering scene");
        Ok(self.translated(-centroid))
    }

    pub fn translated(self, offset: DVec3) -> Self {
        Self {
            components: self
                .components
                .into_iter()
                .map(|c| c.translated(offset))
                .collect(),
        }
    }

    /// Bounds of every component, or `None` for an empty scene.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        self.components
            .iter()
            .filter(|c| !c.mesh().is_empty())
            .map(|c| c.mesh().bounding_box())
            .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
    }
}

impl FromIterator<Component> for Scene {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}
