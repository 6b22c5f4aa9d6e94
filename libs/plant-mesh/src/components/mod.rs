//! # Components
//!
//! Colored, positioned plant parts. A [`Component`] is a value: once built it
//! is never mutated, only replaced by a translated copy.

mod library;

pub use library::{ComponentLibrary, ElbowAxis, Tessellation};

use std::fmt;

use config::constants::{
    rgba_to_f32, BLOCK_COLOR, ELBOW_COLOR, GROUND_COLOR, NOZZLE_COLOR, PIPE_COLOR, TANK_COLOR,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;

/// The kind of a plant component. Each kind has one fixed face color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Ground,
    Tank,
    Block,
    Pipe,
    Elbow,
    Nozzle,
}

impl ComponentKind {
    /// Face color as RGBA bytes.
    pub fn color(self) -> [u8; 4] {
        match self {
            Self::Ground => GROUND_COLOR,
            Self::Tank => TANK_COLOR,
            Self::Block => BLOCK_COLOR,
            Self::Pipe => PIPE_COLOR,
            Self::Elbow => ELBOW_COLOR,
            Self::Nozzle => NOZZLE_COLOR,
        }
    }

    /// Lowercase name used in labels and exported node names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ground => "ground",
            Self::Tank => "tank",
            Self::Block => "block",
            Self::Pipe => "pipe",
            Self::Elbow => "elbow",
            Self::Nozzle => "nozzle",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positioned, colored piece of plant geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    kind: ComponentKind,
    label: String,
    mesh: Mesh,
}

impl Component {
    /// Wraps a world-space mesh, painting it with the kind's color.
    pub fn new(kind: ComponentKind, label: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            kind,
            label: label.into(),
            mesh: mesh.with_uniform_color(rgba_to_f32(kind.color())),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// RGBA face color.
    pub fn color(&self) -> [u8; 4] {
        self.kind.color()
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Returns a copy relabeled, e.g. to tag it with its train.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..self
        }
    }

    /// Returns the component moved by `offset`.
    pub fn translated(self, offset: DVec3) -> Self {
        Self {
            mesh: self.mesh.translated(offset),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cube;

    #[test]
    fn test_component_painted_with_kind_color() {
        let mesh = create_cube(DVec3::ONE, false).unwrap();
        let component = Component::new(ComponentKind::Pipe, "p", mesh);
        let colors = component.mesh().colors().unwrap();
        assert_eq!(colors.len(), 8);
        assert_eq!(colors[0], rgba_to_f32(PIPE_COLOR));
    }

    #[test]
    fn test_component_translated_keeps_identity() {
        let mesh = create_cube(DVec3::ONE, false).unwrap();
        let component = Component::new(ComponentKind::Block, "filter", mesh)
            .translated(DVec3::new(5.0, 0.0, 0.0));
        assert_eq!(component.label(), "filter");
        assert_eq!(component.kind(), ComponentKind::Block);
        assert_eq!(component.mesh().bounding_box().0.x, 5.0);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ComponentKind::Elbow.to_string(), "elbow");
        assert_eq!(ComponentKind::Tank.as_str(), "tank");
    }
}
