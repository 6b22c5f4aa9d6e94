//! # Component Library
//!
//! Builders for every plant part. Each builder is a pure function of its
//! arguments and the library's tessellation: it returns a world-space
//! [`Component`], or `None` when the request is degenerate (a zero-length
//! pipe, a zero radius, ...). Callers drop `None` and keep assembling.

use std::f64::consts::FRAC_PI_2;

use config::constants::{
    CYLINDER_SECTIONS, DOME_SUBDIVISIONS, PIPE_LENGTH_EPSILON, TANK_SECTIONS,
    TORUS_MAJOR_SECTIONS, TORUS_MINOR_SECTIONS,
};
use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Component, ComponentKind};
use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::primitives::{create_cube, create_cylinder, create_icosphere, create_torus};

/// Elbow torus major radius as a multiple of the pipe radius.
const ELBOW_BEND_RATIO: f64 = 2.5;

/// Nozzle stages as (radius factor, height factor, z offset factor), all
/// relative to the pipe radius: stub, neck, flange.
const NOZZLE_STAGES: [(f64, f64, f64); 3] = [(1.05, 3.0, 0.0), (1.3, 1.0, 2.0), (1.8, 0.6, 3.0)];

/// Angular resolution of round components.
///
/// # Example
///
/// ```rust
/// use plant_mesh::components::Tessellation;
///
/// let coarse = Tessellation { cylinder_sections: 12, ..Tessellation::default() };
/// assert_eq!(coarse.tank_sections, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tessellation {
    /// Sections for pipes and nozzle stages.
    pub cylinder_sections: u32,
    /// Sections for tank bodies.
    pub tank_sections: u32,
    /// Sections around an elbow's bend.
    pub torus_major_sections: u32,
    /// Sections around an elbow's tube.
    pub torus_minor_sections: u32,
    /// Icosphere subdivisions for tank domes.
    pub dome_subdivisions: u32,
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            cylinder_sections: CYLINDER_SECTIONS,
            tank_sections: TANK_SECTIONS,
            torus_major_sections: TORUS_MAJOR_SECTIONS,
            torus_minor_sections: TORUS_MINOR_SECTIONS,
            dome_subdivisions: DOME_SUBDIVISIONS,
        }
    }
}

/// World axis an elbow is turned about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ElbowAxis {
    /// Torus left in the XY plane.
    #[default]
    Default,
    /// Quarter turn about +Y.
    Y,
    /// Quarter turn about +Z.
    Z,
}

impl ElbowAxis {
    fn rotation(self) -> DMat4 {
        match self {
            Self::Default => DMat4::IDENTITY,
            Self::Y => DMat4::from_rotation_y(FRAC_PI_2),
            Self::Z => DMat4::from_rotation_z(FRAC_PI_2),
        }
    }
}

/// Builds plant components at a fixed tessellation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentLibrary {
    tessellation: Tessellation,
}

impl ComponentLibrary {
    pub fn new(tessellation: Tessellation) -> Self {
        Self { tessellation }
    }

    pub fn tessellation(&self) -> Tessellation {
        self.tessellation
    }

    /// A cylindrical tank with a hemispherical dome, base on z = 0 at (x, y).
    ///
    /// The dome is a full icosphere whose lower half is flattened onto its
    /// equator, so only the upper half contributes visible surface.
    pub fn tank(&self, x: f64, y: f64, radius: f64, height: f64) -> Option<Component> {
        let build = || -> Result<Mesh, MeshError> {
            let body = create_cylinder(radius, height, false, self.tessellation.tank_sections)?;
            let dome = create_icosphere(radius, self.tessellation.dome_subdivisions)?
                .map_vertices(|v| DVec3::new(v.x, v.y, v.z.max(0.0)))
                .translated(DVec3::new(0.0, 0.0, height));
            Ok(Mesh::concatenate([&body, &dome])?.translated(DVec3::new(x, y, 0.0)))
        };
        finish(ComponentKind::Tank, build())
    }

    /// A plain upright cylinder with its base centered on `base`.
    pub fn cylinder(&self, base: DVec3, radius: f64, height: f64) -> Option<Component> {
        let mesh = create_cylinder(radius, height, false, self.tessellation.tank_sections)
            .map(|m| m.translated(base));
        finish(ComponentKind::Tank, mesh)
    }

    /// An axis-aligned box of width (x), depth (y) and height (z), base on
    /// z = 0, centered on (x, y).
    pub fn block(&self, x: f64, y: f64, width: f64, depth: f64, height: f64) -> Option<Component> {
        let mesh = create_cube(DVec3::new(width, depth, height), true)
            .map(|m| m.translated(DVec3::new(x, y, height / 2.0)));
        finish(ComponentKind::Block, mesh)
    }

    /// A straight pipe from `start` to `end`.
    ///
    /// Returns `None` when the endpoints coincide within
    /// [`PIPE_LENGTH_EPSILON`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use plant_mesh::components::ComponentLibrary;
    /// use glam::DVec3;
    ///
    /// let library = ComponentLibrary::default();
    /// assert!(library.pipe(DVec3::ONE, DVec3::ONE, 2.0).is_none());
    ///
    /// let pipe = library.pipe(DVec3::ZERO, DVec3::new(0.0, 0.0, 10.0), 2.0).unwrap();
    /// let (min, max) = pipe.mesh().bounding_box();
    /// assert!((max.z - min.z - 10.0).abs() < 1e-9);
    /// ```
    pub fn pipe(&self, start: DVec3, end: DVec3, radius: f64) -> Option<Component> {
        let direction = end - start;
        let length = direction.length();

        if !(length >= PIPE_LENGTH_EPSILON) {
            debug!(?start, ?end, "skipping zero-length pipe");
            return None;
        }

        // Built along +Z from the origin, then swung onto the run
        let rotation = DQuat::from_rotation_arc(DVec3::Z, direction / length);
        let placement = DMat4::from_rotation_translation(rotation, start);
        let mesh = create_cylinder(radius, length, false, self.tessellation.cylinder_sections)
            .map(|m| m.transformed(&placement));
        finish(ComponentKind::Pipe, mesh)
    }

    /// A 90° elbow fitting approximated by a torus around `position`.
    pub fn elbow_90(&self, position: DVec3, radius: f64, axis: ElbowAxis) -> Option<Component> {
        let placement = DMat4::from_translation(position) * axis.rotation();
        let mesh = create_torus(
            radius * ELBOW_BEND_RATIO,
            radius,
            self.tessellation.torus_major_sections,
            self.tessellation.torus_minor_sections,
        )
        .map(|m| m.transformed(&placement));
        finish(ComponentKind::Elbow, mesh)
    }

    /// A flanged nozzle: stub, wider neck and widest flange stacked on Z,
    /// with the stub centered on `position`.
    pub fn nozzle(&self, position: DVec3, radius: f64) -> Option<Component> {
        let build = || -> Result<Mesh, MeshError> {
            let stages = NOZZLE_STAGES
                .iter()
                .map(|&(r, h, z)| {
                    create_cylinder(
                        radius * r,
                        radius * h,
                        true,
                        self.tessellation.cylinder_sections,
                    )
                    .map(|m| m.translated(DVec3::new(0.0, 0.0, radius * z)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Mesh::concatenate(&stages)?.translated(position))
        };
        finish(ComponentKind::Nozzle, build())
    }

    /// A flat slab of the given footprint whose top face sits at
    /// `-thickness / 2`, centered on the origin in XY.
    pub fn ground(&self, width: f64, depth: f64, thickness: f64) -> Option<Component> {
        let mesh = create_cube(DVec3::new(width, depth, thickness), true)
            .map(|m| m.translated(DVec3::new(0.0, 0.0, -thickness)));
        finish(ComponentKind::Ground, mesh)
    }
}

fn finish(kind: ComponentKind, mesh: Result<Mesh, MeshError>) -> Option<Component> {
    match mesh {
        Ok(mesh) => Some(Component::new(kind, kind.as_str(), mesh)),
        Err(err) if err.is_degenerate() => {
            debug!(%kind, error = %err, "dropping degenerate component");
            None
        }
        Err(err) => {
            warn!(%kind, error = %err, "dropping component");
            None
        }
    }
}
