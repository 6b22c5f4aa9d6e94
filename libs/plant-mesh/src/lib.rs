//! # Plant Mesh
//!
//! Triangle meshes and the parametric component library used to assemble
//! water treatment plant models.
//!
//! ## Architecture
//!
//! ```text
//! primitives (box, cylinder, icosphere, torus) → components (tank, block,
//! pipe, elbow, nozzle, ground)
//! ```
//!
//! Every builder returns a new value; nothing is transformed in place once a
//! component exists.
//!
//! ## Usage
//!
//! ```rust
//! use plant_mesh::components::{ComponentLibrary, ElbowAxis};
//! use glam::DVec3;
//!
//! let library = ComponentLibrary::default();
//! let tank = library.tank(0.0, 0.0, 25.0, 60.0).unwrap();
//! let elbow = library.elbow_90(DVec3::new(0.0, 150.0, 90.0), 3.0, ElbowAxis::Z).unwrap();
//! assert!(tank.mesh().triangle_count() > elbow.mesh().triangle_count() / 4);
//! ```

pub mod components;
pub mod error;
pub mod mesh;
pub mod primitives;

pub use components::{Component, ComponentKind, ComponentLibrary, ElbowAxis, Tessellation};
pub use error::MeshError;
pub use mesh::Mesh;
