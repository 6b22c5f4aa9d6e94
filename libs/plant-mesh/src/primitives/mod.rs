//! # Primitives
//!
//! Mesh generation for the raw shapes plant components are assembled from
//! (box, cylinder, icosphere, torus).

pub mod cube;
pub mod cylinder;
pub mod icosphere;
pub mod torus;

pub use cube::create_cube;
pub use cylinder::create_cylinder;
pub use icosphere::create_icosphere;
pub use torus::create_torus;
