//! # Config Crate
//!
//! Centralized configuration constants for the plant mesh pipeline.
//! Tessellation counts, tolerances, component colors, layout factors and
//! export naming live here so the mesh, engine and prompt crates never
//! scatter literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{CYLINDER_SECTIONS, PIPE_LENGTH_EPSILON};
//!
//! let length: f64 = 1e-9;
//! assert!(length < PIPE_LENGTH_EPSILON);
//! assert_eq!(CYLINDER_SECTIONS, 32);
//! ```
//!
//! ## Design Principles
//!
//! - **One Home**: Builders import values from here instead of inlining them
//! - **Scale-Relative Layout**: Layout distances are expressed per unit of
//!   capacity scale and multiplied at build time
//! - **Explicit Defaults**: The two fallback capacities are named separately

pub mod constants;
