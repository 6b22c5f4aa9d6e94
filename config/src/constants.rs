//! # Configuration Constants
//!
//! Centralized constants for the plant mesh pipeline. Tessellation
//! parameters, tolerances, component colors, capacity rules and
//! export naming are defined here.
//!
//! ## Categories
//!
//! - **Tolerances**: Degenerate-geometry thresholds
//! - **Tessellation**: Angular resolution of round primitives
//! - **Colors**: Fixed RGBA face color per component kind
//! - **Capacity**: Fallback capacities, scale divisor and train breakpoints
//! - **Layout**: Rack, routing, storage and per-train factors, per unit of scale
//! - **Export**: Output directory and filename conventions

// =============================================================================
// TOLERANCES
// =============================================================================

/// Cross product length (twice the triangle area) below which strict mesh
/// validation calls a triangle degenerate. Also the area under which a
/// centroid falls back to the vertex mean.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-8;

/// Pipe runs shorter than this produce no geometry.
///
/// # Example
///
/// ```rust
/// use config::constants::PIPE_LENGTH_EPSILON;
///
/// let length = 0.0_f64;
/// assert!(length < PIPE_LENGTH_EPSILON);
/// ```
pub const PIPE_LENGTH_EPSILON: f64 = 1e-6;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Radial sections for pipes, nozzles and other plain cylinders.
pub const CYLINDER_SECTIONS: u32 = 32;

/// Radial sections for tank bodies.
///
/// Tanks are the largest round shapes in the scene, so they get twice the
/// resolution of pipes.
pub const TANK_SECTIONS: u32 = 64;

/// Sections around the major circle of an elbow torus.
pub const TORUS_MAJOR_SECTIONS: u32 = 32;

/// Sections around the minor (tube) circle of an elbow torus.
pub const TORUS_MINOR_SECTIONS: u32 = 16;

/// Icosphere subdivision level for tank domes.
///
/// # Example
///
/// ```rust
/// use config::constants::DOME_SUBDIVISIONS;
///
/// // An icosphere has 20 * 4^n faces.
/// let faces = 20 * 4u32.pow(DOME_SUBDIVISIONS);
/// assert_eq!(faces, 320);
/// ```
pub const DOME_SUBDIVISIONS: u32 = 2;

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Default color when none is specified (light gray).
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// Tank face color (light gray), RGBA bytes.
pub const TANK_COLOR: [u8; 4] = [210, 210, 210, 255];

/// Filter block face color (light gray), RGBA bytes.
pub const BLOCK_COLOR: [u8; 4] = [200, 200, 200, 255];

/// Pipe face color (dark gray), RGBA bytes.
pub const PIPE_COLOR: [u8; 4] = [100, 100, 100, 255];

/// Elbow face color, RGBA bytes.
pub const ELBOW_COLOR: [u8; 4] = [100, 100, 100, 255];

/// Nozzle face color (mid gray), RGBA bytes.
pub const NOZZLE_COLOR: [u8; 4] = [130, 130, 130, 255];

/// Ground slab face color, RGBA bytes.
pub const GROUND_COLOR: [u8; 4] = [170, 170, 170, 255];

// =============================================================================
// CAPACITY CONSTANTS
// =============================================================================

/// Capacity used by the mesh engine when a prompt carries no `MLD` token.
///
/// Deliberately distinct from [`DEFAULT_PROMPT_CAPACITY_MLD`]; the two call
/// sites have always disagreed and neither is authoritative yet.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_ENGINE_CAPACITY_MLD, DEFAULT_PROMPT_CAPACITY_MLD};
///
/// assert_eq!(DEFAULT_ENGINE_CAPACITY_MLD, 100);
/// assert_eq!(DEFAULT_PROMPT_CAPACITY_MLD, 10);
/// ```
pub const DEFAULT_ENGINE_CAPACITY_MLD: u32 = 100;

/// Capacity used by the prompt parameter deriver when a prompt carries no
/// `MLD` token.
pub const DEFAULT_PROMPT_CAPACITY_MLD: u32 = 10;

/// Capacity (MLD) corresponding to a layout scale of exactly 1.
pub const CAPACITY_SCALE_DIVISOR: f64 = 80.0;

/// Reference capacity for the prompt deriver's square-root scale.
pub const PROMPT_SCALE_REFERENCE_MLD: f64 = 10.0;

/// Inclusive upper capacity bounds for 1, 2 and 3 treatment trains.
///
/// Anything above the last breakpoint gets [`MAX_TRAINS`].
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_TRAINS, TRAIN_BREAKPOINTS_MLD};
///
/// assert_eq!(TRAIN_BREAKPOINTS_MLD.len() as u32 + 1, MAX_TRAINS);
/// ```
pub const TRAIN_BREAKPOINTS_MLD: [u32; 3] = [50, 150, 300];

/// Largest number of parallel treatment trains.
pub const MAX_TRAINS: u32 = 4;

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================
//
// Plant-level distances and radii, all multiplied by the capacity scale
// factor before use.

/// Y of the elevated rack header.
pub const RACK_Y: f64 = 250.0;

/// Height of the rack header above ground.
pub const RACK_HEIGHT: f64 = 90.0;

/// Radius of the main rack header.
pub const MAIN_PIPE_RADIUS: f64 = 5.0;

/// Radius of every branch, drop and routing pipe.
pub const BRANCH_PIPE_RADIUS: f64 = 3.0;

/// X distance between adjacent trains.
pub const TRAIN_SPACING: f64 = 400.0;

/// How far the rack header starts before the first train.
pub const HEADER_LEAD: f64 = 200.0;

/// X distance from the last train to the storage tank.
pub const STORAGE_OFFSET: f64 = 350.0;

/// Storage tank radius.
pub const STORAGE_RADIUS: f64 = 50.0;

/// Storage tank body height.
pub const STORAGE_HEIGHT: f64 = 80.0;

/// Y of the merge header collecting train outputs.
pub const MERGE_Y: f64 = -500.0;

/// Height of train outputs and the merge header.
pub const OUTPUT_Z: f64 = 35.0;

/// Height storage routing rises to before turning toward the tank.
pub const ROUTING_Z: f64 = 90.0;

/// Gap kept between the routing run and the storage tank wall.
pub const STORAGE_CLEARANCE: f64 = 20.0;

/// Height of the storage inlet nozzle.
pub const STORAGE_INLET_Z: f64 = 60.0;

/// Extra ground width beyond the train row.
pub const GROUND_MARGIN: f64 = 800.0;

/// Ground depth along Y.
pub const GROUND_DEPTH: f64 = 1500.0;

/// Ground slab thickness. Not scaled.
pub const GROUND_THICKNESS: f64 = 20.0;

// =============================================================================
// TRAIN CONSTANTS
// =============================================================================
//
// One mixer, clarifier and filter column per train, stepping down -Y from the
// mixer at y = 0. Multiplied by the layout scale like the factors above.

/// Mixer tank radius.
pub const MIXER_RADIUS: f64 = 25.0;

/// Mixer tank body height.
pub const MIXER_HEIGHT: f64 = 60.0;

/// Y of the clarifier tank.
pub const CLARIFIER_Y: f64 = -200.0;

/// Clarifier tank radius.
pub const CLARIFIER_RADIUS: f64 = 40.0;

/// Clarifier tank body height.
pub const CLARIFIER_HEIGHT: f64 = 50.0;

/// Where the mixer pipe enters the clarifier.
pub const CLARIFIER_INLET_Z: f64 = 40.0;

/// Y of the filter block; train outputs leave from here.
pub const FILTER_Y: f64 = -400.0;

pub const FILTER_WIDTH: f64 = 100.0;
pub const FILTER_DEPTH: f64 = 80.0;
pub const FILTER_HEIGHT: f64 = 40.0;

/// Height of the mixer feed nozzle.
pub const MIXER_NOZZLE_Z: f64 = 45.0;

/// Length of the branch leaving the rack toward a train.
pub const RACK_DROP: f64 = 100.0;

// =============================================================================
// EXPORT CONSTANTS
// =============================================================================

/// Relative directory that receives exported artifacts.
pub const DEFAULT_OUTPUT_DIR: &str = "exports";

/// Filename prefix for exported artifacts.
pub const EXPORT_FILE_PREFIX: &str = "wtp";

/// `chrono` format string for the timestamp part of export filenames.
///
/// Second granularity; collisions are resolved with a numeric suffix.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Upper bound on collision suffixes tried for one timestamp.
pub const MAX_EXPORT_SUFFIX: u32 = 1000;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Converts an RGBA byte color into normalized floats.
///
/// # Example
///
/// ```rust
/// use config::constants::{rgba_to_f32, PIPE_COLOR};
///
/// let color = rgba_to_f32(PIPE_COLOR);
/// assert!((color[0] - 100.0 / 255.0).abs() < 1e-6);
/// assert_eq!(color[3], 1.0);
/// ```
#[inline]
pub fn rgba_to_f32(color: [u8; 4]) -> [f32; 4] {
    color.map(|c| c as f32 / 255.0)
}
