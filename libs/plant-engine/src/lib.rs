//! # Plant Engine
//!
//! Parametric mesh assembly for water treatment plants: a capacity in MLD
//! becomes a laid-out, piped, centered scene exported as a `.glb` scene and
//! a `.stl` solid.
//!
//! ## Architecture
//!
//! ```text
//! Capacity → PlantLayout → trains + routing → Scene → centered → export (GLB + STL)
//! ```
//!
//! Structured descriptions from `plant-prompt` take a shorter path:
//! `render_description → Scene → centered → export`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use plant_engine::{GeneratorConfig, PlantGenerator};
//!
//! let generator = PlantGenerator::new(GeneratorConfig::default()).unwrap();
//! let model = generator.generate("150 MLD WTP").unwrap();
//! println!("{}", model.paths.scene.display());
//! ```

pub mod capacity;
pub mod description;
pub mod error;
pub mod export;
pub mod generator;
pub mod layout;
pub mod plant;
pub mod routing;
pub mod scene;
pub mod train;

pub use capacity::Capacity;
pub use description::render_description;
pub use error::EngineError;
pub use export::{export_scene, ExportPaths};
pub use generator::{GeneratedModel, GeneratorConfig, ModelSource, PlantGenerator};
pub use layout::PlantLayout;
pub use plant::assemble;
pub use routing::{route_outputs, route_to_storage, storage_tank, MergeRouting};
pub use scene::Scene;
pub use train::{build_train, Train};
