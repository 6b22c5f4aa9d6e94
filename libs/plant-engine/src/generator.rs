//! # Plant Generator
//!
//! The caller-constructed entry point. Holds the output directory, the
//! component library and the compiled prompt parser; nothing is global.

use std::path::PathBuf;

use chrono::Local;
use config::constants::{DEFAULT_OUTPUT_DIR, EXPORT_TIMESTAMP_FORMAT};
use plant_mesh::{ComponentLibrary, Tessellation};
use plant_prompt::{PlantDescription, PlantKind, PromptParser};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::capacity::Capacity;
use crate::description::render_description;
use crate::error::EngineError;
use crate::export::{export_scene, ExportPaths};
use crate::layout::PlantLayout;
use crate::plant::assemble;
use crate::scene::Scene;

/// Generator settings.
///
/// # Example
///
/// ```rust
/// use plant_engine::GeneratorConfig;
/// use std::path::PathBuf;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.output_dir, PathBuf::from("exports"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory receiving exports; created on first export.
    pub output_dir: PathBuf,
    pub tessellation: Tessellation,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            tessellation: Tessellation::default(),
        }
    }
}

/// What a model was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ModelSource {
    /// The capacity-driven multi-train plant.
    Capacity { capacity: Capacity, trains: u32 },
    /// A rendered plant description.
    Description { kind: PlantKind },
}

/// A finished generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedModel {
    pub paths: ExportPaths,
    pub source: ModelSource,
    pub components: usize,
}

/// Builds and exports plant models.
#[derive(Debug, Clone)]
pub struct PlantGenerator {
    config: GeneratorConfig,
    library: ComponentLibrary,
    parser: PromptParser,
}

impl PlantGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, EngineError> {
        Ok(Self {
            library: ComponentLibrary::new(config.tessellation),
            parser: PromptParser::new()?,
            config,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn parser(&self) -> &PromptParser {
        &self.parser
    }

    /// Capacity named in `prompt`, or the engine default.
    pub fn capacity(&self, prompt: &str) -> Capacity {
        Capacity::from_prompt(&self.parser, prompt)
    }

    /// The centered capacity-driven plant.
    pub fn build_scene(&self, capacity: Capacity) -> Result<Scene, EngineError> {
        let layout = PlantLayout::from_capacity(capacity);
        assemble(&self.library, &layout).centered()
    }

    /// The centered rendering of a description.
    pub fn build_description_scene(
        &self,
        description: &PlantDescription,
    ) -> Result<Scene, EngineError> {
        render_description(&self.library, description).centered()
    }

    /// Writes `scene` under a fresh timestamped name.
    pub fn export(&self, scene: &Scene) -> Result<ExportPaths, EngineError> {
        let timestamp = Local::now().format(EXPORT_TIMESTAMP_FORMAT).to_string();
        export_scene(scene, &self.config.output_dir, &timestamp)
    }

    /// Prompt to exported capacity-driven plant.
    pub fn generate(&self, prompt: &str) -> Result<GeneratedModel, EngineError> {
        let capacity = self.capacity(prompt);
        info!(%capacity, prompt, "generating plant");

        let scene = self.build_scene(capacity)?;
        let paths = self.export(&scene)?;
        Ok(GeneratedModel {
            paths,
            source: ModelSource::Capacity {
                capacity,
                trains: capacity.train_count(),
            },
            components: scene.len(),
        })
    }

    /// Prompt to derived description.
    pub fn describe(&self, prompt: &str) -> Result<PlantDescription, EngineError> {
        Ok(self.parser.describe(prompt)?)
    }

    /// Description to exported model.
    pub fn generate_from_description(
        &self,
        description: &PlantDescription,
    ) -> Result<GeneratedModel, EngineError> {
        let scene = self.build_description_scene(description)?;
        let paths = self.export(&scene)?;
        Ok(GeneratedModel {
            paths,
            source: ModelSource::Description {
                kind: description.kind(),
            },
            components: scene.len(),
        })
    }
}
