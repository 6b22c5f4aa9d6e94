//! # Engine Errors
//!
//! Error types for scene assembly and export. Degenerate geometry never
//! reaches this level; the component library drops it. Everything here is
//! fatal to one generation request.

use std::path::{Path, PathBuf};

use plant_mesh::MeshError;
use plant_prompt::DescriptionError;
use thiserror::Error;

/// Errors that can occur while building or exporting a plant model.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Capacity must be a positive number of MLD
    #[error("Invalid capacity: {mld} MLD")]
    InvalidCapacity { mld: u32 },

    /// Error from the mesh layer
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// Merged scene has no triangles
    #[error("Scene has no geometry to export")]
    EmptyScene,

    /// Merged scene failed validation
    #[error("Invalid mesh: {message}")]
    InvalidMesh { message: String },

    /// Filesystem failure
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// glTF JSON chunk could not be written or read
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An exported file could not be read back
    #[error("Malformed {format} file: {message}")]
    MalformedExport {
        format: &'static str,
        message: String,
    },

    /// Every candidate filename for this timestamp is taken
    #[error("No free export name for {stem} after {attempts} attempts")]
    NameCollision { stem: String, attempts: u32 },

    /// The plant description could not be derived
    #[error("Description error: {0}")]
    Description(#[from] DescriptionError),
}

impl EngineError {
    /// Creates an I/O error tagged with the path it concerns.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an invalid mesh error.
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }

    /// Creates a malformed export error.
    pub fn malformed(format: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedExport {
            format,
            message: message.into(),
        }
    }
}
