//! Failures raised while building component geometry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    /// The requested shape has no volume: zero radius, zero extent, or
    /// too few sections to close a ring.
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// Vertex indices are `u32`; a merged scene must stay below that.
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },
}

impl MeshError {
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// True for geometry a scene can leave out and keep going.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateGeometry { .. })
    }
}
