//! # Description Errors
//!
//! Error types for prompt parsing and plant descriptions.

use thiserror::Error;

/// Errors raised while deriving or validating a plant description.
#[derive(Debug, Error)]
pub enum DescriptionError {
    /// A connection names a unit index that does not exist
    #[error("Connection {index} references unit {unit} but only {unit_count} units exist")]
    DanglingConnection {
        index: usize,
        unit: usize,
        unit_count: usize,
    },

    /// A connection starts and ends on the same unit
    #[error("Connection {index} connects unit {unit} to itself")]
    SelfConnection { index: usize, unit: usize },

    /// Pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Description JSON could not be read or written
    #[error("Description JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
