//! # Capacity
//!
//! Design throughput in MLD and the two quantities everything else is
//! derived from: the linear scale factor and the discrete train count.

use std::fmt;

use config::constants::{
    CAPACITY_SCALE_DIVISOR, DEFAULT_ENGINE_CAPACITY_MLD, MAX_TRAINS, TRAIN_BREAKPOINTS_MLD,
};
use plant_prompt::PromptParser;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A positive plant capacity in million liters per day.
///
/// # Example
///
/// ```rust
/// use plant_engine::Capacity;
///
/// let capacity = Capacity::new(160).unwrap();
/// assert_eq!(capacity.scale(), 2.0);
/// assert_eq!(capacity.train_count(), 3);
/// assert!(Capacity::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Capacity(u32);

impl Capacity {
    pub fn new(mld: u32) -> Result<Self, EngineError> {
        if mld == 0 {
            return Err(EngineError::InvalidCapacity { mld });
        }
        Ok(Self(mld))
    }

    /// Capacity named in `prompt`, or the engine default.
    pub fn from_prompt(parser: &PromptParser, prompt: &str) -> Self {
        let mld = parser.extract_capacity(prompt, DEFAULT_ENGINE_CAPACITY_MLD);
        // extract_capacity never yields zero and the default is positive
        Self(mld.max(1))
    }

    pub fn mld(self) -> u32 {
        self.0
    }

    /// `max(1, mld / 80)`, as a real division.
    pub fn scale(self) -> f64 {
        (self.0 as f64 / CAPACITY_SCALE_DIVISOR).max(1.0)
    }

    /// Number of parallel trains: 1 up to 50 MLD, 2 up to 150, 3 up to 300,
    /// 4 beyond.
    pub fn train_count(self) -> u32 {
        TRAIN_BREAKPOINTS_MLD
            .iter()
            .position(|&limit| self.0 <= limit)
            .map_or(MAX_TRAINS, |i| i as u32 + 1)
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self(DEFAULT_ENGINE_CAPACITY_MLD)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MLD", self.0)
    }
}
