//! # Plant Prompt
//!
//! The parameter deriver: turns a free-text prompt into either a capacity
//! number or a typed [`PlantDescription`].
//!
//! ## Architecture
//!
//! ```text
//! prompt → PromptParser::classify → PlantTemplate → PlantTemplate::describe → PlantDescription
//! ```
//!
//! Text matching stays in [`parser`]; [`template`] only sees the classified
//! variant.
//!
//! ## Usage
//!
//! ```rust
//! use plant_prompt::{PlantKind, PromptParser};
//!
//! let parser = PromptParser::new().unwrap();
//! let description = parser.describe("Create a complete 100 MLD water treatment plant").unwrap();
//! assert_eq!(description.kind(), PlantKind::CompleteSmallWtp);
//! assert_eq!(description.capacity_mld(), Some(100));
//! ```

pub mod description;
pub mod error;
pub mod parser;
pub mod template;

pub use description::{Connection, PlantDescription, PlantKind, Unit, UnitShape};
pub use error::DescriptionError;
pub use parser::{PromptParser, DEFAULT_FILTER_COUNT, MAX_FILTER_COUNT};
pub use template::PlantTemplate;
