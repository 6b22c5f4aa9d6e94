//! # Prompt Parser
//!
//! Regex heuristics over free text. Everything that looks at the raw prompt
//! lives here; geometry code only ever sees the resulting
//! [`PlantTemplate`](crate::PlantTemplate) or
//! [`PlantDescription`](crate::PlantDescription).

use config::constants::DEFAULT_PROMPT_CAPACITY_MLD;
use regex::Regex;
use tracing::debug;

use crate::description::{PlantDescription, Unit, UnitShape};
use crate::error::DescriptionError;
use crate::template::PlantTemplate;

const NUMBER: &str = r"(\d+(?:\.\d+)?)";

/// Keywords checked in priority order; the first hit picks the template.
const COMPLETE_KEYWORDS: [&str; 3] = ["complete", "full", "all units"];
const STORAGE_KEYWORDS: [&str; 2] = ["storage", "tank"];
const EXPLICIT_MARKERS: [&str; 3] = ["at x=", "position", "x="];

/// Filter count used when the prompt names none.
pub const DEFAULT_FILTER_COUNT: u32 = 4;

/// Upper bound on filters in one bank.
pub const MAX_FILTER_COUNT: u32 = 64;

/// Compiled prompt patterns.
///
/// # Example
///
/// ```rust
/// use plant_prompt::PromptParser;
///
/// let parser = PromptParser::new().unwrap();
/// assert_eq!(parser.extract_capacity("150 MLD WTP", 100), 150);
/// assert_eq!(parser.extract_capacity("a small plant", 100), 100);
/// ```
#[derive(Debug, Clone)]
pub struct PromptParser {
    capacity: Regex,
    cylinder: Regex,
    block: Regex,
}

impl PromptParser {
    pub fn new() -> Result<Self, DescriptionError> {
        Ok(Self {
            capacity: Regex::new(r"(?i)(\d+)\s*MLD")?,
            cylinder: Regex::new(&format!(
                r"cylinder\s+r={NUMBER}\s+h={NUMBER}\s+at\s+x={NUMBER}"
            ))?,
            block: Regex::new(&format!(
                r"box\s+w={NUMBER}\s+d={NUMBER}\s+h={NUMBER}\s+at\s+x={NUMBER}"
            ))?,
        })
    }

    /// First integer directly followed by `MLD` (any case), or `default`.
    ///
    /// Zero and out-of-range values count as absent.
    pub fn extract_capacity(&self, prompt: &str, default: u32) -> u32 {
        self.capacity
            .captures(prompt)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .filter(|&mld| mld > 0)
            .unwrap_or(default)
    }

    /// Number following `keyword` (optionally after `:` or spaces), or
    /// `default`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plant_prompt::PromptParser;
    ///
    /// let parser = PromptParser::new().unwrap();
    /// assert_eq!(parser.extract_number("filters: 6", "filters", 4.0).unwrap(), 6.0);
    /// assert_eq!(parser.extract_number("6 filters", "filters", 4.0).unwrap(), 4.0);
    /// ```
    pub fn extract_number(
        &self,
        prompt: &str,
        keyword: &str,
        default: f64,
    ) -> Result<f64, DescriptionError> {
        let pattern = Regex::new(&format!(r"(?i){}[:\s]*{NUMBER}", regex::escape(keyword)))?;
        Ok(pattern
            .captures(prompt)
            .and_then(|caps| caps[1].parse::<f64>().ok())
            .unwrap_or(default))
    }

    /// Picks the plant template a prompt asks for.
    pub fn classify(&self, prompt: &str) -> Result<PlantTemplate, DescriptionError> {
        let lower = prompt.to_lowercase();
        let has = |keyword: &str| lower.contains(keyword);

        let template = if COMPLETE_KEYWORDS.iter().any(|&k| has(k)) {
            PlantTemplate::Complete
        } else if has("intake") {
            PlantTemplate::Intake
        } else if has("clarifier") {
            PlantTemplate::Clarifier
        } else if has("filter") {
            let count = self
                .extract_number(prompt, "filters", DEFAULT_FILTER_COUNT as f64)?
                .clamp(1.0, MAX_FILTER_COUNT as f64) as u32;
            PlantTemplate::FilterBank { count }
        } else if STORAGE_KEYWORDS.iter().any(|&k| has(k)) {
            PlantTemplate::Storage
        } else if EXPLICIT_MARKERS.iter().any(|&k| has(k)) {
            let units = self.explicit_units(&lower);
            if units.is_empty() {
                debug!("explicit position markers without parseable units, using basic plant");
                PlantTemplate::Basic
            } else {
                PlantTemplate::Explicit { units }
            }
        } else {
            PlantTemplate::Basic
        };

        debug!(?template, "classified prompt");
        Ok(template)
    }

    /// Derives the full plant description for a prompt.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plant_prompt::{PlantKind, PromptParser};
    ///
    /// let parser = PromptParser::new().unwrap();
    /// let description = parser
    ///     .describe("cylinder r=5 h=10 at x=0 and box w=3 d=3 h=3 at x=20")
    ///     .unwrap();
    /// assert_eq!(description.kind(), PlantKind::SimpleWtp);
    /// assert_eq!(description.units().len(), 2);
    /// assert_eq!(description.connections().len(), 1);
    /// ```
    pub fn describe(&self, prompt: &str) -> Result<PlantDescription, DescriptionError> {
        let mld = self.extract_capacity(prompt, DEFAULT_PROMPT_CAPACITY_MLD);
        let description = self.classify(prompt)?.describe(mld)?.with_prompt(prompt);
        debug!(
            kind = ?description.kind(),
            units = description.units().len(),
            connections = description.connections().len(),
            "derived plant description"
        );
        Ok(description)
    }

    /// Units written with the explicit grammar, sorted by x.
    ///
    /// `cylinder r=<num> h=<num> at x=<num>` and
    /// `box w=<num> d=<num> h=<num> at x=<num>`, matched on lowercase text.
    fn explicit_units(&self, lower: &str) -> Vec<Unit> {
        let number = |caps: &regex::Captures, i: usize| caps[i].parse::<f64>().unwrap_or(0.0);

        let cylinders = self.cylinder.captures_iter(lower).map(|caps| {
            Unit::new(
                UnitShape::Cylinder {
                    radius: number(&caps, 1),
                    height: number(&caps, 2),
                },
                number(&caps, 3),
            )
            .named("Cylinder")
        });
        let blocks = self.block.captures_iter(lower).map(|caps| {
            Unit::new(
                UnitShape::Box {
                    width: number(&caps, 1),
                    depth: number(&caps, 2),
                    height: number(&caps, 3),
                },
                number(&caps, 4),
            )
            .named("Box")
        });

        let mut units: Vec<Unit> = cylinders.chain(blocks).collect();
        // Stable: ties keep cylinders ahead of boxes
        units.sort_by(|a, b| a.x.total_cmp(&b.x));
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> PromptParser {
        PromptParser::new().unwrap()
    }

    #[test]
    fn test_capacity_case_insensitive() {
        assert_eq!(parser().extract_capacity("200 mld water treatment plant", 1), 200);
        assert_eq!(parser().extract_capacity("200MLD", 1), 200);
    }

    #[test]
    fn test_capacity_first_match_wins() {
        assert_eq!(parser().extract_capacity("50 MLD now, 300 MLD later", 1), 50);
    }

    #[test]
    fn test_capacity_defaults() {
        assert_eq!(parser().extract_capacity("4 filters", 10), 10);
        assert_eq!(parser().extract_capacity("0 MLD", 100), 100);
        assert_eq!(parser().extract_capacity("99999999999 MLD", 100), 100);
    }

    #[test]
    fn test_classify_priority() {
        let p = parser();
        assert_eq!(
            p.classify("Create a complete 100 MLD water treatment plant").unwrap(),
            PlantTemplate::Complete
        );
        assert_eq!(
            p.classify("intake with clarifier").unwrap(),
            PlantTemplate::Intake
        );
        assert_eq!(p.classify("a clarifier").unwrap(), PlantTemplate::Clarifier);
        assert_eq!(p.classify("storage tank").unwrap(), PlantTemplate::Storage);
        assert_eq!(p.classify("150 MLD WTP").unwrap(), PlantTemplate::Basic);
    }

    #[test]
    fn test_classify_filter_count() {
        let p = parser();
        assert_eq!(
            p.classify("4 filters").unwrap(),
            PlantTemplate::FilterBank { count: 4 }
        );
        assert_eq!(
            p.classify("filter bank, filters: 6").unwrap(),
            PlantTemplate::FilterBank { count: 6 }
        );
        assert_eq!(
            p.classify("filters: 0").unwrap(),
            PlantTemplate::FilterBank { count: 1 }
        );
        assert_eq!(
            p.classify("filters 100000").unwrap(),
            PlantTemplate::FilterBank {
                count: MAX_FILTER_COUNT
            }
        );
    }

    #[test]
    fn test_explicit_units_sorted_by_x() {
        let template = parser()
            .classify("box w=3 d=3 h=3 at x=20 then cylinder r=5 h=10 at x=0")
            .unwrap();
        let PlantTemplate::Explicit { units } = template else {
            panic!("expected explicit template, got {template:?}");
        };
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].x, 0.0);
        assert!(matches!(units[0].shape, UnitShape::Cylinder { radius, height } if radius == 5.0 && height == 10.0));
        assert_eq!(units[1].x, 20.0);
        assert!(matches!(units[1].shape, UnitShape::Box { .. }));
    }

    #[test]
    fn test_explicit_grammar_is_case_insensitive() {
        let template = parser().classify("CYLINDER R=2.5 H=4 AT X=7.5").unwrap();
        let PlantTemplate::Explicit { units } = template else {
            panic!("expected explicit template");
        };
        assert_eq!(units[0].x, 7.5);
    }

    #[test]
    fn test_explicit_markers_without_units_fall_back() {
        assert_eq!(
            parser().classify("put something at x=5").unwrap(),
            PlantTemplate::Basic
        );
    }
}
