//! # Plant Templates
//!
//! One variant per kind of plant a prompt can ask for, and the fixed
//! dimension tables each variant expands into. Template dimensions grow
//! with `sqrt(mld / 10)` and are rounded to two decimals.

use config::constants::PROMPT_SCALE_REFERENCE_MLD;

use crate::description::{Connection, PlantDescription, PlantKind, Unit, UnitShape};
use crate::error::DescriptionError;

/// Radius of the pipes chaining explicitly positioned units.
const EXPLICIT_PIPE_RADIUS: f64 = 1.2;
/// Height of the pipes chaining explicitly positioned units.
const EXPLICIT_PIPE_Z: f64 = 3.0;

/// Pitch between filters in a filter bank, in scaled units.
const FILTER_PITCH: f64 = 7.0;

/// The plant a prompt asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum PlantTemplate {
    /// Intake through clear water tank, six units in a row.
    Complete,
    /// Intake structure with screen chamber.
    Intake,
    /// Circular clarifier with center drive and scraper bridge.
    Clarifier,
    /// A row of rapid sand filters between two headers.
    FilterBank { count: u32 },
    /// Clear water reservoir with roof and two nozzles.
    Storage,
    /// Units placed with the explicit-position grammar, sorted by x.
    Explicit { units: Vec<Unit> },
    /// Intake, clarifier, filter and storage in a row.
    Basic,
}

/// Prompt-side scale factor: `sqrt(mld / 10)`.
///
/// # Example
///
/// ```rust
/// use plant_prompt::template::prompt_scale;
///
/// assert_eq!(prompt_scale(10), 1.0);
/// assert_eq!(prompt_scale(40), 2.0);
/// ```
pub fn prompt_scale(mld: u32) -> f64 {
    (mld as f64 / PROMPT_SCALE_REFERENCE_MLD).sqrt()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn cylinder(radius: f64, height: f64) -> UnitShape {
    UnitShape::Cylinder {
        radius: round2(radius),
        height: round2(height),
    }
}

fn block(width: f64, depth: f64, height: f64) -> UnitShape {
    UnitShape::Box {
        width: round2(width),
        depth: round2(depth),
        height: round2(height),
    }
}

fn pipe(radius: f64, length: f64) -> UnitShape {
    UnitShape::Pipe {
        radius: round2(radius),
        length: round2(length),
    }
}

/// Connections `i -> i + 1` for every adjacent pair.
fn chain(unit_count: usize, radius: impl Fn(usize) -> f64, z: f64) -> Vec<Connection> {
    (1..unit_count)
        .map(|to| Connection {
            from: to - 1,
            to,
            radius: round2(radius(to - 1)),
            z: round2(z),
        })
        .collect()
}

impl PlantTemplate {
    /// Expands the template into a validated description for capacity
    /// `mld`.
    pub fn describe(self, mld: u32) -> Result<PlantDescription, DescriptionError> {
        let s = prompt_scale(mld);

        match self {
            Self::Complete => {
                let units = vec![
                    Unit::new(cylinder(4.0 * s, 8.0 * s), 0.0)
                        .named("Intake Structure")
                        .colored([0.2, 0.4, 0.8]),
                    Unit::new(cylinder(2.5 * s, 4.0 * s), round2(12.0 * s))
                        .named("Flash Mixer")
                        .colored([0.8, 0.4, 0.2]),
                    Unit::new(block(8.0 * s, 5.0 * s, 4.0 * s), round2(25.0 * s))
                        .named("Flocculator")
                        .colored([0.3, 0.7, 0.5]),
                    Unit::new(cylinder(7.0 * s, 6.0 * s), round2(40.0 * s))
                        .named("Clarifier")
                        .colored([0.1, 0.5, 0.9]),
                    Unit::new(block(7.0 * s, 5.0 * s, 4.0 * s), round2(55.0 * s))
                        .named("Rapid Sand Filter")
                        .colored([0.4, 0.7, 0.3]),
                    Unit::new(cylinder(6.0 * s, 7.0 * s), round2(72.0 * s))
                        .named("Clear Water Tank")
                        .colored([0.2, 0.6, 0.9]),
                ];
                // Wider pipes either side of the clarifier
                let radii = [1.0, 1.0, 1.2, 1.2, 1.0];
                let connections = chain(units.len(), |i| radii[i] * s, 3.0 * s);
                Ok(PlantDescription::new(
                    PlantKind::CompleteSmallWtp,
                    format!("Complete {mld} MLD water treatment plant"),
                    units,
                    connections,
                )?
                .with_capacity(mld))
            }
            Self::Intake => PlantDescription::new(
                PlantKind::IntakeStructure,
                "Raw water intake with screens",
                vec![
                    Unit::new(cylinder(3.0 * s, 8.0 * s), 0.0),
                    Unit::new(block(6.0 * s, 4.0 * s, 3.0 * s), round2(8.0 * s)),
                    Unit::new(pipe(1.0 * s, 10.0 * s), round2(4.0 * s)).at(0.0, round2(2.0 * s)),
                ],
                Vec::new(),
            ),
            Self::Clarifier => PlantDescription::new(
                PlantKind::CircularClarifier,
                "Circular clarifier with mechanical scraper",
                vec![
                    Unit::new(cylinder(8.0 * s, 5.0 * s), 0.0),
                    Unit::new(cylinder(2.0 * s, 2.0 * s), 0.0).at(0.0, round2(3.0 * s)),
                    Unit::new(block(14.0 * s, 0.5 * s, 0.3 * s), 0.0).at(0.0, round2(2.5 * s)),
                    Unit::new(pipe(0.6 * s, 10.0 * s), round2(-6.0 * s)).at(0.0, round2(1.0 * s)),
                ],
                Vec::new(),
            ),
            Self::FilterBank { count } => {
                let span = count as f64 * FILTER_PITCH * s;
                let header_x = round2((count as f64 - 1.0) * FILTER_PITCH / 2.0 * s);
                let mut units: Vec<Unit> = (0..count)
                    .map(|i| {
                        Unit::new(
                            block(5.0 * s, 5.0 * s, 4.0 * s),
                            round2(i as f64 * FILTER_PITCH * s),
                        )
                    })
                    .collect();
                for side in [1.0, -1.0] {
                    units.push(
                        Unit::new(pipe(1.0 * s, span), header_x)
                            .at(round2(side * 3.0 * s), round2(2.0 * s)),
                    );
                }
                PlantDescription::new(
                    PlantKind::RapidSandFilters,
                    format!("Bank of {count} rapid sand filters"),
                    units,
                    Vec::new(),
                )
            }
            Self::Storage => PlantDescription::new(
                PlantKind::ClearWaterReservoir,
                "Clear water storage tank",
                vec![
                    Unit::new(cylinder(7.0 * s, 8.0 * s), 0.0),
                    Unit::new(cylinder(7.5 * s, 0.5 * s), 0.0).at(0.0, round2(8.0 * s)),
                    Unit::new(pipe(0.8 * s, 8.0 * s), round2(-5.0 * s)).at(0.0, round2(4.0 * s)),
                    Unit::new(pipe(0.8 * s, 8.0 * s), round2(5.0 * s)).at(0.0, round2(4.0 * s)),
                ],
                Vec::new(),
            ),
            Self::Explicit { units } => {
                let connections = chain(units.len(), |_| EXPLICIT_PIPE_RADIUS, EXPLICIT_PIPE_Z);
                PlantDescription::new(
                    PlantKind::SimpleWtp,
                    "Plant with explicit positions",
                    units,
                    connections,
                )
            }
            Self::Basic => {
                let units = vec![
                    Unit::new(cylinder(4.0 * s, 8.0 * s), 0.0).named("Intake"),
                    Unit::new(cylinder(7.0 * s, 6.0 * s), round2(20.0 * s)).named("Clarifier"),
                    Unit::new(block(6.0 * s, 5.0 * s, 4.0 * s), round2(40.0 * s)).named("Filter"),
                    Unit::new(cylinder(6.0 * s, 7.0 * s), round2(60.0 * s)).named("Storage"),
                ];
                let connections = chain(units.len(), |_| 1.0 * s, 3.0 * s);
                Ok(PlantDescription::new(
                    PlantKind::SimpleWtp,
                    format!("Basic {mld} MLD water treatment plant"),
                    units,
                    connections,
                )?
                .with_capacity(mld))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_complete_plant_chain() {
        let d = PlantTemplate::Complete.describe(10).unwrap();
        assert_eq!(d.kind(), PlantKind::CompleteSmallWtp);
        assert_eq!(d.units().len(), 6);
        assert_eq!(d.connections().len(), 5);
        assert_eq!(d.capacity_mld(), Some(10));
        assert_eq!(d.units()[5].x, 72.0);
        assert_eq!(d.connections()[2].radius, 1.2);
    }

    #[test]
    fn test_basic_plant_scaled() {
        let d = PlantTemplate::Basic.describe(40).unwrap();
        // sqrt(40 / 10) = 2
        assert_eq!(d.units()[1].x, 40.0);
        assert!(matches!(
            d.units()[0].shape,
            UnitShape::Cylinder { radius, height } if radius == 8.0 && height == 16.0
        ));
        assert_eq!(d.connections()[0].z, 6.0);
        assert_eq!(d.description(), "Basic 40 MLD water treatment plant");
    }

    #[test]
    fn test_dimensions_rounded_to_two_decimals() {
        let d = PlantTemplate::Basic.describe(150).unwrap();
        for unit in d.units() {
            let scaled = unit.x * 100.0;
            assert_relative_eq!(scaled, scaled.round(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_filter_bank_layout() {
        let d = PlantTemplate::FilterBank { count: 3 }.describe(10).unwrap();
        assert_eq!(d.kind(), PlantKind::RapidSandFilters);
        // Three filters plus two headers
        assert_eq!(d.units().len(), 5);
        assert_eq!(d.units()[2].x, 14.0);
        let header = &d.units()[3];
        assert_eq!(header.x, 7.0);
        assert_eq!(header.y, 3.0);
        assert!(matches!(header.shape, UnitShape::Pipe { length, .. } if length == 21.0));
        assert!(d.connections().is_empty());
    }

    #[test]
    fn test_component_templates_have_no_connections() {
        for template in [
            PlantTemplate::Intake,
            PlantTemplate::Clarifier,
            PlantTemplate::Storage,
        ] {
            let d = template.describe(10).unwrap();
            assert!(!d.units().is_empty());
            assert!(d.connections().is_empty());
            assert_eq!(d.capacity_mld(), None);
        }
    }

    #[test]
    fn test_explicit_chain() {
        let units = vec![
            Unit::new(cylinder(5.0, 10.0), 0.0),
            Unit::new(block(3.0, 3.0, 3.0), 20.0),
            Unit::new(block(3.0, 3.0, 3.0), 40.0),
        ];
        let d = PlantTemplate::Explicit { units }.describe(10).unwrap();
        assert_eq!(d.connections().len(), 2);
        assert_eq!(d.connections()[1].from, 1);
        assert_eq!(d.connections()[1].to, 2);
        assert_eq!(d.connections()[0].radius, EXPLICIT_PIPE_RADIUS);
        assert_eq!(d.connections()[0].z, EXPLICIT_PIPE_Z);
    }

    #[test]
    fn test_single_explicit_unit_has_no_connections() {
        let units = vec![Unit::new(cylinder(5.0, 10.0), 0.0)];
        let d = PlantTemplate::Explicit { units }.describe(10).unwrap();
        assert!(d.connections().is_empty());
    }
}
