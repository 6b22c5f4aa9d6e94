//! # Plant Descriptions
//!
//! The structured form a prompt is reduced to: a list of units, each a
//! tagged shape at a position, plus connection edges between units by
//! index. Connections are checked against the unit list when a description
//! is built, so consumers can index `units` without further checks.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::DescriptionError;

/// Geometry of one unit. Serialized with an inline `shape` tag.
///
/// # Example
///
/// ```rust
/// use plant_prompt::UnitShape;
///
/// let json = serde_json::to_string(&UnitShape::Cylinder { radius: 5.0, height: 10.0 }).unwrap();
/// assert_eq!(json, r#"{"shape":"cylinder","radius":5.0,"height":10.0}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum UnitShape {
    /// Upright cylinder standing on its position.
    Cylinder { radius: f64, height: f64 },
    /// Axis-aligned box centered on its position in XY.
    Box { width: f64, depth: f64, height: f64 },
    /// Horizontal pipe along X centered on its position.
    Pipe { radius: f64, length: f64 },
}

impl UnitShape {
    /// Half of the unit's extent along X.
    pub fn half_span_x(&self) -> f64 {
        match *self {
            Self::Cylinder { radius, .. } => radius,
            Self::Box { width, .. } => width / 2.0,
            Self::Pipe { length, .. } => length / 2.0,
        }
    }
}

/// One plant unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub shape: UnitShape,
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    /// Display color hint (RGB, 0..1). Mesh colors stay fixed per kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 3]>,
}

impl Unit {
    /// A unit on the X axis.
    pub fn new(shape: UnitShape, x: f64) -> Self {
        Self {
            name: None,
            shape,
            x,
            y: 0.0,
            z: 0.0,
            color: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, y: f64, z: f64) -> Self {
        self.y = y;
        self.z = z;
        self
    }

    pub fn colored(mut self, color: [f32; 3]) -> Self {
        self.color = Some(color);
        self
    }

    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

/// A pipe between two units, run at height `z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub radius: f64,
    pub z: f64,
}

/// Which template produced a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    CompleteSmallWtp,
    IntakeStructure,
    CircularClarifier,
    RapidSandFilters,
    ClearWaterReservoir,
    SimpleWtp,
}

/// A validated plant description.
///
/// # Example
///
/// ```rust
/// use plant_prompt::{Connection, PlantDescription, PlantKind, Unit, UnitShape};
///
/// let units = vec![
///     Unit::new(UnitShape::Cylinder { radius: 5.0, height: 10.0 }, 0.0),
///     Unit::new(UnitShape::Box { width: 3.0, depth: 3.0, height: 3.0 }, 20.0),
/// ];
/// let bad = vec![Connection { from: 0, to: 2, radius: 1.2, z: 3.0 }];
/// assert!(PlantDescription::new(PlantKind::SimpleWtp, "two units", units, bad).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantDescription {
    #[serde(rename = "type")]
    kind: PlantKind,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capacity_mld: Option<u32>,
    units: Vec<Unit>,
    #[serde(default)]
    connections: Vec<Connection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prompt: Option<String>,
}

impl PlantDescription {
    /// Builds a description, rejecting connections that do not reference
    /// two distinct existing units.
    pub fn new(
        kind: PlantKind,
        description: impl Into<String>,
        units: Vec<Unit>,
        connections: Vec<Connection>,
    ) -> Result<Self, DescriptionError> {
        let description = Self {
            kind,
            description: description.into(),
            capacity_mld: None,
            units,
            connections,
            prompt: None,
        };
        description.validate()?;
        Ok(description)
    }

    /// Parses and validates a JSON description.
    pub fn from_json(json: &str) -> Result<Self, DescriptionError> {
        let description: Self = serde_json::from_str(json)?;
        description.validate()?;
        Ok(description)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DescriptionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_capacity(mut self, mld: u32) -> Self {
        self.capacity_mld = Some(mld);
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn kind(&self) -> PlantKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn capacity_mld(&self) -> Option<u32> {
        self.capacity_mld
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Endpoint units of every connection, in connection order.
    pub fn edges(&self) -> impl Iterator<Item = (&Connection, &Unit, &Unit)> {
        self.connections
            .iter()
            .map(|c| (c, &self.units[c.from], &self.units[c.to]))
    }

    fn validate(&self) -> Result<(), DescriptionError> {
        let unit_count = self.units.len();
        for (index, connection) in self.connections.iter().enumerate() {
            for unit in [connection.from, connection.to] {
                if unit >= unit_count {
                    return Err(DescriptionError::DanglingConnection {
                        index,
                        unit,
                        unit_count,
                    });
                }
            }
            if connection.from == connection.to {
                return Err(DescriptionError::SelfConnection {
                    index,
                    unit: connection.from,
                });
            }
        }
        Ok(())
    }
}
