//! # Description Rendering
//!
//! Turns a structured [`PlantDescription`] into a scene: cylinders become
//! upright drums, boxes become blocks and pipe units become horizontal runs
//! along X. Each connection is a straight pipe between the facing sides of
//! its two units at the connection's height.

use config::constants::PIPE_LENGTH_EPSILON;
use glam::DVec3;
use plant_mesh::{Component, ComponentLibrary};
use plant_prompt::{PlantDescription, Unit, UnitShape};
use tracing::{debug, info};

use crate::scene::Scene;

fn unit_component(library: &ComponentLibrary, unit: &Unit) -> Option<Component> {
    let position = unit.position();
    match unit.shape {
        UnitShape::Cylinder { radius, height } => library.cylinder(position, radius, height),
        UnitShape::Box {
            width,
            depth,
            height,
        } => library
            .block(position.x, position.y, width, depth, height)
            .map(|c| c.translated(DVec3::Z * position.z)),
        UnitShape::Pipe { radius, length } => {
            let half = DVec3::X * (length / 2.0);
            library.pipe(position - half, position + half, radius)
        }
    }
}

/// Pipe endpoints between the facing sides of `from` and `to`.
///
/// `None` when the units share an x or their footprints meet, leaving no
/// gap for a pipe to bridge.
fn connection_run(from: &Unit, to: &Unit, z: f64) -> Option<(DVec3, DVec3)> {
    if to.x == from.x {
        return None;
    }
    let direction = (to.x - from.x).signum();
    let start = DVec3::new(from.x + direction * from.shape.half_span_x(), from.y, z);
    let end = DVec3::new(to.x - direction * to.shape.half_span_x(), to.y, z);
    ((end.x - start.x) * direction > PIPE_LENGTH_EPSILON).then_some((start, end))
}

/// Renders every unit and connection of `description`.
///
/// Units that share an x or whose footprints touch or overlap get no
/// connection pipe.
///
/// # Example
///
/// ```rust
/// use plant_engine::render_description;
/// use plant_mesh::{ComponentKind, ComponentLibrary};
/// use plant_prompt::PromptParser;
///
/// let description = PromptParser::new()
///     .unwrap()
///     .describe("cylinder r=5 h=10 at x=0 and box w=3 d=3 h=3 at x=20")
///     .unwrap();
/// let scene = render_description(&ComponentLibrary::default(), &description);
/// assert_eq!(scene.len(), 3);
/// assert_eq!(scene.count(ComponentKind::Pipe), 1);
/// ```
pub fn render_description(library: &ComponentLibrary, description: &PlantDescription) -> Scene {
    let mut scene = Scene::new();

    for (index, unit) in description.units().iter().enumerate() {
        let label = unit
            .name
            .clone()
            .unwrap_or_else(|| format!("unit{}", index + 1));
        scene.add(unit_component(library, unit).map(|c| c.with_label(label)));
    }

    for (index, (connection, from, to)) in description.edges().enumerate() {
        let Some((start, end)) = connection_run(from, to, connection.z) else {
            debug!(
                from = connection.from,
                to = connection.to,
                "skipping connection between touching units"
            );
            continue;
        };
        scene.add(
            library
                .pipe(start, end, connection.radius)
                .map(|c| c.with_label(format!("connection{}", index + 1))),
        );
    }

    info!(
        kind = ?description.kind(),
        units = description.units().len(),
        connections = description.connections().len(),
        components = scene.len(),
        "rendered plant description"
    );

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plant_mesh::ComponentKind;
    use plant_prompt::{Connection, PlantKind, PlantTemplate};

    fn library() -> ComponentLibrary {
        ComponentLibrary::default()
    }

    #[test]
    fn test_connection_bridges_facing_sides() {
        let units = vec![
            Unit::new(
                UnitShape::Cylinder {
                    radius: 5.0,
                    height: 10.0,
                },
                0.0,
            ),
            Unit::new(
                UnitShape::Box {
                    width: 4.0,
                    depth: 4.0,
                    height: 4.0,
                },
                20.0,
            ),
        ];
        let connections = vec![Connection {
            from: 0,
            to: 1,
            radius: 1.0,
            z: 3.0,
        }];
        let d = PlantDescription::new(PlantKind::SimpleWtp, "two", units, connections).unwrap();
        let scene = render_description(&library(), &d);

        let pipe = scene.find("connection1").unwrap();
        let (min, max) = pipe.mesh().bounding_box();
        assert_relative_eq!(min.x, 5.0, epsilon = 1e-6);
        assert_relative_eq!(max.x, 18.0, epsilon = 1e-6);
        assert_relative_eq!(max.z, 4.0, epsilon = 1e-6);
    }

    fn cylinder_then_box(box_x: f64, box_width: f64) -> PlantDescription {
        let units = vec![
            Unit::new(
                UnitShape::Cylinder {
                    radius: 5.0,
                    height: 10.0,
                },
                0.0,
            ),
            Unit::new(
                UnitShape::Box {
                    width: box_width,
                    depth: 3.0,
                    height: 3.0,
                },
                box_x,
            ),
        ];
        let connections = vec![Connection {
            from: 0,
            to: 1,
            radius: 1.2,
            z: 3.0,
        }];
        PlantDescription::new(PlantKind::SimpleWtp, "pair", units, connections).unwrap()
    }

    #[test]
    fn test_overlapping_units_get_no_connection() {
        // Box spans x 0..20, swallowing the cylinder's right wall at x = 5
        let scene = render_description(&library(), &cylinder_then_box(10.0, 20.0));
        assert_eq!(scene.len(), 2);
        assert!(scene.find("connection1").is_none());
    }

    #[test]
    fn test_touching_units_get_no_connection() {
        let scene = render_description(&library(), &cylinder_then_box(6.5, 3.0));
        assert!(scene.find("connection1").is_none());
    }

    #[test]
    fn test_units_at_same_x_get_no_connection() {
        let scene = render_description(&library(), &cylinder_then_box(0.0, 3.0));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.count(ComponentKind::Pipe), 0);
    }

    #[test]
    fn test_connection_runs_right_to_left() {
        let scene = render_description(&library(), &cylinder_then_box(-20.0, 4.0));
        let (min, max) = scene.find("connection1").unwrap().mesh().bounding_box();
        assert_relative_eq!(min.x, -18.0, epsilon = 1e-6);
        assert_relative_eq!(max.x, -5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_raised_units_keep_their_height() {
        let d = PlantTemplate::Storage.describe(10).unwrap();
        let scene = render_description(&library(), &d);
        assert_eq!(scene.len(), 4);

        let roof = &scene.components()[1];
        let (min, max) = roof.mesh().bounding_box();
        assert_relative_eq!(min.z, 8.0, epsilon = 1e-9);
        assert_relative_eq!(max.z, 8.5, epsilon = 1e-9);
    }

    #[test]
    fn test_complete_template_renders_every_part() {
        let d = PlantTemplate::Complete.describe(40).unwrap();
        let scene = render_description(&library(), &d);
        assert_eq!(scene.count(ComponentKind::Tank), 4);
        assert_eq!(scene.count(ComponentKind::Block), 2);
        assert_eq!(scene.count(ComponentKind::Pipe), 5);
        assert!(scene.find("Clarifier").is_some());
    }

    #[test]
    fn test_pipe_unit_centered_on_position() {
        let d = PlantTemplate::Intake.describe(10).unwrap();
        let scene = render_description(&library(), &d);
        let pipe = &scene.components()[2];
        let (min, max) = pipe.mesh().bounding_box();
        assert_relative_eq!(min.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(max.x, 9.0, epsilon = 1e-6);
        assert_eq!(pipe.label(), "unit3");
    }
}
