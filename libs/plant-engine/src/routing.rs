//! # Output Routing
//!
//! Collects train outputs at the merge line and carries the flow to the
//! storage tank. A single train drops straight to the merge line; several
//! trains drop onto a merge header and routing leaves from its far end.

use glam::DVec3;
use plant_mesh::{Component, ComponentLibrary, ElbowAxis};
use tracing::debug;

use crate::layout::PlantLayout;

/// Merge-side routing and the point storage routing starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRouting {
    pub components: Vec<Component>,
    pub drop_point: DVec3,
}

fn labeled(component: Option<Component>, label: impl Into<String>) -> Option<Component> {
    component.map(|c| c.with_label(label))
}

/// Drops every train output to the merge line and, for more than one
/// train, joins them with a merge header from the first to the last train.
///
/// # Example
///
/// ```rust
/// use plant_engine::{route_outputs, Capacity, PlantLayout};
/// use plant_mesh::ComponentLibrary;
/// use glam::DVec3;
///
/// let layout = PlantLayout::from_capacity(Capacity::new(10).unwrap());
/// let output = DVec3::new(0.0, -400.0, 35.0);
/// let routing = route_outputs(&ComponentLibrary::default(), &layout, &[output]);
/// assert_eq!(routing.components.len(), 1);
/// assert_eq!(routing.drop_point, DVec3::new(0.0, -500.0, 35.0));
/// ```
pub fn route_outputs(
    library: &ComponentLibrary,
    layout: &PlantLayout,
    outputs: &[DVec3],
) -> MergeRouting {
    let radius = layout.branch_pipe_radius;
    let merge_y = layout.merge_y;

    let mut components: Vec<Component> = outputs
        .iter()
        .enumerate()
        .filter_map(|(i, &output)| {
            let foot = DVec3::new(output.x, merge_y, output.z);
            labeled(
                library.pipe(output, foot, radius),
                format!("train{}/merge_drop", i + 1),
            )
        })
        .collect();

    let drop_point = DVec3::new(layout.last_train_x(), merge_y, layout.output_z);

    if outputs.len() > 1 {
        let start = DVec3::new(layout.base_x, merge_y, layout.output_z);
        components.extend(labeled(
            library.pipe(start, drop_point, radius),
            "merge_header",
        ));
    }

    debug!(
        outputs = outputs.len(),
        components = components.len(),
        "routed train outputs"
    );

    MergeRouting {
        components,
        drop_point,
    }
}

/// Rise, elbow, run toward the tank, elbow, final drop and inlet nozzle.
///
/// Identical for every train count; only `drop_point` differs.
pub fn route_to_storage(
    library: &ComponentLibrary,
    layout: &PlantLayout,
    drop_point: DVec3,
) -> Vec<Component> {
    let radius = layout.branch_pipe_radius;
    let top = DVec3::new(drop_point.x, drop_point.y, layout.routing_z());
    let approach = layout.storage_approach();
    let inlet = layout.storage_inlet();

    [
        ("storage/rise", library.pipe(drop_point, top, radius)),
        ("storage/elbow_rise", library.elbow_90(top, radius, ElbowAxis::Y)),
        ("storage/run", library.pipe(top, approach, radius)),
        (
            "storage/elbow_down",
            library.elbow_90(approach, radius, ElbowAxis::Z),
        ),
        ("storage/drop", library.pipe(approach, inlet, radius)),
        ("storage/nozzle", library.nozzle(inlet, radius)),
    ]
    .into_iter()
    .filter_map(|(label, component)| labeled(component, label))
    .collect()
}

/// The storage tank past the last train.
pub fn storage_tank(library: &ComponentLibrary, layout: &PlantLayout) -> Option<Component> {
    labeled(
        library.tank(
            layout.storage_x(),
            0.0,
            layout.storage_radius(),
            layout.storage_height(),
        ),
        "storage/tank",
    )
}
