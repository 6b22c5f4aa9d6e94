//! # Treatment Trains
//!
//! One train is a mixer tank, a clarifier tank and a filter block in a
//! column along -Y, fed from the rack header through a nozzle on the mixer.
//! Train dimensions come from `config` and are multiples of the layout
//! scale.

use config::constants::{
    CLARIFIER_HEIGHT, CLARIFIER_INLET_Z, CLARIFIER_RADIUS, CLARIFIER_Y, FILTER_DEPTH,
    FILTER_HEIGHT, FILTER_WIDTH, FILTER_Y, MIXER_HEIGHT, MIXER_NOZZLE_Z, MIXER_RADIUS, RACK_DROP,
};
use glam::DVec3;
use plant_mesh::{Component, ComponentLibrary, ElbowAxis};

use crate::layout::PlantLayout;

/// One parallel treatment line.
#[derive(Debug, Clone, PartialEq)]
pub struct Train {
    index: u32,
    x: f64,
    components: Vec<Component>,
    output: DVec3,
}

impl Train {
    /// Zero-based position in the row.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// `train1`, `train2`, ...
    pub fn label(&self) -> String {
        train_label(self.index)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn into_components(self) -> Vec<Component> {
        self.components
    }

    /// Filter discharge point, where output routing starts.
    pub fn output(&self) -> DVec3 {
        self.output
    }
}

fn train_label(index: u32) -> String {
    format!("train{}", index + 1)
}

/// Builds train `index` of `layout`.
///
/// Feed path: rack drop, elbow, vertical run to nozzle height, horizontal
/// run onto the mixer nozzle, then mixer to clarifier and clarifier to
/// filter.
///
/// # Example
///
/// ```rust
/// use plant_engine::{build_train, Capacity, PlantLayout};
/// use plant_mesh::ComponentLibrary;
///
/// let layout = PlantLayout::from_capacity(Capacity::new(10).unwrap());
/// let train = build_train(&ComponentLibrary::default(), &layout, 0);
/// assert_eq!(train.label(), "train1");
/// assert_eq!(train.output().y, -400.0);
/// ```
pub fn build_train(library: &ComponentLibrary, layout: &PlantLayout, index: u32) -> Train {
    let s = layout.scale;
    let x = layout.train_x(index);
    let radius = layout.branch_pipe_radius;
    let prefix = train_label(index);

    let nozzle_z = MIXER_NOZZLE_Z * s;
    let branch_y = layout.rack_y - RACK_DROP * s;
    let rack = DVec3::new(x, layout.rack_y, layout.rack_height);
    let bend = DVec3::new(x, branch_y, layout.rack_height);
    let riser_foot = DVec3::new(x, branch_y, nozzle_z);
    let nozzle = DVec3::new(x, 0.0, nozzle_z);
    let clarifier_inlet = DVec3::new(x, CLARIFIER_Y * s, CLARIFIER_INLET_Z * s);
    let output = DVec3::new(x, FILTER_Y * s, layout.output_z);

    let parts = [
        (
            "mixer",
            library.tank(x, 0.0, MIXER_RADIUS * s, MIXER_HEIGHT * s),
        ),
        (
            "clarifier",
            library.tank(x, CLARIFIER_Y * s, CLARIFIER_RADIUS * s, CLARIFIER_HEIGHT * s),
        ),
        (
            "filter",
            library.block(
                x,
                FILTER_Y * s,
                FILTER_WIDTH * s,
                FILTER_DEPTH * s,
                FILTER_HEIGHT * s,
            ),
        ),
        ("nozzle", library.nozzle(nozzle, radius)),
        ("drop", library.pipe(rack, bend, radius)),
        ("elbow", library.elbow_90(bend, radius, ElbowAxis::Z)),
        ("vertical", library.pipe(bend, riser_foot, radius)),
        ("horizontal", library.pipe(riser_foot, nozzle, radius)),
        ("mixer_to_clarifier", library.pipe(nozzle, clarifier_inlet, radius)),
        ("clarifier_to_filter", library.pipe(clarifier_inlet, output, radius)),
    ];

    let components = parts
        .into_iter()
        .filter_map(|(name, component)| {
            component.map(|c| c.with_label(format!("{prefix}/{name}")))
        })
        .collect();

    Train {
        index,
        x,
        components,
        output,
    }
}
