//! # Plant Layout
//!
//! Every plant-level distance, derived once from a [`Capacity`]. All values
//! are linear in the capacity scale factor, except the ground thickness.

use config::constants::{
    BRANCH_PIPE_RADIUS, GROUND_DEPTH, GROUND_MARGIN, GROUND_THICKNESS, HEADER_LEAD,
    MAIN_PIPE_RADIUS, MERGE_Y, OUTPUT_Z, RACK_HEIGHT, RACK_Y, ROUTING_Z, STORAGE_CLEARANCE,
    STORAGE_HEIGHT, STORAGE_INLET_Z, STORAGE_OFFSET, STORAGE_RADIUS, TRAIN_SPACING,
};
use glam::DVec3;
use serde::Serialize;

use crate::capacity::Capacity;

/// Derived layout parameters for one plant.
///
/// # Example
///
/// ```rust
/// use plant_engine::{Capacity, PlantLayout};
///
/// let layout = PlantLayout::from_capacity(Capacity::new(200).unwrap());
/// assert_eq!(layout.trains, 3);
/// assert_eq!(layout.train_x(1), 0.0);
/// assert_eq!(layout.last_train_x(), layout.train_spacing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlantLayout {
    pub capacity: Capacity,
    pub scale: f64,
    pub trains: u32,
    pub rack_y: f64,
    pub rack_height: f64,
    pub main_pipe_radius: f64,
    pub branch_pipe_radius: f64,
    pub train_spacing: f64,
    /// X of the first train; centers the row on X = 0.
    pub base_x: f64,
    pub merge_y: f64,
    pub output_z: f64,
}

impl PlantLayout {
    pub fn from_capacity(capacity: Capacity) -> Self {
        let scale = capacity.scale();
        let trains = capacity.train_count();
        let train_spacing = TRAIN_SPACING * scale;

        Self {
            capacity,
            scale,
            trains,
            rack_y: RACK_Y * scale,
            rack_height: RACK_HEIGHT * scale,
            main_pipe_radius: MAIN_PIPE_RADIUS * scale,
            branch_pipe_radius: BRANCH_PIPE_RADIUS * scale,
            train_spacing,
            base_x: -((trains - 1) as f64 / 2.0) * train_spacing,
            merge_y: MERGE_Y * scale,
            output_z: OUTPUT_Z * scale,
        }
    }

    /// X offset of train `index`.
    pub fn train_x(&self, index: u32) -> f64 {
        self.base_x + index as f64 * self.train_spacing
    }

    pub fn train_offsets(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.trains).map(|i| self.train_x(i))
    }

    pub fn last_train_x(&self) -> f64 {
        self.train_x(self.trains - 1)
    }

    /// Rack header endpoints.
    pub fn header(&self) -> (DVec3, DVec3) {
        (
            DVec3::new(
                self.base_x - HEADER_LEAD * self.scale,
                self.rack_y,
                self.rack_height,
            ),
            DVec3::new(self.last_train_x(), self.rack_y, self.rack_height),
        )
    }

    pub fn storage_x(&self) -> f64 {
        self.last_train_x() + STORAGE_OFFSET * self.scale
    }

    pub fn storage_radius(&self) -> f64 {
        STORAGE_RADIUS * self.scale
    }

    pub fn storage_height(&self) -> f64 {
        STORAGE_HEIGHT * self.scale
    }

    /// Height storage routing rises to.
    pub fn routing_z(&self) -> f64 {
        ROUTING_Z * self.scale
    }

    /// Where the routing run turns down toward the tank.
    pub fn storage_approach(&self) -> DVec3 {
        DVec3::new(
            self.storage_x() - self.storage_radius() - STORAGE_CLEARANCE * self.scale,
            0.0,
            self.routing_z(),
        )
    }

    /// Storage inlet on the tank wall.
    pub fn storage_inlet(&self) -> DVec3 {
        DVec3::new(
            self.storage_x() - self.storage_radius(),
            0.0,
            STORAGE_INLET_Z * self.scale,
        )
    }

    /// Ground slab extents: the train row plus margin, fixed depth and
    /// thickness.
    pub fn ground_extents(&self) -> DVec3 {
        DVec3::new(
            self.train_spacing * self.trains as f64 + GROUND_MARGIN * self.scale,
            GROUND_DEPTH * self.scale,
            GROUND_THICKNESS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn layout(mld: u32) -> PlantLayout {
        PlantLayout::from_capacity(Capacity::new(mld).unwrap())
    }

    #[test]
    fn test_single_train_centered() {
        let l = layout(10);
        assert_eq!(l.trains, 1);
        assert_eq!(l.base_x, 0.0);
        assert_eq!(l.last_train_x(), 0.0);
        assert_eq!(l.header().0.x, -200.0);
    }

    #[test]
    fn test_train_row_symmetric() {
        for mld in [10, 100, 200, 400] {
            let l = layout(mld);
            let offsets: Vec<f64> = l.train_offsets().collect();
            assert_eq!(offsets.len() as u32, l.trains);
            assert_relative_eq!(offsets[0], -offsets[offsets.len() - 1], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_values_scale_linearly() {
        let l = layout(160);
        assert_eq!(l.scale, 2.0);
        assert_eq!(l.rack_y, 500.0);
        assert_eq!(l.rack_height, 180.0);
        assert_eq!(l.main_pipe_radius, 10.0);
        assert_eq!(l.branch_pipe_radius, 6.0);
        assert_eq!(l.merge_y, -1000.0);
        assert_eq!(l.output_z, 70.0);
    }

    #[test]
    fn test_storage_beyond_last_train() {
        let l = layout(200);
        // scale 2.5, trains 3, spacing 1000
        assert_eq!(l.last_train_x(), 1000.0);
        assert_eq!(l.storage_x(), 1875.0);
        assert_eq!(l.storage_radius(), 125.0);
        assert_eq!(l.storage_inlet(), DVec3::new(1750.0, 0.0, 150.0));
        assert_eq!(l.storage_approach(), DVec3::new(1700.0, 0.0, 225.0));
    }

    #[test]
    fn test_ground_extents() {
        let l = layout(400);
        // scale 5, trains 4
        assert_eq!(l.ground_extents(), DVec3::new(2000.0 * 4.0 + 4000.0, 7500.0, 20.0));
    }
}
