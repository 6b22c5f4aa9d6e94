//! # Plant Assembly
//!
//! Puts ground, rack header, storage tank, trains and routing into one
//! scene for a given layout. The result is not yet centered.

use plant_mesh::ComponentLibrary;
use tracing::info;

use crate::layout::PlantLayout;
use crate::routing::{route_outputs, route_to_storage, storage_tank};
use crate::scene::Scene;
use crate::train::build_train;

/// Assembles the full capacity-driven plant.
///
/// # Example
///
/// ```rust
/// use plant_engine::{assemble, Capacity, PlantLayout};
/// use plant_mesh::{ComponentKind, ComponentLibrary};
///
/// let layout = PlantLayout::from_capacity(Capacity::new(200).unwrap());
/// let scene = assemble(&ComponentLibrary::default(), &layout);
/// // three mixers, three clarifiers, one storage tank
/// assert_eq!(scene.count(ComponentKind::Tank), 7);
/// assert!(scene.find("merge_header").is_some());
/// ```
pub fn assemble(library: &ComponentLibrary, layout: &PlantLayout) -> Scene {
    let mut scene = Scene::new();

    let ground = layout.ground_extents();
    scene.add(
        library
            .ground(ground.x, ground.y, ground.z)
            .map(|c| c.with_label("ground")),
    );

    let (header_start, header_end) = layout.header();
    scene.add(
        library
            .pipe(header_start, header_end, layout.main_pipe_radius)
            .map(|c| c.with_label("rack_header")),
    );

    scene.add(storage_tank(library, layout));

    let mut outputs = Vec::with_capacity(layout.trains as usize);
    for index in 0..layout.trains {
        let train = build_train(library, layout, index);
        outputs.push(train.output());
        scene.extend(train.into_components());
    }

    let merge = route_outputs(library, layout, &outputs);
    scene.extend(merge.components);
    scene.extend(route_to_storage(library, layout, merge.drop_point));

    info!(
        capacity = %layout.capacity,
        trains = layout.trains,
        scale = layout.scale,
        components = scene.len(),
        "assembled plant"
    );

    scene
}
