use plant_engine::export::glb::read_glb_summary;
use plant_engine::{GeneratorConfig, ModelSource, PlantGenerator};
use plant_mesh::{ComponentKind, ComponentLibrary};
use plant_prompt::PromptParser;
use glam::DVec3;

fn generator(dir: &std::path::Path) -> PlantGenerator {
    PlantGenerator::new(GeneratorConfig {
        output_dir: dir.to_path_buf(),
        ..GeneratorConfig::default()
    })
    .unwrap()
}

#[test]
fn ten_mld_single_train() {
    let dir = tempfile::tempdir().unwrap();
    let g = generator(dir.path());
    assert_eq!(g.capacity("10 MLD WTP").mld(), 10);

    let scene = g.build_scene(g.capacity("10 MLD WTP")).unwrap();
    assert_eq!(scene.with_prefix("train1/").count(), 11);
    assert_eq!(scene.with_prefix("train2/").count(), 0);
    assert!(scene.find("merge_header").is_none());
    assert!(scene.find("storage/tank").is_some());

    let model = g.generate("10 MLD WTP").unwrap();
    assert!(matches!(model.source, ModelSource::Capacity { trains: 1, .. }));
    assert!(std::fs::metadata(&model.paths.scene).unwrap().len() > 0);
    assert!(std::fs::metadata(&model.paths.solid).unwrap().len() > 0);
}

#[test]
fn two_hundred_mld_three_trains() {
    let dir = tempfile::tempdir().unwrap();
    let g = generator(dir.path());
    let prompt = "200 MLD water treatment plant";
    let capacity = g.capacity(prompt);
    assert_eq!(capacity.mld(), 200);
    assert_eq!(capacity.train_count(), 3);

    let scene = g.build_scene(capacity).unwrap();
    for n in 1..=3 {
        assert!(scene.find(&format!("train{n}/filter")).is_some());
    }
    assert_eq!(scene.count(ComponentKind::Block), 3);
    // three mixers, three clarifiers and storage
    assert_eq!(scene.count(ComponentKind::Tank), 7);

    let header = scene.find("merge_header").unwrap();
    let (min, max) = header.mesh().bounding_box();
    let first = scene.find("train1/filter").unwrap().mesh().centroid();
    let last = scene.find("train3/filter").unwrap().mesh().centroid();
    assert!((min.x - first.x).abs() < 1e-6);
    assert!((max.x - last.x).abs() < 1e-6);

    assert_eq!(scene.with_prefix("storage/").count(), 7);

    let model = g.generate(prompt).unwrap();
    let summary = read_glb_summary(&model.paths.scene).unwrap();
    assert_eq!(summary.components.len(), scene.len());
}

#[test]
fn explicit_geometry_prompt() {
    let parser = PromptParser::new().unwrap();
    let description = parser
        .describe("cylinder r=5 h=10 at x=0 and box w=3 d=3 h=3 at x=20")
        .unwrap();
    assert_eq!(description.units().len(), 2);
    assert!(description.units()[0].x < description.units()[1].x);
    assert_eq!(description.connections().len(), 1);
    assert_eq!(description.connections()[0].from, 0);
    assert_eq!(description.connections()[0].to, 1);

    let dir = tempfile::tempdir().unwrap();
    let model = generator(dir.path())
        .generate_from_description(&description)
        .unwrap();
    assert_eq!(model.components, 3);
    assert!(model.paths.scene.exists());
}

#[test]
fn overlapping_explicit_units_export_without_connection() {
    let dir = tempfile::tempdir().unwrap();
    let g = generator(dir.path());
    let description = g
        .describe("cylinder r=5 h=10 at x=0 and box w=20 d=3 h=3 at x=10")
        .unwrap();
    assert_eq!(description.connections().len(), 1);

    let scene = g.build_description_scene(&description).unwrap();
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.count(ComponentKind::Pipe), 0);
}

#[test]
fn degenerate_pipe_is_omitted_not_fatal() {
    let library = ComponentLibrary::default();
    let p = DVec3::new(5.0, -3.0, 2.0);
    assert!(library.pipe(p, p, 2.0).is_none());

    let pipe = library.pipe(DVec3::ZERO, DVec3::new(0.0, 0.0, 10.0), 2.0).unwrap();
    let (min, max) = pipe.mesh().bounding_box();
    assert!((max.z - min.z - 10.0).abs() < 1e-9);
    assert!((max.x - 2.0).abs() < 1e-9);
}

#[test]
fn unmatched_prompt_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let g = generator(dir.path());
    assert_eq!(g.capacity("make me something").mld(), 100);
    assert_eq!(
        g.describe("make me something").unwrap().capacity_mld(),
        Some(10)
    );
}
