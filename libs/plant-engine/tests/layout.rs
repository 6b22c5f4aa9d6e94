use plant_engine::{assemble, Capacity, PlantGenerator, GeneratorConfig, PlantLayout};
use plant_mesh::{ComponentKind, ComponentLibrary};

fn trains(mld: u32) -> u32 {
    Capacity::new(mld).unwrap().train_count()
}

#[test]
fn train_count_boundaries() {
    for (mld, expected) in [(50, 1), (51, 2), (150, 2), (151, 3), (300, 3), (301, 4)] {
        assert_eq!(trains(mld), expected, "{mld} MLD");
    }
}

#[test]
fn scale_examples() {
    assert_eq!(Capacity::new(80).unwrap().scale(), 1.0);
    assert_eq!(Capacity::new(40).unwrap().scale(), 1.0);
    assert_eq!(Capacity::new(160).unwrap().scale(), 2.0);
}

#[test]
fn zero_capacity_rejected() {
    assert!(Capacity::new(0).is_err());
}

#[test]
fn centered_for_every_train_count() {
    let generator = PlantGenerator::new(GeneratorConfig::default()).unwrap();
    for mld in [10, 100, 200, 1000] {
        let capacity = Capacity::new(mld).unwrap();
        let scene = generator.build_scene(capacity).unwrap();
        let centroid = scene.centroid().unwrap();
        assert!(
            centroid.length() < 1e-6,
            "{mld} MLD centroid {centroid:?} not at origin"
        );
        assert_eq!(
            scene.count(ComponentKind::Block) as u32,
            capacity.train_count()
        );
    }
}

#[test]
fn every_train_has_its_triple() {
    let layout = PlantLayout::from_capacity(Capacity::new(400).unwrap());
    let scene = assemble(&ComponentLibrary::default(), &layout);
    for n in 1..=4 {
        for part in ["mixer", "clarifier", "filter", "nozzle"] {
            assert!(scene.find(&format!("train{n}/{part}")).is_some(), "train{n}/{part}");
        }
    }
    assert!(scene.find("train5/mixer").is_none());
}
