//! # Export
//!
//! Writes a centered scene as a `.glb` scene file and a `.stl` solid under
//! timestamped names. The `.glb` name is claimed with create-new semantics,
//! so two requests in the same second end up with different suffixes
//! instead of overwriting each other.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let paths = export_scene(&scene, Path::new("exports"), &timestamp)?;
//! println!("{}", paths.scene.display());
//! ```

pub mod glb;
pub mod stl;

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use config::constants::{EXPORT_FILE_PREFIX, MAX_EXPORT_SUFFIX};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::EngineError;
use crate::scene::Scene;

/// Where one export landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportPaths {
    /// Multi-object scene (`.glb`).
    pub scene: PathBuf,
    /// Merged solid (`.stl`).
    pub solid: PathBuf,
}

impl ExportPaths {
    fn for_stem(dir: &Path, stem: &str) -> Self {
        Self {
            scene: dir.join(format!("{stem}.glb")),
            solid: dir.join(format!("{stem}.stl")),
        }
    }

    /// File stem shared by both artifacts.
    pub fn stem(&self) -> Option<&str> {
        self.scene.file_stem().and_then(|s| s.to_str())
    }

    fn remove(&self) {
        for path in [&self.scene, &self.solid] {
            if let Err(err) = fs::remove_file(path) {
                if err.kind() != ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %err, "could not remove partial export");
                }
            }
        }
    }
}

/// `wtp_<timestamp>`, then `wtp_<timestamp>_1`, `_2`, ... until both names
/// are free. Returns the paths and the created, empty `.glb` file.
pub fn reserve_paths(dir: &Path, timestamp: &str) -> Result<(ExportPaths, File), EngineError> {
    let base = format!("{EXPORT_FILE_PREFIX}_{timestamp}");

    for suffix in 0..MAX_EXPORT_SUFFIX {
        let stem = match suffix {
            0 => base.clone(),
            n => format!("{base}_{n}"),
        };
        let paths = ExportPaths::for_stem(dir, &stem);
        if paths.solid.exists() {
            continue;
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&paths.scene)
        {
            Ok(file) => return Ok((paths, file)),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(EngineError::io(&paths.scene, err)),
        }
    }

    Err(EngineError::NameCollision {
        stem: base,
        attempts: MAX_EXPORT_SUFFIX,
    })
}

/// Validates `scene` and writes both artifacts into `dir`.
///
/// Fails without touching the directory when the merged scene has no
/// triangles or carries out-of-range indices or non-finite vertices. If a
/// write fails after the names were claimed, both files are removed.
pub fn export_scene(scene: &Scene, dir: &Path, timestamp: &str) -> Result<ExportPaths, EngineError> {
    let merged = scene.merged()?;
    if merged.is_empty() {
        return Err(EngineError::EmptyScene);
    }
    merged
        .check_indices()
        .map_err(|e| EngineError::invalid_mesh(e.to_string()))?;

    fs::create_dir_all(dir).map_err(|e| EngineError::io(dir, e))?;
    let (paths, mut file) = reserve_paths(dir, timestamp)?;

    let written = glb::write_glb(&mut file, &paths.scene, scene).and_then(|_| {
        stl::write_binary_stl(&paths.solid, &merged, paths.stem().unwrap_or(EXPORT_FILE_PREFIX))
    });
    drop(file);

    if let Err(err) = written {
        paths.remove();
        return Err(err);
    }

    info!(
        scene = %paths.scene.display(),
        solid = %paths.solid.display(),
        components = scene.len(),
        triangles = merged.triangle_count(),
        "exported plant"
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plant_mesh::ComponentLibrary;

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.add(ComponentLibrary::default().block(0.0, 0.0, 1.0, 1.0, 1.0));
        scene
    }

    #[test]
    fn test_reserve_adds_suffix_on_collision() {
        let dir = tempfile::tempdir().unwrap();
        let (first, _) = reserve_paths(dir.path(), "20240101_120000").unwrap();
        let (second, _) = reserve_paths(dir.path(), "20240101_120000").unwrap();
        assert_eq!(first.stem(), Some("wtp_20240101_120000"));
        assert_eq!(second.stem(), Some("wtp_20240101_120000_1"));
    }

    #[test]
    fn test_reserve_skips_taken_solid_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("wtp_stamp.stl"), b"").unwrap();
        let (paths, _) = reserve_paths(dir.path(), "stamp").unwrap();
        assert_eq!(paths.stem(), Some("wtp_stamp_1"));
    }

    #[test]
    fn test_export_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = export_scene(&scene(), dir.path(), "stamp").unwrap();
        assert!(fs::metadata(&paths.scene).unwrap().len() > 0);
        assert_eq!(fs::metadata(&paths.solid).unwrap().len(), 84 + 12 * 50);
    }

    #[test]
    fn test_same_second_exports_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let a = export_scene(&scene(), dir.path(), "stamp").unwrap();
        let b = export_scene(&scene(), dir.path(), "stamp").unwrap();
        assert_ne!(a.scene, b.scene);
        assert_ne!(a.solid, b.solid);
        assert!(a.scene.exists() && b.scene.exists());
    }

    #[test]
    fn test_empty_scene_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        assert!(matches!(
            export_scene(&Scene::new(), &out, "stamp"),
            Err(EngineError::EmptyScene)
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_unwritable_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"not a directory").unwrap();
        assert!(matches!(
            export_scene(&scene(), &blocker, "stamp"),
            Err(EngineError::Io { .. })
        ));
    }
}
