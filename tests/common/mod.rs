//! Shared helpers for fontgrid integration tests.
//!
//! Fake font bytes are four copies of the face's cell width.

#![allow(dead_code)]

use std::sync::Arc;

use fontgrid::{BuiltinFaces, Library, SharedGridSet};
use fontgrid_fonts::{Face, FaceData, FaceLoader, FaceMetrics, FontError, LoadOptions};

/// Loader that reads the fake byte format.
pub struct FakeLoader;

impl FaceLoader for FakeLoader {
    fn load(&self, name: &str, data: FaceData, options: &LoadOptions) -> Result<Face, FontError> {
        let bytes = data.bytes();
        let Some(&width) = bytes.first() else {
            return Err(FontError::InvalidFontData {
                name: name.to_string(),
            });
        };
        let metrics = FaceMetrics {
            cell_width: f64::from(width),
            ascent: 12.0,
            descent: -4.0,
            ..FaceMetrics::default()
        };
        let color = bytes.len() > 4;
        Ok(Face::new(name, data, metrics, color, options.clone()))
    }
}

pub fn fake_builtin() -> BuiltinFaces {
    BuiltinFaces::new(
        [
            FaceData::new(vec![9; 4]),
            FaceData::new(vec![9; 4]),
            FaceData::new(vec![9; 4]),
            FaceData::new(vec![9; 4]),
        ],
        FaceData::new(vec![18; 5]),
        FaceData::new(vec![18; 4]),
    )
}

/// A registry over the fake built-in faces with no discovery.
pub fn offline_set() -> SharedGridSet {
    SharedGridSet::without_discovery(Library::with_loader(fake_builtin(), Arc::new(FakeLoader)))
}

/// Write `yaml` to a config file inside `dir`.
pub fn write_config(dir: &tempfile::TempDir, yaml: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}
