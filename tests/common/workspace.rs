//! A scratch directory with the usual converter inputs and outputs.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tempfile::TempDir;
use wboxer::services::OutputPaths;

pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn outputs(&self) -> OutputPaths {
        OutputPaths::in_dir(self.dir.path())
    }

    /// Save `image` as PNG under `name` and return its path.
    pub fn write_png(&self, name: &str, image: &RgbaImage) -> PathBuf {
        let path = self.file(name);
        image
            .save_with_format(&path, image::ImageFormat::Png)
            .expect("failed to write test image");
        path
    }

    pub fn write_text(&self, name: &str, content: &str) -> PathBuf {
        let path = self.file(name);
        std::fs::write(&path, content).expect("failed to write test file");
        path
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
