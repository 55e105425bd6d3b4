//! File task definition and creation.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::utils::{RemoverResult, output_path_for};

/// Represents a single file moving through the strip pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTask {
    /// Position in input enumeration order; reports are sorted by it
    pub index: usize,
    /// Path to the source image file
    pub source_path: PathBuf,
    /// Path where the sanitized image will be written
    pub output_path: PathBuf,
}

impl FileTask {
    pub fn new(index: usize, source_path: PathBuf, output_dir: &Path) -> RemoverResult<Self> {
        let output_path = output_path_for(&source_path, output_dir)?;
        Ok(Self {
            index,
            source_path,
            output_path,
        })
    }

    /// Key under which output names collide on a case-insensitive filesystem.
    pub fn collision_key(&self) -> String {
        self.output_path
            .file_name()
            .map(|name| name.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default()
    }
}
