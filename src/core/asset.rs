//! In-memory image representation produced by decode and consumed by encode.

use std::path::PathBuf;
use image::DynamicImage;
use crate::utils::ImageFormat;

/// A tagged side-channel payload found in an image container.
///
/// For JPEG the tag is the full segment marker (`0xFFE1` for APP1, `0xFFFE` for
/// COM). For PNG it is the four-byte chunk type read big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub tag: u32,
    pub payload: Vec<u8>,
}

impl MetadataEntry {
    pub fn new(tag: u32, payload: Vec<u8>) -> Self {
        Self { tag, payload }
    }

    /// Human readable tag name for logs.
    pub fn label(&self) -> String {
        match self.tag {
            0xFFE0..=0xFFEF => format!("APP{}", self.tag - 0xFFE0),
            0xFFFE => "COM".to_string(),
            tag => {
                let bytes = tag.to_be_bytes();
                if bytes.iter().all(u8::is_ascii_alphabetic) {
                    String::from_utf8_lossy(&bytes).into_owned()
                } else {
                    format!("{tag:#010x}")
                }
            }
        }
    }
}

/// A decoded image: pixels plus whatever metadata the container carried.
///
/// Metadata tags are unique within one asset; repeated segments or chunks are
/// merged into a single entry at decode time.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    /// Path the asset was decoded from
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Raster buffer
    pub pixels: DynamicImage,
    /// Metadata entries in container order
    pub metadata: Vec<MetadataEntry>,
    /// Format detected from the file content, not its extension
    pub source_format: ImageFormat,
}

impl ImageAsset {
    pub fn new(
        path: impl Into<PathBuf>,
        pixels: DynamicImage,
        metadata: Vec<MetadataEntry>,
        source_format: ImageFormat,
    ) -> Self {
        Self {
            path: path.into(),
            width: pixels.width(),
            height: pixels.height(),
            pixels,
            metadata,
            source_format,
        }
    }

    pub fn has_metadata(&self) -> bool {
        !self.metadata.is_empty()
    }

    /// Looks up the entry for `tag`, if the container had one.
    pub fn metadata_entry(&self, tag: u32) -> Option<&MetadataEntry> {
        self.metadata.iter().find(|entry| entry.tag == tag)
    }
}
