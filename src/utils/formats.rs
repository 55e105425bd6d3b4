use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use crate::utils::RemoverError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
}

impl ImageFormat {
    pub const ALL: [Self; 2] = [Self::JPEG, Self::PNG];

    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
        }
    }

    /// Check if the extension matches this format, ignoring ASCII case
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions().iter().any(|known| ext.eq_ignore_ascii_case(known))
    }

    /// Derives the target format from an output path's extension.
    ///
    /// The source file's actual format plays no part: `photo.png` holding JPEG
    /// bytes is still written as PNG.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RemoverError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| RemoverError::unsupported(
                format!("File has no extension: {}", path.display())
            ))?;

        Self::from_str(ext)
    }

    /// Maps a content-sniffed `image` format, if it is one we handle.
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(Self::JPEG),
            image::ImageFormat::Png => Some(Self::PNG),
            _ => None,
        }
    }
}

impl FromStr for ImageFormat {
    type Err = RemoverError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|format| format.matches_extension(ext))
            .ok_or_else(|| RemoverError::unsupported(format!("Unsupported file format: {}", ext)))
    }
}

/// Returns `true` when `path` carries a JPEG or PNG extension, ignoring case.
pub fn has_supported_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| ImageFormat::ALL.iter().any(|format| format.matches_extension(e)))
        .unwrap_or(false)
}
