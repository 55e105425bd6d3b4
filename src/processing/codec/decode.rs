use std::path::Path;
use tracing::debug;

use crate::core::ImageAsset;
use crate::utils::{ImageFormat, RemoverError, RemoverResult, extract_filename};

use super::container::scan_metadata;

/// Reads and decodes the image at `path`.
pub fn decode(path: impl AsRef<Path>) -> RemoverResult<ImageAsset> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| RemoverError::io(format!("Cannot read '{}': {e}", path.display())))?;

    decode_bytes(path, &bytes)
}

/// Decodes `bytes` as if they were read from `path`.
///
/// The format is sniffed from the content, so a PNG saved as `.jpg` still decodes.
pub fn decode_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> RemoverResult<ImageAsset> {
    let path = path.as_ref();

    let sniffed = image::guess_format(bytes)
        .map_err(|e| RemoverError::unreadable(format!("'{}': {e}", path.display())))?;
    let source_format = ImageFormat::from_image_format(sniffed).ok_or_else(|| {
        RemoverError::unreadable(format!("'{}' is {sniffed:?}, not JPEG or PNG", path.display()))
    })?;

    let pixels = image::load_from_memory_with_format(bytes, sniffed)
        .map_err(|e| RemoverError::unreadable(format!("Failed to decode '{}': {e}", path.display())))?;
    let metadata = scan_metadata(bytes)?;

    debug!(
        "Decoded '{}': {}×{} {:?}, {} metadata entr{}",
        extract_filename(path),
        pixels.width(),
        pixels.height(),
        source_format,
        metadata.len(),
        if metadata.len() == 1 { "y" } else { "ies" }
    );

    Ok(ImageAsset::new(path, pixels, metadata, source_format))
}
