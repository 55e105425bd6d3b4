//! Maps a pixel buffer and encode settings onto the `image` crate's encoders.

use std::borrow::Cow;
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;
use tracing::debug;

use crate::core::{ImageAsset, PngCompression};
use crate::utils::{ImageFormat, RemoverError, RemoverResult, validate_quality};

use super::container::scan_metadata;

/// Encodes `asset`'s pixels as `target`.
///
/// `quality` drives the JPEG quantisation (100 = highest fidelity) and must be in
/// `0..=100`; it is not clamped. PNG accepts and ignores it, whatever the value.
/// Nothing from `asset.metadata` is written.
pub fn encode(
    asset: &ImageAsset,
    target: ImageFormat,
    quality: u32,
    png_compression: PngCompression,
) -> RemoverResult<Vec<u8>> {
    let bytes = match target {
        ImageFormat::JPEG => encode_jpeg(&asset.pixels, quality)?,
        ImageFormat::PNG => encode_png(&asset.pixels, png_compression)?,
    };

    debug!(
        "Encoded {}×{} as {:?} ({} bytes)",
        asset.width,
        asset.height,
        target,
        bytes.len()
    );

    Ok(bytes)
}

/// Saves `pixels` as baseline JPEG.
///
/// The encoder writes a bare JFIF header and nothing else ahead of the frame.
fn encode_jpeg(pixels: &DynamicImage, quality: u32) -> RemoverResult<Vec<u8>> {
    let quality = validate_quality(quality)?;
    let pixels = jpeg_layout(pixels);

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    pixels
        .write_with_encoder(encoder)
        .map_err(|e| RemoverError::encoding(format!("JPEG save failed: {e}")))?;

    Ok(bytes)
}

/// Saves `pixels` as PNG with adaptive filtering.
fn encode_png(pixels: &DynamicImage, compression: PngCompression) -> RemoverResult<Vec<u8>> {
    let pixels = png_layout(pixels);
    let compression = match compression {
        PngCompression::Fast => CompressionType::Fast,
        PngCompression::Default => CompressionType::Default,
        PngCompression::Best => CompressionType::Best,
    };

    let mut bytes = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut bytes, compression, FilterType::Adaptive);
    pixels
        .write_with_encoder(encoder)
        .map_err(|e| RemoverError::encoding(format!("PNG save failed: {e}")))?;

    Ok(bytes)
}

/// JPEG carries 8-bit gray or 8-bit RGB only. Alpha is dropped, 16-bit is narrowed.
fn jpeg_layout(pixels: &DynamicImage) -> Cow<'_, DynamicImage> {
    match pixels {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(pixels),
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => Cow::Owned(DynamicImage::ImageLuma8(pixels.to_luma8())),
        _ => Cow::Owned(DynamicImage::ImageRgb8(pixels.to_rgb8())),
    }
}

/// PNG stores 8- and 16-bit buffers as they are; float buffers go to RGBA16.
fn png_layout(pixels: &DynamicImage) -> Cow<'_, DynamicImage> {
    match pixels {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            Cow::Owned(DynamicImage::ImageRgba16(pixels.to_rgba16()))
        }
        _ => Cow::Borrowed(pixels),
    }
}

/// Confirms that encoded bytes carry no metadata container at all.
///
/// Re-scans the container structure and runs an independent EXIF reader over
/// the bytes; either finding something is a [`RemoverError::ResidualMetadata`].
pub fn verify_clean(bytes: &[u8]) -> RemoverResult<()> {
    let residual = scan_metadata(bytes)?;
    if !residual.is_empty() {
        let labels: Vec<String> = residual.iter().map(|entry| entry.label()).collect();
        return Err(RemoverError::residual(format!(
            "encoded output still carries {}",
            labels.join(", ")
        )));
    }

    match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) if exif.fields().next().is_some() => {
            Err(RemoverError::residual("encoded output still carries EXIF fields"))
        }
        Ok(_) => Ok(()),
        Err(e) => {
            // Damaged EXIF errors out here, but its APP1/eXIf container was already rejected above
            debug!("EXIF reader found nothing: {e}");
            Ok(())
        }
    }
}
