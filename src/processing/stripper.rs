//! Metadata stripping by reconstruction.
//!
//! The stripped asset never inherits anything from the source container: its
//! pixel buffer is a fresh allocation filled pixel by pixel, and its metadata
//! list starts empty. No tag is inspected or special-cased.

use image::{DynamicImage, ImageBuffer, Pixel};
use tracing::debug;

use crate::core::ImageAsset;
use crate::utils::extract_filename;

/// Returns a copy of `asset` with zero metadata entries and a rebuilt pixel buffer.
///
/// Width, height, color type and bit depth are preserved. `asset` is left as it
/// was, so a caller can re-encode the original with other settings.
pub fn strip(asset: &ImageAsset) -> ImageAsset {
    let pixels = rebuild(&asset.pixels);

    debug!(
        "Stripped {} metadata entr{} from '{}'",
        asset.metadata.len(),
        if asset.metadata.len() == 1 { "y" } else { "ies" },
        extract_filename(&asset.path)
    );

    ImageAsset::new(asset.path.clone(), pixels, Vec::new(), asset.source_format)
}

fn rebuild(image: &DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(redraw(buf)),
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(redraw(buf)),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(redraw(buf)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(redraw(buf)),
        DynamicImage::ImageLuma16(buf) => DynamicImage::ImageLuma16(redraw(buf)),
        DynamicImage::ImageLumaA16(buf) => DynamicImage::ImageLumaA16(redraw(buf)),
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(redraw(buf)),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(redraw(buf)),
        DynamicImage::ImageRgb32F(buf) => DynamicImage::ImageRgb32F(redraw(buf)),
        DynamicImage::ImageRgba32F(buf) => DynamicImage::ImageRgba32F(redraw(buf)),
        // Unknown future layouts are drawn into RGBA8
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    }
}

fn redraw<P: Pixel>(source: &ImageBuffer<P, Vec<P::Subpixel>>) -> ImageBuffer<P, Vec<P::Subpixel>> {
    ImageBuffer::from_fn(source.width(), source.height(), |x, y| *source.get_pixel(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MetadataEntry;
    use crate::utils::ImageFormat;
    use image::{Luma, Rgba};

    fn asset_with_metadata(pixels: DynamicImage) -> ImageAsset {
        ImageAsset::new(
            "in/photo.jpg",
            pixels,
            vec![
                MetadataEntry::new(0xFFE1, b"Exif\0\0gps".to_vec()),
                MetadataEntry::new(0xFFFE, b"comment".to_vec()),
            ],
            ImageFormat::JPEG,
        )
    }

    #[test]
    fn strip_clears_metadata_and_keeps_source() {
        let source = asset_with_metadata(DynamicImage::new_rgb8(5, 4));
        let stripped = strip(&source);

        assert!(stripped.metadata.is_empty());
        assert_eq!(source.metadata.len(), 2);
        assert_eq!(stripped.path, source.path);
        assert_eq!(stripped.source_format, ImageFormat::JPEG);
    }

    #[test]
    fn strip_preserves_dimensions_and_pixels() {
        let rgba = ImageBuffer::from_fn(9, 6, |x, y| Rgba([x as u8 * 20, y as u8 * 30, 7, 128 + x as u8]));
        let source = asset_with_metadata(DynamicImage::ImageRgba8(rgba));
        let stripped = strip(&source);

        assert_eq!((stripped.width, stripped.height), (9, 6));
        assert_eq!(stripped.pixels.color(), source.pixels.color());
        assert_eq!(stripped.pixels.as_bytes(), source.pixels.as_bytes());
    }

    #[test]
    fn strip_keeps_sixteen_bit_depth() {
        let gray = ImageBuffer::from_fn(3, 3, |x, y| Luma([(x * 1000 + y * 20000) as u16]));
        let source = asset_with_metadata(DynamicImage::ImageLuma16(gray));
        let stripped = strip(&source);

        assert_eq!(stripped.pixels.color(), image::ColorType::L16);
        assert_eq!(stripped.pixels.as_bytes(), source.pixels.as_bytes());
    }

    #[test]
    fn strip_allocates_a_new_buffer() {
        let source = asset_with_metadata(DynamicImage::new_luma8(2, 2));
        let stripped = strip(&source);
        assert_ne!(
            source.pixels.as_bytes().as_ptr(),
            stripped.pixels.as_bytes().as_ptr()
        );
    }
}
