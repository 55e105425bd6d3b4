#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageBuffer, Rgb};

/// Minimal big-endian TIFF block with a single `Make` tag, wrapped for APP1.
pub const EXIF_APP1: &[u8] = b"Exif\0\0MM\0*\0\0\0\x08\0\x01\x01\x0F\0\x02\0\0\0\x04Cam\0\0\0\0\0";

pub const COMMENT: &[u8] = b"taken at 51.5007N 0.1246W";

/// Deterministic noise so JPEG quality has something to bite on.
pub fn noisy_rgb(width: u32, height: u32) -> DynamicImage {
    let mut state: u32 = 0x1234_5678;
    let img = ImageBuffer::from_fn(width, height, |_, _| {
        let mut next = || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        };
        Rgb([next(), next(), next()])
    });
    DynamicImage::ImageRgb8(img)
}

pub fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    });
    DynamicImage::ImageRgb8(img)
}

/// Encodes `image` as JPEG, then splices an EXIF APP1 and a COM segment right after SOI.
pub fn jpeg_with_metadata(image: &DynamicImage) -> Vec<u8> {
    let mut plain = Vec::new();
    image
        .to_rgb8()
        .write_with_encoder(JpegEncoder::new_with_quality(&mut plain, 90))
        .expect("encode fixture jpeg");

    let mut out = plain[..2].to_vec();
    out.extend(segment(0xE1, EXIF_APP1));
    out.extend(segment(0xFE, COMMENT));
    out.extend_from_slice(&plain[2..]);
    out
}

/// Encodes `image` as JPEG with a single APP1 segment carrying `payload`.
pub fn jpeg_with_app1(image: &DynamicImage, payload: &[u8]) -> Vec<u8> {
    let mut plain = Vec::new();
    image
        .to_rgb8()
        .write_with_encoder(JpegEncoder::new_with_quality(&mut plain, 90))
        .expect("encode fixture jpeg");

    let mut out = plain[..2].to_vec();
    out.extend(segment(0xE1, payload));
    out.extend_from_slice(&plain[2..]);
    out
}

fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Encodes `image` as RGB PNG carrying two tEXt chunks.
pub fn png_with_text(image: &DynamicImage) -> Vec<u8> {
    let rgb = image.to_rgb8();
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, rgb.width(), rgb.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .add_text_chunk("Author".to_string(), "Jane Photographer".to_string())
            .expect("add author");
        encoder
            .add_text_chunk("Comment".to_string(), "home address".to_string())
            .expect("add comment");
        let mut writer = encoder.write_header().expect("png header");
        writer.write_image_data(rgb.as_raw()).expect("png data");
        writer.finish().expect("png finish");
    }
    out
}

pub fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).expect("write fixture");
    path
}

/// Names of all entries in `dir`, sorted.
pub fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
