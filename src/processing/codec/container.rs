//! Walks JPEG segments and PNG chunks and reports the metadata they carry.
//!
//! Only container structure is parsed; pixel data is never touched. Anything that
//! is not required to reconstruct the raster counts as metadata:
//!
//! - JPEG: every APPn segment except the JFIF `APP0` header, and every COM segment.
//!   Scanning stops at the first SOS marker.
//! - PNG: every ancillary chunk except `tRNS`.

use crate::core::MetadataEntry;
use crate::utils::{RemoverError, RemoverResult};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

const MARKER_APP0: u8 = 0xE0;
const MARKER_APP15: u8 = 0xEF;
const MARKER_COM: u8 = 0xFE;
const MARKER_SOS: u8 = 0xDA;
const MARKER_EOI: u8 = 0xD9;
const MARKER_TEM: u8 = 0x01;
const JFIF_IDENTIFIER: &[u8] = b"JFIF\0";

const CHUNK_IEND: [u8; 4] = *b"IEND";
const CHUNK_TRNS: [u8; 4] = *b"tRNS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Jpeg,
    Png,
}

impl Container {
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&PNG_SIGNATURE) {
            Some(Self::Png)
        } else if bytes.starts_with(&JPEG_SOI) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }
}

/// Lists the metadata entries in `bytes`.
///
/// Repeated tags are merged into the first entry with that tag, payloads
/// concatenated in file order.
pub fn scan_metadata(bytes: &[u8]) -> RemoverResult<Vec<MetadataEntry>> {
    match Container::sniff(bytes) {
        Some(Container::Jpeg) => scan_jpeg(bytes),
        Some(Container::Png) => scan_png(bytes),
        None => Err(RemoverError::unreadable("not a JPEG or PNG container")),
    }
}

fn scan_jpeg(bytes: &[u8]) -> RemoverResult<Vec<MetadataEntry>> {
    let mut entries = Vec::new();
    let mut pos = JPEG_SOI.len();

    while pos < bytes.len() {
        if bytes[pos] != 0xFF {
            return Err(RemoverError::unreadable(format!(
                "JPEG marker expected at offset {pos}"
            )));
        }

        // Any number of 0xFF fill bytes may precede a marker
        while pos < bytes.len() && bytes[pos] == 0xFF {
            pos += 1;
        }
        let Some(&marker) = bytes.get(pos) else {
            break;
        };
        pos += 1;

        match marker {
            MARKER_EOI | MARKER_SOS => break,
            MARKER_TEM | 0xD0..=0xD7 => continue,
            _ => {}
        }

        let length = read_u16(bytes, pos)
            .ok_or_else(|| RemoverError::unreadable("truncated JPEG segment header"))?
            as usize;
        if length < 2 || pos + length > bytes.len() {
            return Err(RemoverError::unreadable(format!(
                "JPEG segment {marker:#04x} overruns the file"
            )));
        }
        let payload = &bytes[pos + 2..pos + length];

        if is_jpeg_metadata(marker, payload) {
            push_entry(&mut entries, 0xFF00 | u32::from(marker), payload);
        }

        pos += length;
    }

    Ok(entries)
}

fn is_jpeg_metadata(marker: u8, payload: &[u8]) -> bool {
    match marker {
        MARKER_APP0 => !payload.starts_with(JFIF_IDENTIFIER),
        0xE1..=MARKER_APP15 | MARKER_COM => true,
        _ => false,
    }
}

fn scan_png(bytes: &[u8]) -> RemoverResult<Vec<MetadataEntry>> {
    let mut entries = Vec::new();
    let mut pos = PNG_SIGNATURE.len();

    while pos < bytes.len() {
        let length = read_u32(bytes, pos)
            .ok_or_else(|| RemoverError::unreadable("truncated PNG chunk header"))?
            as usize;
        let chunk_type: [u8; 4] = bytes
            .get(pos + 4..pos + 8)
            .and_then(|t| t.try_into().ok())
            .ok_or_else(|| RemoverError::unreadable("truncated PNG chunk header"))?;

        let data_start = pos + 8;
        let data_end = data_start
            .checked_add(length)
            .filter(|end| end + 4 <= bytes.len())
            .ok_or_else(|| RemoverError::unreadable(format!(
                "PNG chunk {} overruns the file",
                String::from_utf8_lossy(&chunk_type)
            )))?;

        if chunk_type == CHUNK_IEND {
            break;
        }

        // Bit 5 of the first type byte marks a chunk as ancillary
        let ancillary = chunk_type[0] & 0x20 != 0;
        if ancillary && chunk_type != CHUNK_TRNS {
            push_entry(&mut entries, u32::from_be_bytes(chunk_type), &bytes[data_start..data_end]);
        }

        // Skip data plus CRC
        pos = data_end + 4;
    }

    Ok(entries)
}

fn push_entry(entries: &mut Vec<MetadataEntry>, tag: u32, payload: &[u8]) {
    match entries.iter_mut().find(|entry| entry.tag == tag) {
        Some(existing) => existing.payload.extend_from_slice(payload),
        None => entries.push(MetadataEntry::new(tag, payload.to_vec())),
    }
}

fn read_u16(bytes: &[u8], pos: usize) -> Option<u16> {
    let raw = bytes.get(pos..pos + 2)?;
    Some(u16::from_be_bytes([raw[0], raw[1]]))
}

fn read_u32(bytes: &[u8], pos: usize) -> Option<u32> {
    let raw = bytes.get(pos..pos + 4)?;
    Some(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
}
