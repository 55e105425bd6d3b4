//! Image codec adapter.
//!
//! - [`decode`]: bytes on disk to an [`crate::core::ImageAsset`] (pixels + metadata entries).
//! - [`encode`]: pixels to JPEG or PNG bytes, format chosen by the caller from the output path.
//! - [`verify_clean`]: checks encoded bytes for any surviving metadata container.
//! - [`scan_metadata`]: the container walker both of the above rely on.

mod container;
mod decode;
mod encode;

pub use container::{Container, scan_metadata};
pub use decode::{decode, decode_bytes};
pub use encode::{encode, verify_clean};
