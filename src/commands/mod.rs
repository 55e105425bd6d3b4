//! Command handlers for front ends.
//!
//! This module exposes the operations a UI or CLI invokes:
//! - [`remove_metadata`]: Strip a whole folder
//! - [`remove_image_metadata`]: Strip a single image

mod image;

pub use image::*;
