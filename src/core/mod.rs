//! Core types shared by the pipeline and the batch orchestrator.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`ImageAsset`]: A decoded image with its metadata entries
//! - [`ProcessingRequest`]: Folders and quality for one batch
//! - [`FileTask`]: One source file and its output path
//! - [`FileOutcome`] / [`BatchReport`]: Per-file and aggregate results
//! - [`Progress`]: Progress tracking for batch operations

mod asset;
mod types;
mod task;
mod progress;

pub use asset::{ImageAsset, MetadataEntry};
pub use types::{
    BatchReport, EncodeSettings, FileOutcome, FileStage, OutcomeStatus, PngCompression,
    ProcessingRequest,
};
pub use task::FileTask;
pub use progress::{Progress, ProgressType};
