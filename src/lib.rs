// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod worker;
pub mod processing;
pub mod commands;

// Public exports for external consumers
pub use core::{
    BatchReport, EncodeSettings, FileOutcome, FileStage, ImageAsset, MetadataEntry,
    OutcomeStatus, PngCompression, ProcessingRequest, Progress, ProgressType,
};
pub use processing::{BatchConfig, BatchProcessor};
pub use utils::{ImageFormat, RemoverError, RemoverResult};
pub use commands::*;

// This library file is the public API; the command-line entry point is in main.rs.
