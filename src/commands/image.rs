//! Command handlers for metadata removal.

use std::path::PathBuf;
use tracing::debug;
use crate::core::{BatchReport, EncodeSettings, FileOutcome, FileTask, ProcessingRequest, Progress};
use crate::processing::{BatchConfig, BatchProcessor, process_file};
use crate::utils::{RemoverError, RemoverResult, create_dir_all};

/// Strips metadata from every image in a folder.
///
/// # Arguments
/// * `request` - Input folder, output folder and JPEG quality
/// * `config` - Worker count and PNG compression
/// * `progress_callback` - Called as each file finishes, in completion order
///
/// # Returns
/// The batch report. Per-file failures are inside the report; only batch-fatal
/// conditions come back as `Err`.
pub async fn remove_metadata(
    request: &ProcessingRequest,
    config: BatchConfig,
    progress_callback: impl FnMut(Progress),
) -> RemoverResult<BatchReport> {
    debug!(
        "Received remove_metadata command: {} → {} (quality {})",
        request.input_dir.display(),
        request.output_dir.display(),
        request.quality
    );

    BatchProcessor::new(config)
        .run_with_progress(request, progress_callback)
        .await
}

/// Strips metadata from a single image.
///
/// This is the one-file counterpart of [`remove_metadata`]. The output format
/// follows `output_path`'s extension, and its parent directory is created if
/// missing.
///
/// # Returns
/// The file's outcome. `Err` only when the paths themselves are unusable.
pub fn remove_image_metadata(
    input_path: impl Into<PathBuf>,
    output_path: impl Into<PathBuf>,
    settings: EncodeSettings,
) -> RemoverResult<FileOutcome> {
    let input_path = input_path.into();
    let output_path = output_path.into();

    if !input_path.is_file() {
        return Err(RemoverError::io(format!(
            "Input file does not exist: {}",
            input_path.display()
        )));
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }

    let task = FileTask {
        index: 0,
        source_path: input_path,
        output_path,
    };
    Ok(process_file(&task, &settings))
}

