//! Per-file pipeline: decode → strip → encode → verify → write.
//!
//! Runs synchronously; the batch processor calls it from blocking worker threads.
//! Every error and panic is turned into a [`FileOutcome`] here, so nothing a
//! single file does can escape into the batch.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

use crate::core::{EncodeSettings, FileOutcome, FileStage, FileTask};
use crate::utils::{ImageFormat, RemoverError, RemoverResult, extract_filename, write_atomic};

use super::codec::{decode, encode, verify_clean};
use super::stripper::strip;

/// Runs the full pipeline for one file and reports its terminal state.
pub fn process_file(task: &FileTask, settings: &EncodeSettings) -> FileOutcome {
    let mut stage = FileStage::Pending;

    let result = panic::catch_unwind(AssertUnwindSafe(|| strip_single(task, settings, &mut stage)))
        .unwrap_or_else(|payload| Err(RemoverError::worker(panic_message(payload))));

    match result {
        Ok(bytes_written) => {
            debug!(
                "'{}' → '{}' ({} bytes)",
                extract_filename(&task.source_path),
                task.output_path.display(),
                bytes_written
            );
            FileOutcome::success(task.source_path.clone(), task.output_path.clone(), bytes_written)
        }
        Err(e) => {
            warn!("Failed to process file {} during {}: {}", task.source_path.display(), stage, e);
            FileOutcome::failed(task.source_path.clone(), task.output_path.clone(), stage, &e)
        }
    }
}

/// Strips one image synchronously, advancing `stage` as it goes.
///
/// The output file is only created once the encoded bytes have passed
/// verification, and then atomically.
fn strip_single(task: &FileTask, settings: &EncodeSettings, stage: &mut FileStage) -> RemoverResult<u64> {
    *stage = FileStage::Decoding;
    let asset = decode(&task.source_path)?;

    *stage = FileStage::Stripping;
    let stripped = strip(&asset);
    drop(asset);

    *stage = FileStage::Encoding;
    let target = ImageFormat::from_path(&task.output_path)?;
    let bytes = encode(&stripped, target, settings.quality, settings.png_compression)?;

    *stage = FileStage::Verifying;
    verify_clean(&bytes)?;

    *stage = FileStage::Writing;
    write_atomic(&task.output_path, &bytes)?;

    Ok(bytes.len() as u64)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("Task panicked: {detail}")
}
