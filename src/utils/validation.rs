use std::path::Path;
use crate::core::ProcessingRequest;
use crate::utils::{RemoverError, RemoverResult};

/// Validates a batch request before any file I/O happens.
///
/// Only batch-fatal conditions are checked here. Quality is deliberately left
/// alone: an out-of-range value only fails JPEG outputs, one file at a time.
pub fn validate_request(request: &ProcessingRequest) -> RemoverResult<()> {
    validate_folders(&request.input_dir, &request.output_dir)?;
    validate_input_dir(&request.input_dir)?;
    Ok(())
}

/// Rejects blank (empty or whitespace-only) folder paths
pub fn validate_folders(input_dir: &Path, output_dir: &Path) -> RemoverResult<()> {
    if is_blank(input_dir) {
        return Err(RemoverError::missing_folder("input folder is blank"));
    }

    if is_blank(output_dir) {
        return Err(RemoverError::missing_folder("output folder is blank"));
    }

    Ok(())
}

/// Validates that the input folder exists
pub fn validate_input_dir(path: &Path) -> RemoverResult<()> {
    if !path.is_dir() {
        return Err(RemoverError::InputFolderNotFound(path.to_path_buf()));
    }

    Ok(())
}

/// Validates a lossy quality value
pub fn validate_quality(quality: u32) -> RemoverResult<u8> {
    if quality > 100 {
        return Err(RemoverError::invalid_parameter(
            format!("Invalid quality value: {}. Must be between 0 and 100", quality)
        ));
    }

    Ok(quality as u8)
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}
