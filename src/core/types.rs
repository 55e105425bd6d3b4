//! Core types for metadata removal requests and results.

use std::fmt;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::utils::RemoverError;

/// One batch invocation, assembled by whatever front end collected the folders.
///
/// Immutable for the duration of the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingRequest {
    /// Folder scanned (non-recursively) for images
    pub input_dir: PathBuf,
    /// Folder the sanitized copies are written to; created if missing
    pub output_dir: PathBuf,
    /// JPEG quality (0-100). Ignored for PNG outputs
    pub quality: u32,
}

impl ProcessingRequest {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, quality: u32) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            quality,
        }
    }
}

/// zlib effort used for PNG outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

/// Encoder parameters shared by every file in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeSettings {
    pub quality: u32,
    pub png_compression: PngCompression,
}

impl EncodeSettings {
    pub fn new(quality: u32, png_compression: PngCompression) -> Self {
        Self { quality, png_compression }
    }
}

/// Pipeline stage a file is in. Failed outcomes record the stage that raised the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStage {
    Pending,
    Decoding,
    Stripping,
    Encoding,
    Verifying,
    Writing,
}

impl fmt::Display for FileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Decoding => "decode",
            Self::Stripping => "strip",
            Self::Encoding => "encode",
            Self::Verifying => "verify",
            Self::Writing => "write",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeStatus {
    Success,
    Failed,
}

/// Terminal result for one candidate file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    /// Path to the source image
    pub source_path: PathBuf,
    /// Where the sanitized copy was (or would have been) written
    pub output_path: PathBuf,
    pub status: OutcomeStatus,
    /// Human readable failure reason, `None` on success
    pub reason: Option<String>,
    /// Stage that failed, `None` on success
    pub failed_stage: Option<FileStage>,
    /// Size of the written output in bytes, 0 on failure
    pub bytes_written: u64,
}

impl FileOutcome {
    pub fn success(source_path: PathBuf, output_path: PathBuf, bytes_written: u64) -> Self {
        Self {
            source_path,
            output_path,
            status: OutcomeStatus::Success,
            reason: None,
            failed_stage: None,
            bytes_written,
        }
    }

    pub fn failed(source_path: PathBuf, output_path: PathBuf, stage: FileStage, error: &RemoverError) -> Self {
        Self {
            source_path,
            output_path,
            status: OutcomeStatus::Failed,
            reason: Some(format!("{stage} failed: {error}")),
            failed_stage: Some(stage),
            bytes_written: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Aggregate result of one batch, handed to the front end for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Number of files that matched the extension filter
    pub total_candidates: usize,
    pub success_count: usize,
    /// One outcome per candidate, in input enumeration order
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Builds a report from outcomes. The success count is derived, never tracked separately.
    pub fn from_outcomes(outcomes: Vec<FileOutcome>) -> Self {
        let success_count = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total_candidates: outcomes.len(),
            success_count,
            outcomes,
        }
    }

    /// Report for an input folder with no matching files.
    pub fn empty() -> Self {
        Self::from_outcomes(Vec::new())
    }

    /// Informational signal: the folder held nothing to process.
    ///
    /// Distinct from a batch where every file failed.
    pub fn no_matching_files(&self) -> bool {
        self.total_candidates == 0
    }

    pub fn failure_count(&self) -> usize {
        self.total_candidates - self.success_count
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn summary(&self) -> String {
        if self.no_matching_files() {
            "No image files found in the folder".to_string()
        } else {
            format!(
                "Processed {}/{} files successfully",
                self.success_count, self.total_candidates
            )
        }
    }
}
