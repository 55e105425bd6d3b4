use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::core::FileOutcome;

/// Progress message type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressType {
    Start,
    Progress,
    Complete,
    Error,
}

/// Unified progress struct for tracking a batch as files complete
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Progress type (start, progress, complete, error)
    pub progress_type: ProgressType,
    /// Number of completed files
    pub completed_tasks: usize,
    /// Total number of candidate files
    pub total_tasks: usize,
    /// Progress percentage (0-100)
    pub progress_percentage: usize,
    /// Current status message
    pub status: String,
    /// File that just finished, if any
    #[serde(default)]
    pub source_path: Option<PathBuf>,
    /// Optional error message
    #[serde(default)]
    pub error: Option<String>,
}

impl Progress {
    /// Create a new Progress instance with basic information
    pub fn new(
        progress_type: ProgressType,
        completed_tasks: usize,
        total_tasks: usize,
        status: &str,
    ) -> Self {
        let progress_percentage = if total_tasks > 0 {
            (completed_tasks * 100) / total_tasks
        } else {
            0
        };

        Self {
            progress_type,
            completed_tasks,
            total_tasks,
            progress_percentage,
            status: status.to_string(),
            source_path: None,
            error: None,
        }
    }

    /// Progress for one finished file; failures carry their reason
    pub fn for_outcome(outcome: &FileOutcome, completed_tasks: usize, total_tasks: usize) -> Self {
        let (progress_type, status) = if outcome.is_success() {
            (ProgressType::Progress, "processing")
        } else {
            (ProgressType::Error, "error")
        };

        Self {
            source_path: Some(outcome.source_path.clone()),
            error: outcome.reason.clone(),
            ..Self::new(progress_type, completed_tasks, total_tasks, status)
        }
    }
}
