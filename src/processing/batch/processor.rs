use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::core::{
    BatchReport, EncodeSettings, FileOutcome, FileStage, FileTask, ProcessingRequest, Progress,
    ProgressType,
};
use crate::processing::executor::process_file;
use crate::utils::{RemoverError, RemoverResult, create_dir_all, select_candidates, validate_request};
use crate::worker::WorkerPool;

use super::config::BatchConfig;

/// Applies the strip pipeline to every candidate in a folder.
///
/// Batch-fatal problems (blank folders, missing input folder) are returned as
/// errors before any file is touched. Everything that goes wrong with a single
/// file ends up as a failed [`FileOutcome`] in the report instead.
pub struct BatchProcessor {
    config: BatchConfig,
    pool: WorkerPool,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Self {
        let pool = WorkerPool::new(config.workers);
        Self { config, pool }
    }

    /// Processes every candidate in `request.input_dir` and reports the outcomes.
    pub async fn run(&self, request: &ProcessingRequest) -> RemoverResult<BatchReport> {
        self.run_with_progress(request, |_| {}).await
    }

    /// Same as [`run`](Self::run), calling `progress_callback` as files finish.
    ///
    /// Callbacks arrive in completion order. The returned report is always in
    /// input enumeration order.
    pub async fn run_with_progress(
        &self,
        request: &ProcessingRequest,
        mut progress_callback: impl FnMut(Progress),
    ) -> RemoverResult<BatchReport> {
        validate_request(request)?;

        // Created once, before any worker can race on it
        create_dir_all(&request.output_dir)?;

        let candidates = select_candidates(&request.input_dir)?;
        if candidates.is_empty() {
            info!("No image files found in {}", request.input_dir.display());
            progress_callback(Progress::new(ProgressType::Complete, 0, 0, "no matching files"));
            return Ok(BatchReport::empty());
        }

        let tasks = candidates
            .into_iter()
            .enumerate()
            .map(|(index, path)| FileTask::new(index, path, &request.output_dir))
            .collect::<RemoverResult<Vec<_>>>()?;

        let total = tasks.len();
        let groups = collision_groups(tasks);
        let settings = EncodeSettings::new(request.quality, self.config.png_compression);

        info!(
            "Processing batch of {} files with {} workers",
            total,
            self.pool.worker_count()
        );
        progress_callback(Progress::new(ProgressType::Start, 0, total, "start"));

        let mut completed = 0;
        let results = self
            .pool
            .execute(
                groups.clone(),
                move |group: Vec<FileTask>| run_group(&group, &settings),
                |index, result| {
                    let finished = match result {
                        Ok(outcomes) => outcomes.clone(),
                        Err(e) => failed_group(&groups[index], &RemoverError::worker(e.to_string())),
                    };
                    for (_, outcome) in &finished {
                        completed += 1;
                        progress_callback(Progress::for_outcome(outcome, completed, total));
                    }
                },
            )
            .await;

        let mut indexed: Vec<(usize, FileOutcome)> = groups
            .iter()
            .zip(results)
            .flat_map(|(group, result)| {
                result.unwrap_or_else(|e| failed_group(group, &RemoverError::from(e)))
            })
            .collect();
        indexed.sort_by_key(|(index, _)| *index);

        let report = BatchReport::from_outcomes(indexed.into_iter().map(|(_, o)| o).collect());

        if report.failure_count() > 0 {
            warn!(
                "Batch completed with {} failed files out of {}",
                report.failure_count(),
                report.total_candidates
            );
        } else {
            info!("Batch completed successfully: {} files processed", report.success_count);
        }
        progress_callback(Progress::new(ProgressType::Complete, total, total, "complete"));

        Ok(report)
    }
}

/// Groups tasks whose output names differ only by ASCII case.
///
/// Each group runs sequentially on one worker in enumeration order, so on a
/// case-insensitive filesystem the last file of a group deterministically wins.
/// Group order follows the first appearance of each name.
fn collision_groups(tasks: Vec<FileTask>) -> Vec<Vec<FileTask>> {
    let mut groups: Vec<Vec<FileTask>> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for task in tasks {
        let slot = *slots.entry(task.collision_key()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(task);
    }

    for group in groups.iter().filter(|g| g.len() > 1) {
        let names: Vec<String> = group
            .iter()
            .map(|t| t.source_path.display().to_string())
            .collect();
        warn!(
            "Output names collide ignoring case, last one wins on case-insensitive filesystems: {}",
            names.join(", ")
        );
    }
    debug!("Split tasks into {} group(s)", groups.len());

    groups
}

/// Processes one collision group, strictly in enumeration order.
fn run_group(group: &[FileTask], settings: &EncodeSettings) -> Vec<(usize, FileOutcome)> {
    group
        .iter()
        .map(|task| (task.index, process_file(task, settings)))
        .collect()
}

fn failed_group(group: &[FileTask], error: &RemoverError) -> Vec<(usize, FileOutcome)> {
    group
        .iter()
        .map(|task| {
            let outcome = FileOutcome::failed(
                task.source_path.clone(),
                task.output_path.clone(),
                FileStage::Pending,
                error,
            );
            (task.index, outcome)
        })
        .collect()
}
