use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::error::{WorkerError, WorkerResult};

/// Bounded pool of blocking jobs on the tokio runtime.
///
/// At most `worker_count` jobs run at once, each on tokio's blocking thread pool.
/// Jobs share no state; one job failing or panicking has no effect on the others.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    worker_count: usize,
}

impl WorkerPool {
    /// Creates a pool. `None` or `Some(0)` means one worker per available core.
    pub fn new(worker_count: Option<usize>) -> Self {
        let worker_count = worker_count
            .filter(|&n| n > 0)
            .unwrap_or_else(default_worker_count);
        debug!("Creating WorkerPool with {} workers", worker_count);

        Self {
            semaphore: Arc::new(Semaphore::new(worker_count)),
            worker_count,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Runs `work` over every job and returns the results in job order.
    ///
    /// `on_complete` is called once per job as it finishes, in completion order,
    /// with the job's index.
    pub async fn execute<J, R, F>(
        &self,
        jobs: Vec<J>,
        work: F,
        mut on_complete: impl FnMut(usize, &WorkerResult<R>),
    ) -> Vec<WorkerResult<R>>
    where
        J: Send + 'static,
        R: Send + 'static,
        F: Fn(J) -> R + Send + Sync + 'static,
    {
        let total = jobs.len();
        let work = Arc::new(work);
        let mut set = JoinSet::new();

        for (index, job) in jobs.into_iter().enumerate() {
            let semaphore = Arc::clone(&self.semaphore);
            let work = Arc::clone(&work);
            set.spawn(async move { (index, run_job(semaphore, work, job).await) });
        }

        let mut slots: Vec<Option<WorkerResult<R>>> = (0..total).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, result)) => {
                    on_complete(index, &result);
                    slots[index] = Some(result);
                }
                Err(e) => warn!("Worker task ended without a result: {}", e),
            }
        }

        slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| {
                Err(WorkerError::Cancelled("job did not report a result".to_string()))
            }))
            .collect()
    }
}

async fn run_job<J, R, F>(semaphore: Arc<Semaphore>, work: Arc<F>, job: J) -> WorkerResult<R>
where
    J: Send + 'static,
    R: Send + 'static,
    F: Fn(J) -> R + Send + Sync + 'static,
{
    let _permit = semaphore.acquire_owned().await?;
    let result = tokio::task::spawn_blocking(move || work(job)).await?;
    Ok(result)
}

fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn results_come_back_in_job_order() {
        let pool = WorkerPool::new(Some(4));
        let jobs: Vec<u64> = (0..12).collect();

        let results = pool
            .execute(
                jobs,
                |n| {
                    // Later jobs finish first
                    std::thread::sleep(Duration::from_millis(24 - 2 * n));
                    n * 10
                },
                |_, _| {},
            )
            .await;

        let values: Vec<u64> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(values, (0..12).map(|n| n * 10).collect::<Vec<_>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrency_is_bounded() {
        let pool = WorkerPool::new(Some(2));
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let (r, p) = (Arc::clone(&running), Arc::clone(&peak));
        pool.execute(
            (0..8).collect::<Vec<_>>(),
            move |_: i32| {
                let now = r.fetch_add(1, Ordering::SeqCst) + 1;
                p.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(10));
                r.fetch_sub(1, Ordering::SeqCst);
            },
            |_, _| {},
        )
        .await;

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn a_panicking_job_does_not_affect_others() {
        let pool = WorkerPool::new(Some(2));
        let mut completed = 0;

        let results = pool
            .execute(
                vec![1, 2, 3],
                |n: i32| {
                    if n == 2 {
                        panic!("job two exploded");
                    }
                    n
                },
                |_, _| completed += 1,
            )
            .await;

        assert_eq!(completed, 3);
        assert_eq!(results[0].as_ref().ok(), Some(&1));
        assert!(matches!(results[1], Err(WorkerError::Panicked(_))));
        assert_eq!(results[2].as_ref().ok(), Some(&3));
    }

    #[test]
    fn zero_workers_means_default() {
        assert!(WorkerPool::new(Some(0)).worker_count() >= 1);
        assert_eq!(WorkerPool::new(Some(3)).worker_count(), 3);
    }
}
