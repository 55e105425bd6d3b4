#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Worker pool is closed: {0}")]
    CapacityError(String),

    #[error("Task panicked: {0}")]
    Panicked(String),

    #[error("Task was cancelled: {0}")]
    Cancelled(String),
}

pub type WorkerResult<T> = Result<T, WorkerError>;

impl From<tokio::sync::AcquireError> for WorkerError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        WorkerError::CapacityError(format!("Failed to acquire worker: {}", err))
    }
}

impl From<tokio::task::JoinError> for WorkerError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            WorkerError::Panicked(err.to_string())
        } else {
            WorkerError::Cancelled(err.to_string())
        }
    }
}

impl From<WorkerError> for crate::utils::RemoverError {
    fn from(err: WorkerError) -> Self {
        crate::utils::RemoverError::worker(err.to_string())
    }
}
