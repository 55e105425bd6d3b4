mod error;
mod pool;

pub use error::{WorkerError, WorkerResult};
pub use pool::WorkerPool;
