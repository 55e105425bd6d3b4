pub mod codec;
mod executor;
mod stripper;
mod batch;

pub use batch::{BatchConfig, BatchProcessor};
pub use executor::process_file;
pub use stripper::strip;
