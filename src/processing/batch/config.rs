use serde::{Serialize, Deserialize};
use crate::core::PngCompression;

/// Tunables for a batch run. Not persisted; front ends build one per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchConfig {
    /// Worker count; `None` uses one worker per available core, `Some(1)` is fully sequential
    #[serde(default)]
    pub workers: Option<usize>,
    /// zlib effort for PNG outputs
    #[serde(default)]
    pub png_compression: PngCompression,
}

impl BatchConfig {
    pub fn sequential() -> Self {
        Self {
            workers: Some(1),
            ..Self::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_png_compression(mut self, png_compression: PngCompression) -> Self {
        self.png_compression = png_compression;
        self
    }
}
