//! Compression settings.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quant::validate_quality;

/// Default quality, matching the baseline table's reference point.
pub const DEFAULT_QUALITY: u8 = 50;

/// Settings for one compression call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Quality factor (1 to 100). Lower values quantize more coarsely.
    pub quality: u8,
    /// Number of threads used for luma blocks.
    ///
    /// 1 processes blocks sequentially, 0 uses one thread per available
    /// core. Ignored when the crate is built without the `parallel` feature.
    pub workers: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            workers: 1,
        }
    }
}

impl CompressionConfig {
    /// Create a sequential configuration with the given quality.
    pub fn new(quality: u8) -> Self {
        Self {
            quality,
            ..Default::default()
        }
    }

    /// Set the number of worker threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Check the quality range before any pixel is touched.
    pub fn validate(&self) -> Result<()> {
        validate_quality(self.quality as u32).map(|_| ())
    }

    /// Worker count with 0 resolved to the number of available cores.
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1)
        } else {
            self.workers
        }
    }
}
