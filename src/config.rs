//! Run-wide settings that the script grammar does not carry.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::engine::feed_forward::SgdEngine;
use crate::error::Result;
use crate::recognize::classifier::ReservedTokens;
use crate::segment::segmenter::ColumnSegmenter;

/// Pipeline configuration, optionally loaded from JSON. Missing fields take
/// their defaults.
///
/// ```json
/// { "learning_rate": 0.02, "reserved_tokens": { "10": "/", "11": "-" } }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub learning_rate: f64,
    pub momentum: f64,
    /// Samples per gradient step; 1 is online SGD.
    pub batch_size: usize,
    /// Crop images to their non-blank content before downsampling.
    pub find_bounds: bool,
    /// A pixel is blank when every channel is at least this value.
    pub blank_level: u8,
    /// Luma below this marks a column as inked for segmentation.
    pub ink_threshold: u8,
    pub reserved_tokens: ReservedTokens,
    /// Minimum gap between console progress lines.
    pub progress_interval_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            learning_rate: 0.01,
            momentum: 0.9,
            batch_size: 1,
            find_bounds: true,
            blank_level: u8::MAX,
            ink_threshold: 128,
            reserved_tokens: ReservedTokens::default(),
            progress_interval_ms: 1000,
        }
    }
}

impl PipelineConfig {
    pub fn load_json(path: &Path) -> Result<PipelineConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn engine(&self) -> SgdEngine {
        SgdEngine { learning_rate: self.learning_rate, momentum: self.momentum, batch_size: self.batch_size }
    }

    pub fn segmenter(&self) -> ColumnSegmenter {
        ColumnSegmenter { ink_threshold: self.ink_threshold }
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}
