use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::error::{Result, SkeleratorError};

/// Batch pipeline sizing and seeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Finished batches held before workers block on publish
    pub queue_capacity: usize,
    /// Workers allowed to run at once
    pub worker_slots: usize,
    /// Fixed base seed. Worker `n` then uses `seed + n`.
    pub seed: Option<u64>,
    /// How often blocked sends and receives re-check the stop flag
    pub poll_interval_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 50,
            worker_slots: 8,
            seed: None,
            poll_interval_ms: 50,
        }
    }
}

impl PipelineConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 || self.worker_slots == 0 || self.poll_interval_ms == 0 {
            return Err(SkeleratorError::InvalidInput(format!(
                "queue_capacity ({}), worker_slots ({}) and poll_interval_ms ({}) must all be at least 1",
                self.queue_capacity, self.worker_slots, self.poll_interval_ms
            )));
        }
        Ok(())
    }
}
