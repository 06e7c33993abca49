//! Batched scene production on worker threads

mod pipeline;
mod stack;

pub use pipeline::{BatchPipeline, BatchRequest, SceneSource, ShutdownReport};
pub use stack::{Batch, CroppedBatch};
