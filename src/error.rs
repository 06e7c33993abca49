//! Error types shared by every generation stage.

use crate::math::Point;

/// Errors raised while generating trees, skeletons, neurons and scenes.
///
/// Every variant aborts the unit of work it was raised for (an edge, a
/// skeleton, a scene or a batch). Nothing here is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum SkeleratorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid radius range: require 0 < min ({min}) <= max ({max})")]
    InvalidRadiusRange { min: u32, max: u32 },

    #[error("degenerate tree: {roots} degree-1 vertices found, at least 2 required")]
    DegenerateTree { roots: usize },

    /// Breadth-first growth discovered a vertex whose number of already
    /// assigned neighbours is not exactly one.
    #[error("inconsistent traversal at vertex {vertex}: {assigned} assigned neighbours")]
    InconsistentTraversal { vertex: usize, assigned: usize },

    #[error("zero length edge from {start} to {end}")]
    ZeroLengthEdge { start: Point, end: Point },

    #[error("random walk stuck at {position} while heading to {target}")]
    NoProgress { position: Point, target: Point },

    #[error("raster endpoint mismatch: expected {expected}, got {actual}")]
    EndpointMismatch { expected: Point, actual: Point },

    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    #[error("invalid crop from {input:?} to {output:?}: output must fit and differ by an even amount per axis")]
    InvalidCrop { input: [usize; 3], output: [usize; 3] },

    #[error("nonexistent edge ({from}, {to})")]
    EdgeNotFound { from: usize, to: usize },

    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error("batch pipeline has been shut down")]
    ShutDown,

    #[error("no batch available and no worker running")]
    WorkersExhausted,
}

pub type Result<T> = std::result::Result<T, SkeleratorError>;
