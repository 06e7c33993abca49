//! Synthetic neuron skeletons and segmentations on a voxel grid.
//!
//! Random points become a spanning tree, tree edges are rasterized into a
//! voxel skeleton, and an optional radius field turns the skeleton into a
//! volumetric neuron. Many skeletons seed a watershed to form a labelled
//! scene, and a worker pool stacks scenes into training batches.

pub mod batch;
pub mod config;
pub mod error;
pub mod graph;
pub mod growth;
pub mod math;
pub mod neuron;
pub mod raster;
pub mod scene;
pub mod skeleton;

pub use batch::{Batch, BatchPipeline, BatchRequest, SceneSource, ShutdownReport};
pub use config::{GeneratorConfig, PipelineConfig, SceneConfig};
pub use error::{Result, SkeleratorError};
pub use graph::{NodeEdgeDocument, PositionedGraph, VertexId, VoxelGraph};
pub use growth::Tree;
pub use math::{sample_points, Point};
pub use neuron::{grow_radius, Neuron, RadiusField, RadiusRange};
pub use raster::{Interpolation, RasterLine};
pub use scene::{create_scene, Scene, SceneGenerator};
pub use skeleton::Skeleton;
