pub mod voxel_graph;
pub mod export;

pub use voxel_graph::{Edge, PositionedGraph, VertexId, VoxelGraph};
pub use export::{EdgeRecord, NodeEdgeDocument, NodeRecord};
