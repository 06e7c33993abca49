//! Skeletons: trees rasterized onto the voxel grid

mod builder;
mod draw;

pub use builder::Skeleton;
