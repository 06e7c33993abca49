//! Synthetic segmentation scenes
//!
//! Skeletons from several random trees are drawn as labelled seeds into one
//! volume. A watershed over the seed distance field, roughened by smoothed
//! noise, then grows each seed into a full object.

mod crop;
mod distance;
mod filters;
mod generate;
mod watershed;

pub use crop::{crop, crop_offset};
pub use distance::distance_transform;
pub use filters::{abs_normal_noise, gaussian_filter, gaussian_kernel, maximum_filter, suppress_non_maxima};
pub use generate::{create_scene, CroppedScene, Scene, SceneGenerator};
pub use watershed::{PriorityFlood, Watershed};
