use ndarray::{stack, Array4, ArrayView3, Axis};
use crate::error::{Result, SkeleratorError};
use crate::math::Point;
use crate::scene::Scene;

/// Cropped arrays of a batch, one offset per scene
#[derive(Debug, Clone)]
pub struct CroppedBatch {
    pub offsets: Vec<Point>,
    pub raw: Array4<f32>,
    pub skeletons: Array4<u64>,
    pub segmentation: Array4<u64>,
}

/// Scenes stacked along a new leading axis: `[scene, z, y, x]`
#[derive(Debug, Clone)]
pub struct Batch {
    pub raw: Array4<f32>,
    pub skeletons: Array4<u64>,
    pub segmentation: Array4<u64>,
    pub cropped: Option<CroppedBatch>,
}

fn stack_views<T: Clone>(views: Vec<ArrayView3<'_, T>>) -> Result<Array4<T>> {
    Ok(stack(Axis(0), &views)?)
}

impl Batch {
    /// Stack scenes of equal shape. Either every scene is cropped or none is.
    pub fn stack(scenes: &[Scene]) -> Result<Self> {
        if scenes.is_empty() {
            return Err(SkeleratorError::InvalidInput("cannot stack an empty batch".into()));
        }

        let raw = stack_views(scenes.iter().map(|s| s.raw.view()).collect())?;
        let skeletons = stack_views(scenes.iter().map(|s| s.skeletons.view()).collect())?;
        let segmentation = stack_views(scenes.iter().map(|s| s.segmentation.view()).collect())?;

        let cropped: Vec<_> = scenes.iter().filter_map(|s| s.cropped.as_ref()).collect();
        let cropped = if cropped.is_empty() {
            None
        } else if cropped.len() != scenes.len() {
            return Err(SkeleratorError::InvalidInput(format!(
                "{} of {} scenes are cropped",
                cropped.len(),
                scenes.len()
            )));
        } else {
            Some(CroppedBatch {
                offsets: cropped.iter().map(|c| c.offset).collect(),
                raw: stack_views(cropped.iter().map(|c| c.raw.view()).collect())?,
                skeletons: stack_views(cropped.iter().map(|c| c.skeletons.view()).collect())?,
                segmentation: stack_views(cropped.iter().map(|c| c.segmentation.view()).collect())?,
            })
        };

        Ok(Self { raw, skeletons, segmentation, cropped })
    }

    /// Number of scenes
    pub fn len(&self) -> usize {
        self.raw.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
