use serde::{Deserialize, Serialize};
use crate::error::{Result, SkeleratorError};
use crate::neuron::RadiusRange;
use crate::raster::Interpolation;
use crate::scene::crop_offset;

/// Parameters of a single synthetic scene. Shapes are `(x, y, z)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub shape: [usize; 3],
    /// Skeletons (or neurons) per scene
    pub n_objects: usize,
    /// Candidate branch points sampled per skeleton
    pub points_per_skeleton: usize,
    pub interpolation: Interpolation,
    /// Gaussian sigma of the boundary noise
    pub smoothness: f64,
    pub noise_weight: f32,
    pub suppression_size: usize,
    /// Sampled points stay this far below the upper bound of each axis
    pub sample_margin: usize,
    /// Draw volumetric neurons instead of bare skeletons
    pub radius: Option<RadiusRange>,
    /// Centred crop attached to each scene
    pub output_shape: Option<[usize; 3]>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shape: [100, 100, 100],
            n_objects: 20,
            points_per_skeleton: 5,
            interpolation: Interpolation::Linear,
            smoothness: 2.0,
            noise_weight: 5.0,
            suppression_size: 4,
            sample_margin: 10,
            radius: None,
            output_shape: None,
        }
    }
}

impl SceneConfig {
    /// Array dimensions in `[z, y, x]` order
    pub fn dim(&self) -> (usize, usize, usize) {
        (self.shape[2], self.shape[1], self.shape[0])
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(d) = (0..3).find(|&d| self.shape[d] <= self.sample_margin) {
            return Err(SkeleratorError::InvalidInput(format!(
                "scene axis {} has extent {}, must exceed the sample margin {}",
                d, self.shape[d], self.sample_margin
            )));
        }
        if self.points_per_skeleton < 2 {
            return Err(SkeleratorError::InvalidInput(format!(
                "points_per_skeleton is {}, a tree needs at least 2",
                self.points_per_skeleton
            )));
        }
        if !self.smoothness.is_finite() || self.smoothness < 0.0 || !self.noise_weight.is_finite() {
            return Err(SkeleratorError::InvalidInput(format!(
                "smoothness {} and noise_weight {} must be finite and non-negative",
                self.smoothness, self.noise_weight
            )));
        }
        if let Some(range) = self.radius {
            range.validate()?;
        }
        if let Some(output) = self.output_shape {
            crop_offset(self.shape, output)?;
        }
        Ok(())
    }
}
