//! YAML configuration for scene generation and the batch pipeline

mod pipeline;
mod scene;

use serde::{Deserialize, Serialize};
use crate::error::Result;

pub use pipeline::PipelineConfig;
pub use scene::SceneConfig;

/// Top-level configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl GeneratorConfig {
    /// Parse from YAML and validate. Missing sections take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.scene.validate()?;
        self.pipeline.validate()
    }
}
