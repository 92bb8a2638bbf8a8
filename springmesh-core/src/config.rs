/// Scene configuration loaded from JSON
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::projection::ViewParameters;
use crate::simulation::SimulationParams;

/// Camera and simulation settings; every field falls back to its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub view: ViewParameters,
    pub simulation: SimulationParams,
}

impl SceneConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(s)?;
        config.view.validate()?;
        config.simulation.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("loading scene config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
