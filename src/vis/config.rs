//! Visualization settings shared by the stock traversals.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Near-surface band as a multiple of the voxel size
pub const SURFACE_DISTANCE_VOXEL_FACTOR: f32 = 0.75;

/// Settings for [`TsdfSnapshot`](super::snapshot::TsdfSnapshot) and callers
/// of the preset traversals. Missing JSON fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisConfig {
    /// Voxels with |distance| below this are drawn as surface points
    pub surface_distance: f32,
    /// Reference frame tag for marker output
    pub frame_id: String,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            surface_distance: 0.075, // 0.75 x 10cm voxels
            frame_id: "world".to_string(),
        }
    }
}

impl VisConfig {
    /// Defaults with the surface band scaled to `voxel_size`.
    pub fn for_voxel_size(voxel_size: f32) -> Self {
        Self {
            surface_distance: SURFACE_DISTANCE_VOXEL_FACTOR * voxel_size,
            ..Default::default()
        }
    }

    pub fn with_surface_distance(mut self, surface_distance: f32) -> Self {
        self.surface_distance = surface_distance;
        self
    }

    pub fn with_frame_id(mut self, frame_id: impl Into<String>) -> Self {
        self.frame_id = frame_id.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.surface_distance.is_finite() || self.surface_distance <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "surface_distance must be positive and finite, got {}",
                self.surface_distance
            )));
        }
        if self.frame_id.is_empty() {
            return Err(Error::InvalidArgument("frame_id must not be empty".into()));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}
