//! Voxel kinds stored in distance-field layers

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Truncated signed distance voxel.
///
/// `weight` accumulates observation confidence; a weight of zero means the
/// voxel has never been integrated and its distance is meaningless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TsdfVoxel {
    /// Signed distance to the nearest surface (negative inside)
    pub distance: f32,
    /// Non-negative accumulation weight
    pub weight: f32,
    /// Surface color fused alongside the distance
    pub color: Color,
}

impl TsdfVoxel {
    pub fn new(distance: f32, weight: f32, color: Color) -> Self {
        Self { distance, weight, color }
    }

    /// Voxel with a distance and weight but no color information
    pub fn with_distance(distance: f32, weight: f32) -> Self {
        Self { distance, weight, color: Color::default() }
    }

    /// Check if any weight at all has been accumulated. Visualization uses
    /// the stricter `MIN_OBSERVED_WEIGHT` floor to decide observation.
    pub fn has_weight(&self) -> bool {
        self.weight > 0.0
    }
}

/// Euclidean distance voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EsdfVoxel {
    /// Distance to the nearest obstacle
    pub distance: f32,
    /// Whether a valid distance estimate was ever propagated here
    pub observed: bool,
}

impl EsdfVoxel {
    /// Observed voxel with the given distance
    pub fn observed(distance: f32) -> Self {
        Self { distance, observed: true }
    }

    /// Unobserved voxel; `distance` carries no information
    pub fn unobserved() -> Self {
        Self::default()
    }
}
