//! Voxel selection functions for the layer traversal.
//!
//! Each takes a voxel and its world-space centre and decides whether the
//! voxel is drawn, deriving the attribute its output mode needs.

use glam::Vec3;

use crate::voxel::color::Color;
use crate::voxel::voxel::{EsdfVoxel, TsdfVoxel};

/// Weights at or below this are treated as never observed
pub const MIN_OBSERVED_WEIGHT: f32 = 1e-3;

/// Observed TSDF voxel within `surface_distance` of the surface; yields its color.
pub fn near_surface_tsdf(voxel: &TsdfVoxel, _coords: Vec3, surface_distance: f32) -> Option<Color> {
    (voxel.weight > 0.0 && voxel.distance.abs() < surface_distance).then_some(voxel.color)
}

/// Observed TSDF voxel; yields its signed distance.
pub fn distance_intensity_tsdf(voxel: &TsdfVoxel, _coords: Vec3) -> Option<f32> {
    (voxel.weight > MIN_OBSERVED_WEIGHT).then_some(voxel.distance)
}

/// Observed ESDF voxel; yields its distance.
pub fn distance_intensity_esdf(voxel: &EsdfVoxel, _coords: Vec3) -> Option<f32> {
    voxel.observed.then_some(voxel.distance)
}

/// Observed TSDF voxel on or behind the surface.
pub fn occupied_tsdf(voxel: &TsdfVoxel, _coords: Vec3) -> bool {
    voxel.weight > MIN_OBSERVED_WEIGHT && voxel.distance <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: Vec3 = Vec3::ZERO;

    #[test]
    fn test_near_surface_requires_weight() {
        for distance in [0.0, 0.01, -0.05] {
            let voxel = TsdfVoxel::new(distance, 0.0, Color::RED);
            assert_eq!(near_surface_tsdf(&voxel, AT, 0.1), None);
        }
    }

    #[test]
    fn test_near_surface_threshold() {
        let color = Color::new(10, 20, 30);
        assert_eq!(near_surface_tsdf(&TsdfVoxel::new(0.0, 1.0, color), AT, 0.1), Some(color));
        assert_eq!(near_surface_tsdf(&TsdfVoxel::new(-0.09, 1.0, color), AT, 0.1), Some(color));
        assert_eq!(near_surface_tsdf(&TsdfVoxel::new(0.2, 1.0, color), AT, 0.1), None);
        assert_eq!(near_surface_tsdf(&TsdfVoxel::new(-0.2, 1.0, color), AT, 0.1), None);
        // Strict comparison at the threshold
        assert_eq!(near_surface_tsdf(&TsdfVoxel::new(0.1, 1.0, color), AT, 0.1), None);
    }

    #[test]
    fn test_tsdf_distance_intensity() {
        assert_eq!(distance_intensity_tsdf(&TsdfVoxel::with_distance(-0.4, 0.5), AT), Some(-0.4));
        assert_eq!(distance_intensity_tsdf(&TsdfVoxel::with_distance(-0.4, 0.001), AT), None);
        assert_eq!(distance_intensity_tsdf(&TsdfVoxel::with_distance(-0.4, 0.0), AT), None);
    }

    #[test]
    fn test_esdf_distance_intensity() {
        for distance in [-1.0, 0.0, 3.7, 100.0] {
            let voxel = EsdfVoxel { distance, observed: false };
            assert_eq!(distance_intensity_esdf(&voxel, AT), None);
        }
        assert_eq!(distance_intensity_esdf(&EsdfVoxel::observed(3.7), AT), Some(3.7));
    }

    #[test]
    fn test_occupied() {
        assert!(occupied_tsdf(&TsdfVoxel::with_distance(-0.5, 0.01), AT));
        assert!(occupied_tsdf(&TsdfVoxel::with_distance(0.0, 0.01), AT));
        assert!(!occupied_tsdf(&TsdfVoxel::with_distance(0.5, 0.01), AT));
        assert!(!occupied_tsdf(&TsdfVoxel::with_distance(-0.5, 0.0005), AT));
    }
}
