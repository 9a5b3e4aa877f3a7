//! All stock visualizations of one TSDF layer, built in parallel.

use serde::{Deserialize, Serialize};

use super::config::VisConfig;
use super::geometry::{Accumulator, ColorPointCloud, IntensityPointCloud, MarkerArray};
use super::presets::{
    create_distance_pointcloud_from_tsdf_layer, create_occupancy_blocks_from_tsdf_layer,
    create_surface_pointcloud_from_tsdf_layer,
};
use crate::core::types::Result;
use crate::voxel::layer::LayerAccess;
use crate::voxel::voxel::TsdfVoxel;

/// Surface points, distance points and occupancy cubes of one TSDF layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TsdfSnapshot {
    pub surface: ColorPointCloud,
    pub distance: IntensityPointCloud,
    pub occupancy: MarkerArray,
}

impl TsdfSnapshot {
    /// Run the three TSDF traversals over `layer`.
    ///
    /// The traversals share nothing but the read-only layer, so they run on
    /// the rayon pool. The layer must not be mutated until this returns.
    pub fn from_layer<L>(layer: &L, config: &VisConfig) -> Result<Self>
    where
        L: LayerAccess<Voxel = TsdfVoxel> + Sync,
    {
        config.validate()?;

        let start = std::time::Instant::now();
        let ((surface, distance), occupancy) = rayon::join(
            || {
                rayon::join(
                    || {
                        let mut cloud = ColorPointCloud::new();
                        create_surface_pointcloud_from_tsdf_layer(layer, config.surface_distance, &mut cloud);
                        cloud
                    },
                    || {
                        let mut cloud = IntensityPointCloud::new();
                        create_distance_pointcloud_from_tsdf_layer(layer, &mut cloud);
                        cloud
                    },
                )
            },
            || {
                let mut markers = MarkerArray::new();
                create_occupancy_blocks_from_tsdf_layer(layer, &config.frame_id, &mut markers);
                markers
            },
        );

        log::debug!(
            "TSDF snapshot: {} surface points, {} distance points, {} occupied cubes in {:.2}ms",
            surface.len(),
            distance.len(),
            occupancy.num_cubes(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self { surface, distance, occupancy })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vis::geometry::OCCUPIED_VOXELS_NAMESPACE;
    use crate::voxel::color::Color;
    use crate::voxel::layer::Layer;
    use glam::{IVec3, Vec3};

    /// Plane z = 1.0 between two stacked 4x4x4 blocks of 0.25 m voxels
    fn plane_layer() -> Layer<TsdfVoxel> {
        let mut layer = Layer::new(0.25, 4).unwrap();
        for index in [IVec3::ZERO, IVec3::new(0, 0, 1)] {
            let block = layer.allocate_block(index);
            for i in 0..block.num_voxels() {
                let z = block.coordinates_from_linear_index(i).z;
                *block.voxel_by_linear_index_mut(i) = TsdfVoxel::new(z - 1.0, 1.0, Color::GREEN);
            }
        }
        layer
    }

    #[test]
    fn test_snapshot_matches_individual_traversals() {
        let layer = plane_layer();
        let config = VisConfig::for_voxel_size(0.25).with_frame_id("map");
        let snapshot = TsdfSnapshot::from_layer(&layer, &config).unwrap();

        let mut surface = ColorPointCloud::new();
        create_surface_pointcloud_from_tsdf_layer(&layer, config.surface_distance, &mut surface);
        assert_eq!(snapshot.surface, surface);

        // Voxel centres sit at z = 0.125 + k * 0.25; one slice on each side is within the band
        assert_eq!(snapshot.surface.len(), 2 * 16);
        assert!(snapshot.surface.iter().all(|p| (p.z - 1.0).abs() < 0.2));

        assert_eq!(snapshot.distance.len(), 2 * 64);

        assert_eq!(snapshot.occupancy.markers.len(), 1);
        let marker = &snapshot.occupancy.markers[0];
        assert_eq!(marker.frame_id, "map");
        assert_eq!(marker.ns, OCCUPIED_VOXELS_NAMESPACE);
        assert_eq!(marker.points.len(), 64);
        assert!(marker.points.iter().all(|p| p.z < 1.0));
    }

    #[test]
    fn test_snapshot_empty_layer() {
        let layer = Layer::<TsdfVoxel>::new(0.1, 8).unwrap();
        let snapshot = TsdfSnapshot::from_layer(&layer, &VisConfig::default()).unwrap();
        assert!(snapshot.surface.is_empty());
        assert!(snapshot.distance.is_empty());
        assert_eq!(snapshot.occupancy.num_cubes(), 0);
    }

    #[test]
    fn test_snapshot_rejects_invalid_config() {
        let layer = plane_layer();
        let config = VisConfig::default().with_surface_distance(0.0);
        assert!(TsdfSnapshot::from_layer(&layer, &config).is_err());
    }

    #[test]
    fn test_snapshot_json() {
        let layer = plane_layer();
        let snapshot = TsdfSnapshot::from_layer(&layer, &VisConfig::for_voxel_size(0.25)).unwrap();
        let json = snapshot.to_json().unwrap();
        let restored = TsdfSnapshot::from_json(&json).unwrap();
        assert_eq!(restored.surface.len(), snapshot.surface.len());
        assert_eq!(restored.occupancy.markers[0].points[0], Vec3::new(0.125, 0.125, 0.125));
    }
}
