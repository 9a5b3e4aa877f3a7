//! Ready-made traversals for the stock voxel kinds.

use super::geometry::{ColorPointCloud, IntensityPointCloud, MarkerArray};
use super::predicates::{distance_intensity_esdf, distance_intensity_tsdf, near_surface_tsdf, occupied_tsdf};
use super::traversal::{
    create_color_pointcloud_from_layer, create_intensity_pointcloud_from_layer,
    create_occupancy_blocks_from_layer,
};
use crate::voxel::layer::LayerAccess;
use crate::voxel::voxel::{EsdfVoxel, TsdfVoxel};

/// Colored points for every observed voxel closer than `surface_distance`
/// to the surface.
pub fn create_surface_pointcloud_from_tsdf_layer<L>(
    layer: &L,
    surface_distance: f32,
    pointcloud: &mut ColorPointCloud,
) where
    L: LayerAccess<Voxel = TsdfVoxel>,
{
    create_color_pointcloud_from_layer(
        layer,
        |voxel, coords| near_surface_tsdf(voxel, coords, surface_distance),
        pointcloud,
    );
}

/// Signed distance of every observed TSDF voxel as intensity.
pub fn create_distance_pointcloud_from_tsdf_layer<L>(layer: &L, pointcloud: &mut IntensityPointCloud)
where
    L: LayerAccess<Voxel = TsdfVoxel>,
{
    create_intensity_pointcloud_from_layer(layer, distance_intensity_tsdf, pointcloud);
}

/// Distance of every observed ESDF voxel as intensity.
pub fn create_distance_pointcloud_from_esdf_layer<L>(layer: &L, pointcloud: &mut IntensityPointCloud)
where
    L: LayerAccess<Voxel = EsdfVoxel>,
{
    create_intensity_pointcloud_from_layer(layer, distance_intensity_esdf, pointcloud);
}

/// Height-colored cubes for every observed voxel inside or on the surface.
pub fn create_occupancy_blocks_from_tsdf_layer<L>(layer: &L, frame_id: &str, marker_array: &mut MarkerArray)
where
    L: LayerAccess<Voxel = TsdfVoxel>,
{
    create_occupancy_blocks_from_layer(layer, occupied_tsdf, frame_id, marker_array);
}
