//! Generic voxel visitation over a sparse layer.
//!
//! [`visualize_layer`] is the single traversal skeleton: every allocated
//! block, then every voxel in ascending linear-index order, is handed to a
//! predicate together with its world-space centre. Voxels for which the
//! predicate yields an attribute are appended to the accumulator. The three
//! `create_*_from_layer` functions bind the skeleton to the three output
//! shapes.

use glam::Vec3;

use super::geometry::{
    Accumulator, ColorPointCloud, CubeListMarker, IntensityPointCloud, MarkerArray,
    OCCUPIED_VOXELS_NAMESPACE,
};
use crate::voxel::color::Color;
use crate::voxel::layer::{BlockAccess, LayerAccess};

/// Visit every allocated voxel of `layer` and collect the selected ones.
///
/// The accumulator is cleared first. Grid constants are read once; every
/// block is expected to hold `voxels_per_side³` voxels. A block holding fewer
/// is only visited up to its own voxel count. Block order follows
/// [`LayerAccess::allocated_blocks`]. Returns the number of entries appended.
pub fn visualize_layer<L, A, F>(layer: &L, predicate: F, accumulator: &mut A) -> usize
where
    L: LayerAccess,
    A: Accumulator,
    F: Fn(&L::Voxel, Vec3) -> Option<A::Attribute>,
{
    accumulator.clear();

    let vps = layer.voxels_per_side();
    let num_voxels_per_block = vps.saturating_mul(vps).saturating_mul(vps);

    let blocks = layer.allocated_blocks();
    let mut emitted = 0;
    for index in &blocks {
        let Some(block) = layer.block_by_index(*index) else {
            log::warn!("Block {} listed as allocated but not found, skipping", index);
            continue;
        };

        let num_voxels = block.num_voxels();
        if num_voxels != num_voxels_per_block {
            log::warn!(
                "Block {} holds {} voxels, layer expects {}",
                index,
                num_voxels,
                num_voxels_per_block
            );
        }

        for linear_index in 0..num_voxels_per_block.min(num_voxels) {
            let coords = block.coordinates_from_linear_index(linear_index);
            if let Some(attribute) = predicate(block.voxel_by_linear_index(linear_index), coords) {
                accumulator.push(coords, attribute);
                emitted += 1;
            }
        }
    }

    log::debug!(
        "Visited {} blocks ({} voxels), emitted {}",
        blocks.len(),
        blocks.len().saturating_mul(num_voxels_per_block),
        emitted
    );
    emitted
}

/// Colored pointcloud of every voxel for which `vis_function` returns a color.
pub fn create_color_pointcloud_from_layer<L, F>(
    layer: &L,
    vis_function: F,
    pointcloud: &mut ColorPointCloud,
) where
    L: LayerAccess,
    F: Fn(&L::Voxel, Vec3) -> Option<Color>,
{
    visualize_layer(layer, vis_function, pointcloud);
}

/// Intensity pointcloud of every voxel for which `vis_function` returns a value.
pub fn create_intensity_pointcloud_from_layer<L, F>(
    layer: &L,
    vis_function: F,
    pointcloud: &mut IntensityPointCloud,
) where
    L: LayerAccess,
    F: Fn(&L::Voxel, Vec3) -> Option<f32>,
{
    visualize_layer(layer, vis_function, pointcloud);
}

/// Append one cube-list marker holding every voxel `vis_function` accepts.
///
/// Cubes are sized to the layer's voxel size and colored by height (see
/// [`occupancy_color`](super::geometry::occupancy_color)). Markers already in
/// `marker_array` are kept.
pub fn create_occupancy_blocks_from_layer<L, F>(
    layer: &L,
    vis_function: F,
    frame_id: &str,
    marker_array: &mut MarkerArray,
) where
    L: LayerAccess,
    F: Fn(&L::Voxel, Vec3) -> bool,
{
    let mut block_marker = CubeListMarker::new(frame_id, OCCUPIED_VOXELS_NAMESPACE, layer.voxel_size());
    visualize_layer(
        layer,
        |voxel, coords| vis_function(voxel, coords).then_some(()),
        &mut block_marker,
    );
    marker_array.markers.push(block_marker);
}
