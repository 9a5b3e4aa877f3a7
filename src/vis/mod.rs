//! Layer-to-geometry visualization

pub mod geometry;
pub mod traversal;
pub mod predicates;
pub mod presets;
pub mod config;
pub mod snapshot;

pub use geometry::{
    Accumulator, ColorPointCloud, CubeListMarker, IntensityPointCloud, MarkerArray, PointXyzI, PointXyzRgb,
};
pub use traversal::{
    create_color_pointcloud_from_layer, create_intensity_pointcloud_from_layer,
    create_occupancy_blocks_from_layer, visualize_layer,
};
pub use presets::{
    create_distance_pointcloud_from_esdf_layer, create_distance_pointcloud_from_tsdf_layer,
    create_occupancy_blocks_from_tsdf_layer, create_surface_pointcloud_from_tsdf_layer,
};
pub use config::VisConfig;
pub use snapshot::TsdfSnapshot;
