//! Voxvis - turns sparse distance-field voxel layers into point clouds and
//! cube markers for external visualization

pub mod core;
pub mod voxel;
pub mod vis;
