//! Core type aliases and re-exports

pub use glam::{IVec3, UVec3, Vec3};

/// Integer index of a block in the sparse grid
pub type BlockIndex = IVec3;

/// Integer offset of a voxel inside its block (each axis in `0..voxels_per_side`)
pub type VoxelIndex = UVec3;

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
