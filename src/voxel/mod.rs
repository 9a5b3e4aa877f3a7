//! Sparse voxel grid data structures

pub mod color;
pub mod voxel;
pub mod block;
pub mod layer;

pub use color::{rainbow_color_map, Color, ColorRgba};
pub use voxel::{EsdfVoxel, TsdfVoxel};
pub use block::Block;
pub use layer::{BlockAccess, Layer, LayerAccess};
