//! Fixed-size cube of voxels, the unit of allocation in a [`Layer`](super::layer::Layer)

use glam::{UVec3, Vec3};

use crate::core::error::Error;
use crate::core::types::{BlockIndex, Result, VoxelIndex};

/// Reject grid constants no block can be built from.
pub(crate) fn validate_grid(voxel_size: f32, voxels_per_side: usize) -> Result<()> {
    if voxels_per_side == 0 {
        return Err(Error::InvalidArgument("voxels_per_side must be at least 1".into()));
    }
    if u32::try_from(voxels_per_side).is_err() || voxels_per_side.checked_pow(3).is_none() {
        return Err(Error::InvalidArgument(format!(
            "voxels_per_side {} is too large to address",
            voxels_per_side
        )));
    }
    if !voxel_size.is_finite() || voxel_size <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "voxel_size must be positive and finite, got {}",
            voxel_size
        )));
    }
    Ok(())
}

/// Cube of `voxels_per_side³` voxels stored in x-fastest linear order.
///
/// Linear index `i` addresses voxel `(i % n, (i / n) % n, i / n²)` where
/// `n = voxels_per_side`. World coordinates refer to voxel centres.
#[derive(Clone, Debug)]
pub struct Block<V> {
    index: BlockIndex,
    origin: Vec3,
    voxels_per_side: usize,
    voxel_size: f32,
    voxels: Vec<V>,
}

impl<V: Default + Clone> Block<V> {
    /// Create a block at `index` with every voxel set to `V::default()`.
    pub fn new(index: BlockIndex, voxels_per_side: usize, voxel_size: f32) -> Result<Self> {
        validate_grid(voxel_size, voxels_per_side)?;
        let count = voxels_per_side * voxels_per_side * voxels_per_side;
        Ok(Self::from_parts(index, voxels_per_side, voxel_size, vec![V::default(); count]))
    }
}

impl<V> Block<V> {
    /// Create a block from existing voxel data in linear-index order.
    pub fn from_voxels(
        index: BlockIndex,
        voxels_per_side: usize,
        voxel_size: f32,
        voxels: Vec<V>,
    ) -> Result<Self> {
        validate_grid(voxel_size, voxels_per_side)?;
        let expected = voxels_per_side * voxels_per_side * voxels_per_side;
        if voxels.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "block needs {} voxels ({}³), got {}",
                expected,
                voxels_per_side,
                voxels.len()
            )));
        }
        Ok(Self::from_parts(index, voxels_per_side, voxel_size, voxels))
    }

    pub(crate) fn from_parts(index: BlockIndex, voxels_per_side: usize, voxel_size: f32, voxels: Vec<V>) -> Self {
        let block_size = voxels_per_side as f32 * voxel_size;
        Self {
            index,
            origin: index.as_vec3() * block_size,
            voxels_per_side,
            voxel_size,
            voxels,
        }
    }

    pub fn block_index(&self) -> BlockIndex {
        self.index
    }

    /// World-space minimum corner
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn voxels_per_side(&self) -> usize {
        self.voxels_per_side
    }

    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// Edge length of the whole block in world units
    pub fn block_size(&self) -> f32 {
        self.voxels_per_side as f32 * self.voxel_size
    }

    pub fn num_voxels(&self) -> usize {
        self.voxels.len()
    }

    /// All voxels in linear-index order
    pub fn voxels(&self) -> &[V] {
        &self.voxels
    }

    /// Split a linear index into its per-axis offsets.
    pub fn voxel_index_from_linear_index(&self, linear_index: usize) -> VoxelIndex {
        let n = self.voxels_per_side;
        UVec3::new(
            (linear_index % n) as u32,
            ((linear_index / n) % n) as u32,
            (linear_index / (n * n)) as u32,
        )
    }

    /// Inverse of [`voxel_index_from_linear_index`](Self::voxel_index_from_linear_index).
    pub fn linear_index_from_voxel_index(&self, voxel_index: VoxelIndex) -> usize {
        let n = self.voxels_per_side;
        voxel_index.x as usize + n * (voxel_index.y as usize + n * voxel_index.z as usize)
    }

    /// World-space centre of the voxel at `voxel_index`.
    pub fn coordinates_from_voxel_index(&self, voxel_index: VoxelIndex) -> Vec3 {
        self.origin + (voxel_index.as_vec3() + Vec3::splat(0.5)) * self.voxel_size
    }

    /// World-space centre of the voxel at `linear_index`.
    pub fn coordinates_from_linear_index(&self, linear_index: usize) -> Vec3 {
        self.coordinates_from_voxel_index(self.voxel_index_from_linear_index(linear_index))
    }

    /// Voxel offset containing a world point, clamped into this block.
    pub fn voxel_index_from_coordinates(&self, coords: Vec3) -> VoxelIndex {
        let max = (self.voxels_per_side - 1) as f32;
        ((coords - self.origin) / self.voxel_size)
            .floor()
            .clamp(Vec3::ZERO, Vec3::splat(max))
            .as_uvec3()
    }

    /// Panics if `linear_index >= num_voxels()`.
    #[inline]
    pub fn voxel_by_linear_index(&self, linear_index: usize) -> &V {
        &self.voxels[linear_index]
    }

    /// Panics if `linear_index >= num_voxels()`.
    #[inline]
    pub fn voxel_by_linear_index_mut(&mut self, linear_index: usize) -> &mut V {
        &mut self.voxels[linear_index]
    }

    /// Checked lookup by per-axis offset.
    pub fn voxel_by_voxel_index(&self, voxel_index: VoxelIndex) -> Result<&V> {
        let linear_index = self.checked_linear_index(voxel_index)?;
        Ok(&self.voxels[linear_index])
    }

    /// Checked mutable lookup by per-axis offset.
    pub fn voxel_by_voxel_index_mut(&mut self, voxel_index: VoxelIndex) -> Result<&mut V> {
        let linear_index = self.checked_linear_index(voxel_index)?;
        Ok(&mut self.voxels[linear_index])
    }

    fn checked_linear_index(&self, voxel_index: VoxelIndex) -> Result<usize> {
        let n = self.voxels_per_side as u32;
        if voxel_index.max_element() >= n {
            return Err(Error::InvalidArgument(format!(
                "voxel index {} outside block of {} voxels per side",
                voxel_index, n
            )));
        }
        Ok(self.linear_index_from_voxel_index(voxel_index))
    }
}
