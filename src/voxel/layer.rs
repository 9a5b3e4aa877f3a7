//! Sparse block-hashed voxel layer and the read-only access traits the
//! visualization engine consumes.
//!
//! A [`Layer`] maps [`BlockIndex`] to [`Block`] and fixes two grid constants
//! for every block it owns: voxels per side and voxel edge length. Other
//! grid implementations can be visualized by implementing [`LayerAccess`]
//! and [`BlockAccess`].

use std::collections::HashMap;

use glam::Vec3;

use super::block::{validate_grid, Block};
use crate::core::error::Error;
use crate::core::types::{BlockIndex, Result};

/// Read access to one block of a sparse grid.
pub trait BlockAccess {
    type Voxel;

    /// Number of voxels stored; valid linear indices are `0..num_voxels()`.
    fn num_voxels(&self) -> usize;

    /// Voxel at `linear_index`; may panic when out of range.
    fn voxel_by_linear_index(&self, linear_index: usize) -> &Self::Voxel;

    /// World-space centre of the voxel at `linear_index`.
    fn coordinates_from_linear_index(&self, linear_index: usize) -> Vec3;
}

/// Read access to a sparse grid of uniformly sized blocks.
///
/// Implementors guarantee that every block returned by
/// [`block_by_index`](Self::block_by_index) holds exactly
/// `voxels_per_side()³` voxels of edge length `voxel_size()`.
pub trait LayerAccess {
    type Voxel;
    type Block: BlockAccess<Voxel = Self::Voxel>;

    fn voxels_per_side(&self) -> usize;

    fn voxel_size(&self) -> f32;

    /// Indices of every allocated block.
    fn allocated_blocks(&self) -> Vec<BlockIndex>;

    fn block_by_index(&self, index: BlockIndex) -> Option<&Self::Block>;
}

impl<V> BlockAccess for Block<V> {
    type Voxel = V;

    fn num_voxels(&self) -> usize {
        Block::num_voxels(self)
    }

    #[inline]
    fn voxel_by_linear_index(&self, linear_index: usize) -> &V {
        Block::voxel_by_linear_index(self, linear_index)
    }

    #[inline]
    fn coordinates_from_linear_index(&self, linear_index: usize) -> Vec3 {
        Block::coordinates_from_linear_index(self, linear_index)
    }
}

/// Unbounded sparse voxel grid.
#[derive(Clone, Debug)]
pub struct Layer<V> {
    voxel_size: f32,
    voxels_per_side: usize,
    blocks: HashMap<BlockIndex, Block<V>>,
}

impl<V> Layer<V> {
    /// Create an empty layer.
    pub fn new(voxel_size: f32, voxels_per_side: usize) -> Result<Self> {
        validate_grid(voxel_size, voxels_per_side)?;
        Ok(Self {
            voxel_size,
            voxels_per_side,
            blocks: HashMap::new(),
        })
    }

    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    pub fn voxels_per_side(&self) -> usize {
        self.voxels_per_side
    }

    /// Edge length of one block in world units
    pub fn block_size(&self) -> f32 {
        self.voxels_per_side as f32 * self.voxel_size
    }

    pub fn num_allocated_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Allocated block indices sorted by (z, y, x).
    pub fn allocated_blocks(&self) -> Vec<BlockIndex> {
        let mut indices: Vec<BlockIndex> = self.blocks.keys().copied().collect();
        indices.sort_unstable_by_key(|i| (i.z, i.y, i.x));
        indices
    }

    pub fn has_block(&self, index: BlockIndex) -> bool {
        self.blocks.contains_key(&index)
    }

    pub fn block_by_index(&self, index: BlockIndex) -> Option<&Block<V>> {
        self.blocks.get(&index)
    }

    pub fn block_by_index_mut(&mut self, index: BlockIndex) -> Option<&mut Block<V>> {
        self.blocks.get_mut(&index)
    }

    /// Index of the block containing a world point.
    pub fn block_index_from_coordinates(&self, coords: Vec3) -> BlockIndex {
        (coords / self.block_size()).floor().as_ivec3()
    }

    /// Insert a prebuilt block, replacing and returning any block already at
    /// its index. Fails if the block's grid constants differ from the layer's.
    pub fn insert_block(&mut self, block: Block<V>) -> Result<Option<Block<V>>> {
        if block.voxels_per_side() != self.voxels_per_side || block.voxel_size() != self.voxel_size {
            return Err(Error::InvalidArgument(format!(
                "block has {} voxels per side of size {}, layer expects {} of size {}",
                block.voxels_per_side(),
                block.voxel_size(),
                self.voxels_per_side,
                self.voxel_size
            )));
        }
        Ok(self.blocks.insert(block.block_index(), block))
    }

    pub fn remove_block(&mut self, index: BlockIndex) -> Option<Block<V>> {
        self.blocks.remove(&index)
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Voxel containing a world point, if its block is allocated.
    pub fn voxel_by_coordinates(&self, coords: Vec3) -> Option<&V> {
        let block = self.blocks.get(&self.block_index_from_coordinates(coords))?;
        let linear_index = block.linear_index_from_voxel_index(block.voxel_index_from_coordinates(coords));
        Some(block.voxel_by_linear_index(linear_index))
    }

    /// Mutable voxel containing a world point, if its block is allocated.
    pub fn voxel_by_coordinates_mut(&mut self, coords: Vec3) -> Option<&mut V> {
        let index = self.block_index_from_coordinates(coords);
        let block = self.blocks.get_mut(&index)?;
        let linear_index = block.linear_index_from_voxel_index(block.voxel_index_from_coordinates(coords));
        Some(block.voxel_by_linear_index_mut(linear_index))
    }
}

impl<V: Default + Clone> Layer<V> {
    /// Get the block at `index`, allocating a default-filled one if absent.
    pub fn allocate_block(&mut self, index: BlockIndex) -> &mut Block<V> {
        let (voxels_per_side, voxel_size) = (self.voxels_per_side, self.voxel_size);
        self.blocks.entry(index).or_insert_with(|| {
            let count = voxels_per_side * voxels_per_side * voxels_per_side;
            // Grid constants were validated in Layer::new
            Block::from_parts(index, voxels_per_side, voxel_size, vec![V::default(); count])
        })
    }

    /// Mutable voxel containing a world point, allocating its block if needed.
    pub fn allocate_voxel_by_coordinates(&mut self, coords: Vec3) -> &mut V {
        let index = self.block_index_from_coordinates(coords);
        let block = self.allocate_block(index);
        let linear_index = block.linear_index_from_voxel_index(block.voxel_index_from_coordinates(coords));
        block.voxel_by_linear_index_mut(linear_index)
    }
}

impl<V> LayerAccess for Layer<V> {
    type Voxel = V;
    type Block = Block<V>;

    fn voxels_per_side(&self) -> usize {
        self.voxels_per_side
    }

    fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    fn allocated_blocks(&self) -> Vec<BlockIndex> {
        Layer::allocated_blocks(self)
    }

    fn block_by_index(&self, index: BlockIndex) -> Option<&Block<V>> {
        Layer::block_by_index(self, index)
    }
}
