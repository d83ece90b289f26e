//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for
//! managing fixed-size columns of voxel data. A chunk has a square 8x8
//! horizontal footprint and spans the full world height of 30 blocks.
//!
//! ## Storage
//!
//! Blocks are kept in a dense array indexed by `x + y * CHUNK_SIZE +
//! z * CHUNK_SIZE * CHUNK_HEIGHT`, in local coordinates. The array is the
//! authoritative voxel state; the cached mesh is purely a projection of it
//! and is rebuilt wholesale whenever the blocks (or a horizontal neighbor's
//! border blocks) change.

use crate::rendering::ChunkMesh;

use super::block::Block;
use super::coords::ChunkCoord;

pub mod meshing;
pub mod terrain;

/// The width and depth of a chunk in blocks (square horizontal footprint).
pub const CHUNK_SIZE: i32 = 8;
/// The height of a chunk in blocks, equal to the world height.
pub const CHUNK_HEIGHT: i32 = 30;
/// Surface columns at or below this height are sand rather than grass.
pub const SEA_LEVEL: i32 = 8;

/// Represents a fixed-footprint column of the voxel world.
///
/// Chunks are the unit of generation, meshing, and streaming. Each chunk
/// fills its own terrain at construction time from the world seed; trees are
/// added later by a world-wide vegetation pass because their canopies may
/// spill into neighboring chunks.
pub struct Chunk {
    /// The position of this chunk on the chunk grid (not block coordinates).
    coord: ChunkCoord,

    /// Dense block storage, `CHUNK_SIZE * CHUNK_HEIGHT * CHUNK_SIZE` entries.
    blocks: Vec<Block>,

    /// Set once the vegetation pass has run for this chunk. Guards against
    /// planting the same trees twice when loading a neighbor re-triggers the
    /// world-wide pass.
    trees_generated: bool,

    /// Cached surface geometry, not part of the logical voxel state.
    mesh: ChunkMesh,
}

impl Chunk {
    /// Creates a chunk at the given coordinate and fills it with terrain.
    ///
    /// # Arguments
    /// * `coord` - The chunk grid coordinate of the new chunk
    /// * `seed` - The process-wide world seed
    ///
    /// # Returns
    /// A new `Chunk` with every block populated by the terrain generator.
    /// The mesh is left empty; the world meshes the chunk once its
    /// neighbors are known.
    pub fn new(coord: ChunkCoord, seed: u32) -> Self {
        let mut chunk = Chunk::empty(coord);
        chunk.generate_blocks(seed);
        chunk
    }

    /// Creates a completely empty chunk (all blocks are air).
    ///
    /// # Arguments
    /// * `coord` - The chunk grid coordinate of the new chunk
    ///
    /// # Returns
    /// A new `Chunk` instance filled with air blocks.
    pub fn empty(coord: ChunkCoord) -> Self {
        Chunk {
            coord,
            blocks: vec![Block::AIR; (CHUNK_SIZE * CHUNK_HEIGHT * CHUNK_SIZE) as usize],
            trees_generated: false,
            mesh: ChunkMesh::new(),
        }
    }

    /// The chunk grid coordinate identifying this chunk.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Whether the vegetation pass has already run for this chunk.
    pub fn trees_generated(&self) -> bool {
        self.trees_generated
    }

    /// The current cached mesh for this chunk.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Replaces the cached mesh wholesale. Rebuilds are never incremental.
    pub(crate) fn install_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = mesh;
    }

    /// Computes the dense-array index for a local coordinate triple.
    ///
    /// # Returns
    /// `None` when any coordinate lies outside the chunk; neighbor queries
    /// routinely probe one cell past the chunk edges and must not fail.
    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if !(0..CHUNK_SIZE).contains(&x)
            || !(0..CHUNK_HEIGHT).contains(&y)
            || !(0..CHUNK_SIZE).contains(&z)
        {
            return None;
        }
        Some((x + y * CHUNK_SIZE + z * CHUNK_SIZE * CHUNK_HEIGHT) as usize)
    }

    /// Gets the block at the specified local coordinates.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - Local coordinates, `x`/`z` in `[0, CHUNK_SIZE)` and
    ///   `y` in `[0, CHUNK_HEIGHT)`
    ///
    /// # Returns
    /// The block at the given coordinates, or `Block::AIR` when the
    /// coordinates are out of range.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Block {
        match self.index(x, y, z) {
            Some(index) => self.blocks[index],
            None => Block::AIR,
        }
    }

    /// Sets the block at the specified local coordinates.
    ///
    /// Out-of-range coordinates are silently ignored; cross-chunk writes are
    /// the world's responsibility.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block) {
        if let Some(index) = self.index(x, y, z) {
            self.blocks[index] = block;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::block_kind::BlockKind;

    #[test]
    fn empty_chunk_is_all_air() {
        let chunk = Chunk::empty(ChunkCoord::new(0, 0));
        assert_eq!(chunk.get_block(3, 10, 3), Block::AIR);
        assert!(chunk.mesh().is_empty());
        assert!(!chunk.trees_generated());
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut chunk = Chunk::empty(ChunkCoord::new(2, -1));
        chunk.set_block(7, 29, 0, Block::new(BlockKind::Stone));
        assert_eq!(chunk.get_block(7, 29, 0), Block::new(BlockKind::Stone));
    }

    #[test]
    fn out_of_range_access_is_a_sentinel() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        // Writes out of range are dropped, reads come back as air.
        chunk.set_block(-1, 0, 0, Block::new(BlockKind::Dirt));
        chunk.set_block(0, CHUNK_HEIGHT, 0, Block::new(BlockKind::Dirt));
        chunk.set_block(CHUNK_SIZE, 0, 0, Block::new(BlockKind::Dirt));
        assert_eq!(chunk.get_block(-1, 0, 0), Block::AIR);
        assert_eq!(chunk.get_block(0, CHUNK_HEIGHT, 0), Block::AIR);
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_HEIGHT {
                for z in 0..CHUNK_SIZE {
                    assert_eq!(chunk.get_block(x, y, z), Block::AIR);
                }
            }
        }
    }
}
