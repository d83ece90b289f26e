//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel world.
//! It includes the block kind enumeration, the static property table, and the
//! `Block` value type stored in chunk arrays.

use block_kind::BlockKind;

pub mod block_kind;

/// The underlying integer type used to represent block kinds in memory.
/// This is used for compact storage of block data inside chunk arrays.
pub type BlockKindId = u8;

/// Static physical properties of a block kind.
#[derive(Copy, Clone, Debug)]
pub struct BlockProperties {
    /// Whether blocks of this kind occlude neighbors and stop raycasts.
    pub solid: bool,
    /// Tile index into the texture atlas, or -1 for untextured kinds.
    pub texture_index: i32,
}

/// Maps each block kind to its physical properties.
///
/// The array is indexed by `BlockKind` as a `usize`; the tile indices refer to
/// a 4x2 texture atlas laid out row-major from the top-left tile.
pub static BLOCK_KIND_PROPERTIES: [BlockProperties; BlockKind::Count as usize] = [
    BlockProperties { solid: false, texture_index: -1 }, // Air
    BlockProperties { solid: true, texture_index: 5 },   // Grass
    BlockProperties { solid: true, texture_index: 4 },   // Dirt
    BlockProperties { solid: true, texture_index: 1 },   // Stone
    BlockProperties { solid: true, texture_index: 0 },   // Sand
    BlockProperties { solid: true, texture_index: 2 },   // PinkLeaves
    BlockProperties { solid: true, texture_index: 6 },   // OrangeLeaves
    BlockProperties { solid: true, texture_index: 3 },   // Log
    BlockProperties { solid: true, texture_index: 7 },   // Bedrock
];

/// Represents a single voxel block in the world.
///
/// This is a lightweight value type that stores only the block kind; the
/// actual physical properties are looked up from `BLOCK_KIND_PROPERTIES`.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute ensures a consistent memory layout, and the kind
/// is stored as a compact `BlockKindId` so dense chunk arrays stay small.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct Block {
    /// The kind of this block, encoded as a `BlockKindId` for compact storage.
    pub kind: BlockKindId,
}

impl Block {
    /// The empty block returned for any out-of-range or missing-chunk read.
    pub const AIR: Block = Block {
        kind: BlockKind::Air as BlockKindId,
    };

    /// Creates a new block of the specified kind.
    ///
    /// # Arguments
    /// * `kind` - The kind of block to create
    ///
    /// # Returns
    /// A new `Block` instance of the specified kind.
    pub fn new(kind: BlockKind) -> Self {
        Block {
            kind: kind as BlockKindId,
        }
    }

    /// Checks whether this block occludes its neighbors and stops raycasts.
    ///
    /// An id at or past the `BlockKind::Count` sentinel is treated as
    /// non-solid; boundary raycasts routinely probe cells that were never
    /// generated.
    pub fn is_solid(&self) -> bool {
        if self.kind >= BlockKind::Count as BlockKindId {
            return false;
        }
        BLOCK_KIND_PROPERTIES[self.kind as usize].solid
    }

    /// Gets the texture atlas tile index for this block.
    ///
    /// # Returns
    /// The tile index into the atlas grid, or -1 for untextured kinds and
    /// out-of-range ids.
    pub fn texture_index(&self) -> i32 {
        if self.kind >= BlockKind::Count as BlockKindId {
            return -1;
        }
        BLOCK_KIND_PROPERTIES[self.kind as usize].texture_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_is_not_solid_and_untextured() {
        assert!(!Block::AIR.is_solid());
        assert_eq!(Block::AIR.texture_index(), -1);
    }

    #[test]
    fn out_of_range_kind_is_not_solid() {
        let bogus = Block { kind: 250 };
        assert!(!bogus.is_solid());
        assert_eq!(bogus.texture_index(), -1);

        let sentinel = Block {
            kind: BlockKind::Count as BlockKindId,
        };
        assert!(!sentinel.is_solid());
    }

    #[test]
    fn property_table_matches_kinds() {
        assert!(Block::new(BlockKind::Bedrock).is_solid());
        assert_eq!(Block::new(BlockKind::Sand).texture_index(), 0);
        assert_eq!(Block::new(BlockKind::Grass).texture_index(), 5);
    }
}
