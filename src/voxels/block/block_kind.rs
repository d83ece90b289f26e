//! # Block Kind Module
//!
//! This module defines the different kinds of blocks in the voxel world.
//! It provides functionality for kind identification and conversion from the
//! compact integer representation used in chunk storage.

use num_derive::FromPrimitive;

use super::BlockKindId;

/// Enumerates all possible block kinds in the voxel world.
///
/// Each variant represents a distinct kind of block. The `FromPrimitive`
/// derive allows conversion from the integers stored in chunk arrays.
/// `Count` is a sentinel, not a real block: it sizes the property table and
/// bounds the valid id range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockKind {
    /// An air block, which is non-solid and invisible.
    Air,

    /// The exposed surface block above sea level; green on top.
    Grass,

    /// The subsurface band directly below grass, also left behind under
    /// tree trunks.
    Dirt,

    /// The bulk filler block below the dirt band.
    Stone,

    /// The exposed surface block at or below sea level.
    Sand,

    /// Pink tree canopy foliage.
    PinkLeaves,

    /// Orange tree canopy foliage.
    OrangeLeaves,

    /// Tree trunk block.
    Log,

    /// The impassable boundary layer at the bottom of the world.
    Bedrock,

    /// Sentinel value equal to the number of real block kinds.
    Count,
}

impl BlockKind {
    /// Converts a raw `BlockKindId` back into a `BlockKind`.
    ///
    /// # Arguments
    /// * `id` - The block kind as a `BlockKindId`
    ///
    /// # Returns
    /// The corresponding `BlockKind`, or `None` if the id is out of range.
    pub fn from_id(id: BlockKindId) -> Option<Self> {
        match num::FromPrimitive::from_u8(id) {
            Some(BlockKind::Count) | None => None,
            kind => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        assert_eq!(BlockKind::from_id(0), Some(BlockKind::Air));
        assert_eq!(
            BlockKind::from_id(BlockKind::Bedrock as BlockKindId),
            Some(BlockKind::Bedrock)
        );
    }

    #[test]
    fn sentinel_and_garbage_are_rejected() {
        assert_eq!(BlockKind::from_id(BlockKind::Count as BlockKindId), None);
        assert_eq!(BlockKind::from_id(200), None);
    }
}
