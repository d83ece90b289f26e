//! Block breaking and placing.
//!
//! Translates an aim ray into world edits: breaking clears the struck
//! block, placing puts the currently selected kind into the empty cell in
//! front of the struck face. Both go through `World::set_block`, so the
//! affected meshes are rebuilt as part of the edit.

use cgmath::{Point3, Vector3};

use super::block::block_kind::BlockKind;
use super::block::Block;
use super::world::World;

/// How far, in world units, edits can reach from the observer.
pub const REACH: f32 = 5.0;

/// Tracks the selected block kind and applies aim-directed edits.
#[derive(Copy, Clone, Debug)]
pub struct BlockInteraction {
    current: BlockKind,
}

impl Default for BlockInteraction {
    fn default() -> Self {
        BlockInteraction {
            current: BlockKind::Grass,
        }
    }
}

impl BlockInteraction {
    /// Creates an interaction state with grass selected.
    pub fn new() -> Self {
        BlockInteraction::default()
    }

    /// The block kind placements currently use.
    pub fn current_kind(&self) -> BlockKind {
        self.current
    }

    /// Selects the block kind future placements use. Selecting `Air` is
    /// ignored; use `break_block` to clear cells.
    pub fn select_kind(&mut self, kind: BlockKind) {
        if kind != BlockKind::Air && kind != BlockKind::Count {
            self.current = kind;
        }
    }

    /// Clears the first solid block along the aim ray, if one is within
    /// reach.
    ///
    /// # Returns
    /// `true` when a block was removed.
    pub fn break_block(
        &self,
        world: &mut World,
        origin: Point3<f32>,
        direction: Vector3<f32>,
    ) -> bool {
        let hit = world.raycast(origin, direction, REACH);
        if !hit.hit {
            return false;
        }
        world.set_block(hit.block_pos.x, hit.block_pos.y, hit.block_pos.z, Block::AIR);
        true
    }

    /// Places the selected kind against the struck face of the first solid
    /// block along the aim ray.
    ///
    /// Nothing happens when the ray misses, when the ray started inside a
    /// block (the face normal is zero, so there is no cell in front), or
    /// when the target cell is already occupied.
    ///
    /// # Returns
    /// `true` when a block was placed.
    pub fn place_block(
        &self,
        world: &mut World,
        origin: Point3<f32>,
        direction: Vector3<f32>,
    ) -> bool {
        let hit = world.raycast(origin, direction, REACH);
        if !hit.hit {
            return false;
        }

        let target = hit.block_pos + hit.hit_normal;
        if target == hit.block_pos {
            return false;
        }
        if world.get_block(target.x, target.y, target.z).is_solid() {
            return false;
        }

        world.set_block(target.x, target.y, target.z, Block::new(self.current));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::coords::ChunkCoord;

    fn flat_world() -> World {
        let mut world = World::from_empty_chunks(&[
            ChunkCoord::new(0, 0),
            ChunkCoord::new(-1, 0),
            ChunkCoord::new(0, -1),
            ChunkCoord::new(-1, -1),
        ]);
        world.set_block(0, 5, 0, Block::new(BlockKind::Stone));
        world
    }

    fn looking_down() -> (Point3<f32>, Vector3<f32>) {
        (Point3::new(0.5, 9.0, 0.5), Vector3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn break_clears_the_struck_block() {
        let mut world = flat_world();
        let (origin, direction) = looking_down();
        let interaction = BlockInteraction::new();

        assert!(interaction.break_block(&mut world, origin, direction));
        assert_eq!(world.get_block(0, 5, 0), Block::AIR);
    }

    #[test]
    fn break_out_of_reach_does_nothing() {
        let mut world = flat_world();
        let interaction = BlockInteraction::new();

        // 14 cells above the block, well past reach.
        let far = Point3::new(0.5, 20.0, 0.5);
        assert!(!interaction.break_block(&mut world, far, Vector3::new(0.0, -1.0, 0.0)));
        assert!(world.get_block(0, 5, 0).is_solid());
    }

    #[test]
    fn place_fills_the_cell_in_front_of_the_face() {
        let mut world = flat_world();
        let (origin, direction) = looking_down();
        let mut interaction = BlockInteraction::new();
        interaction.select_kind(BlockKind::Sand);

        assert!(interaction.place_block(&mut world, origin, direction));
        assert_eq!(world.get_block(0, 6, 0), Block::new(BlockKind::Sand));
        // The struck block itself is untouched.
        assert_eq!(world.get_block(0, 5, 0), Block::new(BlockKind::Stone));
    }

    #[test]
    fn place_into_an_occupied_cell_is_refused() {
        let mut world = flat_world();
        world.set_block(0, 6, 0, Block::new(BlockKind::Dirt));
        let (origin, direction) = looking_down();
        let interaction = BlockInteraction::new();

        assert!(!interaction.place_block(&mut world, origin, direction));
        assert_eq!(world.get_block(0, 6, 0), Block::new(BlockKind::Dirt));
    }

    #[test]
    fn place_from_inside_a_block_is_refused() {
        let mut world = flat_world();
        let interaction = BlockInteraction::new();

        // Origin inside the stone block; the hit has no entry face.
        let inside = Point3::new(0.5, 5.5, 0.5);
        assert!(!interaction.place_block(&mut world, inside, Vector3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn air_cannot_be_selected() {
        let mut interaction = BlockInteraction::new();
        interaction.select_kind(BlockKind::Log);
        interaction.select_kind(BlockKind::Air);
        assert_eq!(interaction.current_kind(), BlockKind::Log);
    }
}
