//! # Terrain Generation Module
//!
//! This module fills chunks with procedurally generated terrain and plants
//! trees on top of it.
//!
//! ## Seams
//!
//! Generation is per-chunk-local: it never consults neighboring chunks. The
//! terrain is seam-free anyway because the height field is a continuous
//! function of world coordinates, so adjacent chunks agree about the columns
//! along their shared border.
//!
//! ## Cross-chunk tree placement
//!
//! A canopy near a chunk edge can extend past the chunk footprint. Those
//! placements are returned to the caller as `OverflowBlock`s in chunk-local
//! coordinates rather than written directly; the world routes each one into
//! the adjacent chunk, or discards it when that chunk does not exist yet.

use noise::{NoiseFn, Perlin};

use crate::voxels::block::{block_kind::BlockKind, Block};

use super::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE, SEA_LEVEL};

/// Number of octaves summed for the terrain height field.
const HEIGHT_OCTAVES: u32 = 4;
/// Scaling factor applied to world coordinates when sampling the height
/// noise at the first octave.
const HEIGHT_BASE_FREQUENCY: f64 = 0.005;
/// Offset added to the world seed for the tree placement noise field, so it
/// decorrelates from the height field.
const TREE_SEED_OFFSET: u32 = 5000;
/// Scaling factor applied to world coordinates when sampling the tree noise.
/// Not a whole number: Perlin noise is zero on the integer lattice.
const TREE_FREQUENCY: f64 = 4.1;
/// Tree noise value above which a column attempts to spawn a tree.
const TREE_NOISE_THRESHOLD: f64 = 0.92;
/// Radius of the leaf canopy sphere in blocks.
const LEAF_RADIUS: i32 = 3;
/// Percentage of candidate leaf cells actually kept, to break up the
/// sphere silhouette.
const LEAF_KEEP_PERCENT: u32 = 75;

/// A tree block whose position fell outside the generating chunk's
/// footprint.
///
/// Coordinates are local to the generating chunk, so exactly one of `x` or
/// `z` lies outside `[0, CHUNK_SIZE)` by at most `LEAF_RADIUS` (or both, for
/// corner spills that end up discarded by the target chunk's bounds check).
#[derive(Copy, Clone, Debug)]
pub struct OverflowBlock {
    /// Local X coordinate relative to the generating chunk.
    pub x: i32,
    /// Local Y coordinate.
    pub y: i32,
    /// Local Z coordinate relative to the generating chunk.
    pub z: i32,
    /// The block to place.
    pub block: Block,
}

/// Evaluates the fractal terrain height noise at a world position.
///
/// Sums `HEIGHT_OCTAVES` octaves of Perlin noise with the frequency doubling
/// and the amplitude halving each octave, normalized by the total amplitude
/// so the result stays in `[-1, 1]`.
fn octave_noise(noise: &Perlin, x: f64, z: f64) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..HEIGHT_OCTAVES {
        total += noise.get([x * frequency, z * frequency]) * amplitude;
        max_value += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }

    total / max_value
}

impl Chunk {
    /// Fills every block of this chunk from the terrain height field.
    ///
    /// Deterministic in `(self.coord, seed)`: the same coordinate and seed
    /// always produce an identical block array. Each column is, bottom to
    /// top: bedrock, stone, a three-block dirt band, then a surface block
    /// that is sand at or below `SEA_LEVEL` and grass above it, with air
    /// the rest of the way up.
    pub(crate) fn generate_blocks(&mut self, seed: u32) {
        let noise = Perlin::new(seed);
        let (origin_x, origin_z) = self.coord.block_origin();

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let world_x = (origin_x + x) as f64;
                let world_z = (origin_z + z) as f64;

                let height_noise = octave_noise(
                    &noise,
                    world_x * HEIGHT_BASE_FREQUENCY,
                    world_z * HEIGHT_BASE_FREQUENCY,
                );
                let height = ((height_noise + 1.0) * 0.5 * (CHUNK_HEIGHT - 1) as f64) as i32;

                for y in 0..CHUNK_HEIGHT {
                    let kind = if y > height {
                        BlockKind::Air
                    } else if y == height {
                        if y <= SEA_LEVEL {
                            BlockKind::Sand
                        } else {
                            BlockKind::Grass
                        }
                    } else if y == 0 {
                        BlockKind::Bedrock
                    } else if y > height - 3 {
                        BlockKind::Dirt
                    } else {
                        BlockKind::Stone
                    };
                    self.set_block(x, y, z, Block::new(kind));
                }
            }
        }
    }

    /// Plants trees on the grass surface of this chunk.
    ///
    /// Runs at most once per chunk: subsequent calls are no-ops and return
    /// an empty overflow list. Tree origins are restricted to columns with
    /// at least one block of margin inside the chunk footprint; only canopy
    /// leaves may spill across the border, and those come back as
    /// `OverflowBlock`s for the world to route.
    ///
    /// # Arguments
    /// * `seed` - The process-wide world seed
    ///
    /// # Returns
    /// The block placements that landed outside this chunk's footprint.
    pub fn generate_trees(&mut self, seed: u32) -> Vec<OverflowBlock> {
        if self.trees_generated {
            return Vec::new();
        }
        self.trees_generated = true;

        let tree_noise = Perlin::new(seed.wrapping_add(TREE_SEED_OFFSET));
        let (origin_x, origin_z) = self.coord.block_origin();
        let mut overflow = Vec::new();

        // Trunk heights and leaf thinning draw from an RNG seeded per
        // (world seed, chunk), so identical seeds grow identical trees
        // regardless of chunk load order.
        let mut rng = fastrand::Rng::with_seed(
            (seed as u64)
                ^ ((self.coord.x as u32 as u64) << 32)
                ^ (self.coord.z as u32 as u64),
        );

        for x in 1..CHUNK_SIZE - 1 {
            for z in 1..CHUNK_SIZE - 1 {
                let world_x = (origin_x + x) as f64;
                let world_z = (origin_z + z) as f64;

                let tree_chance =
                    tree_noise.get([world_x * TREE_FREQUENCY, world_z * TREE_FREQUENCY]);
                if tree_chance <= TREE_NOISE_THRESHOLD {
                    continue;
                }

                // Scan downward for the surface, starting low enough that a
                // full-height tree still fits under the world ceiling.
                for y in (1..=CHUNK_HEIGHT - 10).rev() {
                    if self.get_block(x, y, z).kind != BlockKind::Grass as u8 {
                        continue;
                    }

                    self.plant_tree(x, y, z, &mut rng, &mut overflow);
                    break;
                }
            }
        }

        overflow
    }

    /// Places a single tree whose trunk stands on the (former) grass block
    /// at the given local coordinates.
    fn plant_tree(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        rng: &mut fastrand::Rng,
        overflow: &mut Vec<OverflowBlock>,
    ) {
        // The trunk replaces the surface block, which is no longer exposed.
        self.set_block(x, y, z, Block::new(BlockKind::Dirt));

        let trunk_height = 4 + rng.i32(0..4);
        for h in 1..=trunk_height {
            self.set_block(x, y + h, z, Block::new(BlockKind::Log));
        }

        let leaf_kind = if rng.bool() {
            BlockKind::PinkLeaves
        } else {
            BlockKind::OrangeLeaves
        };
        let leaf = Block::new(leaf_kind);
        let leaf_center_y = y + trunk_height;

        for dy in -LEAF_RADIUS..=LEAF_RADIUS {
            let block_y = leaf_center_y + dy;
            if !(0..CHUNK_HEIGHT).contains(&block_y) {
                continue;
            }
            for dx in -LEAF_RADIUS..=LEAF_RADIUS {
                for dz in -LEAF_RADIUS..=LEAF_RADIUS {
                    let dist = (((dx * dx) + (dy * dy) + (dz * dz)) as f64).sqrt();
                    if dist > LEAF_RADIUS as f64 {
                        continue;
                    }
                    // Keep the trunk column and the exact center layer clear.
                    if dx == 0 && dz == 0 && block_y >= y && block_y <= leaf_center_y {
                        continue;
                    }
                    if block_y == leaf_center_y {
                        continue;
                    }
                    if rng.u32(0..100) < LEAF_KEEP_PERCENT {
                        self.place_tree_block(x + dx, block_y, z + dz, leaf, overflow);
                    }
                }
            }
        }
    }

    /// Routes a tree block either into this chunk's own storage or into the
    /// overflow list when it falls outside the footprint. Vertically
    /// out-of-range placements are dropped outright.
    fn place_tree_block(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        block: Block,
        overflow: &mut Vec<OverflowBlock>,
    ) {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return;
        }
        if (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_SIZE).contains(&z) {
            self.set_block(x, y, z, block);
        } else {
            overflow.push(OverflowBlock { x, y, z, block });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::coords::ChunkCoord;

    fn blocks_of(chunk: &Chunk) -> Vec<Block> {
        let mut all = Vec::new();
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_HEIGHT {
                for z in 0..CHUNK_SIZE {
                    all.push(chunk.get_block(x, y, z));
                }
            }
        }
        all
    }

    #[test]
    fn terrain_is_deterministic() {
        let a = Chunk::new(ChunkCoord::new(-3, 7), 1234);
        let b = Chunk::new(ChunkCoord::new(-3, 7), 1234);
        assert_eq!(blocks_of(&a), blocks_of(&b));
    }

    #[test]
    fn different_seeds_differ() {
        let a = Chunk::new(ChunkCoord::new(0, 0), 1);
        let b = Chunk::new(ChunkCoord::new(0, 0), 2);
        assert_ne!(blocks_of(&a), blocks_of(&b));
    }

    #[test]
    fn columns_are_layered() {
        let chunk = Chunk::new(ChunkCoord::new(5, -2), 42);
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                // Find the surface: highest non-air block.
                let mut height = 0;
                for y in (0..CHUNK_HEIGHT).rev() {
                    if chunk.get_block(x, y, z).is_solid() {
                        height = y;
                        break;
                    }
                }

                let surface = chunk.get_block(x, height, z).kind;
                if height <= SEA_LEVEL {
                    assert_eq!(surface, BlockKind::Sand as u8);
                } else {
                    assert_eq!(surface, BlockKind::Grass as u8);
                }

                if height > 0 {
                    assert_eq!(chunk.get_block(x, 0, z).kind, BlockKind::Bedrock as u8);
                }
                for y in 1..height {
                    let kind = chunk.get_block(x, y, z).kind;
                    if y > height - 3 {
                        assert_eq!(kind, BlockKind::Dirt as u8);
                    } else {
                        assert_eq!(kind, BlockKind::Stone as u8);
                    }
                }
                for y in height + 1..CHUNK_HEIGHT {
                    assert_eq!(chunk.get_block(x, y, z).kind, BlockKind::Air as u8);
                }
            }
        }
    }

    #[test]
    fn tree_generation_is_idempotent() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), 99);
        chunk.generate_trees(99);
        assert!(chunk.trees_generated());

        let before = blocks_of(&chunk);
        let second_overflow = chunk.generate_trees(99);
        assert!(second_overflow.is_empty());
        assert_eq!(blocks_of(&chunk), before);
    }

    #[test]
    fn overflow_stays_on_the_border_ring() {
        // Whatever trees spawn, spills must come from canopy cells only,
        // at most LEAF_RADIUS - 1 outside the footprint (origins keep one
        // block of margin).
        for coord_x in -4..4 {
            let mut chunk = Chunk::new(ChunkCoord::new(coord_x, coord_x), 7);
            for spill in chunk.generate_trees(7) {
                assert!((0..CHUNK_HEIGHT).contains(&spill.y));
                let out_x = spill.x < 0 || spill.x >= CHUNK_SIZE;
                let out_z = spill.z < 0 || spill.z >= CHUNK_SIZE;
                assert!(out_x || out_z);
                assert!(spill.x >= 1 - LEAF_RADIUS && spill.x < CHUNK_SIZE - 1 + LEAF_RADIUS);
                assert!(spill.z >= 1 - LEAF_RADIUS && spill.z < CHUNK_SIZE - 1 + LEAF_RADIUS);
            }
        }
    }
}
