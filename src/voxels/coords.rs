//! # Coordinate Module
//!
//! World and chunk coordinates are related by floor-division: the chunk index
//! for a world axis value is `world.div_euclid(CHUNK_SIZE)` and the local
//! coordinate is the matching `rem_euclid`, which keeps locals non-negative
//! for negative world coordinates. Truncating division would fold the chunks
//! on either side of the origin together.

use cgmath::Point3;

use super::chunk::CHUNK_SIZE;

/// The permanent identity of a chunk: its integer position on the horizontal
/// chunk grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    /// Chunk index along the world X axis.
    pub x: i32,
    /// Chunk index along the world Z axis.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a chunk coordinate from its two indices.
    pub fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// Returns the coordinate of the chunk containing the given world column.
    pub fn containing(world_x: i32, world_z: i32) -> Self {
        ChunkCoord {
            x: world_x.div_euclid(CHUNK_SIZE),
            z: world_z.div_euclid(CHUNK_SIZE),
        }
    }

    /// Returns the coordinate of the chunk containing a continuous position.
    ///
    /// The vertical component is ignored; chunks span the full world height.
    pub fn of_position(position: Point3<f32>) -> Self {
        ChunkCoord {
            x: (position.x / CHUNK_SIZE as f32).floor() as i32,
            z: (position.z / CHUNK_SIZE as f32).floor() as i32,
        }
    }

    /// Returns this coordinate displaced by whole chunks.
    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        ChunkCoord {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// The four horizontally adjacent chunk coordinates, in
    /// left/right/front/back order.
    pub fn horizontal_neighbors(&self) -> [ChunkCoord; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }

    /// The world coordinates of this chunk's minimum corner column.
    pub fn block_origin(&self) -> (i32, i32) {
        (self.x * CHUNK_SIZE, self.z * CHUNK_SIZE)
    }
}

/// Splits a world column into its owning chunk and local coordinates.
///
/// # Returns
/// The chunk coordinate plus the local `(x, z)` pair, each in
/// `[0, CHUNK_SIZE)` regardless of sign of the inputs.
pub fn world_to_local(world_x: i32, world_z: i32) -> (ChunkCoord, i32, i32) {
    (
        ChunkCoord::containing(world_x, world_z),
        world_x.rem_euclid(CHUNK_SIZE),
        world_z.rem_euclid(CHUNK_SIZE),
    )
}

/// Reassembles a world column from a chunk coordinate and local coordinates.
pub fn local_to_world(coord: ChunkCoord, local_x: i32, local_z: i32) -> (i32, i32) {
    (
        coord.x * CHUNK_SIZE + local_x,
        coord.z * CHUNK_SIZE + local_z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_a_bijection() {
        for world_x in -40..40 {
            let (coord, local_x, local_z) = world_to_local(world_x, 3 * world_x);
            assert!((0..CHUNK_SIZE).contains(&local_x));
            assert!((0..CHUNK_SIZE).contains(&local_z));
            let (back_x, back_z) = local_to_world(coord, local_x, local_z);
            assert_eq!(back_x, world_x);
            assert_eq!(back_z, 3 * world_x);
        }
    }

    #[test]
    fn negative_columns_map_to_negative_chunks() {
        let (coord, local_x, local_z) = world_to_local(-1, -CHUNK_SIZE);
        assert_eq!(coord, ChunkCoord::new(-1, -1));
        assert_eq!(local_x, CHUNK_SIZE - 1);
        assert_eq!(local_z, 0);
    }

    #[test]
    fn of_position_floors_fractional_positions() {
        assert_eq!(
            ChunkCoord::of_position(Point3::new(-0.5, 10.0, 0.5)),
            ChunkCoord::new(-1, 0)
        );
        assert_eq!(
            ChunkCoord::of_position(Point3::new(7.9, 0.0, 8.0)),
            ChunkCoord::new(0, 1)
        );
    }
}
