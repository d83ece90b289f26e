//! # Surface Extraction Module
//!
//! This module converts a chunk's solid blocks into a triangle mesh
//! containing exactly the visible faces, with a per-vertex ambient occlusion
//! factor.
//!
//! ## Boundary handling
//!
//! Face culling and ambient occlusion both probe cells that may lie in a
//! horizontally adjacent chunk. Neighbors are looked up through a
//! `ChunkNeighbors` view resolved by the world; a side whose chunk has not
//! been generated yet is treated as non-solid, so boundary faces are drawn
//! rather than silently culled. The top and bottom of the world always
//! behave as if the adjacent cell were absent.

use crate::rendering::{ChunkMesh, Vertex};

use super::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};

/// Number of tile columns in the texture atlas.
const ATLAS_COLUMNS: i32 = 4;
/// Number of tile rows in the texture atlas.
const ATLAS_ROWS: i32 = 2;

/// The four horizontally adjacent chunks of a chunk being meshed, any of
/// which may not exist yet.
#[derive(Default)]
pub struct ChunkNeighbors<'a> {
    /// The chunk at `(x - 1, z)`.
    pub left: Option<&'a Chunk>,
    /// The chunk at `(x + 1, z)`.
    pub right: Option<&'a Chunk>,
    /// The chunk at `(x, z + 1)`.
    pub front: Option<&'a Chunk>,
    /// The chunk at `(x, z - 1)`.
    pub back: Option<&'a Chunk>,
}

// Per-face vertex template: 4 vertices of (position xyz, uv), unit cube
// centered on the cell. Face order: -Z, +Z, -X, +X, -Y, +Y.
#[rustfmt::skip]
const FACE_VERTICES: [[f32; 20]; 6] = [
    // -Z
    [  0.5, -0.5, -0.5, 0.0, 0.0,
      -0.5, -0.5, -0.5, 1.0, 0.0,
      -0.5,  0.5, -0.5, 1.0, 1.0,
       0.5,  0.5, -0.5, 0.0, 1.0 ],
    // +Z
    [ -0.5, -0.5,  0.5, 0.0, 0.0,
       0.5, -0.5,  0.5, 1.0, 0.0,
       0.5,  0.5,  0.5, 1.0, 1.0,
      -0.5,  0.5,  0.5, 0.0, 1.0 ],
    // -X
    [ -0.5, -0.5, -0.5, 0.0, 0.0,
      -0.5, -0.5,  0.5, 1.0, 0.0,
      -0.5,  0.5,  0.5, 1.0, 1.0,
      -0.5,  0.5, -0.5, 0.0, 1.0 ],
    // +X
    [  0.5, -0.5,  0.5, 0.0, 0.0,
       0.5, -0.5, -0.5, 1.0, 0.0,
       0.5,  0.5, -0.5, 1.0, 1.0,
       0.5,  0.5,  0.5, 0.0, 1.0 ],
    // -Y
    [ -0.5, -0.5, -0.5, 0.0, 0.0,
       0.5, -0.5, -0.5, 1.0, 0.0,
       0.5, -0.5,  0.5, 1.0, 1.0,
      -0.5, -0.5,  0.5, 0.0, 1.0 ],
    // +Y
    [ -0.5,  0.5,  0.5, 0.0, 0.0,
       0.5,  0.5,  0.5, 1.0, 0.0,
       0.5,  0.5, -0.5, 1.0, 1.0,
      -0.5,  0.5, -0.5, 0.0, 1.0 ],
];

// The cell a face is culled against, in the same face order.
const NEIGHBOR_OFFSETS: [[i32; 3]; 6] = [
    [0, 0, -1], // -Z
    [0, 0, 1],  // +Z
    [-1, 0, 0], // -X
    [1, 0, 0],  // +X
    [0, -1, 0], // -Y
    [0, 1, 0],  // +Y
];

// Cells each vertex samples for ambient occlusion.
// Layout: 6 faces -> 4 vertices -> (side1, side2, corner) -> x, y, z.
#[rustfmt::skip]
const AO_OFFSETS: [[[[i32; 3]; 3]; 4]; 6] = [
    // -Z
    [[[ 0, -1, -1], [ 1,  0, -1], [ 1, -1, -1]],  // v0
     [[ 0, -1, -1], [-1,  0, -1], [-1, -1, -1]],  // v1
     [[ 0,  1, -1], [-1,  0, -1], [-1,  1, -1]],  // v2
     [[ 0,  1, -1], [ 1,  0, -1], [ 1,  1, -1]]], // v3

    // +Z
    [[[ 0, -1,  1], [-1,  0,  1], [-1, -1,  1]],  // v0
     [[ 0, -1,  1], [ 1,  0,  1], [ 1, -1,  1]],  // v1
     [[ 0,  1,  1], [ 1,  0,  1], [ 1,  1,  1]],  // v2
     [[ 0,  1,  1], [-1,  0,  1], [-1,  1,  1]]], // v3

    // -X
    [[[-1,  0, -1], [-1, -1,  0], [-1, -1, -1]],  // v0
     [[-1,  0,  1], [-1, -1,  0], [-1, -1,  1]],  // v1
     [[-1,  0,  1], [-1,  1,  0], [-1,  1,  1]],  // v2
     [[-1,  0, -1], [-1,  1,  0], [-1,  1, -1]]], // v3

    // +X
    [[[ 1,  0,  1], [ 1, -1,  0], [ 1, -1,  1]],  // v0
     [[ 1,  0, -1], [ 1, -1,  0], [ 1, -1, -1]],  // v1
     [[ 1,  0, -1], [ 1,  1,  0], [ 1,  1, -1]],  // v2
     [[ 1,  0,  1], [ 1,  1,  0], [ 1,  1,  1]]], // v3

    // -Y
    [[[-1, -1,  0], [ 0, -1, -1], [-1, -1, -1]],  // v0
     [[ 1, -1,  0], [ 0, -1, -1], [ 1, -1, -1]],  // v1
     [[ 1, -1,  0], [ 0, -1,  1], [ 1, -1,  1]],  // v2
     [[-1, -1,  0], [ 0, -1,  1], [-1, -1,  1]]], // v3

    // +Y
    [[[-1,  1,  0], [ 0,  1,  1], [-1,  1,  1]],  // v0
     [[ 1,  1,  0], [ 0,  1,  1], [ 1,  1,  1]],  // v1
     [[ 1,  1,  0], [ 0,  1, -1], [ 1,  1, -1]],  // v2
     [[-1,  1,  0], [ 0,  1, -1], [-1,  1, -1]]], // v3
];

/// Computes the ambient occlusion level for one face vertex from the
/// solidity of its two side cells and the diagonal corner cell.
///
/// # Returns
/// 0 (fully occluded) when both side cells are solid, otherwise
/// `3 - (solid cell count)`, so 3 means completely open.
pub fn ao_level(side1: bool, side2: bool, corner: bool) -> i32 {
    if side1 && side2 {
        return 0;
    }
    3 - (side1 as i32 + side2 as i32 + corner as i32)
}

/// Checks solidity of a cell in local coordinates, following horizontal
/// overflows into the neighbor view.
///
/// Absent neighbors and vertically out-of-range cells count as non-solid.
fn is_solid_at(chunk: &Chunk, neighbors: &ChunkNeighbors, x: i32, y: i32, z: i32) -> bool {
    if x < 0 {
        return neighbors
            .left
            .is_some_and(|left| left.get_block(x + CHUNK_SIZE, y, z).is_solid());
    }
    if x >= CHUNK_SIZE {
        return neighbors
            .right
            .is_some_and(|right| right.get_block(x - CHUNK_SIZE, y, z).is_solid());
    }
    if z < 0 {
        return neighbors
            .back
            .is_some_and(|back| back.get_block(x, y, z + CHUNK_SIZE).is_solid());
    }
    if z >= CHUNK_SIZE {
        return neighbors
            .front
            .is_some_and(|front| front.get_block(x, y, z - CHUNK_SIZE).is_solid());
    }
    if !(0..CHUNK_HEIGHT).contains(&y) {
        return false;
    }
    chunk.get_block(x, y, z).is_solid()
}

/// Extracts the visible-surface mesh of a chunk.
///
/// Iterates every solid cell and emits one quad (4 vertices, 2 triangles in
/// a fixed 0-1-2 / 0-2-3 fan) for each of its 6 faces whose adjacent cell is
/// non-solid or absent. Vertex positions are in world space; UVs address the
/// block's tile in the 4x2 atlas with V flipped so image space and texture
/// space agree; ambient occlusion is written per vertex in `[0, 1]`.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
/// * `neighbors` - The chunk's horizontal neighbor view
///
/// # Returns
/// A fresh `ChunkMesh`; the caller replaces the chunk's cached mesh
/// wholesale.
pub fn build(chunk: &Chunk, neighbors: &ChunkNeighbors) -> ChunkMesh {
    let mut mesh = ChunkMesh::new();
    let mut index_offset: u32 = 0;

    let (origin_x, origin_z) = chunk.coord().block_origin();
    let uv_w = 1.0 / ATLAS_COLUMNS as f32;
    let uv_h = 1.0 / ATLAS_ROWS as f32;

    for x in 0..CHUNK_SIZE {
        for y in 0..CHUNK_HEIGHT {
            for z in 0..CHUNK_SIZE {
                let block = chunk.get_block(x, y, z);
                if !block.is_solid() {
                    continue;
                }

                let fx = (x + origin_x) as f32;
                let fy = y as f32;
                let fz = (z + origin_z) as f32;

                for face in 0..6 {
                    let nx = x + NEIGHBOR_OFFSETS[face][0];
                    let ny = y + NEIGHBOR_OFFSETS[face][1];
                    let nz = z + NEIGHBOR_OFFSETS[face][2];

                    if is_solid_at(chunk, neighbors, nx, ny, nz) {
                        continue;
                    }

                    let tile_index = block.texture_index();
                    let tile_x = tile_index % ATLAS_COLUMNS;
                    let tile_y = tile_index / ATLAS_COLUMNS;
                    let u_min = tile_x as f32 * uv_w;

                    for vertex in 0..4 {
                        let base = vertex * 5;

                        let position = [
                            FACE_VERTICES[face][base] + fx,
                            FACE_VERTICES[face][base + 1] + fy,
                            FACE_VERTICES[face][base + 2] + fz,
                        ];

                        let raw_u = FACE_VERTICES[face][base + 3];
                        let raw_v = FACE_VERTICES[face][base + 4];
                        let u = u_min + raw_u * uv_w;
                        let v = (1.0 - (tile_y + 1) as f32 * uv_h) + raw_v * uv_h;

                        let offsets = &AO_OFFSETS[face][vertex];
                        let side1 = is_solid_at(
                            chunk,
                            neighbors,
                            x + offsets[0][0],
                            y + offsets[0][1],
                            z + offsets[0][2],
                        );
                        let side2 = is_solid_at(
                            chunk,
                            neighbors,
                            x + offsets[1][0],
                            y + offsets[1][1],
                            z + offsets[1][2],
                        );
                        let corner = is_solid_at(
                            chunk,
                            neighbors,
                            x + offsets[2][0],
                            y + offsets[2][1],
                            z + offsets[2][2],
                        );
                        let ao = ao_level(side1, side2, corner) as f32 / 3.0;

                        mesh.vertices.push(Vertex::new(position, [u, v], ao));
                    }

                    mesh.indices.extend_from_slice(&[
                        index_offset,
                        index_offset + 1,
                        index_offset + 2,
                        index_offset,
                        index_offset + 2,
                        index_offset + 3,
                    ]);
                    index_offset += 4;
                }
            }
        }
    }

    mesh
}
