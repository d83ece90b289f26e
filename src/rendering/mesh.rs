//! Mesh buffers and the backend-agnostic draw seam.

use crate::voxels::coords::ChunkCoord;

use super::Vertex;

/// The cached surface geometry of one chunk.
///
/// Vertex and index buffers are replaced wholesale on every rebuild, never
/// mutated in place. Indices describe triangles in a fixed 0-1-2 / 0-2-3
/// fan per quad.
#[derive(Debug, Default)]
pub struct ChunkMesh {
    /// The vertex data for this chunk.
    pub vertices: Vec<Vertex>,
    /// The index data for this chunk.
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        ChunkMesh::default()
    }

    /// Whether this mesh holds no geometry at all.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The number of indices to draw.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// The opaque upload-and-draw primitive the world hands visible chunks to.
///
/// The graphics backend implements this; typically it uploads the buffers
/// (or finds them already resident) and issues an indexed draw call. The
/// world only promises that every mesh passed in belongs to an active,
/// fully generated chunk that passed the frustum test this frame.
pub trait MeshRenderer {
    /// Draws one chunk's current mesh.
    ///
    /// # Arguments
    /// * `coord` - The chunk's grid coordinate, usable as a buffer cache key
    /// * `mesh` - The chunk's current vertex and index data
    fn draw_chunk(&mut self, coord: ChunkCoord, mesh: &ChunkMesh);
}
