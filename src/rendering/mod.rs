//! # Rendering Interface
//!
//! This module holds the GPU-facing data types produced by the voxel core
//! and the seam it hands them across. The actual presentation layer
//! (surface, pipelines, texture atlas upload) lives outside this crate; it
//! consumes `ChunkMesh` buffers through the `MeshRenderer` trait and lays
//! vertex buffers out according to `Vertex::desc()`.

mod frustum;
mod mesh;
mod vertex;

pub use frustum::Frustum;
pub use mesh::{ChunkMesh, MeshRenderer};
pub use vertex::Vertex;
