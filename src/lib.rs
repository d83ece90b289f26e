#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! The simulation core of a block-building sandbox: procedural terrain,
//! chunked voxel storage, surface meshing with ambient occlusion, and
//! ray-based block picking.
//!
//! This crate is renderer-agnostic. It produces `ChunkMesh` buffers in the
//! `Vertex` format and hands the visible ones to whatever implements
//! `MeshRenderer`; the windowing and GPU presentation layers live outside.
//!
//! ## Key Modules
//!
//! * `voxels` - Blocks, chunks, terrain generation, the streamed world,
//!   and block interaction
//! * `rendering` - The mesh/vertex data types and frustum culling the
//!   world uses to select what to draw
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cgmath::Point3;
//! use voxel_world::World;
//!
//! let mut world = World::new();
//! // Each frame: stream chunks around the observer, then draw.
//! world.update(Point3::new(0.0, 20.0, 0.0));
//! ```
//!
//! ## World Model
//!
//! Chunks are fixed-size columns on a horizontal grid. Terrain and trees
//! derive deterministically from the world seed, so chunks regenerate
//! identically instead of being persisted. The world keeps every generated
//! chunk and streams an active window of them around a moving observer.

pub mod rendering;
pub mod voxels;

pub use rendering::{ChunkMesh, Frustum, MeshRenderer, Vertex};
pub use voxels::block::block_kind::BlockKind;
pub use voxels::block::Block;
pub use voxels::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE, SEA_LEVEL};
pub use voxels::coords::ChunkCoord;
pub use voxels::interaction::BlockInteraction;
pub use voxels::world::{RaycastHit, World, WorldConfig, DEFAULT_RENDER_DISTANCE};
