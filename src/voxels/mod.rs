//! # Voxels Module
//!
//! The voxel core: block definitions, chunk storage and generation, the
//! streamed world, and the aim-directed edit layer on top of it.

pub mod block;
pub mod chunk;
pub mod coords;
pub mod interaction;
pub mod world;
