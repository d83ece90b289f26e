//! # World Module
//!
//! This module provides the `World` struct which owns every generated chunk
//! and streams the set of active chunks around a moving observer.
//!
//! ## Architecture
//!
//! The world keeps two views of its chunks:
//!
//! * an authoritative map from chunk coordinate to chunk, which only ever
//!   grows (chunks are never evicted once generated), and
//! * a transient active set of coordinates within render distance of the
//!   observer, recomputed on every `update` call.
//!
//! The active set is always a subset of the authoritative map, and every
//! coordinate in it refers to a fully generated and meshed chunk.
//!
//! ## Streaming
//!
//! Everything runs synchronously on the calling thread: entering a fresh
//! region generates and meshes all missing chunks before `update` returns.
//! Loading a chunk re-runs the vegetation pass over the whole world (tree
//! canopies may spill across chunk borders) and rebuilds the meshes of the
//! four existing horizontal neighbors so border faces that were drawn
//! against the void get culled.

use std::collections::{HashMap, HashSet};

use cgmath::{Matrix4, Point3};
use log::{debug, info};
use web_time::Instant;

use crate::rendering::{Frustum, MeshRenderer};

use super::block::Block;
use super::chunk::meshing::{self, ChunkNeighbors};
use super::chunk::terrain::OverflowBlock;
use super::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
use super::coords::{world_to_local, ChunkCoord};

mod raycast;

pub use raycast::RaycastHit;

/// How many chunks in each horizontal direction stay loaded around the
/// observer by default.
pub const DEFAULT_RENDER_DISTANCE: i32 = 8;

/// Parameters a world is created with.
#[derive(Copy, Clone, Debug)]
pub struct WorldConfig {
    /// The process-wide seed all terrain and vegetation noise derives from.
    pub seed: u32,
    /// Chebyshev radius, in chunks, of the active set around the observer.
    pub render_distance: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: fastrand::u32(..),
            render_distance: DEFAULT_RENDER_DISTANCE,
        }
    }
}

/// Represents the streamed voxel world around one observer.
///
/// All state is owned by the calling thread and regenerated procedurally
/// from the seed; nothing is persisted. Pass the instance (or a narrower
/// view of it) into whatever component handles block-edit input rather
/// than holding it in a global.
pub struct World {
    config: WorldConfig,

    /// Every chunk generated so far, keyed by chunk coordinate. Exclusive
    /// owner; entries are never removed while the world lives.
    chunks: HashMap<ChunkCoord, Chunk>,

    /// The chunk coordinates within render distance as of the last
    /// `update` call. Always a subset of `chunks`.
    active: HashSet<ChunkCoord>,
}

impl World {
    /// Creates a world with a random seed and the default render distance.
    pub fn new() -> Self {
        World::with_config(WorldConfig::default())
    }

    /// Creates a world with explicit configuration.
    ///
    /// # Arguments
    /// * `config` - The seed and render distance to use
    pub fn with_config(config: WorldConfig) -> Self {
        info!(
            "Creating world: seed {}, render distance {}",
            config.seed, config.render_distance
        );
        World {
            config,
            chunks: HashMap::new(),
            active: HashSet::new(),
        }
    }

    /// The configuration this world was created with.
    pub fn config(&self) -> WorldConfig {
        self.config
    }

    /// The number of chunks generated so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The set of chunk coordinates currently in range of the observer.
    pub fn active_chunks(&self) -> &HashSet<ChunkCoord> {
        &self.active
    }

    /// Looks up a generated chunk by coordinate.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Recomputes the active chunk set around the observer, generating and
    /// meshing any chunks that enter range for the first time.
    ///
    /// Call once per frame before rendering. The active set is replaced
    /// wholesale; chunks that fall out of range stay in the authoritative
    /// map but are no longer drawn.
    ///
    /// # Arguments
    /// * `observer` - The observer's position in world space
    pub fn update(&mut self, observer: Point3<f32>) {
        let center = ChunkCoord::of_position(observer);
        let distance = self.config.render_distance;

        let mut active = HashSet::new();
        let mut loaded = 0usize;
        let started = Instant::now();

        for dx in -distance..=distance {
            for dz in -distance..=distance {
                let coord = center.offset(dx, dz);
                if !self.chunks.contains_key(&coord) {
                    self.load_chunk(coord);
                    loaded += 1;
                }
                active.insert(coord);
            }
        }

        self.active = active;

        if loaded > 0 {
            info!(
                "Streamed {} new chunk(s) around {:?} in {:?} ({} total)",
                loaded,
                center,
                started.elapsed(),
                self.chunks.len()
            );
        }
    }

    /// Draws every active chunk whose bounding box intersects the view
    /// frustum. Pure selection: world state is not touched.
    ///
    /// # Arguments
    /// * `view` - The observer's view matrix
    /// * `projection` - The projection matrix
    /// * `renderer` - The backend that uploads and draws chunk meshes
    pub fn render(&self, view: Matrix4<f32>, projection: Matrix4<f32>, renderer: &mut dyn MeshRenderer) {
        let frustum = Frustum::new(projection * view);

        for &coord in &self.active {
            let Some(chunk) = self.chunks.get(&coord) else {
                continue;
            };

            let (origin_x, origin_z) = coord.block_origin();
            let min = Point3::new(origin_x as f32, 0.0, origin_z as f32);
            let max = Point3::new(
                (origin_x + CHUNK_SIZE) as f32,
                CHUNK_HEIGHT as f32,
                (origin_z + CHUNK_SIZE) as f32,
            );

            if frustum.contains_box(min, max) {
                renderer.draw_chunk(coord, chunk.mesh());
            }
        }
    }

    /// Gets the block at the given world coordinates.
    ///
    /// # Returns
    /// The block, or `Block::AIR` when the owning chunk is not currently
    /// active. Never fails.
    pub fn get_block(&self, world_x: i32, world_y: i32, world_z: i32) -> Block {
        let (coord, local_x, local_z) = world_to_local(world_x, world_z);
        if !self.active.contains(&coord) {
            return Block::AIR;
        }
        match self.chunks.get(&coord) {
            Some(chunk) => chunk.get_block(local_x, world_y, local_z),
            None => Block::AIR,
        }
    }

    /// Sets the block at the given world coordinates and rebuilds the
    /// affected meshes.
    ///
    /// A silent no-op when the owning chunk has not been generated. When
    /// the edited cell lies on a chunk border, the specific neighbor(s)
    /// sharing that border are remeshed as well, so their culled faces
    /// track the change.
    pub fn set_block(&mut self, world_x: i32, world_y: i32, world_z: i32, block: Block) {
        let (coord, local_x, local_z) = world_to_local(world_x, world_z);

        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return;
        };
        chunk.set_block(local_x, world_y, local_z, block);
        self.rebuild_mesh(coord);

        if local_x == 0 {
            self.rebuild_mesh(coord.offset(-1, 0));
        }
        if local_x == CHUNK_SIZE - 1 {
            self.rebuild_mesh(coord.offset(1, 0));
        }
        if local_z == 0 {
            self.rebuild_mesh(coord.offset(0, -1));
        }
        if local_z == CHUNK_SIZE - 1 {
            self.rebuild_mesh(coord.offset(0, 1));
        }
    }

    /// Generates the chunk at a coordinate, runs the world-wide vegetation
    /// pass, and brings all affected meshes up to date.
    fn load_chunk(&mut self, coord: ChunkCoord) {
        let started = Instant::now();

        let chunk = Chunk::new(coord, self.config.seed);
        self.chunks.insert(coord, chunk);

        // Trees may only be planted now that the chunk exists; the pass is
        // idempotent for every chunk that already has its trees.
        self.generate_all_trees();

        self.rebuild_mesh(coord);

        // Border faces the neighbors drew against the void are culled now
        // that this chunk exists.
        for neighbor in coord.horizontal_neighbors() {
            if self.chunks.contains_key(&neighbor) {
                self.rebuild_mesh(neighbor);
            }
        }

        debug!("Loaded chunk {:?} in {:?}", coord, started.elapsed());
    }

    /// Runs tree generation over every loaded chunk, routing cross-chunk
    /// placements afterwards. Chunks whose trees already exist are
    /// untouched.
    fn generate_all_trees(&mut self) {
        let coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        let seed = self.config.seed;

        for coord in coords {
            let overflow = match self.chunks.get_mut(&coord) {
                Some(chunk) => chunk.generate_trees(seed),
                None => continue,
            };
            if !overflow.is_empty() {
                self.apply_tree_overflow(coord, overflow);
            }
        }
    }

    /// Routes tree blocks that spilled out of their generating chunk into
    /// the adjacent chunk on the overflowing axis. Spills whose target
    /// chunk does not exist are discarded, as are corner spills whose other
    /// axis is also out of range (the target chunk's bounds check drops
    /// them).
    fn apply_tree_overflow(&mut self, source: ChunkCoord, overflow: Vec<OverflowBlock>) {
        for spill in overflow {
            let (target, local_x, local_z) = if spill.x < 0 {
                (source.offset(-1, 0), spill.x + CHUNK_SIZE, spill.z)
            } else if spill.x >= CHUNK_SIZE {
                (source.offset(1, 0), spill.x - CHUNK_SIZE, spill.z)
            } else if spill.z < 0 {
                (source.offset(0, -1), spill.x, spill.z + CHUNK_SIZE)
            } else if spill.z >= CHUNK_SIZE {
                (source.offset(0, 1), spill.x, spill.z - CHUNK_SIZE)
            } else {
                continue;
            };

            if let Some(chunk) = self.chunks.get_mut(&target) {
                chunk.set_block(local_x, spill.y, local_z, spill.block);
            }
        }
    }

    /// Re-extracts one chunk's surface mesh against its current neighbor
    /// view. A no-op when the chunk does not exist.
    fn rebuild_mesh(&mut self, coord: ChunkCoord) {
        let mesh = match self.chunks.get(&coord) {
            Some(chunk) => {
                let neighbors = ChunkNeighbors {
                    left: self.chunks.get(&coord.offset(-1, 0)),
                    right: self.chunks.get(&coord.offset(1, 0)),
                    front: self.chunks.get(&coord.offset(0, 1)),
                    back: self.chunks.get(&coord.offset(0, -1)),
                };
                meshing::build(chunk, &neighbors)
            }
            None => return,
        };

        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.install_mesh(mesh);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

#[cfg(test)]
impl World {
    /// Builds a world of empty (all-air) chunks at the given coordinates,
    /// all active, for targeted scenarios.
    pub(crate) fn from_empty_chunks(coords: &[ChunkCoord]) -> Self {
        let mut world = World::with_config(WorldConfig {
            seed: 0,
            render_distance: 1,
        });
        for &coord in coords {
            world.chunks.insert(coord, Chunk::empty(coord));
            world.active.insert(coord);
        }
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::block_kind::BlockKind;
    use cgmath::{perspective, Deg, Vector3};

    fn stone() -> Block {
        Block::new(BlockKind::Stone)
    }

    fn square(radius: i32) -> Vec<ChunkCoord> {
        let mut coords = Vec::new();
        for x in -radius..=radius {
            for z in -radius..=radius {
                coords.push(ChunkCoord::new(x, z));
            }
        }
        coords
    }

    #[test]
    fn default_config_uses_the_standard_render_distance() {
        assert_eq!(WorldConfig::default().render_distance, DEFAULT_RENDER_DISTANCE);
        assert_eq!(DEFAULT_RENDER_DISTANCE, 8);
    }

    #[test]
    fn update_generates_the_chebyshev_square() {
        let mut world = World::with_config(WorldConfig {
            seed: 7,
            render_distance: 2,
        });
        world.update(Point3::new(0.5, 20.0, 0.5));

        assert_eq!(world.active_chunks().len(), 25);
        assert_eq!(world.chunk_count(), 25);
        for coord in world.active_chunks() {
            assert!(world.chunk(*coord).is_some());
        }
    }

    #[test]
    fn update_is_stable_within_a_chunk() {
        let mut world = World::with_config(WorldConfig {
            seed: 7,
            render_distance: 2,
        });
        world.update(Point3::new(1.0, 20.0, 1.0));
        let first = world.active_chunks().clone();

        // Still inside chunk (0, 0).
        world.update(Point3::new(6.9, 15.0, 3.2));
        assert_eq!(*world.active_chunks(), first);
        assert_eq!(world.chunk_count(), first.len());
    }

    #[test]
    fn moving_a_chunk_over_shifts_the_active_set() {
        let mut world = World::with_config(WorldConfig {
            seed: 7,
            render_distance: 1,
        });
        world.update(Point3::new(0.5, 20.0, 0.5));
        assert!(world.active_chunks().contains(&ChunkCoord::new(-1, 0)));

        world.update(Point3::new(CHUNK_SIZE as f32 + 0.5, 20.0, 0.5));
        assert!(!world.active_chunks().contains(&ChunkCoord::new(-1, 0)));
        assert!(world.active_chunks().contains(&ChunkCoord::new(2, 0)));
        // Out-of-range chunks stay generated.
        assert!(world.chunk(ChunkCoord::new(-1, 0)).is_some());
    }

    #[test]
    fn get_block_outside_active_chunks_is_air() {
        let world = World::from_empty_chunks(&[ChunkCoord::new(0, 0)]);
        assert_eq!(world.get_block(1000, 5, 1000), Block::AIR);
        assert_eq!(world.get_block(0, -5, 0), Block::AIR);
    }

    #[test]
    fn set_block_outside_generated_chunks_is_a_no_op() {
        let mut world = World::from_empty_chunks(&[ChunkCoord::new(0, 0)]);
        world.set_block(1000, 5, 1000, stone());
        assert_eq!(world.chunk_count(), 1);
        assert_eq!(world.get_block(1000, 5, 1000), Block::AIR);
    }

    #[test]
    fn set_block_updates_the_mesh() {
        let mut world = World::from_empty_chunks(&[ChunkCoord::new(0, 0)]);
        world.set_block(3, 10, 3, stone());
        let mesh = world.chunk(ChunkCoord::new(0, 0)).unwrap().mesh();
        assert_eq!(mesh.vertices.len(), 24);
    }

    #[test]
    fn boundary_edit_rebuilds_the_sharing_neighbor() {
        let mut world =
            World::from_empty_chunks(&[ChunkCoord::new(0, 0), ChunkCoord::new(-1, 0)]);

        // A block on the neighbor's +X border, drawn with all 6 faces while
        // chunk (0, 0) is empty at the seam.
        world.set_block(-1, 10, 3, stone());
        let before = world
            .chunk(ChunkCoord::new(-1, 0))
            .unwrap()
            .mesh()
            .vertices
            .len();
        assert_eq!(before, 24);

        // Editing local x == 0 of chunk (0, 0) must remesh the left
        // neighbor: its +X face is now hidden.
        world.set_block(0, 10, 3, stone());
        let after = world
            .chunk(ChunkCoord::new(-1, 0))
            .unwrap()
            .mesh()
            .vertices
            .len();
        assert_eq!(after, 20);
    }

    #[test]
    fn boundary_edit_without_neighbor_changes_nothing_else() {
        let mut world = World::from_empty_chunks(&[ChunkCoord::new(0, 0)]);
        world.set_block(0, 10, 3, stone());
        assert_eq!(world.chunk_count(), 1);
        let mesh = world.chunk(ChunkCoord::new(0, 0)).unwrap().mesh();
        // All six faces drawn; the missing left neighbor never culls.
        assert_eq!(mesh.vertices.len(), 24);
    }

    #[test]
    fn loading_a_chunk_culls_neighbor_border_faces() {
        // Counts chunk (0, 0) vertices lying exactly on the plane it shares
        // with chunk (1, 0). Cells are centered on integer coordinates, so
        // the +X faces of the border column sit at CHUNK_SIZE - 0.5.
        fn border_plane_vertices(world: &World) -> usize {
            world
                .chunk(ChunkCoord::new(0, 0))
                .unwrap()
                .mesh()
                .vertices
                .iter()
                .filter(|v| v.position[0] == CHUNK_SIZE as f32 - 0.5)
                .count()
        }

        let mut world = World::with_config(WorldConfig {
            seed: 3,
            render_distance: 0,
        });
        world.update(Point3::new(0.5, 20.0, 0.5));
        // Every solid border cell faces the void, so the plane is covered.
        let solo = border_plane_vertices(&world);
        assert!(solo > 0);

        // Walk one chunk to the right; the shared border becomes interior
        // and most of those faces get culled against the new terrain.
        world.update(Point3::new(CHUNK_SIZE as f32 + 0.5, 20.0, 0.5));
        assert!(border_plane_vertices(&world) < solo);
    }

    #[test]
    fn render_only_draws_chunks_in_the_frustum() {
        use crate::rendering::ChunkMesh;

        struct Recorder(Vec<ChunkCoord>);
        impl MeshRenderer for Recorder {
            fn draw_chunk(&mut self, coord: ChunkCoord, _mesh: &ChunkMesh) {
                self.0.push(coord);
            }
        }

        let mut world = World::from_empty_chunks(&square(3));
        for coord in square(3) {
            let (x, z) = coord.block_origin();
            world.set_block(x + 4, 10, z + 4, stone());
        }

        // Look straight down +X from just outside the loaded region.
        let projection = perspective(Deg(45.0), 1.0, 0.1, 500.0);
        let view = Matrix4::look_at_rh(
            Point3::new(-40.0, 15.0, 0.0),
            Point3::new(0.0, 15.0, 0.0),
            Vector3::unit_y(),
        );

        let mut recorder = Recorder(Vec::new());
        world.render(view, projection, &mut recorder);

        assert!(!recorder.0.is_empty());
        assert!(recorder.0.len() < world.active_chunks().len());
        for coord in &recorder.0 {
            assert!(world.active_chunks().contains(coord));
        }
    }

    #[test]
    fn vegetation_pass_is_idempotent_across_loads() {
        let mut world = World::with_config(WorldConfig {
            seed: 11,
            render_distance: 1,
        });
        world.update(Point3::new(0.5, 20.0, 0.5));

        let snapshot: Vec<Block> = {
            let chunk = world.chunk(ChunkCoord::new(0, 0)).unwrap();
            let mut all = Vec::new();
            for x in 0..CHUNK_SIZE {
                for y in 0..CHUNK_HEIGHT {
                    for z in 0..CHUNK_SIZE {
                        all.push(chunk.get_block(x, y, z));
                    }
                }
            }
            all
        };

        // Loading far-away chunks re-runs the tree pass; the interior of
        // the already-vegetated chunk must not change.
        world.update(Point3::new(100.0, 20.0, 100.0));
        let chunk = world.chunk(ChunkCoord::new(0, 0)).unwrap();
        let mut index = 0;
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_HEIGHT {
                for z in 0..CHUNK_SIZE {
                    assert_eq!(chunk.get_block(x, y, z), snapshot[index]);
                    index += 1;
                }
            }
        }
    }
}
