//! # Headless World Walkthrough
//!
//! Streams terrain around a moving observer without opening a window and
//! logs what the renderer would be asked to draw. Useful for profiling
//! generation and meshing, and for eyeballing world output in CI logs.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info VOXEL_SEED=42 cargo run --release
//! ```
//!
//! `VOXEL_SEED` and `VOXEL_RENDER_DISTANCE` override the defaults.

use cgmath::{perspective, Deg, Matrix4, Point3, Vector3};
use log::info;
use web_time::Instant;

use voxel_world::{
    BlockInteraction, ChunkCoord, ChunkMesh, MeshRenderer, World, WorldConfig, CHUNK_HEIGHT,
    DEFAULT_RENDER_DISTANCE,
};

/// Counts the draw calls and geometry a real backend would receive.
#[derive(Default)]
struct DrawStats {
    chunks: usize,
    vertices: usize,
    indices: usize,
}

impl MeshRenderer for DrawStats {
    fn draw_chunk(&mut self, _coord: ChunkCoord, mesh: &ChunkMesh) {
        self.chunks += 1;
        self.vertices += mesh.vertices.len();
        self.indices += mesh.indices.len();
    }
}

fn env_or<T: std::str::FromStr>(name: &str, fallback: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(fallback)
}

fn main() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = WorldConfig {
        seed: env_or("VOXEL_SEED", fastrand::u32(..)),
        render_distance: env_or("VOXEL_RENDER_DISTANCE", DEFAULT_RENDER_DISTANCE),
    };
    let mut world = World::with_config(config);

    let projection = perspective(Deg(45.0), 16.0 / 9.0, 0.1, 500.0);
    let forward = Vector3::new(1.0, -0.3, 0.0);

    // Walk east for a few frames, streaming and "drawing" as we go.
    let started = Instant::now();
    for step in 0..16 {
        let observer = Point3::new(step as f32 * 4.0, 24.0, 0.5);
        world.update(observer);

        let view = Matrix4::look_at_rh(observer, observer + forward, Vector3::unit_y());
        let mut stats = DrawStats::default();
        world.render(view, projection, &mut stats);

        info!(
            "Step {}: {} active chunks, {} drawn ({} vertices, {} indices)",
            step,
            world.active_chunks().len(),
            stats.chunks,
            stats.vertices,
            stats.indices
        );
    }
    info!(
        "Walked 16 steps in {:?}, {} chunks generated",
        started.elapsed(),
        world.chunk_count()
    );

    // Find the ground at the end of the walk, stand just above it, and
    // swing once, then place against the freshly exposed face.
    let down = Vector3::new(0.0, -1.0, 0.0);
    let surface = world.raycast(
        Point3::new(60.5, CHUNK_HEIGHT as f32 - 0.5, 0.5),
        down,
        CHUNK_HEIGHT as f32,
    );
    if surface.hit {
        let observer = Point3::new(
            60.5,
            surface.block_pos.y as f32 + 3.5,
            0.5,
        );
        let interaction = BlockInteraction::new();

        if interaction.break_block(&mut world, observer, down) {
            info!("Broke the surface block at {:?}", surface.block_pos);
        }
        if interaction.place_block(&mut world, observer, down) {
            info!(
                "Placed a {:?} block in the opened cell",
                interaction.current_kind()
            );
        }

        let hit = world.raycast(observer, down, 30.0);
        info!(
            "Final ground probe: hit={} at {:?} (normal {:?})",
            hit.hit, hit.block_pos, hit.hit_normal
        );
    }
}
