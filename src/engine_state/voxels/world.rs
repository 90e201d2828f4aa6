//! # World Module
//!
//! This module provides the `World` struct which manages every chunk of the
//! voxel world. It is the central coordinator for chunk generation, global
//! block access and chunk mesh lifetimes.
//!
//! ## Architecture
//!
//! The world uses sparse storage: only chunks that have been generated are
//! kept, keyed by their [`ChunkPosition`]. Chunks are created on demand by
//! [`World::generate_chunk`] and, unless a chunk limit is configured, live
//! until [`World::dispose`].
//!
//! ## Edits
//!
//! [`World::set_block`] rebuilds the mesh of the edited chunk. When the edit
//! lies on the chunk's X or Z border the loaded neighbour across that border
//! is remeshed as well, since each chunk meshes its own cells in isolation.
//!
//! ## Chunk Limit
//!
//! With `max_loaded_chunks` set, the world tracks chunk recency in an LRU list
//! and evicts the least recently generated or edited chunk once the limit is
//! exceeded. The limit is never below the square of chunks within
//! `initial_radius`, and the square [`World::generate_around`] is filling is
//! never evicted while it is being filled.
//!
//! ## Coordinate Domain
//!
//! Chunk coordinates beyond `±i32::MAX / 16` have no distinct world position.
//! World offsets wrap there instead of overflowing, so such chunks alias
//! terrain from the other end of the `i32` range.

use std::collections::HashMap;

use log::{debug, info, warn};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::core::StResource;
use crate::engine_state::rendering::Scene;

use super::{
    block::BlockType,
    chunk::{Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH},
    coords::{world_to_chunk_local, ChunkPosition},
    generation::{TerrainGenerator, TerrainParameters},
};

/// Settings the world is created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the height map and cave noise
    pub seed: u64,
    /// Chunks within this many chunks of the origin (and of the camera) are generated
    pub initial_radius: i32,
    /// Upper bound on loaded chunks; `None` keeps every chunk
    pub max_loaded_chunks: Option<usize>,
    /// Terrain shape parameters
    pub terrain: TerrainParameters,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 0,
            initial_radius: 2,
            max_loaded_chunks: None,
            terrain: TerrainParameters::default(),
        }
    }
}

/// Represents a voxel world composed of chunks.
///
/// The world owns the scene its chunk meshes are attached to, so every mesh it
/// creates is also released through it.
///
/// # Examples
///
/// ```
/// use voxel_terrain::engine_state::rendering::HeadlessScene;
/// use voxel_terrain::engine_state::voxels::world::{World, WorldConfig};
///
/// let mut world = World::new(WorldConfig::default(), HeadlessScene::new());
/// let chunk = world.generate_chunk(0, 0);
/// assert!(world.get_chunk(0, 0).is_some());
/// assert!(chunk.get().mesh().is_some());
/// ```
pub struct World<S: Scene> {
    /// Loaded chunks by chunk coordinate
    chunks: HashMap<ChunkPosition, StResource<Chunk>>,
    /// Terrain generator built from the configured seed
    generator: TerrainGenerator,
    /// Scene receiving chunk meshes
    scene: S,
    config: WorldConfig,
    /// Recency of loaded chunks; only present with a chunk limit
    retention: Option<ChunkRetention>,
    /// Square `(center, radius)` that must stay loaded while it is generated
    pinned: Option<(ChunkPosition, i32)>,
}

/// Recency list with the chunk limit it enforces.
struct ChunkRetention {
    limit: usize,
    recently_used: LruCache<ChunkPosition, ()>,
}

impl ChunkRetention {
    fn new(limit: usize) -> Self {
        ChunkRetention {
            limit,
            recently_used: LruCache::unbounded(),
        }
    }

    /// Marks `position` as used and returns the chunks to unload, oldest
    /// first. Chunks for which `keep` holds are skipped.
    fn touch(
        &mut self,
        position: ChunkPosition,
        keep: impl Fn(ChunkPosition) -> bool,
    ) -> Vec<ChunkPosition> {
        self.recently_used.put(position, ());
        let mut evicted = Vec::new();
        while self.recently_used.len() > self.limit {
            let candidate = self
                .recently_used
                .iter()
                .rev()
                .map(|(candidate, _)| *candidate)
                .find(|candidate| *candidate != position && !keep(*candidate));
            let Some(candidate) = candidate else {
                break;
            };
            self.recently_used.pop(&candidate);
            evicted.push(candidate);
        }
        evicted
    }
}

/// Whether `position` lies in the square of `radius` chunks around `center`.
fn within_square(center: ChunkPosition, radius: i32, position: ChunkPosition) -> bool {
    let radius = radius.max(0).unsigned_abs();
    position.x.wrapping_sub(center.x).unsigned_abs() <= radius
        && position.z.wrapping_sub(center.z).unsigned_abs() <= radius
}

impl<S: Scene> World<S> {
    /// Creates a new, empty world.
    ///
    /// # Arguments
    /// * `config` - Seed, radius, chunk limit and terrain parameters
    /// * `scene` - The scene chunk meshes are attached to
    pub fn new(config: WorldConfig, scene: S) -> Self {
        let generator = TerrainGenerator::new(config.seed, config.terrain.clone());
        let retention = config.max_loaded_chunks.map(|limit| {
            let side = 2 * config.initial_radius.max(0) as usize + 1;
            let minimum = side * side;
            if limit < minimum {
                warn!(
                    "max_loaded_chunks of {limit} cannot hold the {minimum} chunks within radius {}, using {minimum}",
                    config.initial_radius
                );
            }
            ChunkRetention::new(limit.max(minimum))
        });

        info!("Created world with seed {}", config.seed);

        World {
            chunks: HashMap::new(),
            generator,
            scene,
            config,
            retention,
            pinned: None,
        }
    }

    /// Returns the chunk at the given chunk coordinates, generating it first
    /// if it is not loaded yet.
    ///
    /// Generation is idempotent: an existing chunk is returned as is, never
    /// refilled or remeshed.
    ///
    /// Coordinates beyond `±i32::MAX / 16` wrap around (see the module docs).
    ///
    /// # Returns
    /// A handle to the chunk, sharing storage with the world's own handle.
    pub fn generate_chunk(&mut self, chunk_x: i32, chunk_z: i32) -> StResource<Chunk> {
        let position = ChunkPosition::new(chunk_x, chunk_z);
        if let Some(existing) = self.chunks.get(&position) {
            let existing = existing.clone();
            self.touch(position);
            return existing;
        }

        let mut chunk = Chunk::new(position);
        self.generator.fill_chunk(&mut chunk);
        chunk.generate_mesh(&mut self.scene);
        debug!("Generated chunk {position:?}");

        let handle = StResource::new(chunk);
        self.chunks.insert(position, handle.clone());
        self.touch(position);
        handle
    }

    /// Returns the chunk at the given chunk coordinates if it is loaded.
    pub fn get_chunk(&self, chunk_x: i32, chunk_z: i32) -> Option<StResource<Chunk>> {
        self.chunks.get(&ChunkPosition::new(chunk_x, chunk_z)).cloned()
    }

    /// Whether a chunk is loaded at the given position.
    pub fn contains_chunk(&self, position: ChunkPosition) -> bool {
        self.chunks.contains_key(&position)
    }

    /// The number of loaded chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Positions of every loaded chunk, in no particular order.
    pub fn chunk_positions(&self) -> impl Iterator<Item = ChunkPosition> + '_ {
        self.chunks.keys().copied()
    }

    /// Gets the block at world coordinates.
    ///
    /// Returns `Air` above or below the world and inside chunks that are not
    /// loaded.
    pub fn get_block(&self, world_x: i32, world_y: i32, world_z: i32) -> BlockType {
        if !(0..CHUNK_HEIGHT).contains(&world_y) {
            return BlockType::Air;
        }
        let (position, local_x, local_z) = world_to_chunk_local(world_x, world_z);
        match self.chunks.get(&position) {
            Some(chunk) => chunk.get().get_block(local_x, world_y, local_z),
            None => BlockType::Air,
        }
    }

    /// Sets the block at world coordinates and remeshes what the edit affects.
    ///
    /// Does nothing above or below the world or inside a chunk that is not
    /// loaded; edits never generate chunks.
    pub fn set_block(&mut self, world_x: i32, world_y: i32, world_z: i32, block_type: BlockType) {
        if !(0..CHUNK_HEIGHT).contains(&world_y) {
            return;
        }
        let (position, local_x, local_z) = world_to_chunk_local(world_x, world_z);
        let Some(chunk) = self.chunks.get(&position).cloned() else {
            debug!("Ignored edit at ({world_x}, {world_y}, {world_z}): chunk {position:?} not loaded");
            return;
        };

        {
            let mut chunk = chunk.get_mut();
            chunk.set_block(local_x, world_y, local_z, block_type);
            chunk.generate_mesh(&mut self.scene);
        }

        if local_x == 0 {
            self.remesh(position.offset(-1, 0));
        } else if local_x == CHUNK_WIDTH - 1 {
            self.remesh(position.offset(1, 0));
        }
        if local_z == 0 {
            self.remesh(position.offset(0, -1));
        } else if local_z == CHUNK_DEPTH - 1 {
            self.remesh(position.offset(0, 1));
        }

        self.touch(position);
    }

    /// Generates every chunk with both coordinates in `-radius..=radius`.
    pub fn generate_initial_chunks(&mut self, radius: i32) {
        let start = Instant::now();
        for chunk_x in -radius..=radius {
            for chunk_z in -radius..=radius {
                self.generate_chunk(chunk_x, chunk_z);
            }
        }
        info!(
            "Generated initial chunks within radius {} ({} loaded) in {:?}",
            radius,
            self.chunks.len(),
            start.elapsed()
        );
    }

    /// Generates every chunk within `radius` chunks of `center`.
    ///
    /// With a chunk limit, chunks outside the square are evicted to make room
    /// but none inside it are.
    ///
    /// # Returns
    /// The number of chunks that were newly generated.
    pub fn generate_around(&mut self, center: ChunkPosition, radius: i32) -> usize {
        let before = self.chunks.len();
        let mut generated = 0;
        let previous = self.pinned.replace((center, radius));
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let position = center.offset(dx, dz);
                if !self.chunks.contains_key(&position) {
                    generated += 1;
                }
                self.generate_chunk(position.x, position.z);
            }
        }
        self.pinned = previous;
        if generated > 0 {
            debug!(
                "Generated {generated} chunks around {center:?} ({before} -> {} loaded)",
                self.chunks.len()
            );
        }
        generated
    }

    /// Releases every chunk mesh and unloads every chunk.
    pub fn dispose(&mut self) {
        let count = self.chunks.len();
        for (_, chunk) in self.chunks.drain() {
            chunk.get_mut().dispose(&mut self.scene);
        }
        if let Some(retention) = self.retention.as_mut() {
            retention.recently_used.clear();
        }
        info!("Disposed world ({count} chunks)");
    }

    /// The scene chunk meshes are attached to.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access to the scene.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// The enforced chunk limit, if any. May be above the configured one.
    pub fn chunk_limit(&self) -> Option<usize> {
        self.retention.as_ref().map(|retention| retention.limit)
    }

    /// The configuration the world was created with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The terrain generator filling new chunks.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Rebuilds the mesh of a loaded chunk. Geometry only, blocks are untouched.
    fn remesh(&mut self, position: ChunkPosition) {
        if let Some(chunk) = self.chunks.get(&position) {
            chunk.get_mut().generate_mesh(&mut self.scene);
        }
    }

    /// Marks a chunk as recently used, evicting the oldest one over the limit.
    fn touch(&mut self, position: ChunkPosition) {
        let pinned = self.pinned;
        let Some(retention) = self.retention.as_mut() else {
            return;
        };
        let evicted = retention.touch(position, |candidate| {
            pinned.is_some_and(|(center, radius)| within_square(center, radius, candidate))
        });
        for candidate in evicted {
            self.evict(candidate);
        }
    }

    fn evict(&mut self, position: ChunkPosition) {
        if let Some(chunk) = self.chunks.remove(&position) {
            chunk.get_mut().dispose(&mut self.scene);
            debug!("Evicted chunk {position:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine_state::rendering::HeadlessScene;

    use super::*;

    fn world() -> World<HeadlessScene> {
        World::new(WorldConfig::default(), HeadlessScene::new())
    }

    #[test]
    fn generate_chunk_is_idempotent() {
        let mut world = world();
        let first = world.generate_chunk(1, -1);
        let blocks = first.get().raw_blocks().to_vec();
        let mesh = first.get().mesh().map(|m| m.id());

        let second = world.generate_chunk(1, -1);
        assert!(StResource::ptr_eq(&first, &second));
        assert_eq!(second.get().raw_blocks(), blocks.as_slice());
        assert_eq!(second.get().mesh().map(|m| m.id()), mesh);
        assert_eq!(world.chunk_count(), 1);
        assert_eq!(world.scene().add_count(), 1);
    }

    #[test]
    fn missing_chunks_read_as_air_and_ignore_writes() {
        let mut world = world();
        assert!(world.get_chunk(0, 0).is_none());
        assert_eq!(world.get_block(0, 0, 0), BlockType::Air);

        world.set_block(0, 0, 0, BlockType::Stone);
        assert_eq!(world.chunk_count(), 0);
        assert_eq!(world.scene().add_count(), 0);
    }

    #[test]
    fn vertical_bounds_are_air_and_ignored() {
        let mut world = world();
        world.generate_chunk(0, 0);
        let adds = world.scene().add_count();

        assert_eq!(world.get_block(3, -1, 3), BlockType::Air);
        assert_eq!(world.get_block(3, 32, 3), BlockType::Air);
        world.set_block(3, -1, 3, BlockType::Stone);
        world.set_block(3, 32, 3, BlockType::Stone);
        assert_eq!(world.scene().add_count(), adds);
    }

    #[test]
    fn interior_edit_remeshes_only_its_chunk() {
        let mut world = world();
        world.generate_initial_chunks(1);
        let adds = world.scene().add_count();

        world.set_block(5, 25, 5, BlockType::Stone);
        assert_eq!(world.get_block(5, 25, 5), BlockType::Stone);
        assert_eq!(world.scene().add_count(), adds + 1);
        assert_eq!(world.scene().attached_count(), 9);
    }

    #[test]
    fn corner_edit_remeshes_two_neighbours() {
        let mut world = world();
        world.generate_initial_chunks(1);
        let adds = world.scene().add_count();

        // Local (0, 0) of chunk (0, 0) borders chunks (-1, 0) and (0, -1).
        world.set_block(0, 25, 0, BlockType::Dirt);
        assert_eq!(world.scene().add_count(), adds + 3);
        assert_eq!(world.scene().attached_count(), 9);
        assert_eq!(world.scene().released_while_attached(), 0);
    }

    #[test]
    fn dispose_releases_every_mesh() {
        let mut world = world();
        world.generate_initial_chunks(1);
        world.dispose();

        assert_eq!(world.chunk_count(), 0);
        assert_eq!(world.scene().attached_count(), 0);
        assert_eq!(world.scene().release_count(), 9);
    }

    #[test]
    fn chunk_limit_evicts_least_recently_used() {
        let config = WorldConfig {
            initial_radius: 0,
            max_loaded_chunks: Some(2),
            ..WorldConfig::default()
        };
        let mut world = World::new(config, HeadlessScene::new());

        world.generate_chunk(0, 0);
        world.generate_chunk(1, 0);
        // Touch (0, 0) so (1, 0) becomes the oldest.
        world.generate_chunk(0, 0);
        world.generate_chunk(2, 0);

        assert_eq!(world.chunk_count(), 2);
        assert!(world.contains_chunk(ChunkPosition::new(0, 0)));
        assert!(!world.contains_chunk(ChunkPosition::new(1, 0)));
        assert!(world.contains_chunk(ChunkPosition::new(2, 0)));
        assert_eq!(world.scene().attached_count(), 2);
        assert_eq!(world.scene().release_count(), 1);
    }

    #[test]
    fn chunk_limit_is_raised_to_hold_the_initial_square() {
        let config = WorldConfig {
            initial_radius: 1,
            max_loaded_chunks: Some(4),
            ..WorldConfig::default()
        };
        let mut world = World::new(config, HeadlessScene::new());
        assert_eq!(world.chunk_limit(), Some(9));

        world.generate_initial_chunks(1);
        assert_eq!(world.chunk_count(), 9);
        assert_eq!(world.scene().release_count(), 0);
    }

    #[test]
    fn generate_around_never_evicts_its_own_square() {
        let config = WorldConfig {
            initial_radius: 0,
            max_loaded_chunks: Some(4),
            ..WorldConfig::default()
        };
        let mut world = World::new(config, HeadlessScene::new());

        assert_eq!(world.generate_around(ChunkPosition::new(0, 0), 1), 9);
        for dx in -1..=1 {
            for dz in -1..=1 {
                assert!(world.contains_chunk(ChunkPosition::new(dx, dz)), "({dx}, {dz})");
            }
        }

        assert_eq!(world.generate_around(ChunkPosition::new(0, 0), 1), 0);
        assert_eq!(world.scene().release_count(), 0);

        // Moving on evicts down to the limit, keeping the new square.
        assert_eq!(world.generate_around(ChunkPosition::new(10, 0), 0), 1);
        assert_eq!(world.chunk_count(), 4);
        assert!(world.contains_chunk(ChunkPosition::new(10, 0)));
        assert_eq!(world.scene().attached_count(), 4);
    }

    #[test]
    fn huge_chunk_coordinates_do_not_overflow() {
        let mut world = world();
        for (x, z) in [(i32::MAX / 16 + 1, 0), (i32::MAX, i32::MIN), (i32::MAX / 16, -3)] {
            let chunk = world.generate_chunk(x, z);
            assert!(chunk.get().mesh().is_some());
        }
        assert_eq!(world.chunk_count(), 3);
        assert_eq!(world.generate_around(ChunkPosition::new(i32::MAX, i32::MIN), 1), 8);
    }

    #[test]
    fn generator_uses_the_configured_parameters() {
        let terrain = TerrainParameters {
            cave_threshold: 1.1,
            max_terrain_height: 24,
            ..TerrainParameters::default()
        };
        let config = WorldConfig {
            seed: 7,
            terrain: terrain.clone(),
            ..WorldConfig::default()
        };
        let world = World::new(config, HeadlessScene::new());
        assert_eq!(world.generator().parameters(), &terrain);
        assert_eq!(world.config().seed, 7);
    }

    #[test]
    fn scene_mut_reaches_the_owned_scene() {
        use crate::engine_state::rendering::{MaterialSettings, MeshGeometry, Renderable};

        let mut world = world();
        world.generate_chunk(0, 0);
        let extra = Renderable::new(MeshGeometry::default(), MaterialSettings::TERRAIN);
        world.scene_mut().add(&extra);

        assert_eq!(world.scene().attached_count(), 2);
        assert!(world.scene().is_attached(extra.id()));
    }

    #[test]
    fn generate_around_counts_new_chunks() {
        let mut world = world();
        assert_eq!(world.generate_around(ChunkPosition::new(0, 0), 1), 9);
        assert_eq!(world.generate_around(ChunkPosition::new(1, 0), 1), 3);
        assert_eq!(world.chunk_count(), 12);
    }
}
