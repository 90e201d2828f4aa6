//! # Engine State Module
//!
//! The core engine module that ties the voxel world to a camera and a scene.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Handles camera positioning and movement
//! * `rendering` - The scene interface, mesh data and the chunk mesher
//! * `voxels` - Handles voxel data, chunks, and world generation
//!
//! ## Frame Loop
//!
//! Each frame calls [`EngineState::update`] with the elapsed time and the
//! frame's input, then [`EngineState::render`]. When the camera enters a new
//! chunk, every chunk within the configured radius of it is generated.

use log::{debug, info};
use web_time::{Duration, Instant};

use camera_state::{CameraConfig, CameraState, CameraUpdates};
use rendering::Scene;
use voxels::{
    coords::ChunkPosition,
    world::{World, WorldConfig},
};

use crate::application_state::input_state::MovementInput;

pub mod camera_state;
pub mod rendering;
pub mod voxels;

/// Per-frame summary of what the scene holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Number of loaded chunks
    pub chunks: usize,
    /// Triangles across every chunk mesh
    pub triangles: usize,
    /// Chunks that currently have a mesh attached
    pub attached_meshes: usize,
}

/// The main state container for the voxel engine
///
/// # Examples
///
/// ```
/// use voxel_terrain::engine_state::{camera_state::CameraConfig, voxels::world::WorldConfig, EngineState};
/// use voxel_terrain::engine_state::rendering::HeadlessScene;
/// use voxel_terrain::application_state::input_state::MovementInput;
/// use web_time::Duration;
///
/// let world = WorldConfig { initial_radius: 1, ..WorldConfig::default() };
/// let mut engine = EngineState::new(world, &CameraConfig::default(), HeadlessScene::new());
/// engine.update(Duration::from_millis(16), &MovementInput::default());
/// assert_eq!(engine.render().chunks, 9);
/// ```
pub struct EngineState<S: Scene> {
    /// Camera state managing position, orientation and movement
    pub camera_state: CameraState,
    /// The voxel world containing all chunk data
    world: World<S>,
    /// Current chunk position of the player
    current_player_chunk_position: ChunkPosition,
    /// Frames rendered so far
    frame: u64,
}

impl<S: Scene> EngineState<S> {
    /// Creates a new engine state and generates the starting chunks.
    ///
    /// # Arguments
    ///
    /// * `world_config` - Seed, radius and terrain parameters
    /// * `camera_config` - Camera start position and speeds
    /// * `scene` - The scene chunk meshes are attached to
    pub fn new(world_config: WorldConfig, camera_config: &CameraConfig, scene: S) -> Self {
        let start = Instant::now();
        let radius = world_config.initial_radius;
        let camera_state = CameraState::new(camera_config);
        let current_player_chunk_position = camera_state.chunk_position();

        let mut world = World::new(world_config, scene);
        world.generate_initial_chunks(radius);
        world.generate_around(current_player_chunk_position, radius);

        info!(
            "Engine ready with {} chunks in {:?}",
            world.chunk_count(),
            start.elapsed()
        );

        Self {
            camera_state,
            world,
            current_player_chunk_position,
            frame: 0,
        }
    }

    /// Moves the camera and loads chunks around it.
    ///
    /// # Arguments
    ///
    /// * `dt` - The time elapsed since the last frame
    /// * `input` - This frame's movement input
    pub fn update(&mut self, dt: Duration, input: &MovementInput) {
        if let Some(CameraUpdates { new_chunk_position }) = self.camera_state.update(dt, input) {
            if self.current_player_chunk_position != new_chunk_position {
                let radius = self.world.config().initial_radius;
                let generated = self.world.generate_around(new_chunk_position, radius);
                debug!(
                    "Camera entered chunk {new_chunk_position:?}, generated {generated} chunks"
                );
                self.current_player_chunk_position = new_chunk_position;
            }
        }
    }

    /// Summarises the current frame.
    pub fn render(&mut self) -> FrameStats {
        self.frame += 1;
        let mut stats = FrameStats {
            chunks: self.world.chunk_count(),
            ..FrameStats::default()
        };
        for position in self.world.chunk_positions() {
            if let Some(chunk) = self.world.get_chunk(position.x, position.z) {
                if let Some(mesh) = chunk.get().mesh() {
                    stats.attached_meshes += 1;
                    stats.triangles += mesh.geometry.triangle_count();
                }
            }
        }
        stats
    }

    /// The chunk the camera was last seen in.
    pub fn player_chunk_position(&self) -> ChunkPosition {
        self.current_player_chunk_position
    }

    /// Frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The voxel world.
    pub fn world(&self) -> &World<S> {
        &self.world
    }

    /// Mutable access to the voxel world, for block edits.
    pub fn world_mut(&mut self) -> &mut World<S> {
        &mut self.world
    }

    /// Releases every chunk mesh.
    pub fn dispose(&mut self) {
        self.world.dispose();
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::{rendering::HeadlessScene, voxels::block::BlockType, *};

    fn engine(radius: i32) -> EngineState<HeadlessScene> {
        let world = WorldConfig {
            initial_radius: radius,
            ..WorldConfig::default()
        };
        EngineState::new(world, &CameraConfig::default(), HeadlessScene::new())
    }

    #[test]
    fn starts_with_the_initial_square() {
        let mut engine = engine(1);
        let stats = engine.render();
        assert_eq!(stats.chunks, 9);
        assert_eq!(stats.attached_meshes, 9);
        assert_eq!(stats.triangles, engine.world().scene().attached_triangles());
        assert_eq!(engine.frame(), 1);
    }

    #[test]
    fn crossing_a_chunk_border_generates_new_chunks() {
        let mut engine = engine(1);
        let forward = MovementInput::new(Vector3::new(0.0, 0.0, 1.0), (0.0, 0.0));

        // Default camera looks along +X at 12 blocks per second from x = 8.
        engine.update(Duration::from_secs(1), &forward);
        assert_eq!(engine.player_chunk_position(), ChunkPosition::new(1, 0));
        assert_eq!(engine.world().chunk_count(), 12);
        assert!(engine.world().contains_chunk(ChunkPosition::new(2, 1)));
    }

    #[test]
    fn chunk_limit_keeps_the_square_around_the_camera() {
        let world = WorldConfig {
            initial_radius: 1,
            max_loaded_chunks: Some(9),
            ..WorldConfig::default()
        };
        let mut engine = EngineState::new(world, &CameraConfig::default(), HeadlessScene::new());
        let forward = MovementInput::new(Vector3::new(0.0, 0.0, 1.0), (0.0, 0.0));

        engine.update(Duration::from_secs(1), &forward);
        assert_eq!(engine.player_chunk_position(), ChunkPosition::new(1, 0));
        assert_eq!(engine.world().chunk_count(), 9);
        for dx in 0..=2 {
            for dz in -1..=1 {
                assert!(engine.world().contains_chunk(ChunkPosition::new(dx, dz)));
            }
        }
        assert_eq!(engine.world().scene().release_count(), 3);
    }

    #[test]
    fn edits_through_world_mut_remesh_the_chunk() {
        let mut engine = engine(1);
        let mesh_id = |engine: &EngineState<HeadlessScene>| {
            engine
                .world()
                .get_chunk(0, 0)
                .and_then(|chunk| chunk.get().mesh().map(|mesh| mesh.id()))
        };
        let before = mesh_id(&engine);

        engine.world_mut().set_block(8, 31, 8, BlockType::Stone);
        assert_eq!(engine.world().get_block(8, 31, 8), BlockType::Stone);
        assert_ne!(mesh_id(&engine), before);
        assert_eq!(engine.world().chunk_count(), 9);
    }

    #[test]
    fn dispose_detaches_everything() {
        let mut engine = engine(1);
        engine.dispose();
        let stats = engine.render();
        assert_eq!(stats, FrameStats { chunks: 0, triangles: 0, attached_meshes: 0 });
        assert_eq!(engine.world().scene().attached_count(), 0);
    }
}
