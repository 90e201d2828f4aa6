#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! A chunked voxel terrain generator and mesher.
//!
//! The world is split into 16x32x16 block chunks. Each chunk is filled from
//! seeded simplex noise (a height map, depth layers, ore veins and caves) and
//! turned into one vertex-coloured triangle mesh with per-face ambient
//! occlusion. Meshes are handed to a [`Scene`](engine_state::rendering::Scene),
//! the interface an external renderer implements.
//!
//! ## Key Modules
//!
//! * `application_state` - Configuration, input and the headless frame loop
//! * `core` - Shared resource handles
//! * `engine_state` - Camera, world, terrain generation and meshing
//!
//! ## Usage
//!
//! ```rust
//! use voxel_terrain::engine_state::rendering::HeadlessScene;
//! use voxel_terrain::engine_state::voxels::{block::BlockType, world::{World, WorldConfig}};
//!
//! let mut world = World::new(WorldConfig::default(), HeadlessScene::new());
//! world.generate_initial_chunks(1);
//! world.set_block(0, 31, 0, BlockType::Stone);
//! assert_eq!(world.get_block(0, 31, 0), BlockType::Stone);
//! ```

use std::path::PathBuf;

use log::{error, info};

pub mod application_state;
pub mod core;
pub mod engine_state;

use application_state::{
    config::{ConfigError, EngineConfig},
    ApplicationState, RunSummary,
};

/// Overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// JSON config file to load; defaults are used without one
    pub config: Option<PathBuf>,
    /// World seed
    pub seed: Option<u64>,
    /// Chunk generation radius
    pub radius: Option<i32>,
    /// Frames to simulate
    pub frames: Option<u32>,
}

impl RunOptions {
    /// Loads the config file, if any, and applies the overrides.
    pub fn resolve(&self) -> Result<EngineConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.world.seed = seed;
        }
        if let Some(radius) = self.radius {
            config.world.initial_radius = radius;
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        Ok(config)
    }
}

/// Initialises logging, builds the engine and runs the headless frame loop.
pub fn run(options: RunOptions) -> Result<RunSummary, ConfigError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = options.resolve().inspect_err(|e| error!("{e}"))?;
    info!(
        "Seed {}, radius {}, {} frames",
        config.world.seed, config.world.initial_radius, config.frames
    );

    let mut state = ApplicationState::new(config);
    let summary = state.run();
    info!(
        "Finished: {} chunks and {} triangles in the last frame",
        summary.last_frame.chunks, summary.last_frame.triangles
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let options = RunOptions {
            seed: Some(9),
            radius: Some(4),
            frames: Some(1),
            ..RunOptions::default()
        };
        let config = options.resolve().expect("defaults resolve");
        assert_eq!(config.world.seed, 9);
        assert_eq!(config.world.initial_radius, 4);
        assert_eq!(config.frames, 1);
    }

    #[test]
    fn missing_config_file_fails() {
        let options = RunOptions {
            config: Some(PathBuf::from("/nonexistent/config.json")),
            ..RunOptions::default()
        };
        assert!(matches!(options.resolve(), Err(ConfigError::Io { .. })));
    }
}
