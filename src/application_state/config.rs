//! # Configuration
//!
//! Engine settings loaded from JSON. Every field is optional in the file and
//! falls back to its default.
//!
//! ```json
//! {
//!     "world": { "seed": 42, "initial_radius": 3, "terrain": { "cave_threshold": 0.8 } },
//!     "camera": { "speed": 16.0 },
//!     "frames": 600
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::{camera_state::CameraConfig, voxels::world::WorldConfig};

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid JSON for an engine config
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World generation settings
    pub world: WorldConfig,
    /// Camera start settings
    pub camera: CameraConfig,
    /// Frames the headless run simulates
    pub frames: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            world: WorldConfig::default(),
            camera: CameraConfig::default(),
            frames: 300,
        }
    }
}

impl EngineConfig {
    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
