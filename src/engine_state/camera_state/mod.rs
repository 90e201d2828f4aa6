//! # Camera State Management
//!
//! This module handles the camera the world is generated around:
//! - Camera position and orientation tracking
//! - Applying per-frame movement input
//! - Chunk-based position tracking for chunk generation
//!
//! ## Core Components
//! - `FlyCamera`: position and orientation in 3D space
//! - `CameraState`: owns the camera and reports chunk changes
//! - `CameraConfig`: start position, speed and sensitivity

use cgmath::{Deg, Point3};
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::application_state::input_state::MovementInput;

use super::voxels::coords::{world_point_to_chunk, ChunkPosition};

pub mod camera;

use camera::FlyCamera;

/// Initial camera settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space start position
    pub start_position: [f32; 3],
    /// Movement speed in blocks per second
    pub speed: f32,
    /// Look sensitivity
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            start_position: [8.0, 28.0, 8.0],
            speed: 12.0,
            sensitivity: 1.0,
        }
    }
}

/// Manages the camera and tracks which chunk it is in.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: FlyCamera,
}

impl CameraState {
    /// Creates a camera state from its configuration, looking along +X and
    /// slightly down.
    pub fn new(config: &CameraConfig) -> Self {
        let camera = FlyCamera::new(
            Point3::from(config.start_position),
            Deg(0.0),
            Deg(-20.0),
            config.speed,
            config.sensitivity,
        );
        CameraState { camera }
    }

    /// The chunk column the camera is currently in.
    pub fn chunk_position(&self) -> ChunkPosition {
        world_point_to_chunk(self.camera.position.x, self.camera.position.z)
    }

    /// Applies one frame of input to the camera.
    ///
    /// # Arguments
    /// * `dt` - Time elapsed since the last update
    /// * `input` - Movement for this frame
    ///
    /// # Returns
    /// - `Some(CameraUpdates)` if the input moved or turned the camera
    /// - `None` if no updates were needed
    pub fn update(&mut self, dt: Duration, input: &MovementInput) -> Option<CameraUpdates> {
        if !input.has_updates() {
            return None;
        }
        self.camera.update(dt, input);
        Some(CameraUpdates {
            new_chunk_position: self.chunk_position(),
        })
    }
}

/// Represents updates to the camera's state that affect the world.
///
/// This is returned by `CameraState::update()` when the camera moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraUpdates {
    /// The chunk column the camera is in after the update
    pub new_chunk_position: ChunkPosition,
}
