//! # Camera Implementation
//!
//! A first-person fly camera driven by [`MovementInput`].
//!
//! ## Conventions
//! - Yaw rotates around +Y. Yaw 0 looks along +X, positive yaw turns towards +Z
//! - Pitch rotates up and down and is clamped just inside ±90°
//! - Movement is relative to yaw only, so looking down does not slow travel

use cgmath::*;
use std::f32::consts::FRAC_PI_2;
use web_time::Duration;

use crate::application_state::input_state::MovementInput;

/// Safe limit for pitch to prevent gimbal lock
pub const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Represents a first-person camera in 3D space.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation in radians
    pub pitch: Rad<f32>,
    /// Movement speed in blocks per second
    pub speed: f32,
    /// Radians turned per unit of look delta per second
    pub sensitivity: f32,
}

impl FlyCamera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space
    /// * `yaw` - Initial yaw. Can be any type that converts to `Rad<f32>`
    /// * `pitch` - Initial pitch, clamped to the safe range
    /// * `speed` - Movement speed in blocks per second
    /// * `sensitivity` - Look sensitivity
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_terrain::engine_state::camera_state::camera::FlyCamera;
    ///
    /// let camera = FlyCamera::new(Point3::new(0.0, 24.0, 0.0), Deg(0.0), Deg(-20.0), 8.0, 1.0);
    /// assert!(camera.forward().x > 0.99);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
        speed: f32,
        sensitivity: f32,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
            speed,
            sensitivity,
        };
        camera.clamp_pitch();
        camera
    }

    /// Horizontal forward direction, ignoring pitch.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(yaw_cos, 0.0, yaw_sin)
    }

    /// Horizontal right direction.
    pub fn right(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(-yaw_sin, 0.0, yaw_cos)
    }

    /// The direction the camera is looking in, including pitch.
    pub fn view_direction(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Applies one frame of input.
    ///
    /// # Arguments
    /// * `dt` - Time elapsed since the last update
    /// * `input` - Movement axes and look delta for this frame
    pub fn update(&mut self, dt: Duration, input: &MovementInput) {
        let dt = dt.as_secs_f32();

        let velocity = self.forward() * input.direction.z
            + self.right() * input.direction.x
            + Vector3::unit_y() * input.direction.y;
        self.position += velocity * self.speed * dt;

        let (look_x, look_y) = input.look_delta;
        self.yaw += Rad(look_x) * self.sensitivity * dt;
        self.pitch += Rad(-look_y) * self.sensitivity * dt;
        self.clamp_pitch();
    }

    fn clamp_pitch(&mut self) {
        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }
}
