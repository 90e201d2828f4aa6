//! # Input State
//!
//! This module defines the per-frame input the camera consumes, and a scripted
//! input source that stands in for a keyboard and mouse in headless runs.

use cgmath::{Vector3, Zero};

/// Movement and look input for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementInput {
    /// Movement axes: X strafes right, Y climbs, Z moves forward. Each in `[-1, 1]`
    pub direction: Vector3<f32>,
    /// Look delta (horizontal, vertical) since the last frame
    pub look_delta: (f32, f32),
}

impl Default for MovementInput {
    fn default() -> Self {
        Self {
            direction: Vector3::zero(),
            look_delta: (0.0, 0.0),
        }
    }
}

impl MovementInput {
    /// Creates input from movement axes and a look delta.
    pub fn new(direction: Vector3<f32>, look_delta: (f32, f32)) -> Self {
        Self {
            direction,
            look_delta,
        }
    }

    /// Whether this input moves or turns the camera at all.
    pub fn has_updates(&self) -> bool {
        !self.direction.is_zero() || self.look_delta != (0.0, 0.0)
    }
}

/// One leg of a scripted flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSegment {
    /// Number of frames this segment lasts
    pub frames: u32,
    /// Input applied on each of those frames
    pub input: MovementInput,
}

/// A looping sequence of flight segments.
#[derive(Debug, Clone)]
pub struct FlightScript {
    segments: Vec<FlightSegment>,
    period: u32,
}

impl FlightScript {
    /// Creates a script from its segments. Segments with zero frames are dropped.
    pub fn new(segments: Vec<FlightSegment>) -> Self {
        let segments: Vec<FlightSegment> = segments.into_iter().filter(|s| s.frames > 0).collect();
        let period = segments.iter().map(|s| s.frames).sum();
        Self { segments, period }
    }

    /// A flight that cruises forward, banks right, then cruises again, so the
    /// camera crosses several chunk borders.
    pub fn survey() -> Self {
        let forward = Vector3::new(0.0, 0.0, 1.0);
        Self::new(vec![
            FlightSegment {
                frames: 120,
                input: MovementInput::new(forward, (0.0, 0.0)),
            },
            FlightSegment {
                frames: 30,
                input: MovementInput::new(forward, (0.5, 0.0)),
            },
            FlightSegment {
                frames: 120,
                input: MovementInput::new(forward, (0.0, 0.0)),
            },
            FlightSegment {
                frames: 20,
                input: MovementInput::default(),
            },
        ])
    }

    /// The input for frame number `frame`, looping over the script.
    pub fn input_at(&self, frame: u32) -> MovementInput {
        if self.period == 0 {
            return MovementInput::default();
        }
        let mut remaining = frame % self.period;
        for segment in &self.segments {
            if remaining < segment.frames {
                return segment.input;
            }
            remaining -= segment.frames;
        }
        MovementInput::default()
    }
}
