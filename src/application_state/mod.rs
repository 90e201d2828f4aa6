//! # Application State Management
//!
//! This module handles the application's lifecycle around the engine:
//! - Configuration loading
//! - Input for each frame
//! - Driving the frame loop for a fixed number of frames

pub mod config;
pub mod input_state;

use log::info;
use web_time::{Duration, Instant};

use config::EngineConfig;
use input_state::FlightScript;

use crate::engine_state::{rendering::HeadlessScene, EngineState, FrameStats};

/// Simulated time between two frames
pub const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Frames between two progress log lines
const LOG_INTERVAL: u32 = 60;

/// The application state: an engine rendering into a headless scene, fed by a
/// scripted flight.
pub struct ApplicationState {
    /// The core engine state
    pub engine_state: EngineState<HeadlessScene>,

    /// Input source for each frame
    pub script: FlightScript,

    /// Number of frames `run` simulates
    pub frames: u32,
}

/// What a finished run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames simulated
    pub frames: u32,
    /// Stats of the last frame
    pub last_frame: FrameStats,
    /// Most chunks loaded at once
    pub peak_chunks: usize,
}

impl ApplicationState {
    /// Builds the engine from `config` and generates the starting chunks.
    pub fn new(config: EngineConfig) -> Self {
        let engine_state = EngineState::new(config.world, &config.camera, HeadlessScene::new());
        ApplicationState {
            engine_state,
            script: FlightScript::survey(),
            frames: config.frames,
        }
    }

    /// Runs the frame loop: update with the scripted input, then render.
    ///
    /// Every chunk mesh is released once the last frame is done.
    pub fn run(&mut self) -> RunSummary {
        let start = Instant::now();
        let mut last_frame = self.engine_state.render();
        let mut peak_chunks = last_frame.chunks;

        for frame in 0..self.frames {
            let input = self.script.input_at(frame);
            self.engine_state.update(FRAME_TIME, &input);
            last_frame = self.engine_state.render();
            peak_chunks = peak_chunks.max(last_frame.chunks);

            if (frame + 1) % LOG_INTERVAL == 0 {
                info!(
                    "Frame {}: {} chunks, {} triangles, camera in chunk {:?}",
                    frame + 1,
                    last_frame.chunks,
                    last_frame.triangles,
                    self.engine_state.player_chunk_position()
                );
            }
        }

        info!(
            "Simulated {} frames in {:?} (peak {} chunks)",
            self.frames,
            start.elapsed(),
            peak_chunks
        );

        self.engine_state.dispose();
        RunSummary {
            frames: self.frames,
            last_frame,
            peak_chunks,
        }
    }
}
