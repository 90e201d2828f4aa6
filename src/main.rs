//! # Voxel Terrain Entry Point
//!
//! Runs a headless flight over generated terrain and logs what was built.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- --seed 42 --radius 3 --frames 600
//! ```

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use voxel_terrain::RunOptions;

/// Generate and mesh voxel terrain around a scripted camera flight.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// World seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Chunk generation radius around the camera
    #[arg(short, long)]
    radius: Option<i32>,

    /// Number of frames to simulate
    #[arg(short, long)]
    frames: Option<u32>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = RunOptions {
        config: cli.config,
        seed: cli.seed,
        radius: cli.radius,
        frames: cli.frames,
    };

    match voxel_terrain::run(options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
