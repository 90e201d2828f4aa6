//! # Voxel Terrain Core
//!
//! This module contains the voxel data model and procedural terrain generation.
//!
//! ## Architecture
//!
//! * **Block**: block types, their registry properties and face directions
//! * **Chunk**: fixed-size 16x32x16 block columns, the unit of storage and meshing
//! * **Coords**: conversion between world block coordinates and chunk coordinates
//! * **Noise**: seeded simplex noise for the height map and caves
//! * **Generation**: fills chunks with layered terrain, ores and caves
//! * **World**: owns every chunk and provides global block access
//!
//! ## Data Flow
//!
//! 1. `World::generate_chunk` fills a new chunk from the terrain generator
//! 2. The chunk builds its mesh and attaches it to the world's scene
//! 3. `World::set_block` edits a block and remeshes the chunks the edit touches
//!
//! Everything here runs on one thread. Chunk handles are `Rc` based.

pub mod block;
pub mod chunk;
pub mod coords;
pub mod generation;
pub mod noise;
pub mod world;
