//! # Coordinate Module
//!
//! Conversions between the three coordinate spaces of the voxel world:
//!
//! * **world**: absolute block position, any `i32`
//! * **chunk**: which chunk column a world position falls in
//! * **local**: position inside that chunk, `0..CHUNK_WIDTH` / `0..CHUNK_DEPTH`
//!
//! Chunks are full-height columns, so only X and Z are split; Y is the same in
//! world and local space.

use serde::{Deserialize, Serialize};

use super::chunk::{CHUNK_DEPTH, CHUNK_WIDTH};

/// Position of a chunk column in chunk coordinates (not block coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkPosition {
    /// Chunk index along X
    pub x: i32,
    /// Chunk index along Z
    pub z: i32,
}

impl ChunkPosition {
    /// Creates a chunk position from its two components.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkPosition { x, z }
    }

    /// World-space block coordinates of this chunk's local origin.
    ///
    /// Wraps for chunk coordinates beyond `±i32::MAX / 16`.
    pub const fn world_offset(&self) -> (i32, i32) {
        (
            self.x.wrapping_mul(CHUNK_WIDTH),
            self.z.wrapping_mul(CHUNK_DEPTH),
        )
    }

    /// The chunk position `dx`, `dz` chunks away from this one, wrapping at
    /// the ends of the `i32` range.
    pub const fn offset(&self, dx: i32, dz: i32) -> Self {
        ChunkPosition::new(self.x.wrapping_add(dx), self.z.wrapping_add(dz))
    }
}

/// Splits a world coordinate along one axis into `(chunk, local)`.
///
/// Uses Euclidean division so negative positions land in the chunk below:
/// `-1` with a size of 16 is chunk `-1`, local `15`.
#[inline]
pub fn split_axis(world: i32, size: i32) -> (i32, i32) {
    (world.div_euclid(size), world.rem_euclid(size))
}

/// Splits a world X/Z pair into the owning chunk and the local X/Z inside it.
#[inline]
pub fn world_to_chunk_local(world_x: i32, world_z: i32) -> (ChunkPosition, i32, i32) {
    let (chunk_x, local_x) = split_axis(world_x, CHUNK_WIDTH);
    let (chunk_z, local_z) = split_axis(world_z, CHUNK_DEPTH);
    (ChunkPosition::new(chunk_x, chunk_z), local_x, local_z)
}

/// Chunk column containing a floating point world position.
#[inline]
pub fn world_point_to_chunk(x: f32, z: f32) -> ChunkPosition {
    ChunkPosition::new(
        (x / CHUNK_WIDTH as f32).floor() as i32,
        (z / CHUNK_DEPTH as f32).floor() as i32,
    )
}
