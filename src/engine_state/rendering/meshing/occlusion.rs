//! Flat per-face ambient occlusion.
//!
//! One factor is computed per face and applied to all four corners. The
//! occluders are the cells directly in front of the face, shifted by one along
//! either axis of the face plane: up to four cells in a plus shape around the
//! cell the face looks into.

use cgmath::Point3;

use crate::engine_state::voxels::{block::BlockSide, chunk::Chunk};

/// Darkening contributed by each solid occluder.
pub const OCCLUSION_STEP: f32 = 0.1;
/// Lowest factor a face can receive.
pub const MIN_OCCLUSION_FACTOR: f32 = 0.6;

/// Converts an occluder count into a brightness factor.
///
/// `max(0.6, 1 - count * 0.1)`: never increases with more occluders and never
/// drops below `MIN_OCCLUSION_FACTOR`.
#[inline]
pub fn occlusion_factor(occluders: usize) -> f32 {
    (1.0 - occluders as f32 * OCCLUSION_STEP).max(MIN_OCCLUSION_FACTOR)
}

/// Counts solid occluders around the face `side` of the block at local `position`.
///
/// Cells outside the chunk read as air, like every other neighbour lookup
/// during meshing.
pub fn count_occluders(chunk: &Chunk, position: Point3<i32>, side: BlockSide) -> usize {
    let front = position + side.offset();
    side.tangents()
        .into_iter()
        .flat_map(|tangent| [front + tangent, front - tangent])
        .filter(|cell| chunk.get_block(cell.x, cell.y, cell.z).is_solid())
        .count()
}

/// Ambient occlusion factor for one face.
pub fn face_occlusion(chunk: &Chunk, position: Point3<i32>, side: BlockSide) -> f32 {
    occlusion_factor(count_occluders(chunk, position, side))
}
