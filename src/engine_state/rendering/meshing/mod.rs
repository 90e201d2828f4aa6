//! Mesh generation for voxel chunks.
//!
//! Converts a chunk's block data into a single [`MeshGeometry`] by emitting one
//! quad for every block face that touches air. Faces between two solid blocks
//! are culled. Every neighbour lookup goes through [`Chunk::get_block`], which
//! reads cells outside the chunk as air, so faces on the chunk's outer shell are
//! always emitted; the world remeshes neighbours after edits but never merges
//! visibility across chunks.
//!
//! # Performance Considerations
//! - Only solid cells are visited, via [`Chunk::solid_blocks`]
//! - Buffers are pre-sized from the solid cell count

use cgmath::Point3;
use log::debug;
use web_time::Instant;

use crate::engine_state::voxels::{block::BlockSide, chunk::Chunk};

use super::MeshGeometry;

mod face;
mod occlusion;

pub use face::Face;
pub use occlusion::{
    count_occluders, face_occlusion, occlusion_factor, MIN_OCCLUSION_FACTOR, OCCLUSION_STEP,
};

/// Builds the geometry for every visible face of `chunk`.
///
/// Positions are in world space: local coordinates offset by the chunk's
/// world origin on X and Z.
pub fn build_chunk_geometry(chunk: &Chunk) -> MeshGeometry {
    let start = Instant::now();
    let (offset_x, offset_z) = chunk.position.world_offset();

    let mut faces = Vec::new();
    for (position, block_type) in chunk.solid_blocks() {
        for side in BlockSide::all() {
            if is_face_visible(chunk, position, side) {
                faces.push(Face::new(
                    Point3::new(
                        position.x.wrapping_add(offset_x),
                        position.y,
                        position.z.wrapping_add(offset_z),
                    ),
                    block_type,
                    side,
                    face_occlusion(chunk, position, side),
                ));
            }
        }
    }

    let mut geometry = MeshGeometry {
        positions: Vec::with_capacity(faces.len() * 12),
        normals: Vec::with_capacity(faces.len() * 12),
        colors: Vec::with_capacity(faces.len() * 12),
        indices: Vec::with_capacity(faces.len() * 6),
    };
    for face in &faces {
        face.append_to(&mut geometry);
    }

    debug!(
        "Meshed chunk {:?}: {} faces in {:?}",
        chunk.position,
        faces.len(),
        start.elapsed()
    );

    geometry
}

/// A face is visible when the neighbouring cell on that side is air.
#[inline]
fn is_face_visible(chunk: &Chunk, position: Point3<i32>, side: BlockSide) -> bool {
    let neighbour = position + side.offset();
    chunk
        .get_block(neighbour.x, neighbour.y, neighbour.z)
        .is_air()
}
