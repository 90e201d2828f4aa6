use cgmath::Point3;

use crate::engine_state::{rendering::MeshGeometry, voxels::block::{BlockSide, BlockType}};

/// Triangle order inside a quad, relative to its first vertex.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Represents a single visible quad face of a voxel.
///
/// A face knows the world position of the block it belongs to, which side of
/// the block it covers, the block type that colours it and the ambient
/// occlusion factor that darkens it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// World-space position of the block's minimum corner
    pub origin: Point3<i32>,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
    /// The block type, used for the base colour
    pub block_type: BlockType,
    /// Ambient occlusion factor in `0.6..=1.0`
    pub ambient_occlusion: f32,
}

impl Face {
    /// Creates a new face for the block at `origin`.
    ///
    /// # Arguments
    /// * `origin` - World-space position of the block
    /// * `block_type` - The block type, used for the base colour
    /// * `block_side` - Which side of the block this face represents
    /// * `ambient_occlusion` - Darkening factor applied to the colour
    pub fn new(
        origin: Point3<i32>,
        block_type: BlockType,
        block_side: BlockSide,
        ambient_occlusion: f32,
    ) -> Self {
        Face {
            origin,
            block_side,
            block_type,
            ambient_occlusion,
        }
    }

    /// Colour of every corner of this face: the registry colour scaled by the
    /// occlusion factor.
    pub fn color(&self) -> [f32; 3] {
        self.block_type
            .properties()
            .color_rgb()
            .map(|channel| channel * self.ambient_occlusion)
    }

    /// Appends this face's four vertices and six indices to `geometry`.
    pub fn append_to(&self, geometry: &mut MeshGeometry) {
        let base = geometry.vertex_count() as u32;
        let normal = self.block_side.normal();
        let color = self.color();

        for corner in self.block_side.corners() {
            geometry.positions.extend_from_slice(&[
                self.origin.x.wrapping_add(corner[0]) as f32,
                self.origin.y.wrapping_add(corner[1]) as f32,
                self.origin.z.wrapping_add(corner[2]) as f32,
            ]);
            geometry
                .normals
                .extend_from_slice(&[normal.x, normal.y, normal.z]);
            geometry.colors.extend_from_slice(&color);
        }

        geometry
            .indices
            .extend(QUAD_INDICES.iter().map(|index| base + index));
    }
}
