//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a 16x32x16 column of blocks that is
//! the unit of storage and of mesh generation.
//!
//! ## Storage
//!
//! Blocks are kept in one flat array of one-byte cells, X fastest, then Z, then Y:
//! `index = y * CHUNK_WIDTH * CHUNK_DEPTH + z * CHUNK_WIDTH + x`.
//!
//! ## Mesh Ownership
//!
//! A chunk owns at most one renderable. Regenerating the mesh detaches and
//! releases the old renderable before the new one is attached, so the scene
//! never holds a stale and a fresh mesh for the same chunk.

use cgmath::Point3;
use chunk_iteration::ChunkBlockIterator;
use log::debug;

use super::block::{Block, BlockType};
use super::coords::ChunkPosition;
use crate::engine_state::rendering::{
    meshing::build_chunk_geometry, MaterialSettings, Renderable, Scene,
};

pub mod chunk_iteration;

/// Width of a chunk in blocks (X).
pub const CHUNK_WIDTH: i32 = 16;
/// Height of a chunk in blocks (Y). Chunks span the full world height.
pub const CHUNK_HEIGHT: i32 = 32;
/// Depth of a chunk in blocks (Z).
pub const CHUNK_DEPTH: i32 = 16;
/// The number of blocks in one horizontal layer of a chunk.
pub const CHUNK_PLANE_SIZE: usize = (CHUNK_WIDTH * CHUNK_DEPTH) as usize;
/// The total number of blocks in a chunk.
pub const CHUNK_SIZE: usize = CHUNK_PLANE_SIZE * CHUNK_HEIGHT as usize;

/// Represents a 16x32x16 column of voxel blocks in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkPosition,

    /// One cell per block in storage order. Always `CHUNK_SIZE` long.
    blocks: Box<[Block]>,

    /// The renderable currently attached to the scene for this chunk, if any.
    mesh: Option<Renderable>,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air) without a mesh.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    pub fn new(position: ChunkPosition) -> Self {
        Chunk {
            position,
            blocks: vec![Block::AIR; CHUNK_SIZE].into_boxed_slice(),
            mesh: None,
        }
    }

    /// Returns `true` when the local coordinates fall inside the chunk.
    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_WIDTH).contains(&x) && (0..CHUNK_HEIGHT).contains(&y) && (0..CHUNK_DEPTH).contains(&z)
    }

    #[inline]
    fn index(x: i32, y: i32, z: i32) -> usize {
        (y * CHUNK_WIDTH * CHUNK_DEPTH + z * CHUNK_WIDTH + x) as usize
    }

    /// Gets the block type at the specified chunk-relative coordinates.
    ///
    /// Coordinates outside the chunk read as `Air`.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if !Self::in_bounds(x, y, z) {
            return BlockType::Air;
        }
        self.blocks[Self::index(x, y, z)].block_type()
    }

    /// Sets the block type at the specified chunk-relative coordinates.
    ///
    /// Writes outside the chunk are ignored. The mesh is not rebuilt; call
    /// [`Chunk::generate_mesh`] afterwards.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) {
        if !Self::in_bounds(x, y, z) {
            return;
        }
        self.blocks[Self::index(x, y, z)] = Block::new(block_type);
    }

    /// The block array as raw bytes, one byte per cell in storage order.
    pub fn raw_blocks(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blocks)
    }

    /// Iterates over every non-air block with its local position.
    pub fn solid_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// Local position of the block at storage `index`.
    pub fn local_position(index: usize) -> Point3<i32> {
        let index = index as i32;
        let plane = CHUNK_WIDTH * CHUNK_DEPTH;
        Point3::new(index % CHUNK_WIDTH, index / plane, (index % plane) / CHUNK_WIDTH)
    }

    /// The renderable currently attached for this chunk.
    pub fn mesh(&self) -> Option<&Renderable> {
        self.mesh.as_ref()
    }

    /// Rebuilds this chunk's mesh and attaches it to `scene`.
    ///
    /// Any existing mesh is detached and released first.
    pub fn generate_mesh<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        self.release_mesh(scene);

        let renderable = Renderable::new(build_chunk_geometry(self), MaterialSettings::TERRAIN);
        scene.add(&renderable);
        debug!(
            "Chunk {:?} attached mesh {:?}",
            self.position,
            renderable.id()
        );
        self.mesh = Some(renderable);
    }

    /// Detaches and releases this chunk's mesh. Does nothing without a mesh.
    pub fn dispose<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        self.release_mesh(scene);
    }

    fn release_mesh<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if let Some(old) = self.mesh.take() {
            scene.remove(&old);
            scene.release(old);
        }
    }
}
