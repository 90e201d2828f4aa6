//! # Chunk Iteration Module
//!
//! This module provides an iterator for traversing all non-air blocks in a
//! chunk in storage order (X fastest, then Z, then Y).

use cgmath::Point3;

use crate::engine_state::voxels::block::BlockType;

use super::{Chunk, CHUNK_SIZE};

/// An iterator over all non-air blocks in a chunk.
///
/// Yields the local position of each solid cell together with its type. Air
/// cells are skipped, so the mesher never looks at empty space.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next storage index to inspect
    index: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first cell.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            index: 0,
        }
    }
}

impl<'a> Iterator for ChunkBlockIterator<'a> {
    type Item = (Point3<i32>, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < CHUNK_SIZE {
            let index = self.index;
            self.index += 1;

            let block_type = self.chunk_ref.blocks[index].block_type();
            if block_type.is_air() {
                continue;
            }

            return Some((Chunk::local_position(index), block_type));
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(CHUNK_SIZE - self.index))
    }
}

#[cfg(test)]
mod tests {
    use crate::engine_state::voxels::coords::ChunkPosition;

    use super::*;

    #[test]
    fn empty_chunk_yields_nothing() {
        let chunk = Chunk::new(ChunkPosition::new(0, 0));
        assert_eq!(chunk.solid_blocks().count(), 0);
    }

    #[test]
    fn yields_solid_blocks_with_their_positions_in_storage_order() {
        let mut chunk = Chunk::new(ChunkPosition::new(0, 0));
        chunk.set_block(3, 7, 2, BlockType::Stone);
        chunk.set_block(0, 0, 0, BlockType::Dirt);
        chunk.set_block(15, 31, 15, BlockType::IronOre);

        let blocks: Vec<_> = chunk.solid_blocks().collect();
        assert_eq!(
            blocks,
            vec![
                (Point3::new(0, 0, 0), BlockType::Dirt),
                (Point3::new(3, 7, 2), BlockType::Stone),
                (Point3::new(15, 31, 15), BlockType::IronOre),
            ]
        );
    }
}
