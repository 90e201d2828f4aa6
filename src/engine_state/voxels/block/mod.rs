//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, the static block
//! registry and the compact block storage type.

use phf::phf_map;

pub mod block_side;
pub mod block_type;

pub use block_side::BlockSide;
pub use block_type::BlockType;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Immutable display attributes of a block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockProperties {
    /// Human readable name
    pub name: &'static str,
    /// Base colour packed as `0xRRGGBB`
    pub color: u32,
    /// Relative effort needed to break the block
    pub hardness: u32,
}

impl BlockProperties {
    /// Unpacks the base colour into linear `[r, g, b]` components in `0.0..=1.0`.
    pub fn color_rgb(&self) -> [f32; 3] {
        [
            ((self.color >> 16) & 0xff) as f32 / 255.0,
            ((self.color >> 8) & 0xff) as f32 / 255.0,
            (self.color & 0xff) as f32 / 255.0,
        ]
    }
}

pub(crate) const AIR_PROPERTIES: BlockProperties = BlockProperties {
    name: "Air",
    color: 0x000000,
    hardness: 0,
};

/// Maps each stored block type byte to its display attributes.
///
/// Keyed by `BlockTypeSize` so the table can be built at compile time. Use
/// [`BlockType::properties`] rather than indexing this map directly.
pub static BLOCK_REGISTRY: phf::Map<u8, BlockProperties> = phf_map! {
    0u8 => BlockProperties { name: "Air", color: 0x000000, hardness: 0 },
    1u8 => BlockProperties { name: "Dirt", color: 0x8b5a2b, hardness: 1 },
    2u8 => BlockProperties { name: "Stone", color: 0x808080, hardness: 3 },
    3u8 => BlockProperties { name: "Deep Stone", color: 0x4a4a4f, hardness: 5 },
    4u8 => BlockProperties { name: "Copper Ore", color: 0xb87333, hardness: 4 },
    5u8 => BlockProperties { name: "Iron Ore", color: 0xa19d94, hardness: 5 },
};

/// Represents a single voxel cell as it is stored inside a chunk.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute and the `Pod` derive allow a chunk's block array
/// to be viewed as raw bytes, one byte per cell.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// An air cell.
    pub const AIR: Block = Block { block_type: 0 };

    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Decodes the stored byte.
    pub fn block_type(&self) -> BlockType {
        BlockType::from_int(self.block_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_block_type() {
        for block_type in BlockType::ALL {
            assert!(
                BLOCK_REGISTRY.contains_key(&(block_type as BlockTypeSize)),
                "{block_type:?} missing from registry"
            );
        }
        assert_eq!(BLOCK_REGISTRY.len(), BlockType::ALL.len());
    }

    #[test]
    fn air_has_no_hardness() {
        assert_eq!(BlockType::Air.properties().hardness, 0);
        assert_eq!(BlockType::Air.properties().name, "Air");
    }

    #[test]
    fn colors_unpack_to_unit_range() {
        let rgb = BlockType::Stone.properties().color_rgb();
        let expected = 128.0 / 255.0;
        for channel in rgb {
            assert!((channel - expected).abs() < 1e-6);
        }

        for block_type in BlockType::ALL {
            for channel in block_type.properties().color_rgb() {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn block_roundtrips_through_storage_byte() {
        let block = Block::new(BlockType::IronOre);
        assert_eq!(block.block_type, 5);
        assert_eq!(block.block_type(), BlockType::IronOre);
        assert_eq!(Block::AIR.block_type(), BlockType::Air);
    }
}
