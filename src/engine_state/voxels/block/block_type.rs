//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification and conversion from
//! the compact one-byte storage format.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::{BlockProperties, BlockTypeSize, AIR_PROPERTIES, BLOCK_REGISTRY};

/// Enumerates all possible block types in the voxel world.
///
/// The discriminants are the stored byte values. The `FromPrimitive` derive
/// allows conversion back from that byte.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space. Never rendered.
    #[default]
    Air = 0,

    /// Topsoil, placed on the surface layer of every column.
    Dirt = 1,

    /// Common rock between the surface and the deep layer.
    Stone = 2,

    /// Rock more than ten blocks below the surface.
    DeepStone = 3,

    /// Ore found in the stone band five to ten blocks below the surface.
    CopperOre = 4,

    /// Rarer ore sharing the copper band.
    IronOre = 5,
}

impl BlockType {
    /// Every block type, in discriminant order.
    pub const ALL: [BlockType; 6] = [
        BlockType::Air,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::DeepStone,
        BlockType::CopperOre,
        BlockType::IronOre,
    ];

    /// Converts a stored byte back into a `BlockType`.
    ///
    /// Bytes that do not name a block type decode as `Air`, the same value an
    /// out-of-range lookup produces.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    pub fn from_int(btype: BlockTypeSize) -> Self {
        BlockType::from_u8(btype).unwrap_or(BlockType::Air)
    }

    /// Looks up the display attributes of this block type in the registry.
    pub fn properties(self) -> &'static BlockProperties {
        BLOCK_REGISTRY
            .get(&(self as BlockTypeSize))
            .unwrap_or(&AIR_PROPERTIES)
    }

    /// `true` for `Air`.
    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockType::Air
    }

    /// `true` for every type that produces geometry.
    #[inline]
    pub fn is_solid(self) -> bool {
        !self.is_air()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_bytes_decode_to_the_same_type() {
        for block_type in BlockType::ALL {
            assert_eq!(BlockType::from_int(block_type as BlockTypeSize), block_type);
        }
    }

    #[test]
    fn unknown_bytes_decode_as_air() {
        assert_eq!(BlockType::from_int(6), BlockType::Air);
        assert_eq!(BlockType::from_int(255), BlockType::Air);
    }

    #[test]
    fn only_air_is_not_solid() {
        assert!(BlockType::Air.is_air());
        assert!(!BlockType::Air.is_solid());
        for block_type in &BlockType::ALL[1..] {
            assert!(block_type.is_solid(), "{block_type:?} should be solid");
        }
    }
}
