//! # Terrain Generation
//!
//! Fills chunks with procedural terrain:
//!
//! 1. A 2D noise height map picks the surface height of every column.
//! 2. Each cell is layered by its depth below the surface: dirt on top, stone,
//!    an ore band, then deep stone.
//! 3. 3D noise carves caves below the surface, never through the bottom layer.
//!
//! Ore placement uses a fixed spatial hash rather than the seeded noise, so
//! the ore pattern for a given world position does not depend on the seed.

use noise::NoiseFn;
use serde::{Deserialize, Serialize};

use super::{
    block::BlockType,
    chunk::{Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH},
    noise::SimplexNoise,
};

/// Cells more than this far below the surface are deep stone.
pub const DEEP_STONE_DEPTH: i32 = 10;
/// Cells more than this far below the surface (and not deep stone) may hold ore.
pub const ORE_BAND_DEPTH: i32 = 5;
/// Ore hash values below this become copper ore.
pub const COPPER_ORE_THRESHOLD: f64 = 0.02;
/// Ore hash values below this (and not copper) become iron ore.
pub const IRON_ORE_THRESHOLD: f64 = 0.035;

/// Tunable terrain generation parameters.
///
/// The defaults are the values the world is normally generated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParameters {
    /// Scale applied to world X/Z before sampling the height map
    pub height_noise_scale: f64,
    /// Scale applied to world X/Y/Z before sampling cave noise
    pub cave_noise_scale: f64,
    /// Cave noise above this value carves air
    pub cave_threshold: f64,
    /// Surface height where the height map is at its minimum
    pub min_terrain_height: i32,
    /// Surface height where the height map is at its maximum
    pub max_terrain_height: i32,
}

impl Default for TerrainParameters {
    fn default() -> Self {
        TerrainParameters {
            height_noise_scale: 0.05,
            cave_noise_scale: 0.1,
            cave_threshold: 0.7,
            min_terrain_height: 10,
            max_terrain_height: 20,
        }
    }
}

/// Generates terrain from a seed and a set of [`TerrainParameters`].
pub struct TerrainGenerator {
    height_noise: SimplexNoise,
    cave_noise: SimplexNoise,
    parameters: TerrainParameters,
}

impl TerrainGenerator {
    /// Creates a generator whose two noise sources are shuffled from one RNG
    /// seeded with `seed`, the height map first.
    pub fn new(seed: u64, parameters: TerrainParameters) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let height_noise = SimplexNoise::new(&mut rng);
        let cave_noise = SimplexNoise::new(&mut rng);
        TerrainGenerator {
            height_noise,
            cave_noise,
            parameters,
        }
    }

    /// The parameters this generator was built with.
    pub fn parameters(&self) -> &TerrainParameters {
        &self.parameters
    }

    /// Surface height of the column at world `(world_x, world_z)`.
    ///
    /// Maps height noise from `[-1, 1]` onto
    /// `min_terrain_height..=max_terrain_height` and floors the result.
    pub fn surface_height(&self, world_x: i32, world_z: i32) -> i32 {
        let scale = self.parameters.height_noise_scale;
        let sample = self
            .height_noise
            .get([world_x as f64 * scale, world_z as f64 * scale]);
        let normalized = (sample + 1.0) / 2.0;
        let min = self.parameters.min_terrain_height as f64;
        let max = self.parameters.max_terrain_height as f64;
        (min + (max - min) * normalized).floor() as i32
    }

    /// Whether the cell at world `(world_x, y, world_z)` is carved out by a cave.
    ///
    /// Caves only exist strictly between the bottom layer and the surface.
    pub fn is_cave(&self, world_x: i32, y: i32, world_z: i32, surface_height: i32) -> bool {
        if y <= 0 || y >= surface_height {
            return false;
        }
        let scale = self.parameters.cave_noise_scale;
        let sample = self.cave_noise.get([
            world_x as f64 * scale,
            y as f64 * scale,
            world_z as f64 * scale,
        ]);
        sample > self.parameters.cave_threshold
    }

    /// The generated block at a world position.
    pub fn block_at(&self, world_x: i32, y: i32, world_z: i32) -> BlockType {
        let surface_height = self.surface_height(world_x, world_z);
        self.column_block(world_x, y, world_z, surface_height)
    }

    fn column_block(&self, world_x: i32, y: i32, world_z: i32, surface_height: i32) -> BlockType {
        if self.is_cave(world_x, y, world_z, surface_height) {
            return BlockType::Air;
        }
        layer_block(world_x, y, world_z, surface_height)
    }

    /// Fills every cell of `chunk` with generated terrain.
    pub fn fill_chunk(&self, chunk: &mut Chunk) {
        let (offset_x, offset_z) = chunk.position.world_offset();
        for z in 0..CHUNK_DEPTH {
            for x in 0..CHUNK_WIDTH {
                let world_x = offset_x.wrapping_add(x);
                let world_z = offset_z.wrapping_add(z);
                let surface_height = self.surface_height(world_x, world_z);
                for y in 0..CHUNK_HEIGHT {
                    let block_type = self.column_block(world_x, y, world_z, surface_height);
                    chunk.set_block(x, y, z, block_type);
                }
            }
        }
    }
}

/// Block type of a cell from its depth below the surface, before caves.
pub fn layer_block(world_x: i32, y: i32, world_z: i32, surface_height: i32) -> BlockType {
    let depth = surface_height - y;
    if depth < 0 {
        BlockType::Air
    } else if depth == 0 {
        BlockType::Dirt
    } else if depth > DEEP_STONE_DEPTH {
        BlockType::DeepStone
    } else if depth > ORE_BAND_DEPTH {
        ore_at(world_x, y, world_z)
    } else {
        BlockType::Stone
    }
}

/// Deterministic value in `[0, 1)` for a world position.
pub fn ore_hash(world_x: i32, y: i32, world_z: i32) -> f64 {
    let hash = (world_x as i64)
        .wrapping_mul(73_856_093)
        .wrapping_add((y as i64).wrapping_mul(19_349_663))
        .wrapping_add((world_z as i64).wrapping_mul(83_492_791));
    let scaled = (hash as f64).sin() * 10_000.0;
    scaled - scaled.floor()
}

/// Ore or plain stone for a cell in the ore band.
pub fn ore_at(world_x: i32, y: i32, world_z: i32) -> BlockType {
    let value = ore_hash(world_x, y, world_z);
    if value < COPPER_ORE_THRESHOLD {
        BlockType::CopperOre
    } else if value < IRON_ORE_THRESHOLD {
        BlockType::IronOre
    } else {
        BlockType::Stone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::coords::ChunkPosition;

    fn no_caves() -> TerrainParameters {
        TerrainParameters {
            cave_threshold: 1.1,
            ..TerrainParameters::default()
        }
    }

    #[test]
    fn defaults_match_documented_constants() {
        let parameters = TerrainParameters::default();
        assert_eq!(parameters.height_noise_scale, 0.05);
        assert_eq!(parameters.cave_noise_scale, 0.1);
        assert_eq!(parameters.cave_threshold, 0.7);
        assert_eq!(parameters.min_terrain_height, 10);
        assert_eq!(parameters.max_terrain_height, 20);
    }

    #[test]
    fn surface_heights_stay_in_range() {
        let generator = TerrainGenerator::new(1234, TerrainParameters::default());
        for x in -64..64 {
            for z in (-64..64).step_by(7) {
                let height = generator.surface_height(x, z);
                assert!((10..=20).contains(&height), "height {height} at ({x}, {z})");
            }
        }
    }

    #[test]
    fn layers_follow_depth() {
        assert_eq!(layer_block(0, 16, 0, 15), BlockType::Air);
        assert_eq!(layer_block(0, 15, 0, 15), BlockType::Dirt);
        assert_eq!(layer_block(0, 14, 0, 15), BlockType::Stone);
        assert_eq!(layer_block(0, 10, 0, 15), BlockType::Stone);
        assert_eq!(layer_block(0, 4, 0, 15), BlockType::DeepStone);
        assert_eq!(layer_block(0, 0, 0, 15), BlockType::DeepStone);
        for y in 5..=9 {
            assert!(matches!(
                layer_block(3, y, 7, 15),
                BlockType::Stone | BlockType::CopperOre | BlockType::IronOre
            ));
        }
    }

    #[test]
    fn ore_is_deterministic_and_in_range() {
        for x in -20..20 {
            for y in 0..32 {
                let first = ore_at(x, y, x * 3 - y);
                assert_eq!(first, ore_at(x, y, x * 3 - y));
                let value = ore_hash(x, y, x * 3 - y);
                assert!((0.0..1.0).contains(&value));
                assert!(matches!(
                    first,
                    BlockType::Stone | BlockType::CopperOre | BlockType::IronOre
                ));
            }
        }
    }

    #[test]
    fn ore_only_appears_in_the_ore_band() {
        let generator = TerrainGenerator::new(99, no_caves());
        for x in -16..16 {
            for z in -16..16 {
                let surface = generator.surface_height(x, z);
                for y in 0..CHUNK_HEIGHT {
                    let block = generator.block_at(x, y, z);
                    if matches!(block, BlockType::CopperOre | BlockType::IronOre) {
                        let depth = surface - y;
                        assert!(depth > ORE_BAND_DEPTH && depth <= DEEP_STONE_DEPTH);
                    }
                }
            }
        }
    }

    #[test]
    fn ores_appear_somewhere_in_a_large_sample() {
        let mut copper = 0;
        let mut iron = 0;
        for x in -200..200 {
            for y in 0..32 {
                match ore_at(x, y, 17) {
                    BlockType::CopperOre => copper += 1,
                    BlockType::IronOre => iron += 1,
                    _ => {}
                }
            }
        }
        assert!(copper > 0);
        assert!(iron > 0);
    }

    #[test]
    fn caves_never_touch_bottom_layer_or_surface() {
        let generator = TerrainGenerator::new(
            5,
            TerrainParameters {
                cave_threshold: -1.0,
                ..TerrainParameters::default()
            },
        );
        for x in -8..8 {
            for z in -8..8 {
                let surface = generator.surface_height(x, z);
                assert_ne!(generator.block_at(x, 0, z), BlockType::Air);
                assert_eq!(generator.block_at(x, surface, z), BlockType::Dirt);
                for y in 1..surface {
                    assert_eq!(generator.block_at(x, y, z), BlockType::Air);
                }
            }
        }
    }

    #[test]
    fn fill_chunk_matches_block_at() {
        let generator = TerrainGenerator::new(77, TerrainParameters::default());
        let mut chunk = Chunk::new(ChunkPosition::new(-1, 2));
        generator.fill_chunk(&mut chunk);

        for (x, z) in [(0, 0), (15, 15), (7, 3)] {
            for y in 0..CHUNK_HEIGHT {
                assert_eq!(
                    chunk.get_block(x, y, z),
                    generator.block_at(-16 + x, y, 32 + z)
                );
            }
        }
    }

    #[test]
    fn same_seed_generates_the_same_terrain() {
        let a = TerrainGenerator::new(2024, TerrainParameters::default());
        let b = TerrainGenerator::new(2024, TerrainParameters::default());
        let mut first = Chunk::new(ChunkPosition::new(0, 0));
        let mut second = Chunk::new(ChunkPosition::new(0, 0));
        a.fill_chunk(&mut first);
        b.fill_chunk(&mut second);
        assert_eq!(first.raw_blocks(), second.raw_blocks());
    }
}
