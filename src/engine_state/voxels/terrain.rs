//! # Terrain Generation
//!
//! One-shot population of a `WorldGrid`. Each `(x, z)` column is classified from a
//! continuous heightmap sample `h`:
//!
//! * `y < h`: Grass on the topmost solid layer, Dirt for the three layers under it,
//!   Stone below that.
//! * `h <= y < sea_level`: Water.
//! * otherwise: Air.
//!
//! After a column is filled it may receive two decorations, each drawn from the
//! generator's seeded RNG: a Wood trunk rising from the surface cell, replacing its
//! Grass (interior columns with enough headroom only), and a Sand surface on low-lying
//! columns.

use cgmath::Point3;
use log::info;
use noise::{NoiseFn, Perlin};

use crate::config::{HeightmapKind, TerrainConfig};

use super::{block::BlockType, world::WorldGrid};

/// Number of Dirt layers between the Grass surface and the Stone below.
pub const DIRT_DEPTH: i32 = 3;

/// A smooth, bounded surface elevation defined for every column.
pub trait Heightmap {
    /// Terrain elevation of column `(x, z)`. Must be deterministic.
    fn height_at(&self, x: i32, z: i32) -> f32;
}

/// The reference rolling-hill surface, `5 + 3·sin(x/5)·cos(z/4) + 2·sin(z/3)`.
///
/// Heights stay within `[0, 10]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingHills;

impl Heightmap for RollingHills {
    fn height_at(&self, x: i32, z: i32) -> f32 {
        let (x, z) = (x as f32, z as f32);
        5.0 + 3.0 * (x / 5.0).sin() * (z / 4.0).cos() + 2.0 * (z / 3.0).sin()
    }
}

/// Seeded Perlin noise around the same base height as `RollingHills`.
pub struct PerlinHills {
    perlin: Perlin,
    scale: f64,
    amplitude: f64,
}

/// Base elevation shared by the built-in heightmaps.
const BASE_HEIGHT: f64 = 5.0;

impl PerlinHills {
    /// Samples Perlin noise of `seed` at `scale` per cell, scaled by `amplitude`.
    pub fn new(seed: u32, scale: f64, amplitude: f64) -> Self {
        Self {
            perlin: Perlin::new(seed),
            scale,
            amplitude,
        }
    }
}

impl Heightmap for PerlinHills {
    fn height_at(&self, x: i32, z: i32) -> f32 {
        let sample = self
            .perlin
            .get([x as f64 * self.scale, z as f64 * self.scale]);
        (BASE_HEIGHT + sample * self.amplitude) as f32
    }
}

/// Counts of the decorations placed by one `TerrainGenerator::generate` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerrainStats {
    /// Number of Wood trunks grown.
    pub trees: usize,
    /// Number of columns whose surface became Sand.
    pub sand_columns: usize,
}

/// Fills a `WorldGrid` with terrain.
///
/// All randomness comes from the `fastrand::Rng` handed to `new`, so two generators
/// built from equal configs and equally seeded RNGs produce identical worlds.
pub struct TerrainGenerator {
    config: TerrainConfig,
    heightmap: Box<dyn Heightmap>,
    rng: fastrand::Rng,
}

impl TerrainGenerator {
    /// Creates a generator using the heightmap selected by `config`.
    pub fn new(config: TerrainConfig, seed: u64) -> Self {
        let heightmap: Box<dyn Heightmap> = match config.heightmap {
            HeightmapKind::RollingHills => Box::new(RollingHills),
            HeightmapKind::Perlin => Box::new(PerlinHills::new(
                seed as u32,
                config.perlin_scale,
                config.perlin_amplitude,
            )),
        };
        Self::with_heightmap(config, heightmap, seed)
    }

    /// Creates a generator sampling an arbitrary heightmap.
    pub fn with_heightmap(config: TerrainConfig, heightmap: Box<dyn Heightmap>, seed: u64) -> Self {
        Self {
            config,
            heightmap,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Overwrites every cell of `world` and returns what was decorated.
    pub fn generate(&mut self, world: &mut WorldGrid) -> TerrainStats {
        let size = world.size() as i32;
        let mut stats = TerrainStats::default();

        for x in 0..size {
            for z in 0..size {
                let height = self.fill_column(world, x, z);

                if self.try_grow_tree(world, x, z, height) {
                    stats.trees += 1;
                }
                if self.try_place_sand(world, x, z, height) {
                    stats.sand_columns += 1;
                }
            }
        }

        info!(
            "Generated {}x{}x{} terrain: {} solid cells, {} trees, {} sand columns",
            world.size(),
            world.height(),
            world.size(),
            world.cells().len() - world.count(BlockType::Air),
            stats.trees,
            stats.sand_columns
        );

        stats
    }

    /// Classifies every cell of column `(x, z)` and returns the sampled height.
    fn fill_column(&self, world: &mut WorldGrid, x: i32, z: i32) -> f32 {
        let world_height = world.height() as i32;
        let height = self
            .heightmap
            .height_at(x, z)
            .clamp(0.0, world_height as f32);
        let surface = surface_layer(height);

        for y in 0..world_height {
            let block = if (y as f32) < height {
                if y == surface {
                    BlockType::Grass
                } else if y >= surface - DIRT_DEPTH {
                    BlockType::Dirt
                } else {
                    BlockType::Stone
                }
            } else if y < self.config.sea_level {
                BlockType::Water
            } else {
                BlockType::Air
            };
            world.set(Point3::new(x, y, z), block);
        }

        height
    }

    fn try_grow_tree(&mut self, world: &mut WorldGrid, x: i32, z: i32, height: f32) -> bool {
        let size = world.size() as i32;
        let margin = self.config.tree_edge_margin;
        let interior = x > margin && x < size - margin && z > margin && z < size - margin;

        if !interior
            || self.rng.f64() >= self.config.tree_chance
            || height >= world.height() as f32 - self.config.tree_headroom
        {
            return false;
        }

        let (shortest, tallest) = (self.config.tree_min_height, self.config.tree_max_height);
        let trunk_height = self.rng.u32(shortest.min(tallest)..=shortest.max(tallest)) as i32;
        let base = surface_layer(height);
        let top = base + trunk_height - 1;

        if !world.contains(Point3::new(x, base, z)) || !world.contains(Point3::new(x, top, z)) {
            return false;
        }

        for y in base..=top {
            world.set(Point3::new(x, y, z), BlockType::Wood);
        }
        true
    }

    fn try_place_sand(&mut self, world: &mut WorldGrid, x: i32, z: i32, height: f32) -> bool {
        if height >= self.config.sand_max_height || self.rng.f64() >= self.config.sand_chance {
            return false;
        }
        world
            .set(Point3::new(x, surface_layer(height), z), BlockType::Sand)
            .is_some()
    }
}

/// The y of the topmost cell with `y < height`, or `-1` for an empty column.
#[inline]
fn surface_layer(height: f32) -> i32 {
    height.ceil() as i32 - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat(f32);

    impl Heightmap for Flat {
        fn height_at(&self, _x: i32, _z: i32) -> f32 {
            self.0
        }
    }

    fn undecorated() -> TerrainConfig {
        TerrainConfig {
            tree_chance: 0.0,
            sand_chance: 0.0,
            ..TerrainConfig::default()
        }
    }

    fn column(world: &WorldGrid, x: i32, z: i32) -> Vec<BlockType> {
        (0..world.height() as i32)
            .map(|y| world.get(Point3::new(x, y, z)).unwrap())
            .collect()
    }

    #[test]
    fn rolling_hills_is_bounded() {
        for x in -64..64 {
            for z in -64..64 {
                let height = RollingHills.height_at(x, z);
                assert!((0.0..=10.0).contains(&height), "{x},{z} -> {height}");
            }
        }
    }

    #[test]
    fn column_layers_follow_height() {
        let mut world = WorldGrid::new(4, 16);
        TerrainGenerator::with_heightmap(undecorated(), Box::new(Flat(7.5)), 1).generate(&mut world);

        let column = column(&world, 2, 2);
        assert_eq!(&column[0..4], &[BlockType::Stone; 4]);
        assert_eq!(&column[4..7], &[BlockType::Dirt; 3]);
        assert_eq!(column[7], BlockType::Grass);
        assert!(column[8..].iter().all(|block| block.is_air()));
    }

    #[test]
    fn low_columns_are_flooded_to_sea_level() {
        let mut world = WorldGrid::new(4, 16);
        TerrainGenerator::with_heightmap(undecorated(), Box::new(Flat(2.0)), 1).generate(&mut world);

        let column = column(&world, 0, 3);
        assert_eq!(column[0], BlockType::Dirt);
        assert_eq!(column[1], BlockType::Grass);
        assert_eq!(&column[2..5], &[BlockType::Water; 3]);
        assert_eq!(column[5], BlockType::Air);
    }

    #[test]
    fn sand_replaces_surface_of_low_columns() {
        let config = TerrainConfig {
            sand_chance: 1.0,
            ..undecorated()
        };
        let mut world = WorldGrid::new(4, 16);
        let stats = TerrainGenerator::with_heightmap(config, Box::new(Flat(4.0)), 1).generate(&mut world);

        assert_eq!(stats.sand_columns, 16);
        assert_eq!(world.get(Point3::new(1, 3, 1)), Some(BlockType::Sand));
        assert_eq!(world.count(BlockType::Grass), 0);
    }

    #[test]
    fn high_columns_never_get_sand() {
        let config = TerrainConfig {
            sand_chance: 1.0,
            ..undecorated()
        };
        let mut world = WorldGrid::new(4, 16);
        TerrainGenerator::with_heightmap(config, Box::new(Flat(8.0)), 1).generate(&mut world);
        assert_eq!(world.count(BlockType::Sand), 0);
    }

    #[test]
    fn trees_only_grow_in_the_interior() {
        let config = TerrainConfig {
            tree_chance: 1.0,
            ..undecorated()
        };
        let mut world = WorldGrid::new(16, 32);
        let stats = TerrainGenerator::with_heightmap(config, Box::new(Flat(6.0)), 3).generate(&mut world);

        // Columns 6..=10 on both axes are interior for a 16 wide world with margin 5.
        assert_eq!(stats.trees, 25);
        for x in 0..16 {
            for z in 0..16 {
                let interior = (6..=10).contains(&x) && (6..=10).contains(&z);
                let trunk = column(&world, x, z)
                    .iter()
                    .filter(|&&block| block == BlockType::Wood)
                    .count();
                if interior {
                    assert!((4..=6).contains(&trunk), "{x},{z} trunk {trunk}");
                    assert_eq!(world.get(Point3::new(x, 5, z)), Some(BlockType::Wood));
                    assert_eq!(world.get(Point3::new(x, 4, z)), Some(BlockType::Dirt));
                } else {
                    assert_eq!(trunk, 0, "{x},{z}");
                }
            }
        }
    }

    #[test]
    fn trunk_replaces_the_grass_cell() {
        let config = TerrainConfig {
            tree_chance: 1.0,
            ..undecorated()
        };
        let mut world = WorldGrid::new(16, 32);
        TerrainGenerator::with_heightmap(config, Box::new(Flat(5.5)), 11).generate(&mut world);

        assert_eq!(world.get(Point3::new(8, 5, 8)), Some(BlockType::Wood));
        assert_eq!(world.get(Point3::new(8, 4, 8)), Some(BlockType::Dirt));
        assert_eq!(world.get(Point3::new(8, 8, 8)), Some(BlockType::Wood));
        assert_eq!(world.get(Point3::new(8, 11, 8)), Some(BlockType::Air));
        // Edge columns keep their grass.
        assert_eq!(world.get(Point3::new(2, 5, 2)), Some(BlockType::Grass));
    }

    #[test]
    fn swapped_trunk_bounds_still_grow_trees() {
        let config = TerrainConfig {
            tree_chance: 1.0,
            tree_min_height: 6,
            tree_max_height: 4,
            ..undecorated()
        };
        let mut world = WorldGrid::new(16, 32);
        let stats = TerrainGenerator::with_heightmap(config, Box::new(Flat(6.0)), 3).generate(&mut world);

        assert_eq!(stats.trees, 25);
        let trunk = column(&world, 8, 8)
            .iter()
            .filter(|&&block| block == BlockType::Wood)
            .count();
        assert!((4..=6).contains(&trunk));
    }

    #[test]
    fn trees_need_headroom() {
        let config = TerrainConfig {
            tree_chance: 1.0,
            ..undecorated()
        };
        let mut world = WorldGrid::new(16, 10);
        let stats = TerrainGenerator::with_heightmap(config, Box::new(Flat(5.0)), 3).generate(&mut world);
        assert_eq!(stats.trees, 0);
        assert_eq!(world.count(BlockType::Wood), 0);
    }

    #[test]
    fn trunks_that_would_leave_the_grid_are_skipped() {
        let config = TerrainConfig {
            tree_chance: 1.0,
            tree_headroom: 0.0,
            ..undecorated()
        };
        // Surface at y = 4, so even the shortest trunk would reach y = 7.
        let mut world = WorldGrid::new(16, 7);
        let stats = TerrainGenerator::with_heightmap(config, Box::new(Flat(5.0)), 3).generate(&mut world);
        assert_eq!(stats.trees, 0);
        assert_eq!(world.count(BlockType::Wood), 0);
    }

    #[test]
    fn same_seed_same_world() {
        let generate = |seed| {
            let mut world = WorldGrid::default();
            TerrainGenerator::new(TerrainConfig::default(), seed).generate(&mut world);
            world
        };
        assert_eq!(generate(99), generate(99));
    }

    #[test]
    fn perlin_heightmap_fills_every_column() {
        let config = TerrainConfig {
            heightmap: HeightmapKind::Perlin,
            ..undecorated()
        };
        let mut world = WorldGrid::default();
        TerrainGenerator::new(config, 5).generate(&mut world);
        for x in 0..world.size() as i32 {
            for z in 0..world.size() as i32 {
                assert!(world.is_solid(Point3::new(x, 0, z)) || world.get(Point3::new(x, 0, z)) == Some(BlockType::Water));
            }
        }
    }
}
