//! # Block Type Module
//!
//! This module defines the closed set of block types that can occupy a cell of the
//! world grid, together with the static metadata (display name, color) that the
//! presentation layer reads.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::BlockColor;

/// Number of distinct block types, including `Air`.
pub const BLOCK_TYPE_COUNT: usize = 7;

/// Display names, indexed by `BlockType as usize`.
const BLOCK_NAMES: [&str; BLOCK_TYPE_COUNT] = ["Air", "Grass", "Dirt", "Stone", "Wood", "Water", "Sand"];

/// Flat RGB colors, indexed by `BlockType as usize`.
const BLOCK_COLORS: [BlockColor; BLOCK_TYPE_COUNT] = [
    [0.0, 0.0, 0.0],   // Air
    [0.2, 0.8, 0.3],   // Grass
    [0.6, 0.4, 0.2],   // Dirt
    [0.5, 0.5, 0.5],   // Stone
    [0.5, 0.35, 0.15], // Wood
    [0.2, 0.3, 0.8],   // Water
    [0.9, 0.8, 0.5],   // Sand
];

/// Enumerates all possible block types in the voxel world.
///
/// `Air` is the empty sentinel. Every other variant is solid: it stops the player
/// when standing on it and occludes block-targeting rays.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    /// An empty cell.
    #[default]
    Air = 0,
    /// Topmost layer of a terrain column.
    Grass = 1,
    /// The few layers directly under the grass.
    Dirt = 2,
    /// Everything deeper than the dirt layers.
    Stone = 3,
    /// Tree trunks.
    Wood = 4,
    /// Flood fill between the terrain surface and sea level.
    Water = 5,
    /// Beach cells on low-lying columns.
    Sand = 6,
}

impl BlockType {
    /// Every block type, in declaration order.
    pub const ALL: [BlockType; BLOCK_TYPE_COUNT] = [
        BlockType::Air,
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Wood,
        BlockType::Water,
        BlockType::Sand,
    ];

    /// Returns `true` for every type except `Air`.
    #[inline]
    pub const fn is_solid(self) -> bool {
        !self.is_air()
    }

    /// Returns `true` only for `Air`.
    #[inline]
    pub const fn is_air(self) -> bool {
        matches!(self, BlockType::Air)
    }

    /// Human readable name shown in the inventory HUD.
    #[inline]
    pub const fn name(self) -> &'static str {
        BLOCK_NAMES[self as usize]
    }

    /// RGB color triple in `[0, 1]` used when drawing this block.
    #[inline]
    pub const fn color(self) -> BlockColor {
        BLOCK_COLORS[self as usize]
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
