//! # Simulation Configuration
//!
//! Tunable constants of a session, grouped by the subsystem that reads them. Every
//! section implements `Default` with the reference values, and every field is
//! optional in the JSON representation, so a config file only needs to list the values
//! it overrides:
//!
//! ```json
//! {
//!     "terrain": { "heightmap": "perlin", "seed": 42 },
//!     "player": { "reach": 6.0 }
//! }
//! ```

use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::{
    inventory::InventorySlot,
    voxels::{
        block::BlockType,
        world::{WorldGrid, MAX_WORLD_CELLS, WORLD_HEIGHT, WORLD_SIZE},
    },
};

/// Errors raised while loading or validating a `SimulationConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read config file {path:?}")]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for this schema.
    #[error("could not parse config file {path:?}")]
    Parse {
        /// The file that was parsed.
        path: PathBuf,
        /// Where and why parsing failed.
        #[source]
        source: serde_json::Error,
    },
    /// The values parsed but violate a constraint.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top level configuration for a `Simulation`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid extents.
    pub world: WorldConfig,
    /// Terrain generation parameters.
    pub terrain: TerrainConfig,
    /// Player kinematics and targeting.
    pub player: PlayerConfig,
    /// Starting inventory contents.
    pub inventory: InventoryConfig,
}

/// Extents of the world grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Extent along x and z.
    pub size: usize,
    /// Extent along y.
    pub height: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: WORLD_SIZE,
            height: WORLD_HEIGHT,
        }
    }
}

/// Which surface function the terrain generator samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightmapKind {
    /// `5 + 3·sin(x/5)·cos(z/4) + 2·sin(z/3)`.
    #[default]
    RollingHills,
    /// Seeded 2D Perlin noise around the same base height.
    Perlin,
}

/// Parameters of the terrain generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Surface function sampled per column.
    pub heightmap: HeightmapKind,
    /// Water fills every non-solid cell below this layer.
    pub sea_level: i32,
    /// Probability that an eligible column grows a tree.
    pub tree_chance: f64,
    /// Trees only grow in columns strictly more than this many cells from every edge.
    pub tree_edge_margin: i32,
    /// Shortest trunk, in cells.
    pub tree_min_height: u32,
    /// Tallest trunk, in cells.
    pub tree_max_height: u32,
    /// Trees only grow where the surface sits at least this far below the world top.
    pub tree_headroom: f32,
    /// Probability that a low column gets a sand surface.
    pub sand_chance: f64,
    /// Columns whose surface height is below this value are beach candidates.
    pub sand_max_height: f32,
    /// Horizontal frequency of the Perlin heightmap.
    pub perlin_scale: f64,
    /// Peak deviation of the Perlin heightmap from its base height.
    pub perlin_amplitude: f64,
    /// Seed for decorative placement and Perlin noise. `None` lets the caller pick one.
    pub seed: Option<u64>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            heightmap: HeightmapKind::RollingHills,
            sea_level: 5,
            tree_chance: 1.0 / 20.0,
            tree_edge_margin: 5,
            tree_min_height: 4,
            tree_max_height: 6,
            tree_headroom: 6.0,
            sand_chance: 1.0 / 3.0,
            sand_max_height: 6.0,
            perlin_scale: 0.08,
            perlin_amplitude: 4.0,
            seed: None,
        }
    }
}

/// Player kinematics. Velocities are in world units per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting position.
    pub spawn: [f32; 3],
    /// Targeting distance.
    pub reach: f32,
    /// Horizontal speed at full input.
    pub walk_speed: f32,
    /// Upward velocity set by a jump.
    pub jump_velocity: f32,
    /// Subtracted from the vertical velocity every tick.
    pub gravity: f32,
    /// Fastest possible fall.
    pub terminal_velocity: f32,
    /// Lowest height the player can occupy.
    pub floor_height: f32,
    /// Degrees of rotation per unit of mouse motion.
    pub mouse_sensitivity: f32,
    /// Pitch is clamped to `±pitch_limit` degrees.
    pub pitch_limit: f32,
    /// Distance between consecutive ray samples.
    pub raycast_step: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: [8.0, 20.0, 8.0],
            reach: 4.0,
            walk_speed: 0.1,
            jump_velocity: 0.15,
            gravity: 0.01,
            terminal_velocity: 0.3,
            floor_height: 1.0,
            mouse_sensitivity: 0.1,
            pitch_limit: 89.0,
            raycast_step: 0.1,
        }
    }
}

/// The fixed set of inventory bins a session starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Slots in display order. Their types never change during a session.
    pub starter_slots: Vec<InventorySlot>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            starter_slots: vec![
                InventorySlot::new(BlockType::Grass, 10),
                InventorySlot::new(BlockType::Dirt, 5),
                InventorySlot::new(BlockType::Stone, 8),
                InventorySlot::new(BlockType::Wood, 3),
                InventorySlot::new(BlockType::Water, 4),
                InventorySlot::new(BlockType::Sand, 6),
            ],
        }
    }
}

impl SimulationConfig {
    /// Reads and validates a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SimulationConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| Err(ConfigError::Invalid(message.to_string()));

        if self.world.size == 0 || self.world.height == 0 {
            return invalid("world extents must be non-zero");
        }
        if i32::try_from(self.world.size).is_err() || i32::try_from(self.world.height).is_err() {
            return invalid("world extents must fit in an i32");
        }
        match WorldGrid::cell_count(self.world.size, self.world.height) {
            Some(cells) if cells <= MAX_WORLD_CELLS => {}
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "a {0}x{1}x{0} world exceeds {MAX_WORLD_CELLS} cells",
                    self.world.size, self.world.height
                )))
            }
        }
        if self.inventory.starter_slots.is_empty() {
            return invalid("the starter inventory needs at least one slot");
        }
        if let Some(slot) = self
            .inventory
            .starter_slots
            .iter()
            .find(|slot| slot.block_type.is_air())
        {
            return Err(ConfigError::Invalid(format!(
                "inventory slot of type {} cannot be placed",
                slot.block_type
            )));
        }

        let terrain = &self.terrain;
        if terrain.tree_min_height > terrain.tree_max_height {
            return invalid("tree_min_height exceeds tree_max_height");
        }
        for (name, chance) in [("tree_chance", terrain.tree_chance), ("sand_chance", terrain.sand_chance)] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::Invalid(format!("{name} must lie in [0, 1]")));
            }
        }

        let player = &self.player;
        if !(player.reach > 0.0) {
            return invalid("reach must be positive");
        }
        if !(player.raycast_step > 0.0) {
            return invalid("raycast_step must be positive");
        }
        Ok(())
    }
}
