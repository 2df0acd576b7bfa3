//! # Engine State Module
//!
//! The simulation core: world grid, player and inventory, advanced one tick at a time.
//!
//! ## Key Components
//!
//! * `Simulation` - owns all session state and runs ticks
//! * `voxels` - block types, the world grid, terrain generation and raycasting
//! * `player` - player pose and the movement/collision resolver
//! * `inventory` - fixed per-type block bins
//! * `interaction` - break/place resolution
//!
//! ## Tick Order
//!
//! 1. Look (mouse motion) updates yaw and pitch
//! 2. The movement resolver moves the player and resolves collisions
//! 3. An edge-triggered slot selection, if any, is applied
//! 4. The view ray is cast once
//! 5. Break then place act on that single raycast sample
//!
//! Everything runs on the caller's thread. The presentation layer reads state through
//! the accessors between ticks.

use cgmath::{Deg, Point3};
use log::{debug, info};

use crate::config::SimulationConfig;

use inventory::Inventory;
use player::{MovementIntent, MovementResolver, PlayerState};
use voxels::{
    block::BlockType,
    raycast::{cast_ray, RaycastHit},
    terrain::{TerrainGenerator, TerrainStats},
    world::{CellPos, WorldGrid},
};

pub mod interaction;
pub mod inventory;
pub mod player;
pub mod voxels;

pub use interaction::InteractionOutcome;

/// Everything the input layer asks of a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickIntent {
    /// Walk/strafe axes and the jump request.
    pub movement: MovementIntent,
    /// Mouse motion `(horizontal, vertical)` since the previous tick.
    pub look_delta: (f32, f32),
    /// Break the targeted block. Sampled as "currently held".
    pub break_requested: bool,
    /// Place a block in front of the targeted one. Sampled as "currently held".
    pub place_requested: bool,
    /// Select an inventory slot. Supplied once per key press, not while held.
    pub select_slot: Option<usize>,
}

/// The full state of a sandbox session.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::{Simulation, SimulationConfig, TickIntent};
///
/// let mut simulation = Simulation::initialize(&SimulationConfig::default(), 1234);
/// simulation.tick(&TickIntent::default());
/// assert!(simulation.player().position.y < 20.0);
/// ```
pub struct Simulation {
    world: WorldGrid,
    inventory: Inventory,
    player: PlayerState,
    resolver: MovementResolver,
    raycast_step: f32,
    ticks: u64,
}

impl Simulation {
    /// Builds a freshly generated world, the starter inventory and the spawn pose.
    ///
    /// `seed` drives every random decoration, so equal configs and seeds produce
    /// identical sessions. Callers wanting a new world each run should derive it from
    /// something like the wall clock.
    ///
    /// # Panics
    ///
    /// Panics if the world extents overflow the cell count (see `WorldGrid::new`).
    /// Configs accepted by `SimulationConfig::validate` never do.
    pub fn initialize(config: &SimulationConfig, seed: u64) -> Self {
        let mut world = WorldGrid::new(config.world.size, config.world.height);
        let TerrainStats { trees, sand_columns } =
            TerrainGenerator::new(config.terrain.clone(), seed).generate(&mut world);
        debug!("Terrain seed {seed}: {trees} trees, {sand_columns} sand columns");

        let inventory = Inventory::new(config.inventory.starter_slots.clone());
        let player = PlayerState::spawn(&config.player);

        info!(
            "Simulation initialized: spawn at {:?}, {} inventory slots",
            player.position,
            inventory.len()
        );

        Self::from_parts(world, inventory, player, config)
    }

    /// Assembles a simulation from existing state, e.g. a hand-built test world.
    pub fn from_parts(
        world: WorldGrid,
        inventory: Inventory,
        mut player: PlayerState,
        config: &SimulationConfig,
    ) -> Self {
        if player.selected_slot() >= inventory.len() {
            player.select_slot(0, inventory.len());
        }
        Self {
            world,
            inventory,
            player,
            resolver: MovementResolver::new(&config.player),
            raycast_step: config.player.raycast_step,
            ticks: 0,
        }
    }

    /// Advances the session by exactly one step.
    pub fn tick(&mut self, intent: &TickIntent) -> InteractionOutcome {
        self.resolver.apply_look(&mut self.player, intent.look_delta);
        self.resolver
            .resolve(&mut self.player, &intent.movement, &self.world);

        if let Some(slot) = intent.select_slot {
            if !self.player.select_slot(slot, self.inventory.len()) {
                debug!(
                    "Ignoring selection of slot {slot}, inventory has {} slots",
                    self.inventory.len()
                );
            }
        }

        let target = self.target();
        let outcome = interaction::interact(
            target,
            intent.break_requested,
            intent.place_requested,
            &mut self.world,
            &mut self.inventory,
            self.player.selected_slot(),
        );

        self.ticks += 1;
        outcome
    }

    /// The block the player is currently looking at, against the current world.
    pub fn target(&self) -> Option<RaycastHit> {
        cast_ray(
            &self.world,
            self.player.eye(),
            self.player.yaw,
            self.player.pitch,
            self.player.reach,
            self.raycast_step,
        )
    }

    /// The block grid.
    pub fn world(&self) -> &WorldGrid {
        &self.world
    }

    /// Block at `pos`, or `None` outside the grid.
    pub fn block_at(&self, pos: CellPos) -> Option<BlockType> {
        self.world.get(pos)
    }

    /// The player's pose and kinematic state.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Position, yaw and pitch of the player.
    pub fn pose(&self) -> (Point3<f32>, Deg<f32>, Deg<f32>) {
        (self.player.position, self.player.yaw, self.player.pitch)
    }

    /// The player's inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Index of the selected inventory slot.
    pub fn selected_slot(&self) -> usize {
        self.player.selected_slot()
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Mutable access for callers that set up scenarios (teleporting, aiming).
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }
}
