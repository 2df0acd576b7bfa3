#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! A first-person block sandbox on a small, fixed-size voxel world.
//!
//! The world is generated once from a heightmap (grass over dirt over stone, water
//! below sea level, scattered trees and sand). The player walks, jumps and falls under
//! gravity, looks around with the mouse, breaks the block under the crosshair into a
//! per-type inventory and places blocks back from the selected slot.
//!
//! ## Key Modules
//!
//! * `engine_state` - The simulation: world grid, terrain, player movement, raycasting,
//!   inventory and block interaction
//! * `config` - Tunable constants, loadable from a JSON file
//! * `application_state` - The winit shell: window, input and tick scheduling
//!
//! ## Architecture
//!
//! The simulation is single-threaded and owns all state. It advances in fixed ticks;
//! each tick takes a `TickIntent` built from the input of that tick. The shell drives
//! ticks at a steady rate and reads state back between them.
//!
//! ## Usage
//!
//! ```rust
//! use voxel_sandbox::{Simulation, SimulationConfig, TickIntent};
//!
//! let mut simulation = Simulation::initialize(&SimulationConfig::default(), 7);
//! let intent = TickIntent {
//!     break_requested: true,
//!     ..TickIntent::default()
//! };
//! simulation.tick(&intent);
//! ```
//!
//! The windowed application is started with [`run`].

use application_state::ApplicationState;
use log::{error, info};
use winit::event_loop::EventLoop;

mod application_state;
pub mod config;
pub mod engine_state;

pub use config::{ConfigError, SimulationConfig};
pub use engine_state::{
    interaction::{interact, InteractionOutcome},
    inventory::{Inventory, InventorySlot},
    player::{MovementIntent, MovementResolver, PlayerState},
    voxels::{
        block::BlockType,
        raycast::{cast_ray, view_direction, RaycastHit},
        terrain::{Heightmap, PerlinHills, RollingHills, TerrainGenerator, TerrainStats},
        world::{cell_at, CellPos, WorldGrid},
    },
    Simulation, TickIntent,
};

/// Starts the windowed sandbox.
///
/// The first command line argument, if any, names a JSON config file. A file that fails
/// to load is reported and the defaults are used instead. Without a configured seed,
/// the world is seeded from the wall clock.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = load_config(std::env::args().nth(1));
    let seed = config.terrain.seed.unwrap_or_else(wall_clock_seed);
    info!("World seed {seed}");
    let simulation = Simulation::initialize(&config, seed);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            error!("Could not create the event loop: {err}");
            return;
        }
    };

    let mut state = ApplicationState::new(simulation);
    if let Err(err) = event_loop.run_app(&mut state) {
        error!("Event loop terminated with an error: {err}");
    }
}

fn load_config(path: Option<String>) -> SimulationConfig {
    let Some(path) = path else {
        return SimulationConfig::default();
    };
    match SimulationConfig::from_file(&path) {
        Ok(config) => {
            info!("Loaded config from {path}");
            config
        }
        Err(err) => {
            match std::error::Error::source(&err) {
                Some(source) => error!("{err}: {source}, using defaults"),
                None => error!("{err}, using defaults"),
            }
            SimulationConfig::default()
        }
    }
}

fn wall_clock_seed() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
