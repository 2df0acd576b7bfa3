//! # Player State
//!
//! The player's pose and kinematic state, plus the per-tick movement intent the input
//! layer hands to the simulation.
//!
//! ## Conventions
//! - `position` is both the collision point and the eye the targeting ray starts from.
//! - `yaw` rotates about +y. At `yaw = 0` the player faces −z, at `yaw = 90°` it faces +x.
//! - positive `pitch` looks down. It is kept within `±pitch_limit` by the resolver.
//! - angles are stored in degrees.

use cgmath::{Deg, Point3, Vector3, Zero};

use crate::config::PlayerConfig;

pub mod movement;

pub use movement::MovementResolver;

/// Horizontal movement and jump request for a single tick.
///
/// Axis values are signed magnitudes, normally in `[-1, 1]`, that the resolver scales
/// by the configured walk speed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementIntent {
    /// Positive moves along the view direction, negative moves backwards.
    pub forward: f32,
    /// Positive strafes right, negative strafes left.
    pub strafe: f32,
    /// Launch upwards if currently standing on something.
    pub jump: bool,
}

/// Position, orientation, velocity and targeting state of the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Position in world space.
    pub position: Point3<f32>,
    /// Horizontal rotation around the y axis.
    pub yaw: Deg<f32>,
    /// Vertical rotation. Positive looks down.
    pub pitch: Deg<f32>,
    /// Displacement applied per tick.
    pub velocity: Vector3<f32>,
    /// Set while resting on the floor or on top of a solid cell.
    pub on_ground: bool,
    /// Maximum distance at which blocks can be targeted.
    pub reach: f32,
    selected_slot: usize,
}

impl PlayerState {
    /// Creates a resting player at `position` facing −z with slot 0 selected.
    pub fn new(position: Point3<f32>, reach: f32) -> Self {
        Self {
            position,
            yaw: Deg(0.0),
            pitch: Deg(0.0),
            velocity: Vector3::zero(),
            on_ground: false,
            reach,
            selected_slot: 0,
        }
    }

    /// Creates the spawn state described by `config`.
    pub fn spawn(config: &PlayerConfig) -> Self {
        Self::new(Point3::from(config.spawn), config.reach)
    }

    /// The eye the targeting ray is cast from.
    pub fn eye(&self) -> Point3<f32> {
        self.position
    }

    /// Index of the selected inventory slot.
    pub fn selected_slot(&self) -> usize {
        self.selected_slot
    }

    /// Selects `slot` if it indexes one of `slot_count` slots.
    ///
    /// Out of range requests are ignored and return `false`.
    pub fn select_slot(&mut self, slot: usize, slot_count: usize) -> bool {
        if slot >= slot_count {
            return false;
        }
        self.selected_slot = slot;
        true
    }
}
