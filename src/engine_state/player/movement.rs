//! # Movement Resolver
//!
//! Advances a `PlayerState` by one tick:
//! - turns mouse motion into yaw/pitch
//! - rotates the movement intent by yaw into a world-space horizontal velocity
//! - applies jump, gravity and the terminal fall speed
//! - integrates position with one explicit Euler step
//! - resolves collisions against the floor and the grid
//!
//! Ticks are fixed steps. Velocities are in units per tick and nothing is scaled by
//! elapsed time, so the caller has to drive ticks at a steady rate.
//!
//! Grid collision only tests the single cell containing the new position and, if it is
//! solid, lifts the player on top of it. There is no horizontal response: walking into
//! a wall lets the player pass through it (or get lifted onto it).

use cgmath::{Angle, Deg, Rad};
use log::trace;

use crate::config::PlayerConfig;
use crate::engine_state::voxels::world::{cell_at, WorldGrid};

use super::{MovementIntent, PlayerState};

/// Applies look and movement input to a player. Holds the kinematic constants.
#[derive(Debug, Clone)]
pub struct MovementResolver {
    walk_speed: f32,
    jump_velocity: f32,
    gravity: f32,
    terminal_velocity: f32,
    floor_height: f32,
    mouse_sensitivity: f32,
    pitch_limit: f32,
}

impl MovementResolver {
    /// Copies the kinematic constants out of `config`.
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            jump_velocity: config.jump_velocity,
            gravity: config.gravity,
            terminal_velocity: config.terminal_velocity,
            floor_height: config.floor_height,
            mouse_sensitivity: config.mouse_sensitivity,
            pitch_limit: config.pitch_limit,
        }
    }

    /// Rotates the view by a mouse motion delta `(horizontal, vertical)`.
    ///
    /// Moving the mouse right turns right, moving it down looks down. Yaw wraps into
    /// `[0, 360)`, pitch is clamped to `±pitch_limit`.
    pub fn apply_look(&self, player: &mut PlayerState, (delta_x, delta_y): (f32, f32)) {
        let yaw = player.yaw.0 + delta_x * self.mouse_sensitivity;
        let pitch = player.pitch.0 + delta_y * self.mouse_sensitivity;
        player.yaw = Deg(yaw.rem_euclid(360.0));
        player.pitch = Deg(pitch.clamp(-self.pitch_limit, self.pitch_limit));
    }

    /// Runs one movement and collision step.
    pub fn resolve(&self, player: &mut PlayerState, intent: &MovementIntent, world: &WorldGrid) {
        // Local frame: +x is right, -z is forward.
        let move_x = intent.strafe * self.walk_speed;
        let move_z = -intent.forward * self.walk_speed;

        let (yaw_sin, yaw_cos) = Rad::from(player.yaw).sin_cos();
        player.velocity.x = move_x * yaw_cos - move_z * yaw_sin;
        player.velocity.z = move_x * yaw_sin + move_z * yaw_cos;

        if intent.jump && player.on_ground {
            player.velocity.y = self.jump_velocity;
            player.on_ground = false;
        }

        player.velocity.y = (player.velocity.y - self.gravity).max(-self.terminal_velocity);

        player.position += player.velocity;

        if player.position.y < self.floor_height {
            self.land(player, self.floor_height);
        }

        let cell = cell_at(player.position);
        if world.is_solid(cell) {
            self.land(player, cell.y as f32 + 1.0);
        }

        trace!(
            "player at ({:.2}, {:.2}, {:.2}) velocity ({:.3}, {:.3}, {:.3}) on_ground={}",
            player.position.x,
            player.position.y,
            player.position.z,
            player.velocity.x,
            player.velocity.y,
            player.velocity.z,
            player.on_ground
        );
    }

    fn land(&self, player: &mut PlayerState, y: f32) {
        player.position.y = y;
        player.velocity.y = 0.0;
        player.on_ground = true;
    }
}
