//! # Voxel Raycast
//!
//! Finds the block the player is looking at by marching along the view ray in fixed
//! increments and flooring each sample to a cell.
//!
//! This is a sampled march, not an exact voxel traversal: a ray grazing the corner of a
//! cell can step over it when the corner is thinner than the step. With unit blocks and
//! a 0.1 step this is not noticeable in practice.

use cgmath::{Angle, Deg, InnerSpace, Point3, Rad, Vector3};

use super::world::{cell_at, CellPos, WorldGrid};

/// The first solid cell along a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaycastHit {
    /// The solid cell that stopped the ray.
    pub hit: CellPos,
    /// The last empty cell sampled before `hit`, where a new block would be placed.
    /// `None` when the very first sample was already solid.
    pub before_hit: Option<CellPos>,
}

/// Unit view direction for a yaw/pitch pair.
///
/// `yaw = 0, pitch = 0` looks along −z, positive yaw turns towards +x and positive
/// pitch looks down.
pub fn view_direction(yaw: Deg<f32>, pitch: Deg<f32>) -> Vector3<f32> {
    let (yaw_sin, yaw_cos) = Rad::from(yaw).sin_cos();
    let (pitch_sin, pitch_cos) = Rad::from(pitch).sin_cos();
    Vector3::new(yaw_sin * pitch_cos, -pitch_sin, -yaw_cos * pitch_cos)
}

/// Marches from `eye` along `(yaw, pitch)` for up to `reach` units.
///
/// Samples are taken at distances `0, step, 2·step, …` strictly below `reach`. The
/// march stops with `None` as soon as a sample leaves the grid, and with a hit at the
/// first sample landing in a solid cell.
pub fn cast_ray(
    world: &WorldGrid,
    eye: Point3<f32>,
    yaw: Deg<f32>,
    pitch: Deg<f32>,
    reach: f32,
    step: f32,
) -> Option<RaycastHit> {
    if !(step > 0.0) || !(reach > 0.0) {
        return None;
    }

    let direction = view_direction(yaw, pitch).normalize();
    let sample_count = (reach / step).ceil() as u32;
    let mut before_hit = None;

    for i in 0..sample_count {
        // Multiplying instead of accumulating keeps samples identical between casts.
        let distance = i as f32 * step;
        if distance >= reach {
            break;
        }

        let cell = cell_at(eye + direction * distance);
        let block = world.get(cell)?;
        if block.is_solid() {
            return Some(RaycastHit {
                hit: cell,
                before_hit,
            });
        }
        before_hit = Some(cell);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::BlockType;

    const STEP: f32 = 0.1;

    fn world_with_stone(pos: CellPos) -> WorldGrid {
        let mut world = WorldGrid::default();
        world.set(pos, BlockType::Stone);
        world
    }

    #[test]
    fn direction_conventions() {
        let north = view_direction(Deg(0.0), Deg(0.0));
        assert!((north - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-6);

        let east = view_direction(Deg(90.0), Deg(0.0));
        assert!((east - Vector3::new(1.0, 0.0, 0.0)).magnitude() < 1e-6);

        let down = view_direction(Deg(0.0), Deg(90.0));
        assert!((down - Vector3::new(0.0, -1.0, 0.0)).magnitude() < 1e-6);
    }

    #[test]
    fn hits_block_straight_ahead() {
        let world = world_with_stone(Point3::new(5, 5, 5));
        let hit = cast_ray(&world, Point3::new(5.0, 5.0, 10.0), Deg(0.0), Deg(0.0), 8.0, STEP);
        assert_eq!(
            hit,
            Some(RaycastHit {
                hit: Point3::new(5, 5, 5),
                before_hit: Some(Point3::new(5, 5, 6)),
            })
        );
    }

    #[test]
    fn looking_down_targets_the_cell_below() {
        let world = world_with_stone(Point3::new(3, 2, 3));
        let hit = cast_ray(&world, Point3::new(3.5, 4.5, 3.5), Deg(0.0), Deg(90.0), 4.0, STEP).unwrap();
        assert_eq!(hit.hit, Point3::new(3, 2, 3));
        assert_eq!(hit.before_hit, Some(Point3::new(3, 3, 3)));
    }

    #[test]
    fn out_of_reach_is_no_target() {
        let world = world_with_stone(Point3::new(5, 5, 5));
        let hit = cast_ray(&world, Point3::new(5.0, 5.0, 10.0), Deg(0.0), Deg(0.0), 4.0, STEP);
        assert_eq!(hit, None);
    }

    #[test]
    fn leaving_the_grid_stops_the_march() {
        let world = world_with_stone(Point3::new(5, 5, 5));
        // Facing away from the stone, towards +z and out of the world.
        let hit = cast_ray(&world, Point3::new(5.0, 5.0, 30.5), Deg(180.0), Deg(0.0), 100.0, STEP);
        assert_eq!(hit, None);

        let outside = cast_ray(&world, Point3::new(-3.0, 5.0, 5.5), Deg(90.0), Deg(0.0), 20.0, STEP);
        assert_eq!(outside, None);
    }

    #[test]
    fn eye_inside_a_block_has_no_placement_cell() {
        let world = world_with_stone(Point3::new(5, 5, 5));
        let hit = cast_ray(&world, Point3::new(5.5, 5.5, 5.5), Deg(0.0), Deg(0.0), 4.0, STEP).unwrap();
        assert_eq!(hit.hit, Point3::new(5, 5, 5));
        assert_eq!(hit.before_hit, None);
    }

    #[test]
    fn degenerate_parameters_are_no_target() {
        let world = world_with_stone(Point3::new(5, 5, 5));
        let eye = Point3::new(5.0, 5.0, 6.5);
        assert_eq!(cast_ray(&world, eye, Deg(0.0), Deg(0.0), 0.0, STEP), None);
        assert_eq!(cast_ray(&world, eye, Deg(0.0), Deg(0.0), 4.0, 0.0), None);
        assert_eq!(cast_ray(&world, eye, Deg(0.0), Deg(0.0), 4.0, f32::NAN), None);
    }

    #[test]
    fn repeated_casts_agree() {
        let mut world = WorldGrid::default();
        for x in 0..32 {
            for z in 0..32 {
                world.set(Point3::new(x, 3, z), BlockType::Dirt);
            }
        }
        let eye = Point3::new(12.3, 7.7, 19.1);
        let first = cast_ray(&world, eye, Deg(37.0), Deg(52.0), 8.0, STEP);
        let second = cast_ray(&world, eye, Deg(37.0), Deg(52.0), 8.0, STEP);
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
