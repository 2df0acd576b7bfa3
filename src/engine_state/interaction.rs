//! # Block Interaction
//!
//! Applies break and place requests to the world and inventory, given the raycast
//! sample taken for the current tick.

use log::debug;

use super::{
    inventory::Inventory,
    voxels::{
        block::BlockType,
        raycast::RaycastHit,
        world::{CellPos, WorldGrid},
    },
};

/// What an `interact` call changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionOutcome {
    /// The cell that was broken and the block it held.
    pub broken: Option<(CellPos, BlockType)>,
    /// The cell that received a block and the block placed there.
    pub placed: Option<(CellPos, BlockType)>,
}

/// Breaks and/or places a block at `target`.
///
/// Break runs first: the hit cell becomes Air and the first inventory slot holding the
/// broken type is credited (a block with no matching slot is discarded). Place then
/// puts one block from `selected_slot` into the cell before the hit, provided the slot
/// is not empty and that cell is still Air. Both use the same `target`; no re-cast
/// happens between them.
///
/// Missing targets, empty slots and occupied cells make the corresponding half a no-op.
pub fn interact(
    target: Option<RaycastHit>,
    break_requested: bool,
    place_requested: bool,
    world: &mut WorldGrid,
    inventory: &mut Inventory,
    selected_slot: usize,
) -> InteractionOutcome {
    let mut outcome = InteractionOutcome::default();
    let Some(target) = target else {
        return outcome;
    };

    if break_requested {
        if let Some(block) = world.get(target.hit).filter(|block| block.is_solid()) {
            world.set(target.hit, BlockType::Air);
            outcome.broken = Some((target.hit, block));
            match inventory.add_block(block) {
                Some(slot) => debug!("Broke {} at {:?} into slot {}", block, target.hit, slot),
                None => debug!("Broke {} at {:?}, no slot holds it", block, target.hit),
            }
        }
    }

    if place_requested {
        if let Some(cell) = target.before_hit {
            outcome.placed = place(cell, world, inventory, selected_slot);
        }
    }

    outcome
}

fn place(
    cell: CellPos,
    world: &mut WorldGrid,
    inventory: &mut Inventory,
    selected_slot: usize,
) -> Option<(CellPos, BlockType)> {
    if world.get(cell) != Some(BlockType::Air) {
        return None;
    }
    let block = inventory.take_from(selected_slot)?;
    world.set(cell, block);
    debug!("Placed {} at {:?} from slot {}", block, cell, selected_slot);
    Some((cell, block))
}
