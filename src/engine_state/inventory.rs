//! # Inventory
//!
//! A fixed, ordered set of per-type bins. Slots are created once from the starter set
//! and only their counts change afterwards: breaking a block credits the first slot of
//! the same type, placing a block debits the selected slot.

use serde::{Deserialize, Serialize};

use super::voxels::block::BlockType;

/// A single bin holding some number of blocks of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    /// The type held by this slot. Fixed for the slot's lifetime.
    pub block_type: BlockType,
    /// How many blocks of `block_type` the slot holds.
    pub count: u32,
}

impl InventorySlot {
    /// Creates a slot holding `count` blocks of `block_type`.
    pub fn new(block_type: BlockType, count: u32) -> Self {
        Self { block_type, count }
    }
}

/// The player's ordered list of block bins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<InventorySlot>,
}

impl Inventory {
    /// Creates an inventory from its starter slots.
    pub fn new(slots: Vec<InventorySlot>) -> Self {
        Self { slots }
    }

    /// All slots, in display order.
    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    /// Slot at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&InventorySlot> {
        self.slots.get(index)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Credits one block to the first slot holding `block_type`.
    ///
    /// Returns the index of the credited slot, or `None` when no slot holds that type,
    /// in which case the block is simply lost. No new slot is ever created.
    pub fn add_block(&mut self, block_type: BlockType) -> Option<usize> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.block_type == block_type)?;
        let slot = &mut self.slots[index];
        slot.count = slot.count.saturating_add(1);
        Some(index)
    }

    /// Debits one block from slot `index` and returns its type.
    ///
    /// Returns `None`, leaving the inventory untouched, when the index is out of range
    /// or the slot is empty.
    pub fn take_from(&mut self, index: usize) -> Option<BlockType> {
        let slot = self.slots.get_mut(index)?;
        if slot.count == 0 {
            return None;
        }
        slot.count -= 1;
        Some(slot.block_type)
    }
}
