//! # Voxels
//!
//! The voxel world data model and the algorithms that read it:
//!
//! * **Block**: the block type enum and its static metadata
//! * **World**: the dense, bounds-checked block grid
//! * **Terrain**: one-shot heightmap based population of the grid
//! * **Raycast**: block targeting along the player's view ray

pub mod block;
pub mod raycast;
pub mod terrain;
pub mod world;
