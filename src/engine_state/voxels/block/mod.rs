//! # Block Module
//!
//! Block type definitions and the static per-type metadata that travels with them.

pub mod block_type;

pub use block_type::BlockType;

/// An RGB color with components in `[0, 1]`.
pub type BlockColor = [f32; 3];
