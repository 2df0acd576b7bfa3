//! # World Module
//!
//! This module provides the `WorldGrid`, the dense fixed-size block storage that owns
//! all terrain state of a session.
//!
//! ## Layout
//!
//! Cells live in a single flat `Vec<BlockType>`. A cell `(x, y, z)` is stored at
//! `x + z * size + y * size * size`, so a horizontal layer is contiguous. The grid is
//! never resized after construction.
//!
//! ## Bounds
//!
//! Every read and write goes through `WorldGrid::index`, which returns `None` for
//! coordinates outside `[0, size) × [0, height) × [0, size)`. Out-of-range access is
//! therefore a no-op (writes) or `None` (reads) rather than a panic.

use cgmath::Point3;

use super::block::BlockType;

/// Integer coordinates of a single cell.
pub type CellPos = Point3<i32>;

/// Horizontal extent (x and z) of the reference world.
pub const WORLD_SIZE: usize = 32;
/// Vertical extent (y) of the reference world.
pub const WORLD_HEIGHT: usize = 32;
/// Largest number of cells a configured world may hold.
pub const MAX_WORLD_CELLS: usize = 1 << 26;

/// Returns the cell containing the continuous point `position`.
///
/// Coordinates are floored, so `-0.5` maps to cell `-1` (outside the grid) rather than
/// being truncated towards zero. Float to int casts saturate, so arbitrarily distant
/// points still produce a well-defined (out of bounds) cell.
#[inline]
pub fn cell_at(position: Point3<f32>) -> CellPos {
    Point3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}

/// A dense `size × height × size` grid of blocks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::{BlockType, WorldGrid};
///
/// let mut world = WorldGrid::new(32, 32);
/// world.set(Point3::new(5, 5, 5), BlockType::Stone);
/// assert_eq!(world.get(Point3::new(5, 5, 5)), Some(BlockType::Stone));
/// assert_eq!(world.get(Point3::new(-1, 5, 5)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldGrid {
    size: usize,
    height: usize,
    cells: Vec<BlockType>,
}

impl WorldGrid {
    /// Creates a grid of the given extents with every cell set to `Air`.
    ///
    /// # Panics
    ///
    /// Panics if `size * size * height` overflows `usize`. Extents that pass
    /// `SimulationConfig::validate` never do.
    pub fn new(size: usize, height: usize) -> Self {
        let Some(cell_count) = Self::cell_count(size, height) else {
            panic!("world of {size}x{height}x{size} cells overflows usize");
        };
        WorldGrid {
            size,
            height,
            cells: vec![BlockType::Air; cell_count],
        }
    }

    /// Number of cells in a grid of the given extents, `None` on overflow.
    pub fn cell_count(size: usize, height: usize) -> Option<usize> {
        size.checked_mul(size)?.checked_mul(height)
    }

    /// Horizontal extent along x and z.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Vertical extent along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if `pos` addresses a cell of this grid.
    pub fn contains(&self, pos: CellPos) -> bool {
        self.index(pos).is_some()
    }

    /// Reads the block at `pos`, or `None` when `pos` is out of bounds.
    pub fn get(&self, pos: CellPos) -> Option<BlockType> {
        self.index(pos).map(|index| self.cells[index])
    }

    /// Writes `block` at `pos` and returns the block it replaced.
    ///
    /// Out-of-bounds writes are dropped and return `None`.
    pub fn set(&mut self, pos: CellPos, block: BlockType) -> Option<BlockType> {
        let index = self.index(pos)?;
        Some(std::mem::replace(&mut self.cells[index], block))
    }

    /// Returns `true` if `pos` is in bounds and holds a solid block.
    pub fn is_solid(&self, pos: CellPos) -> bool {
        self.get(pos).is_some_and(BlockType::is_solid)
    }

    /// Raw view of the backing storage, in storage order.
    pub fn cells(&self) -> &[BlockType] {
        &self.cells
    }

    /// Number of cells holding `block`.
    pub fn count(&self, block: BlockType) -> usize {
        self.cells.iter().filter(|&&cell| cell == block).count()
    }

    /// The single bounds check guarding every access to `cells`.
    fn index(&self, pos: CellPos) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        let z = usize::try_from(pos.z).ok()?;
        if x >= self.size || y >= self.height || z >= self.size {
            return None;
        }
        Some(x + z * self.size + y * self.size * self.size)
    }
}

impl Default for WorldGrid {
    fn default() -> Self {
        WorldGrid::new(WORLD_SIZE, WORLD_HEIGHT)
    }
}
