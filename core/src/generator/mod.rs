use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy used to lay out mines whenever a [`Minefield`] is populated.
pub trait MineGenerator {
    /// Marks up to `mines` entries of `mask` as mines.
    ///
    /// `mask` is zeroed and holds `size.0 * size.1` entries in row-major order.
    fn populate(&mut self, mask: &mut [bool], size: Coord2, mines: CellCount);
}
