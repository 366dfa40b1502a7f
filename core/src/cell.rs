use serde::{Deserialize, Serialize};

/// What the player currently sees of a cell. The three states are mutually exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Single grid unit owned by a [`Minefield`](crate::Minefield).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    visibility: Visibility,
    neighbor_mines: u8,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Adjacent mines, cached when the cell was last revealed.
    pub const fn neighbor_mine_count(&self) -> u8 {
        self.neighbor_mines
    }

    pub const fn is_discovered(&self) -> bool {
        matches!(self.visibility, Visibility::Revealed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.visibility, Visibility::Flagged)
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.visibility, Visibility::Hidden)
    }

    /// Returns the cell to its creation state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn set_mine(&mut self, mine: bool) {
        self.mine = mine;
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub(crate) fn open(&mut self, neighbor_mines: u8) {
        self.visibility = Visibility::Revealed;
        self.neighbor_mines = neighbor_mines;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_hidden_and_safe() {
        let cell = Cell::default();

        assert!(cell.is_hidden());
        assert!(!cell.is_mine());
        assert!(!cell.is_discovered());
        assert!(!cell.is_flagged());
        assert_eq!(cell.neighbor_mine_count(), 0);
    }

    #[test]
    fn open_caches_count() {
        let mut cell = Cell::default();

        cell.open(3);

        assert!(cell.is_discovered());
        assert_eq!(cell.visibility(), Visibility::Revealed);
        assert_eq!(cell.neighbor_mine_count(), 3);
    }

    #[test]
    fn reset_clears_everything() {
        let mut cell = Cell::default();
        cell.set_mine(true);
        cell.open(2);

        cell.reset();

        assert_eq!(cell, Cell::default());
    }
}
