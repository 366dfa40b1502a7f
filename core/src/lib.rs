#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use minefield::*;
pub use session::*;
pub use types::*;

mod cell;
mod difficulty;
mod error;
mod generator;
mod minefield;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a config that always describes a valid board, clamping out-of-range values.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size = (size_x.clamp(1, Coord::MAX), size_y.clamp(1, Coord::MAX));
        if size != (size_x, size_y) {
            log::warn!(
                "Board size {:?} is not valid, clamped to {:?}",
                (size_x, size_y),
                size
            );
        }

        let total_cells = mult(size.0, size.1);
        if mines > total_cells {
            log::warn!(
                "Minefield already full, requested {} mines but only {} fit",
                mines,
                total_cells
            );
        }
        Self::new_unchecked(size, mines.min(total_cells))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }

    pub const fn hit_mine(self) -> bool {
        matches!(self, Self::HitMine)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    /// The cell was already revealed and cannot carry a flag.
    Rejected,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !self.is_rejected()
    }

    pub const fn is_rejected(self) -> bool {
        matches!(self, Self::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_mines_to_capacity() {
        let config = GameConfig::new((8, 8), 100);

        assert_eq!(config.mines, 64);
        assert_eq!(config.total_cells(), 64);
    }

    #[test]
    fn config_clamps_size_to_one() {
        let config = GameConfig::new((0, -4), 3);

        assert_eq!(config.size, (1, 1));
        assert_eq!(config.mines, 1);
    }

    #[test]
    fn config_allows_empty_board() {
        assert_eq!(GameConfig::new((4, 4), 0).mines, 0);
    }

    #[test]
    fn outcomes_report_updates() {
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::HitMine.hit_mine());
        assert!(!RevealOutcome::Revealed.hit_mine());
        assert!(FlagOutcome::Unflagged.has_update());
        assert!(FlagOutcome::Rejected.is_rejected());
    }
}
