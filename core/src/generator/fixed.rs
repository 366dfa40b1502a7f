use alloc::vec::Vec;

use super::*;

/// Always produces the same layout, used for replays and deterministic boards.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    size: Coord2,
    mine_coords: Vec<Coord2>,
}

impl FixedMineGenerator {
    /// Validates `mine_coords` against `size`, dropping duplicates.
    pub fn new(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if let Some(&coords) = mine_coords.iter().find(|&&coords| !is_within(size, coords)) {
            log::debug!("Fixed mine at {:?} is outside a {:?} board", coords, size);
            return Err(GameError::OutOfBounds);
        }

        let mut mine_coords = mine_coords.to_vec();
        mine_coords.sort_unstable();
        mine_coords.dedup();
        Ok(Self { size, mine_coords })
    }

    /// Board size the coordinates were validated against.
    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_coords.len() as CellCount
    }
}

impl MineGenerator for FixedMineGenerator {
    fn populate(&mut self, mask: &mut [bool], size: Coord2, _mines: CellCount) {
        if size != self.size {
            log::warn!(
                "Fixed layout for a {:?} board used on a {:?} board, dropping mines outside it",
                self.size,
                size
            );
        }

        let width = size.0 as usize;
        for &(x, y) in self.mine_coords.iter().filter(|&&coords| is_within(size, coords)) {
            if let Some(tile) = mask.get_mut(y as usize * width + x as usize) {
                *tile = true;
            }
        }
    }
}
