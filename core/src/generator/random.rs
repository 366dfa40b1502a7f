use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Marks the first `mines` cells and then shuffles the whole board.
///
/// The rng is kept between populations, so every reset of the same minefield gets a new layout.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn populate(&mut self, mask: &mut [bool], _size: Coord2, mines: CellCount) {
        let mines = mines as usize;
        for (i, tile) in mask.iter_mut().enumerate() {
            *tile = i < mines;
        }

        // full and empty boards have a single layout
        if mines == 0 || mines >= mask.len() {
            return;
        }

        mask.shuffle(&mut self.rng);
    }
}
