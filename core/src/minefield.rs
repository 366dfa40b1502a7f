use alloc::collections::VecDeque;
use alloc::vec;
use ndarray::Array2;

use crate::*;

/// Fixed-size board of [`Cell`]s, stored row-major.
#[derive(Clone, Debug)]
pub struct Minefield<G = RandomMineGenerator> {
    cells: Array2<Cell>,
    config: GameConfig,
    generator: G,
}

impl Minefield<RandomMineGenerator> {
    /// Creates a randomly laid out minefield, reproducible from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, RandomMineGenerator::new(seed))
    }
}

impl Minefield<FixedMineGenerator> {
    /// Creates a minefield with mines at exactly `mine_coords`, also after every reset.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let generator = FixedMineGenerator::new(size, mine_coords)?;
        let config = GameConfig::new(size, generator.mine_count());
        if config.size != size {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self::with_generator(config, generator))
    }
}

impl<G: MineGenerator> Minefield<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Self {
        let config = GameConfig::new(config.size, config.mines);
        let mut minefield = Self {
            cells: Array2::default(config.size.to_nd_index()),
            config,
            generator,
        };
        minefield.populate();
        minefield
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.size.0
    }

    pub fn height(&self) -> Coord {
        self.config.size.1
    }

    pub fn total_cells(&self) -> CellCount {
        self.config.total_cells()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        is_within(self.size(), coords)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Position of `coords` in the row-major cell sequence.
    pub fn index_of(&self, coords: Coord2) -> Result<usize> {
        let (x, y) = self.validate_coords(coords)?;
        Ok(y as usize * self.width() as usize + x as usize)
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    /// All cells with their coordinates, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((y, x), cell)| ((x as Coord, y as Coord), cell))
    }

    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn neighbor_mine_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_adjacent_mines(coords))
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_discovered()).count() as CellCount
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    /// Whether every safe cell has been revealed.
    pub fn is_cleared(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine() || cell.is_discovered())
    }

    /// Reveals a hidden cell, flood-opening the surrounding region when it has no adjacent mines.
    ///
    /// Flagged and already revealed cells are left untouched.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self.cells[coords.to_nd_index()];

        if !cell.is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        let count = self.open_cell(coords);
        if cell.is_mine() {
            log::debug!("Revealed mine at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        log::debug!("Revealed cell at {:?}, mine count: {}", coords, count);
        if count == 0 {
            self.flood_reveal(coords);
        }
        Ok(RevealOutcome::Revealed)
    }

    /// Reveals every cell regardless of its state, refreshing cached counts.
    pub fn reveal_all(&mut self) {
        let (x_end, y_end) = self.size();
        for y in 0..y_end {
            for x in 0..x_end {
                self.open_cell((x, y));
            }
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match cell.visibility() {
            Visibility::Hidden => {
                cell.set_visibility(Visibility::Flagged);
                Flagged
            }
            Visibility::Flagged => {
                cell.set_visibility(Visibility::Hidden);
                Unflagged
            }
            Visibility::Revealed => Rejected,
        })
    }

    /// Starts over with a fresh layout of the same size and mine count.
    pub fn reset_all(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
        self.populate();
    }

    fn populate(&mut self) {
        let mut mask = vec![false; self.cells.len()];
        self.generator
            .populate(&mut mask, self.size(), self.config.mines);

        for (cell, &mine) in self.cells.iter_mut().zip(&mask) {
            cell.set_mine(mine);
        }

        // double check mine count
        let count = mask.iter().filter(|&&mine| mine).count() as CellCount;
        if count != self.config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                count,
                self.config.mines
            );
            self.config.mines = count;
        }
    }

    fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_mine())
            .count() as u8
    }

    fn open_cell(&mut self, coords: Coord2) -> u8 {
        let count = self.count_adjacent_mines(coords);
        self.cells[coords.to_nd_index()].open(count);
        count
    }

    fn flood_reveal(&mut self, origin: Coord2) {
        let mut to_visit: VecDeque<_> = self.hidden_neighbors(origin).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = self.cells[visit_coords.to_nd_index()];
            // queued more than once, flagged meanwhile, or a mine
            if !cell.is_hidden() || cell.is_mine() {
                continue;
            }

            let count = self.open_cell(visit_coords);
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                visit_coords,
                count
            );

            if count == 0 {
                to_visit.extend(self.hidden_neighbors(visit_coords));
            }
        }
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden())
    }
}
