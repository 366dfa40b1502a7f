use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// How many fresh layouts the first move may burn through before a mine hit counts.
const FIRST_MOVE_ATTEMPTS: u32 = 64;

/// Valid transitions:
/// - Ready -> Playing
/// - Ready -> Won
/// - Ready -> Lost
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Ready, via [`Game::reset`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Fresh board, clock not running
    Ready,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Represents a game from start to finish on top of a [`Minefield`].
#[derive(Clone, Debug)]
pub struct Game<G = RandomMineGenerator> {
    minefield: Minefield<G>,
    state: GameState,
    clicks: u32,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl<G: MineGenerator> Game<G> {
    pub fn new(minefield: Minefield<G>) -> Self {
        Self {
            minefield,
            state: Default::default(),
            clicks: 0,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn minefield(&self) -> &Minefield<G> {
        &self.minefield
    }

    /// Moves made on the current board
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> i64 {
        i64::from(self.minefield.mine_count()) - i64::from(self.minefield.flagged_count())
    }

    /// Time played, zero before the first move and frozen once the game ends.
    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        match self.started_at {
            Some(started_at) => (self.ended_at.unwrap_or(now) - started_at).max(TimeDelta::zero()),
            None => TimeDelta::zero(),
        }
    }

    /// Starts the clock on a ready board; does nothing otherwise.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.state.is_ready() {
            self.state = GameState::Playing;
            self.started_at = Some(now);
            log::debug!("Game started");
        }
    }

    pub fn reveal(&mut self, coords: Coord2, now: DateTime<Utc>) -> Result<RevealOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        self.check_not_finished()?;
        self.start(now);

        let mut outcome = self.minefield.reveal(coords)?;
        if self.clicks == 0 {
            outcome = self.retry_first_move(coords, outcome)?;
        }
        self.clicks += 1;

        if outcome.hit_mine() {
            self.end_game(false, now);
        } else if self.minefield.is_cleared() {
            self.end_game(true, now);
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2, now: DateTime<Utc>) -> Result<FlagOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        self.check_not_finished()?;
        self.start(now);

        let outcome = self.minefield.toggle_flag(coords)?;
        self.clicks += 1;
        Ok(outcome)
    }

    /// Ends the game as lost, showing the whole board.
    pub fn give_up(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.check_not_finished()?;
        self.start(now);
        self.end_game(false, now);
        Ok(())
    }

    /// Throws the board away and goes back to [`GameState::Ready`] with a fresh layout.
    pub fn reset(&mut self) {
        self.state = GameState::Ready;
        self.clicks = 0;
        self.started_at = None;
        self.ended_at = None;
        self.minefield.reset_all();
        log::debug!("Game reset");
    }

    /// The first reveal of a board never loses while another layout can still be drawn.
    fn retry_first_move(
        &mut self,
        coords: Coord2,
        mut outcome: RevealOutcome,
    ) -> Result<RevealOutcome> {
        let mut attempts = 0;
        while outcome.hit_mine() && attempts < FIRST_MOVE_ATTEMPTS {
            if self.minefield.safe_cell_count() == 0 {
                break;
            }
            log::debug!("First move at {:?} hit a mine, regenerating", coords);
            self.minefield.reset_all();
            outcome = self.minefield.reveal(coords)?;
            attempts += 1;
        }

        if outcome.hit_mine() && attempts > 0 {
            log::warn!(
                "Could not find a safe layout for {:?} after {} attempts",
                coords,
                attempts
            );
        }
        Ok(outcome)
    }

    fn end_game(&mut self, won: bool, now: DateTime<Utc>) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        self.ended_at = Some(now);
        log::info!("Game {:?} after {} moves", self.state, self.clicks);

        if !won {
            self.minefield.reveal_all();
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    fn fixed(size: Coord2, mines: &[Coord2]) -> Game<FixedMineGenerator> {
        Game::new(Minefield::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn new_game_is_ready_with_no_time() {
        let game = fixed((3, 3), &[(2, 2)]);

        assert_eq!(game.state(), GameState::Ready);
        assert_eq!(game.elapsed(at(100)), TimeDelta::zero());
        assert_eq!(game.mines_left(), 1);
    }

    #[test]
    fn start_runs_clock() {
        let mut game = fixed((3, 3), &[(2, 2)]);

        game.start(at(10));

        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.elapsed(at(15)), TimeDelta::seconds(5));
    }

    #[test]
    fn clearing_board_wins_and_freezes_clock() {
        let mut game = fixed((3, 3), &[(2, 2)]);

        let outcome = game.reveal((0, 0), at(0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.elapsed(at(30)), TimeDelta::zero());
        assert_eq!(game.reveal((1, 1), at(31)), Err(GameError::AlreadyEnded));
        assert_eq!(game.toggle_flag((2, 2), at(31)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn mine_hit_after_first_move_loses_and_reveals_all() {
        let mut game = fixed((4, 1), &[(0, 0), (3, 0)]);

        assert_eq!(game.reveal((1, 0), at(0)), Ok(RevealOutcome::Revealed));
        assert_eq!(game.reveal((0, 0), at(7)), Ok(RevealOutcome::HitMine));

        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.elapsed(at(60)), TimeDelta::seconds(7));
        assert!(game.minefield().iter_cells().all(|(_, cell)| cell.is_discovered()));
    }

    #[test]
    fn first_move_is_protected_on_random_boards() {
        for seed in 0..20 {
            let mut game = Game::new(Minefield::new(GameConfig::new((5, 5), 20), seed));

            let outcome = game.reveal((2, 2), at(0)).unwrap();

            assert!(!outcome.hit_mine());
            assert_ne!(game.state(), GameState::Lost);
            assert_eq!(game.minefield().mine_count(), 20);
        }
    }

    #[test]
    fn first_move_gives_up_on_full_board() {
        let mut game = Game::new(Minefield::new(GameConfig::new((2, 2), 4), 1));

        assert_eq!(game.reveal((0, 0), at(0)), Ok(RevealOutcome::HitMine));
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn first_move_retries_are_bounded_for_fixed_layouts() {
        let mut game = fixed((2, 2), &[(0, 0)]);

        assert_eq!(game.reveal((0, 0), at(0)), Ok(RevealOutcome::HitMine));
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn flags_count_as_moves_and_reduce_mines_left() {
        let mut game = fixed((3, 3), &[(2, 2)]);

        assert_eq!(game.toggle_flag((1, 1), at(0)), Ok(FlagOutcome::Flagged));
        assert_eq!(game.reveal((1, 1), at(1)), Ok(RevealOutcome::NoChange));

        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.clicks(), 2);
        assert_eq!(game.mines_left(), 0);
        assert!(game.minefield().cell((1, 1)).unwrap().is_flagged());
    }

    #[test]
    fn out_of_bounds_moves_are_not_counted() {
        let mut game = fixed((3, 3), &[(2, 2)]);

        assert_eq!(game.reveal((3, 0), at(0)), Err(GameError::OutOfBounds));
        assert_eq!(game.toggle_flag((0, -1), at(0)), Err(GameError::OutOfBounds));

        assert_eq!(game.clicks(), 0);
        assert_eq!(game.state(), GameState::Ready);
    }

    #[test]
    fn give_up_loses() {
        let mut game = fixed((3, 3), &[(2, 2)]);

        game.give_up(at(3)).unwrap();

        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.give_up(at(4)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn reset_returns_to_ready() {
        let mut game = fixed((3, 3), &[(2, 2)]);
        game.reveal((0, 0), at(0)).unwrap();

        game.reset();

        assert_eq!(game.state(), GameState::Ready);
        assert_eq!(game.clicks(), 0);
        assert_eq!(game.elapsed(at(50)), TimeDelta::zero());
        assert_eq!(game.minefield().revealed_count(), 0);
    }
}
