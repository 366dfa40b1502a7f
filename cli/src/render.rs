use std::fmt::{self, Write};

use chrono::{DateTime, Utc};
use minesweeper_core::{Cell, Game, GameState, MineGenerator, Visibility};

fn cell_symbol(cell: &Cell) -> char {
    match cell.visibility() {
        Visibility::Hidden => '#',
        Visibility::Flagged => 'F',
        Visibility::Revealed if cell.is_mine() => 'B',
        Visibility::Revealed => match cell.neighbor_mine_count() {
            0 => '.',
            count => char::from(b'0' + count),
        },
    }
}

fn status_line(state: GameState) -> &'static str {
    match state {
        GameState::Ready => "ready, reveal a cell to begin",
        GameState::Playing => "playing",
        GameState::Won => "cleared! press n for a new board",
        GameState::Lost => "boom! press n for a new board",
    }
}

/// Text view of the board with a header row of column numbers.
pub(crate) struct BoardView<'a, G> {
    game: &'a Game<G>,
    now: DateTime<Utc>,
}

impl<G: MineGenerator> fmt::Display for BoardView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minefield = self.game.minefield();
        let (width, height) = minefield.size();

        writeln!(
            f,
            "mines left: {}  time: {}s  {}",
            self.game.mines_left(),
            self.game.elapsed(self.now).num_seconds(),
            status_line(self.game.state()),
        )?;

        f.write_str("   ")?;
        for x in 0..width {
            write!(f, "{:>3}", x)?;
        }
        f.write_char('\n')?;

        for y in 0..height {
            write!(f, "{:>3}", y)?;
            for x in 0..width {
                if let Ok(cell) = minefield.cell((x, y)) {
                    write!(f, "{:>3}", cell_symbol(cell))?;
                }
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

pub(crate) fn render<G: MineGenerator>(game: &Game<G>, now: DateTime<Utc>) -> BoardView<'_, G> {
    BoardView { game, now }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweeper_core::Minefield;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn renders_hidden_board() {
        let game = Game::new(Minefield::from_mine_coords((2, 2), &[(1, 1)]).unwrap());

        let text = render(&game, at(0)).to_string();

        assert_eq!(
            text,
            "mines left: 1  time: 0s  ready, reveal a cell to begin\n     0  1\n  0  #  #\n  1  #  #\n"
        );
    }

    #[test]
    fn renders_numbers_flags_and_mines() {
        let mut game = Game::new(Minefield::from_mine_coords((3, 1), &[(2, 0)]).unwrap());
        game.toggle_flag((2, 0), at(0)).unwrap();
        game.reveal((1, 0), at(2)).unwrap();

        let text = render(&game, at(2)).to_string();

        assert!(text.ends_with("  0  #  1  F\n"));
        assert!(text.starts_with("mines left: 0  time: 2s"));
    }

    #[test]
    fn lost_board_shows_mines() {
        let mut game = Game::new(Minefield::from_mine_coords((2, 1), &[(0, 0)]).unwrap());
        game.give_up(at(0)).unwrap();

        let text = render(&game, at(0)).to_string();

        assert!(text.ends_with("  0  B  1\n"));
        assert!(text.contains("boom!"));
    }
}
