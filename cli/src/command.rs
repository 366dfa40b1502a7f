use std::str::FromStr;

use anyhow::{Context, Result, bail};
use minesweeper_core::{Coord, Coord2};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Start,
    GiveUp,
    NewGame,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
commands:
  r X Y   reveal the cell at column X, row Y
  f X Y   flag or unflag the cell at column X, row Y
  s       start the clock
  g       give up and show the board
  n       new board
  h       this help
  q       quit";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("Empty command");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut words)?),
            "s" | "start" => Self::Start,
            "g" | "give-up" => Self::GiveUp,
            "n" | "new" => Self::NewGame,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("Unknown command {:?}", other),
        };

        if let Some(extra) = words.next() {
            bail!("Unexpected argument {:?}", extra);
        }
        Ok(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let mut next = |axis: &str| -> Result<Coord> {
        let word = words.next().with_context(|| format!("Missing {} coordinate", axis))?;
        word.parse::<Coord>()
            .with_context(|| format!("Invalid {} coordinate {:?}", axis, word))
    };
    Ok((next("x")?, next("y")?))
}
