use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board presets, given as `(cols, rows, bombs)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Intermediate,
    Expert,
    Custom(GameConfig),
}

impl Difficulty {
    pub fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((8, 8), 10),
            Self::Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Self::Expert => GameConfig::new_unchecked((16, 30), 90),
            Self::Custom(config) => config,
        }
    }

    /// Explicit `cols rows bombs` triple. Bombs above capacity are clamped.
    pub fn custom(cols: &str, rows: &str, bombs: &str) -> Result<Self> {
        let cols = parse_axis(cols)?;
        let rows = parse_axis(rows)?;
        let bombs = bombs
            .trim()
            .parse::<CellCount>()
            .map_err(|_| GameError::InvalidConfiguration)?;
        Ok(Self::Custom(GameConfig::new((cols, rows), bombs)))
    }

    /// Parses command-line style input: nothing, a single preset or triple, or three separate numbers.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        match args {
            [] => Ok(Self::default()),
            [single] => single.as_ref().parse(),
            [cols, rows, bombs] => Self::custom(cols.as_ref(), rows.as_ref(), bombs.as_ref()),
            _ => Err(GameError::InvalidConfiguration),
        }
    }

    /// Like [`Difficulty::from_args`], falling back to the default preset on bad input.
    pub fn from_args_or_default<S: AsRef<str>>(args: &[S]) -> Self {
        Self::from_args(args).unwrap_or_else(|err| {
            let fallback = Self::default();
            log::warn!("{}, falling back to {:?}", err, fallback);
            fallback
        })
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Intermediate
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        for (name, preset) in [
            ("easy", Self::Easy),
            ("intermediate", Self::Intermediate),
            ("expert", Self::Expert),
        ] {
            if s.eq_ignore_ascii_case(name) {
                return Ok(preset);
            }
        }

        let mut parts = s.split([',', 'x', 'X']);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(cols), Some(rows), Some(bombs), None) => Self::custom(cols, rows, bombs),
            (Some(_), None, ..) => Err(GameError::UnknownDifficulty),
            _ => Err(GameError::InvalidConfiguration),
        }
    }
}

fn parse_axis(s: &str) -> Result<Coord> {
    match s.trim().parse::<Coord>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(GameError::InvalidConfiguration),
    }
}
