use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Defaults read from a TOML file, overridden by command-line arguments.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Preset name or `cols,rows,bombs`
    pub(crate) difficulty: Option<String>,
    pub(crate) seed: Option<u64>,
}

impl Settings {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields() {
        let settings = Settings::parse("difficulty = \"expert\"\nseed = 42\n").unwrap();

        assert_eq!(settings.difficulty.as_deref(), Some("expert"));
        assert_eq!(settings.seed, Some(42));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::parse("theme = \"dark\"").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load(Path::new("/nonexistent/minesweeper.toml")).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/minesweeper.toml"));
    }
}
