use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::Path;

use thiserror::Error;

use crate::{CellCount, Coord, GameConfig};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),
    #[error("expected {expected} integer fields, found {found}")]
    MissingFields { expected: usize, found: usize },
    #[error("invalid integer in field {field}: {source}")]
    BadInteger {
        field: &'static str,
        source: ParseIntError,
    },
}

/// Startup parameters read from the board configuration source: four
/// whitespace-separated integers `columns rows mines tile_count`. The tile
/// count is carried for display layers but unused by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StartupOptions {
    pub columns: Coord,
    pub rows: Coord,
    pub mines: CellCount,
    pub tile_count: u32,
}

impl StartupOptions {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ConfigError::MissingFields {
                expected: 4,
                found: fields.len(),
            });
        }

        fn field<T: std::str::FromStr<Err = ParseIntError>>(
            raw: &str,
            name: &'static str,
        ) -> Result<T, ConfigError> {
            raw.parse().map_err(|source| ConfigError::BadInteger {
                field: name,
                source,
            })
        }

        Ok(Self {
            columns: field(fields[0], "columns")?,
            rows: field(fields[1], "rows")?,
            mines: field(fields[2], "mines")?,
            tile_count: field(fields[3], "tile_count")?,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Engine-facing view of the options. Validity (mine count versus board
    /// area) is checked by the board generator, not here.
    pub fn game_config(&self) -> GameConfig {
        GameConfig::new((self.rows, self.columns), self.mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_four_whitespace_separated_integers() {
        let options = StartupOptions::parse("25 16 50 400").unwrap();

        assert_eq!(options.columns, 25);
        assert_eq!(options.rows, 16);
        assert_eq!(options.mines, 50);
        assert_eq!(options.tile_count, 400);
        assert_eq!(options.game_config(), GameConfig::new((16, 25), 50));
    }

    #[test]
    fn accepts_newline_separated_fields() {
        let options = StartupOptions::parse("8\n8\n10\n64\n").unwrap();

        assert_eq!(options.game_config().size, (8, 8));
    }

    #[test]
    fn rejects_missing_fields() {
        let err = StartupOptions::parse("25 16").unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingFields {
                expected: 4,
                found: 2
            }
        ));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let err = StartupOptions::parse("25 sixteen 50 400").unwrap_err();

        assert!(matches!(err, ConfigError::BadInteger { field: "rows", .. }));
    }

    #[test]
    fn invalid_mine_budget_surfaces_through_the_generator() {
        use crate::{BoardGenerator, RandomBoardGenerator};

        let options = StartupOptions::parse("2 2 4 4").unwrap();
        let mut generator = RandomBoardGenerator::new(0);

        assert!(generator.generate(options.game_config()).is_err());
    }
}
