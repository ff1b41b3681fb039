use serde::{Deserialize, Serialize};

/// Board content of a single position: a mine, or the count of adjacent mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Mine,
    Number(u8),
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Adjacent mine count, `None` for mine cells.
    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Number(n) => Some(n),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Number(0)
    }
}

/// Player-visible overlay state of a single position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Hidden,
    Flagged,
    Revealed,
}

impl TileState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Hidden
    }
}
