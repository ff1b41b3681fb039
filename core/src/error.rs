use crate::{CellCount, Coord};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid configuration: {rows}x{cols} board cannot hold {mines} mines")]
    InvalidConfig {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
