use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use clock::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use leaderboard::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod clock;
mod config;
mod error;
mod generator;
mod leaderboard;
mod session;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board dimensions as `(rows, cols)`.
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// A board must have at least one row and column, and fewer mines than
    /// cells so that at least one safe cell exists.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 || self.mines >= self.total_cells() {
            Err(GameError::InvalidConfig {
                rows,
                cols,
                mines: self.mines,
            })
        } else {
            Ok(())
        }
    }
}

/// A fully populated board: mines placed and adjacency counts computed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Derives the numbered cells from a mine mask, counting each non-mine
    /// cell's in-bounds mined neighbors.
    pub fn from_mine_mask(mask: Array2<bool>) -> Self {
        let dim = mask.dim();
        let bounds: Coord2 = (
            dim.0.try_into().expect("row count fits Coord"),
            dim.1.try_into().expect("col count fits Coord"),
        );

        let mut mine_count = 0;
        let cells = Array2::from_shape_fn(dim, |(r, c)| {
            let coords = (r as Coord, c as Coord);
            if mask[(r, c)] {
                mine_count += 1;
                Cell::Mine
            } else {
                let adjacent = neighbors(coords, bounds)
                    .filter(|&pos| mask[pos.to_nd_index()])
                    .count() as u8;
                Cell::Number(adjacent)
            }
        });

        Self { cells, mine_count }
    }

    /// Builds a board with mines at exactly the given positions. Intended for
    /// tests and scripted setups where the layout must be known in advance.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Self {
        let mut mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            mask[coords.to_nd_index()] = true;
        }
        Self::from_mine_mask(mask)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Cells that must be revealed to win.
    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_mine()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> {
        neighbors(coords, self.size())
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|((r, c), _)| (r as Coord, c as Coord))
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of a reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    MineHit,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::MineHit | Self::Won)
    }
}
