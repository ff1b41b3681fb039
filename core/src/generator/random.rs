use super::*;
use ndarray::Array2;
use rand::prelude::*;

/// Uniform random placement by rejection sampling: draw positions until the
/// requested number of distinct mines is placed. The validated precondition
/// `mines < rows * cols` keeps the loop finite, though callers should avoid
/// near-saturated boards where rejection gets slow.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Board> {
        config.validate()?;

        let (rows, cols) = config.size;
        let mut mask: Array2<bool> = Array2::default(config.size.to_nd_index());

        let mut placed = 0;
        while placed < config.mines {
            let row = self.rng.random_range(0..rows);
            let col = self.rng.random_range(0..cols);
            let slot = &mut mask[(row, col).to_nd_index()];
            if !*slot {
                *slot = true;
                placed += 1;
            }
        }

        let board = Board::from_mine_mask(mask);
        log::debug!(
            "generated {}x{} board with {} mines",
            rows,
            cols,
            board.mine_count()
        );
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mine_count() {
        let mut generator = RandomBoardGenerator::new(7);
        let config = GameConfig::new((16, 30), 99);

        let board = generator.generate(config).unwrap();

        assert_eq!(board.mine_count(), 99);
        assert_eq!(board.iter_mines().count(), 99);
        assert_eq!(board.size(), (16, 30));
    }

    #[test]
    fn same_seed_reproduces_the_layout() {
        let config = GameConfig::new((9, 9), 10);

        let first = RandomBoardGenerator::new(42).generate(config).unwrap();
        let second = RandomBoardGenerator::new(42).generate(config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn rejects_mine_count_filling_the_board() {
        let mut generator = RandomBoardGenerator::new(0);

        let err = generator.generate(GameConfig::new((2, 2), 4)).unwrap_err();

        assert_eq!(
            err,
            GameError::InvalidConfig {
                rows: 2,
                cols: 2,
                mines: 4
            }
        );
    }

    #[test]
    fn rejects_zero_dimension() {
        let mut generator = RandomBoardGenerator::new(0);

        assert!(generator.generate(GameConfig::new((0, 8), 1)).is_err());
        assert!(generator.generate(GameConfig::new((8, 0), 1)).is_err());
    }

    #[test]
    fn near_saturated_board_still_terminates() {
        let mut generator = RandomBoardGenerator::new(3);

        let board = generator.generate(GameConfig::new((3, 3), 8)).unwrap();

        assert_eq!(board.mine_count(), 8);
        assert_eq!(board.safe_cell_count(), 1);
    }
}
