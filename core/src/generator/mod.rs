use crate::*;
pub use random::*;

mod random;

/// Produces a populated board from a validated configuration.
pub trait BoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Board>;
}
