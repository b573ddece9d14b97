use rand::Rng;

use crate::error::NoFreeCell;
use crate::grid::Grid;
use crate::position::Position;

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    /// Score granted when eaten.
    pub value: u32,
}

impl Food {
    #[must_use]
    pub fn new(position: Position, value: u32) -> Self {
        Self { position, value }
    }

    /// Spawns food worth `value` in a uniformly chosen empty cell of `grid`.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: &Grid,
        value: u32,
    ) -> Result<Self, NoFreeCell> {
        place_food(rng, grid).map(|position| Self::new(position, value))
    }
}

/// Picks a uniformly random empty cell of `grid`.
///
/// `grid` must be projected from the board the food will live on, after any
/// pending move has been applied.
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, grid: &Grid) -> Result<Position, NoFreeCell> {
    let candidates = grid.empty_positions();
    if candidates.is_empty() {
        return Err(NoFreeCell);
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
