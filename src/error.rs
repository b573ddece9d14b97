use thiserror::Error;

use crate::model::Model;
use crate::position::Position;

/// A configuration that cannot produce a valid starting board.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u16, height: u16 },

    #[error("initial snake length must be at least 1")]
    ZeroSnakeLength,

    #[error("snake of length {length} does not fit on a row of width {width}")]
    SnakeTooLong { length: u16, width: u16 },

    #[error("{occupied} occupied cells leave no room for food on a {cells}-cell grid")]
    NoRoomForFood { occupied: usize, cells: usize },

    #[error("wall mode and wrap mode cannot both be enabled")]
    ConflictingBoundaryModes,

    #[error("either wall mode or wrap mode must be enabled")]
    NoBoundaryMode,

    #[error("minimum speed {min} exceeds maximum speed {max}")]
    InvalidSpeedBounds { min: u32, max: u32 },

    #[error("initial speed {speed} is outside {min}..={max}")]
    InitialSpeedOutOfRange { speed: u32, min: u32, max: u32 },

    #[error("speed step must be positive")]
    ZeroSpeedStep,

    #[error("food value must be positive")]
    ZeroFoodValue,

    #[error("obstacle at {position} lies outside the grid")]
    ObstacleOutOfBounds { position: Position },

    #[error("obstacle at {position} overlaps the starting snake")]
    ObstacleOnSnake { position: Position },
}

/// Food placement found no empty cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("no free cell left for food")]
pub struct NoFreeCell;

/// Exceptional outcome of a transition.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The snake ate and the board has no empty cell left for new food.
    ///
    /// `filled` is the post-move board, already in `GameOver` with
    /// `GameOverReason::GridFull` and no food.
    #[error("grid is full, no cell left for new food")]
    GridFull { filled: Box<Model> },

    /// A reset rebuilt the board from a configuration that no longer holds.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
