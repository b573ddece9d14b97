use std::collections::HashSet;

use thiserror::Error;

use crate::grid::project;
use crate::model::{GameStatus, Model};
use crate::position::Position;

/// First structural invariant found broken on a board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum Violation {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u16, height: u16 },

    #[error("grid is {actual_width}x{actual_height} but configured as {width}x{height}")]
    GridSizeMismatch {
        width: u16,
        height: u16,
        actual_width: u16,
        actual_height: u16,
    },

    #[error("cell {index} does not hold its own position")]
    CellOutOfPlace { index: usize },

    #[error("grid cells differ from the projection of the entities")]
    StaleGrid,

    #[error("{position} lies outside the grid")]
    OutOfBounds { position: Position },

    #[error("snake segment {index} is not adjacent to the next one")]
    Discontinuous { index: usize },

    #[error("more than one entity occupies {position}")]
    Overlap { position: Position },

    #[error("a running game has no food")]
    MissingFood,

    #[error("game-over reason does not match status {status:?}")]
    ReasonMismatch { status: GameStatus },

    #[error("speed {speed} is outside {min}..={max}")]
    SpeedOutOfRange { speed: u32, min: u32, max: u32 },
}

/// Returns true when every structural invariant of `model` holds.
#[must_use]
pub fn validate(model: &Model) -> bool {
    check(model).is_ok()
}

/// Checks every structural invariant of `model` and reports the first one
/// that fails.
///
/// Status and direction are closed enums, so their membership holds by
/// construction.
pub fn check(model: &Model) -> Result<(), Violation> {
    let size = model.grid_size();
    if size.width == 0 || size.height == 0 {
        return Err(Violation::ZeroDimension {
            width: size.width,
            height: size.height,
        });
    }

    let grid = model.grid();
    if grid.size() != size {
        return Err(Violation::GridSizeMismatch {
            width: size.width,
            height: size.height,
            actual_width: grid.size().width,
            actual_height: grid.size().height,
        });
    }
    for (index, (cell, expected)) in grid.cells().zip(size.positions()).enumerate() {
        if cell.position != expected {
            return Err(Violation::CellOutOfPlace { index });
        }
    }

    let snake = model.snake();
    let segments: Vec<Position> = snake.segments().copied().collect();
    for &position in segments.iter().chain(model.obstacles()) {
        if !position.is_within_bounds(size) {
            return Err(Violation::OutOfBounds { position });
        }
    }
    for (index, pair) in segments.windows(2).enumerate() {
        if !pair[0].is_adjacent(pair[1], size, model.wrap_mode()) {
            return Err(Violation::Discontinuous { index });
        }
    }

    let mut seen: HashSet<Position> = model.obstacles().clone();
    for &position in &segments {
        if !seen.insert(position) {
            return Err(Violation::Overlap { position });
        }
    }

    match model.food() {
        Some(food) => {
            if !food.position.is_within_bounds(size) {
                return Err(Violation::OutOfBounds {
                    position: food.position,
                });
            }
            if seen.contains(&food.position) {
                return Err(Violation::Overlap {
                    position: food.position,
                });
            }
        }
        None if model.status() != GameStatus::GameOver => return Err(Violation::MissingFood),
        None => {}
    }

    if model.is_over() != model.game_over_reason().is_some() {
        return Err(Violation::ReasonMismatch {
            status: model.status(),
        });
    }

    let config = model.config();
    if !(config.min_speed..=config.max_speed).contains(&model.speed()) {
        return Err(Violation::SpeedOutOfRange {
            speed: model.speed(),
            min: config.min_speed,
            max: config.max_speed,
        });
    }

    if *grid != project(snake, model.food(), model.obstacles(), size) {
        return Err(Violation::StaleGrid);
    }

    Ok(())
}
