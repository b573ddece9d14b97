use std::collections::HashSet;
use std::sync::Arc;

use crate::config::{Config, GridSize};
use crate::food::Food;
use crate::grid::{Grid, project};
use crate::position::{Direction, Position};
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum GameOverReason {
    Wall,
    SelfCollision,
    Obstacle,
    /// The snake filled every free cell; callers usually treat this as a win.
    GridFull,
}

/// Direction of a speed adjustment.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SpeedChange {
    Faster,
    Slower,
}

/// Input events accepted by [`crate::game::update`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Event {
    ChangeDirection(Direction),
    MoveSnake,
    TogglePause,
    ChangeSpeed(SpeedChange),
    ResetGame,
}

/// Complete immutable game state at one point in time.
///
/// Every transition builds a new `Model`; the grid is re-projected from the
/// entities each time one is built, so it never drifts from them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Model {
    pub(crate) config: Arc<Config>,
    pub(crate) obstacles: Arc<HashSet<Position>>,
    pub(crate) grid: Grid,
    pub(crate) snake: Snake,
    pub(crate) food: Option<Food>,
    pub(crate) status: GameStatus,
    pub(crate) game_over: Option<GameOverReason>,
    pub(crate) score: u32,
    pub(crate) speed: u32,
    pub(crate) ticks: u64,
}

impl Model {
    pub(crate) fn assemble(
        config: Arc<Config>,
        obstacles: Arc<HashSet<Position>>,
        snake: Snake,
        food: Option<Food>,
        speed: u32,
    ) -> Self {
        let grid = project(&snake, food.as_ref(), &obstacles, config.grid_size());
        Self {
            config,
            obstacles,
            grid,
            snake,
            food,
            status: GameStatus::Running,
            game_over: None,
            score: 0,
            speed,
            ticks: 0,
        }
    }

    pub(crate) fn reprojected(mut self) -> Self {
        self.grid = project(
            &self.snake,
            self.food.as_ref(),
            &self.obstacles,
            self.config.grid_size(),
        );
        self
    }

    /// Returns a copy with `snake` placed on the board.
    ///
    /// Intended for scripted scenarios; the result is not checked, run it
    /// through [`crate::validate::check`] when in doubt.
    #[must_use]
    pub fn with_snake(&self, snake: Snake) -> Self {
        Self {
            snake,
            ..self.clone()
        }
        .reprojected()
    }

    /// Returns a copy with the food replaced.
    #[must_use]
    pub fn with_food(&self, food: Option<Food>) -> Self {
        Self {
            food,
            ..self.clone()
        }
        .reprojected()
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        self.config.grid_size()
    }

    /// Cell projection of the current entities.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// The food on the board; absent only after the grid filled up.
    #[must_use]
    pub fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    #[must_use]
    pub fn obstacles(&self) -> &HashSet<Position> {
        &self.obstacles
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Number of moves the snake has made since the last reset.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn wall_mode(&self) -> bool {
        self.config.wall_mode
    }

    #[must_use]
    pub fn wrap_mode(&self) -> bool {
        self.config.wrap_mode
    }
}
