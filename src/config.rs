use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::position::Position;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 15;

/// Default number of segments (head included) at game start.
pub const DEFAULT_SNAKE_LENGTH: u16 = 3;

/// Slowest tick interval in milliseconds, used at the minimum speed.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Fastest allowed tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Tick interval reduction per speed unit above the minimum.
pub const TICK_INTERVAL_STEP_MS: u64 = 15;

/// Number of entries kept on the leaderboard.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Row-major index of an in-bounds position.
    #[must_use]
    pub fn index_of(self, position: Position) -> Option<usize> {
        if !position.is_within_bounds(self) {
            return None;
        }
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        Some(y * usize::from(self.width) + x)
    }

    /// Iterates every position in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.width);
        let height = i32::from(self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }
}

/// Game configuration consumed by `init` and preserved across resets.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid_width: u16,
    pub grid_height: u16,
    pub initial_snake_length: u16,
    /// Leaving the grid is fatal.
    pub wall_mode: bool,
    /// Leaving the grid re-enters from the opposite edge.
    pub wrap_mode: bool,
    pub initial_speed: u32,
    pub min_speed: u32,
    pub max_speed: u32,
    pub speed_step: u32,
    /// Score awarded per food eaten.
    pub food_value: u32,
    /// Static obstacle cells, empty for the classic board.
    pub obstacles: Vec<Position>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            initial_snake_length: DEFAULT_SNAKE_LENGTH,
            wall_mode: true,
            wrap_mode: false,
            initial_speed: 5,
            min_speed: 1,
            max_speed: 10,
            speed_step: 1,
            food_value: 1,
            obstacles: Vec::new(),
        }
    }
}

impl Config {
    /// Grid dimensions as a named pair.
    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        GridSize {
            width: self.grid_width,
            height: self.grid_height,
        }
    }

    /// Head cell of a freshly initialized snake.
    ///
    /// The snake lies on the middle row facing left, with its body extending
    /// to the right of the head.
    #[must_use]
    pub fn start_head(&self) -> Position {
        let x = (self.grid_width / 2).saturating_sub(self.initial_snake_length);
        Position::new(i32::from(x), i32::from(self.grid_height / 2))
    }

    /// Cells occupied by a freshly initialized snake, head first.
    pub fn start_segments(&self) -> impl Iterator<Item = Position> {
        let head = self.start_head();
        (0..i32::from(self.initial_snake_length)).map(move |offset| Position {
            x: head.x + offset,
            y: head.y,
        })
    }

    /// Checks every constraint `init` relies on.
    ///
    /// Nothing is clamped: a configuration that cannot produce a valid board
    /// is rejected as a whole.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.grid_size();
        if size.width == 0 || size.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: size.width,
                height: size.height,
            });
        }

        match (self.wall_mode, self.wrap_mode) {
            (true, true) => return Err(ConfigError::ConflictingBoundaryModes),
            (false, false) => return Err(ConfigError::NoBoundaryMode),
            _ => {}
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::ZeroSnakeLength);
        }
        if self.initial_snake_length > size.width {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                width: size.width,
            });
        }

        if self.min_speed > self.max_speed {
            return Err(ConfigError::InvalidSpeedBounds {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if self.speed_step == 0 {
            return Err(ConfigError::ZeroSpeedStep);
        }
        if !(self.min_speed..=self.max_speed).contains(&self.initial_speed) {
            return Err(ConfigError::InitialSpeedOutOfRange {
                speed: self.initial_speed,
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if self.food_value == 0 {
            return Err(ConfigError::ZeroFoodValue);
        }

        for &obstacle in &self.obstacles {
            if !obstacle.is_within_bounds(size) {
                return Err(ConfigError::ObstacleOutOfBounds { position: obstacle });
            }
            if self.start_segments().any(|segment| segment == obstacle) {
                return Err(ConfigError::ObstacleOnSnake { position: obstacle });
            }
        }

        let mut blocked: Vec<Position> = self.obstacles.clone();
        blocked.sort_by_key(|position| (position.y, position.x));
        blocked.dedup();
        let occupied = usize::from(self.initial_snake_length) + blocked.len();
        if occupied >= size.total_cells() {
            return Err(ConfigError::NoRoomForFood {
                occupied,
                cells: size.total_cells(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ConfigError;
    use crate::position::Position;

    use super::{Config, GridSize};

    fn config(width: u16, height: u16, length: u16) -> Config {
        Config {
            grid_width: width,
            grid_height: height,
            initial_snake_length: length,
            ..Config::default()
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn start_segments_extend_right_of_head() {
        let segments: Vec<_> = config(10, 10, 3).start_segments().collect();

        assert_eq!(
            segments,
            vec![Position::new(2, 5), Position::new(3, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn long_snake_starts_at_left_edge() {
        let config = config(10, 4, 8);

        assert_eq!(config.start_head(), Position::new(0, 2));
        assert_eq!(config.start_segments().last(), Some(Position::new(7, 2)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            config(0, 5, 1).validate(),
            Err(ConfigError::ZeroDimension {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn snake_wider_than_grid_is_rejected() {
        assert_eq!(
            config(4, 10, 5).validate(),
            Err(ConfigError::SnakeTooLong {
                length: 5,
                width: 4
            })
        );
    }

    #[test]
    fn board_without_room_for_food_is_rejected() {
        assert_eq!(
            config(3, 1, 3).validate(),
            Err(ConfigError::NoRoomForFood {
                occupied: 3,
                cells: 3
            })
        );
    }

    #[test]
    fn boundary_modes_must_be_exclusive() {
        let both = Config {
            wrap_mode: true,
            ..Config::default()
        };
        let neither = Config {
            wall_mode: false,
            ..Config::default()
        };

        assert_eq!(both.validate(), Err(ConfigError::ConflictingBoundaryModes));
        assert_eq!(neither.validate(), Err(ConfigError::NoBoundaryMode));
    }

    #[test]
    fn initial_speed_must_lie_within_bounds() {
        let config = Config {
            initial_speed: 11,
            ..Config::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialSpeedOutOfRange {
                speed: 11,
                min: 1,
                max: 10
            })
        );
    }

    #[test]
    fn obstacle_on_starting_snake_is_rejected() {
        let mut config = config(10, 10, 3);
        config.obstacles = vec![Position::new(3, 5)];

        assert_eq!(
            config.validate(),
            Err(ConfigError::ObstacleOnSnake {
                position: Position::new(3, 5)
            })
        );
    }

    #[test]
    fn config_deserializes_with_defaults_for_missing_fields() {
        let config: Config =
            serde_json::from_str(r#"{ "grid_width": 12, "wrap_mode": true, "wall_mode": false }"#)
                .expect("partial config should deserialize");

        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, Config::default().grid_height);
        assert!(config.wrap_mode);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn grid_positions_are_row_major() {
        let size = GridSize {
            width: 3,
            height: 2,
        };
        let positions: Vec<_> = size.positions().collect();

        assert_eq!(positions.len(), size.total_cells());
        assert_eq!(positions[1], Position::new(1, 0));
        assert_eq!(size.index_of(Position::new(1, 1)), Some(4));
        assert_eq!(size.index_of(Position::new(3, 0)), None);
    }
}
