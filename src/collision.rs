use crate::model::{GameOverReason, Model};
use crate::position::Position;

/// What the head would run into on its next cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Collision {
    None,
    Wall,
    SelfCollision,
    Food,
    Obstacle,
}

impl Collision {
    /// The reason the game ends, for collisions that end it.
    #[must_use]
    pub fn fatal_reason(self) -> Option<GameOverReason> {
        match self {
            Self::Wall => Some(GameOverReason::Wall),
            Self::SelfCollision => Some(GameOverReason::SelfCollision),
            Self::Obstacle => Some(GameOverReason::Obstacle),
            Self::None | Self::Food => None,
        }
    }
}

/// Classifies moving the head of `model`'s snake onto `next_head`.
///
/// Checks run in precedence order: wall, self, obstacle, food. `next_head`
/// must already be wrapped when wrap mode is on. The tail does not count
/// as body when it will be vacated by this very move.
#[must_use]
pub fn resolve(next_head: Position, model: &Model) -> Collision {
    if model.wall_mode() && !next_head.is_within_bounds(model.grid_size()) {
        return Collision::Wall;
    }

    let snake = model.snake();
    let solid_body = snake
        .len()
        .saturating_sub(1 + usize::from(!snake.is_growing()));
    // Wrapping along a one-cell axis lands the head on itself.
    if next_head == snake.head()
        || snake
            .body()
            .take(solid_body)
            .any(|&segment| segment == next_head)
    {
        return Collision::SelfCollision;
    }

    if model.obstacles().contains(&next_head) {
        return Collision::Obstacle;
    }

    if model.food().is_some_and(|food| food.position == next_head) {
        return Collision::Food;
    }

    Collision::None
}
