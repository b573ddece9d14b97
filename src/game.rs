use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;

use crate::collision::{Collision, resolve};
use crate::config::Config;
use crate::error::{ConfigError, NoFreeCell, UpdateError};
use crate::food::Food;
use crate::model::{Event, GameOverReason, GameStatus, Model, SpeedChange};
use crate::position::{Direction, direction_change_is_valid};
use crate::snake::Snake;

/// Builds a running starting board from `config`.
///
/// The snake lies on the middle row facing left, food is placed at random
/// with `rng`.
pub fn init<R: Rng + ?Sized>(config: Config, rng: &mut R) -> Result<Model, ConfigError> {
    let speed = config.initial_speed;
    start(Arc::new(config), speed, rng)
}

fn start<R: Rng + ?Sized>(
    config: Arc<Config>,
    speed: u32,
    rng: &mut R,
) -> Result<Model, ConfigError> {
    config.validate()?;

    let mut segments = config.start_segments();
    let head = segments.next().unwrap_or_else(|| config.start_head());
    let snake = Snake::with_body(head, segments.collect(), Direction::Left);
    let obstacles: HashSet<_> = config.obstacles.iter().copied().collect();

    let board = Model::assemble(config.clone(), Arc::new(obstacles), snake, None, speed);
    let food = Food::spawn(rng, board.grid(), config.food_value).map_err(|NoFreeCell| {
        ConfigError::NoRoomForFood {
            occupied: board.snake().len() + board.obstacles().len(),
            cells: config.grid_size().total_cells(),
        }
    })?;

    Ok(board.with_food(Some(food)))
}

/// Applies one event to `model` and returns the resulting board.
///
/// Expected misuse (reversing, moving while paused, anything but a reset
/// after game over) yields an unchanged copy. `rng` is only drawn from when
/// food has to be placed.
pub fn update<R: Rng + ?Sized>(
    model: &Model,
    event: Event,
    rng: &mut R,
) -> Result<Model, UpdateError> {
    if model.is_over() && event != Event::ResetGame {
        return Ok(model.clone());
    }

    match event {
        Event::ChangeDirection(direction) => Ok(change_direction(model, direction)),
        Event::MoveSnake => {
            if model.status != GameStatus::Running {
                return Ok(model.clone());
            }
            move_snake(model, rng)
        }
        Event::TogglePause => Ok(toggle_pause(model)),
        Event::ChangeSpeed(change) => Ok(change_speed(model, change)),
        Event::ResetGame => Ok(start(model.config.clone(), model.speed, rng)?),
    }
}

fn change_direction(model: &Model, direction: Direction) -> Model {
    // Two turns within one tick must not fold the head back onto the neck.
    let snake = &model.snake;
    if !direction_change_is_valid(snake.direction(), direction)
        || !direction_change_is_valid(snake.heading(), direction)
    {
        return model.clone();
    }

    Model {
        snake: model.snake.turned(direction),
        ..model.clone()
    }
}

fn move_snake<R: Rng + ?Sized>(model: &Model, rng: &mut R) -> Result<Model, UpdateError> {
    let snake = &model.snake;
    let mut next_head = snake.head().step(snake.direction());
    if model.wrap_mode() {
        next_head = next_head.wrapped(model.grid_size());
    }

    let collision = resolve(next_head, model);
    if let Some(reason) = collision.fatal_reason() {
        return Ok(Model {
            status: GameStatus::GameOver,
            game_over: Some(reason),
            ..model.clone()
        });
    }

    let eaten = match (collision, model.food) {
        (Collision::Food, Some(food)) => Some(food),
        _ => None,
    };
    let moved = Model {
        snake: snake.moved_to(next_head, eaten.is_some()),
        food: if eaten.is_some() { None } else { model.food },
        score: model
            .score
            .saturating_add(eaten.map_or(0, |food| food.value)),
        ticks: model.ticks + 1,
        ..model.clone()
    }
    .reprojected();

    if eaten.is_none() {
        return Ok(moved);
    }

    // The segment still owed to the last meal needs a free cell of its own.
    let reserved = usize::from(moved.snake.is_growing());
    let spawned = if moved.grid().empty_positions().len() > reserved {
        Food::spawn(rng, moved.grid(), model.config.food_value)
    } else {
        Err(NoFreeCell)
    };

    match spawned {
        Ok(food) => Ok(Model {
            food: Some(food),
            ..moved
        }
        .reprojected()),
        Err(NoFreeCell) => Err(UpdateError::GridFull {
            filled: Box::new(Model {
                status: GameStatus::GameOver,
                game_over: Some(GameOverReason::GridFull),
                ..moved
            }),
        }),
    }
}

fn toggle_pause(model: &Model) -> Model {
    let status = match model.status {
        GameStatus::Running => GameStatus::Paused,
        GameStatus::Paused => GameStatus::Running,
        GameStatus::GameOver => GameStatus::GameOver,
    };

    Model {
        status,
        ..model.clone()
    }
}

fn change_speed(model: &Model, change: SpeedChange) -> Model {
    if model.status != GameStatus::Running {
        return model.clone();
    }

    let config = &model.config;
    let speed = match change {
        SpeedChange::Faster => model.speed.saturating_add(config.speed_step),
        SpeedChange::Slower => model.speed.saturating_sub(config.speed_step),
    };

    Model {
        speed: speed.clamp(config.min_speed, config.max_speed),
        ..model.clone()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::Config;
    use crate::error::{ConfigError, UpdateError};
    use crate::food::Food;
    use crate::model::{Event, GameOverReason, GameStatus, Model, SpeedChange};
    use crate::position::{Direction, Position};
    use crate::snake::Snake;
    use crate::validate::validate;

    use super::{init, update};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    fn board(width: u16, height: u16) -> Model {
        let config = Config {
            grid_width: width,
            grid_height: height,
            ..Config::default()
        };
        init(config, &mut rng()).expect("valid config")
    }

    fn step(model: &Model, event: Event) -> Model {
        update(model, event, &mut rng()).expect("transition should succeed")
    }

    #[test]
    fn init_places_snake_facing_left_on_middle_row() {
        let model = board(10, 10);

        assert_eq!(model.snake().head(), Position::new(2, 5));
        assert_eq!(
            model.snake().body().copied().collect::<Vec<_>>(),
            vec![Position::new(3, 5), Position::new(4, 5)]
        );
        assert_eq!(model.snake().direction(), Direction::Left);
        assert_eq!(model.status(), GameStatus::Running);
        assert_eq!(model.score(), 0);
        assert!(model.food().is_some());
        assert!(validate(&model));
    }

    #[test]
    fn init_rejects_invalid_config() {
        let config = Config {
            grid_width: 0,
            ..Config::default()
        };

        assert!(matches!(
            init(config, &mut rng()),
            Err(ConfigError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let model = board(20, 10).with_food(Some(Food::new(Position::new(6, 5), 1)));

        let fed = step(&model, Event::MoveSnake);
        assert_eq!(fed.snake().len(), 3);
        assert!(fed.snake().is_growing());
        let fed = fed.with_food(Some(Food::new(Position::new(19, 0), 1)));

        let grown = step(&fed, Event::MoveSnake);
        assert_eq!(grown.snake().len(), 4);
        assert!(!grown.snake().is_growing());

        let settled = step(&grown, Event::MoveSnake);
        assert_eq!(settled.snake().len(), 4);
    }

    #[test]
    fn score_increments_when_food_is_eaten() {
        let model = board(10, 10).with_food(Some(Food::new(Position::new(1, 5), 3)));

        let fed = step(&model, Event::MoveSnake);

        assert_eq!(fed.score(), 3);
        assert_eq!(fed.ticks(), 1);
        let food = fed.food().expect("new food is placed");
        assert!(!fed.snake().occupies(food.position));
        assert!(validate(&fed));
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let model = board(10, 10).with_snake(Snake::with_body(
            Position::new(0, 5),
            vec![Position::new(1, 5)],
            Direction::Left,
        ));

        let over = step(&model, Event::MoveSnake);

        assert_eq!(over.status(), GameStatus::GameOver);
        assert_eq!(over.game_over_reason(), Some(GameOverReason::Wall));
        assert_eq!(over.snake().head(), Position::new(0, 5));
    }

    #[test]
    fn wrap_mode_reenters_from_opposite_edge() {
        let config = Config {
            grid_width: 10,
            grid_height: 10,
            wall_mode: false,
            wrap_mode: true,
            ..Config::default()
        };
        let model = init(config, &mut rng())
            .expect("valid config")
            .with_snake(Snake::with_body(
                Position::new(0, 5),
                vec![Position::new(1, 5)],
                Direction::Left,
            ))
            .with_food(Some(Food::new(Position::new(5, 0), 1)));

        let wrapped = step(&model, Event::MoveSnake);

        assert_eq!(wrapped.status(), GameStatus::Running);
        assert_eq!(wrapped.snake().head(), Position::new(9, 5));
        assert!(validate(&wrapped));
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        let model = board(6, 6)
            .with_snake(Snake::with_body(
                Position::new(2, 2),
                vec![
                    Position::new(1, 2),
                    Position::new(1, 3),
                    Position::new(2, 3),
                    Position::new(3, 3),
                    Position::new(3, 2),
                ],
                Direction::Up,
            ))
            .with_food(Some(Food::new(Position::new(5, 5), 1)));
        let turned = step(&model, Event::ChangeDirection(Direction::Left));

        let over = step(&turned, Event::MoveSnake);

        assert_eq!(
            over.game_over_reason(),
            Some(GameOverReason::SelfCollision)
        );
        assert_eq!(over.snake(), turned.snake());
    }

    #[test]
    fn reversal_is_rejected_silently() {
        let model = board(10, 10);

        let reversed = step(&model, Event::ChangeDirection(Direction::Right));

        assert_eq!(reversed, model);
    }

    #[test]
    fn paused_snake_does_not_move() {
        let model = board(10, 10);

        let paused = step(&model, Event::TogglePause);
        assert_eq!(paused.status(), GameStatus::Paused);
        assert_eq!(step(&paused, Event::MoveSnake), paused);

        let resumed = step(&paused, Event::TogglePause);
        assert_eq!(resumed.status(), GameStatus::Running);
    }

    #[test]
    fn speed_is_clamped_to_bounds() {
        let model = board(10, 10);
        let mut faster = model.clone();
        for _ in 0..20 {
            faster = step(&faster, Event::ChangeSpeed(SpeedChange::Faster));
        }
        assert_eq!(faster.speed(), model.config().max_speed);

        let mut slower = model.clone();
        for _ in 0..20 {
            slower = step(&slower, Event::ChangeSpeed(SpeedChange::Slower));
        }
        assert_eq!(slower.speed(), model.config().min_speed);
    }

    #[test]
    fn speed_is_frozen_while_paused() {
        let paused = step(&board(10, 10), Event::TogglePause);

        let unchanged = step(&paused, Event::ChangeSpeed(SpeedChange::Faster));

        assert_eq!(unchanged.speed(), paused.speed());
    }

    #[test]
    fn game_over_accepts_only_reset() {
        let over = step(
            &board(10, 10).with_snake(Snake::new(Position::new(0, 0), Direction::Up)),
            Event::MoveSnake,
        );
        assert!(over.is_over());

        for event in [
            Event::ChangeDirection(Direction::Right),
            Event::MoveSnake,
            Event::TogglePause,
            Event::ChangeSpeed(SpeedChange::Faster),
        ] {
            assert_eq!(step(&over, event), over);
        }

        let fresh = step(&over, Event::ResetGame);
        assert_eq!(fresh.status(), GameStatus::Running);
        assert_eq!(fresh.score(), 0);
        assert_eq!(fresh.ticks(), 0);
        assert_eq!(fresh.snake().len(), 3);
        assert!(validate(&fresh));
    }

    #[test]
    fn reset_keeps_adjusted_speed() {
        let faster = step(&board(10, 10), Event::ChangeSpeed(SpeedChange::Faster));

        let fresh = step(&faster, Event::ResetGame);

        assert_eq!(fresh.speed(), faster.speed());
    }

    fn tiny_wrap_config() -> Config {
        Config {
            grid_width: 3,
            grid_height: 1,
            initial_snake_length: 1,
            wall_mode: false,
            wrap_mode: true,
            ..Config::default()
        }
    }

    #[test]
    fn filling_the_grid_is_reported_distinctly() {
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut model = init(tiny_wrap_config(), &mut rng).expect("valid config");

            let filled = loop {
                match update(&model, Event::MoveSnake, &mut rng) {
                    Ok(next) => {
                        assert_eq!(next.status(), GameStatus::Running);
                        model = next;
                    }
                    Err(UpdateError::GridFull { filled }) => break filled,
                    Err(error) => panic!("unexpected update error: {error}"),
                }
            };

            assert_eq!(filled.status(), GameStatus::GameOver);
            assert_eq!(filled.game_over_reason(), Some(GameOverReason::GridFull));
            assert!(filled.food().is_none());
            assert_eq!(filled.snake().grown_len(), 3);
            assert!(validate(&filled));
        }
    }

    #[test]
    fn every_meal_is_owed_a_segment_when_the_grid_fills() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut model = init(tiny_wrap_config(), &mut rng).expect("valid config");

        let filled = loop {
            match update(&model, Event::MoveSnake, &mut rng) {
                Ok(next) => model = next,
                Err(UpdateError::GridFull { filled }) => break filled,
                Err(error) => panic!("unexpected update error: {error}"),
            }
        };

        let meals = filled.score() / filled.config().food_value;
        assert_eq!(meals, 2);
        assert_eq!(filled.snake().grown_len(), 1 + meals as usize);
        assert_eq!(
            filled.grid().empty_positions().len(),
            usize::from(filled.snake().is_growing())
        );
    }

    #[test]
    fn food_is_not_placed_in_a_cell_owed_to_growth() {
        let model = init(tiny_wrap_config(), &mut rng())
            .expect("valid config")
            .with_snake(Snake::new(Position::new(0, 0), Direction::Left).growing())
            .with_food(Some(Food::new(Position::new(2, 0), 1)));

        // Tail kept and food eaten: one free cell left, reserved for the new segment.
        let Err(UpdateError::GridFull { filled }) = update(&model, Event::MoveSnake, &mut rng())
        else {
            panic!("expected a full grid");
        };

        assert_eq!(filled.snake().len(), 2);
        assert!(filled.snake().is_growing());
        assert_eq!(filled.snake().grown_len(), 3);
        assert_eq!(filled.score(), 1);
    }

    #[test]
    fn moving_into_an_obstacle_sets_game_over() {
        let config = Config {
            grid_width: 10,
            grid_height: 10,
            obstacles: vec![Position::new(1, 5)],
            ..Config::default()
        };
        let model = init(config, &mut rng()).expect("valid config");

        let over = step(&model, Event::MoveSnake);

        assert_eq!(over.status(), GameStatus::GameOver);
        assert_eq!(over.game_over_reason(), Some(GameOverReason::Obstacle));
        assert_eq!(over.snake().head(), Position::new(2, 5));
        assert_eq!(over.score(), 0);
        assert!(validate(&over));
    }

    #[test]
    fn two_turns_in_one_tick_cannot_reverse_into_the_neck() {
        let model = board(10, 10)
            .with_snake(Snake::with_body(
                Position::new(5, 5),
                vec![Position::new(5, 6), Position::new(5, 7)],
                Direction::Up,
            ))
            .with_food(Some(Food::new(Position::new(9, 9), 1)));

        let turned = step(&model, Event::ChangeDirection(Direction::Left));
        let doubled_back = step(&turned, Event::ChangeDirection(Direction::Down));
        assert_eq!(doubled_back.snake().direction(), Direction::Left);

        let moved = step(&doubled_back, Event::MoveSnake);
        assert_eq!(moved.status(), GameStatus::Running);
        assert_eq!(moved.snake().head(), Position::new(4, 5));

        let down = step(&moved, Event::ChangeDirection(Direction::Down));
        assert_eq!(down.snake().direction(), Direction::Down);
    }
}
