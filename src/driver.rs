use std::io;
use std::time::Duration;

use chrono::Local;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{
    Config, DEFAULT_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, TICK_INTERVAL_STEP_MS,
};
use crate::error::{ConfigError, UpdateError};
use crate::game::{init, update};
use crate::model::{Event, Model};
use crate::score::{Leaderboard, ScoreStore};

/// Read-only consumer of board snapshots.
pub trait Renderer {
    fn render(&mut self, model: &Model, leaderboard: &Leaderboard) -> io::Result<()>;
}

/// Owns one player's game: the current board, its random source and the
/// leaderboard it reports finished games to.
///
/// Events are applied strictly one at a time; each snapshot handed out is
/// complete.
pub struct Session<S: ScoreStore> {
    model: Model,
    rng: StdRng,
    seed: u64,
    store: S,
    leaderboard: Leaderboard,
}

impl<S: ScoreStore> Session<S> {
    /// Starts a session; the same `seed` and events always replay the same game.
    ///
    /// An unreadable leaderboard is logged and replaced by an empty one.
    pub fn new(config: Config, seed: u64, store: S) -> Result<Self, ConfigError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let model = init(config, &mut rng)?;
        let leaderboard = store.load().unwrap_or_else(|error| {
            log::warn!("failed to load leaderboard: {error}");
            Leaderboard::default()
        });

        log::info!(
            "session started: {}x{} grid, seed {seed}, wrap {}",
            model.grid_size().width,
            model.grid_size().height,
            model.wrap_mode(),
        );

        Ok(Self {
            model,
            rng,
            seed,
            store,
            leaderboard,
        })
    }

    /// Applies one event and returns the resulting snapshot.
    ///
    /// A filled grid is accepted as the end of the game. Entering game over
    /// records the final score and length on the leaderboard.
    pub fn dispatch(&mut self, event: Event) -> &Model {
        let next = match update(&self.model, event, &mut self.rng) {
            Ok(next) => next,
            Err(UpdateError::GridFull { filled }) => {
                log::info!("grid filled with score {}", filled.score());
                *filled
            }
            Err(UpdateError::Config(error)) => {
                log::warn!("reset rejected: {error}");
                self.model.clone()
            }
        };

        if event == Event::ResetGame {
            log::info!("game reset");
        }
        if next.is_over() && !self.model.is_over() {
            self.record_game_over(&next);
        }

        self.model = next;
        &self.model
    }

    /// Feeds `events` in order, rendering after each one.
    pub fn run<I, R>(&mut self, events: I, renderer: &mut R) -> io::Result<()>
    where
        I: IntoIterator<Item = Event>,
        R: Renderer,
    {
        for event in events {
            self.dispatch(event);
            self.render(renderer)?;
        }
        Ok(())
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> io::Result<()> {
        renderer.render(&self.model, &self.leaderboard)
    }

    fn record_game_over(&mut self, model: &Model) {
        // Count the segment still owed to a final meal.
        let length = model.snake().grown_len();
        log::info!(
            "game over ({:?}): score {}, length {length}",
            model.game_over_reason(),
            model.score(),
        );

        let Some(rank) = self.leaderboard.record(model.score(), length, Local::now()) else {
            return;
        };
        log::debug!("score entered leaderboard at rank {}", rank + 1);

        if let Err(error) = self.store.save(&self.leaderboard) {
            log::warn!("failed to save leaderboard: {error}");
        }
    }

    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Delay before the driver should emit the next `MoveSnake`.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.model.speed(), self.model.config().min_speed)
    }
}

/// Maps a speed setting to the period between moves.
///
/// Each step above `min_speed` shortens the interval, down to
/// `MIN_TICK_INTERVAL_MS`.
#[must_use]
pub fn tick_interval(speed: u32, min_speed: u32) -> Duration {
    let speed_penalty_ms = u64::from(speed.saturating_sub(min_speed)) * TICK_INTERVAL_STEP_MS;
    let clamped_ms = DEFAULT_TICK_INTERVAL_MS
        .saturating_sub(speed_penalty_ms)
        .max(MIN_TICK_INTERVAL_MS);
    Duration::from_millis(clamped_ms)
}
