use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use simplelog::{LevelFilter, WriteLogger};
use snake_core::config::Config;
use snake_core::driver::Session;
use snake_core::input::{self, Command};
use snake_core::model::Event;
use snake_core::score::JsonFileStore;
use snake_core::terminal_runtime::{TerminalRenderer, cleanup_terminal_best_effort};

#[derive(Debug, Parser)]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Initial snake length.
    #[arg(long)]
    length: Option<u16>,

    /// Wrap around the edges instead of dying on the walls.
    #[arg(long)]
    wrap: bool,

    /// Initial speed.
    #[arg(long)]
    speed: Option<u32>,

    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Leaderboard file.
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Log file; the terminal is taken over by the game.
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    WriteLogger::init(
        cli.log_level,
        simplelog::Config::default(),
        File::create(&cli.log_file)?,
    )
    .map_err(io::Error::other)?;

    let config = load_config(&cli)?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    let store = cli
        .scores
        .clone()
        .map_or_else(JsonFileStore::default_location, JsonFileStore::new);
    let session = Session::new(config, seed, store)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    install_panic_hook();
    run(session)
}

fn load_config(cli: &Cli) -> io::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        }
        None => Config::default(),
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(length) = cli.length {
        config.initial_snake_length = length;
    }
    if let Some(speed) = cli.speed {
        config.initial_speed = speed;
    }
    if cli.wrap {
        config.wrap_mode = true;
        config.wall_mode = false;
    }

    Ok(config)
}

fn run(mut session: Session<JsonFileStore>) -> io::Result<()> {
    let mut terminal = TerminalRenderer::enter()?;
    let mut last_tick = Instant::now();

    loop {
        session.render(&mut terminal)?;

        let timeout = session.tick_interval().saturating_sub(last_tick.elapsed());
        match input::poll_command(timeout)? {
            Some(Command::Quit) => break,
            Some(Command::Game(event)) => {
                session.dispatch(event);
            }
            None => {}
        }

        if last_tick.elapsed() >= session.tick_interval() {
            session.dispatch(Event::MoveSnake);
            last_tick = Instant::now();
        }
    }

    log::info!("quit with score {}", session.model().score());
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}
