use std::io;
use std::time::Duration;

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{Event, SpeedChange};
use crate::position::Direction;

/// What a key press asks the front end to do.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Game(Event),
    Quit,
}

/// Translates one key event into a command, ignoring unbound keys and
/// key releases.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let turn = |direction| Some(Command::Game(Event::ChangeDirection(direction)));
    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => turn(Direction::Right),
        KeyCode::Char(' ' | 'p' | 'P') => Some(Command::Game(Event::TogglePause)),
        KeyCode::Enter | KeyCode::Char('r' | 'R') => Some(Command::Game(Event::ResetGame)),
        KeyCode::Char('+' | '=') => Some(Command::Game(Event::ChangeSpeed(SpeedChange::Faster))),
        KeyCode::Char('-' | '_') => Some(Command::Game(Event::ChangeSpeed(SpeedChange::Slower))),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Command::Quit),
        _ => None,
    }
}

/// Waits up to `timeout` for a key and maps it.
pub fn poll_command(timeout: Duration) -> io::Result<Option<Command>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        event::Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}
