use std::io::{self, Stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::driver::Renderer;
use crate::model::Model;
use crate::renderer;
use crate::score::Leaderboard;

/// Draws game snapshots to the real terminal.
///
/// Holds raw mode and the alternate screen for as long as it lives; both are
/// released best-effort on drop, including when setup fails halfway.
pub struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalRenderer {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let terminal = open_screen().inspect_err(|_| {
            let _ = cleanup_terminal_best_effort();
        })?;
        log::debug!("terminal entered raw mode");
        Ok(Self { terminal })
    }
}

fn open_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, model: &Model, leaderboard: &Leaderboard) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, model, leaderboard))?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

/// Leaves raw mode and the alternate screen. Safe to call more than once,
/// and from a panic hook.
pub fn cleanup_terminal_best_effort() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    raw
}
