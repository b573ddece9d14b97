use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::grid::{Cell, CellContent};
use crate::model::{GameOverReason, GameStatus, Model};
use crate::position::Direction;
use crate::score::Leaderboard;

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_WIDTH: u16 = 2;

const GLYPH_BODY: &str = "██";
const GLYPH_FOOD: &str = "◆ ";
const GLYPH_OBSTACLE: &str = "▒▒";

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, model: &Model, leaderboard: &Leaderboard) {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(Color::DarkGray));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    for cell in model.grid().cells() {
        render_cell(frame, inner, cell, model.snake().direction());
    }

    frame.render_widget(
        Paragraph::new(hud_line(model, leaderboard)).style(Style::new().fg(Color::Gray)),
        hud_area,
    );

    match model.status() {
        GameStatus::Paused => render_banner(frame, play_area, &["PAUSED", "[Space] resume"]),
        GameStatus::GameOver => {
            let title = match model.game_over_reason() {
                Some(GameOverReason::GridFull) => "YOU WIN",
                _ => "GAME OVER",
            };
            let score = format!("score {}", model.score());
            render_banner(frame, play_area, &[title, score.as_str(), "[Enter] again  [Q] quit"]);
        }
        GameStatus::Running => {}
    }
}

fn render_cell(frame: &mut Frame<'_>, inner: Rect, cell: &Cell, heading: Direction) {
    let (glyph, style) = match cell.content {
        CellContent::Empty => return,
        CellContent::Head => (
            head_glyph(heading),
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        CellContent::Body => (GLYPH_BODY, Style::new().fg(Color::Green)),
        CellContent::Food => (GLYPH_FOOD, Style::new().fg(Color::Red)),
        CellContent::Obstacle => (GLYPH_OBSTACLE, Style::new().fg(Color::DarkGray)),
    };

    let Some((x, y)) = cell_to_terminal(inner, cell) else {
        return;
    };
    frame.buffer_mut().set_string(x, y, glyph, style);
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲▲",
        Direction::Down => "▼▼",
        Direction::Left => "◀◀",
        Direction::Right => "▶▶",
    }
}

fn cell_to_terminal(inner: Rect, cell: &Cell) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(cell.position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(cell.position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

fn hud_line(model: &Model, leaderboard: &Leaderboard) -> Line<'static> {
    let best = leaderboard.best().unwrap_or(0).max(model.score());
    Line::from(format!(
        " score {}  length {}  speed {}  best {}  {}",
        model.score(),
        model.snake().len(),
        model.speed(),
        best,
        if model.wrap_mode() { "wrap" } else { "walls" },
    ))
}

fn render_banner(frame: &mut Frame<'_>, area: Rect, lines: &[&str]) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered(area, 30, height);
    frame.render_widget(Clear, popup);

    let text: Vec<Line<'_>> = lines.iter().map(|line| Line::from(*line)).collect();
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        popup,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
