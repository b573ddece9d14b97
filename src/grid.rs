use std::collections::HashSet;

use crate::config::GridSize;
use crate::food::Food;
use crate::position::Position;
use crate::snake::Snake;

/// What occupies a single cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CellContent {
    Empty,
    Head,
    Body,
    Food,
    Obstacle,
}

/// One grid cell; the position is kept for consistency checks.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Cell {
    pub position: Position,
    pub content: CellContent,
}

/// Row-major projection of the board's entities onto cells.
///
/// A grid is never edited in place: it is rebuilt from the entities with
/// [`project`] whenever they change.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the cell at `position`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.size
            .index_of(position)
            .and_then(|index| self.cells.get(index))
    }

    /// Returns the content at `position`, or `None` outside the grid.
    #[must_use]
    pub fn content(&self, position: Position) -> Option<CellContent> {
        self.cell(position).map(|cell| cell.content)
    }

    /// Iterates all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterates one row of cells, left to right.
    pub fn row(&self, y: u16) -> impl Iterator<Item = &Cell> {
        let width = usize::from(self.size.width);
        let start = usize::from(y) * width;
        self.cells.iter().skip(start).take(width)
    }

    /// Positions of every empty cell in row-major order.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|cell| cell.content == CellContent::Empty)
            .map(|cell| cell.position)
            .collect()
    }
}

/// Projects snake, food and obstacles onto a fresh grid of `size` cells.
///
/// Entities outside the grid are not drawn. Overlapping entities are a
/// broken board rather than something to resolve here; the last writer
/// (head over body over food over obstacle) wins and the validator reports
/// the overlap.
#[must_use]
pub fn project(
    snake: &Snake,
    food: Option<&Food>,
    obstacles: &HashSet<Position>,
    size: GridSize,
) -> Grid {
    let mut cells: Vec<Cell> = size
        .positions()
        .map(|position| Cell {
            position,
            content: CellContent::Empty,
        })
        .collect();

    let mut mark = |position: Position, content: CellContent| {
        if let Some(index) = size.index_of(position) {
            cells[index].content = content;
        }
    };

    for &obstacle in obstacles {
        mark(obstacle, CellContent::Obstacle);
    }
    if let Some(food) = food {
        mark(food.position, CellContent::Food);
    }
    for &segment in snake.body() {
        mark(segment, CellContent::Body);
    }
    mark(snake.head(), CellContent::Head);

    Grid { size, cells }
}
