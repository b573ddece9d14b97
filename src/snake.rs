use std::collections::VecDeque;

use crate::position::{Direction, Position};

/// Snake entity: a head plus the ordered body trailing behind it.
///
/// The body is stored closest-to-head first and never contains the head.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    head: Position,
    body: VecDeque<Position>,
    direction: Direction,
    /// Direction of the last completed move; turns queued since then may
    /// not reverse it.
    heading: Direction,
    growing: bool,
}

#[allow(clippy::len_without_is_empty)]
impl Snake {
    /// Creates a one-cell snake at `head` with the provided direction.
    #[must_use]
    pub fn new(head: Position, direction: Direction) -> Self {
        Self::with_body(head, Vec::new(), direction)
    }

    /// Creates a snake from a head and explicit body segments (closest first).
    #[must_use]
    pub fn with_body(head: Position, body: Vec<Position>, direction: Direction) -> Self {
        Self {
            head,
            body: VecDeque::from(body),
            direction,
            heading: direction,
            growing: false,
        }
    }

    /// Returns a copy that will keep its tail on the next move.
    #[must_use]
    pub fn growing(mut self) -> Self {
        self.growing = true;
        self
    }

    /// Returns a copy heading towards `direction`.
    #[must_use]
    pub fn turned(&self, direction: Direction) -> Self {
        Self {
            direction,
            ..self.clone()
        }
    }

    /// Returns the snake after its head moves onto `next_head`.
    ///
    /// The old head becomes the first body segment. The tail is dropped
    /// unless a previous meal left the snake `growing`; `ate` arms growth
    /// for the following move.
    #[must_use]
    pub fn moved_to(&self, next_head: Position, ate: bool) -> Self {
        let mut body = self.body.clone();
        body.push_front(self.head);
        if !self.growing {
            let _ = body.pop_back();
        }

        Self {
            head: next_head,
            body,
            direction: self.direction,
            heading: self.direction,
            growing: ate,
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Iterates over body segments from neck to tail, head excluded.
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Iterates over all segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        std::iter::once(&self.head).chain(self.body.iter())
    }

    /// Returns the last segment (the head for a one-cell snake).
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or(self.head)
    }

    /// Returns true if the next move keeps the tail in place.
    #[must_use]
    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Returns true if any segment, head included, occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.head == position || self.body.contains(&position)
    }

    /// Returns current segment count, head included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Segment count once pending growth has been applied.
    #[must_use]
    pub fn grown_len(&self) -> usize {
        self.len() + usize::from(self.growing)
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction the snake last moved in.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }
}
