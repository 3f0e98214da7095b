use crate::grid::Position;
use crate::input::{direction_change_is_valid, Direction};

/// The player-controlled snake: ordered segments from head to tail.
#[derive(Debug, Clone)]
pub struct Snake {
    segments: Vec<Position>,
    heading: Direction,
    committed_heading: Direction,
}

impl Snake {
    /// Creates a one-segment snake at `start` with the provided heading.
    #[must_use]
    pub fn new(start: Position, heading: Direction) -> Self {
        Self {
            segments: vec![start],
            heading,
            committed_heading: heading,
        }
    }

    /// Creates a snake from explicit body segments (first is head).
    ///
    /// Returns `None` when `segments` is empty, since a snake always has a head.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, heading: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            segments,
            heading,
            committed_heading: heading,
        })
    }

    /// Requests a new heading for the next tick.
    ///
    /// The request is checked against the heading applied on the last completed
    /// tick, not the pending one, so two quick turns can never add up to a
    /// reversal within one tick window. Illegal requests are ignored.
    pub fn turn(&mut self, direction: Direction) {
        if direction_change_is_valid(self.committed_heading, direction) {
            self.heading = direction;
        }
    }

    /// Moves the snake one cell along its heading.
    pub fn advance(&mut self, cell_size: i32) {
        self.committed_heading = self.heading;

        // Tail to head, so each segment reads its predecessor before it moves.
        for index in (1..self.segments.len()).rev() {
            self.segments[index] = self.segments[index - 1];
        }

        self.segments[0] = self.segments[0].stepped(self.committed_heading, cell_size);
    }

    /// Adds a segment on top of the current tail; it separates on later ticks.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.segments.push(tail);
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    #[must_use]
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    /// Returns the segment at `index`, counting from the head.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<Position> {
        self.segments.get(index).copied()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.segments.iter()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a snake keeps at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Heading that the next `advance` will apply.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Heading applied on the most recent `advance`.
    #[must_use]
    pub fn committed_heading(&self) -> Direction {
        self.committed_heading
    }
}
