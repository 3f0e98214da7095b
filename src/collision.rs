//! Overlap tests between grid-aligned entities.
//!
//! Two positions collide when they are less than one cell apart on both axes.
//! With aligned coordinates this is plain equality, but the test also tolerates
//! fractional offsets.

use crate::grid::{Grid, Position};
use crate::snake::Snake;

/// First body index checked against the head. The neck segments right behind
/// the head can never be reached on a sharp turn, so they are skipped.
pub const FIRST_COLLIDABLE_SEGMENT: usize = 3;

/// Returns true when `a` and `b` overlap within one cell on both axes.
#[must_use]
pub fn collides(a: Position, b: Position, cell_size: i32) -> bool {
    (a.x - b.x).abs() < cell_size && (a.y - b.y).abs() < cell_size
}

/// Returns true when the head overlaps a body segment at index 3 or later.
#[must_use]
pub fn head_hits_body(snake: &Snake, cell_size: i32) -> bool {
    let head = snake.head();
    snake
        .segments()
        .skip(FIRST_COLLIDABLE_SEGMENT)
        .any(|segment| collides(head, *segment, cell_size))
}

/// Returns true when the head has left the playable area.
///
/// The far edge is exclusive by one full cell, so the last column and row
/// count as out of bounds.
#[must_use]
pub fn head_out_of_bounds(head: Position, grid: Grid) -> bool {
    head.x < 0
        || head.y < 0
        || head.x >= grid.pixel_width() - grid.cell_size()
        || head.y >= grid.pixel_height() - grid.cell_size()
}
