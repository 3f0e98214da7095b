use rand::Rng;

use crate::grid::{Grid, Position};

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at a fixed `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Creates food at a random interior cell.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: Grid) -> Self {
        Self::new(interior_position(rng, grid))
    }

    /// Moves this food to a different random interior cell.
    ///
    /// The snake's body is not excluded, so food can land underneath it.
    pub fn place_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: Grid) {
        self.position = interior_position_except(rng, grid, self.position);
    }
}

/// Picks a cell uniformly from the board, excluding the outermost ring.
#[must_use]
pub fn interior_position<R: Rng + ?Sized>(rng: &mut R, grid: Grid) -> Position {
    let column = rng.gen_range(grid.interior_columns());
    let row = rng.gen_range(grid.interior_rows());
    grid.cell_origin(column, row)
}

/// Picks an interior cell other than `current`, uniformly among the rest.
///
/// When `current` is not an interior cell every interior cell is a candidate.
#[must_use]
pub fn interior_position_except<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    current: Position,
) -> Position {
    let columns = grid.interior_columns();
    let rows = grid.interior_rows();
    let width = columns.end() - columns.start() + 1;
    let height = rows.end() - rows.start() + 1;
    let (column, row) = (current.x / grid.cell_size(), current.y / grid.cell_size());

    let excluded = (grid.is_aligned(current) && columns.contains(&column) && rows.contains(&row))
        .then(|| (row - rows.start()) * width + (column - columns.start()));

    let mut index = match excluded {
        Some(_) => rng.gen_range(0..width * height - 1),
        None => rng.gen_range(0..width * height),
    };
    if excluded.is_some_and(|skipped| index >= skipped) {
        index += 1;
    }

    grid.cell_origin(columns.start() + index % width, rows.start() + index / width)
}
