use std::ops::RangeInclusive;

use crate::error::ConfigError;
use crate::input::Direction;

/// Smallest board edge, in cells, that still leaves an interior for food.
pub const MIN_BOARD_CELLS: u16 = 4;

/// Board position in pixel coordinates.
///
/// Every entity position is expected to be a multiple of the grid's cell size.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns this position moved one cell in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction, cell_size: i32) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - cell_size,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + cell_size,
            },
            Direction::Left => Self {
                x: self.x - cell_size,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + cell_size,
                y: self.y,
            },
        }
    }
}

/// Immutable geometry of the playing field.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    cell_size: i32,
    width: u16,
    height: u16,
}

impl Grid {
    /// Builds a grid from pixel dimensions, which must divide evenly into cells.
    pub fn new(cell_size: u16, pixel_width: u32, pixel_height: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::InvalidGrid(
                "cell size must be greater than zero".to_owned(),
            ));
        }

        let cell = u32::from(cell_size);
        if pixel_width % cell != 0 || pixel_height % cell != 0 {
            return Err(ConfigError::InvalidGrid(format!(
                "board {pixel_width}x{pixel_height} is not a multiple of cell size {cell_size}"
            )));
        }

        let too_large =
            || ConfigError::InvalidGrid(format!("board {pixel_width}x{pixel_height} is too large"));
        let width = u16::try_from(pixel_width / cell).map_err(|_| too_large())?;
        let height = u16::try_from(pixel_height / cell).map_err(|_| too_large())?;
        if width < MIN_BOARD_CELLS || height < MIN_BOARD_CELLS {
            return Err(ConfigError::InvalidGrid(format!(
                "board must be at least {min}x{min} cells, got {width}x{height}",
                min = MIN_BOARD_CELLS
            )));
        }

        // Pixel extents are checked against i32 once here so later arithmetic can't overflow.
        i32::try_from(pixel_width).map_err(|_| too_large())?;
        i32::try_from(pixel_height).map_err(|_| too_large())?;

        Ok(Self {
            cell_size: i32::from(cell_size),
            width,
            height,
        })
    }

    /// Cell edge length in pixels.
    #[must_use]
    pub fn cell_size(self) -> i32 {
        self.cell_size
    }

    /// Board width in cells.
    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    /// Board height in cells.
    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn pixel_width(self) -> i32 {
        i32::from(self.width) * self.cell_size
    }

    #[must_use]
    pub fn pixel_height(self) -> i32 {
        i32::from(self.height) * self.cell_size
    }

    /// Columns food may occupy: everything except the outermost ring.
    #[must_use]
    pub fn interior_columns(self) -> RangeInclusive<i32> {
        1..=i32::from(self.width) - 2
    }

    /// Rows food may occupy: everything except the outermost ring.
    #[must_use]
    pub fn interior_rows(self) -> RangeInclusive<i32> {
        1..=i32::from(self.height) - 2
    }

    /// Returns the pixel position of the top-left corner of a cell.
    #[must_use]
    pub fn cell_origin(self, column: i32, row: i32) -> Position {
        Position {
            x: column * self.cell_size,
            y: row * self.cell_size,
        }
    }

    /// Returns true when both coordinates are multiples of the cell size.
    #[must_use]
    pub fn is_aligned(self, position: Position) -> bool {
        position.x % self.cell_size == 0 && position.y % self.cell_size == 0
    }
}
