use std::io;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::Terminal;

use crate::assets::{GameAssets, Sprite};
use crate::config::{GAME_OVER_TEXT_COLOR, SCORE_TEXT_COLOR};
use crate::game::GameState;
use crate::grid::{Grid, Position};

/// Terminal columns used to draw one grid cell, keeping cells roughly square.
pub const CELL_COLUMNS: u16 = 2;

/// Cells reserved for the score at the right end of the top row.
const SCORE_TEXT_CELLS: i32 = 5;

/// Frame sink for the game. Calls queue drawing; `present` flushes the frame.
pub trait Renderer {
    fn draw_background(&mut self, background: &Sprite);
    fn draw_sprite(&mut self, sprite: &Sprite, position: Position);
    fn draw_text(&mut self, text: &str, position: Position, color: Color);
    fn present(&mut self) -> io::Result<()>;
}

#[derive(Debug, Clone)]
enum DrawCommand {
    Background(Sprite),
    Sprite(Sprite, Position),
    Text(String, Position, Color),
}

/// Renders pixel-space draw calls onto a ratatui terminal.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    grid: Grid,
    commands: Vec<DrawCommand>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>, grid: Grid) -> Self {
        Self {
            terminal,
            grid,
            commands: Vec::new(),
        }
    }

    /// Returns the wrapped terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn draw_background(&mut self, background: &Sprite) {
        self.commands.push(DrawCommand::Background(background.clone()));
    }

    fn draw_sprite(&mut self, sprite: &Sprite, position: Position) {
        self.commands.push(DrawCommand::Sprite(sprite.clone(), position));
    }

    fn draw_text(&mut self, text: &str, position: Position, color: Color) {
        self.commands.push(DrawCommand::Text(text.to_owned(), position, color));
    }

    fn present(&mut self) -> io::Result<()> {
        let commands = std::mem::take(&mut self.commands);
        let grid = self.grid;

        self.terminal.draw(|frame| {
            let area = frame.area();
            let board = board_area(area, grid);
            let buffer = frame.buffer_mut();

            for command in &commands {
                match command {
                    DrawCommand::Background(sprite) => {
                        for row in 0..grid.height() {
                            for column in 0..grid.width() {
                                let x = board.x.saturating_add(column * CELL_COLUMNS);
                                let y = board.y.saturating_add(row);
                                put(buffer, area, x, y, &sprite.glyph, sprite_style(sprite));
                            }
                        }
                    }
                    DrawCommand::Sprite(sprite, position) => {
                        if let Some((x, y)) = pixel_to_terminal(board, grid, *position) {
                            put(buffer, area, x, y, &sprite.glyph, sprite_style(sprite));
                        }
                    }
                    DrawCommand::Text(text, position, color) => {
                        if let Some((x, y)) = pixel_to_terminal(board, grid, *position) {
                            put(buffer, area, x, y, text, Style::new().fg(*color));
                        }
                    }
                }
            }
        })?;

        Ok(())
    }
}

fn sprite_style(sprite: &Sprite) -> Style {
    let style = Style::new().fg(sprite.fg);
    match sprite.bg {
        Some(bg) => style.bg(bg),
        None => style,
    }
}

/// Writes `text` at (x, y), clipped to the frame.
fn put(
    buffer: &mut ratatui::buffer::Buffer,
    area: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if x >= area.right() || y >= area.bottom() {
        return;
    }

    let max_width = usize::from(area.right() - x);
    buffer.set_stringn(x, y, text, max_width, style);
}

/// Centers the board inside the frame, clipping when the frame is too small.
fn board_area(area: Rect, grid: Grid) -> Rect {
    let width = grid.width().saturating_mul(CELL_COLUMNS).min(area.width);
    let height = grid.height().min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Maps a pixel position to the terminal cell that contains it.
fn pixel_to_terminal(board: Rect, grid: Grid, position: Position) -> Option<(u16, u16)> {
    if position.x < 0 || position.y < 0 {
        return None;
    }

    let column = u16::try_from(position.x / grid.cell_size()).ok()?;
    let row = u16::try_from(position.y / grid.cell_size()).ok()?;

    let x = board.x.checked_add(column.checked_mul(CELL_COLUMNS)?)?;
    let y = board.y.checked_add(row)?;
    Some((x, y))
}

/// Top-row position of the score, right-aligned on the board.
#[must_use]
pub fn score_text_position(grid: Grid) -> Position {
    let column = (i32::from(grid.width()) - SCORE_TEXT_CELLS).max(0);
    grid.cell_origin(column, 0)
}

/// Positions of the two game-over lines, kept on the board for any size.
#[must_use]
pub fn game_over_text_positions(grid: Grid) -> (Position, Position) {
    let column = i32::from(grid.width()) / 5;
    let row = i32::from(grid.height()) * 3 / 8;
    (grid.cell_origin(column, row), grid.cell_origin(column, row + 1))
}

/// Draws the live scene: background, snake head to tail, food, score.
pub fn draw_scene<R: Renderer + ?Sized>(
    renderer: &mut R,
    state: &GameState,
    assets: &GameAssets,
) -> io::Result<()> {
    renderer.draw_background(&assets.background);
    for segment in state.snake.segments() {
        renderer.draw_sprite(&assets.segment, *segment);
    }
    renderer.draw_sprite(&assets.food, state.food.position);
    renderer.draw_text(
        &format!("Score: {}", state.score()),
        score_text_position(state.grid()),
        SCORE_TEXT_COLOR,
    );
    renderer.present()
}

/// Draws the game-over overlay in place of the board.
pub fn draw_game_over<R: Renderer + ?Sized>(
    renderer: &mut R,
    state: &GameState,
    assets: &GameAssets,
) -> io::Result<()> {
    let (title, prompt) = game_over_text_positions(state.grid());
    renderer.draw_background(&assets.background);
    renderer.draw_text(
        &format!("Game Over! Score: {}", state.score()),
        title,
        GAME_OVER_TEXT_COLOR,
    );
    renderer.draw_text(
        "Press Enter to play again or Escape to exit",
        prompt,
        GAME_OVER_TEXT_COLOR,
    );
    renderer.present()
}
