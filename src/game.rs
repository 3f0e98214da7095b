use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::collision::{collides, head_hits_body, head_out_of_bounds};
use crate::config::START_CELL;
use crate::food::Food;
use crate::grid::{Grid, Position};
use crate::input::Direction;
use crate::snake::Snake;

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TerminationReason {
    SelfCollision,
    BoundaryCollision,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfCollision => f.write_str("collision with self"),
            Self::BoundaryCollision => f.write_str("hit the boundary"),
        }
    }
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    Terminated(TerminationReason),
}

/// Something that happened during a tick, for audio and logging.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    FoodConsumed,
    Crashed(TerminationReason),
}

/// Everything one call to [`GameState::tick`] produced, in order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    /// Returns the reason the run ended on this tick, if it did.
    #[must_use]
    pub fn termination(&self) -> Option<TerminationReason> {
        self.events.iter().find_map(|event| match event {
            GameEvent::Crashed(reason) => Some(*reason),
            GameEvent::FoodConsumed => None,
        })
    }
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub status: GameStatus,
    grid: Grid,
    rng: StdRng,
}

impl GameState {
    /// Creates a state with entropy-seeded food placement.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(grid: Grid, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: Grid, mut rng: StdRng) -> Self {
        let snake = Snake::new(start_position(grid), Direction::Right);
        let food = Food::spawn(&mut rng, grid);

        Self {
            snake,
            food,
            status: GameStatus::Playing,
            grid,
            rng,
        }
    }

    /// Advances simulation by one tick. Does nothing once the run has ended.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if self.status != GameStatus::Playing {
            return report;
        }

        let cell_size = self.grid.cell_size();
        self.snake.advance(cell_size);
        log::trace!("snake head at {:?}", self.snake.head());

        if collides(self.snake.head(), self.food.position, cell_size) {
            self.snake.grow();
            self.food.place_randomly(&mut self.rng, self.grid);
            report.events.push(GameEvent::FoodConsumed);
        }

        let termination = if head_hits_body(&self.snake, cell_size) {
            Some(TerminationReason::SelfCollision)
        } else if head_out_of_bounds(self.snake.head(), self.grid) {
            Some(TerminationReason::BoundaryCollision)
        } else {
            None
        };

        if let Some(reason) = termination {
            self.status = GameStatus::Terminated(reason);
            report.events.push(GameEvent::Crashed(reason));
        }

        report
    }

    /// Starts a fresh run: new snake, new food, back to playing.
    pub fn reset(&mut self) {
        self.snake = Snake::new(start_position(self.grid), Direction::Right);
        self.food = Food::spawn(&mut self.rng, self.grid);
        self.status = GameStatus::Playing;
    }

    /// Score is the number of food items eaten this run.
    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.snake.len() - 1).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}

/// Start cell, pulled inside the playable area on boards too small for it.
fn start_position(grid: Grid) -> Position {
    let column = START_CELL.0.min(i32::from(grid.width()) - 2);
    let row = START_CELL.1.min(i32::from(grid.height()) - 2);
    grid.cell_origin(column, row)
}

#[cfg(test)]
mod tests {
    use super::{GameEvent, GameState, GameStatus, TerminationReason};
    use crate::food::Food;
    use crate::grid::{Grid, Position};
    use crate::input::Direction;
    use crate::snake::Snake;

    fn reference_grid() -> Grid {
        Grid::new(40, 1000, 800).expect("reference grid is valid")
    }

    fn cell(column: i32, row: i32) -> Position {
        Position {
            x: column * 40,
            y: row * 40,
        }
    }

    #[test]
    fn new_state_starts_with_one_segment_heading_right() {
        let state = GameState::new_with_seed(reference_grid(), 1);

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.snake.head(), Position { x: 200, y: 200 });
        assert_eq!(state.snake.heading(), Direction::Right);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn eating_food_grows_snake_and_moves_food() {
        let mut state = GameState::new_with_seed(reference_grid(), 1);
        state.food = Food::new(cell(6, 5));

        let report = state.tick();

        assert_eq!(report.events, vec![GameEvent::FoodConsumed]);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score(), 1);
        assert_ne!(state.food.position, cell(6, 5));
        assert!(state.grid().interior_columns().contains(&(state.food.position.x / 40)));
        assert!(state.grid().interior_rows().contains(&(state.food.position.y / 40)));
    }

    #[test]
    fn leaving_the_board_ends_the_run() {
        let mut state = GameState::new_with_seed(reference_grid(), 2);
        state.snake = Snake::new(cell(0, 5), Direction::Left);

        let report = state.tick();

        assert_eq!(
            state.status,
            GameStatus::Terminated(TerminationReason::BoundaryCollision)
        );
        assert_eq!(
            report.termination(),
            Some(TerminationReason::BoundaryCollision)
        );
    }

    #[test]
    fn entering_last_column_counts_as_boundary_hit() {
        let mut state = GameState::new_with_seed(reference_grid(), 2);
        state.snake = Snake::new(cell(23, 5), Direction::Right);

        state.tick();

        assert_eq!(
            state.status,
            GameStatus::Terminated(TerminationReason::BoundaryCollision)
        );
    }

    #[test]
    fn running_into_own_body_ends_the_run() {
        let mut state = GameState::new_with_seed(reference_grid(), 3);
        state.snake = Snake::from_segments(
            vec![
                cell(2, 2),
                cell(3, 2),
                cell(3, 3),
                cell(2, 3),
                cell(1, 3),
                cell(1, 2),
            ],
            Direction::Down,
        )
        .expect("snake has a head");

        let report = state.tick();

        assert_eq!(
            report.termination(),
            Some(TerminationReason::SelfCollision)
        );
        assert_eq!(
            state.status,
            GameStatus::Terminated(TerminationReason::SelfCollision)
        );
    }

    #[test]
    fn terminated_state_ignores_ticks() {
        let mut state = GameState::new_with_seed(reference_grid(), 4);
        state.status = GameStatus::Terminated(TerminationReason::SelfCollision);
        let head = state.snake.head();

        let report = state.tick();

        assert!(report.events.is_empty());
        assert_eq!(state.snake.head(), head);
    }

    #[test]
    fn reset_restores_a_fresh_run() {
        let mut state = GameState::new_with_seed(reference_grid(), 5);
        state.snake.grow();
        state.snake.grow();
        state.status = GameStatus::Terminated(TerminationReason::BoundaryCollision);

        state.reset();
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.score(), 0);

        state.reset();
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn start_cell_is_clamped_on_small_boards() {
        let grid = Grid::new(10, 40, 40).expect("4x4 grid is valid");
        let state = GameState::new_with_seed(grid, 6);

        assert_eq!(state.snake.head(), Position { x: 20, y: 20 });
    }

    #[test]
    fn termination_reasons_read_naturally() {
        assert_eq!(
            TerminationReason::SelfCollision.to_string(),
            "collision with self"
        );
        assert_eq!(
            TerminationReason::BoundaryCollision.to_string(),
            "hit the boundary"
        );
    }
}
