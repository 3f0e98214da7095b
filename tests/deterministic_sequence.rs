use grid_snake::food::Food;
use grid_snake::game::{GameEvent, GameState, GameStatus, TerminationReason};
use grid_snake::grid::{Grid, Position};
use grid_snake::input::Direction;
use grid_snake::snake::Snake;

fn cell(column: i32, row: i32) -> Position {
    Position {
        x: column * 40,
        y: row * 40,
    }
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let grid = Grid::new(40, 240, 160).expect("6x4 grid is valid");
    let mut state = GameState::new_with_seed(grid, 42);

    state.snake = Snake::new(cell(1, 1), Direction::Right);
    state.food = Food::new(cell(2, 1));

    let report = state.tick();
    assert_eq!(report.events, vec![GameEvent::FoodConsumed]);
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.score(), 1);
    assert_eq!(state.snake.len(), 2);
    assert_eq!(state.snake.head(), cell(2, 1));
    assert!(state.grid().is_aligned(state.food.position));

    state.snake.turn(Direction::Up);
    state.tick();
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.snake.head(), cell(2, 0));

    let report = state.tick();
    assert_eq!(
        report.termination(),
        Some(TerminationReason::BoundaryCollision)
    );
    assert_eq!(
        state.status,
        GameStatus::Terminated(TerminationReason::BoundaryCollision)
    );
}

#[test]
fn seeded_runs_place_food_identically() {
    let grid = Grid::new(40, 1000, 800).expect("reference grid is valid");
    let mut first = GameState::new_with_seed(grid, 99);
    let mut second = GameState::new_with_seed(grid, 99);
    assert_eq!(first.food, second.food);

    for _ in 0..5 {
        first.reset();
        second.reset();
        assert_eq!(first.food, second.food);
    }
}

#[test]
fn short_snake_cannot_hit_itself_on_a_tight_turn() {
    let grid = Grid::new(40, 1000, 800).expect("reference grid is valid");
    let mut state = GameState::new_with_seed(grid, 7);
    state.food = Food::new(cell(20, 15));
    state.snake = Snake::from_segments(vec![cell(2, 2), cell(3, 2), cell(3, 3)], Direction::Down)
        .expect("snake has a head");

    state.tick();
    state.snake.turn(Direction::Right);
    state.tick();
    state.snake.turn(Direction::Up);
    state.tick();

    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.snake.len(), 3);
}
