use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{
    action::{Direction, Move},
    config::GameConfig,
    error::GameError,
    state::{GameState, Position, Snake, SnakeStatus},
};
use crate::path::{Cycle, PathAssembler};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Move taken this step; `None` if the game was already over
    pub movement: Option<Move>,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    pub status: SnakeStatus,
    /// Whether the run has ended
    pub terminated: bool,
}

/// Drives the snake along a fixed Hamiltonian cycle, taking greedy
/// shortcuts toward the food when they keep clear of its own body
pub struct GameEngine {
    config: GameConfig,
    cycle: Cycle,
    rng: StdRng,
}

impl GameEngine {
    /// Validate `config` and assemble a fresh cycle for its grid
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let cycle = PathAssembler::new(config.assembly).assemble(config.grid(), &mut rng)?;
        Ok(Self { config, cycle, rng })
    }

    /// Use an existing cycle instead of assembling one
    pub fn with_cycle(config: GameConfig, cycle: Cycle, rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;
        if cycle.grid() != config.grid() {
            return Err(GameError::InvalidConfig(format!(
                "cycle covers {}x{} but the grid is {}x{}",
                cycle.grid().width,
                cycle.grid().height,
                config.grid_width,
                config.grid_height
            )));
        }
        Ok(Self { config, cycle, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn cycle(&self) -> &Cycle {
        &self.cycle
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let grid = self.config.grid();
        let head = grid.position(self.rng.gen_range(0..grid.cell_count()));
        let snake = Snake::new(head, self.config.initial_length.min(grid.cell_count()));
        let food = self.spawn_food_avoid_snake(&snake);
        GameState::new(snake, food, grid)
    }

    /// Minimum clearance a shortcut must keep from every body segment
    pub fn safety_margin(&self, snake: &Snake) -> f64 {
        self.config.accuracy * snake.target_length as f64
    }

    /// Smallest forward cycle distance from `pos` to any body segment
    pub fn distance_to_snake(&self, pos: Position, snake: &Snake) -> usize {
        let grid = self.cycle.grid();
        let from = grid.index(pos);
        snake
            .body
            .iter()
            .map(|&segment| self.cycle.distance(from, grid.index(segment)))
            .min()
            .unwrap_or(self.cycle.len())
    }

    /// Pick the move for the next tick.
    ///
    /// Defaults to following the cycle. A neighbour of the head becomes a
    /// candidate if it is on the grid and its cycle distance to every body
    /// segment is at least the safety margin; the candidate closest to the
    /// food (along the cycle) wins, first come on ties.
    pub fn choose_move(&mut self, state: &GameState) -> Move {
        let head = state.snake.head();
        let forward = Move::forward(self.cycle.forward_direction(head));

        let Some(food) = state.food else {
            return forward;
        };

        let margin = self.safety_margin(&state.snake);
        let mut best: Option<(Direction, usize)> = None;

        for neighbour in head.shuffled_neighbours(&mut self.rng) {
            if !state.is_in_bounds(neighbour) {
                continue;
            }
            if (self.distance_to_snake(neighbour, &state.snake) as f64) < margin {
                continue;
            }

            let to_food = self.cycle.distance_between(neighbour, food);
            if best.map_or(true, |(_, d)| to_food < d) {
                if let Some(direction) = head.adjacent_to(neighbour) {
                    best = Some((direction, to_food));
                }
            }
        }

        best.map(|(direction, _)| Move::shortcut(direction))
            .unwrap_or(forward)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult {
                movement: None,
                ate_food: false,
                status: state.status,
                terminated: true,
            };
        }

        let movement = self.choose_move(state);
        let destination = state.snake.head().moved_in_direction(movement.direction);
        state.ticks += 1;

        // The tail leaves its cell this tick unless the snake is still growing.
        let vacated = state.snake.is_full_grown() && destination == state.snake.tail();
        if state.snake.occupies(destination) && !vacated {
            state.status = SnakeStatus::Colliding;
            state.is_alive = false;
            tracing::warn!(
                ticks = state.ticks,
                length = state.snake.len(),
                x = destination.x,
                y = destination.y,
                "snake ran into itself"
            );
            return StepResult {
                movement: Some(movement),
                ate_food: false,
                status: SnakeStatus::Colliding,
                terminated: true,
            };
        }

        state.snake.advance(destination);

        let ate_food = state.food == Some(destination);
        if ate_food {
            let capacity = state.grid.cell_count();
            state.score += 1;
            state.snake.target_length =
                (state.snake.target_length + self.config.growth).min(capacity);
            state.food = self.spawn_food_avoid_snake(&state.snake);
            state.status = SnakeStatus::Eating;
            tracing::debug!(
                score = state.score,
                target_length = state.snake.target_length,
                food = ?state.food,
                "food eaten"
            );
        } else {
            state.status = SnakeStatus::Cruising;
        }

        StepResult {
            movement: Some(movement),
            ate_food,
            status: state.status,
            terminated: false,
        }
    }

    /// Spawn food on a uniformly random cell the snake does not cover
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Position> {
        let occupied: HashSet<Position> = snake.body.iter().copied().collect();
        let free: Vec<Position> = self
            .config
            .grid()
            .positions()
            .filter(|pos| !occupied.contains(pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, MoveKind};
    use proptest::prelude::*;

    /// 8x8 tour: along the top row, snake through columns 7..=1 in rows
    /// 1..=7, then back up column 0.
    fn comb_cycle_8x8() -> Cycle {
        let grid = Grid::new(8, 8);
        let mut order: Vec<usize> = (0..8).collect();
        for (k, x) in (1..8).rev().enumerate() {
            let rows: Vec<usize> = if k % 2 == 0 {
                (1..8).collect()
            } else {
                (1..8).rev().collect()
            };
            order.extend(rows.into_iter().map(|y| y * 8 + x));
        }
        order.extend((1..8).rev().map(|y| y * 8));
        Cycle::new(grid, order).unwrap()
    }

    fn engine_8x8(seed: u64) -> GameEngine {
        GameEngine::with_cycle(
            GameConfig::small(),
            comb_cycle_8x8(),
            StdRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_new_builds_cycle_for_grid() {
        let config = GameConfig {
            seed: Some(3),
            ..GameConfig::new(10, 6)
        };
        let engine = GameEngine::new(config).unwrap();
        assert_eq!(engine.cycle().len(), 60);
        assert_eq!(engine.cycle().grid(), Grid::new(10, 6));
    }

    #[test]
    fn test_new_rejects_odd_grid() {
        let result = GameEngine::new(GameConfig::new(9, 8));
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_with_cycle_rejects_wrong_grid() {
        let result = GameEngine::with_cycle(
            GameConfig::new(10, 10),
            comb_cycle_8x8(),
            StdRng::seed_from_u64(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_reset() {
        let mut engine = engine_8x8(1);
        let state = engine.reset();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.target_length, 6);
        let food = state.food.unwrap();
        assert_ne!(food, state.snake.head());
    }

    #[test]
    fn test_forward_when_food_three_steps_ahead() {
        let mut engine = engine_8x8(4);
        let snake = Snake::from_segments(
            [p(3, 0), p(2, 0), p(1, 0), p(0, 0), p(0, 1), p(0, 2)],
            6,
        )
        .unwrap();
        let mut state = GameState::new(snake, Some(p(6, 0)), Grid::new(8, 8));

        let head_cell = state.grid.index(state.snake.head());
        let expected = engine.cycle().next_cell(head_cell);

        let result = engine.step(&mut state);

        let movement = result.movement.unwrap();
        assert_eq!(movement.direction, Direction::Right);
        assert_eq!(state.grid.index(state.snake.head()), expected);
        assert_eq!(state.snake.len(), 6);
        assert_eq!(result.status, SnakeStatus::Cruising);
    }

    #[test]
    fn test_shortcut_toward_food() {
        // Head at (3,1) heading down column 3; the food is its left
        // neighbour, thirteen steps ahead along the cycle.
        let mut engine = engine_8x8(5);
        let snake = Snake::from_segments([p(3, 1)], 6).unwrap();
        let state = GameState::new(snake, Some(p(2, 1)), Grid::new(8, 8));

        let movement = engine.choose_move(&state);
        assert_eq!(movement, Move::shortcut(Direction::Left));
    }

    #[test]
    fn test_no_food_follows_cycle() {
        let mut engine = engine_8x8(6);
        let snake = Snake::from_segments([p(3, 1)], 6).unwrap();
        let state = GameState::new(snake, None, Grid::new(8, 8));

        let movement = engine.choose_move(&state);
        assert_eq!(movement, Move::forward(Direction::Down));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine_8x8(7);
        let snake = Snake::from_segments([p(3, 0), p(2, 0), p(1, 0)], 6).unwrap();
        let mut state = GameState::new(snake, Some(p(4, 0)), Grid::new(8, 8));

        let result = engine.step(&mut state);

        assert!(result.ate_food);
        assert_eq!(result.status, SnakeStatus::Eating);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.target_length, 8);
        assert_eq!(state.snake.head(), p(4, 0));
        let food = state.food.unwrap();
        assert!(!state.snake.occupies(food));
        assert_ne!(food, state.snake.head());
    }

    #[test]
    fn test_self_collision_ends_run() {
        let mut engine = engine_8x8(8);
        // Every neighbour of the head is body; with no food the controller
        // follows the cycle down into (3,2).
        let snake = Snake::from_segments(
            [p(3, 1), p(3, 0), p(4, 0), p(4, 1), p(4, 2), p(3, 2), p(2, 2), p(2, 1)],
            10,
        )
        .unwrap();
        let mut state = GameState::new(snake, None, Grid::new(8, 8));

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.status, SnakeStatus::Colliding);
        assert!(!state.is_alive);
        assert_eq!(state.snake.head(), p(3, 1));

        let after = engine.step(&mut state);
        assert!(after.terminated);
        assert_eq!(after.movement, None);
    }

    #[test]
    fn test_moving_into_vacated_tail_is_allowed() {
        // 2x2 grid: the snake fills every cell and chases its own tail.
        let cycle = Cycle::new(Grid::new(2, 2), vec![0, 1, 3, 2]).unwrap();
        let config = GameConfig {
            initial_length: 4,
            ..GameConfig::new(2, 2)
        };
        let mut engine = GameEngine::with_cycle(config, cycle, StdRng::seed_from_u64(9)).unwrap();
        let snake = Snake::from_segments([p(0, 1), p(1, 1), p(1, 0), p(0, 0)], 4).unwrap();
        let mut state = GameState::new(snake, None, Grid::new(2, 2));

        for _ in 0..12 {
            let result = engine.step(&mut state);
            assert!(!result.terminated);
            assert_eq!(result.movement.unwrap().kind, MoveKind::Forward);
        }
        assert!(state.is_grid_filled());
    }

    #[test]
    fn test_food_removed_when_grid_is_full() {
        let cycle = Cycle::new(Grid::new(2, 2), vec![0, 1, 3, 2]).unwrap();
        let config = GameConfig {
            initial_length: 2,
            ..GameConfig::new(2, 2)
        };
        let mut engine = GameEngine::with_cycle(config, cycle, StdRng::seed_from_u64(10)).unwrap();
        // Body covers three cells; food on the last free one.
        let snake = Snake::from_segments([p(1, 1), p(1, 0), p(0, 0)], 4).unwrap();
        let mut state = GameState::new(snake, Some(p(0, 1)), Grid::new(2, 2));

        let result = engine.step(&mut state);

        assert!(result.ate_food);
        assert_eq!(state.snake.target_length, 4);
        assert_eq!(state.food, None);
    }

    #[test]
    fn test_distance_to_snake() {
        let engine = engine_8x8(11);
        let snake = Snake::from_segments([p(3, 0), p(2, 0)], 6).unwrap();
        // (4,0) is one step past the head; the body lies behind it on the cycle.
        assert_eq!(engine.distance_to_snake(p(4, 0), &snake), 62);
        assert_eq!(engine.distance_to_snake(p(1, 0), &snake), 1);
        assert_eq!(engine.distance_to_snake(p(2, 0), &snake), 0);
    }

    #[test]
    fn test_shortcuts_respect_margin() {
        let mut engine = engine_8x8(12);
        let mut state = engine.reset();

        for _ in 0..2_000 {
            if !state.is_alive {
                break;
            }
            let margin = engine.safety_margin(&state.snake);
            let movement = engine.choose_move(&state);
            if movement.is_shortcut() {
                let target = state.snake.head().moved_in_direction(movement.direction);
                assert!(engine.distance_to_snake(target, &state.snake) as f64 >= margin);
            }
            engine.step(&mut state);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_shortcuts_keep_safety_margin(
            half in 2usize..=6,
            accuracy in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let config = GameConfig {
                accuracy,
                seed: Some(seed),
                ..GameConfig::new(half * 2, half * 2)
            };
            let mut engine = GameEngine::new(config).unwrap();
            let mut state = engine.reset();

            for _ in 0..500 {
                if !state.is_alive {
                    break;
                }
                let margin = engine.safety_margin(&state.snake);
                let movement = engine.choose_move(&state);
                if movement.is_shortcut() {
                    let target = state.snake.head().moved_in_direction(movement.direction);
                    prop_assert!(state.is_in_bounds(target));
                    prop_assert!(engine.distance_to_snake(target, &state.snake) as f64 >= margin);
                }
                engine.step(&mut state);
            }
        }
    }
}
