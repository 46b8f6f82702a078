use hamilton_snake::game::{GameConfig, GameEngine, SnakeStatus};
use hamilton_snake::modes::{HeadlessConfig, HeadlessRun, RunOutcome};
use hamilton_snake::path::{Cycle, hamiltonian_cycle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

fn seeded(width: usize, height: usize, seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        ..GameConfig::new(width, height)
    }
}

#[test]
fn assembled_cycles_cover_every_cell() {
    let mut rng = StdRng::seed_from_u64(99);
    for (width, height) in [(2, 2), (4, 6), (8, 8), (12, 10), (20, 20)] {
        let grid = GameConfig::new(width, height).grid();
        let cycle = hamiltonian_cycle(grid, &mut rng).unwrap();

        assert_eq!(cycle.len(), width * height);
        let distinct: HashSet<usize> = cycle.order().iter().copied().collect();
        assert_eq!(distinct.len(), width * height);

        // Round trip through validation
        assert!(Cycle::new(grid, cycle.order().to_vec()).is_ok());
    }
}

#[test]
fn every_tick_keeps_the_game_consistent() {
    for seed in 0..4 {
        let mut engine = GameEngine::new(seeded(10, 8, seed)).unwrap();
        let mut state = engine.reset();
        let capacity = state.grid.cell_count();

        for _ in 0..3_000 {
            let previous_head = state.snake.head();
            let result = engine.step(&mut state);
            if result.terminated {
                assert_eq!(result.status, SnakeStatus::Colliding);
                assert!(!state.is_alive);
                break;
            }

            let movement = result.movement.unwrap();
            assert_eq!(
                previous_head.moved_in_direction(movement.direction),
                state.snake.head()
            );
            assert!(state.is_in_bounds(state.snake.head()));
            assert!(state.snake.len() <= state.snake.target_length);
            assert!(state.snake.target_length <= capacity);

            let cells: HashSet<_> = state.snake.body.iter().collect();
            assert_eq!(cells.len(), state.snake.len());

            if let Some(food) = state.food {
                assert!(!state.snake.occupies(food));
            }
        }
    }
}

#[test]
fn headless_runs_report_per_run() {
    let config = HeadlessConfig {
        runs: 3,
        max_ticks: 2_000,
        ..HeadlessConfig::new(seeded(6, 6, 17))
    };
    let mut headless = HeadlessRun::new(config);
    let summaries = headless.run().unwrap();

    assert_eq!(summaries.len(), 3);
    for summary in &summaries {
        assert!(summary.ticks <= 2_000);
        assert!(summary.length <= 36);
        assert!((0.0..=1.0).contains(&summary.shortcut_ratio));
        if summary.outcome == RunOutcome::Filled {
            assert_eq!(summary.length, 36);
        }
    }

    let collided = summaries
        .iter()
        .filter(|s| s.outcome == RunOutcome::Collided)
        .count() as u32;
    assert_eq!(headless.metrics().collisions, collided);
    assert_eq!(headless.metrics().runs_played, 3);
}

#[test]
fn odd_grid_is_rejected_before_play() {
    assert!(GameEngine::new(GameConfig::new(9, 8)).is_err());
    assert!(GameConfig::new(9, 8).validate().is_err());
}
