//! Headless mode: runs the controller as fast as it can, without a terminal.
//!
//! Each run assembles its own cycle and ticks until the snake collides, the
//! grid is filled, or the tick ceiling is reached.
//!
//! # Example
//!
//! ```rust
//! use hamilton_snake::game::GameConfig;
//! use hamilton_snake::modes::{HeadlessConfig, HeadlessRun};
//!
//! let config = HeadlessConfig {
//!     runs: 1,
//!     max_ticks: 500,
//!     ..HeadlessConfig::new(GameConfig::small())
//! };
//! let summaries = HeadlessRun::new(config).run().unwrap();
//! assert_eq!(summaries.len(), 1);
//! ```

use anyhow::{Context, Result};

use crate::game::{GameConfig, GameEngine, SnakeStatus};
use crate::metrics::GameMetrics;

/// Configuration for headless runs
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Number of independent runs
    pub runs: u32,

    /// Stop a run after this many ticks
    pub max_ticks: u64,

    /// Log progress every N ticks
    pub log_frequency: u64,

    pub game_config: GameConfig,
}

impl HeadlessConfig {
    pub fn new(game_config: GameConfig) -> Self {
        Self {
            runs: 1,
            max_ticks: 1_000_000,
            log_frequency: 10_000,
            game_config,
        }
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Collided,
    Filled,
    TickLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub score: u32,
    pub length: usize,
    pub ticks: u64,
    pub shortcut_ratio: f64,
}

pub struct HeadlessRun {
    config: HeadlessConfig,
    metrics: GameMetrics,
}

impl HeadlessRun {
    pub fn new(config: HeadlessConfig) -> Self {
        Self {
            config,
            metrics: GameMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    /// Play every configured run and return one summary per run
    pub fn run(&mut self) -> Result<Vec<RunSummary>> {
        let mut summaries = Vec::with_capacity(self.config.runs as usize);

        for run in 0..self.config.runs {
            let mut game_config = self.config.game_config.clone();
            game_config.seed = game_config.seed.map(|seed| seed.wrapping_add(run as u64));

            let summary = self
                .run_once(game_config)
                .with_context(|| format!("Run {} failed to start", run + 1))?;

            tracing::info!(
                run = run + 1,
                outcome = ?summary.outcome,
                score = summary.score,
                length = summary.length,
                ticks = summary.ticks,
                shortcut_ratio = summary.shortcut_ratio,
                "run finished"
            );
            summaries.push(summary);
        }

        Ok(summaries)
    }

    fn run_once(&mut self, game_config: GameConfig) -> Result<RunSummary> {
        let mut engine = GameEngine::new(game_config)?;
        let mut state = engine.reset();
        self.metrics.on_run_start();

        let outcome = loop {
            if state.is_grid_filled() {
                break RunOutcome::Filled;
            }
            if state.ticks >= self.config.max_ticks {
                break RunOutcome::TickLimit;
            }

            let result = engine.step(&mut state);
            self.metrics.on_step(&result);

            if result.status == SnakeStatus::Colliding {
                break RunOutcome::Collided;
            }

            if self.config.log_frequency > 0 && state.ticks % self.config.log_frequency == 0 {
                tracing::debug!(
                    ticks = state.ticks,
                    score = state.score,
                    length = state.snake.len(),
                    "progress"
                );
            }
        };

        self.metrics.update();
        self.metrics
            .on_run_over(state.score, outcome == RunOutcome::Collided);

        Ok(RunSummary {
            outcome,
            score: state.score,
            length: state.snake.len(),
            ticks: state.ticks,
            shortcut_ratio: self.metrics.shortcut_ratio(),
        })
    }
}
