//! Terminal front end: ticks the controller on a timer and draws each frame.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::game::{GameConfig, GameEngine, GameError, GameState, SnakeStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, ViewStatus};

const MIN_STEP_MS: u64 = 5;
const MAX_STEP_MS: u64 = 2_000;

fn step_interval(step_ms: u64) -> Interval {
    let mut timer = interval(Duration::from_millis(step_ms));
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

pub struct WatchMode {
    config: GameConfig,
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
    draw_path: bool,
    step_ms: u64,
    auto_restart: bool,
}

impl WatchMode {
    /// Build the first run; fails if the grid cannot carry a cycle
    pub fn new(config: GameConfig, auto_restart: bool) -> Result<Self, GameError> {
        let mut engine = GameEngine::new(config.clone())?;
        let state = engine.reset();

        Ok(Self {
            draw_path: config.draw_path,
            step_ms: config.step_ms,
            config,
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
            auto_restart,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut current_step = self.step_ms;
        let mut tick_timer = step_interval(current_step);

        // Keeps the clock moving while no ticks are drawing (30 FPS)
        let mut idle_timer = interval(Duration::from_millis(33));

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                        if !self.should_quit {
                            self.draw(terminal)?;
                        }
                    }
                }

                // Game logic tick, drawn before the next one starts
                _ = tick_timer.tick() => {
                    self.tick(terminal)?;
                }

                // Redraw while paused or after game over
                _ = idle_timer.tick() => {
                    if self.paused || !self.state.is_alive {
                        self.draw(terminal)?;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.step_ms != current_step {
                current_step = self.step_ms;
                tick_timer = step_interval(current_step);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance one tick and draw the state it produced
    fn tick<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        if self.state.is_alive && !self.paused {
            self.update_game()?;
            self.draw(terminal)?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.metrics.update();
        let path = self.draw_path.then(|| self.engine.cycle());
        let view = ViewStatus {
            paused: self.paused,
            step_ms: self.step_ms,
        };
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &self.state, path, &self.metrics, view);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::TogglePath => self.draw_path = !self.draw_path,
                KeyAction::Pause => self.paused = !self.paused,
                KeyAction::Faster => self.step_ms = (self.step_ms / 2).max(MIN_STEP_MS),
                KeyAction::Slower => self.step_ms = (self.step_ms * 2).min(MAX_STEP_MS),
                KeyAction::Restart => self.restart_run()?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        let result = self.engine.step(&mut self.state);
        self.metrics.on_step(&result);

        if result.terminated {
            let collided = result.status == SnakeStatus::Colliding;
            self.metrics.on_run_over(self.state.score, collided);
            if self.auto_restart {
                self.restart_run()?;
            }
        }

        Ok(())
    }

    /// Start over on a freshly assembled cycle
    fn restart_run(&mut self) -> Result<()> {
        if let Some(seed) = self.config.seed.as_mut() {
            *seed = seed.wrapping_add(1);
        }
        self.engine = GameEngine::new(self.config.clone()).context("Failed to rebuild cycle")?;
        self.state = self.engine.reset();
        self.metrics.on_run_start();
        tracing::info!(runs = self.metrics.runs_played, "run restarted");
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn watch() -> WatchMode {
        let config = GameConfig {
            seed: Some(21),
            ..GameConfig::small()
        };
        WatchMode::new(config, false).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = watch();
        assert!(mode.state.is_alive);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.engine.cycle().len(), 64);
        assert!(!mode.draw_path);
    }

    #[test]
    fn test_rejects_odd_grid() {
        assert!(WatchMode::new(GameConfig::new(7, 8), false).is_err());
    }

    #[test]
    fn test_key_handling() {
        let mut mode = watch();

        mode.handle_event(key(KeyCode::Char('p'))).unwrap();
        assert!(mode.draw_path);
        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert!(mode.paused);

        mode.handle_event(key(KeyCode::Char('+'))).unwrap();
        assert_eq!(mode.step_ms, 20);
        mode.handle_event(key(KeyCode::Char('-'))).unwrap();
        mode.handle_event(key(KeyCode::Char('-'))).unwrap();
        assert_eq!(mode.step_ms, 80);

        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }

    #[test]
    fn test_game_restart() {
        let mut mode = watch();
        mode.state.score = 10;
        mode.state.is_alive = false;
        mode.restart_run().unwrap();
        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_alive);
        assert_eq!(mode.config.seed, Some(22));
    }

    #[test]
    fn test_update_game_advances() {
        let mut mode = watch();
        mode.update_game().unwrap();
        assert_eq!(mode.state.ticks, 1);
        assert_eq!(mode.metrics.shortcuts + mode.metrics.forward_moves, 1);
    }

    #[test]
    fn test_every_tick_is_drawn() {
        let mut mode = watch();
        mode.step_ms = MIN_STEP_MS;
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();

        for tick in 1..=3 {
            mode.tick(&mut terminal).unwrap();
            let head = mode.state.snake.head();
            assert!(screen(&terminal).contains(&format!("Ticks: {}", tick)));
            assert_eq!(mode.state.ticks, tick);
            assert!(mode.state.grid.contains(head));
        }
    }

    #[test]
    fn test_paused_tick_does_not_advance() {
        let mut mode = watch();
        mode.paused = true;
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();

        mode.tick(&mut terminal).unwrap();
        assert_eq!(mode.state.ticks, 0);
    }
}
