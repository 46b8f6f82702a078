use std::time::{Duration, Instant};

use crate::game::StepResult;

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub runs_played: u32,
    pub collisions: u32,
    pub shortcuts: u64,
    pub forward_moves: u64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            runs_played: 0,
            collisions: 0,
            shortcuts: 0,
            forward_moves: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_run_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.shortcuts = 0;
        self.forward_moves = 0;
    }

    /// Count the kind of move a tick took
    pub fn on_step(&mut self, result: &StepResult) {
        match result.movement {
            Some(movement) if movement.is_shortcut() => self.shortcuts += 1,
            Some(_) => self.forward_moves += 1,
            None => {}
        }
    }

    pub fn on_run_over(&mut self, final_score: u32, collided: bool) {
        self.runs_played += 1;
        if collided {
            self.collisions += 1;
        }
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    /// Fraction of moves this run that left the cycle
    pub fn shortcut_ratio(&self) -> f64 {
        let total = self.shortcuts + self.forward_moves;
        if total == 0 {
            0.0
        } else {
            self.shortcuts as f64 / total as f64
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
