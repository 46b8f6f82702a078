//! Randomized backtracking search for a Hamiltonian cycle on a small grid.
//!
//! The search is an explicit-stack depth-first walk. Each stack frame
//! holds the shuffled neighbours of the cell it extended that have not
//! been tried yet; popping a frame backtracks that cell out of the path.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::PathError;
use crate::game::{Grid, Position};

/// Bounds on a single search and on the number of fresh restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorLimits {
    /// Path extensions allowed before an attempt is abandoned
    pub max_expansions: usize,
    /// Fresh attempts made by [`generate_cycle`] before giving up
    pub max_attempts: usize,
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            max_expansions: 20_000,
            max_attempts: 10_000,
        }
    }
}

struct Frame {
    candidates: [Position; 4],
    next: usize,
}

impl Frame {
    fn new<R: Rng + ?Sized>(cell: Position, rng: &mut R) -> Self {
        Self {
            candidates: cell.shuffled_neighbours(rng),
            next: 0,
        }
    }

    fn pop(&mut self) -> Option<Position> {
        let candidate = self.candidates.get(self.next).copied();
        self.next += 1;
        candidate
    }
}

/// Backtracking state for one attempt, exposed so tests can inspect it
pub struct Search<'a, R: Rng + ?Sized> {
    grid: Grid,
    rng: &'a mut R,
    path: Vec<Position>,
    visited: Vec<bool>,
    stack: Vec<Frame>,
    expansions: usize,
}

impl<'a, R: Rng + ?Sized> Search<'a, R> {
    /// Start a search from a uniformly random cell
    pub fn new(grid: Grid, rng: &'a mut R) -> Self {
        let start = grid.position(rng.gen_range(0..grid.cell_count()));
        Self::starting_at(grid, start, rng)
    }

    /// Start a search from a given cell
    pub fn starting_at(grid: Grid, start: Position, rng: &'a mut R) -> Self {
        let mut visited = vec![false; grid.cell_count()];
        visited[grid.index(start)] = true;
        let first = Frame::new(start, rng);
        Self {
            grid,
            rng,
            path: vec![start],
            visited,
            stack: vec![first],
            expansions: 0,
        }
    }

    /// Cells on the current path, start first
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn expansions(&self) -> usize {
        self.expansions
    }

    fn is_closed_tour(&self) -> bool {
        self.path.len() == self.grid.cell_count()
            && self.path[self.path.len() - 1]
                .adjacent_to(self.path[0])
                .is_some()
    }

    fn accepts(&self, candidate: Position) -> bool {
        candidate.within(&self.grid)
            && self.path[self.path.len() - 1]
                .adjacent_to(candidate)
                .is_some()
            && !self.visited[self.grid.index(candidate)]
    }

    fn backtrack(&mut self) {
        self.stack.pop();
        if let Some(cell) = self.path.pop() {
            self.visited[self.grid.index(cell)] = false;
        }
    }

    /// Run until a closed tour is found, the tree is exhausted, or the
    /// expansion budget runs out
    pub fn run(mut self, max_expansions: usize) -> Result<Vec<usize>, PathError> {
        let cells = self.grid.cell_count();
        let exhausted = PathError::GenerationExhausted {
            width: self.grid.width,
            height: self.grid.height,
        };

        while let Some(frame) = self.stack.last_mut() {
            if self.path.len() == cells {
                if self.is_closed_tour() {
                    let grid = self.grid;
                    return Ok(self.path.iter().map(|&p| grid.index(p)).collect());
                }
                self.backtrack();
                continue;
            }

            let Some(candidate) = frame.pop() else {
                self.backtrack();
                continue;
            };
            if !self.accepts(candidate) {
                continue;
            }

            self.expansions += 1;
            if self.expansions > max_expansions {
                return Err(exhausted);
            }
            self.visited[self.grid.index(candidate)] = true;
            self.path.push(candidate);
            let frame = Frame::new(candidate, self.rng);
            self.stack.push(frame);
        }

        Err(exhausted)
    }
}

/// One randomized attempt at a Hamiltonian cycle on `grid`.
///
/// Fails with [`PathError::GenerationExhausted`] when the search tree is
/// exhausted or the expansion budget runs out; callers retry with fresh
/// randomness.
pub fn try_generate<R: Rng + ?Sized>(
    grid: Grid,
    max_expansions: usize,
    rng: &mut R,
) -> Result<Vec<usize>, PathError> {
    if grid.width % 2 == 1 || grid.height % 2 == 1 || grid.width < 2 || grid.height < 2 {
        return Err(PathError::OddDimension {
            width: grid.width,
            height: grid.height,
        });
    }
    Search::new(grid, rng).run(max_expansions)
}

/// Generate a Hamiltonian cycle on `grid`, restarting on failure
pub fn generate_cycle<R: Rng + ?Sized>(
    grid: Grid,
    limits: GeneratorLimits,
    rng: &mut R,
) -> Result<Vec<usize>, PathError> {
    for attempt in 0..limits.max_attempts {
        match try_generate(grid, limits.max_expansions, rng) {
            Ok(order) => return Ok(order),
            Err(PathError::GenerationExhausted { .. }) => {
                tracing::trace!(
                    attempt,
                    width = grid.width,
                    height = grid.height,
                    "cycle search restarted"
                );
            }
            Err(err) => return Err(err),
        }
    }
    Err(PathError::RetriesExhausted {
        stage: "generation",
        attempts: limits.max_attempts,
    })
}
