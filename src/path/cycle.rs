//! A validated Hamiltonian cycle over a grid.

use super::error::PathError;
use crate::game::{Direction, Grid, Position};

/// Closed tour visiting every cell of a grid exactly once.
///
/// `order[k]` is the linear index of the k-th cell on the tour; the
/// inverse table `rank[cell]` gives its position in `order`. Both are
/// fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    grid: Grid,
    order: Vec<usize>,
    rank: Vec<usize>,
}

impl Cycle {
    /// Validate `order` against `grid` and build the cycle.
    ///
    /// Rejects sequences that miss or repeat a cell, contain an index
    /// outside the grid, or step between non-adjacent cells (the closing
    /// step from last to first included).
    pub fn new(grid: Grid, order: Vec<usize>) -> Result<Self, PathError> {
        let cells = grid.cell_count();
        if cells == 0 {
            return Err(PathError::EmptyGrid {
                width: grid.width,
                height: grid.height,
            });
        }
        if order.len() != cells {
            return Err(PathError::InvalidCycle(format!(
                "expected {cells} cells, got {}",
                order.len()
            )));
        }

        let mut rank = vec![usize::MAX; cells];
        for (k, &cell) in order.iter().enumerate() {
            if cell >= cells {
                return Err(PathError::InvalidCycle(format!(
                    "cell {cell} outside {}x{} grid",
                    grid.width, grid.height
                )));
            }
            if rank[cell] != usize::MAX {
                return Err(PathError::InvalidCycle(format!("cell {cell} visited twice")));
            }
            rank[cell] = k;
        }

        for k in 0..cells {
            let from = grid.position(order[k]);
            let to = grid.position(order[(k + 1) % cells]);
            // A cell is not adjacent to itself, so 1x1 grids fail here.
            if from.adjacent_to(to).is_none() {
                return Err(PathError::InvalidCycle(format!(
                    "step {k} jumps from {from:?} to {to:?}"
                )));
            }
        }

        Ok(Self { grid, order, rank })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Cell indices in tour order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Position of `cell` along the tour
    pub fn rank_of(&self, cell: usize) -> usize {
        self.rank[cell]
    }

    /// Cell that follows `cell` on the tour
    pub fn next_cell(&self, cell: usize) -> usize {
        self.order[(self.rank[cell] + 1) % self.len()]
    }

    /// Cell that precedes `cell` on the tour
    pub fn previous_cell(&self, cell: usize) -> usize {
        self.order[(self.rank[cell] + self.len() - 1) % self.len()]
    }

    /// Forward distance from `from` to `to` along the tour
    pub fn distance(&self, from: usize, to: usize) -> usize {
        (self.rank[to] + self.len() - self.rank[from]) % self.len()
    }

    /// Forward distance between two in-bounds positions
    pub fn distance_between(&self, from: Position, to: Position) -> usize {
        self.distance(self.grid.index(from), self.grid.index(to))
    }

    /// Direction that continues the tour from `pos`
    pub fn forward_direction(&self, pos: Position) -> Direction {
        let next = self.grid.position(self.next_cell(self.grid.index(pos)));
        pos.adjacent_to(next)
            .expect("consecutive cycle cells are adjacent by construction")
    }

    /// Directions from `pos` toward its predecessor and successor
    pub fn links(&self, pos: Position) -> (Direction, Direction) {
        let cell = self.grid.index(pos);
        let back = self.grid.position(self.previous_cell(cell));
        (
            pos.adjacent_to(back)
                .expect("consecutive cycle cells are adjacent by construction"),
            self.forward_direction(pos),
        )
    }
}

/// Check that `order` is a closed tour of `grid` without building a `Cycle`
pub fn is_hamiltonian(grid: Grid, order: &[usize]) -> bool {
    Cycle::new(grid, order.to_vec()).is_ok()
}
