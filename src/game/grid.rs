use super::state::Position;

/// A `width x height` lattice of cells with row-major linear indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// True if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// Linear index of an in-bounds position (`y * width + x`)
    pub fn index(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos), "{pos:?} outside {self:?}");
        pos.y as usize * self.width + pos.x as usize
    }

    /// Linear index, or `None` if the position is out of bounds
    pub fn checked_index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| self.index(pos))
    }

    /// Position of a linear index
    pub fn position(&self, index: usize) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Iterate every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cell_count()).map(move |i| self.position(i))
    }
}
