//! Splitting an even grid into small sub-grids that are cheap to search.

use super::error::PathError;
use crate::game::Grid;

/// Side lengths of the sub-grids, columns outer and rows inner.
///
/// Every sub-grid in column `i` is `widths[i]` wide; every sub-grid in
/// row `j` is `heights[j]` tall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubgridLayout {
    pub widths: Vec<usize>,
    pub heights: Vec<usize>,
}

impl SubgridLayout {
    pub fn columns(&self) -> usize {
        self.widths.len()
    }

    pub fn rows(&self) -> usize {
        self.heights.len()
    }

    /// Sub-grid at column `i`, row `j`
    pub fn subgrid(&self, column: usize, row: usize) -> Grid {
        Grid::new(self.widths[column], self.heights[row])
    }

    /// Sub-grids of one column, top to bottom
    pub fn column(&self, column: usize) -> impl Iterator<Item = Grid> + '_ {
        let width = self.widths[column];
        self.heights.iter().map(move |&height| Grid::new(width, height))
    }

    /// The grid the layout tiles
    pub fn extent(&self) -> Grid {
        Grid::new(self.widths.iter().sum(), self.heights.iter().sum())
    }
}

/// Peel chunk sizes off one even dimension.
///
/// 2, 4 and 6 are taken whole, 8 becomes two 4s, anything larger sheds a
/// 6 and continues.
pub fn reduce_dimension(mut n: usize) -> Vec<usize> {
    let mut chunks = Vec::with_capacity(n / 6 + 2);
    while n > 0 {
        let chunk = match n {
            2 | 4 | 6 => n,
            8 => 4,
            _ => 6,
        };
        chunks.push(chunk);
        n -= chunk;
    }
    chunks
}

/// Lay out `grid` as a cross product of reduced widths and heights
pub fn decompose(grid: Grid) -> Result<SubgridLayout, PathError> {
    let valid = |n: usize| n >= 2 && n % 2 == 0;
    if !valid(grid.width) || !valid(grid.height) {
        return Err(PathError::OddDimension {
            width: grid.width,
            height: grid.height,
        });
    }

    Ok(SubgridLayout {
        widths: reduce_dimension(grid.width),
        heights: reduce_dimension(grid.height),
    })
}
