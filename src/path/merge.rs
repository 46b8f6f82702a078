//! Splicing two disjoint cycles over adjacent regions into one.
//!
//! The existing region sits at the origin of the union grid; the incoming
//! region is placed directly below it (`Vertical`) or directly to its right
//! (`Horizontal`). If `A[i] -> A[i+1]` runs parallel to `B[j-1] -> B[j]`
//! in the opposite direction, the edge is replaced by the detour
//! `A[i] -> B[j] -> ... -> B[j-1] -> A[i+1]`, which walks all of `B`.

use super::error::PathError;
use crate::game::{Grid, Position};

/// Axis along which the union grid grows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAxis {
    /// Incoming region below the existing one; heights add up
    Vertical,
    /// Incoming region right of the existing one; widths add up
    Horizontal,
}

impl MergeAxis {
    /// Grid covering both regions
    pub fn union(self, existing: Grid, incoming: Grid) -> Result<Grid, PathError> {
        let mismatch = || PathError::RegionMismatch {
            existing: (existing.width, existing.height),
            incoming: (incoming.width, incoming.height),
        };
        match self {
            MergeAxis::Vertical if existing.width == incoming.width => {
                Ok(Grid::new(existing.width, existing.height + incoming.height))
            }
            MergeAxis::Horizontal if existing.height == incoming.height => {
                Ok(Grid::new(existing.width + incoming.width, existing.height))
            }
            _ => Err(mismatch()),
        }
    }

    /// Where the incoming region's origin lands in the union grid
    fn offset(self, existing: Grid) -> (i32, i32) {
        match self {
            MergeAxis::Vertical => (0, existing.height as i32),
            MergeAxis::Horizontal => (existing.width as i32, 0),
        }
    }
}

/// Position `i` in A and `j` in B where B can be spliced in after `A[i]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub after: usize,
    pub enter: usize,
}

/// Look for a connection pair between two cycles in union coordinates.
///
/// `rank_b[cell]` is the position of `cell` in `b`, or `usize::MAX` for
/// cells outside B.
fn find_connection(
    a: &[Position],
    b: &[Position],
    rank_b: &[usize],
    union: Grid,
) -> Option<Connection> {
    for (i, cell) in a.iter().enumerate() {
        let next = a[(i + 1) % a.len()];
        for neighbour in cell.neighbours() {
            let Some(index) = union.checked_index(neighbour) else {
                continue;
            };
            let j = rank_b[index];
            if j == usize::MAX {
                continue;
            }
            let exit = b[(j + b.len() - 1) % b.len()];
            if next.adjacent_to(exit).is_some() {
                return Some(Connection { after: i, enter: j });
            }
        }
    }
    None
}

/// Merge `incoming` (a cycle over `incoming_grid`) onto `existing` (a
/// cycle over `existing_grid`), returning the combined cycle and the grid
/// it covers.
///
/// An empty `existing` yields `incoming` unchanged. Fails with
/// [`PathError::NoConnection`] when no splice point exists; the caller
/// should retry with a different `incoming`.
pub fn merge_cycles(
    existing: &[usize],
    existing_grid: Grid,
    incoming: &[usize],
    incoming_grid: Grid,
    axis: MergeAxis,
) -> Result<(Vec<usize>, Grid), PathError> {
    if existing.is_empty() {
        return Ok((incoming.to_vec(), incoming_grid));
    }
    let union = axis.union(existing_grid, incoming_grid)?;
    let (dx, dy) = axis.offset(existing_grid);

    let a: Vec<Position> = existing
        .iter()
        .map(|&i| existing_grid.position(i))
        .collect();
    let b: Vec<Position> = incoming
        .iter()
        .map(|&i| incoming_grid.position(i).moved_by(dx, dy))
        .collect();

    let mut rank_b = vec![usize::MAX; union.cell_count()];
    for (j, &cell) in b.iter().enumerate() {
        rank_b[union.index(cell)] = j;
    }

    let Connection { after, enter } =
        find_connection(&a, &b, &rank_b, union).ok_or(PathError::NoConnection)?;

    let mut merged = Vec::with_capacity(a.len() + b.len());
    for (i, &cell) in a.iter().enumerate() {
        merged.push(union.index(cell));
        if i == after {
            merged.extend((0..b.len()).map(|k| union.index(b[(enter + k) % b.len()])));
        }
    }

    Ok((merged, union))
}
