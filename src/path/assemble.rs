//! Building one Hamiltonian cycle over a whole grid from small ones.
//!
//! Columns of the layout are assembled top to bottom into vertical
//! strips, and strips are merged left to right onto the result. A failed
//! row merge regenerates only that sub-cycle; a failed strip merge
//! rebuilds the whole column.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cycle::Cycle;
use super::decompose::{SubgridLayout, decompose};
use super::error::PathError;
use super::generator::{GeneratorLimits, generate_cycle};
use super::merge::{MergeAxis, merge_cycles};
use crate::game::Grid;

/// Retry ceilings for the assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyLimits {
    /// Regenerations allowed for one sub-grid before giving up
    pub row_retries: usize,
    /// Rebuilds allowed for one column before giving up
    pub column_retries: usize,
    pub generator: GeneratorLimits,
}

impl Default for AssemblyLimits {
    fn default() -> Self {
        Self {
            row_retries: 10_000,
            column_retries: 1_000,
            generator: GeneratorLimits::default(),
        }
    }
}

/// Counters describing how much retrying an assembly needed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    pub subgrids: usize,
    pub row_retries: usize,
    pub column_retries: usize,
}

pub struct PathAssembler {
    limits: AssemblyLimits,
    report: AssemblyReport,
}

impl PathAssembler {
    pub fn new(limits: AssemblyLimits) -> Self {
        Self {
            limits,
            report: AssemblyReport::default(),
        }
    }

    /// Retry counters from the last call to [`PathAssembler::assemble`]
    pub fn report(&self) -> AssemblyReport {
        self.report
    }

    /// Build a Hamiltonian cycle covering `grid`.
    ///
    /// Fails up front with [`PathError::OddDimension`] if either side is
    /// odd or smaller than 2.
    pub fn assemble<R: Rng + ?Sized>(
        &mut self,
        grid: Grid,
        rng: &mut R,
    ) -> Result<Cycle, PathError> {
        self.report = AssemblyReport::default();
        let layout = decompose(grid)?;
        tracing::debug!(
            width = grid.width,
            height = grid.height,
            columns = layout.columns(),
            rows = layout.rows(),
            "decomposed grid"
        );

        let mut result: Vec<usize> = Vec::new();
        let mut result_grid = Grid::new(0, grid.height);

        for column in 0..layout.columns() {
            let mut attempts = 0;
            loop {
                let (strip, strip_grid) = self.build_column(&layout, column, rng)?;
                let merged =
                    merge_cycles(&result, result_grid, &strip, strip_grid, MergeAxis::Horizontal);
                match merged {
                    Ok((merged, merged_grid)) => {
                        result = merged;
                        result_grid = merged_grid;
                        break;
                    }
                    Err(PathError::NoConnection) => {
                        attempts += 1;
                        self.report.column_retries += 1;
                        tracing::debug!(
                            column,
                            attempts,
                            "strip did not connect, rebuilding column"
                        );
                        if attempts > self.limits.column_retries {
                            return Err(PathError::RetriesExhausted {
                                stage: "column",
                                attempts,
                            });
                        }
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        let cycle = Cycle::new(result_grid, result)?;
        tracing::info!(
            width = grid.width,
            height = grid.height,
            subgrids = self.report.subgrids,
            row_retries = self.report.row_retries,
            column_retries = self.report.column_retries,
            "hamiltonian cycle assembled"
        );
        Ok(cycle)
    }

    /// Stack the sub-cycles of one layout column into a vertical strip
    fn build_column<R: Rng + ?Sized>(
        &mut self,
        layout: &SubgridLayout,
        column: usize,
        rng: &mut R,
    ) -> Result<(Vec<usize>, Grid), PathError> {
        let mut strip: Vec<usize> = Vec::new();
        let mut strip_grid = Grid::new(layout.widths[column], 0);

        for (row, subgrid) in layout.column(column).enumerate() {
            let mut attempts = 0;
            loop {
                let sub_cycle = generate_cycle(subgrid, self.limits.generator, rng)?;
                self.report.subgrids += 1;
                match merge_cycles(&strip, strip_grid, &sub_cycle, subgrid, MergeAxis::Vertical) {
                    Ok((merged, merged_grid)) => {
                        strip = merged;
                        strip_grid = merged_grid;
                        break;
                    }
                    Err(PathError::NoConnection) => {
                        attempts += 1;
                        self.report.row_retries += 1;
                        tracing::debug!(
                            column,
                            row,
                            attempts,
                            "sub-cycle did not connect, regenerating"
                        );
                        if attempts > self.limits.row_retries {
                            return Err(PathError::RetriesExhausted {
                                stage: "row",
                                attempts,
                            });
                        }
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        Ok((strip, strip_grid))
    }
}

impl Default for PathAssembler {
    fn default() -> Self {
        Self::new(AssemblyLimits::default())
    }
}

/// Assemble a cycle for `grid` with default limits
pub fn hamiltonian_cycle<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Result<Cycle, PathError> {
    PathAssembler::default().assemble(grid, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::cycle::is_hamiltonian;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_single_subgrid() {
        let mut rng = StdRng::seed_from_u64(11);
        let cycle = hamiltonian_cycle(Grid::new(4, 4), &mut rng).unwrap();
        assert_eq!(cycle.len(), 16);
        assert_eq!(cycle.grid(), Grid::new(4, 4));
    }

    #[test]
    fn test_multi_column_grid() {
        let grid = Grid::new(14, 10);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut assembler = PathAssembler::default();
        let cycle = assembler.assemble(grid, &mut rng).unwrap();

        assert_eq!(cycle.len(), 140);
        assert!(is_hamiltonian(grid, cycle.order()));
        // 3 columns x 2 rows, plus any regenerated sub-cycles
        assert!(assembler.report().subgrids >= 6);
    }

    #[test]
    fn test_rejects_odd_grid() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = hamiltonian_cycle(Grid::new(7, 4), &mut rng).unwrap_err();
        assert_eq!(err, PathError::OddDimension { width: 7, height: 4 });
    }

    #[test]
    fn test_same_seed_same_cycle() {
        let grid = Grid::new(10, 8);
        let a = hamiltonian_cycle(grid, &mut StdRng::seed_from_u64(77)).unwrap();
        let b = hamiltonian_cycle(grid, &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_row_ceiling_surfaces() {
        // With zero retries any unlucky merge fails, so try seeds until one does.
        let limits = AssemblyLimits {
            row_retries: 0,
            column_retries: 0,
            ..Default::default()
        };
        let grid = Grid::new(12, 12);
        let failure = (0..64).find_map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            PathAssembler::new(limits).assemble(grid, &mut rng).err()
        });
        assert!(matches!(failure, Some(PathError::RetriesExhausted { .. })));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_assembled_cycle_covers_grid(
            half_w in 1usize..=8,
            half_h in 1usize..=8,
            seed in any::<u64>(),
        ) {
            let grid = Grid::new(half_w * 2, half_h * 2);
            let mut rng = StdRng::seed_from_u64(seed);
            let cycle = hamiltonian_cycle(grid, &mut rng).unwrap();
            prop_assert_eq!(cycle.len(), grid.cell_count());
            prop_assert!(is_hamiltonian(grid, cycle.order()));
        }
    }
}
