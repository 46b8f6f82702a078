//! Error types for Hamiltonian cycle construction.

use thiserror::Error;

/// Errors arising while generating, merging or assembling cycles.
///
/// `GenerationExhausted` and `NoConnection` are routine: the assembler
/// consumes them in its retry loops. The rest reach the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("grid {width}x{height} cannot be decomposed: sides must be even and at least 2")]
    OddDimension { width: usize, height: usize },

    #[error("grid {width}x{height} has no cells")]
    EmptyGrid { width: usize, height: usize },

    #[error("backtracking search found no cycle on a {width}x{height} grid")]
    GenerationExhausted { width: usize, height: usize },

    #[error("no connection pair between the two cycles")]
    NoConnection,

    #[error("regions {existing:?} and {incoming:?} do not share a full border")]
    RegionMismatch {
        existing: (usize, usize),
        incoming: (usize, usize),
    },

    #[error("gave up after {attempts} {stage} retries")]
    RetriesExhausted { stage: &'static str, attempts: usize },

    #[error("not a Hamiltonian cycle: {0}")]
    InvalidCycle(String),
}
