//! Hamiltonian cycle construction
//!
//! Small even grids are solved by randomized backtracking; larger grids are
//! decomposed into 2/4/6-sided sub-grids whose cycles are spliced together.

pub mod assemble;
pub mod cycle;
pub mod decompose;
pub mod error;
pub mod generator;
pub mod merge;

pub use assemble::{AssemblyLimits, AssemblyReport, PathAssembler, hamiltonian_cycle};
pub use cycle::Cycle;
pub use decompose::{SubgridLayout, decompose, reduce_dimension};
pub use error::PathError;
pub use generator::{GeneratorLimits, generate_cycle, try_generate};
pub use merge::{MergeAxis, merge_cycles};
