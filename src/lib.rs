//! Constraint puzzles over a SAT decision procedure
//!
//! Integer constraint sets are bit-blasted to CNF and decided by CaDiCaL.
//! The solve layer retrieves one solution, enumerates every solution by
//! blocking, or samples uniformly among them.

pub mod config;
pub mod error;
pub mod model;
pub mod puzzles;
pub mod sat;
pub mod solve;
pub mod utils;

pub use config::Settings;
pub use error::{FailureKind, ModelError, SolveError};
pub use model::{Assignment, ConstraintSet, IntVar, Predicate};
pub use puzzles::{Puzzle, PuzzleReport, PuzzleResult};
pub use solve::Session;

use anyhow::Result;

/// Main entry point: run the selected puzzles, or all of them when empty
pub async fn run_puzzles(settings: &Settings, selection: &[Puzzle]) -> Result<Vec<PuzzleReport>> {
    puzzles::run_all(settings, selection).await
}
