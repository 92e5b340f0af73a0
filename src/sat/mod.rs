//! SAT encoding and solving components

pub mod constraints;
pub mod encoder;
pub mod solver;
pub mod variables;

pub use constraints::Clause;
pub use encoder::BitBlaster;
pub use solver::{SatResult, SatSolver, SolverOptions};
pub use variables::VariableManager;
