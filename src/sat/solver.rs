//! SAT solver integration using CaDiCaL

use super::constraints::Clause;
use crate::config::{Settings, SolverPreset};
use crate::error::SolveError;
use cadical::{Solver, Timeout};
use std::time::Duration;

/// SAT solver wrapper for CaDiCaL
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
}

/// Result of a single satisfiability check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatResult {
    Satisfiable,
    Unsatisfiable,
    /// The solver stopped early (timeout or resource limit)
    Unknown,
}

/// Configuration options for the SAT solver
#[derive(Debug, Clone)]
pub struct SolverOptions {
    pub preset: SolverPreset,
    pub timeout: Option<Duration>,
}

impl From<&Settings> for SolverOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            preset: settings.solver.preset,
            timeout: settings.timeout(),
        }
    }
}

impl SatSolver {
    /// Create a new SAT solver instance with default options
    pub fn new() -> Self {
        Self::from_solver(Solver::new())
    }

    fn from_solver(solver: Solver) -> Self {
        Self {
            solver,
            variable_count: 0,
            clause_count: 0,
        }
    }

    /// Create a solver configured with `options`.
    ///
    /// Fails if CaDiCaL rejects the preset.
    pub fn with_options(options: &SolverOptions) -> Result<Self, SolveError> {
        let solver = Solver::with_config(options.preset.as_str()).map_err(|e| {
            SolveError::Collaborator(format!(
                "CaDiCaL rejected preset `{}`: {}",
                options.preset.as_str(),
                e.msg
            ))
        })?;

        let mut sat = Self::from_solver(solver);
        if let Some(timeout) = options.timeout {
            sat.set_timeout(timeout);
        }
        Ok(sat)
    }

    /// Limit the wall-clock time of every subsequent check
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.solver.set_callbacks(Some(Timeout::new(timeout.as_secs_f32())));
    }

    /// Add clauses to the solver
    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<(), SolveError> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }

    /// Add a single clause to the solver
    pub fn add_clause(&mut self, clause: &Clause) -> Result<(), SolveError> {
        if clause.is_empty() {
            return Err(SolveError::Collaborator(
                "cannot add an empty clause".to_string(),
            ));
        }

        self.variable_count = self.variable_count.max(clause.max_variable() as usize);
        self.solver.add_clause(clause.literals.iter().copied());
        self.clause_count += 1;
        Ok(())
    }

    /// Run one satisfiability check over every clause added so far
    pub fn check(&mut self) -> SatResult {
        match self.solver.solve() {
            Some(true) => SatResult::Satisfiable,
            Some(false) => SatResult::Unsatisfiable,
            None => SatResult::Unknown,
        }
    }

    /// Value of `literal` in the last model; only meaningful after `Satisfiable`
    pub fn value(&self, literal: i32) -> bool {
        // Variables that never reached the solver are unconstrained
        if literal.unsigned_abs() as usize > self.variable_count {
            return literal < 0;
        }
        self.solver.value(literal).unwrap_or(false)
    }

    /// Get the number of variables
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Get the number of clauses
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }
}
