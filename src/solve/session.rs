//! Solver handle bound to one constraint set

use crate::config::Settings;
use crate::error::SolveError;
use crate::model::{Assignment, ConstraintSet, Predicate};
use crate::sat::{BitBlaster, SatResult, SatSolver, SolverOptions};
use std::time::Instant;
use tracing::{debug, trace};

/// Outcome of a decided satisfiability check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Satisfiable(Assignment),
    Unsatisfiable,
}

/// One puzzle's solver instance.
///
/// The session owns its constraint set and the CaDiCaL instance; both are
/// released when the session is dropped. Predicates reach the solver lazily,
/// on the next [`check`](Session::check).
pub struct Session {
    set: ConstraintSet,
    encoder: BitBlaster,
    /// `None` while a check is running on the blocking pool, or after a
    /// check future was dropped before completing
    solver: Option<SatSolver>,
    options: SolverOptions,
    bit_width: u32,
    /// Number of predicates already handed to the solver
    flushed: usize,
    verify_models: bool,
    checks: usize,
}

impl Session {
    /// Create a solver instance for `set`
    ///
    /// Fails with [`SolveError::UnsupportedWidth`] unless
    /// `settings.encoding.bit_width` lies in 2..=32.
    pub fn open(set: ConstraintSet, settings: &Settings) -> Result<Self, SolveError> {
        let bit_width = settings.encoding.bit_width;
        let encoder = BitBlaster::new(bit_width)?;
        let options = SolverOptions::from(settings);
        let solver = SatSolver::with_options(&options)?;

        Ok(Self {
            set,
            encoder,
            solver: Some(solver),
            options,
            bit_width,
            flushed: 0,
            verify_models: settings.solver.verify_models,
            checks: 0,
        })
    }

    pub fn label(&self) -> &str {
        self.set.label()
    }

    pub fn constraint_set(&self) -> &ConstraintSet {
        &self.set
    }

    /// Append a predicate to the constraint set
    pub fn submit(&mut self, predicate: Predicate) -> Result<(), SolveError> {
        trace!(
            event = "submit",
            label = %self.set.label(),
            predicate = %self.set.describe(&predicate),
        );
        self.set.submit(predicate)?;
        Ok(())
    }

    /// Number of satisfiability checks performed so far
    pub fn checks(&self) -> usize {
        self.checks
    }

    /// Replace a solver lost to a cancelled check; the whole set is
    /// re-encoded on the next flush
    fn restore(&mut self) -> Result<(), SolveError> {
        if self.solver.is_some() {
            return Ok(());
        }

        debug!(event = "restore", label = %self.set.label());
        self.solver = Some(SatSolver::with_options(&self.options)?);
        self.encoder = BitBlaster::new(self.bit_width)?;
        self.flushed = 0;
        Ok(())
    }

    /// Encode every predicate submitted since the previous check.
    ///
    /// A predicate whose constants do not fit the integer width is rejected
    /// before anything reaches the solver.
    fn flush(&mut self) -> Result<(), SolveError> {
        self.restore()?;

        while let Some(predicate) = self.set.predicates().get(self.flushed) {
            self.encoder.assert(predicate)?;
            self.flushed += 1;
        }

        let clauses = self.encoder.take_clauses();
        match self.solver.as_mut() {
            Some(solver) => solver.add_clauses(&clauses),
            None => Err(SolveError::Collaborator(format!(
                "solver for `{}` is unavailable",
                self.set.label()
            ))),
        }
    }

    /// Check satisfiability of everything submitted so far.
    ///
    /// The solver call runs on the blocking pool; this is the only suspension
    /// point. An `Unknown` answer is reported as [`SolveError::Indeterminate`].
    /// If the returned future is dropped before it completes, the next check
    /// starts over on a fresh solver instance.
    pub async fn check(&mut self) -> Result<CheckOutcome, SolveError> {
        self.flush()?;

        let mut solver = self.solver.take().ok_or_else(|| {
            SolveError::Collaborator(format!("solver for `{}` is unavailable", self.set.label()))
        })?;

        let started = Instant::now();
        let (solver, result) = tokio::task::spawn_blocking(move || {
            let result = solver.check();
            (solver, result)
        })
        .await
        .map_err(|e| SolveError::Collaborator(format!("satisfiability check failed: {}", e)))?;
        self.checks += 1;

        debug!(
            event = "check",
            label = %self.set.label(),
            result = ?result,
            predicates = self.set.len(),
            variables = solver.variable_count(),
            clauses = solver.clause_count(),
            elapsed_us = started.elapsed().as_micros() as u64,
        );

        let outcome = match result {
            SatResult::Satisfiable => CheckOutcome::Satisfiable(self.read_model(&solver)),
            SatResult::Unsatisfiable => CheckOutcome::Unsatisfiable,
            SatResult::Unknown => {
                self.solver = Some(solver);
                return Err(SolveError::Indeterminate {
                    label: self.set.label().to_string(),
                });
            }
        };
        self.solver = Some(solver);

        if let CheckOutcome::Satisfiable(assignment) = &outcome {
            if self.verify_models && !self.set.is_satisfied_by(assignment) {
                return Err(SolveError::ModelMismatch {
                    label: self.set.label().to_string(),
                });
            }
        }

        Ok(outcome)
    }

    /// Snapshot every declared variable; unencoded variables read as 0
    fn read_model(&self, solver: &SatSolver) -> Assignment {
        let values = (0..self.set.variable_count())
            .map(|index| {
                self.encoder
                    .decode(index, |lit| solver.value(lit))
                    .unwrap_or(0)
            })
            .collect();
        Assignment::new(self.set.id(), self.set.names().to_vec(), values)
    }

    /// Get encoding statistics
    pub fn statistics(&self) -> EncodingStatistics {
        let variables = self.encoder.variable_statistics();
        EncodingStatistics {
            label: self.set.label().to_string(),
            integer_variables: self.set.variable_count(),
            predicates: self.set.len(),
            sat_variables: variables.total_variables,
            bit_variables: variables.bit_variables,
            gate_variables: variables.gate_variables,
            clauses: self.encoder.clause_count(),
            checks: self.checks,
        }
    }
}

/// Statistics about the SAT encoding of one session
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub label: String,
    pub integer_variables: usize,
    pub predicates: usize,
    pub sat_variables: usize,
    pub bit_variables: usize,
    pub gate_variables: usize,
    pub clauses: usize,
    pub checks: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics ({}):", self.label)?;
        writeln!(f, "  Integer variables: {}", self.integer_variables)?;
        writeln!(f, "  Predicates: {}", self.predicates)?;
        writeln!(f, "  SAT variables: {}", self.sat_variables)?;
        writeln!(f, "  Bit variables: {}", self.bit_variables)?;
        writeln!(f, "  Gate variables: {}", self.gate_variables)?;
        writeln!(f, "  Clauses: {}", self.clauses)?;
        writeln!(f, "  Checks: {}", self.checks)?;
        Ok(())
    }
}
