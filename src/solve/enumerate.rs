//! Retrieval modes over a session: single solution, block-and-resolve
//! enumeration and uniform sampling

use super::session::{CheckOutcome, Session};
use crate::error::{ModelError, SolveError};
use crate::model::{or, Assignment, IntVar};
use rand::Rng;
use tracing::{debug, info};

/// Every distinct solution found by a blocking loop
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Enumeration<T = i64> {
    /// Solutions in the order the solver produced them
    pub values: Vec<T>,
    /// Satisfiability checks performed, including the final unsatisfiable one
    pub checks: usize,
}

impl<T> Enumeration<T> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Value of `var` in `assignment`
pub fn extract(assignment: &Assignment, var: IntVar) -> Result<i64, SolveError> {
    assignment
        .value(var)
        .ok_or_else(|| SolveError::UnknownVariable {
            name: format!("#{}", var.index()),
        })
}

fn extract_all(assignment: &Assignment, subjects: &[IntVar]) -> Result<Vec<i64>, SolveError> {
    subjects.iter().map(|&var| extract(assignment, var)).collect()
}

/// One check; `None` when the constraint set has no solution
pub async fn solve_one(
    session: &mut Session,
    subjects: &[IntVar],
) -> Result<Option<Vec<i64>>, SolveError> {
    match session.check().await? {
        CheckOutcome::Satisfiable(assignment) => Ok(Some(extract_all(&assignment, subjects)?)),
        CheckOutcome::Unsatisfiable => {
            debug!(event = "no_solution", label = %session.label());
            Ok(None)
        }
    }
}

/// Every value `subject` can take.
///
/// Each found value is blocked with `subject != value` before the next
/// check, so the loop makes at most `|domain| + 1` checks. The blocking
/// predicates stay in the session's constraint set.
pub async fn enumerate_all(
    session: &mut Session,
    subject: IntVar,
) -> Result<Enumeration, SolveError> {
    let mut values = Vec::new();
    let mut checks = 0;

    loop {
        let outcome = session.check().await?;
        checks += 1;

        match outcome {
            CheckOutcome::Satisfiable(assignment) => {
                let value = extract(&assignment, subject)?;
                values.push(value);
                session.submit(subject.ne(value))?;
            }
            CheckOutcome::Unsatisfiable => break,
        }
    }

    info!(
        event = "enumerate_end",
        label = %session.label(),
        solutions = values.len(),
        checks,
    );
    Ok(Enumeration { values, checks })
}

/// Distinct solutions over several subjects at once.
///
/// A found tuple is blocked as a whole, so two solutions may share values in
/// some positions. Stops early once `limit` tuples are found.
pub async fn enumerate_tuples(
    session: &mut Session,
    subjects: &[IntVar],
    limit: Option<usize>,
) -> Result<Enumeration<Vec<i64>>, SolveError> {
    if subjects.is_empty() {
        return Err(ModelError::EmptyVariables.into());
    }

    let mut values = Vec::new();
    let mut checks = 0;

    while limit.map_or(true, |limit| values.len() < limit) {
        let outcome = session.check().await?;
        checks += 1;

        match outcome {
            CheckOutcome::Satisfiable(assignment) => {
                let tuple = extract_all(&assignment, subjects)?;
                let differs = subjects.iter().zip(&tuple).map(|(&var, &value)| var.ne(value));
                session.submit(or(differs))?;
                values.push(tuple);
            }
            CheckOutcome::Unsatisfiable => break,
        }
    }

    info!(
        event = "enumerate_end",
        label = %session.label(),
        solutions = values.len(),
        checks,
        truncated = limit.is_some_and(|limit| values.len() >= limit),
    );
    Ok(Enumeration { values, checks })
}

/// Uniformly pick one of `values`
pub fn sample_from<R: Rng + ?Sized>(
    values: &[i64],
    subject: &str,
    rng: &mut R,
) -> Result<i64, SolveError> {
    if values.is_empty() {
        return Err(SolveError::EmptyDomain {
            subject: subject.to_string(),
        });
    }
    Ok(values[rng.random_range(0..values.len())])
}

/// Enumerate `subject` and pick one value uniformly at random
pub async fn sample<R: Rng + ?Sized>(
    session: &mut Session,
    subject: IntVar,
    rng: &mut R,
) -> Result<i64, SolveError> {
    let enumeration = enumerate_all(session, subject).await?;
    let name = session
        .constraint_set()
        .name_of(subject)
        .unwrap_or("?")
        .to_string();
    sample_from(&enumeration.values, &name, rng)
}
