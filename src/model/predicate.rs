//! Predicate trees and the typed builders that produce them

use super::{Assignment, IntVar, Term};
use crate::error::ModelError;
use itertools::Itertools;

/// Integer comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Lt,
    Le,
    Eq,
    Ne,
    Gt,
    Ge,
}

impl CmpOp {
    /// Evaluate `a <op> b`
    pub fn holds(self, a: i64, b: i64) -> bool {
        match self {
            CmpOp::Lt => a < b,
            CmpOp::Le => a <= b,
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
            CmpOp::Gt => a > b,
            CmpOp::Ge => a >= b,
        }
    }

    /// Operator with the operands swapped: `a < b` iff `b > a`
    pub fn flipped(self) -> Self {
        match self {
            CmpOp::Lt => CmpOp::Gt,
            CmpOp::Le => CmpOp::Ge,
            CmpOp::Gt => CmpOp::Lt,
            CmpOp::Ge => CmpOp::Le,
            CmpOp::Eq | CmpOp::Ne => self,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }
}

/// Boolean-valued expression over integer variables.
///
/// Leaves are comparisons, interior nodes are combinators. `And(vec![])` is
/// true and `Or(vec![])` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Compare { lhs: Term, op: CmpOp, rhs: Term },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    /// Pairwise distinctness over an ordered sequence of variables
    Distinct(Vec<IntVar>),
}

impl Predicate {
    pub fn compare(lhs: impl Into<Term>, op: CmpOp, rhs: impl Into<Term>) -> Self {
        Predicate::Compare {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
        }
    }

    pub fn and(self, other: Predicate) -> Self {
        match self {
            Predicate::And(mut children) => {
                children.push(other);
                Predicate::And(children)
            }
            first => Predicate::And(vec![first, other]),
        }
    }

    pub fn or(self, other: Predicate) -> Self {
        match self {
            Predicate::Or(mut children) => {
                children.push(other);
                Predicate::Or(children)
            }
            first => Predicate::Or(vec![first, other]),
        }
    }

    /// Every variable referenced by this predicate, in visiting order
    pub fn variables(&self) -> Vec<IntVar> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<IntVar>) {
        match self {
            Predicate::Compare { lhs, rhs, .. } => {
                vars.extend(lhs.as_var());
                vars.extend(rhs.as_var());
            }
            Predicate::And(children) | Predicate::Or(children) => {
                for child in children {
                    child.collect_variables(vars);
                }
            }
            Predicate::Not(inner) => inner.collect_variables(vars),
            Predicate::Distinct(distinct) => vars.extend(distinct.iter().copied()),
        }
    }

    /// Constants compared against a variable, in visiting order
    pub fn constants(&self) -> Vec<i64> {
        let mut constants = Vec::new();
        self.collect_constants(&mut constants);
        constants
    }

    fn collect_constants(&self, constants: &mut Vec<i64>) {
        match self {
            Predicate::Compare {
                lhs: Term::Var(_),
                rhs: Term::Const(c),
                ..
            }
            | Predicate::Compare {
                lhs: Term::Const(c),
                rhs: Term::Var(_),
                ..
            } => constants.push(*c),
            Predicate::Compare { .. } | Predicate::Distinct(_) => {}
            Predicate::And(children) | Predicate::Or(children) => {
                for child in children {
                    child.collect_constants(constants);
                }
            }
            Predicate::Not(inner) => inner.collect_constants(constants),
        }
    }

    /// Evaluate the predicate on a concrete assignment.
    ///
    /// Returns `None` when a referenced variable has no value in `assignment`.
    pub fn evaluate(&self, assignment: &Assignment) -> Option<bool> {
        let term = |t: &Term| match t {
            Term::Var(var) => assignment.value(*var),
            Term::Const(c) => Some(*c),
        };

        match self {
            Predicate::Compare { lhs, op, rhs } => Some(op.holds(term(lhs)?, term(rhs)?)),
            Predicate::And(children) => {
                let mut result = true;
                for child in children {
                    result &= child.evaluate(assignment)?;
                }
                Some(result)
            }
            Predicate::Or(children) => {
                let mut result = false;
                for child in children {
                    result |= child.evaluate(assignment)?;
                }
                Some(result)
            }
            Predicate::Not(inner) => inner.evaluate(assignment).map(|value| !value),
            Predicate::Distinct(vars) => {
                let values = vars
                    .iter()
                    .map(|var| assignment.value(*var))
                    .collect::<Option<Vec<_>>>()?;
                Some(values.iter().all_unique())
            }
        }
    }
}

impl std::ops::Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        match self {
            Predicate::Not(inner) => *inner,
            other => Predicate::Not(Box::new(other)),
        }
    }
}

/// Conjunction of all `predicates`
pub fn and(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::And(predicates.into_iter().collect())
}

/// Disjunction of all `predicates`
pub fn or(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::Or(predicates.into_iter().collect())
}

pub fn not(predicate: Predicate) -> Predicate {
    !predicate
}

/// `low <= v <= high`, both bounds inclusive.
///
/// `low > high` is not an error; the predicate is simply unsatisfiable.
pub fn bound(v: IntVar, low: i64, high: i64) -> Predicate {
    and([v.ge(low), v.le(high)])
}

/// `v` equals one of `values`
pub fn one_of(v: IntVar, values: &[i64]) -> Result<Predicate, ModelError> {
    if values.is_empty() {
        return Err(ModelError::EmptyValues);
    }
    Ok(or(values.iter().map(|&value| v.eq(value))))
}

/// Pairwise distinctness over `vars`; repeating a variable makes it unsatisfiable
pub fn all_different(vars: &[IntVar]) -> Result<Predicate, ModelError> {
    if vars.is_empty() {
        return Err(ModelError::EmptyVariables);
    }
    Ok(Predicate::Distinct(vars.to_vec()))
}
