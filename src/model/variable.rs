//! Integer variable handles and comparison terms

use super::predicate::{CmpOp, Predicate};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a constraint set; unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetId(u64);

impl SetId {
    pub(crate) fn fresh() -> Self {
        SetId(NEXT_SET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to an integer variable declared in a [`ConstraintSet`](super::ConstraintSet).
///
/// The handle is `Copy` and carries no name; the owning set resolves names.
/// Comparison builders accept another variable or an integer constant:
///
/// ```
/// use constraint_puzzles::model::ConstraintSet;
///
/// let mut set = ConstraintSet::new("demo");
/// let x = set.declare_variable("x").unwrap();
/// let y = set.declare_variable("y").unwrap();
/// set.submit(x.ge(0).and(x.lt(y))).unwrap();
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntVar {
    set: SetId,
    index: usize,
}

impl IntVar {
    pub(crate) fn new(set: SetId, index: usize) -> Self {
        Self { set, index }
    }

    /// Position of the variable in declaration order
    pub fn index(&self) -> usize {
        self.index
    }

    /// The constraint set this variable was declared in
    pub fn set_id(&self) -> SetId {
        self.set
    }

    pub fn lt(self, rhs: impl Into<Term>) -> Predicate {
        Predicate::compare(self, CmpOp::Lt, rhs)
    }

    pub fn le(self, rhs: impl Into<Term>) -> Predicate {
        Predicate::compare(self, CmpOp::Le, rhs)
    }

    pub fn eq(self, rhs: impl Into<Term>) -> Predicate {
        Predicate::compare(self, CmpOp::Eq, rhs)
    }

    pub fn ne(self, rhs: impl Into<Term>) -> Predicate {
        Predicate::compare(self, CmpOp::Ne, rhs)
    }

    pub fn gt(self, rhs: impl Into<Term>) -> Predicate {
        Predicate::compare(self, CmpOp::Gt, rhs)
    }

    pub fn ge(self, rhs: impl Into<Term>) -> Predicate {
        Predicate::compare(self, CmpOp::Ge, rhs)
    }
}

/// Operand of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    Var(IntVar),
    Const(i64),
}

impl Term {
    pub fn as_var(&self) -> Option<IntVar> {
        match self {
            Term::Var(var) => Some(*var),
            Term::Const(_) => None,
        }
    }
}

impl From<IntVar> for Term {
    fn from(var: IntVar) -> Self {
        Term::Var(var)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Const(value)
    }
}

impl From<i32> for Term {
    fn from(value: i32) -> Self {
        Term::Const(value as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_ids_are_unique() {
        let a = SetId::fresh();
        let b = SetId::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn test_comparison_builders() {
        let set = SetId::fresh();
        let x = IntVar::new(set, 0);
        let y = IntVar::new(set, 1);

        assert_eq!(
            x.le(10),
            Predicate::Compare { lhs: Term::Var(x), op: CmpOp::Le, rhs: Term::Const(10) }
        );
        assert_eq!(
            x.gt(y),
            Predicate::Compare { lhs: Term::Var(x), op: CmpOp::Gt, rhs: Term::Var(y) }
        );
        assert_eq!(Term::from(-3i64).as_var(), None);
        assert_eq!(Term::from(y).as_var(), Some(y));
    }
}
