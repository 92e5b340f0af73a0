//! Model building: typed integer variables, predicates and constraint sets

pub mod assignment;
pub mod constraint_set;
pub mod predicate;
pub mod variable;

pub use assignment::Assignment;
pub use constraint_set::ConstraintSet;
pub use predicate::{all_different, and, bound, not, one_of, or, CmpOp, Predicate};
pub use variable::{IntVar, SetId, Term};
