//! Append-only constraint sets

use super::{Assignment, IntVar, Predicate, SetId, Term};
use crate::error::ModelError;
use itertools::Itertools;
use std::collections::HashMap;

/// Ordered, append-only collection of predicates, implicitly conjoined.
///
/// A constraint set is also the namespace its variables are declared in.
/// Not `Clone`: set ids must stay unique.
#[derive(Debug)]
pub struct ConstraintSet {
    id: SetId,
    label: String,
    names: Vec<String>,
    index: HashMap<String, usize>,
    predicates: Vec<Predicate>,
}

impl ConstraintSet {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: SetId::fresh(),
            label: label.into(),
            names: Vec::new(),
            index: HashMap::new(),
            predicates: Vec::new(),
        }
    }

    pub fn id(&self) -> SetId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Declare a new integer variable; names are unique within the set
    pub fn declare_variable(&mut self, name: impl Into<String>) -> Result<IntVar, ModelError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(ModelError::DuplicateName {
                name,
                label: self.label.clone(),
            });
        }

        let index = self.names.len();
        self.index.insert(name.clone(), index);
        self.names.push(name);
        Ok(IntVar::new(self.id, index))
    }

    /// Look up a declared variable by name
    pub fn variable(&self, name: &str) -> Option<IntVar> {
        self.index.get(name).map(|&index| IntVar::new(self.id, index))
    }

    pub fn name_of(&self, var: IntVar) -> Option<&str> {
        if var.set_id() != self.id {
            return None;
        }
        self.names.get(var.index()).map(String::as_str)
    }

    pub fn variables(&self) -> impl Iterator<Item = IntVar> + '_ {
        (0..self.names.len()).map(move |index| IntVar::new(self.id, index))
    }

    pub fn variable_count(&self) -> usize {
        self.names.len()
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }

    /// Append a predicate. Only checks that every variable belongs to this set.
    pub fn submit(&mut self, predicate: Predicate) -> Result<(), ModelError> {
        if predicate.variables().iter().any(|var| var.set_id() != self.id) {
            return Err(ModelError::ForeignVariable {
                label: self.label.clone(),
            });
        }
        self.predicates.push(predicate);
        Ok(())
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Whether `assignment` satisfies every submitted predicate
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.evaluate(assignment) == Some(true))
    }

    /// Human-readable rendering of a predicate using this set's names
    pub fn describe(&self, predicate: &Predicate) -> String {
        match predicate {
            Predicate::Compare { lhs, op, rhs } => {
                format!("{} {} {}", self.describe_term(lhs), op.symbol(), self.describe_term(rhs))
            }
            Predicate::And(children) if children.is_empty() => "true".to_string(),
            Predicate::Or(children) if children.is_empty() => "false".to_string(),
            Predicate::And(children) => {
                format!("({})", children.iter().map(|c| self.describe(c)).join(" && "))
            }
            Predicate::Or(children) => {
                format!("({})", children.iter().map(|c| self.describe(c)).join(" || "))
            }
            Predicate::Not(inner) => format!("!{}", self.describe(inner)),
            Predicate::Distinct(vars) => format!(
                "distinct({})",
                vars.iter().map(|&var| self.describe_term(&Term::Var(var))).join(", ")
            ),
        }
    }

    fn describe_term(&self, term: &Term) -> String {
        match term {
            Term::Var(var) => self.name_of(*var).unwrap_or("?").to_string(),
            Term::Const(value) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{all_different, bound};

    #[test]
    fn test_declare_variables() {
        let mut set = ConstraintSet::new("children");
        let alice = set.declare_variable("alice").unwrap();
        let ben = set.declare_variable("ben").unwrap();

        assert_eq!(alice.index(), 0);
        assert_eq!(ben.index(), 1);
        assert_eq!(set.variable("ben"), Some(ben));
        assert_eq!(set.name_of(alice), Some("alice"));
        assert_eq!(set.variable_count(), 2);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut set = ConstraintSet::new("fence");
        set.declare_variable("x").unwrap();

        let err = set.declare_variable("x").unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateName { name: "x".into(), label: "fence".into() }
        );
        assert_eq!(set.variable_count(), 1);
    }

    #[test]
    fn test_same_name_in_independent_sets() {
        let mut first = ConstraintSet::new("first");
        let mut second = ConstraintSet::new("second");
        let a = first.declare_variable("x").unwrap();
        let b = second.declare_variable("x").unwrap();

        assert_ne!(a, b);
        assert_eq!(second.name_of(a), None);
    }

    #[test]
    fn test_submit_appends_in_order() {
        let mut set = ConstraintSet::new("order");
        let v = set.declare_variable("v").unwrap();

        set.submit(bound(v, 1, 10)).unwrap();
        set.submit(v.ne(3)).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.predicates()[1], v.ne(3));
    }

    #[test]
    fn test_foreign_variable_rejected() {
        let mut set = ConstraintSet::new("mine");
        let mut other = ConstraintSet::new("theirs");
        let mine = set.declare_variable("a").unwrap();
        let theirs = other.declare_variable("b").unwrap();

        let err = set.submit(all_different(&[mine, theirs]).unwrap()).unwrap_err();
        assert_eq!(err, ModelError::ForeignVariable { label: "mine".into() });
        assert!(set.is_empty());
    }

    #[test]
    fn test_is_satisfied_by() {
        let mut set = ConstraintSet::new("check");
        let x = set.declare_variable("x").unwrap();
        let y = set.declare_variable("y").unwrap();
        set.submit(bound(x, 5, 10)).unwrap();
        set.submit(y.gt(x)).unwrap();

        let good = Assignment::new(set.id(), set.names().to_vec(), vec![5, 6]);
        let bad = Assignment::new(set.id(), set.names().to_vec(), vec![5, 5]);
        assert!(set.is_satisfied_by(&good));
        assert!(!set.is_satisfied_by(&bad));
    }

    #[test]
    fn test_describe() {
        let mut set = ConstraintSet::new("describe");
        let x = set.declare_variable("x").unwrap();
        let y = set.declare_variable("y").unwrap();

        assert_eq!(set.describe(&bound(x, 5, 10)), "(x >= 5 && x <= 10)");
        assert_eq!(set.describe(&!x.eq(y)), "!x == y");
        assert_eq!(
            set.describe(&all_different(&[x, y]).unwrap()),
            "distinct(x, y)"
        );
    }
}
