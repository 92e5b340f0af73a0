//! Concrete variable values returned by a satisfiable check

use super::{IntVar, SetId};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A model: one integer per declared variable.
///
/// The assignment is an owned snapshot of the solver state at the moment of
/// the check; appending to the constraint set afterwards does not touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    set: SetId,
    names: Vec<String>,
    values: Vec<i64>,
}

impl Assignment {
    pub(crate) fn new(set: SetId, names: Vec<String>, values: Vec<i64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { set, names, values }
    }

    /// Value of `var`, or `None` if the variable belongs to another set
    pub fn value(&self, var: IntVar) -> Option<i64> {
        if var.set_id() != self.set {
            return None;
        }
        self.values.get(var.index()).copied()
    }

    /// Value of the variable called `name`
    pub fn get(&self, name: &str) -> Option<i64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|index| self.values[index])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_handle_and_name() {
        let set = SetId::fresh();
        let assignment = Assignment::new(set, vec!["x".into(), "y".into()], vec![7, -2]);

        assert_eq!(assignment.value(IntVar::new(set, 1)), Some(-2));
        assert_eq!(assignment.get("x"), Some(7));
        assert_eq!(assignment.get("z"), None);
        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.to_string(), "{x=7, y=-2}");
    }

    #[test]
    fn test_foreign_handle_has_no_value() {
        let assignment = Assignment::new(SetId::fresh(), vec!["x".into()], vec![1]);
        let foreign = IntVar::new(SetId::fresh(), 0);
        assert_eq!(assignment.value(foreign), None);
    }

    #[test]
    fn test_serializes_as_map() {
        let assignment = Assignment::new(SetId::fresh(), vec!["x".into(), "y".into()], vec![5, 15]);
        let json = serde_json::to_string(&assignment).unwrap();
        assert_eq!(json, r#"{"x":5,"y":15}"#);
    }
}
