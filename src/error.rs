//! Error types for model building and solving

use thiserror::Error;

/// Errors raised while building a constraint set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("variable `{name}` is already declared in constraint set `{label}`")]
    DuplicateName { name: String, label: String },

    #[error("one_of requires at least one candidate value")]
    EmptyValues,

    #[error("all_different requires at least one variable")]
    EmptyVariables,

    #[error("predicate references a variable that does not belong to constraint set `{label}`")]
    ForeignVariable { label: String },

    #[error("constant {value} does not fit in {bit_width}-bit integers")]
    ConstantOutOfRange { value: i64, bit_width: u32 },
}

/// Errors raised while checking or enumerating a constraint set
#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The collaborator gave up (resource limit or timeout) without deciding.
    #[error("solver could not decide constraint set `{label}`")]
    Indeterminate { label: String },

    #[error("cannot sample `{subject}`: the enumerated domain is empty")]
    EmptyDomain { subject: String },

    #[error("integer width must be between 2 and 32 bits, got {bit_width}")]
    UnsupportedWidth { bit_width: u32 },

    #[error("assignment has no value for variable `{name}`")]
    UnknownVariable { name: String },

    #[error("solver model violates constraint set `{label}`")]
    ModelMismatch { label: String },

    /// Initialization or transport failure of the external solver.
    #[error("solver collaborator failure: {0}")]
    Collaborator(String),
}

/// Coarse classification used when reporting a failed puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Model,
    Indeterminate,
    EmptyDomain,
    Collaborator,
}

impl SolveError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SolveError::Model(_)
            | SolveError::UnsupportedWidth { .. }
            | SolveError::UnknownVariable { .. } => FailureKind::Model,
            SolveError::Indeterminate { .. } => FailureKind::Indeterminate,
            SolveError::EmptyDomain { .. } => FailureKind::EmptyDomain,
            SolveError::ModelMismatch { .. } | SolveError::Collaborator(_) => {
                FailureKind::Collaborator
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ModelError::DuplicateName {
            name: "x".to_string(),
            label: "fence".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "variable `x` is already declared in constraint set `fence`"
        );

        let err = SolveError::EmptyDomain { subject: "v".to_string() };
        assert!(err.to_string().contains("`v`"));

        let err = ModelError::ConstantOutOfRange {
            value: 10,
            bit_width: 4,
        };
        assert_eq!(err.to_string(), "constant 10 does not fit in 4-bit integers");
    }

    #[test]
    fn test_failure_kinds() {
        assert_eq!(SolveError::from(ModelError::EmptyValues).kind(), FailureKind::Model);
        assert_eq!(
            SolveError::Indeterminate { label: "a".into() }.kind(),
            FailureKind::Indeterminate
        );
        assert_eq!(
            SolveError::UnsupportedWidth { bit_width: 0 }.kind(),
            FailureKind::Model
        );
        assert_eq!(
            SolveError::Collaborator("boom".into()).kind(),
            FailureKind::Collaborator
        );
    }
}
