//! CNF clauses

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    /// Create a ternary clause (three literals)
    pub fn ternary(lit1: i32, lit2: i32, lit3: i32) -> Self {
        Self {
            literals: vec![lit1, lit2, lit3],
        }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Highest variable id mentioned by the clause
    pub fn max_variable(&self) -> i32 {
        self.literals.iter().map(|lit| lit.abs()).max().unwrap_or(0)
    }
}
