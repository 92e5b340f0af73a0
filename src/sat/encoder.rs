//! Bit-blasting encoder from integer predicates to CNF
//!
//! Integers are fixed-width two's-complement bit vectors. Every predicate
//! node is Tseitin-encoded into a single literal; constant inputs are folded
//! away so comparisons against constants stay small.

use super::constraints::Clause;
use super::variables::{VariableManager, VariableStatistics, FALSE_LITERAL, TRUE_LITERAL};
use crate::config::{MAX_BIT_WIDTH, MIN_BIT_WIDTH};
use crate::error::{ModelError, SolveError};
use crate::model::{CmpOp, Predicate, Term};
use itertools::Itertools;
use std::collections::HashMap;

/// Incremental CNF encoder for one constraint set
pub struct BitBlaster {
    variable_manager: VariableManager,
    /// Clauses produced since the last `take_clauses`
    pending: Vec<Clause>,
    clause_count: usize,
    /// Sorted AND-gate inputs to their output literal
    and_gates: HashMap<Vec<i32>, i32>,
}

impl BitBlaster {
    /// Encoder for `bit_width`-bit integers; the width must lie in 2..=32
    pub fn new(bit_width: u32) -> Result<Self, SolveError> {
        if !(MIN_BIT_WIDTH..=MAX_BIT_WIDTH).contains(&bit_width) {
            return Err(SolveError::UnsupportedWidth { bit_width });
        }

        let mut encoder = Self {
            variable_manager: VariableManager::new(bit_width),
            pending: Vec::new(),
            clause_count: 0,
            and_gates: HashMap::new(),
        };
        encoder.emit(Clause::unit(TRUE_LITERAL));
        Ok(encoder)
    }

    fn emit(&mut self, clause: Clause) {
        self.clause_count += 1;
        self.pending.push(clause);
    }

    /// Add clauses forcing `predicate` to hold.
    ///
    /// Nothing is emitted if a constant compared against a variable lies
    /// outside the representable range.
    pub fn assert(&mut self, predicate: &Predicate) -> Result<(), ModelError> {
        let (min, max) = (
            self.variable_manager.min_value(),
            self.variable_manager.max_value(),
        );
        if let Some(value) = predicate
            .constants()
            .into_iter()
            .find(|value| !(min..=max).contains(value))
        {
            return Err(ModelError::ConstantOutOfRange {
                value,
                bit_width: self.variable_manager.bit_width(),
            });
        }

        self.assert_holds(predicate);
        Ok(())
    }

    fn assert_holds(&mut self, predicate: &Predicate) {
        match predicate {
            Predicate::And(children) => {
                for child in children {
                    self.assert_holds(child);
                }
            }
            Predicate::Or(children) => {
                let literals = children.iter().map(|child| self.encode(child)).collect();
                self.assert_clause(literals);
            }
            _ => {
                let literal = self.encode(predicate);
                self.assert_clause(vec![literal]);
            }
        }
    }

    fn assert_clause(&mut self, literals: Vec<i32>) {
        if literals.contains(&TRUE_LITERAL) {
            return;
        }

        let mut literals: Vec<i32> = literals
            .into_iter()
            .filter(|&lit| lit != FALSE_LITERAL)
            .unique()
            .collect();
        if literals.is_empty() {
            // Contradicts the constant unit clause
            literals.push(FALSE_LITERAL);
        }
        self.emit(Clause::new(literals));
    }

    /// Literal equivalent to `predicate`
    fn encode(&mut self, predicate: &Predicate) -> i32 {
        match predicate {
            Predicate::Compare { lhs, op, rhs } => self.encode_compare(*lhs, *op, *rhs),
            Predicate::And(children) => {
                let literals = children.iter().map(|child| self.encode(child)).collect();
                self.and_gate(literals)
            }
            Predicate::Or(children) => {
                let literals = children.iter().map(|child| self.encode(child)).collect();
                self.or_gate(literals)
            }
            Predicate::Not(inner) => -self.encode(inner),
            Predicate::Distinct(vars) => {
                let bits: Vec<Vec<i32>> = vars
                    .iter()
                    .map(|var| self.variable_manager.int_bits(var.index()))
                    .collect();
                let literals = bits
                    .iter()
                    .tuple_combinations()
                    .map(|(a, b)| -self.equal(a, b))
                    .collect();
                self.and_gate(literals)
            }
        }
    }

    fn encode_compare(&mut self, lhs: Term, op: CmpOp, rhs: Term) -> i32 {
        match (lhs, rhs) {
            (Term::Const(a), Term::Const(b)) => Self::constant(op.holds(a, b)),
            (Term::Const(_), Term::Var(_)) => self.encode_compare(rhs, op.flipped(), lhs),
            (Term::Var(var), Term::Const(value)) => {
                let a = self.variable_manager.int_bits(var.index());
                let b = self.constant_bits(value);
                self.compare_bits(&a, op, &b)
            }
            (Term::Var(x), Term::Var(y)) => {
                let a = self.variable_manager.int_bits(x.index());
                let b = self.variable_manager.int_bits(y.index());
                self.compare_bits(&a, op, &b)
            }
        }
    }

    fn constant(value: bool) -> i32 {
        if value {
            TRUE_LITERAL
        } else {
            FALSE_LITERAL
        }
    }

    fn constant_bits(&self, value: i64) -> Vec<i32> {
        (0..self.variable_manager.bit_width())
            .map(|bit| Self::constant((value >> bit) & 1 == 1))
            .collect()
    }

    fn compare_bits(&mut self, a: &[i32], op: CmpOp, b: &[i32]) -> i32 {
        match op {
            CmpOp::Lt => self.less_than(a, b),
            CmpOp::Le => -self.less_than(b, a),
            CmpOp::Gt => self.less_than(b, a),
            CmpOp::Ge => -self.less_than(a, b),
            CmpOp::Eq => self.equal(a, b),
            CmpOp::Ne => -self.equal(a, b),
        }
    }

    fn equal(&mut self, a: &[i32], b: &[i32]) -> i32 {
        let literals = a
            .iter()
            .zip(b)
            .map(|(&x, &y)| self.xnor_gate(x, y))
            .collect();
        self.and_gate(literals)
    }

    /// Signed `a < b`, scanning from the least significant bit
    fn less_than(&mut self, a: &[i32], b: &[i32]) -> i32 {
        let sign = a.len() - 1;
        let mut less = FALSE_LITERAL;

        for bit in 0..a.len() {
            let (mut x, mut y) = (a[bit], b[bit]);
            if bit == sign {
                // Flipped sign bits order two's complement as unsigned
                x = -x;
                y = -y;
            }
            let bit_less = self.and_gate(vec![-x, y]);
            let bit_equal = self.xnor_gate(x, y);
            let carried = self.and_gate(vec![bit_equal, less]);
            less = self.or_gate(vec![bit_less, carried]);
        }

        less
    }

    fn and_gate(&mut self, literals: Vec<i32>) -> i32 {
        let mut inputs: Vec<i32> = Vec::with_capacity(literals.len());
        for lit in literals {
            if lit == FALSE_LITERAL || inputs.contains(&-lit) {
                return FALSE_LITERAL;
            }
            if lit != TRUE_LITERAL && !inputs.contains(&lit) {
                inputs.push(lit);
            }
        }

        if inputs.is_empty() {
            return TRUE_LITERAL;
        }
        if inputs.len() == 1 {
            return inputs[0];
        }

        inputs.sort_unstable();
        if let Some(&out) = self.and_gates.get(&inputs) {
            return out;
        }

        let out = self.variable_manager.gate();
        for &lit in &inputs {
            self.emit(Clause::binary(-out, lit));
        }
        let mut back: Vec<i32> = inputs.iter().map(|&lit| -lit).collect();
        back.push(out);
        self.emit(Clause::new(back));

        self.and_gates.insert(inputs, out);
        out
    }

    fn or_gate(&mut self, literals: Vec<i32>) -> i32 {
        -self.and_gate(literals.into_iter().map(|lit| -lit).collect())
    }

    fn xnor_gate(&mut self, a: i32, b: i32) -> i32 {
        if a == b {
            return TRUE_LITERAL;
        }
        if a == -b {
            return FALSE_LITERAL;
        }
        match (a, b) {
            (TRUE_LITERAL, other) | (other, TRUE_LITERAL) => other,
            (FALSE_LITERAL, other) | (other, FALSE_LITERAL) => -other,
            _ => {
                let out = self.variable_manager.gate();
                self.emit(Clause::ternary(-out, -a, b));
                self.emit(Clause::ternary(-out, a, -b));
                self.emit(Clause::ternary(out, a, b));
                self.emit(Clause::ternary(out, -a, -b));
                out
            }
        }
    }

    /// Drain the clauses produced since the previous call
    pub fn take_clauses(&mut self) -> Vec<Clause> {
        std::mem::take(&mut self.pending)
    }

    /// Integer value of variable `var` under a model.
    ///
    /// Returns `None` if the variable never appeared in an encoded predicate.
    pub fn decode(&self, var: usize, value: impl Fn(i32) -> bool) -> Option<i64> {
        let bits = self.variable_manager.existing_bits(var)?;
        let width = bits.len();

        let mut result: i64 = 0;
        for (bit, &lit) in bits.iter().enumerate() {
            if value(lit) {
                result |= 1 << bit;
            }
        }
        if result & (1 << (width - 1)) != 0 {
            result -= 1 << width;
        }
        Some(result)
    }

    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    pub fn variable_statistics(&self) -> VariableStatistics {
        self.variable_manager.statistics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{all_different, bound, ConstraintSet, IntVar};
    use crate::sat::solver::{SatResult, SatSolver};

    const WIDTH: u32 = 3;

    fn fix(encoder: &mut BitBlaster, var: IntVar, value: i64) {
        encoder.assert(&var.eq(value)).unwrap();
    }

    fn satisfiable(encoder: &mut BitBlaster) -> bool {
        let mut solver = SatSolver::new();
        solver.add_clauses(&encoder.take_clauses()).unwrap();
        solver.check() == SatResult::Satisfiable
    }

    #[test]
    fn test_comparisons_match_integer_semantics() {
        let ops = [CmpOp::Lt, CmpOp::Le, CmpOp::Eq, CmpOp::Ne, CmpOp::Gt, CmpOp::Ge];
        let mut set = ConstraintSet::new("compare");
        let x = set.declare_variable("x").unwrap();
        let y = set.declare_variable("y").unwrap();

        for op in ops {
            for a in -4..=3 {
                for b in -4..=3 {
                    let mut encoder = BitBlaster::new(WIDTH).unwrap();
                    fix(&mut encoder, x, a);
                    fix(&mut encoder, y, b);
                    encoder.assert(&Predicate::compare(x, op, y)).unwrap();
                    assert_eq!(satisfiable(&mut encoder), op.holds(a, b), "{} {:?} {}", a, op, b);
                }
            }
        }
    }

    #[test]
    fn test_constant_comparisons() {
        let mut set = ConstraintSet::new("constant");
        let x = set.declare_variable("x").unwrap();

        for a in -4..=3 {
            for c in -4i64..=3 {
                let mut encoder = BitBlaster::new(WIDTH).unwrap();
                fix(&mut encoder, x, a);
                encoder.assert(&Predicate::compare(c, CmpOp::Lt, x)).unwrap();
                assert_eq!(satisfiable(&mut encoder), c < a, "{} < {}", c, a);
            }
        }
    }

    #[test]
    fn test_out_of_range_constants_rejected() {
        let mut set = ConstraintSet::new("range");
        let x = set.declare_variable("x").unwrap();
        let mut encoder = BitBlaster::new(4).unwrap();

        // 4-bit integers span -8..=7
        assert!(encoder.assert(&bound(x, -8, 7)).is_ok());
        let emitted = encoder.clause_count();

        assert_eq!(
            encoder.assert(&bound(x, 1, 10)),
            Err(ModelError::ConstantOutOfRange {
                value: 10,
                bit_width: 4,
            })
        );
        assert_eq!(
            encoder.assert(&Predicate::compare(-9, CmpOp::Lt, x)),
            Err(ModelError::ConstantOutOfRange {
                value: -9,
                bit_width: 4,
            })
        );
        assert_eq!(encoder.clause_count(), emitted);

        // Constant-only comparisons never touch a bit vector
        assert!(encoder.assert(&Predicate::compare(100, CmpOp::Lt, 200)).is_ok());
        assert!(satisfiable(&mut encoder));
    }

    #[test]
    fn test_unsupported_widths() {
        for bit_width in [0, 1, 33, 64] {
            assert!(matches!(
                BitBlaster::new(bit_width),
                Err(SolveError::UnsupportedWidth { bit_width: w }) if w == bit_width
            ));
        }
        assert!(BitBlaster::new(2).is_ok());
        assert!(BitBlaster::new(32).is_ok());
    }

    #[test]
    fn test_distinct_encoding() {
        let mut set = ConstraintSet::new("distinct");
        let a = set.declare_variable("a").unwrap();
        let b = set.declare_variable("b").unwrap();

        let mut encoder = BitBlaster::new(WIDTH).unwrap();
        fix(&mut encoder, a, 2);
        fix(&mut encoder, b, 2);
        encoder.assert(&all_different(&[a, b]).unwrap()).unwrap();
        assert!(!satisfiable(&mut encoder));

        let mut encoder = BitBlaster::new(WIDTH).unwrap();
        encoder.assert(&all_different(&[a, a]).unwrap()).unwrap();
        assert!(!satisfiable(&mut encoder));

        let mut encoder = BitBlaster::new(WIDTH).unwrap();
        assert_eq!(encoder.encode(&all_different(&[a]).unwrap()), TRUE_LITERAL);
    }

    #[test]
    fn test_empty_disjunction_is_unsatisfiable() {
        let mut encoder = BitBlaster::new(WIDTH).unwrap();
        encoder.assert(&Predicate::Or(vec![])).unwrap();
        assert!(!satisfiable(&mut encoder));
    }

    #[test]
    fn test_decode_negative_values() {
        let mut set = ConstraintSet::new("decode");
        let x = set.declare_variable("x").unwrap();
        let mut encoder = BitBlaster::new(4).unwrap();
        let bits = encoder.variable_manager.int_bits(x.index());

        // 0b1101 is -3 in four-bit two's complement
        let pattern = [true, false, true, true];
        let value = |lit: i32| {
            let bit = bits.iter().position(|&b| b == lit).unwrap();
            pattern[bit]
        };
        assert_eq!(encoder.decode(x.index(), value), Some(-3));
        assert_eq!(encoder.decode(5, |_| true), None);
    }

    #[test]
    fn test_and_gates_are_shared() {
        let mut set = ConstraintSet::new("share");
        let x = set.declare_variable("x").unwrap();
        let mut encoder = BitBlaster::new(WIDTH).unwrap();

        let first = encoder.encode(&x.ge(1));
        let clauses = encoder.clause_count();
        let second = encoder.encode(&x.ge(1));
        assert_eq!(first, second);
        assert_eq!(encoder.clause_count(), clauses);
    }
}
