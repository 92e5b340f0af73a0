//! SAT variable allocation for bit-blasted integers

use std::collections::HashMap;

/// Types of variables used in the SAT encoding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// Bit `bit` (LSB = 0) of integer variable `var`
    IntBit { var: usize, bit: u32 },
    /// Tseitin auxiliary for a predicate node
    Gate(usize),
}

/// Manages SAT variables and their mapping to integers
#[derive(Debug)]
pub struct VariableManager {
    /// Map from variable type to SAT variable ID (positive integer)
    variable_map: HashMap<VariableType, i32>,
    /// Bit literals of each integer variable, LSB first
    int_bits: HashMap<usize, Vec<i32>>,
    /// Next available variable ID
    next_id: i32,
    gate_count: usize,
    bit_width: u32,
}

/// Variable 1 is reserved and asserted true by the encoder
pub const TRUE_LITERAL: i32 = 1;
pub const FALSE_LITERAL: i32 = -TRUE_LITERAL;

impl VariableManager {
    /// Create a new variable manager
    pub fn new(bit_width: u32) -> Self {
        Self {
            variable_map: HashMap::new(),
            int_bits: HashMap::new(),
            next_id: TRUE_LITERAL + 1,
            gate_count: 0,
            bit_width,
        }
    }

    fn allocate(&mut self, var_type: VariableType) -> i32 {
        if let Some(&id) = self.variable_map.get(&var_type) {
            return id;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.variable_map.insert(var_type, id);
        id
    }

    /// Bit literals of integer variable `var`, allocated on first use
    pub fn int_bits(&mut self, var: usize) -> Vec<i32> {
        if let Some(bits) = self.int_bits.get(&var) {
            return bits.clone();
        }

        let bits: Vec<i32> = (0..self.bit_width)
            .map(|bit| self.allocate(VariableType::IntBit { var, bit }))
            .collect();
        self.int_bits.insert(var, bits.clone());
        bits
    }

    /// Bit literals of `var` if it has been encoded
    pub fn existing_bits(&self, var: usize) -> Option<&[i32]> {
        self.int_bits.get(&var).map(Vec::as_slice)
    }

    /// Fresh auxiliary variable
    pub fn gate(&mut self) -> i32 {
        let index = self.gate_count;
        self.gate_count += 1;
        self.allocate(VariableType::Gate(index))
    }

    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Smallest representable integer
    pub fn min_value(&self) -> i64 {
        -(1i64 << (self.bit_width - 1))
    }

    /// Largest representable integer
    pub fn max_value(&self) -> i64 {
        (1i64 << (self.bit_width - 1)) - 1
    }

    /// Get the total number of variables created, including the constant
    pub fn variable_count(&self) -> usize {
        (self.next_id - 1) as usize
    }

    /// Get statistics about variable usage
    pub fn statistics(&self) -> VariableStatistics {
        let mut bit_vars = 0;
        let mut gate_vars = 0;

        for var_type in self.variable_map.keys() {
            match var_type {
                VariableType::IntBit { .. } => bit_vars += 1,
                VariableType::Gate(_) => gate_vars += 1,
            }
        }

        VariableStatistics {
            total_variables: self.variable_count(),
            bit_variables: bit_vars,
            gate_variables: gate_vars,
        }
    }
}

/// Statistics about variable usage
#[derive(Debug, Clone)]
pub struct VariableStatistics {
    pub total_variables: usize,
    pub bit_variables: usize,
    pub gate_variables: usize,
}
