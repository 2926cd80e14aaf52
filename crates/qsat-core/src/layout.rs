//! Qubit register layout.

use serde::Serialize;

use qsat_ir::QubitId;

/// Where every register lives in a search or counting circuit.
///
/// The search register is `inputs (n) | flag (1) | ancillas (m)`. A
/// counting circuit prepends `t` counting qubits and shifts the search
/// register up by `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegisterLayout {
    /// Number of CNF variables (`n`).
    pub num_vars: u32,
    /// Number of clauses (`m`), one ancilla each.
    pub num_clauses: u32,
    /// Counting-register size (`t`), 0 for search circuits.
    pub precision: u32,
}

impl RegisterLayout {
    /// Layout of the oracle / Grover register.
    pub fn search(num_vars: u32, num_clauses: u32) -> Self {
        Self::counting(num_vars, num_clauses, 0)
    }

    /// Layout of the quantum counting circuit.
    pub fn counting(num_vars: u32, num_clauses: u32, precision: u32) -> Self {
        Self {
            num_vars,
            num_clauses,
            precision,
        }
    }

    /// Qubits in the search register (`n + m + 1`).
    pub fn search_width(&self) -> u32 {
        self.num_vars + self.num_clauses + 1
    }

    /// Total circuit width.
    pub fn width(&self) -> u32 {
        self.precision + self.search_width()
    }

    /// Qubit holding variable `var` (1-based).
    pub fn input(&self, var: u32) -> QubitId {
        QubitId(self.precision + var - 1)
    }

    /// The input register.
    pub fn inputs(&self) -> Vec<QubitId> {
        (1..=self.num_vars).map(|v| self.input(v)).collect()
    }

    /// The flag qubit.
    pub fn flag(&self) -> QubitId {
        QubitId(self.precision + self.num_vars)
    }

    /// Ancilla of clause `clause` (0-based).
    pub fn ancilla(&self, clause: usize) -> QubitId {
        QubitId(self.precision + self.num_vars + 1 + clause as u32)
    }

    /// The clause-ancilla register.
    pub fn ancillas(&self) -> Vec<QubitId> {
        (0..self.num_clauses as usize).map(|j| self.ancilla(j)).collect()
    }

    /// The counting register, least significant qubit first.
    pub fn counting_qubits(&self) -> Vec<QubitId> {
        (0..self.precision).map(QubitId).collect()
    }

    /// The whole search register, in order.
    pub fn search_qubits(&self) -> Vec<QubitId> {
        (self.precision..self.width()).map(QubitId).collect()
    }
}
