//! qsat Core: Grover Search and Quantum Counting for CNF
//!
//! This crate compiles CNF formulas into quantum circuits:
//!
//! - [`compile_clauses`]: reversible evaluation of a formula into a flag qubit
//! - [`to_phase_oracle`]: phase kickback wrapper around a bit-flip oracle
//! - [`diffuser`]: the reflection about the uniform superposition
//! - [`grover_iteration`] / [`grover`]: amplitude amplification
//! - [`qft`] / [`qft_inverse`]: little-endian Fourier transform
//! - [`quantum_counter`]: phase estimation of the Grover iteration
//!
//! # Register Layout
//!
//! | Register | Search | Counting |
//! |----------|--------|----------|
//! | counting | (none) | `0..t` |
//! | inputs | `0..n` | `t..t+n` |
//! | flag | `n` | `t+n` |
//! | clause ancillas | `n+1..=n+m` | `t+n+1..=t+n+m` |
//!
//! Basis states are little-endian: bit `i` of a state index is qubit `i`.
//!
//! # Example
//!
//! ```rust
//! use qsat_core::{Formula, compile_search, compile_count};
//!
//! // (x1 ∨ ¬x2) ∧ (x2 ∨ x3)
//! let formula = Formula::from_ints(&[vec![1, -2], vec![2, 3]]).unwrap();
//!
//! let search = compile_search(&formula, 3, 1).unwrap();
//! assert_eq!(search.num_qubits(), 3 + 2 + 1);
//!
//! let count = compile_count(&formula, 3, 3).unwrap();
//! assert_eq!(count.num_qubits(), 3 + 3 + 2 + 1);
//! ```

pub mod cnf;
pub mod counter;
pub mod diffuser;
pub mod error;
pub mod grover;
pub mod layout;
pub mod oracle;
pub mod qft;
pub mod reversible;

pub use cnf::{Clause, Formula, Literal};
pub use counter::{CountEstimate, estimate_solutions, quantum_counter};
pub use diffuser::diffuser;
pub use error::{CoreError, CoreResult};
pub use grover::{grover, grover_iteration, optimal_iterations};
pub use layout::RegisterLayout;
pub use oracle::{compile_clauses, to_phase_oracle};
pub use qft::{qft, qft_inverse};
pub use reversible::{ComputeSection, ReversibleBuilder};

use qsat_ir::Circuit;

/// Compile a Grover search circuit with `num_iters` iterations.
///
/// The result acts on `num_vars + m + 1` qubits; measure qubits
/// `0..num_vars` to read a candidate assignment.
pub fn compile_search(formula: &Formula, num_vars: u32, num_iters: usize) -> CoreResult<Circuit> {
    grover(formula, num_vars, num_iters)
}

/// Compile a quantum counting circuit with `precision` counting qubits.
///
/// The first `precision` qubits are the counting register.
pub fn compile_count(formula: &Formula, num_vars: u32, precision: u32) -> CoreResult<Circuit> {
    quantum_counter(formula, num_vars, precision)
}
