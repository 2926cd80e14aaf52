//! Grover search over CNF assignments.

use std::f64::consts::PI;

use qsat_ir::{Circuit, QubitId};
use tracing::debug;

use crate::cnf::Formula;
use crate::diffuser::diffuser;
use crate::error::CoreResult;
use crate::layout::RegisterLayout;
use crate::oracle::{compile_clauses, to_phase_oracle};

/// One Grover iteration `G = D · O` over `n + m + 1` qubits.
///
/// `O` is the phase oracle of `formula`; `D` is the diffuser on the input
/// register `0..n`. Flag and ancillas are left at |0⟩.
pub fn grover_iteration(formula: &Formula, num_vars: u32) -> CoreResult<Circuit> {
    let oracle = to_phase_oracle(&compile_clauses(formula, num_vars)?, num_vars)?;
    let layout = RegisterLayout::search(num_vars, formula.num_clauses() as u32);

    let mut circuit = oracle.with_name("grover_iteration");
    circuit.compose(&diffuser(num_vars)?, &layout.inputs())?;
    Ok(circuit)
}

/// Full Grover search circuit: uniform superposition then `iterations` rounds.
///
/// With zero iterations the circuit only prepares the uniform superposition
/// over the input register.
pub fn grover(formula: &Formula, num_vars: u32, iterations: usize) -> CoreResult<Circuit> {
    let iteration = grover_iteration(formula, num_vars)?;
    let layout = RegisterLayout::search(num_vars, formula.num_clauses() as u32);
    let all: Vec<QubitId> = layout.search_qubits();

    let mut circuit = Circuit::with_size("grover", layout.width());
    for q in layout.inputs() {
        circuit.h(q)?;
    }
    circuit.compose(&iteration.power(iterations)?, &all)?;

    debug!(
        num_vars,
        iterations,
        qubits = circuit.num_qubits(),
        ops = circuit.num_ops(),
        "built Grover search circuit"
    );
    Ok(circuit)
}

/// Optimal number of Grover iterations, `(π/4)·√(2^n / M)`.
///
/// Returns infinity when `num_solutions` is zero.
pub fn optimal_iterations(num_vars: u32, num_solutions: u64) -> f64 {
    let space = 2f64.powi(num_vars as i32);
    (PI / 4.0) * (space / num_solutions as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_width() {
        let formula = Formula::from_ints(&[vec![1, -2], vec![2, 3]]).unwrap();
        let g = grover_iteration(&formula, 3).unwrap();
        assert_eq!(g.num_qubits(), 6);
    }

    #[test]
    fn test_zero_iterations_is_uniform_preparation() {
        let formula = Formula::from_ints(&[[1], [2]]).unwrap();
        let c = grover(&formula, 2, 0).unwrap();
        assert_eq!(c.num_ops(), 2);
        assert!(c.instructions().iter().all(|i| i.name() == "h"));
    }

    #[test]
    fn test_op_count_scales_with_iterations() {
        let formula = Formula::from_ints(&[[1], [2]]).unwrap();
        let g = grover_iteration(&formula, 2).unwrap();
        let c = grover(&formula, 2, 3).unwrap();
        assert_eq!(c.num_ops(), 2 + 3 * g.num_ops());
    }

    #[test]
    fn test_optimal_iterations() {
        assert!((optimal_iterations(2, 1) - PI / 2.0).abs() < 1e-12);
        assert!((optimal_iterations(4, 4) - PI / 2.0).abs() < 1e-12);
        assert!(optimal_iterations(3, 0).is_infinite());
    }
}
