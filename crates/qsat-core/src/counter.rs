//! Quantum counting: phase estimation of the Grover iteration.
//!
//! The Grover iteration has eigenvalues `e^{±iθ}` on the span of the
//! solution and non-solution states, with `sin²(θ/2) = M / 2^n`. Phase
//! estimation with a `t`-qubit counting register reads `y ≈ θ·2^t / 2π`
//! (or `2^t − y` for the conjugate eigenvalue); both decode to the same
//! solution count.

use std::f64::consts::PI;

use serde::Serialize;
use tracing::debug;

use qsat_ir::{Circuit, QubitId};

use crate::cnf::Formula;
use crate::error::{CoreError, CoreResult};
use crate::grover::grover_iteration;
use crate::layout::RegisterLayout;
use crate::qft::qft_inverse;

/// Build the counting circuit over `t + n + m + 1` qubits.
///
/// The counting register is qubits `0..t` (qubit 0 least significant);
/// the Grover register follows. Measuring the counting register yields
/// `y`, decoded by [`estimate_solutions`].
pub fn quantum_counter(formula: &Formula, num_vars: u32, precision: u32) -> CoreResult<Circuit> {
    if precision == 0 {
        return Err(CoreError::InvalidRegisterSize(
            "counting precision must be at least 1".into(),
        ));
    }
    if precision >= u64::BITS {
        return Err(CoreError::InvalidRegisterSize(format!(
            "counting precision {precision} is too large"
        )));
    }
    let grover = grover_iteration(formula, num_vars)?;
    let controlled = grover.controlled()?;
    let layout = RegisterLayout::counting(num_vars, formula.num_clauses() as u32, precision);
    let targets = layout.search_qubits();

    let mut circuit = Circuit::new("quantum_counter");
    circuit.add_qreg("count", precision);
    circuit.add_qreg("x", num_vars);
    circuit.add_qreg("flag", 1);
    circuit.add_qreg("clause", layout.num_clauses);

    for q in 0..precision + num_vars {
        circuit.h(QubitId(q))?;
    }

    // 2^t − 1 controlled iterations in total
    let too_large = || {
        CoreError::InvalidRegisterSize(format!(
            "counting precision {precision} needs more instructions than fit in memory"
        ))
    };
    let total = 1usize
        .checked_shl(precision)
        .and_then(|repeats| controlled.num_ops().checked_mul(repeats - 1))
        .ok_or_else(too_large)?;
    circuit.try_reserve(total).map_err(|_| too_large())?;

    for k in 0..precision {
        let mut mapping = Vec::with_capacity(targets.len() + 1);
        mapping.push(QubitId(k));
        mapping.extend_from_slice(&targets);
        // Same instruction sequence as controlled(power(G, 2^k)).
        circuit.compose(&controlled.power(1 << k)?, &mapping)?;
    }

    circuit.compose(&qft_inverse(precision)?, &layout.counting_qubits())?;

    debug!(
        num_vars,
        precision,
        qubits = circuit.num_qubits(),
        ops = circuit.num_ops(),
        "built quantum counting circuit"
    );
    Ok(circuit)
}

/// Decode a counting-register value into an estimated number of solutions.
///
/// `θ = 2π·y / 2^t`, `M̂ = 2^n · sin²(θ/2)`.
pub fn estimate_solutions(register_value: u64, num_vars: u32, precision: u32) -> f64 {
    CountEstimate::from_register(register_value, num_vars, precision).solutions
}

/// A decoded counting measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountEstimate {
    /// Measured counting-register value `y`.
    pub register_value: u64,
    /// Estimated eigenphase `θ`.
    pub theta: f64,
    /// Estimated number of solutions `M̂` (not rounded).
    pub solutions: f64,
}

impl CountEstimate {
    /// Decode `register_value` for `num_vars` variables and `precision` counting qubits.
    pub fn from_register(register_value: u64, num_vars: u32, precision: u32) -> Self {
        let theta = 2.0 * PI * register_value as f64 / 2f64.powi(precision as i32);
        let solutions = 2f64.powi(num_vars as i32) * (theta / 2.0).sin().powi(2);
        Self {
            register_value,
            theta,
            solutions,
        }
    }

    /// Decode a counting-register bitstring where character `k` is qubit `k`.
    ///
    /// Returns `None` if the string contains anything but `0` and `1`.
    pub fn from_bitstring(bits: &str, num_vars: u32) -> Option<Self> {
        let mut value = 0u64;
        for (k, ch) in bits.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => value |= 1 << k,
                _ => return None,
            }
        }
        Some(Self::from_register(value, num_vars, bits.len() as u32))
    }

    /// The estimate rounded to the nearest integer count.
    pub fn rounded(&self) -> u64 {
        self.solutions.round().max(0.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_width_and_prefix() {
        let formula = Formula::from_ints(&[vec![1, -2], vec![2, 3]]).unwrap();
        let c = quantum_counter(&formula, 3, 3).unwrap();
        assert_eq!(c.num_qubits(), 3 + 3 + 2 + 1);
        // H on counting and variable registers first
        assert!(c.instructions()[..6].iter().all(|i| i.name() == "h"));
        let h_targets: Vec<_> = c.instructions()[..6].iter().map(|i| i.qubits[0]).collect();
        assert_eq!(h_targets, (0..6).map(QubitId).collect::<Vec<_>>());
    }

    #[test]
    fn test_controlled_iterations_use_counting_qubit() {
        let formula = Formula::from_ints(&[[1]]).unwrap();
        let g = grover_iteration(&formula, 1).unwrap();
        let c = quantum_counter(&formula, 1, 2).unwrap();
        // 3 H, then G·2^0 + G·2^1 controlled ops, then inverse QFT(2) = 4 ops
        assert_eq!(c.num_ops(), 3 + 3 * g.num_ops() + 4);
        let first_controlled = &c.instructions()[3];
        assert_eq!(first_controlled.qubits[0], QubitId(0));
        let second_block = &c.instructions()[3 + g.num_ops()];
        assert_eq!(second_block.qubits[0], QubitId(1));
    }

    #[test]
    fn test_zero_precision_rejected() {
        let formula = Formula::from_ints(&[[1]]).unwrap();
        assert!(matches!(
            quantum_counter(&formula, 1, 0),
            Err(CoreError::InvalidRegisterSize(_))
        ));
    }

    #[test]
    fn test_oversized_precision_rejected() {
        let formula = Formula::from_ints(&[[1]]).unwrap();
        assert!(matches!(
            quantum_counter(&formula, 1, 60),
            Err(CoreError::InvalidRegisterSize(_))
        ));
    }

    #[test]
    fn test_estimate_solutions() {
        // θ = π/2 for y = 2, t = 3 -> 8 · sin²(π/4) = 4
        assert!((estimate_solutions(2, 3, 3) - 4.0).abs() < 1e-9);
        assert!((estimate_solutions(6, 3, 3) - 4.0).abs() < 1e-9);
        assert!(estimate_solutions(0, 3, 3).abs() < 1e-12);
    }

    #[test]
    fn test_from_bitstring_is_little_endian() {
        // char 0 = qubit 0: "010" = 2
        let est = CountEstimate::from_bitstring("010", 3).unwrap();
        assert_eq!(est.register_value, 2);
        assert_eq!(est.rounded(), 4);
        assert!(CountEstimate::from_bitstring("01x", 3).is_none());
    }
}
