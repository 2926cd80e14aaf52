//! Tests for the QFT and quantum counting.

use std::f64::consts::PI;

use num_complex::Complex64;
use proptest::prelude::*;
use qsat_adapter_sim::{SimulatorBackend, Statevector};
use qsat_core::{
    CoreError, CountEstimate, Formula, RegisterLayout, compile_count, qft, qft_inverse,
};
use qsat_hal::Backend;
use qsat_ir::{Circuit, QubitId};

const TOL: f64 = 1e-9;

/// Run the counting circuit and decode the most frequent register value.
fn most_frequent_estimate(raw: &[Vec<i32>], num_vars: u32, precision: u32) -> CountEstimate {
    let formula = Formula::from_ints(raw).unwrap();
    let circuit = compile_count(&formula, num_vars, precision).unwrap();
    let layout = RegisterLayout::counting(num_vars, formula.num_clauses() as u32, precision);
    let result = SimulatorBackend::new()
        .with_seed(7)
        .simulate(&circuit, 0, &layout.counting_qubits(), 1000)
        .unwrap();
    let (bits, _) = result.counts.most_frequent().unwrap();
    CountEstimate::from_bitstring(bits, num_vars).unwrap()
}

// ---------------------------------------------------------------------------
// QFT
// ---------------------------------------------------------------------------

#[test]
fn qft_produces_fourier_basis_state() {
    let t = 3u32;
    let dim = 1usize << t;
    for x in 0..dim {
        let mut sv = Statevector::from_int(t as usize, x as u64).unwrap();
        sv.evolve(&qft(t).unwrap()).unwrap();
        for k in 0..dim {
            let phase = 2.0 * PI * (x * k) as f64 / dim as f64;
            let expected = Complex64::from_polar(1.0 / (dim as f64).sqrt(), phase);
            assert!(
                (sv.amplitude(k) - expected).norm() < TOL,
                "x = {x}, k = {k}"
            );
        }
    }
}

proptest! {
    #[test]
    fn qft_inverse_undoes_qft(t in 1u32..=5, seed in any::<u64>()) {
        let x = seed % (1u64 << t);
        let mut sv = Statevector::from_int(t as usize, x).unwrap();
        sv.evolve(&qft(t).unwrap()).unwrap();
        sv.evolve(&qft_inverse(t).unwrap()).unwrap();
        let expected = Statevector::from_int(t as usize, x).unwrap();
        prop_assert!(sv.approx_eq(&expected, TOL));
    }
}

#[test]
fn qft_inverse_recovers_encoded_phase() {
    // Σ_y e^{2πi·5y/8}|y⟩ should decode to |5⟩
    let t = 3u32;
    let mut c = Circuit::with_size("phase", t);
    for k in 0..t {
        c.h(QubitId(k)).unwrap();
        c.p(2.0 * PI * 5.0 * f64::from(1u32 << k) / 8.0, QubitId(k)).unwrap();
    }
    let inverse = qft_inverse(t).unwrap();
    let all: Vec<QubitId> = (0..t).map(QubitId).collect();
    c.compose(&inverse, &all).unwrap();

    let mut sv = Statevector::new(t as usize);
    sv.evolve(&c).unwrap();
    assert!((sv.amplitude(5).norm_sqr() - 1.0).abs() < TOL);
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

#[test]
fn counts_four_solutions_of_three_variable_formula() {
    // (x1 ∨ ¬x2) ∧ (x2 ∨ x3) has 4 satisfying assignments
    let raw = vec![vec![1, -2], vec![2, 3]];
    let estimate = most_frequent_estimate(&raw, 3, 3);
    assert!(
        estimate.register_value == 2 || estimate.register_value == 6,
        "register value {}",
        estimate.register_value
    );
    assert_eq!(estimate.rounded(), 4);
}

#[test]
fn counts_two_solutions_with_low_precision() {
    let raw = vec![vec![1, 2, 3, 4], vec![2], vec![3], vec![4]];
    assert_eq!(most_frequent_estimate(&raw, 4, 3).rounded(), 2);
}

#[test]
fn counts_three_solutions_of_five_variables() {
    let raw = vec![vec![-1], vec![-2, 3], vec![-4], vec![5]];
    assert_eq!(most_frequent_estimate(&raw, 5, 5).rounded(), 3);
}

#[test]
fn counts_three_solutions_of_four_variables() {
    // y ≈ 9.12 with six counting qubits
    let raw = vec![vec![1, 2], vec![3], vec![-4]];
    let estimate = most_frequent_estimate(&raw, 4, 6);
    assert!(
        estimate.register_value == 9 || estimate.register_value == 55,
        "register value {}",
        estimate.register_value
    );
    assert_eq!(estimate.rounded(), 3);
}

#[test]
#[ignore = "slow without optimizations"]
fn counts_three_solutions_with_high_precision() {
    let raw = vec![vec![1, 2], vec![3], vec![-4]];
    assert_eq!(most_frequent_estimate(&raw, 4, 8).rounded(), 3);
}

#[test]
fn tautology_counts_every_assignment() {
    let estimate = most_frequent_estimate(&[], 2, 3);
    assert_eq!(estimate.register_value, 4);
    assert_eq!(estimate.rounded(), 4);
}

#[test]
fn counting_register_comes_first() {
    let formula = Formula::from_ints(&[vec![1, -2], vec![2, 3]]).unwrap();
    let circuit = compile_count(&formula, 3, 4).unwrap();
    assert_eq!(circuit.num_qubits(), 4 + 3 + 2 + 1);
    assert_eq!(circuit.qubits()[0].register.as_deref(), Some("count"));
    assert_eq!(circuit.qubits()[4].register.as_deref(), Some("x"));
}

#[test]
fn invalid_precision_is_rejected() {
    let formula = Formula::from_ints(&[[1]]).unwrap();
    assert!(matches!(
        compile_count(&formula, 1, 0),
        Err(CoreError::InvalidRegisterSize(_))
    ));
}

#[test]
fn counting_circuits_are_deterministic() {
    let formula = Formula::from_ints(&[vec![1, -2], vec![2, 3]]).unwrap();
    let a = compile_count(&formula, 3, 3).unwrap();
    let b = compile_count(&formula, 3, 3).unwrap();
    assert_eq!(a.instructions(), b.instructions());
}
