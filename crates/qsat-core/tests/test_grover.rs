//! Tests for the diffuser and Grover search, run on the statevector simulator.

use num_complex::Complex64;
use qsat_adapter_sim::{SimulatorBackend, Statevector};
use qsat_core::{Formula, RegisterLayout, compile_search, diffuser, grover, grover_iteration};
use qsat_hal::Backend;
use qsat_ir::{Circuit, QubitId};

const TOL: f64 = 1e-9;

fn search_bitstring(raw: &[Vec<i32>], num_vars: u32, iterations: usize) -> String {
    let formula = Formula::from_ints(raw).unwrap();
    let circuit = compile_search(&formula, num_vars, iterations).unwrap();
    let inputs = RegisterLayout::search(num_vars, formula.num_clauses() as u32).inputs();
    let result = SimulatorBackend::new()
        .with_seed(2024)
        .simulate(&circuit, 0, &inputs, 1000)
        .unwrap();
    result.counts.most_frequent().unwrap().0.to_string()
}

// ---------------------------------------------------------------------------
// Diffuser
// ---------------------------------------------------------------------------

/// Prepare an arbitrary, non-uniform state on `n` qubits.
fn scrambled(n: u32) -> Circuit {
    let mut c = Circuit::with_size("scramble", n);
    for q in 0..n {
        c.h(QubitId(q)).unwrap();
        c.p(0.3 + 0.7 * f64::from(q), QubitId(q)).unwrap();
    }
    for q in 1..n {
        c.cx(QubitId(q - 1), QubitId(q)).unwrap();
        c.t(QubitId(q)).unwrap();
    }
    c.x(QubitId(0)).unwrap();
    c
}

#[test]
fn diffuser_is_reflection_about_uniform_state() {
    for n in 1..=4u32 {
        let prep = scrambled(n);
        let mut psi = Statevector::new(n as usize);
        psi.evolve(&prep).unwrap();

        let mut reflected = psi.clone();
        reflected.evolve(&diffuser(n).unwrap()).unwrap();

        // D|ψ⟩ = 2⟨s|ψ⟩|s⟩ − |ψ⟩
        let dim = 1usize << n;
        let amp_s = 1.0 / (dim as f64).sqrt();
        let overlap: Complex64 = psi.amplitudes().iter().map(|a| *a * amp_s).sum();
        for i in 0..dim {
            let expected = 2.0 * overlap * amp_s - psi.amplitude(i);
            assert!(
                (reflected.amplitude(i) - expected).norm() < TOL,
                "n = {n}, index {i}"
            );
        }
    }
}

#[test]
fn diffuser_fixes_uniform_state_with_positive_sign() {
    let n = 3;
    let mut uniform = Circuit::with_size("uniform", n);
    for q in 0..n {
        uniform.h(QubitId(q)).unwrap();
    }
    let mut sv = Statevector::new(n as usize);
    sv.evolve(&uniform).unwrap();
    let before = sv.clone();
    sv.evolve(&diffuser(n).unwrap()).unwrap();
    assert!(sv.approx_eq(&before, TOL));
}

// ---------------------------------------------------------------------------
// Grover search
// ---------------------------------------------------------------------------

#[test]
fn single_iteration_finds_unique_solution_of_two_vars() {
    // x1 ∧ x2: one Grover step on 4 states is exact
    let formula = Formula::from_ints(&[[1], [2]]).unwrap();
    let circuit = grover(&formula, 2, 1).unwrap();
    let mut sv = Statevector::new(circuit.num_qubits());
    sv.evolve(&circuit).unwrap();
    // |x1 = 1, x2 = 1, flag 0, ancillas 0⟩
    assert!((sv.amplitude(0b11).norm_sqr() - 1.0).abs() < TOL);

    assert_eq!(search_bitstring(&[vec![1], vec![2]], 2, 1), "11");
}

#[test]
fn search_finds_five_variable_assignment() {
    let raw = vec![vec![1], vec![-2], vec![-3], vec![4], vec![-5]];
    assert_eq!(search_bitstring(&raw, 5, 4), "10010");
}

#[test]
fn search_follows_implication_chain() {
    let raw = vec![vec![1], vec![-1, 2], vec![-2, 3], vec![-3, 4]];
    assert_eq!(search_bitstring(&raw, 4, 3), "1111");
}

#[test]
fn zero_iterations_gives_uniform_distribution() {
    let formula = Formula::from_ints(&[[1], [2]]).unwrap();
    let circuit = grover(&formula, 2, 0).unwrap();
    let mut sv = Statevector::new(circuit.num_qubits());
    sv.evolve(&circuit).unwrap();
    for x in 0..4 {
        assert!((sv.amplitude(x).norm_sqr() - 0.25).abs() < TOL);
    }
}

#[test]
fn grover_iteration_returns_work_qubits_to_zero() {
    let formula = Formula::from_ints(&[vec![1, -2], vec![2, 3]]).unwrap();
    let g = grover_iteration(&formula, 3).unwrap();
    let layout = RegisterLayout::search(3, 2);

    let mut circuit = Circuit::with_size("check", layout.width());
    for q in layout.inputs() {
        circuit.h(q).unwrap();
    }
    circuit.compose(&g, &layout.search_qubits()).unwrap();

    let mut sv = Statevector::new(circuit.num_qubits());
    sv.evolve(&circuit).unwrap();
    let input_mass: f64 = (0..8).map(|x| sv.amplitude(x).norm_sqr()).sum();
    assert!((input_mass - 1.0).abs() < TOL);
}

#[test]
fn search_circuits_are_deterministic() {
    let formula = Formula::from_ints(&[vec![1, -2], vec![2, 3]]).unwrap();
    let a = compile_search(&formula, 3, 2).unwrap();
    let b = compile_search(&formula, 3, 2).unwrap();
    assert_eq!(a, b);
}
