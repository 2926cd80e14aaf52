//! Quantum gate types.
//!
//! Gates come in two flavours: [`StandardGate`] for the fixed gate set with
//! known semantics, and [`ControlledGate`] for any standard base gate
//! carrying an arbitrary number of positive controls (`mcx`, `mcz`, ...).
//! [`GateKind::controlled`] normalises between the two so that a gate
//! with one or two controls keeps its familiar name (`cx`, `ccx`, ...).

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::f64::consts::PI;

use crate::error::{IrError, IrResult};

/// 2×2 unitary in row-major order.
pub type Matrix2 = [[Complex64; 2]; 2];

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford and phase gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Phase gate diag(1, e^{iθ}).
    P(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// Controlled phase gate.
    CP(f64),
    /// SWAP gate.
    Swap,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::CP(_) => "cp",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::P(_) => 1,

            StandardGate::CX
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::CP(_)
            | StandardGate::Swap => 2,

            StandardGate::CCX | StandardGate::CSwap => 3,
        }
    }

    /// Compute the inverse of this gate.
    ///
    /// - H† = H, X† = X (Hermitian gates are self-inverse)
    /// - S† = Sdg, T† = Tdg
    /// - P(θ)† = P(-θ)
    #[must_use]
    pub fn inverse(&self) -> StandardGate {
        match *self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::P(theta) => StandardGate::P(-theta),
            StandardGate::CP(theta) => StandardGate::CP(-theta),
            other => other,
        }
    }

    /// Split this gate into its uncontrolled base and its number of controls.
    ///
    /// `CCX` becomes `(X, 2)`, `CP(θ)` becomes `(P(θ), 1)`, and an
    /// uncontrolled gate returns itself with zero controls.
    pub fn split_controls(&self) -> (StandardGate, u32) {
        match *self {
            StandardGate::CX => (StandardGate::X, 1),
            StandardGate::CZ => (StandardGate::Z, 1),
            StandardGate::CH => (StandardGate::H, 1),
            StandardGate::CP(theta) => (StandardGate::P(theta), 1),
            StandardGate::CCX => (StandardGate::X, 2),
            StandardGate::CSwap => (StandardGate::Swap, 1),
            other => (other, 0),
        }
    }

    /// The 2×2 matrix of a single-qubit gate, `None` for multi-qubit gates.
    pub fn matrix(&self) -> Option<Matrix2> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let m = match *self {
            StandardGate::X => [[zero, one], [one, zero]],
            StandardGate::Y => [
                [zero, Complex64::new(0.0, -1.0)],
                [Complex64::new(0.0, 1.0), zero],
            ],
            StandardGate::Z => [[one, zero], [zero, -one]],
            StandardGate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            StandardGate::S => [[one, zero], [zero, Complex64::from_polar(1.0, PI / 2.0)]],
            StandardGate::Sdg => [[one, zero], [zero, Complex64::from_polar(1.0, -PI / 2.0)]],
            StandardGate::T => [[one, zero], [zero, Complex64::from_polar(1.0, PI / 4.0)]],
            StandardGate::Tdg => [[one, zero], [zero, Complex64::from_polar(1.0, -PI / 4.0)]],
            StandardGate::P(theta) => [[one, zero], [zero, Complex64::from_polar(1.0, theta)]],
            _ => return None,
        };
        Some(m)
    }
}

/// A standard base gate with `num_controls` positive controls.
///
/// Operands are laid out as `[controls..., base targets...]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlledGate {
    /// The uncontrolled base gate (single-qubit gate or SWAP).
    pub base: StandardGate,
    /// Number of control qubits.
    pub num_controls: u32,
}

impl ControlledGate {
    /// Create a controlled gate.
    ///
    /// The base must itself be uncontrolled; use [`GateKind::controlled`]
    /// to fold existing controls in.
    pub fn new(base: StandardGate, num_controls: u32) -> IrResult<Self> {
        let (_, inner) = base.split_controls();
        if inner != 0 {
            return Err(IrError::InvalidGate(format!(
                "base gate '{}' already carries controls",
                base.name()
            )));
        }
        if num_controls == 0 {
            return Err(IrError::InvalidGate(
                "controlled gate needs at least one control".into(),
            ));
        }
        Ok(Self { base, num_controls })
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &'static str {
        match self.base {
            StandardGate::X => "mcx",
            StandardGate::Y => "mcy",
            StandardGate::Z => "mcz",
            StandardGate::H => "mch",
            StandardGate::S => "mcs",
            StandardGate::Sdg => "mcsdg",
            StandardGate::T => "mct",
            StandardGate::Tdg => "mctdg",
            StandardGate::P(_) => "mcp",
            StandardGate::Swap => "mcswap",
            // Rejected by `new`; kept total for the match.
            other => other.name(),
        }
    }

    /// Get the number of qubits (controls plus base targets).
    pub fn num_qubits(&self) -> u32 {
        self.num_controls + self.base.num_qubits()
    }
}

/// A quantum gate, either standard or multi-controlled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A standard base gate with extra controls.
    Controlled(ControlledGate),
}

impl GateKind {
    /// Build the gate `base` with `num_controls` controls, normalised.
    ///
    /// One or two controls on X, one control on Z/H/P/SWAP map back onto
    /// the named standard gates; everything else becomes a
    /// [`ControlledGate`].
    pub fn controlled(base: StandardGate, num_controls: u32) -> IrResult<Self> {
        let (base, inner) = base.split_controls();
        let total = inner + num_controls;
        let kind = match (base, total) {
            (g, 0) => GateKind::Standard(g),
            (StandardGate::X, 1) => GateKind::Standard(StandardGate::CX),
            (StandardGate::X, 2) => GateKind::Standard(StandardGate::CCX),
            (StandardGate::Z, 1) => GateKind::Standard(StandardGate::CZ),
            (StandardGate::H, 1) => GateKind::Standard(StandardGate::CH),
            (StandardGate::P(theta), 1) => GateKind::Standard(StandardGate::CP(theta)),
            (StandardGate::Swap, 1) => GateKind::Standard(StandardGate::CSwap),
            (g, k) => GateKind::Controlled(ControlledGate::new(g, k)?),
        };
        Ok(kind)
    }

    /// Split into the uncontrolled base gate and the number of controls.
    pub fn split_controls(&self) -> (StandardGate, u32) {
        match self {
            GateKind::Standard(g) => g.split_controls(),
            GateKind::Controlled(c) => (c.base, c.num_controls),
        }
    }

    /// The same gate with one more control prepended to its operands.
    pub fn with_control(&self) -> IrResult<Self> {
        let (base, controls) = self.split_controls();
        Self::controlled(base, controls + 1)
    }

    /// The inverse gate; controls are unaffected by inversion.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            GateKind::Standard(g) => GateKind::Standard(g.inverse()),
            GateKind::Controlled(c) => GateKind::Controlled(ControlledGate {
                base: c.base.inverse(),
                num_controls: c.num_controls,
            }),
        }
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Controlled(g) => g.name(),
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Controlled(g) => g.num_qubits(),
        }
    }
}

impl From<StandardGate> for GateKind {
    fn from(gate: StandardGate) -> Self {
        GateKind::Standard(gate)
    }
}

impl From<ControlledGate> for GateKind {
    fn from(gate: ControlledGate) -> Self {
        GateKind::Controlled(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
    }

    #[test]
    fn test_inverse_gates() {
        assert_eq!(StandardGate::S.inverse(), StandardGate::Sdg);
        assert_eq!(StandardGate::Tdg.inverse(), StandardGate::T);
        assert_eq!(StandardGate::CP(PI / 4.0).inverse(), StandardGate::CP(-PI / 4.0));
        assert_eq!(StandardGate::CCX.inverse(), StandardGate::CCX);
    }

    #[test]
    fn test_control_normalisation() {
        let cx = GateKind::Standard(StandardGate::X).with_control().unwrap();
        assert_eq!(cx, GateKind::Standard(StandardGate::CX));

        let ccx = cx.with_control().unwrap();
        assert_eq!(ccx, GateKind::Standard(StandardGate::CCX));

        let mcx = ccx.with_control().unwrap();
        assert_eq!(mcx.name(), "mcx");
        assert_eq!(mcx.num_qubits(), 4);
        assert_eq!(mcx.split_controls(), (StandardGate::X, 3));

        let ccp = GateKind::Standard(StandardGate::CP(0.5)).with_control().unwrap();
        assert_eq!(ccp.name(), "mcp");
        assert_eq!(ccp.split_controls(), (StandardGate::P(0.5), 2));
    }

    #[test]
    fn test_zero_controls_is_base_gate() {
        let x = GateKind::controlled(StandardGate::X, 0).unwrap();
        assert_eq!(x, GateKind::Standard(StandardGate::X));
    }

    #[test]
    fn test_controlled_gate_rejects_controlled_base() {
        assert!(ControlledGate::new(StandardGate::CX, 2).is_err());
        assert!(ControlledGate::new(StandardGate::X, 0).is_err());
    }

    #[test]
    fn test_controlled_inverse_keeps_controls() {
        let mcs = GateKind::controlled(StandardGate::S, 3).unwrap();
        let inv = mcs.inverse();
        assert_eq!(inv.split_controls(), (StandardGate::Sdg, 3));
    }

    #[test]
    fn test_single_qubit_matrices_are_unitary() {
        for gate in [
            StandardGate::X,
            StandardGate::Y,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::S,
            StandardGate::T,
            StandardGate::P(0.3),
        ] {
            let m = gate.matrix().unwrap();
            for r in 0..2 {
                for c in 0..2 {
                    let dot: Complex64 = (0..2).map(|k| m[r][k] * m[c][k].conj()).sum();
                    let expected = if r == c { 1.0 } else { 0.0 };
                    assert!((dot - Complex64::new(expected, 0.0)).norm() < 1e-12);
                }
            }
        }
        assert!(StandardGate::CX.matrix().is_none());
    }
}
