//! High-level circuit builder API.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{GateKind, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::{Qubit, QubitId};

/// A quantum circuit.
///
/// An ordered list of gate instructions over a fixed set of qubits
/// `q0..q{n-1}`. Circuits are pure descriptions: the combinators
/// ([`compose`](Self::compose), [`controlled`](Self::controlled),
/// [`power`](Self::power), [`inverse`](Self::inverse)) build new
/// instruction sequences and never execute anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit, indexed by their id.
    qubits: Vec<Qubit>,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        circuit
    }

    /// Rename the circuit.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn next_qubit_id(&self) -> QubitId {
        QubitId::from(self.qubits.len())
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = self.next_qubit_id();
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = self.next_qubit_id();
            self.qubits.push(Qubit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    /// Append an instruction after validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        let gate_name = instruction.name();

        let expected = instruction.kind.num_qubits();
        let got = instruction.qubits.len() as u32;
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate_name.to_string(),
                expected,
                got,
            });
        }

        for &qubit in &instruction.qubits {
            if qubit.index() >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(gate_name.to_string()),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(gate_name.to_string()),
                });
            }
        }

        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::P(theta), qubit))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply controlled-Hadamard gate.
    pub fn ch(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CH, control, target))
    }

    /// Apply controlled phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CP(theta),
            control,
            target,
        ))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    // =========================================================================
    // Three-qubit and multi-controlled gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CSwap, [control, t1, t2]))
    }

    /// Apply a NOT on `target` controlled on every qubit in `controls`.
    ///
    /// With no controls this is a plain X.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::mcx(controls, target)?)
    }

    /// Apply a Z on `target` controlled on every qubit in `controls`.
    pub fn mcz(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        let kind = GateKind::controlled(StandardGate::Z, controls.len() as u32)?;
        let qubits = controls.iter().copied().chain(std::iter::once(target));
        self.apply(Instruction::gate(kind, qubits))
    }

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<GateKind>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Append `other`, sending its qubit `i` to `mapping[i]`.
    pub fn compose(&mut self, other: &Circuit, mapping: &[QubitId]) -> IrResult<&mut Self> {
        if mapping.len() != other.num_qubits() {
            return Err(IrError::WidthMismatch {
                circuit: other.name.clone(),
                expected: other.num_qubits(),
                got: mapping.len(),
            });
        }
        self.instructions.reserve(other.instructions.len());
        for inst in &other.instructions {
            self.apply(inst.remap(|q| mapping[q.index()]))?;
        }
        Ok(self)
    }

    /// The controlled version of this circuit.
    ///
    /// The result has one more qubit. The control is qubit 0 and the
    /// original qubit `i` becomes qubit `i + 1`.
    pub fn controlled(&self) -> IrResult<Circuit> {
        let mut out = Circuit::with_size(format!("c_{}", self.name), self.num_qubits() as u32 + 1);
        let control = QubitId(0);
        out.instructions.reserve(self.instructions.len());
        for inst in &self.instructions {
            let shifted = inst.remap(|q| q.offset(1));
            out.apply(shifted.with_control(control)?)?;
        }
        Ok(out)
    }

    /// This circuit repeated `exponent` times.
    ///
    /// `power(0)` is the empty circuit on the same qubits.
    pub fn power(&self, exponent: usize) -> IrResult<Circuit> {
        let mut out = Circuit {
            name: format!("{}^{exponent}", self.name),
            qubits: self.qubits.clone(),
            instructions: Vec::new(),
        };
        if self.instructions.is_empty() {
            return Ok(out);
        }
        let len = self.instructions.len().checked_mul(exponent).ok_or_else(|| {
            IrError::TooLarge {
                circuit: self.name.clone(),
                reason: format!(
                    "{} instructions repeated {exponent} times",
                    self.instructions.len()
                ),
            }
        })?;
        out.try_reserve(len)?;
        for _ in 0..exponent {
            out.instructions.extend(self.instructions.iter().cloned());
        }
        Ok(out)
    }

    /// Reserve room for `additional` more instructions.
    pub fn try_reserve(&mut self, additional: usize) -> IrResult<()> {
        self.instructions
            .try_reserve(additional)
            .map_err(|e| IrError::TooLarge {
                circuit: self.name.clone(),
                reason: e.to_string(),
            })
    }

    /// The inverse circuit: instructions reversed and each inverted.
    pub fn inverse(&self) -> Circuit {
        Circuit {
            name: format!("{}_dg", self.name),
            qubits: self.qubits.clone(),
            instructions: self.instructions.iter().rev().map(Instruction::inverse).collect(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the circuit depth (length of the longest qubit-dependency chain).
    pub fn depth(&self) -> usize {
        let mut layer = vec![0usize; self.qubits.len()];
        let mut max_depth = 0;
        for inst in &self.instructions {
            let d = inst
                .qubits
                .iter()
                .map(|q| layer[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                layer[q.index()] = d;
            }
            max_depth = max_depth.max(d);
        }
        max_depth
    }

    /// Count instructions per gate name.
    pub fn gate_counts(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let inputs = circuit.add_qreg("x", 3);
        let flag = circuit.add_qubit();
        assert_eq!(inputs, vec![QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(flag, QubitId(3));
        assert_eq!(format!("{}", circuit.qubits()[1]), "x[1]");
    }

    #[test]
    fn test_fluent_api_and_depth() {
        let mut circuit = Circuit::with_size("bell", 2);
        circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        assert_eq!(circuit.num_ops(), 2);
        assert_eq!(circuit.depth(), 2);

        circuit.x(QubitId(0)).unwrap().x(QubitId(1)).unwrap();
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_apply_validation() {
        let mut circuit = Circuit::with_size("test", 2);
        assert!(matches!(
            circuit.x(QubitId(2)),
            Err(IrError::QubitNotFound { .. })
        ));
        assert!(matches!(
            circuit.cx(QubitId(1), QubitId(1)),
            Err(IrError::DuplicateQubit { .. })
        ));
        assert!(matches!(
            circuit.gate(StandardGate::CX, [QubitId(0)]),
            Err(IrError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_mcx_zero_controls_is_x() {
        let mut circuit = Circuit::with_size("test", 1);
        circuit.mcx(&[], QubitId(0)).unwrap();
        assert_eq!(circuit.instructions()[0].name(), "x");
    }

    #[test]
    fn test_compose_with_mapping() {
        let mut inner = Circuit::with_size("inner", 2);
        inner.cx(QubitId(0), QubitId(1)).unwrap();

        let mut outer = Circuit::with_size("outer", 4);
        outer.compose(&inner, &[QubitId(3), QubitId(1)]).unwrap();
        assert_eq!(outer.instructions()[0].qubits, vec![QubitId(3), QubitId(1)]);

        let err = outer.compose(&inner, &[QubitId(0)]).unwrap_err();
        assert!(matches!(err, IrError::WidthMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_controlled_adds_control_qubit() {
        let mut c = Circuit::with_size("g", 2);
        c.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap().p(PI, QubitId(1)).unwrap();

        let cc = c.controlled().unwrap();
        assert_eq!(cc.num_qubits(), 3);
        let names: Vec<_> = cc.instructions().iter().map(Instruction::name).collect();
        assert_eq!(names, vec!["ch", "ccx", "cp"]);
        assert_eq!(cc.instructions()[1].qubits, vec![QubitId(0), QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_power() {
        let mut c = Circuit::with_size("g", 1);
        c.t(QubitId(0)).unwrap();
        assert_eq!(c.power(4).unwrap().num_ops(), 4);
        assert_eq!(c.power(0).unwrap().num_ops(), 0);
        assert_eq!(c.power(0).unwrap().num_qubits(), 1);
    }

    #[test]
    fn test_power_overflow_is_an_error() {
        let mut c = Circuit::with_size("g", 1);
        c.t(QubitId(0)).unwrap().h(QubitId(0)).unwrap();
        assert!(matches!(c.power(usize::MAX), Err(IrError::TooLarge { .. })));
        assert!(c.try_reserve(usize::MAX).is_err());
    }

    #[test]
    fn test_inverse_reverses_and_inverts() {
        let mut c = Circuit::with_size("g", 2);
        c.s(QubitId(0)).unwrap().cp(0.25, QubitId(0), QubitId(1)).unwrap();
        let inv = c.inverse();
        assert_eq!(
            inv.instructions()[0].kind,
            GateKind::Standard(StandardGate::CP(-0.25))
        );
        assert_eq!(inv.instructions()[1].kind, GateKind::Standard(StandardGate::Sdg));
        assert_eq!(inv.inverse().instructions(), c.instructions());
    }

    #[test]
    fn test_gate_counts() {
        let mut c = Circuit::with_size("g", 3);
        c.h(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .ccx(QubitId(0), QubitId(1), QubitId(2))
            .unwrap();
        let counts = c.gate_counts();
        assert_eq!(counts["h"], 2);
        assert_eq!(counts["ccx"], 1);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut c = Circuit::with_size("g", 4);
        c.mcx(&[QubitId(0), QubitId(1), QubitId(2)], QubitId(3)).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
