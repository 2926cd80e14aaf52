//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::IrResult;
use crate::gate::{GateKind, StandardGate};
use crate::qubit::QubitId;

/// A gate applied to concrete qubits.
///
/// For controlled gates the operands are the controls followed by the
/// base gate's targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub kind: GateKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<GateKind>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: gate.into(),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a multi-controlled X with the given controls.
    ///
    /// Zero controls yield a plain X on the target.
    pub fn mcx(controls: &[QubitId], target: QubitId) -> IrResult<Self> {
        let kind = GateKind::controlled(StandardGate::X, controls.len() as u32)?;
        let qubits = controls.iter().copied().chain(std::iter::once(target));
        Ok(Self::gate(kind, qubits))
    }

    /// Get the name of this instruction.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The inverse instruction on the same operands.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            kind: self.kind.inverse(),
            qubits: self.qubits.clone(),
        }
    }

    /// The same instruction with `control` prepended as an extra control.
    pub fn with_control(&self, control: QubitId) -> IrResult<Self> {
        let kind = self.kind.with_control()?;
        let qubits = std::iter::once(control).chain(self.qubits.iter().copied());
        Ok(Self::gate(kind, qubits))
    }

    /// The same instruction with every operand passed through `map`.
    #[must_use]
    pub fn remap(&self, map: impl Fn(QubitId) -> QubitId) -> Self {
        Self {
            kind: self.kind,
            qubits: self.qubits.iter().map(|&q| map(q)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert_eq!(inst.name(), "h");
        assert_eq!(inst.qubits, vec![QubitId(0)]);
    }

    #[test]
    fn test_mcx_instruction() {
        let inst = Instruction::mcx(&[QubitId(0), QubitId(1), QubitId(2)], QubitId(5)).unwrap();
        assert_eq!(inst.name(), "mcx");
        assert_eq!(inst.qubits.last(), Some(&QubitId(5)));

        let x = Instruction::mcx(&[], QubitId(3)).unwrap();
        assert_eq!(x.kind, GateKind::Standard(StandardGate::X));
        assert_eq!(x.qubits, vec![QubitId(3)]);
    }

    #[test]
    fn test_with_control_prepends() {
        let cx = Instruction::two_qubit_gate(StandardGate::CX, QubitId(1), QubitId(2));
        let ccx = cx.with_control(QubitId(0)).unwrap();
        assert_eq!(ccx.kind, GateKind::Standard(StandardGate::CCX));
        assert_eq!(ccx.qubits, vec![QubitId(0), QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_remap() {
        let cx = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1));
        let shifted = cx.remap(|q| q.offset(4));
        assert_eq!(shifted.qubits, vec![QubitId(4), QubitId(5)]);
    }
}
