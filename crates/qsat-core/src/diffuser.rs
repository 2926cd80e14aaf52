//! Grover diffusion operator.

use qsat_ir::{Circuit, QubitId};

use crate::error::{CoreError, CoreResult};

/// Build `D = 2|s⟩⟨s| − I` over `n` qubits, `|s⟩` the uniform superposition.
///
/// The H/X sandwich around a multi-controlled Z realises `I − 2|s⟩⟨s|`;
/// the trailing `Z X Z X` on qubit 0 multiplies by −1. That sign is a
/// global phase for search but a relative phase once the iteration is
/// controlled, so quantum counting depends on it.
pub fn diffuser(n: u32) -> CoreResult<Circuit> {
    if n == 0 {
        return Err(CoreError::InvalidRegisterSize(
            "diffuser needs at least one qubit".into(),
        ));
    }
    let qubits: Vec<QubitId> = (0..n).map(QubitId).collect();
    let mut circuit = Circuit::with_size("diffuser", n);

    if n == 1 {
        let q = qubits[0];
        circuit.h(q)?.x(q)?.z(q)?.x(q)?.h(q)?;
    } else {
        let (last, rest) = (qubits[qubits.len() - 1], &qubits[..qubits.len() - 1]);
        for &q in &qubits {
            circuit.h(q)?;
        }
        for &q in &qubits {
            circuit.x(q)?;
        }
        circuit.h(last)?;
        circuit.mcx(rest, last)?;
        circuit.h(last)?;
        for &q in &qubits {
            circuit.x(q)?;
        }
        for &q in &qubits {
            circuit.h(q)?;
        }
    }

    let q0 = qubits[0];
    circuit.z(q0)?.x(q0)?.z(q0)?.x(q0)?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diffuser_shape() {
        let d = diffuser(3).unwrap();
        assert_eq!(d.num_qubits(), 3);
        // 3 H + 3 X + H + ccx + H + 3 X + 3 H + ZXZX
        assert_eq!(d.num_ops(), 3 + 3 + 1 + 1 + 1 + 3 + 3 + 4);
        assert_eq!(d.gate_counts()["ccx"], 1);
    }

    #[test]
    fn test_single_qubit_diffuser() {
        let d = diffuser(1).unwrap();
        let names: Vec<_> = d.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["h", "x", "z", "x", "h", "z", "x", "z", "x"]);
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(matches!(diffuser(0), Err(CoreError::InvalidRegisterSize(_))));
    }
}
