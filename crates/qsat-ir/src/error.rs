//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A sub-circuit was mapped onto the wrong number of qubits.
    #[error("Cannot compose '{circuit}': it acts on {expected} qubits, mapping provides {got}")]
    WidthMismatch {
        /// Name of the circuit being composed.
        circuit: String,
        /// Width of the circuit being composed.
        expected: usize,
        /// Length of the qubit mapping.
        got: usize,
    },

    /// A circuit would not fit in memory.
    #[error("Circuit '{circuit}' is too large: {reason}")]
    TooLarge {
        /// Name of the circuit being built.
        circuit: String,
        /// What overflowed.
        reason: String,
    },

    /// Invalid gate construction.
    #[error("Invalid gate: {0}")]
    InvalidGate(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
