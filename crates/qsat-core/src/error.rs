//! Error types for the core compilers.

use qsat_ir::QubitId;
use thiserror::Error;

/// Errors produced while validating a formula or building a circuit.
///
/// Validation errors are raised before any gate is emitted.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A clause is structurally invalid (empty, literal 0, or out of range).
    #[error("Malformed clause {clause}: {reason}")]
    MalformedClause {
        /// Zero-based index of the clause.
        clause: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A variable appears more than once in the same clause.
    #[error("Clause {clause} mentions variable {variable} more than once")]
    InconsistentClause {
        /// Zero-based index of the clause.
        clause: usize,
        /// The repeated variable (1-based).
        variable: u32,
    },

    /// A register would be empty or is otherwise unusable.
    #[error("Invalid register size: {0}")]
    InvalidRegisterSize(String),

    /// A reversible build finished with ancillas still computed.
    #[error("Ancillas left dirty: {0:?}")]
    DirtyAncilla(Vec<QubitId>),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qsat_ir::IrError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
