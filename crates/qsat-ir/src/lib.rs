//! qsat Circuit Intermediate Representation
//!
//! This crate provides the data structures the qsat compilers emit: a flat,
//! ordered list of gate instructions over a fixed qubit register.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a qubit; [`Qubit`] adds optional
//!   register membership for display
//! - **Gates**: [`StandardGate`] for the built-in gate set and
//!   [`ControlledGate`] for a standard gate with any number of controls
//! - **Instructions**: [`Instruction`] combining a gate with its operands
//! - **Circuit**: [`Circuit`] builder with `compose`, `controlled`, `power`
//!   and `inverse` combinators
//!
//! # Example: Controlled Power
//!
//! ```rust
//! use qsat_ir::{Circuit, QubitId};
//!
//! let mut g = Circuit::with_size("g", 2);
//! g.h(QubitId(0)).unwrap();
//! g.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! // Control qubit is prepended as qubit 0.
//! let cg = g.power(4).unwrap().controlled().unwrap();
//! assert_eq!(cg.num_qubits(), 3);
//! assert_eq!(cg.num_ops(), 8);
//! assert_eq!(cg.instructions()[1].name(), "ccx");
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Clifford+T phase gates |
//! | `P` | 1 | Phase gate diag(1, e^{iθ}) |
//! | `CX`, `CZ`, `CH`, `CP` | 2 | Singly controlled gates |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX`, `CSwap` | 3 | Toffoli and Fredkin gates |
//! | `mcx`, `mcz`, `mcp`, ... | k+1 | Any of the above with k controls |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{ControlledGate, GateKind, Matrix2, StandardGate};
pub use instruction::Instruction;
pub use qubit::{Qubit, QubitId};
