//! qsat Local Statevector Simulator
//!
//! This crate provides the reference [`Backend`](qsat_hal::Backend) used to
//! check compiled oracles, Grover circuits and counting circuits. It keeps
//! the full statevector, so results are exact up to shot sampling.
//!
//! # Performance
//!
//! The statevector is evolved once per job and every shot is drawn from the
//! final distribution, so cost is dominated by `ops × 2^n`.
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//! | 24 | ~256 MB |
//!
//! # Example
//!
//! ```rust
//! use qsat_adapter_sim::SimulatorBackend;
//! use qsat_hal::Backend;
//! use qsat_ir::{Circuit, QubitId};
//!
//! let backend = SimulatorBackend::new().with_seed(1);
//! let mut circuit = Circuit::with_size("flip", 2);
//! circuit.x(QubitId(1)).unwrap();
//!
//! let result = backend
//!     .simulate(&circuit, 0, &[QubitId(0), QubitId(1)], 100)
//!     .unwrap();
//! assert_eq!(result.counts.get("01"), 100);
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
pub use statevector::Statevector;
