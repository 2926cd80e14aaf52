//! qsat Backend Abstraction Layer
//!
//! This crate defines how compiled circuits are executed:
//! - the [`Backend`] trait with a synchronous `simulate` call
//! - [`Capabilities`] to describe backend limits
//! - [`ExecutionResult`] and [`Counts`] for measurement histograms
//!
//! # Example
//!
//! ```ignore
//! use qsat_hal::Backend;
//! use qsat_adapter_sim::SimulatorBackend;
//! use qsat_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2);
//! circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
//!
//! let backend = SimulatorBackend::new();
//! let result = backend.simulate(&circuit, 0, &[QubitId(0), QubitId(1)], 1000)?;
//! if let Some((bitstring, count)) = result.counts.most_frequent() {
//!     println!("Most frequent: {bitstring} ({count} times)");
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::Backend;
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
