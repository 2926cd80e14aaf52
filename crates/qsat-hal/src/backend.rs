//! Backend trait.
//!
//! A [`Backend`] runs a circuit from a computational basis state and
//! returns a histogram over a chosen subset of qubits:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ simulate()
//!    (&ref)             (provided)     (blocking)
//! ```
//!
//! The call is synchronous. Timeouts, retries and cancellation are the
//! caller's business.

use qsat_ir::{Circuit, QubitId};

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Trait for circuit execution backends.
///
/// # Contract
///
/// - `capabilities()` is infallible and cached at construction time.
/// - `simulate()` prepares the basis state `initial_state` (bit `i` is
///   qubit `i`), applies `circuit`, and measures `measured` `shots` times.
///   The returned counts sum to `shots` and character `i` of every
///   bitstring is the outcome of `measured[i]`.
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Check a job against the backend's limits without running it.
    fn validate(
        &self,
        circuit: &Circuit,
        initial_state: u64,
        measured: &[QubitId],
        shots: u32,
    ) -> HalResult<()> {
        let caps = self.capabilities();
        let width = circuit.num_qubits();

        if width > caps.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit '{}' has {} qubits, backend '{}' supports {}",
                circuit.name(),
                width,
                self.name(),
                caps.num_qubits
            )));
        }
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > caps.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} exceeds the maximum of {}",
                caps.max_shots
            )));
        }
        if let Some(q) = measured.iter().find(|q| q.index() >= width) {
            return Err(HalError::InvalidQubit(format!(
                "{q} is outside the {width}-qubit circuit"
            )));
        }
        if width < u64::BITS as usize && initial_state >> width != 0 {
            return Err(HalError::InvalidInitialState(format!(
                "{initial_state} does not fit in {width} qubits"
            )));
        }
        Ok(())
    }

    /// Run `circuit` from `initial_state` and sample `measured`.
    fn simulate(
        &self,
        circuit: &Circuit,
        initial_state: u64,
        measured: &[QubitId],
        shots: u32,
    ) -> HalResult<ExecutionResult>;
}
