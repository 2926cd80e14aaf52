//! Simulator backend implementation.

use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, instrument};

use qsat_hal::{Backend, Capabilities, Counts, ExecutionResult, HalError, HalResult};
use qsat_ir::{Circuit, QubitId};

use crate::statevector::Statevector;

/// Default qubit limit (2^24 amplitudes, 256 MiB).
pub const DEFAULT_MAX_QUBITS: u32 = 24;

/// Local simulator backend.
///
/// Each job evolves the statevector exactly once and then draws every shot
/// from the resulting marginal distribution.
#[derive(Debug, Clone)]
pub struct SimulatorBackend {
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Seed for shot sampling; `None` draws from OS entropy.
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            seed: None,
        }
    }

    /// Make shot sampling reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The sampling seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(
        skip(self, circuit, measured),
        fields(circuit = circuit.name(), qubits = circuit.num_qubits())
    )]
    fn simulate(
        &self,
        circuit: &Circuit,
        initial_state: u64,
        measured: &[QubitId],
        shots: u32,
    ) -> HalResult<ExecutionResult> {
        self.validate(circuit, initial_state, measured, shots)?;
        let start = Instant::now();

        debug!(
            ops = circuit.num_ops(),
            measured = measured.len(),
            "Starting simulation"
        );

        let mut sv = Statevector::from_int(circuit.num_qubits(), initial_state)?;
        sv.evolve(circuit)?;

        let dist = sv.marginal(measured);
        let sampler = WeightedIndex::new(&dist)
            .map_err(|e| HalError::Backend(format!("cannot sample final state: {e}")))?;
        let mut rng = self.rng();

        let mut tallies = vec![0u64; dist.len()];
        for _ in 0..shots {
            tallies[sampler.sample(&mut rng)] += 1;
        }

        let mut counts = Counts::new();
        for (outcome, &n) in tallies.iter().enumerate() {
            if n > 0 {
                counts.insert(Statevector::outcome_to_bitstring(outcome, measured.len()), n);
            }
        }

        let elapsed = start.elapsed();
        debug!(outcomes = counts.len(), "Simulation completed in {:?}", elapsed);

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }
}
