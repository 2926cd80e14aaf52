//! Statevector simulation engine.

use num_complex::Complex64;

use qsat_hal::{HalError, HalResult};
use qsat_ir::{Circuit, Instruction, Matrix2, QubitId, StandardGate};

/// A statevector representing a quantum state.
///
/// Index `i` of the amplitude vector is the basis state whose bit `k` is
/// the value of qubit `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self::basis(num_qubits, 0)
    }

    /// Create the basis state `|value⟩`.
    ///
    /// Returns an error if `value` needs more than `num_qubits` bits.
    pub fn from_int(num_qubits: usize, value: u64) -> HalResult<Self> {
        if num_qubits < u64::BITS as usize && value >> num_qubits != 0 {
            return Err(HalError::InvalidInitialState(format!(
                "{value} does not fit in {num_qubits} qubits"
            )));
        }
        Ok(Self::basis(num_qubits, value as usize))
    }

    fn basis(num_qubits: usize, index: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitude of basis state `index`.
    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// All amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Whether two states agree amplitude by amplitude within `tol`.
    ///
    /// Global phase is significant.
    pub fn approx_eq(&self, other: &Statevector, tol: f64) -> bool {
        self.num_qubits == other.num_qubits
            && self
                .amplitudes
                .iter()
                .zip(&other.amplitudes)
                .all(|(a, b)| (a - b).norm() <= tol)
    }

    /// Apply every instruction of `circuit` in order.
    pub fn evolve(&mut self, circuit: &Circuit) -> HalResult<()> {
        if circuit.num_qubits() != self.num_qubits {
            return Err(HalError::Backend(format!(
                "circuit '{}' has {} qubits, state has {}",
                circuit.name(),
                circuit.num_qubits(),
                self.num_qubits
            )));
        }
        for inst in circuit.instructions() {
            self.apply(inst)?;
        }
        Ok(())
    }

    /// Apply an instruction to the statevector.
    ///
    /// Every gate is reduced to a base gate plus a control mask, so a single
    /// kernel serves `x`, `cx`, `ccx` and `mcx` alike.
    pub fn apply(&mut self, instruction: &Instruction) -> HalResult<()> {
        let (base, num_controls) = instruction.kind.split_controls();
        let (controls, targets) = instruction.qubits.split_at(num_controls as usize);
        let control_mask = controls.iter().fold(0usize, |m, q| m | (1 << q.index()));

        match base {
            StandardGate::Swap => {
                self.apply_swap(control_mask, targets[0].index(), targets[1].index());
            }
            gate => {
                let matrix = gate.matrix().ok_or_else(|| {
                    HalError::Unsupported(format!("gate '{}'", instruction.name()))
                })?;
                self.apply_1q(control_mask, targets[0].index(), &matrix);
            }
        }
        Ok(())
    }

    fn apply_1q(&mut self, control_mask: usize, target: usize, m: &Matrix2) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & tgt_mask == 0 && i & control_mask == control_mask {
                let j = i | tgt_mask;
                let a0 = self.amplitudes[i];
                let a1 = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a0 + m[0][1] * a1;
                self.amplitudes[j] = m[1][0] * a0 + m[1][1] * a1;
            }
        }
    }

    fn apply_swap(&mut self, control_mask: usize, t1: usize, t2: usize) {
        let t1_mask = 1 << t1;
        let t2_mask = 1 << t2;
        for i in 0..self.amplitudes.len() {
            if i & control_mask == control_mask && i & t1_mask != 0 && i & t2_mask == 0 {
                let j = (i & !t1_mask) | t2_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Marginal distribution over `measured`.
    ///
    /// Entry `k` is the probability that `measured[i]` reads bit `i` of `k`.
    pub fn marginal(&self, measured: &[QubitId]) -> Vec<f64> {
        let mut dist = vec![0.0; 1 << measured.len()];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p == 0.0 {
                continue;
            }
            let k = measured
                .iter()
                .enumerate()
                .filter(|(_, q)| i >> q.index() & 1 == 1)
                .fold(0usize, |k, (pos, _)| k | (1 << pos));
            dist[k] += p;
        }
        dist
    }

    /// Convert a marginal outcome to a bitstring.
    ///
    /// Character `i` is bit `i` of `outcome`.
    pub fn outcome_to_bitstring(outcome: usize, width: usize) -> String {
        (0..width)
            .map(|i| if outcome >> i & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}
