//! Quantum Fourier transform on a little-endian register.

use std::f64::consts::PI;

use qsat_ir::{Circuit, QubitId};

use crate::error::{CoreError, CoreResult};

/// QFT over `t` qubits, qubit 0 least significant.
///
/// Maps `|x⟩` to `Σ_k e^{2πi·xk/2^t} |k⟩ / √2^t`.
pub fn qft(t: u32) -> CoreResult<Circuit> {
    if t == 0 {
        return Err(CoreError::InvalidRegisterSize(
            "QFT needs at least one qubit".into(),
        ));
    }
    let mut circuit = Circuit::with_size("qft", t);

    for i in (0..t).rev() {
        circuit.h(QubitId(i))?;
        for j in 0..i {
            let angle = PI / (1u64 << (i - j)) as f64;
            circuit.cp(angle, QubitId(j), QubitId(i))?;
        }
    }

    // Bit reversal
    for i in 0..t / 2 {
        circuit.swap(QubitId(i), QubitId(t - 1 - i))?;
    }

    Ok(circuit)
}

/// Exact inverse of [`qft`]: gates reversed, angles negated.
pub fn qft_inverse(t: u32) -> CoreResult<Circuit> {
    Ok(qft(t)?.inverse().with_name("qft_dg"))
}
