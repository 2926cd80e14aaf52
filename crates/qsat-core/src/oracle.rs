//! Boolean-evaluation compiler and phase-oracle adapter.
//!
//! [`compile_clauses`] turns a CNF formula into a reversible circuit that
//! XORs the formula's value into a flag qubit:
//!
//! ```text
//!   |x⟩|f⟩|0…0⟩  ──→  |x⟩|f ⊕ F(x)⟩|0…0⟩
//! ```
//!
//! Each clause is evaluated onto its own ancilla through De Morgan's law
//! (`l₁ ∨ … ∨ lₖ = ¬(¬l₁ ∧ … ∧ ¬lₖ)`), the flag is set from the conjunction
//! of all clause ancillas, and the clause section is then uncomputed.
//!
//! [`to_phase_oracle`] wraps such a bit-flip circuit between `X·H` on the
//! flag, turning it into `|x⟩ → (−1)^F(x) |x⟩`.

use qsat_ir::{Circuit, QubitId};
use tracing::debug;

use crate::cnf::{Clause, Formula};
use crate::error::{CoreError, CoreResult};
use crate::layout::RegisterLayout;
use crate::reversible::ReversibleBuilder;

/// Compile `formula` into a bit-flip oracle over `num_vars + 1 + m` qubits.
///
/// Layout: inputs `0..n`, flag `n`, clause ancillas `n+1..=n+m`. The flag
/// ends at 1 exactly when the input assignment satisfies every clause and
/// every ancilla returns to 0. The empty formula flips the flag
/// unconditionally.
pub fn compile_clauses(formula: &Formula, num_vars: u32) -> CoreResult<Circuit> {
    formula.check(num_vars)?;
    let layout = RegisterLayout::search(num_vars, formula.num_clauses() as u32);

    let mut circuit = Circuit::new("clause_eval");
    circuit.add_qreg("x", num_vars);
    circuit.add_qreg("flag", 1);
    circuit.add_qreg("clause", layout.num_clauses);

    let ancillas = layout.ancillas();
    let mut builder = ReversibleBuilder::new(circuit);

    let section = builder.compute(&ancillas, |c| {
        for (idx, clause) in formula.clauses().iter().enumerate() {
            append_clause(c, clause, &layout, layout.ancilla(idx))?;
        }
        Ok(())
    })?;
    builder.circuit_mut().mcx(&ancillas, layout.flag())?;
    builder.uncompute(section)?;

    let circuit = builder.finish()?;
    debug!(
        num_vars,
        num_clauses = layout.num_clauses,
        qubits = circuit.num_qubits(),
        ops = circuit.num_ops(),
        "compiled clause evaluation"
    );
    Ok(circuit)
}

/// Write "clause is satisfied" onto `target`.
fn append_clause(
    circuit: &mut Circuit,
    clause: &Clause,
    layout: &RegisterLayout,
    target: QubitId,
) -> CoreResult<()> {
    let controls: Vec<QubitId> = clause
        .literals()
        .iter()
        .map(|l| layout.input(l.variable()))
        .collect();
    let positives: Vec<QubitId> = clause
        .literals()
        .iter()
        .filter(|l| l.is_positive())
        .map(|l| layout.input(l.variable()))
        .collect();

    // Every control now holds the negation of its literal.
    for &q in &positives {
        circuit.x(q)?;
    }
    circuit.mcx(&controls, target)?;
    circuit.x(target)?;
    for &q in &positives {
        circuit.x(q)?;
    }
    Ok(())
}

/// Turn a bit-flip oracle into a phase oracle of the same width.
///
/// The flag is qubit `num_vars`; it is prepared in |−⟩ around the bit-flip
/// circuit and returned to |0⟩ afterwards.
pub fn to_phase_oracle(bitflip: &Circuit, num_vars: u32) -> CoreResult<Circuit> {
    let width = bitflip.num_qubits() as u32;
    if num_vars >= width {
        return Err(CoreError::InvalidRegisterSize(format!(
            "flag qubit {num_vars} is outside the {width}-qubit oracle"
        )));
    }
    let flag = QubitId(num_vars);
    let identity: Vec<QubitId> = (0..width).map(QubitId).collect();

    let mut circuit = Circuit::with_size("phase_oracle", width);
    circuit.x(flag)?.h(flag)?;
    circuit.compose(bitflip, &identity)?;
    circuit.h(flag)?.x(flag)?;
    Ok(circuit)
}
