//! Compute / uncompute bookkeeping for clean ancillas.
//!
//! A [`ReversibleBuilder`] wraps the circuit under construction. Ancillas
//! written by [`compute`](ReversibleBuilder::compute) are tracked as dirty
//! until the matching [`uncompute`](ReversibleBuilder::uncompute) appends
//! the exact inverse of the section. [`finish`](ReversibleBuilder::finish)
//! refuses to hand back a circuit that still has dirty ancillas.

use std::collections::BTreeSet;

use qsat_ir::{Circuit, Instruction, QubitId};
use tracing::trace;

use crate::error::{CoreError, CoreResult};

/// A recorded compute section awaiting uncomputation.
#[derive(Debug)]
#[must_use = "a computed section leaves ancillas dirty until it is uncomputed"]
pub struct ComputeSection {
    start: usize,
    end: usize,
    ancillas: Vec<QubitId>,
}

impl ComputeSection {
    /// Ancillas written by this section.
    pub fn ancillas(&self) -> &[QubitId] {
        &self.ancillas
    }

    /// Number of instructions in the section.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the section emitted nothing.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Circuit builder that tracks which ancillas hold intermediate values.
#[derive(Debug)]
pub struct ReversibleBuilder {
    circuit: Circuit,
    dirty: BTreeSet<QubitId>,
}

impl ReversibleBuilder {
    /// Wrap a circuit whose ancillas all start at |0⟩.
    pub fn new(circuit: Circuit) -> Self {
        Self {
            circuit,
            dirty: BTreeSet::new(),
        }
    }

    /// Direct access for instructions that do not touch ancillas.
    pub fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuit
    }

    /// Ancillas currently holding computed values.
    pub fn dirty_ancillas(&self) -> Vec<QubitId> {
        self.dirty.iter().copied().collect()
    }

    /// Emit a compute section writing `ancillas`.
    ///
    /// Fails with [`CoreError::DirtyAncilla`] if any of them is already in use.
    pub fn compute<F>(&mut self, ancillas: &[QubitId], body: F) -> CoreResult<ComputeSection>
    where
        F: FnOnce(&mut Circuit) -> CoreResult<()>,
    {
        let busy: Vec<_> = ancillas
            .iter()
            .copied()
            .filter(|q| self.dirty.contains(q))
            .collect();
        if !busy.is_empty() {
            return Err(CoreError::DirtyAncilla(busy));
        }

        let start = self.circuit.num_ops();
        body(&mut self.circuit)?;
        let end = self.circuit.num_ops();

        self.dirty.extend(ancillas.iter().copied());
        trace!(start, end, ancillas = ancillas.len(), "compute section");
        Ok(ComputeSection {
            start,
            end,
            ancillas: ancillas.to_vec(),
        })
    }

    /// Append the exact inverse of `section` and release its ancillas.
    pub fn uncompute(&mut self, section: ComputeSection) -> CoreResult<()> {
        let inverse: Vec<Instruction> = self.circuit.instructions()[section.start..section.end]
            .iter()
            .rev()
            .map(Instruction::inverse)
            .collect();
        for inst in inverse {
            self.circuit.apply(inst)?;
        }
        for q in &section.ancillas {
            self.dirty.remove(q);
        }
        trace!(ops = section.len(), "uncompute section");
        Ok(())
    }

    /// Return the circuit, provided every ancilla is clean.
    pub fn finish(self) -> CoreResult<Circuit> {
        if self.dirty.is_empty() {
            Ok(self.circuit)
        } else {
            Err(CoreError::DirtyAncilla(self.dirty.into_iter().collect()))
        }
    }
}
