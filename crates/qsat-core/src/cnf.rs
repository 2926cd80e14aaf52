//! CNF formula model.
//!
//! A [`Formula`] is a conjunction of [`Clause`]s, each a disjunction of
//! [`Literal`]s. Literals use the DIMACS convention: the magnitude is the
//! 1-based variable index and the sign is the polarity.
//!
//! Formulas are plain data. [`Formula::check`] validates one against a
//! variable count once, before any circuit is built.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroI32;

use crate::error::{CoreError, CoreResult};

/// A signed, nonzero variable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Literal(NonZeroI32);

impl Literal {
    /// Create a literal from its DIMACS value; `None` for 0.
    pub fn new(value: i32) -> Option<Self> {
        NonZeroI32::new(value).map(Self)
    }

    /// The literal "variable `var` is true".
    pub fn positive(var: u32) -> Option<Self> {
        i32::try_from(var).ok().and_then(Self::new)
    }

    /// The literal "variable `var` is false".
    pub fn negative(var: u32) -> Option<Self> {
        i32::try_from(var).ok().and_then(|v| Self::new(-v))
    }

    /// The signed DIMACS value.
    #[inline]
    pub fn get(self) -> i32 {
        self.0.get()
    }

    /// The 1-based variable index.
    #[inline]
    pub fn variable(self) -> u32 {
        self.0.get().unsigned_abs()
    }

    /// Whether the literal asks for the variable to be true.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.get() > 0
    }

    /// The opposite literal.
    #[must_use]
    pub fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Evaluate against an assignment where `assignment[i]` is variable `i + 1`.
    ///
    /// Variables outside the assignment read as false.
    pub fn is_satisfied_by(self, assignment: &[bool]) -> bool {
        let value = assignment
            .get(self.variable() as usize - 1)
            .copied()
            .unwrap_or(false);
        value == self.is_positive()
    }
}

impl TryFrom<i32> for Literal {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "literal 0 is not allowed".to_string())
    }
}

impl From<Literal> for i32 {
    fn from(lit: Literal) -> Self {
        lit.get()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_positive() {
            write!(f, "x{}", self.variable())
        } else {
            write!(f, "¬x{}", self.variable())
        }
    }
}

/// A disjunction of literals.
///
/// Literals are expected in non-decreasing order of magnitude; callers
/// (the parsers) sort them, the compiler does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Create a clause from literals.
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    /// The literals in order.
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Whether the clause has no literals.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// At least one literal holds.
    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        self.literals.iter().any(|l| l.is_satisfied_by(assignment))
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{lit}")?;
        }
        write!(f, ")")
    }
}

/// A conjunction of clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    /// Create a formula from clauses.
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    /// Build a formula from DIMACS-style integer clauses.
    ///
    /// A literal 0 is reported as [`CoreError::MalformedClause`].
    pub fn from_ints<C: AsRef<[i32]>>(clauses: &[C]) -> CoreResult<Self> {
        let clauses = clauses
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                raw.as_ref()
                    .iter()
                    .map(|&v| {
                        Literal::new(v).ok_or_else(|| CoreError::MalformedClause {
                            clause: idx,
                            reason: "literal 0 is not a variable".into(),
                        })
                    })
                    .collect::<CoreResult<Clause>>()
            })
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self { clauses })
    }

    /// The clauses in order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Number of clauses.
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the formula has no clauses (the tautology).
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Append a clause.
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Validate the formula against `num_vars` variables.
    ///
    /// Rejects empty clauses, out-of-range variables and variables that
    /// repeat inside a clause.
    pub fn check(&self, num_vars: u32) -> CoreResult<()> {
        if num_vars == 0 {
            return Err(CoreError::InvalidRegisterSize(
                "at least one variable is required".into(),
            ));
        }
        for (idx, clause) in self.clauses.iter().enumerate() {
            if clause.is_empty() {
                return Err(CoreError::MalformedClause {
                    clause: idx,
                    reason: "clause has no literals".into(),
                });
            }
            let mut seen = BTreeSet::new();
            for lit in clause.literals() {
                let var = lit.variable();
                if var > num_vars {
                    return Err(CoreError::MalformedClause {
                        clause: idx,
                        reason: format!(
                            "literal {} exceeds the {num_vars} declared variables",
                            lit.get()
                        ),
                    });
                }
                if !seen.insert(var) {
                    return Err(CoreError::InconsistentClause {
                        clause: idx,
                        variable: var,
                    });
                }
            }
        }
        Ok(())
    }

    /// Every clause holds under `assignment` (`assignment[i]` is variable `i + 1`).
    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied_by(assignment))
    }

    /// Evaluate with the assignment packed into an integer (bit `i` is variable `i + 1`).
    pub fn is_satisfied_by_bits(&self, bits: u64, num_vars: u32) -> bool {
        let assignment: Vec<bool> = (0..num_vars).map(|i| bits >> i & 1 == 1).collect();
        self.is_satisfied_by(&assignment)
    }

    /// Count satisfying assignments by enumeration.
    pub fn count_solutions(&self, num_vars: u32) -> CoreResult<u64> {
        let space = 1u64.checked_shl(num_vars).ok_or_else(|| {
            CoreError::InvalidRegisterSize(format!(
                "cannot enumerate assignments of {num_vars} variables"
            ))
        })?;
        Ok((0..space)
            .filter(|&bits| self.is_satisfied_by_bits(bits, num_vars))
            .count() as u64)
    }
}

impl FromIterator<Clause> for Formula {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "⊤");
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " ∧ ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
