//! CNF readers for qsat.
//!
//! Two input formats are supported:
//!
//! - **CSV**: one clause per line, comma-separated variable names, `~` negates.
//!   Variable indices follow order of first appearance.
//! - **DIMACS**: the standard `p cnf` format; variables are named `x1..xN`.
//!
//! Both produce a [`ParsedCnf`] whose clauses have their literals sorted by
//! variable index.
//!
//! # Example
//!
//! ```rust
//! use qsat_parse::parse_csv;
//!
//! let parsed = parse_csv("a, ~b\nb, c\n").unwrap();
//! assert_eq!(parsed.num_vars(), 3);
//! assert_eq!(parsed.variables.name(2), Some("b"));
//! ```

pub mod csv;
pub mod dimacs;
pub mod error;
pub mod lexer;
pub mod variables;

use std::path::Path;

use qsat_core::{Clause, Formula, Literal};
use serde::Serialize;

pub use csv::parse_csv;
pub use dimacs::parse_dimacs;
pub use error::{ParseError, ParseResult};
pub use variables::VariableMap;

/// A formula together with the names of its variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedCnf {
    pub formula: Formula,
    pub variables: VariableMap,
}

impl ParsedCnf {
    /// Number of variables, padding included.
    pub fn num_vars(&self) -> u32 {
        self.variables.len() as u32
    }

    /// Append a padding variable constrained to false.
    ///
    /// Returns the new variable's index.
    pub fn pad(&mut self) -> u32 {
        let index = self.variables.push_padding();
        if let Some(lit) = Literal::negative(index) {
            self.formula.push(Clause::new(vec![lit]));
        }
        index
    }
}

/// Input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Dimacs,
}

impl Format {
    /// Guess the format from the file extension, then from the content.
    pub fn detect(path: Option<&Path>, source: &str) -> Self {
        let ext = path
            .and_then(Path::extension)
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("cnf" | "dimacs") => return Format::Dimacs,
            Some("csv") => return Format::Csv,
            _ => {}
        }
        let has_header = source
            .lines()
            .any(|l| l.trim_start().starts_with("p cnf"));
        if has_header { Format::Dimacs } else { Format::Csv }
    }
}

/// Parse `source` in the given format.
pub fn parse_str(source: &str, format: Format) -> ParseResult<ParsedCnf> {
    match format {
        Format::Csv => parse_csv(source),
        Format::Dimacs => parse_dimacs(source),
    }
}

/// Read and parse a file, detecting the format when `format` is `None`.
pub fn parse_file(path: impl AsRef<Path>, format: Option<Format>) -> ParseResult<ParsedCnf> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let format = format.unwrap_or_else(|| Format::detect(Some(path), &source));
    tracing::debug!("Reading {} as {:?}", path.display(), format);
    parse_str(&source, format)
}

/// Sort literals by variable index and reject duplicates.
pub(crate) fn build_clause(mut literals: Vec<(i32, String)>, line: usize) -> ParseResult<Clause> {
    literals.sort_by_key(|(value, _)| (value.unsigned_abs(), *value));
    for pair in literals.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(ParseError::DuplicateLiteral {
                line,
                literal: pair[1].1.clone(),
            });
        }
    }
    literals
        .into_iter()
        .map(|(value, text)| {
            Literal::new(value).ok_or(ParseError::InvalidLiteral {
                line,
                literal: text,
                reason: "0 is not a variable".into(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(Format::detect(Some(Path::new("f.cnf")), "a, b"), Format::Dimacs);
        assert_eq!(Format::detect(Some(Path::new("f.CSV")), "p cnf 1 1"), Format::Csv);
    }

    #[test]
    fn test_detect_by_content() {
        assert_eq!(Format::detect(None, "c hi\np cnf 2 1\n1 2 0\n"), Format::Dimacs);
        assert_eq!(Format::detect(Some(Path::new("f.txt")), "a, ~b\n"), Format::Csv);
    }

    #[test]
    fn test_pad_adds_false_unit_clause() {
        let mut parsed = parse_csv("a, b\n").unwrap();
        let index = parsed.pad();
        assert_eq!(index, 3);
        assert_eq!(parsed.num_vars(), 3);
        assert_eq!(
            parsed.formula,
            Formula::from_ints(&[vec![1, 2], vec![-3]]).unwrap()
        );
        assert_eq!(parsed.formula.count_solutions(3).unwrap(), 3);
    }

    #[test]
    fn test_build_clause_keeps_opposite_polarity() {
        // x ∨ ¬x is left for the compiler to reject
        let clause = build_clause(vec![(-1, "~a".into()), (1, "a".into())], 1).unwrap();
        assert_eq!(clause.len(), 2);
    }
}
