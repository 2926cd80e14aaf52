//! DIMACS CNF reader.
//!
//! ```text
//! c (x1 ∨ ¬x2) ∧ (x2 ∨ x3)
//! p cnf 3 2
//! 1 -2 0
//! 2 3 0
//! ```
//!
//! Clauses may span lines and several may share a line. A `%` token ends
//! the body. Variables are named `x1..xN` after the header's count.

use qsat_core::Formula;
use tracing::debug;

use crate::error::{ParseError, ParseResult};
use crate::lexer::{Token, tokenize_line};
use crate::variables::VariableMap;
use crate::{ParsedCnf, build_clause};

#[derive(Debug, Clone, Copy)]
struct Header {
    num_vars: usize,
    num_clauses: usize,
}

/// Parse a DIMACS CNF document.
pub fn parse_dimacs(source: &str) -> ParseResult<ParsedCnf> {
    let mut header: Option<Header> = None;
    let mut formula = Formula::default();
    let mut pending: Vec<(i32, String)> = Vec::new();
    let mut pending_line = 0;

    'lines: for (i, text) in source.lines().enumerate() {
        let line = i + 1;
        if is_comment(text) {
            continue;
        }
        let tokens = tokenize_line(text, line)?;
        if tokens.is_empty() {
            continue;
        }

        if matches!(tokens.first(), Some(Token::Ident(p)) if p == "p") {
            if header.is_some() {
                return Err(unexpected(line, "clause", "second 'p' header".into()));
            }
            header = Some(parse_header(&tokens, line)?);
            continue;
        }

        let Some(hdr) = header else {
            return Err(unexpected(line, "'p cnf' header", tokens[0].to_string()));
        };

        for token in &tokens {
            match token {
                Token::Percent => break 'lines,
                Token::Int(0) => {
                    if pending.is_empty() {
                        return Err(ParseError::EmptyClause { line });
                    }
                    formula.push(build_clause(std::mem::take(&mut pending), pending_line)?);
                }
                Token::Int(value) => {
                    let literal = check_literal(*value, hdr.num_vars, line)?;
                    if pending.is_empty() {
                        pending_line = line;
                    }
                    pending.push((literal, value.to_string()));
                }
                other => return Err(unexpected(line, "literal or 0", other.to_string())),
            }
        }
    }

    let Some(hdr) = header else {
        return Err(unexpected(
            source.lines().count().max(1),
            "'p cnf' header",
            "end of input".into(),
        ));
    };

    // Tolerate a final clause without its terminating 0
    if !pending.is_empty() {
        formula.push(build_clause(pending, pending_line)?);
    }

    if formula.num_clauses() != hdr.num_clauses {
        return Err(ParseError::HeaderMismatch {
            what: "clauses",
            declared: hdr.num_clauses,
            found: formula.num_clauses(),
        });
    }

    let mut variables = VariableMap::new();
    for v in 1..=hdr.num_vars {
        variables.get_or_insert(&format!("x{v}"));
    }

    debug!(
        "Parsed DIMACS: {} variables, {} clauses",
        hdr.num_vars, hdr.num_clauses
    );
    Ok(ParsedCnf { formula, variables })
}

/// `c` alone or followed by whitespace starts a comment line.
fn is_comment(text: &str) -> bool {
    let trimmed = text.trim_start();
    match trimmed.strip_prefix('c') {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

fn parse_header(tokens: &[Token], line: usize) -> ParseResult<Header> {
    match tokens {
        [Token::Ident(_), Token::Ident(fmt), Token::Int(v), Token::Int(c)] => {
            if fmt != "cnf" {
                return Err(unexpected(line, "'cnf'", fmt.clone()));
            }
            let num_vars = non_negative(*v, line)?;
            let num_clauses = non_negative(*c, line)?;
            Ok(Header {
                num_vars,
                num_clauses,
            })
        }
        _ => Err(unexpected(
            line,
            "'p cnf <vars> <clauses>'",
            tokens
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        )),
    }
}

fn non_negative(value: i64, line: usize) -> ParseResult<usize> {
    usize::try_from(value).map_err(|_| unexpected(line, "non-negative count", value.to_string()))
}

fn check_literal(value: i64, num_vars: usize, line: usize) -> ParseResult<i32> {
    let invalid = |reason: String| ParseError::InvalidLiteral {
        line,
        literal: value.to_string(),
        reason,
    };
    if value.unsigned_abs() > num_vars as u64 {
        return Err(invalid(format!(
            "variable exceeds the {num_vars} declared in the header"
        )));
    }
    i32::try_from(value).map_err(|_| invalid("out of range".into()))
}

fn unexpected(line: usize, expected: &str, found: String) -> ParseError {
    ParseError::UnexpectedToken {
        line,
        expected: expected.into(),
        found,
    }
}
