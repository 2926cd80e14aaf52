//! Named-literal CSV reader.
//!
//! One clause per line, literals separated by commas, `~` negates:
//!
//! ```text
//! # (a ∨ ¬b) ∧ (b ∨ c)
//! a, ~b
//! b, c
//! ```

use qsat_core::Formula;
use tracing::debug;

use crate::error::{ParseError, ParseResult};
use crate::lexer::{Token, tokenize_line};
use crate::variables::VariableMap;
use crate::{ParsedCnf, build_clause};

/// Parse a named-literal CSV document.
pub fn parse_csv(source: &str) -> ParseResult<ParsedCnf> {
    let mut variables = VariableMap::new();
    let mut formula = Formula::default();

    for (i, text) in source.lines().enumerate() {
        let line = i + 1;
        let tokens = tokenize_line(text, line)?;
        if tokens.is_empty() {
            continue;
        }
        let literals = parse_line(&tokens, line, &mut variables)?;
        formula.push(build_clause(literals, line)?);
    }

    debug!(
        "Parsed CSV: {} variables, {} clauses",
        variables.len(),
        formula.num_clauses()
    );
    Ok(ParsedCnf { formula, variables })
}

/// `literal (',' literal)*` where `literal = '~'? name`.
fn parse_line(
    tokens: &[Token],
    line: usize,
    variables: &mut VariableMap,
) -> ParseResult<Vec<(i32, String)>> {
    let mut literals = Vec::new();
    let mut iter = tokens.iter().peekable();

    loop {
        let negated = matches!(iter.peek(), Some(Token::Tilde));
        if negated {
            iter.next();
        }

        let name = match iter.next() {
            Some(Token::Ident(name)) => name.clone(),
            Some(Token::Int(n)) => n.to_string(),
            Some(other) => return Err(unexpected(line, "variable name", other.to_string())),
            None => return Err(unexpected(line, "variable name", "end of line".into())),
        };

        let index = variables.get_or_insert(&name);
        let value = i32::try_from(index).map_err(|_| ParseError::InvalidLiteral {
            line,
            literal: name.clone(),
            reason: "too many variables".into(),
        })?;
        let display = if negated { format!("~{name}") } else { name };
        literals.push((if negated { -value } else { value }, display));

        match iter.next() {
            None => break,
            Some(Token::Comma) => continue,
            Some(other) => return Err(unexpected(line, "',' or end of line", other.to_string())),
        }
    }

    Ok(literals)
}

fn unexpected(line: usize, expected: &str, found: String) -> ParseError {
    ParseError::UnexpectedToken {
        line,
        expected: expected.into(),
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let parsed = parse_csv("a, ~b\nb, c\n").unwrap();
        assert_eq!(parsed.variables.len(), 3);
        assert_eq!(parsed.formula, Formula::from_ints(&[[1, -2], [2, 3]]).unwrap());
    }

    #[test]
    fn test_indices_follow_first_appearance() {
        let parsed = parse_csv("zeta\n~alpha, zeta\n").unwrap();
        assert_eq!(parsed.variables.index("zeta"), Some(1));
        assert_eq!(parsed.variables.index("alpha"), Some(2));
        // literals sorted by variable index
        assert_eq!(parsed.formula, Formula::from_ints(&[vec![1], vec![1, -2]]).unwrap());
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let src = "# header\n\na, b  # inline\n   \n~a\n";
        let parsed = parse_csv(src).unwrap();
        assert_eq!(parsed.formula.num_clauses(), 2);
    }

    #[test]
    fn test_numeric_names() {
        let parsed = parse_csv("7, ~3\n").unwrap();
        assert_eq!(parsed.variables.name(1), Some("7"));
        assert_eq!(parsed.variables.name(2), Some("3"));
    }

    #[test]
    fn test_trailing_comma() {
        let err = parse_csv("a,\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { line: 1, .. }));
    }

    #[test]
    fn test_missing_comma() {
        let err = parse_csv("a\nb c\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { line: 2, .. }));
    }

    #[test]
    fn test_duplicate_literal() {
        let err = parse_csv("a, b, a\n").unwrap_err();
        match err {
            ParseError::DuplicateLiteral { line, literal } => {
                assert_eq!(line, 1);
                assert_eq!(literal, "a");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_lexer_error_reports_line() {
        let err = parse_csv("a\nb, !c\n").unwrap_err();
        assert!(matches!(err, ParseError::LexerError { line: 2, .. }));
    }
}
