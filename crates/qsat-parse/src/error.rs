//! Error types for the CNF readers.

use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// A clause with no literals.
    #[error("Empty clause at line {line}")]
    EmptyClause { line: usize },

    /// The DIMACS header disagrees with the body.
    #[error("Header declares {declared} {what}, found {found}")]
    HeaderMismatch {
        what: &'static str,
        declared: usize,
        found: usize,
    },

    /// A literal that cannot be used.
    #[error("Invalid literal '{literal}' at line {line}: {reason}")]
    InvalidLiteral {
        line: usize,
        literal: String,
        reason: String,
    },

    /// The same literal twice in one clause.
    #[error("Duplicate literal '{literal}' at line {line}")]
    DuplicateLiteral { line: usize, literal: String },

    /// I/O error while reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
