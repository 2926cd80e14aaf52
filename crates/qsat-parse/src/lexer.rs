//! Line lexer shared by the CSV and DIMACS readers.

use logos::Logos;

use crate::error::{ParseError, ParseResult};

/// Tokens of a single CNF source line.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    /// Negation prefix in named-literal files.
    #[token("~")]
    Tilde,

    #[token(",")]
    Comma,

    /// End-of-data marker used by some DIMACS benchmark files.
    #[token("%")]
    Percent,

    /// Signed integer (DIMACS literal or numeric variable name).
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    /// Variable name or keyword.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.']*", |lex| lex.slice().to_string())]
    Ident(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Tilde => write!(f, "~"),
            Token::Comma => write!(f, ","),
            Token::Percent => write!(f, "%"),
            Token::Int(n) => write!(f, "{n}"),
            Token::Ident(s) => write!(f, "{s}"),
        }
    }
}

/// Tokenize one line; `line` is 1-based and used for error reporting.
pub fn tokenize_line(source: &str, line: usize) -> ParseResult<Vec<Token>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(ParseError::LexerError {
                    line,
                    column: lexer.span().start + 1,
                    message: format!("unexpected '{}'", lexer.slice()),
                });
            }
        }
    }

    Ok(tokens)
}
