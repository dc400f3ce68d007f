//! linecalc
//!
//! A small interpreter for a line-oriented integer arithmetic language.
//! Source text is split into tokens, then a recursive-descent parser
//! evaluates each statement as soon as it is recognized: bare expressions
//! print their value and `name = expr` binds a variable.

pub mod config;
pub mod executor;
pub mod parser;
pub mod program;
pub mod tokenizer;
pub mod variables;

// Re-export core types for convenience
pub use crate::error::{CalcError, Result};
pub use config::{Config, ErrorMode};
pub use executor::{Executor, RunSummary};
pub use parser::Parser;
pub use program::Program;
pub use tokenizer::{tokenize, Token, TokenKind, TokenStream};
pub use variables::Environment;

/// Core error handling types for the interpreter
pub mod error {
    use crate::tokenizer::TokenKind;

    /// Result type for interpreter operations
    pub type Result<T> = std::result::Result<T, CalcError>;

    /// Every condition that stops a statement from producing a value
    #[derive(Debug, thiserror::Error)]
    pub enum CalcError {
        // Evaluation errors
        #[error("Division by zero")]
        DivisionByZero,
        #[error("Undefined variable: {0}")]
        UndefinedVariable(String),
        #[error("Malformed number: {0}")]
        MalformedNumber(String),

        // Syntax errors
        #[error("Unexpected token: {0}")]
        UnexpectedToken(TokenKind),
        #[error("Expected ')'")]
        ExpectedClosingParen,
        #[error("Parentheses nested deeper than {limit} levels")]
        NestingTooDeep { limit: usize },

        /// A statement error tagged with the source line it started on
        #[error("line {line}: {source}")]
        AtLine {
            line: usize,
            #[source]
            source: Box<CalcError>,
        },

        // Reading the source or writing results
        #[error("I/O error: {0}")]
        Io(#[from] std::io::Error),
    }

    impl CalcError {
        /// Attach a source line to this error
        pub fn at_line(self, line: usize) -> Self {
            match self {
                located @ CalcError::AtLine { .. } => located,
                other => CalcError::AtLine {
                    line,
                    source: Box::new(other),
                },
            }
        }

        /// The underlying condition, without any line information
        pub fn root(&self) -> &CalcError {
            match self {
                CalcError::AtLine { source, .. } => source.root(),
                other => other,
            }
        }

        /// Source line the error was reported on, if known
        pub fn line(&self) -> Option<usize> {
            match self {
                CalcError::AtLine { line, .. } => Some(*line),
                _ => None,
            }
        }
    }

}
