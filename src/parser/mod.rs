//! Recursive-descent parser and evaluator
//!
//! Statements are evaluated as soon as they are recognized; no syntax tree
//! is built. The grammar has a single precedence tier:
//!
//! ```text
//! statement  := IDENTIFIER '=' expression
//!             | IDENTIFIER
//!             | expression
//! expression := term ( ('+' | '-' | '*' | '/') term )*
//! term       := NUMBER | IDENTIFIER | '(' expression ')'
//! ```
//!
//! Operators fold strictly left to right, so `2 + 3 * 4` is `20`.

use crate::error::{CalcError, Result};
use crate::tokenizer::{Token, TokenKind, TokenStream};
use crate::variables::Environment;
use std::io::Write;

/// Parser/evaluator over one token stream
///
/// Owns the run's environment and writes one line per printed value to `out`.
#[derive(Debug)]
pub struct Parser<W: Write> {
    tokens: TokenStream,
    current: Token,
    environment: Environment,
    out: W,
    depth: usize,
    max_depth: Option<usize>,
}

impl<W: Write> Parser<W> {
    /// Create a parser with an empty environment, primed on the first token
    pub fn new(tokens: TokenStream, out: W) -> Self {
        Self::with_environment(tokens, Environment::new(), out)
    }

    /// Create a parser that starts from existing variable bindings
    pub fn with_environment(mut tokens: TokenStream, environment: Environment, out: W) -> Self {
        let current = tokens.next_token();
        Self {
            tokens,
            current,
            environment,
            out,
            depth: 0,
            max_depth: None,
        }
    }

    /// Limit parenthesis nesting; `None` leaves recursion unbounded
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The lookahead token
    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn at_end(&self) -> bool {
        self.current.kind == TokenKind::EndOfInput
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_environment(self) -> Environment {
        self.environment
    }

    fn advance(&mut self) {
        self.current = self.tokens.next_token();
    }

    /// Drop unconsumed tokens up to and including `line`
    pub fn skip_through_line(&mut self, line: usize) {
        while !self.at_end() && self.current.line <= line {
            self.advance();
        }
    }

    /// Parse and run one statement
    pub fn parse_statement(&mut self) -> Result<()> {
        if self.current.kind == TokenKind::Identifier {
            let name = std::mem::take(&mut self.current.text);
            self.advance();

            if self.current.kind == TokenKind::Assign {
                self.advance();
                let value = self.parse_expression()?;
                self.environment.set(name, value);
                Ok(())
            } else {
                // Only a lookup: whatever follows starts the next statement
                let value = self.environment.get(&name)?;
                self.emit(value)
            }
        } else {
            let value = self.parse_expression()?;
            self.emit(value)
        }
    }

    /// Parse an operator chain, folding each operator as it is seen
    pub fn parse_expression(&mut self) -> Result<i64> {
        let mut left = self.parse_term()?;

        while self.current.kind.is_operator() {
            let op = self.current.kind;
            self.advance();

            let right = self.parse_term()?;
            left = apply(op, left, right)?;

            // Leave ')' for the enclosing term to consume
            if self.current.kind == TokenKind::RParen {
                return Ok(left);
            }
        }

        Ok(left)
    }

    /// Parse a number, variable reference or parenthesized expression
    pub fn parse_term(&mut self) -> Result<i64> {
        match self.current.kind {
            TokenKind::Number => {
                let value = self
                    .current
                    .text
                    .parse::<i64>()
                    .map_err(|_| CalcError::MalformedNumber(self.current.text.clone()))?;
                self.advance();
                Ok(value)
            }
            TokenKind::Identifier => {
                let value = self.environment.get(&self.current.text)?;
                self.advance();
                Ok(value)
            }
            TokenKind::LParen => {
                if let Some(limit) = self.max_depth {
                    if self.depth >= limit {
                        return Err(CalcError::NestingTooDeep { limit });
                    }
                }
                self.advance();

                self.depth += 1;
                let inner = self.parse_expression();
                self.depth -= 1;
                let value = inner?;

                if self.current.kind != TokenKind::RParen {
                    return Err(CalcError::ExpectedClosingParen);
                }
                self.advance();
                Ok(value)
            }
            other => Err(CalcError::UnexpectedToken(other)),
        }
    }

    fn emit(&mut self, value: i64) -> Result<()> {
        writeln!(self.out, "{}", value)?;
        Ok(())
    }
}

/// Apply one arithmetic operator with wrapping two's-complement semantics
fn apply(op: TokenKind, left: i64, right: i64) -> Result<i64> {
    match op {
        TokenKind::Plus => Ok(left.wrapping_add(right)),
        TokenKind::Minus => Ok(left.wrapping_sub(right)),
        TokenKind::Star => Ok(left.wrapping_mul(right)),
        TokenKind::Slash => {
            if right == 0 {
                Err(CalcError::DivisionByZero)
            } else {
                Ok(left.wrapping_div(right))
            }
        }
        other => Err(CalcError::UnexpectedToken(other)),
    }
}
