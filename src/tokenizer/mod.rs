//! Tokenizer for linecalc source code
//!
//! Splits source text into physical lines, each line into whitespace
//! separated words, and classifies every word as a single token. Opening
//! parentheses at the front of a word and closing ones at its end are split
//! off first, so `(2` and `3)` read the same as `( 2` and `3 )`. Nothing is
//! rejected here: words with no meaning become `TokenKind::Unknown` and are
//! reported by the parser.

use log::debug;
use std::collections::VecDeque;
use std::fmt;

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Base-10 integer literal, optionally signed
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    LParen,
    RParen,
    /// Any word starting with a letter
    Identifier,
    /// Produced once the stream is exhausted
    EndOfInput,
    /// A word no other rule accepts
    Unknown,
}

impl TokenKind {
    /// Check if this kind is one of the four arithmetic operators
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number => write!(f, "number"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::Unknown => write!(f, "unknown token"),
        }
    }
}

/// A single token with the exact text that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based source line
    pub line: usize,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// Create the end-of-input marker
    pub fn end_of_input(line: usize) -> Self {
        Self::new(TokenKind::EndOfInput, "", line)
    }
}

/// Ordered token sequence consumed front to back
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
    last_line: usize,
}

impl TokenStream {
    /// Create a stream from already classified tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        let last_line = tokens.last().map_or(0, |token| token.line);
        Self {
            tokens: tokens.into(),
            last_line,
        }
    }

    /// Take the next token. Once empty this keeps returning `EndOfInput`.
    pub fn next_token(&mut self) -> Token {
        self.tokens
            .pop_front()
            .unwrap_or_else(|| Token::end_of_input(self.last_line))
    }

    /// Number of tokens not yet consumed
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Peek at the remaining tokens without consuming them
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }
}

/// Tokenize a complete source text
pub fn tokenize(source: &str) -> TokenStream {
    let mut tokens = Vec::new();

    for (index, line) in source.lines().enumerate() {
        tokens.extend(tokenize_line(line, index + 1));
    }

    debug!("tokenized {} tokens", tokens.len());
    TokenStream::new(tokens)
}

/// Tokenize one physical line
pub fn tokenize_line(line: &str, line_number: usize) -> Vec<Token> {
    let mut tokens = Vec::new();

    for word in line.split_whitespace() {
        for piece in split_parens(word) {
            tokens.push(Token::new(classify(piece), piece, line_number));
        }
    }

    tokens
}

/// Split leading '(' and trailing ')' off a word
fn split_parens(word: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = word;

    while rest.len() > 1 && rest.starts_with('(') {
        pieces.push(&rest[..1]);
        rest = &rest[1..];
    }

    let mut closing = 0;
    while rest.len() > 1 && rest.ends_with(')') {
        closing += 1;
        rest = &rest[..rest.len() - 1];
    }

    pieces.push(rest);
    pieces.extend(std::iter::repeat(")").take(closing));
    pieces
}

/// Determine the kind of a single whitespace-free word
pub fn classify(word: &str) -> TokenKind {
    match word {
        "+" => TokenKind::Plus,
        "-" => TokenKind::Minus,
        "*" => TokenKind::Star,
        "/" => TokenKind::Slash,
        "=" => TokenKind::Assign,
        "(" => TokenKind::LParen,
        ")" => TokenKind::RParen,
        _ if word.parse::<i64>().is_ok() => TokenKind::Number,
        _ if word.chars().next().is_some_and(char::is_alphabetic) => TokenKind::Identifier,
        _ => TokenKind::Unknown,
    }
}
