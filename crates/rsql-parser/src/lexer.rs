//! Lexer for RSQL queries
//!
//! Wraps the logos-generated [`TokenKind`] lexer, attaching spans to tokens and positions to
//! errors. The first lexical error ends tokenization.

use crate::parse::{ParseError, ParseResult};
use crate::token::{Token, TokenKind};
use logos::Logos;
use thiserror::Error;

/// Lexical error
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
pub enum LexError {
    /// Input that starts no token
    #[default]
    #[error("Unrecognized input")]
    UnrecognizedInput,

    /// A quote with no closing quote
    #[error("Unterminated quoted string")]
    UnterminatedQuote,

    /// Backslash followed by anything but `"`, `'` or `\`
    #[error("Invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
}

/// Lexer for tokenizing RSQL queries
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, TokenKind>,
    source: &'source str,
    failed: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer over a query
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            failed: false,
        }
    }

    /// Tokenize all input, stopping at the first error
    pub fn tokenize(self) -> ParseResult<Vec<Token>> {
        self.collect()
    }

    fn error(&self, err: LexError) -> ParseError {
        let position = self.inner.span().start;
        // logos gives up on an opening quote that never closes
        let source = match err {
            LexError::UnrecognizedInput
                if self.source[position..].starts_with(|c: char| c == '"' || c == '\'') =>
            {
                LexError::UnterminatedQuote
            }
            other => other,
        };
        ParseError::Lex { position, source }
    }
}

impl Iterator for Lexer<'_> {
    type Item = ParseResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.inner.next()? {
            Ok(kind) => {
                let span = self.inner.span();
                tracing::trace!("Token {} at {:?}", kind, span);
                Some(Ok(Token::new(kind, span)))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(self.error(err)))
            }
        }
    }
}
