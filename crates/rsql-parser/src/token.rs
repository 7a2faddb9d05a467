//! Token definitions for RSQL

use crate::lexer::LexError;
use logos::Logos;
use std::fmt;
use std::ops::Range;

/// A token with its byte span in the query
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// Byte range of the token in the source
    pub span: Range<usize>,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Byte offset where the token starts
    pub fn position(&self) -> usize {
        self.span.start
    }
}

/// The kind of token
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// Opens a group or an argument list
    #[token("(")]
    LParen,
    /// Closes a group or an argument list
    #[token(")")]
    RParen,
    /// AND
    #[token(";")]
    Semicolon,
    /// OR, and the separator inside argument lists
    #[token(",")]
    Comma,
    /// NOT, when directly before a group
    #[token("!")]
    Bang,

    /// Any spelling a comparison operator may have; the registry decides if it is known
    #[regex(r"=[A-Za-z]*=|[><]=?|!=", |lex| lex.slice().to_owned())]
    Operator(String),

    /// Bare selector or argument
    #[regex(r#"[^ \t\r\n\f()<>=,;!"']+"#, |lex| lex.slice().to_owned())]
    Unreserved(String),

    /// Single- or double-quoted selector or argument, unescaped
    #[regex(r#""([^"\\]|\\(.|\n))*""#, unescape)]
    #[regex(r#"'([^'\\]|\\(.|\n))*'"#, unescape)]
    Quoted(String),
}

// Strip the quotes and resolve \" \' and \\; anything else after a backslash is an error.
fn unescape(lex: &mut logos::Lexer<TokenKind>) -> Result<String, LexError> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('"' | '\'' | '\\')) => value.push(escaped),
            Some(other) => return Err(LexError::InvalidEscape(other)),
            None => return Err(LexError::UnterminatedQuote),
        }
    }
    Ok(value)
}

impl TokenKind {
    /// Check if this token can be a selector or an argument
    pub fn is_value(&self) -> bool {
        matches!(self, TokenKind::Unreserved(_) | TokenKind::Quoted(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Operator(s) => write!(f, "operator '{}'", s),
            TokenKind::Unreserved(s) => write!(f, "'{}'", s),
            TokenKind::Quoted(s) => write!(f, "\"{}\"", s),
        }
    }
}
