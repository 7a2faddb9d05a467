//! Parser implementation for RSQL queries
//!
//! Recursive descent over the token stream, one function per grammar rule:
//!
//! ```text
//! input        := or_expr EOF
//! or_expr      := and_expr ( ',' and_expr )*
//! and_expr     := constraint ( ';' constraint )*
//! constraint   := comparison | group
//! group        := '!'? '(' or_expr ')'
//! comparison   := selector OPERATOR arguments
//! arguments    := value | '(' value ( ',' value )* ')'
//! ```
//!
//! One token of lookahead decides every branch. The first error aborts the parse.

use crate::lexer::{LexError, Lexer};
use crate::token::{Token, TokenKind};
use rsql_core::{LogicalOperator, Node, NodeError, NodesFactory};
use thiserror::Error;

/// Parse error
///
/// Every way a query can be rejected ends up here; the underlying lexical or node error is
/// available as the error's `source()`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The query could not be tokenized
    #[error("Lexical error at position {position}: {source}")]
    Lex {
        /// Byte offset where the failing token starts
        position: usize,
        /// What went wrong
        #[source]
        source: LexError,
    },

    /// A token the grammar does not allow here
    #[error("Unexpected token at position {position}: expected {expected}, got {got}")]
    UnexpectedToken {
        /// What the grammar allows here
        expected: String,
        /// The token found
        got: String,
        /// Byte offset of the token found
        position: usize,
    },

    /// The query ended early
    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof {
        /// What the grammar expected next
        expected: String,
    },

    /// Well-formed syntax describing an invalid node, e.g. an unknown operator
    #[error("Invalid expression at position {position}: {source}")]
    InvalidNode {
        /// Byte offset of the operator, or of the start of the node
        position: usize,
        /// Why the node was rejected
        #[source]
        source: NodeError,
    },
}

impl ParseError {
    /// Byte offset of the offending input, if it is not the end of input
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Lex { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::InvalidNode { position, .. } => Some(*position),
            ParseError::UnexpectedEof { .. } => None,
        }
    }
}

/// Result type for parsing
pub type ParseResult<T> = Result<T, ParseError>;

/// Parser for a single RSQL query
pub struct Parser<'f> {
    tokens: Vec<Token>,
    position: usize,
    factory: &'f NodesFactory,
}

impl<'f> Parser<'f> {
    /// Tokenize `source`, failing on the first lexical error
    pub fn new(source: &str, factory: &'f NodesFactory) -> ParseResult<Self> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
            factory,
        })
    }

    /// Parse the whole input as one expression
    pub fn parse_input(&mut self) -> ParseResult<Node> {
        let node = self.parse_or()?;
        if !self.is_at_end() {
            return Err(self.unexpected("',', ';' or end of input"));
        }
        Ok(node)
    }

    fn parse_or(&mut self) -> ParseResult<Node> {
        let start = self.offset();
        let first = self.parse_and()?;
        if !self.check_token(&TokenKind::Comma) {
            return Ok(first);
        }

        let mut children = vec![first];
        while self.check_token(&TokenKind::Comma) {
            self.advance();
            children.push(self.parse_and()?);
        }
        self.logical(LogicalOperator::Or, children, start)
    }

    fn parse_and(&mut self) -> ParseResult<Node> {
        let start = self.offset();
        let first = self.parse_constraint()?;
        if !self.check_token(&TokenKind::Semicolon) {
            return Ok(first);
        }

        let mut children = vec![first];
        while self.check_token(&TokenKind::Semicolon) {
            self.advance();
            children.push(self.parse_constraint()?);
        }
        self.logical(LogicalOperator::And, children, start)
    }

    fn parse_constraint(&mut self) -> ParseResult<Node> {
        let token_kind = self.current().map(|t| t.kind.clone());

        match token_kind {
            Some(TokenKind::Bang) => {
                let start = self.offset();
                self.advance();
                let inner = self.parse_group()?;
                self.logical(LogicalOperator::Not, vec![inner], start)
            }
            Some(TokenKind::LParen) => self.parse_group(),
            Some(kind) if kind.is_value() => self.parse_comparison(),
            _ => Err(self.unexpected("selector, '(' or '!'")),
        }
    }

    // Parentheses only steer precedence; they add no node of their own.
    fn parse_group(&mut self) -> ParseResult<Node> {
        self.expect_token(TokenKind::LParen)?;
        let node = self.parse_or()?;
        self.expect_token(TokenKind::RParen)?;
        Ok(node)
    }

    fn parse_comparison(&mut self) -> ParseResult<Node> {
        let start = self.offset();
        let selector = self.expect_value("selector")?;

        let operator_position = self.offset();
        let symbol = match self.current().map(|t| t.kind.clone()) {
            Some(TokenKind::Operator(symbol)) => symbol,
            _ => return Err(self.unexpected("comparison operator")),
        };
        if !self.factory.registry().contains(&symbol) {
            return Err(ParseError::InvalidNode {
                position: operator_position,
                source: NodeError::UnknownOperator(symbol),
            });
        }
        self.advance();

        let arguments = self.parse_arguments()?;

        self.factory
            .create_comparison_node(&symbol, selector, arguments)
            .map(Node::from)
            .map_err(|source| ParseError::InvalidNode {
                position: start,
                source,
            })
    }

    fn parse_arguments(&mut self) -> ParseResult<Vec<String>> {
        if !self.check_token(&TokenKind::LParen) {
            return Ok(vec![self.expect_value("argument")?]);
        }

        self.advance();
        let mut values = vec![self.expect_value("argument")?];
        while self.check_token(&TokenKind::Comma) {
            self.advance();
            values.push(self.expect_value("argument")?);
        }
        self.expect_token(TokenKind::RParen)?;

        Ok(values)
    }

    fn logical(
        &self,
        operator: LogicalOperator,
        children: Vec<Node>,
        start: usize,
    ) -> ParseResult<Node> {
        self.factory
            .create_logical_node(operator, children)
            .map(Node::from)
            .map_err(|source| ParseError::InvalidNode {
                position: start,
                source,
            })
    }

    // Helper methods

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Byte offset of the current token, or the end of the last one
    fn offset(&self) -> usize {
        match self.current() {
            Some(token) => token.position(),
            None => self.tokens.last().map_or(0, |t| t.span.end),
        }
    }

    fn check_token(&self, kind: &TokenKind) -> bool {
        self.current().is_some_and(|t| &t.kind == kind)
    }

    fn expect_token(&mut self, expected: TokenKind) -> ParseResult<()> {
        if self.check_token(&expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    fn expect_value(&mut self, what: &str) -> ParseResult<String> {
        match self.current().map(|t| t.kind.clone()) {
            Some(TokenKind::Unreserved(value)) | Some(TokenKind::Quoted(value)) => {
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.current() {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                got: token.kind.to_string(),
                position: token.position(),
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }
}
