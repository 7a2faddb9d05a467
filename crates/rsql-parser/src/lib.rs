//! Parser for RSQL queries
//!
//! Turns query text into the [`Node`] trees defined in `rsql-core`. The operators a parser
//! accepts come from its [`OperatorRegistry`]; anything else is rejected as an unknown operator.

#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod lexer;
pub mod parse;
pub mod token;

pub use lexer::{LexError, Lexer};
pub use parse::{ParseError, ParseResult, Parser};
pub use rsql_core::{
    ComparisonNode, ComparisonOperator, ConfigError, LogicalNode, LogicalOperator, NoArgVisitor,
    Node, NodeError, NodesFactory, OperatorRegistry, RsqlVisitor, Visitor,
};

use std::sync::Arc;

/// Reusable RSQL parser
///
/// Holds a [`NodesFactory`] and the registry behind it. Parsing takes `&self` and keeps no
/// state between calls, so one parser can serve any number of queries and threads.
#[derive(Debug, Clone, Default)]
pub struct RsqlParser {
    factory: NodesFactory,
}

impl RsqlParser {
    /// Parser accepting the default operators, `==` and `=in=`
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser accepting exactly the given operators
    pub fn with_operators<I>(operators: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ComparisonOperator>,
    {
        let registry = OperatorRegistry::new(operators)?;
        Ok(Self::with_registry(Arc::new(registry)))
    }

    /// Parser sharing an existing registry
    pub fn with_registry(registry: Arc<OperatorRegistry>) -> Self {
        Self {
            factory: NodesFactory::new(registry),
        }
    }

    /// Operators this parser accepts
    pub fn registry(&self) -> &OperatorRegistry {
        self.factory.registry()
    }

    /// Factory used to build nodes
    pub fn factory(&self) -> &NodesFactory {
        &self.factory
    }

    /// Parse a query into its tree
    pub fn parse(&self, query: &str) -> ParseResult<Node> {
        tracing::debug!("Parsing query of {} bytes", query.len());

        let result = Parser::new(query, &self.factory).and_then(|mut parser| parser.parse_input());
        match &result {
            Ok(node) => tracing::debug!("Parsed query into {} nodes", node.node_count()),
            Err(err) => tracing::debug!("Rejected query: {}", err),
        }
        result
    }
}
