//! Core types for RSQL queries
//!
//! This crate holds everything a parsed query is made of: comparison operators and the
//! registry that restricts which of them a parser accepts, the immutable AST nodes, the
//! factory that validates them, and the visitors used to traverse them.

#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod ast;
pub mod factory;
pub mod registry;

// Test utilities (available in tests and when used as a dependency with the testing feature)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use ast::{
    ComparisonNode, ComparisonOperator, LogicalNode, LogicalOperator, NoArgVisitor, Node,
    RsqlVisitor, Visitor,
};
pub use factory::NodesFactory;
pub use registry::OperatorRegistry;

use thiserror::Error;

/// Invalid parser configuration: bad operator spellings or an empty operator set.
///
/// These are raised while building operators and registries, never while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An operator was given no spelling at all
    #[error("Operator symbols must not be empty")]
    EmptySymbols,

    /// A spelling that the lexer could never produce
    #[error("Invalid operator symbol '{0}': must match =[A-Za-z]*=|[><]=?|!=")]
    InvalidSymbol(String),

    /// A registry was built from no operators
    #[error("Operator set must not be empty")]
    EmptyOperators,
}

/// A node could not be built because it would violate a structural invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// No registered operator has this canonical symbol
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Selector is empty or whitespace
    #[error("Selector must not be blank")]
    BlankSelector,

    /// Comparison without arguments
    #[error("Arguments list must not be empty")]
    EmptyArguments,

    /// More than one argument for a single-valued operator
    #[error("Operator {operator} expects a single argument, but {count} values given")]
    TooManyArguments {
        /// Canonical symbol of the single-valued operator
        operator: String,
        /// Number of arguments given
        count: usize,
    },

    /// AND or OR without children
    #[error("Logical node children must not be empty")]
    EmptyChildren,

    /// NOT with a child count other than one
    #[error("NOT operator requires exactly one child, got {0}")]
    NotArity(usize),
}

/// Result of building or rebuilding an AST node
pub type NodeResult<T> = Result<T, NodeError>;
