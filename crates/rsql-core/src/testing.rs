//! Test utilities and helper functions for RSQL tests
//!
//! Builders that panic on invalid input, so expected trees can be written inline.

use crate::ast::{ComparisonNode, ComparisonOperator, LogicalNode, Node};
use crate::registry::OperatorRegistry;

/// Create a comparison node with `symbol` as the operator's canonical spelling.
///
/// Standard operators keep their arity; any other symbol is multi-valued when more than one
/// argument is given.
pub fn comparison(selector: &str, symbol: &str, arguments: &[&str]) -> Node {
    let registry = OperatorRegistry::standard();
    let operator = match registry.get(symbol) {
        Some(op) => op.clone(),
        None => ComparisonOperator::from_symbol(symbol, arguments.len() > 1)
            .unwrap_or_else(|e| panic!("invalid test operator {}: {}", symbol, e)),
    };
    ComparisonNode::new(operator, selector, arguments.iter().copied())
        .unwrap_or_else(|e| panic!("invalid test comparison: {}", e))
        .into()
}

/// Shorthand for an `==` comparison
pub fn eq(selector: &str, argument: &str) -> Node {
    comparison(selector, "==", &[argument])
}

/// Create an AND node
pub fn and(children: Vec<Node>) -> Node {
    LogicalNode::and(children)
        .unwrap_or_else(|e| panic!("invalid test AND: {}", e))
        .into()
}

/// Create an OR node
pub fn or(children: Vec<Node>) -> Node {
    LogicalNode::or(children)
        .unwrap_or_else(|e| panic!("invalid test OR: {}", e))
        .into()
}

/// Create a NOT node
pub fn not(child: Node) -> Node {
    LogicalNode::not(child).into()
}

/// Operators used by the wider parser tests: `==`, `=in=`, `!=`, `=out=`, `>`, `<`, `>=`, `<=`
pub fn extended_operators() -> Vec<ComparisonOperator> {
    [
        ("==", false),
        ("=in=", true),
        ("!=", false),
        ("=out=", true),
        (">", false),
        ("<", false),
        (">=", false),
        ("<=", false),
    ]
    .into_iter()
    .map(|(symbol, multi)| {
        ComparisonOperator::from_symbol(symbol, multi)
            .unwrap_or_else(|e| panic!("invalid test operator {}: {}", symbol, e))
    })
    .collect()
}
