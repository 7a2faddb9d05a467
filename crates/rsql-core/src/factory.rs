//! Node factory
//!
//! The parser builds every node through [`NodesFactory`], so operator resolution and
//! structural validation happen in one place.

use crate::ast::{ComparisonNode, LogicalNode, LogicalOperator, Node};
use crate::registry::OperatorRegistry;
use crate::{NodeError, NodeResult};
use std::sync::Arc;

/// Builds validated nodes, resolving comparison operators against a registry
#[derive(Debug, Clone, Default)]
pub struct NodesFactory {
    registry: Arc<OperatorRegistry>,
}

impl NodesFactory {
    /// Create a factory resolving operators against `registry`
    pub fn new(registry: Arc<OperatorRegistry>) -> Self {
        Self { registry }
    }

    /// The operators this factory accepts
    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    /// Shared handle to the registry
    pub fn shared_registry(&self) -> Arc<OperatorRegistry> {
        Arc::clone(&self.registry)
    }

    /// Create an AND, OR or NOT node.
    ///
    /// Fails when `children` is empty, or when a NOT is not given exactly one child.
    pub fn create_logical_node(
        &self,
        operator: LogicalOperator,
        children: Vec<Node>,
    ) -> NodeResult<LogicalNode> {
        match operator {
            LogicalOperator::And => LogicalNode::and(children),
            LogicalOperator::Or => LogicalNode::or(children),
            LogicalOperator::Not => {
                if children.len() != 1 {
                    return Err(NodeError::NotArity(children.len()));
                }
                LogicalNode::new(LogicalOperator::Not, children)
            }
        }
    }

    /// Create a comparison node for the operator spelled `symbol`.
    ///
    /// Fails with [`NodeError::UnknownOperator`] if the registry has no such operator, and
    /// with the [`ComparisonNode::new`] errors otherwise.
    pub fn create_comparison_node(
        &self,
        symbol: &str,
        selector: impl Into<String>,
        arguments: Vec<String>,
    ) -> NodeResult<ComparisonNode> {
        let operator = self
            .registry
            .get(symbol)
            .ok_or_else(|| NodeError::UnknownOperator(symbol.to_string()))?;

        ComparisonNode::new(operator.clone(), selector, arguments)
    }
}
