//! Visitor pattern for traversing AST
//!
//! [`RsqlVisitor`] is the double-dispatch contract used to turn a tree into something else
//! (SQL, a predicate, ...): [`Node::accept`] calls the method matching the node's kind and
//! returns its result. [`NoArgVisitor`] is the same contract without the extra parameter.
//! [`Visitor`] is a side-effect-only walker with default recursion, for collecting or
//! counting.

use super::nodes::{ComparisonNode, LogicalNode, Node};

/// Visitor producing a value of type `R` from a node, given a parameter of type `A`
pub trait RsqlVisitor<R, A> {
    /// Visit an AND node
    fn visit_and(&mut self, node: &LogicalNode, param: A) -> R;

    /// Visit an OR node
    fn visit_or(&mut self, node: &LogicalNode, param: A) -> R;

    /// Visit a NOT node
    fn visit_not(&mut self, node: &LogicalNode, param: A) -> R;

    /// Visit a comparison
    fn visit_comparison(&mut self, node: &ComparisonNode, param: A) -> R;
}

/// [`RsqlVisitor`] without the second parameter.
///
/// Use with [`Node::accept_no_arg`]; the parameter is passed as `()`.
pub trait NoArgVisitor<R> {
    /// Visit an AND node
    fn visit_and(&mut self, node: &LogicalNode) -> R;

    /// Visit an OR node
    fn visit_or(&mut self, node: &LogicalNode) -> R;

    /// Visit a NOT node
    fn visit_not(&mut self, node: &LogicalNode) -> R;

    /// Visit a comparison
    fn visit_comparison(&mut self, node: &ComparisonNode) -> R;
}

pub(crate) struct NoArgAdapter<'a, V: ?Sized>(pub(crate) &'a mut V);

impl<R, V> RsqlVisitor<R, ()> for NoArgAdapter<'_, V>
where
    V: NoArgVisitor<R> + ?Sized,
{
    fn visit_and(&mut self, node: &LogicalNode, _param: ()) -> R {
        self.0.visit_and(node)
    }

    fn visit_or(&mut self, node: &LogicalNode, _param: ()) -> R {
        self.0.visit_or(node)
    }

    fn visit_not(&mut self, node: &LogicalNode, _param: ()) -> R {
        self.0.visit_not(node)
    }

    fn visit_comparison(&mut self, node: &ComparisonNode, _param: ()) -> R {
        self.0.visit_comparison(node)
    }
}

/// Walking visitor; override what you need and call the `walk_*` functions to recurse
pub trait Visitor: Sized {
    /// Visit any node
    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    /// Visit a logical node
    fn visit_logical_node(&mut self, node: &LogicalNode) {
        walk_logical(self, node);
    }

    /// Visit a comparison
    fn visit_comparison_node(&mut self, _node: &ComparisonNode) {
        // Leaf node, no children
    }
}

/// Walk a node
pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    match node {
        Node::Logical(logical) => visitor.visit_logical_node(logical),
        Node::Comparison(comparison) => visitor.visit_comparison_node(comparison),
    }
}

/// Walk the children of a logical node, in order
pub fn walk_logical<V: Visitor>(visitor: &mut V, node: &LogicalNode) {
    for child in node {
        visitor.visit_node(child);
    }
}
