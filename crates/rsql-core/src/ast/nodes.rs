//! AST node definitions

use super::is_unreserved;
use super::operators::ComparisonOperator;
use super::visitor::{NoArgAdapter, NoArgVisitor, RsqlVisitor, Visitor};
use crate::{NodeError, NodeResult};
use std::fmt;

/// A node of a parsed query
///
/// Nodes are immutable: the `with_*` methods on the variants build new, revalidated nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Node {
    /// AND, OR or NOT over child nodes
    Logical(LogicalNode),
    /// `selector<op>arguments`
    Comparison(ComparisonNode),
}

impl Node {
    /// Dispatch to the visitor method matching this node's kind
    pub fn accept<R, A, V>(&self, visitor: &mut V, param: A) -> R
    where
        V: RsqlVisitor<R, A> + ?Sized,
    {
        match self {
            Node::Logical(node) => node.accept(visitor, param),
            Node::Comparison(node) => node.accept(visitor, param),
        }
    }

    /// Dispatch to a visitor that takes no extra parameter
    pub fn accept_no_arg<R, V>(&self, visitor: &mut V) -> R
    where
        V: NoArgVisitor<R> + ?Sized,
    {
        self.accept(&mut NoArgAdapter(visitor), ())
    }

    /// The logical node, if this is one
    pub fn as_logical(&self) -> Option<&LogicalNode> {
        match self {
            Node::Logical(node) => Some(node),
            Node::Comparison(_) => None,
        }
    }

    /// The comparison node, if this is one
    pub fn as_comparison(&self) -> Option<&ComparisonNode> {
        match self {
            Node::Comparison(node) => Some(node),
            Node::Logical(_) => None,
        }
    }

    /// The logical operator of a logical node
    pub fn logical_operator(&self) -> Option<LogicalOperator> {
        self.as_logical().map(LogicalNode::operator)
    }

    /// Total number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        let mut counter = NodeCounter(0);
        counter.visit_node(self);
        counter.0
    }
}

struct NodeCounter(usize);

impl Visitor for NodeCounter {
    fn visit_node(&mut self, node: &Node) {
        self.0 += 1;
        super::visitor::walk_node(self, node);
    }
}

impl From<LogicalNode> for Node {
    fn from(node: LogicalNode) -> Self {
        Node::Logical(node)
    }
}

impl From<ComparisonNode> for Node {
    fn from(node: ComparisonNode) -> Self {
        Node::Comparison(node)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Logical(node) => fmt::Display::fmt(node, f),
            Node::Comparison(node) => fmt::Display::fmt(node, f),
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum LogicalOperator {
    /// `;`
    And,
    /// `,`
    Or,
    /// `!`
    Not,
}

impl LogicalOperator {
    /// The symbol used in queries
    pub fn symbol(&self) -> &'static str {
        match self {
            LogicalOperator::And => ";",
            LogicalOperator::Or => ",",
            LogicalOperator::Not => "!",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A logical operation connecting child nodes, e.g. `a==1;b==2`
///
/// AND and OR hold one or more children in query order; NOT holds exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LogicalNode {
    operator: LogicalOperator,
    children: Vec<Node>,
}

impl LogicalNode {
    /// Create a logical node, validating the number of children
    pub fn new<I>(operator: LogicalOperator, children: I) -> NodeResult<Self>
    where
        I: IntoIterator<Item = Node>,
    {
        let children: Vec<Node> = children.into_iter().collect();
        if children.is_empty() {
            return Err(NodeError::EmptyChildren);
        }
        if operator == LogicalOperator::Not && children.len() != 1 {
            return Err(NodeError::NotArity(children.len()));
        }
        Ok(Self { operator, children })
    }

    /// Create an AND node
    pub fn and<I: IntoIterator<Item = Node>>(children: I) -> NodeResult<Self> {
        Self::new(LogicalOperator::And, children)
    }

    /// Create an OR node
    pub fn or<I: IntoIterator<Item = Node>>(children: I) -> NodeResult<Self> {
        Self::new(LogicalOperator::Or, children)
    }

    /// Create a NOT node
    pub fn not(child: Node) -> Self {
        Self {
            operator: LogicalOperator::Not,
            children: vec![child],
        }
    }

    /// Copy of this node with other children and the same operator
    pub fn with_children<I: IntoIterator<Item = Node>>(&self, children: I) -> NodeResult<Self> {
        Self::new(self.operator, children)
    }

    /// AND, OR or NOT
    pub fn operator(&self) -> LogicalOperator {
        self.operator
    }

    /// Children in query order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The first child; the only one for NOT
    pub fn child(&self) -> &Node {
        &self.children[0]
    }

    /// Iterate over the children in query order
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always false: a logical node has at least one child
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Dispatch to `visit_and`, `visit_or` or `visit_not`
    pub fn accept<R, A, V>(&self, visitor: &mut V, param: A) -> R
    where
        V: RsqlVisitor<R, A> + ?Sized,
    {
        match self.operator {
            LogicalOperator::And => visitor.visit_and(self, param),
            LogicalOperator::Or => visitor.visit_or(self, param),
            LogicalOperator::Not => visitor.visit_not(self, param),
        }
    }
}

impl<'a> IntoIterator for &'a LogicalNode {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl fmt::Display for LogicalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator == LogicalOperator::Not {
            write!(f, "{}", self.operator)?;
        }
        write!(f, "(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.operator)?;
            }
            write!(f, "{}", child)?;
        }
        write!(f, ")")
    }
}

/// A comparison of a selector against one or more arguments, e.g. `name=in=(Jimmy,James)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonNode {
    operator: ComparisonOperator,
    selector: String,
    arguments: Vec<String>,
}

impl ComparisonNode {
    /// Create a comparison node.
    ///
    /// Fails if the selector is blank, there are no arguments, or a single-valued
    /// operator is given more than one argument.
    pub fn new<S, I, T>(operator: ComparisonOperator, selector: S, arguments: I) -> NodeResult<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let selector = selector.into();
        let arguments: Vec<String> = arguments.into_iter().map(Into::into).collect();

        if selector.trim().is_empty() {
            return Err(NodeError::BlankSelector);
        }
        if arguments.is_empty() {
            return Err(NodeError::EmptyArguments);
        }
        if !operator.is_multi_value() && arguments.len() > 1 {
            return Err(NodeError::TooManyArguments {
                operator: operator.symbol().to_string(),
                count: arguments.len(),
            });
        }

        Ok(Self {
            operator,
            selector,
            arguments,
        })
    }

    /// Copy of this node with another operator
    pub fn with_operator(&self, operator: ComparisonOperator) -> NodeResult<Self> {
        Self::new(operator, self.selector.clone(), self.arguments.iter().cloned())
    }

    /// Copy of this node with other arguments
    pub fn with_arguments<I, T>(&self, arguments: I) -> NodeResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(self.operator.clone(), self.selector.clone(), arguments)
    }

    /// The resolved operator
    pub fn operator(&self) -> &ComparisonOperator {
        &self.operator
    }

    /// The selector, unquoted
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Arguments in query order
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Dispatch to `visit_comparison`
    pub fn accept<R, A, V>(&self, visitor: &mut V, param: A) -> R
    where
        V: RsqlVisitor<R, A> + ?Sized,
    {
        visitor.visit_comparison(self, param)
    }
}

// Bare if the lexer would read it back as one token, double-quoted otherwise.
fn write_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if is_unreserved(value) {
        return write!(f, "{}", value);
    }
    write!(f, "\"")?;
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            write!(f, "\\")?;
        }
        write!(f, "{}", ch)?;
    }
    write!(f, "\"")
}

impl fmt::Display for ComparisonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, &self.selector)?;
        write!(f, "{}", self.operator)?;

        if self.arguments.len() == 1 {
            return write_value(f, &self.arguments[0]);
        }

        write!(f, "(")?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write_value(f, arg)?;
        }
        write!(f, ")")
    }
}
