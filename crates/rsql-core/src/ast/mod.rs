//! Abstract Syntax Tree (AST) for RSQL queries
//!
//! The AST is a tree of immutable [`Node`]s: logical connectives (`;` AND, `,` OR, `!` NOT)
//! over comparison predicates such as `name=in=(Jimmy,John)`.

pub mod nodes;
pub mod operators;
pub mod visitor;

pub use nodes::{ComparisonNode, LogicalNode, LogicalOperator, Node};
pub use operators::ComparisonOperator;
pub use visitor::{walk_logical, walk_node, NoArgVisitor, RsqlVisitor, Visitor};

/// Characters that can never appear in an unquoted selector or argument.
pub const RESERVED_CHARS: [char; 10] = ['"', '\'', '(', ')', ';', ',', '=', '!', '<', '>'];

/// Check whether `text` can be written as a bare (unquoted) token.
///
/// Anything else must be quoted to survive a trip through the lexer.
pub fn is_unreserved(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|ch| !ch.is_whitespace() && !RESERVED_CHARS.contains(&ch))
}
