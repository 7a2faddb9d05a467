//! Nested expressions over a parser configured with bare symbol operators

use super::init_tracing;
use rsql_core::testing::extended_operators;
use rsql_parser::{ComparisonNode, LogicalNode, LogicalOperator, Node, RsqlParser};

fn parser() -> RsqlParser {
    init_tracing();
    RsqlParser::with_operators(extended_operators()).unwrap()
}

fn logical(node: &Node) -> &LogicalNode {
    node.as_logical()
        .unwrap_or_else(|| panic!("expected logical node, got {}", node))
}

fn leaf(node: &Node) -> &ComparisonNode {
    node.as_comparison()
        .unwrap_or_else(|| panic!("expected comparison, got {}", node))
}

fn assert_leaf(node: &Node, selector: &str, symbol: &str, argument: &str) {
    let comparison = leaf(node);
    assert_eq!(comparison.selector(), selector);
    assert_eq!(comparison.operator().symbol(), symbol);
    assert_eq!(comparison.arguments(), &[argument.to_string()]);
}

#[test]
fn test_and_expression() {
    let node = parser().parse("name==Jimmy;age==30").unwrap();
    let and = logical(&node);
    assert_eq!(and.operator(), LogicalOperator::And);
    assert_eq!(and.len(), 2);
    assert_leaf(&and.children()[0], "name", "==", "Jimmy");
    assert_leaf(&and.children()[1], "age", "==", "30");
}

#[test]
fn test_or_expression() {
    let node = parser().parse("name==Jimmy,age==30").unwrap();
    let or = logical(&node);
    assert_eq!(or.operator(), LogicalOperator::Or);
    assert_eq!(or.len(), 2);
}

#[test]
fn test_not_expression() {
    let node = parser().parse("!(name==Jimmy)").unwrap();
    let not = logical(&node);
    assert_eq!(not.operator(), LogicalOperator::Not);
    assert_eq!(not.len(), 1);
    assert_leaf(not.child(), "name", "==", "Jimmy");
}

#[test]
fn test_nested_and_or() {
    let node = parser().parse("name==Jimmy;(age==30,city==London)").unwrap();
    let and = logical(&node);
    assert_eq!(and.operator(), LogicalOperator::And);
    assert_eq!(and.len(), 2);
    assert_leaf(&and.children()[0], "name", "==", "Jimmy");

    let or = logical(&and.children()[1]);
    assert_eq!(or.operator(), LogicalOperator::Or);
    assert_eq!(or.len(), 2);
}

#[test]
fn test_in_operator() {
    let node = parser().parse("name=in=(Jimmy,John,Jane)").unwrap();
    let comparison = leaf(&node);
    assert_eq!(comparison.selector(), "name");
    assert_eq!(comparison.operator().symbol(), "=in=");
    assert_eq!(comparison.arguments(), &["Jimmy", "John", "Jane"]);
}

#[test]
fn test_negated_nested_expression() {
    let node = parser()
        .parse("!(name==Jimmy;(age==30,city==London));status==active")
        .unwrap();
    let and = logical(&node);
    assert_eq!(and.operator(), LogicalOperator::And);
    assert_eq!(and.len(), 2);

    let not = logical(&and.children()[0]);
    assert_eq!(not.operator(), LogicalOperator::Not);
    let inner_and = logical(not.child());
    assert_eq!(inner_and.operator(), LogicalOperator::And);
    assert_leaf(&inner_and.children()[0], "name", "==", "Jimmy");
    assert_eq!(
        logical(&inner_and.children()[1]).operator(),
        LogicalOperator::Or
    );

    assert_leaf(&and.children()[1], "status", "==", "active");
}

#[test]
fn test_double_negation() {
    let node = parser().parse("!(!(name==Jimmy,age!=30));city==London").unwrap();
    let and = logical(&node);
    assert_eq!(and.operator(), LogicalOperator::And);

    let not = logical(&and.children()[0]);
    assert_eq!(not.operator(), LogicalOperator::Not);
    let inner_not = logical(not.child());
    assert_eq!(inner_not.operator(), LogicalOperator::Not);
    let or = logical(inner_not.child());
    assert_eq!(or.operator(), LogicalOperator::Or);
    assert_leaf(&or.children()[0], "name", "==", "Jimmy");
    assert_leaf(&or.children()[1], "age", "!=", "30");

    assert_leaf(&and.children()[1], "city", "==", "London");
}

#[test]
fn test_mixed_levels() {
    let node = parser()
        .parse("name==Jimmy,age==30;(city==London,status==active)")
        .unwrap();
    let or = logical(&node);
    assert_eq!(or.operator(), LogicalOperator::Or);
    assert_eq!(or.len(), 2);
    assert_leaf(&or.children()[0], "name", "==", "Jimmy");

    let and = logical(&or.children()[1]);
    assert_eq!(and.operator(), LogicalOperator::And);
    assert_eq!(and.len(), 2);
    assert_leaf(&and.children()[0], "age", "==", "30");

    let inner_or = logical(&and.children()[1]);
    assert_eq!(inner_or.operator(), LogicalOperator::Or);
    assert_leaf(&inner_or.children()[0], "city", "==", "London");
    assert_leaf(&inner_or.children()[1], "status", "==", "active");
}

#[test]
fn test_bare_symbol_operators_keep_their_spelling() {
    let node = parser().parse("age>25;age<=60").unwrap();
    let and = logical(&node);
    assert_leaf(&and.children()[0], "age", ">", "25");
    assert_leaf(&and.children()[1], "age", "<=", "60");
    assert_eq!(node.to_string(), "(age>25;age<=60)");
}

#[test]
fn test_long_flat_expressions() {
    let parser = parser();

    let query = (1..=20)
        .map(|i| format!("field{}==value{}", i, i))
        .collect::<Vec<_>>()
        .join(";");
    let node = parser.parse(&query).unwrap();
    assert_eq!(logical(&node).len(), 20);
    assert_eq!(node.node_count(), 21);

    let query = (1..=5)
        .map(|i| {
            let group = (1..=5)
                .map(|j| format!("f{}{}==v{}{}", i, j, i, j))
                .collect::<Vec<_>>()
                .join(";");
            format!("({})", group)
        })
        .collect::<Vec<_>>()
        .join(",");
    let node = parser.parse(&query).unwrap();
    let or = logical(&node);
    assert_eq!(or.len(), 5);
    assert!(or.iter().all(|child| logical(child).len() == 5));
}
