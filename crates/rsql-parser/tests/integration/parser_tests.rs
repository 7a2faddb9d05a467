//! Parsing behavior against the default and standard operator sets

use super::{init_tracing, standard_parser};
use rsql_core::testing::{and, comparison, eq, not, or};
use rsql_parser::{
    ComparisonOperator, ConfigError, LexError, LogicalOperator, Node, NodeError, ParseError,
    RsqlParser,
};

#[test]
fn test_empty_operator_set_is_rejected() {
    assert_eq!(
        RsqlParser::with_operators(Vec::new()).unwrap_err(),
        ConfigError::EmptyOperators
    );
}

#[test]
fn test_invalid_syntax() {
    init_tracing();
    let err = RsqlParser::new().parse("name===").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Lex {
            position: 6,
            source: LexError::UnrecognizedInput
        }
    ));
}

#[test]
fn test_simple_comparison() {
    init_tracing();
    let node = RsqlParser::new().parse("name==Jimmy").unwrap();
    let comparison = node.as_comparison().unwrap();
    assert_eq!(comparison.selector(), "name");
    assert_eq!(comparison.operator().symbol(), "==");
    assert_eq!(comparison.arguments(), &["Jimmy".to_string()]);
}

#[test]
fn test_custom_operator() {
    init_tracing();
    let parser =
        RsqlParser::with_operators(vec![ComparisonOperator::from_symbol("=custom=", false).unwrap()])
            .unwrap();
    let node = parser.parse("field=custom=value").unwrap();
    let comparison = node.as_comparison().unwrap();
    assert_eq!(comparison.selector(), "field");
    assert_eq!(comparison.operator().symbol(), "=custom=");
    assert_eq!(comparison.arguments(), &["value".to_string()]);
}

#[test]
fn test_default_parser_rejects_other_operators() {
    init_tracing();
    let parser = RsqlParser::new();
    for query in ["age>30", "age=gt=30", "name!=Jimmy", "name=out=(a,b)"] {
        assert!(
            matches!(
                parser.parse(query),
                Err(ParseError::InvalidNode {
                    source: NodeError::UnknownOperator(_),
                    ..
                })
            ),
            "query {}",
            query
        );
    }
}

#[test]
fn test_parse_is_deterministic() {
    let parser = standard_parser();
    let query = "a==1;(b=in=(x,y),!(c=ge=3))";
    let first = parser.parse(query).unwrap();
    for _ in 0..10 {
        assert_eq!(parser.parse(query).unwrap(), first);
    }
}

#[test]
fn test_rendered_tree_parses_back() {
    let parser = standard_parser();
    let trees = vec![
        eq("name", "Jimmy"),
        comparison("city", "=in=", &["New York", "Rio", ""]),
        comparison("quote", "==", &["say \"hi\" \\ bye"]),
        comparison("it's", "!=", &["a;b,c=d"]),
        not(or(vec![eq("a", "1"), eq("b", "2")])),
        and(vec![and(vec![eq("a", "1"), eq("b", "2")]), eq("c", "3")]),
        or(vec![
            and(vec![eq("a", "1"), not(eq("b", "2"))]),
            comparison("age", "=ge=", &["30"]),
        ]),
    ];

    for tree in trees {
        let rendered = tree.to_string();
        assert_eq!(parser.parse(&rendered).unwrap(), tree, "rendered as {}", rendered);
    }
}

#[test]
fn test_precedence() {
    let parser = standard_parser();
    let node = parser.parse("a==1,b==2;c==3").unwrap();
    assert_eq!(node, or(vec![eq("a", "1"), and(vec![eq("b", "2"), eq("c", "3")])]));
    assert_eq!(node.to_string(), "(a==1,(b==2;c==3))");
}

#[test]
fn test_alternate_spellings_are_rejected() {
    let parser = standard_parser();
    let pairs = [
        ("age>30", "age=gt=30"),
        ("age>=30", "age=ge=30"),
        ("age<30", "age=lt=30"),
        ("age<=30", "age=le=30"),
    ];
    for (alternate, canonical) in pairs {
        assert!(parser.parse(canonical).is_ok(), "query {}", canonical);
        assert!(
            matches!(
                parser.parse(alternate),
                Err(ParseError::InvalidNode {
                    source: NodeError::UnknownOperator(_),
                    position: 3,
                })
            ),
            "query {}",
            alternate
        );
    }
}

#[test]
fn test_bare_symbol_operators_are_accepted_as_canonical() {
    init_tracing();
    let parser = RsqlParser::with_operators(vec![
        ComparisonOperator::from_symbols("=gt=", ">", false).unwrap(),
        ComparisonOperator::from_symbol(">", true).unwrap(),
    ])
    .unwrap();

    let node = parser.parse("a>(1,2)").unwrap();
    assert_eq!(node, comparison("a", ">", &["1", "2"]));
    assert_eq!(node.to_string(), "a>(1,2)");
    assert_eq!(parser.parse("a=gt=1").unwrap().to_string(), "a=gt=1");
}

#[test]
fn test_arity_is_enforced() {
    let parser = standard_parser();
    assert!(matches!(
        parser.parse("name!=(a,b)"),
        Err(ParseError::InvalidNode {
            source: NodeError::TooManyArguments { count: 2, .. },
            ..
        })
    ));
    assert_eq!(
        parser.parse("name=out=(a)").unwrap(),
        comparison("name", "=out=", &["a"])
    );
}

#[test]
fn test_malformed_queries() {
    let parser = standard_parser();
    let queries = [
        "",
        "   ",
        "(name==Jimmy",
        "name==Jimmy)",
        "name==Jimmy;",
        "name==Jimmy,,age==30",
        "name",
        "name==",
        "name==()",
        "!name==Jimmy",
        "()",
        "name==\"Jimmy",
        "name=='a\\tb'",
        "name==Jimmy age==30",
    ];
    for query in queries {
        assert!(parser.parse(query).is_err(), "query {:?} should be rejected", query);
    }
}

#[test]
fn test_error_positions() {
    let parser = standard_parser();
    assert_eq!(parser.parse("name==Jimmy)").unwrap_err().position(), Some(11));
    assert_eq!(parser.parse("a==1;b=x=2").unwrap_err().position(), Some(6));
    assert_eq!(parser.parse("a==1;").unwrap_err().position(), None);
}

#[test]
fn test_error_messages() {
    let parser = RsqlParser::new();
    assert_eq!(
        parser.parse("age>30").unwrap_err().to_string(),
        "Invalid expression at position 3: Unknown operator: >"
    );
    assert_eq!(
        parser.parse("(a==1").unwrap_err().to_string(),
        "Unexpected end of input: expected ')'"
    );
}

#[test]
fn test_single_child_groups_collapse() {
    let parser = standard_parser();
    let node = parser.parse("(((name==Jimmy)))").unwrap();
    assert!(matches!(node, Node::Comparison(_)));
    assert_eq!(node.logical_operator(), None);

    let node = parser.parse("!((name==Jimmy))").unwrap();
    assert_eq!(node.logical_operator(), Some(LogicalOperator::Not));
    assert_eq!(node.as_logical().unwrap().child(), &eq("name", "Jimmy"));
}

#[test]
fn test_parser_shared_between_threads() {
    let parser = standard_parser();
    let expected = parser.parse("a==1;b=in=(x,y)").unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(parser.parse("a==1;b=in=(x,y)").unwrap(), expected);
                }
            });
        }
    });
}
