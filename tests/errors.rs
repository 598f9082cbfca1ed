//! Parse failures: kind, position, expected tokens and rendering

mod common;

use ruleparse::ast::{ParseErrorKind, Position};
use ruleparse::config::ParserConfig;
use ruleparse::grammar::{Grammar, SequenceItem};
use ruleparse::testing::grammars;
use std::sync::Arc;

fn calc() -> Arc<Grammar> {
    Arc::new(grammars::arithmetic("errors_calc").unwrap())
}

#[test]
fn test_operator_without_right_operand() {
    common::init_logging();
    let err = calc().parse("1 *", None).unwrap_err();

    assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    assert_eq!(err.offset, Some(3));
    assert_eq!(err.position, Some(Position::new(1, 4)));
    assert_eq!(err.expected, vec!["number"]);
    assert_eq!(
        err.to_string(),
        "Parse error: Unexpected end of input (EOF) at line 1 column 4:\n\n1 *\n   ^\nExpected: number"
    );
}

#[test]
fn test_failure_stack_points_at_innermost_rule() {
    let err = calc().parse("1 *", None).unwrap_err();

    let rules: Vec<&str> = err.stack.iter().map(|frame| frame.rule.as_str()).collect();
    assert_eq!(rules, vec!["expr", "add", "mul", "number"]);
    assert!(format!("{:#}", err).ends_with("Parse stack:\n\texpr\n\tadd\n\tmul\n\tnumber\n"));
}

#[test]
fn test_unexpected_character_on_later_line() {
    let err = calc().parse("1 +\n2 * x", None).unwrap_err();

    assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter('x'));
    assert_eq!(err.offset, Some(8));
    assert_eq!((err.line(), err.column()), (Some(2), Some(5)));
    assert_eq!(err.context.as_deref(), Some("2 * x\n    ^"));
}

#[test]
fn test_trailing_input() {
    let err = calc().parse("1 2", None).unwrap_err();

    assert_eq!(err.kind, ParseErrorKind::TrailingInput);
    assert_eq!(err.offset, Some(2));
    assert_eq!(err.expected, vec!["'*'", "'+'"]);
    assert_eq!(
        err.to_string(),
        "Parse error: Parsing succeeded, but not all input was consumed at line 1 column 3:\n\n1 2\n  ^\nExpected: '*' or '+'"
    );
}

#[test]
fn test_no_start_symbol() {
    let mut grammar = Grammar::new("errors_no_start");
    grammar.add_token("number", r"\d+", false).unwrap();
    let grammar = Arc::new(grammar);

    let err = grammar.parse("1", None).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NoStartSymbol);
    assert_eq!(err.position, None);

    // an explicit start rule does not need one
    assert!(grammar.parse("1", Some("number")).is_ok());
}

#[test]
fn test_undefined_rule_aborts() {
    let mut grammar = Grammar::new("errors_undefined");
    grammar.add_token("number", r"\d+", false).unwrap();
    grammar.add_choice("value", ["missing", "number"]).unwrap();
    let grammar = Arc::new(grammar);

    let err = grammar.parse("1", Some("value")).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UndefinedRule {
            rule: "missing".into()
        }
    );
}

fn nested(depth: Option<usize>) -> Grammar {
    let mut grammar = Grammar::new("errors_nested");
    if let Some(depth) = depth {
        grammar.set_backtracking_depth(depth);
    }
    let open = grammar.add_keyword("(").unwrap();
    let close = grammar.add_keyword(")").unwrap();
    grammar
        .add_sequence(
            "nested",
            vec![
                SequenceItem::required(open),
                SequenceItem::optional("nested"),
                SequenceItem::required(close),
            ],
        )
        .unwrap();
    grammar.set_start_symbol("nested");
    grammar
}

fn parens(depth: usize) -> String {
    format!("{}{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_backtracking_depth() {
    let grammar = Arc::new(nested(Some(10)));
    assert!(grammar.parse(&parens(5), None).is_ok());

    let err = grammar.parse(&parens(15), None).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MaxRecursionDepth(10));
    assert_eq!(err.stack.len(), 11);
    assert_eq!(err.offset, Some(9));
    assert_eq!(err.expected, vec!["'('"]);
}

#[test]
fn test_default_config_bounds_deep_nesting() {
    let defaults = ruleparse::config::load_defaults().unwrap();
    let grammar = Arc::new(nested(None));

    let err = grammar
        .parse_tree(&parens(100_000), None, &defaults.parser)
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MaxRecursionDepth(200));
    assert!(grammar.parse_tree(&parens(150), None, &defaults.parser).is_ok());
}

#[test]
fn test_configured_depth_applies_without_grammar_depth() {
    let grammar = Arc::new(nested(None));
    let bounded = ParserConfig {
        max_depth: Some(10),
        ..ParserConfig::default()
    };

    let err = grammar.parse_tree(&parens(15), None, &bounded).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MaxRecursionDepth(10));
    assert!(grammar
        .parse_tree(&parens(15), None, &ParserConfig::default())
        .is_ok());
}

#[test]
fn test_grammar_depth_wins_over_configured_depth() {
    let grammar = Arc::new(nested(Some(50)));
    let bounded = ParserConfig {
        max_depth: Some(10),
        ..ParserConfig::default()
    };
    assert!(grammar.parse_tree(&parens(15), None, &bounded).is_ok());
}
