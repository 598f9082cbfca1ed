//! Renderings of parse results: AST text forms, JSON, match strings and statistics

mod common;

use ruleparse::ast::{to_pretty_string, treeviz};
use ruleparse::config::{Loader, ParserConfig};
use ruleparse::grammar::{Grammar, SequenceItem};
use ruleparse::testing::grammars;
use serde_json::json;
use std::sync::Arc;

fn calc() -> Arc<Grammar> {
    Arc::new(grammars::arithmetic("output_calc").unwrap())
}

#[test]
fn test_display_snapshot() {
    let ast = calc().parse("1 * 2 + 3", None).unwrap();
    insta::assert_snapshot!(ast.to_string(), @"(add '+' (mul '*' '1' '2') '3')");
}

#[test]
fn test_match_string_shows_every_rule() {
    let tree = calc()
        .parse_tree("1 * 2", None, &ParserConfig::default())
        .unwrap();
    insta::assert_snapshot!(tree.match_string(), @"(expr: (add: (mul: '1' * '2')))");
}

#[test]
fn test_pretty_string() {
    let grammar = Arc::new(grammars::backtracking_arithmetic("output_backtracking").unwrap());
    let ast = grammar.parse("(1 + 2) * 3", None).unwrap();

    let expected = [
        "(mul",
        "  '*'",
        "  (paren",
        "    (add '+' '1' '2')",
        "  )",
        "  '3'",
        ")",
    ];
    assert_eq!(to_pretty_string(&ast), format!("{}\n", expected.join("\n")));
}

#[test]
fn test_treeviz() {
    let ast = calc().parse("1 * 2 + 3", None).unwrap();

    let expected = [
        "add",
        "├─ '+' '+'",
        "├─ mul",
        "│ ├─ '*' '*'",
        "│ ├─ number '1'",
        "│ └─ number '2'",
        "└─ number '3'",
    ];
    assert_eq!(treeviz(&ast), format!("{}\n", expected.join("\n")));
}

#[test]
fn test_json_export() {
    let ast = calc().parse("1 * 2", None).unwrap();
    let exported: serde_json::Value = serde_json::from_str(&ast.to_json().unwrap()).unwrap();

    let terminal = |rule: &str, text: &str, offset: usize| {
        json!({
            "name": rule,
            "source": text,
            "kind": "terminal",
            "token": {
                "text": text,
                "rule": rule,
                "offset": offset,
                "position": { "line": 1, "column": offset + 1 }
            }
        })
    };
    assert_eq!(
        exported,
        json!({
            "name": "mul",
            "source": "1 * 2",
            "kind": "composite",
            "children": [
                terminal("'*'", "*", 2),
                terminal("number", "1", 0),
                terminal("number", "2", 4),
            ]
        })
    );
}

#[test]
fn test_json_includes_accessors() {
    let mut grammar = Grammar::new("output_pair");
    grammar.add_token("whitespace", r"\s+", true).unwrap();
    grammar.add_token("word", r"\w+", false).unwrap();
    grammar
        .add_sequence(
            "pair",
            vec![
                SequenceItem::required("word").named("key"),
                SequenceItem::required("word").named("value"),
            ],
        )
        .unwrap();
    let ast = Arc::new(grammar).parse("a b", Some("pair")).unwrap();

    let exported: serde_json::Value = serde_json::from_str(&ast.to_json().unwrap()).unwrap();
    assert_eq!(exported["accessors"], json!({ "key": 0, "value": 1 }));
    assert_eq!(exported["children"][1]["token"]["text"], json!("b"));
}

// ============================================================================
// Statistics
// ============================================================================

fn statements() -> Arc<Grammar> {
    let mut grammar = Grammar::new("output_statements");
    grammar.add_token("whitespace", r"\s+", true).unwrap();
    grammar.add_token("name", r"[a-z]+", false).unwrap();
    grammar.add_token("number", r"\d+", false).unwrap();
    let open = grammar.add_keyword("(").unwrap();
    let close = grammar.add_keyword(")").unwrap();
    let equals = grammar.add_keyword("=").unwrap();
    grammar
        .add_sequence(
            "call",
            vec![
                SequenceItem::required("name"),
                SequenceItem::required(open),
                SequenceItem::required(close),
            ],
        )
        .unwrap();
    grammar
        .add_sequence(
            "assign",
            vec![
                SequenceItem::required("name"),
                SequenceItem::required(equals),
                SequenceItem::required("number"),
            ],
        )
        .unwrap();
    grammar.add_choice("statement", ["call", "assign"]).unwrap();
    grammar.set_start_symbol("statement");
    Arc::new(grammar)
}

#[test]
fn test_stats_without_memoization() {
    let tree = statements()
        .parse_tree("x = 1", None, &ParserConfig::default())
        .unwrap();
    let stats = tree.stats();

    // statement, call, name, '(', assign, name, '=', number
    assert_eq!(stats.calls, 8);
    assert_eq!(stats.found, 6);
    assert_eq!(stats.not_found, 2);
    assert_eq!((stats.cache_hits, stats.cache_misses), (0, 0));
    assert_eq!(
        stats.to_string(),
        "8/6/2/0/0 (read attempts/successful reads/failed reads/cache hits/cache misses)"
    );
}

#[test]
fn test_stats_with_memoization() {
    common::init_logging();
    let config = ParserConfig {
        memoize_tokens: true,
        collect_stats: true,
        ..ParserConfig::default()
    };
    let tree = statements().parse_tree("x = 1", None, &config).unwrap();
    let stats = tree.stats();

    // `name` at offset 0 is read once for `call` and replayed for `assign`
    assert!(stats.cache_hits >= 1);
    assert!(stats.cache_misses > 0);
    assert_eq!(stats.calls, stats.found + stats.not_found);
    assert_eq!(tree.to_ast().to_string(), "(assign 'x' '1')");
}

#[test]
fn test_loaded_config_drives_the_parser() {
    let config = Loader::new()
        .set_override("parser.memoize_tokens", true)
        .unwrap()
        .build()
        .unwrap();

    let tree = statements().parse_tree("x = 1", None, &config.parser).unwrap();
    assert!(tree.stats().cache_hits >= 1);

    let defaults = ruleparse::config::load_defaults().unwrap();
    let tree = statements().parse_tree("x = 1", None, &defaults.parser).unwrap();
    assert_eq!(tree.stats().cache_hits, 0);
}
