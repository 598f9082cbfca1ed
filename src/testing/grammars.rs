//! Reference grammars shared by the test suites
//!
//! Each factory takes the grammar name so suites can register copies under names of their
//! own without clashing in the process-wide registry.

use crate::ast::GrammarError;
use crate::grammar::{Associativity, Grammar, ListDef, SequenceItem};

/// `hw := identifier identifier?`, whitespace skipped
pub fn hello_world(name: &str) -> Result<Grammar, GrammarError> {
    let mut grammar = Grammar::new(name);
    grammar.add_token("identifier", r"\w+", false)?;
    grammar.add_token("whitespace", r"\s+", true)?;
    let hw = grammar.add_sequence(
        "hw",
        vec![
            SequenceItem::required("identifier"),
            SequenceItem::optional("identifier"),
        ],
    )?;
    grammar.set_start_symbol(hw);
    Ok(grammar)
}

/// [`hello_world`] plus choices and lists over the keywords `other` and `planet`
///
/// - `op := other | planet` (start symbol)
/// - `list1 := other identifier* planet`
/// - `list2 := other (identifier (',' identifier)* ','?)? planet`
/// - `planets := identifier*`
/// - `emptyListEOF := identifier planets`
pub fn planets(name: &str) -> Result<Grammar, GrammarError> {
    let mut grammar = hello_world(name)?;
    let other = grammar.add_keyword("other")?;
    let planet = grammar.add_keyword("planet")?;
    let comma = grammar.add_keyword(",")?;

    let op = grammar.add_choice("op", [other.as_str(), planet.as_str()])?;
    grammar.add_list(
        "list1",
        ListDef::new("identifier")
            .pre(&other)
            .post(&planet)
            .nullable(true)
            .allow_trailing(true),
    )?;
    grammar.add_list(
        "list2",
        ListDef::new("identifier")
            .separator(comma)
            .pre(&other)
            .post(&planet)
            .nullable(true)
            .allow_trailing(true),
    )?;
    grammar.add_list("planets", ListDef::new("identifier").nullable(true))?;
    grammar.add_sequence(
        "emptyListEOF",
        vec![
            SequenceItem::required("identifier"),
            SequenceItem::required("planets"),
        ],
    )?;
    grammar.set_start_symbol(op);
    Ok(grammar)
}

/// Precedence by layering: `expr := add`, `add := mul ('+' mul)*` (right),
/// `mul := number ('*' number)*` (left)
pub fn arithmetic(name: &str) -> Result<Grammar, GrammarError> {
    let mut grammar = Grammar::new(name);
    grammar.add_token("whitespace", r"\s+", true)?;
    grammar.add_token("number", r"\d+", false)?;

    let times = grammar.add_keyword("*")?;
    let mul = grammar.add_operator("mul", Associativity::Left, times, "number")?;
    let plus = grammar.add_keyword("+")?;
    let add = grammar.add_operator("add", Associativity::Right, plus, mul)?;
    let expr = grammar.add_choice("expr", [add])?;
    grammar.set_start_symbol(expr);
    Ok(grammar)
}

/// Operators whose operands recurse into `expr := add | mul | number | paren`,
/// with `paren := '(' expr ')'` and a backtracking depth of 50
pub fn backtracking_arithmetic(name: &str) -> Result<Grammar, GrammarError> {
    let mut grammar = Grammar::new(name);
    grammar.set_backtracking_depth(50);
    grammar.add_token("whitespace", r"\s+", true)?;
    grammar.add_token("number", r"\d+", false)?;

    let times = grammar.add_keyword("*")?;
    let mul = grammar.add_operator("mul", Associativity::Left, times, "expr")?;
    let plus = grammar.add_keyword("+")?;
    let add = grammar.add_operator("add", Associativity::Right, plus, "expr")?;
    let open = grammar.add_keyword("(")?;
    let close = grammar.add_keyword(")")?;
    let paren = grammar.add_sequence(
        "paren",
        vec![
            SequenceItem::required(open),
            SequenceItem::required("expr"),
            SequenceItem::required(close),
        ],
    )?;
    let expr = grammar.add_choice("expr", [add, mul, "number".to_string(), paren])?;
    grammar.set_start_symbol(expr);
    Ok(grammar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_build() {
        assert_eq!(hello_world("fixture_hw").unwrap().start_symbol(), Some("hw"));
        assert_eq!(planets("fixture_planets").unwrap().start_symbol(), Some("op"));
        assert_eq!(arithmetic("fixture_arith").unwrap().start_symbol(), Some("expr"));
        let backtracking = backtracking_arithmetic("fixture_bt").unwrap();
        assert_eq!(backtracking.backtracking_depth(), Some(50));
        assert!(backtracking.contains("'('"));
    }
}
