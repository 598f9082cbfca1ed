//! Furthest-failure tracking
//!
//! A backtracking parser fails "everywhere": by the time the start symbol gives up, every
//! alternative has been rolled back. The most useful place to report is the furthest
//! offset any rule was attempted at, together with the tokens that were tried there.

use crate::ast::StackFrame;
use crate::matchers::Matcher;
use std::collections::BTreeSet;

#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    best_point: Option<usize>,
    best_stack: Vec<StackFrame>,
    expected: BTreeSet<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `matcher` is about to be attempted at `offset`
    pub fn record_candidate(&mut self, offset: usize, matcher: &Matcher, stack: &[StackFrame]) {
        if self.best_point.map_or(true, |best| offset > best) {
            self.best_point = Some(offset);
            self.best_stack = stack.to_vec();
            self.expected.clear();
        }
        if matcher.is_token() && self.best_point.is_some_and(|best| offset >= best) {
            self.expected.insert(matcher.name().to_string());
        }
    }

    /// Furthest offset at which a rule was attempted
    pub fn best_point(&self) -> Option<usize> {
        self.best_point
    }

    /// Invocation stack when `best_point` was first reached
    pub fn best_stack(&self) -> &[StackFrame] {
        &self.best_stack
    }

    /// Token rules attempted at `best_point`, sorted by name
    pub fn expected(&self) -> impl Iterator<Item = &str> {
        self.expected.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    #[test]
    fn test_furthest_point_resets_expected() {
        let mut grammar = Grammar::new("diag");
        grammar.add_token("number", r"\d+", false).unwrap();
        grammar.add_keyword("+").unwrap();
        grammar.add_choice("expr", ["number"]).unwrap();
        let number = grammar.rule("number").unwrap();
        let plus = grammar.rule("'+'").unwrap();
        let expr = grammar.rule("expr").unwrap();

        let stack = vec![StackFrame::new("expr")];
        let mut diagnostics = Diagnostics::new();
        diagnostics.record_candidate(0, expr, &stack);
        diagnostics.record_candidate(0, number, &stack);
        assert_eq!(diagnostics.expected().collect::<Vec<_>>(), vec!["number"]);

        diagnostics.record_candidate(2, plus, &stack);
        diagnostics.record_candidate(0, number, &stack);
        assert_eq!(diagnostics.best_point(), Some(2));
        assert_eq!(diagnostics.expected().collect::<Vec<_>>(), vec!["'+'"]);
        assert_eq!(diagnostics.best_stack(), stack.as_slice());
    }

    #[test]
    fn test_non_tokens_are_not_expected() {
        let mut grammar = Grammar::new("diag");
        grammar.add_choice("expr", ["number"]).unwrap();
        let mut diagnostics = Diagnostics::new();
        diagnostics.record_candidate(0, grammar.rule("expr").unwrap(), &[]);
        assert_eq!(diagnostics.expected().count(), 0);
        assert_eq!(diagnostics.best_point(), Some(0));
    }
}
