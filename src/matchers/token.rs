//! Regular-expression tokens
//!
//! A token matches its pattern anchored at the current offset, never searching ahead. Tokens
//! flagged as whitespace are consumed by the parser between rules and never show up in the
//! AST. Keywords are tokens generated from a literal; they consume input but sequences leave
//! them out of their AST children.

use crate::ast::{GrammarError, ParseError};
use crate::parsing::{MatchId, Parser};
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
pub struct TokenMatcher {
    pattern: String,
    regex: Regex,
    whitespace: bool,
    /// The literal this token was generated from, if it is a keyword
    keyword: Option<String>,
}

impl TokenMatcher {
    pub(crate) fn new(
        rule: &str,
        pattern: &str,
        whitespace: bool,
        case_insensitive: bool,
    ) -> Result<Self, GrammarError> {
        Ok(Self {
            pattern: pattern.to_string(),
            regex: compile(rule, pattern, case_insensitive)?,
            whitespace,
            keyword: None,
        })
    }

    pub(crate) fn keyword(
        rule: &str,
        literal: &str,
        pattern: &str,
        case_insensitive: bool,
    ) -> Result<Self, GrammarError> {
        let mut token = Self::new(rule, pattern, false, case_insensitive)?;
        token.keyword = Some(literal.to_string());
        Ok(token)
    }

    pub(crate) fn recompile(&mut self, rule: &str, case_insensitive: bool) -> Result<(), GrammarError> {
        self.regex = compile(rule, &self.pattern, case_insensitive)?;
        Ok(())
    }

    /// The pattern as declared, without the anchor
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_whitespace(&self) -> bool {
        self.whitespace
    }

    pub fn is_keyword(&self) -> bool {
        self.keyword.is_some()
    }

    pub fn literal(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// Length in bytes of the match starting exactly at `offset`
    pub fn match_at(&self, input: &str, offset: usize) -> Option<usize> {
        let rest = input.get(offset..)?;
        self.regex.find(rest).map(|found| found.end())
    }

    pub(crate) fn perform(&self, parser: &mut Parser<'_>, node: MatchId) -> Result<bool, ParseError> {
        let offset = parser.tree().end(node);
        match self.match_at(parser.input(), offset) {
            Some(len) => {
                let tree = parser.tree_mut();
                tree.mark_terminal(node);
                tree.eat(node, len);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn compile(rule: &str, pattern: &str, case_insensitive: bool) -> Result<Regex, GrammarError> {
    RegexBuilder::new(&format!("^(?:{})", pattern))
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|err| GrammarError::InvalidTokenPattern {
            rule: rule.to_string(),
            pattern: pattern.to_string(),
            message: err.to_string(),
        })
}
