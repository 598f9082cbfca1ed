//! Building grammars
//!
//! A [`Grammar`] is a named set of rules. Every `add_*` call registers one rule and returns
//! its name, so rules can be wired together by name:
//!
//! ```text
//! let mut g = Grammar::new("calc");
//! g.add_token("whitespace", r"\s+", true)?;
//! g.add_token("number", r"\d+", false)?;
//! let times = g.add_keyword("*")?;
//! let mul = g.add_operator("mul", Associativity::Left, times, "number")?;
//! g.set_start_symbol(mul);
//! ```
//!
//! Rule references are not checked while building; a missing rule surfaces as a parse error
//! the first time it is invoked.

use super::builtin::Builtin;
use super::registry::Registry;
use crate::ast::{GrammarError, Node, ParseError};
use crate::config::ParserConfig;
use crate::matchers::{
    Associativity, ChoiceMatcher, ImportMatcher, ListDef, ListMatcher, Matcher, MatcherKind,
    OperatorMatcher, SequenceItem, SequenceMatcher, SetDef, SetMatcher, TokenMatcher,
};
use crate::parsing::ParseTree;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_]+$").unwrap());

#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    rules: HashMap<String, Arc<Matcher>>,
    /// Whitespace token names, in declaration order
    whitespace: Vec<String>,
    /// Token pattern -> rule name, used to share keyword tokens
    token_patterns: HashMap<String, String>,
    start_symbol: Option<String>,
    case_insensitive: bool,
    backtracking_depth: Option<usize>,
    disable_auto_whitespace: bool,
    subrule_count: usize,
}

impl Grammar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: HashMap::new(),
            whitespace: Vec::new(),
            token_patterns: HashMap::new(),
            start_symbol: None,
            case_insensitive: false,
            backtracking_depth: None,
            disable_auto_whitespace: false,
            subrule_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ------------------------------------------------------------------------
    // Rule construction
    // ------------------------------------------------------------------------

    fn add_rule(&mut self, name: String, kind: MatcherKind) -> Result<String, GrammarError> {
        self.ensure_unique(&name)?;
        let matcher = Matcher::new(name.clone(), self.name.clone(), kind);
        self.rules.insert(name.clone(), Arc::new(matcher));
        Ok(name)
    }

    fn ensure_unique(&self, name: &str) -> Result<(), GrammarError> {
        if self.rules.contains_key(name) {
            return Err(GrammarError::DuplicateRule {
                grammar: self.name.clone(),
                rule: name.to_string(),
            });
        }
        Ok(())
    }

    fn insert_token(
        &mut self,
        name: String,
        pattern: &str,
        token: TokenMatcher,
    ) -> Result<String, GrammarError> {
        self.ensure_unique(&name)?;
        self.token_patterns.insert(pattern.to_string(), name.clone());
        if token.is_whitespace() {
            self.whitespace.push(name.clone());
        }
        self.add_rule(name, MatcherKind::Token(token))
    }

    /// A token matching `pattern` at the current offset
    ///
    /// Whitespace tokens are skipped automatically between rules and never reach the AST.
    pub fn add_token(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
        whitespace: bool,
    ) -> Result<String, GrammarError> {
        let name = name.into();
        self.ensure_unique(&name)?;
        let token = TokenMatcher::new(&name, pattern, whitespace, self.case_insensitive)?;
        self.insert_token(name, pattern, token)
    }

    pub fn add_builtin(&mut self, builtin: Builtin) -> Result<String, GrammarError> {
        self.add_token(builtin.name(), builtin.pattern(), builtin.is_whitespace())
    }

    /// A token for a literal, named `'literal'`
    ///
    /// Alphabetic literals only match at a word boundary. Asking for the same literal twice
    /// returns the existing rule.
    pub fn add_keyword(&mut self, literal: &str) -> Result<String, GrammarError> {
        let mut pattern = regex::escape(literal);
        if WORD.is_match(literal) {
            pattern.push_str(r"\b");
        }

        if let Some(existing) = self.token_patterns.get(&pattern) {
            let reusable = self
                .rules
                .get(existing)
                .and_then(|matcher| matcher.as_token())
                .is_some_and(|token| token.is_keyword() && !token.is_whitespace());
            if !reusable {
                return Err(GrammarError::KeywordConflict {
                    keyword: literal.to_string(),
                });
            }
            return Ok(existing.clone());
        }

        let name = format!("'{}'", literal);
        self.ensure_unique(&name)?;
        let token = TokenMatcher::keyword(&name, literal, &pattern, self.case_insensitive)?;
        self.insert_token(name, &pattern, token)
    }

    pub fn add_sequence(
        &mut self,
        name: impl Into<String>,
        items: Vec<SequenceItem>,
    ) -> Result<String, GrammarError> {
        self.add_rule(name.into(), MatcherKind::Sequence(SequenceMatcher::new(items)))
    }

    /// Ordered choice; the AST of the chosen alternative is returned as is
    pub fn add_choice(
        &mut self,
        name: impl Into<String>,
        alternatives: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<String, GrammarError> {
        let alternatives = alternatives.into_iter().map(Into::into).collect();
        self.add_rule(name.into(), MatcherKind::Choice(ChoiceMatcher::new(alternatives, false)))
    }

    /// Ordered choice whose AST wraps the chosen alternative in a node named after the choice
    pub fn add_wrapped_choice(
        &mut self,
        name: impl Into<String>,
        alternatives: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<String, GrammarError> {
        let alternatives = alternatives.into_iter().map(Into::into).collect();
        self.add_rule(name.into(), MatcherKind::Choice(ChoiceMatcher::new(alternatives, true)))
    }

    pub fn add_list(&mut self, name: impl Into<String>, def: ListDef) -> Result<String, GrammarError> {
        self.add_rule(name.into(), MatcherKind::List(ListMatcher::new(def)))
    }

    pub fn add_set(&mut self, name: impl Into<String>, def: SetDef) -> Result<String, GrammarError> {
        self.add_rule(name.into(), MatcherKind::Set(SetMatcher::new(def)))
    }

    pub fn add_operator(
        &mut self,
        name: impl Into<String>,
        associativity: Associativity,
        operator: impl Into<String>,
        operand: impl Into<String>,
    ) -> Result<String, GrammarError> {
        let operator = OperatorMatcher::new(associativity, operator.into(), operand.into());
        self.add_rule(name.into(), MatcherKind::Operator(operator))
    }

    /// `rule` of the registered grammar `grammar`, wrapped in a node named `name`
    pub fn add_import(
        &mut self,
        name: impl Into<String>,
        grammar: impl Into<String>,
        rule: impl Into<String>,
    ) -> Result<String, GrammarError> {
        let import = ImportMatcher::new(grammar.into(), rule.into(), true);
        self.add_rule(name.into(), MatcherKind::Import(import))
    }

    /// Like [`add_import`](Self::add_import), but the imported AST is returned unwrapped
    pub fn add_inline_import(
        &mut self,
        name: impl Into<String>,
        grammar: impl Into<String>,
        rule: impl Into<String>,
    ) -> Result<String, GrammarError> {
        let import = ImportMatcher::new(grammar.into(), rule.into(), false);
        self.add_rule(name.into(), MatcherKind::Import(import))
    }

    /// A fresh name for an anonymous rule, `subrule_1`, `subrule_2`, ...
    pub fn subrule_name(&mut self) -> String {
        self.subrule_count += 1;
        format!("subrule_{}", self.subrule_count)
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    pub fn set_start_symbol(&mut self, rule: impl Into<String>) {
        self.start_symbol = Some(rule.into());
    }

    pub fn start_symbol(&self) -> Option<&str> {
        self.start_symbol.as_deref()
    }

    /// Switch case sensitivity for all tokens, including those already declared
    pub fn set_case_insensitive(&mut self, case_insensitive: bool) -> Result<(), GrammarError> {
        self.case_insensitive = case_insensitive;
        for (name, matcher) in self.rules.iter_mut() {
            if let MatcherKind::Token(token) = Arc::make_mut(matcher).kind_mut() {
                token.recompile(name, case_insensitive)?;
            }
        }
        Ok(())
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Bound the rule invocation stack; deeper parses fail with a recursion error
    pub fn set_backtracking_depth(&mut self, depth: usize) {
        self.backtracking_depth = Some(depth);
    }

    pub fn backtracking_depth(&self) -> Option<usize> {
        self.backtracking_depth
    }

    /// Stop skipping whitespace tokens automatically between rules
    pub fn set_disable_auto_whitespace(&mut self, disable: bool) {
        self.disable_auto_whitespace = disable;
    }

    pub fn auto_whitespace_disabled(&self) -> bool {
        self.disable_auto_whitespace
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    pub fn rule(&self, name: &str) -> Option<&Arc<Matcher>> {
        self.rules.get(name)
    }

    pub fn matcher(&self, name: &str) -> Result<&Arc<Matcher>, GrammarError> {
        self.rule(name).ok_or_else(|| GrammarError::UndefinedRule {
            grammar: self.name.clone(),
            rule: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Rule names, sorted
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn whitespace_tokens(&self) -> impl Iterator<Item = &Arc<Matcher>> {
        self.whitespace.iter().filter_map(|name| self.rules.get(name))
    }

    // ------------------------------------------------------------------------
    // Registration and parsing
    // ------------------------------------------------------------------------

    /// Publish this grammar in the process-wide registry, replacing any grammar of the
    /// same name
    pub fn register(self) -> Arc<Grammar> {
        Registry::global().register(self)
    }

    /// Parse `input` into an AST, resolving imports against the process-wide registry
    pub fn parse(self: &Arc<Self>, input: &str, start: Option<&str>) -> Result<Node, ParseError> {
        self.parse_tree(input, start, &ParserConfig::default())
            .map(|tree| tree.to_ast())
    }

    /// Parse `input`, keeping the match tree and run statistics
    pub fn parse_tree<'a>(
        self: &Arc<Self>,
        input: &'a str,
        start: Option<&str>,
        config: &ParserConfig,
    ) -> Result<ParseTree<'a>, ParseError> {
        Registry::global().parse_grammar(Arc::clone(self), input, start, config)
    }
}
