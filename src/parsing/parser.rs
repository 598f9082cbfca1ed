//! The backtracking parse loop
//!
//! A [`Parser`] is bound to one grammar, one registry and one input, and runs exactly one
//! parse. Matchers call back into it through [`Parser::consume`], which:
//!
//! 1. pushes the rule onto the invocation stack
//! 2. resolves the rule, records it as a candidate for failure reporting and enforces the
//!    depth bound
//! 3. replays a cached token outcome, or attempts the matcher (caching token outcomes)
//! 4. on success, skips whitespace tokens that follow
//!
//! Imports temporarily swap the active grammar; the tree, stack, cache and failure tracking
//! stay the same, so a failure inside an imported grammar is reported like any other.

use super::diagnostics::Diagnostics;
use super::match_tree::{MatchId, MatchTree, Origin};
use super::memo::TokenMemo;
use super::parse_tree::ParseTree;
use super::stats::ParseStats;
use crate::ast::{ParseError, ParseErrorKind, SourceLocation, StackFrame};
use crate::config::ParserConfig;
use crate::grammar::{Grammar, Registry};
use crate::matchers::Matcher;
use std::sync::Arc;
use std::time::Instant;

pub struct Parser<'a> {
    grammar: Arc<Grammar>,
    registry: &'a Registry,
    input: &'a str,
    locations: SourceLocation<'a>,
    config: ParserConfig,
    tree: MatchTree,
    stack: Vec<StackFrame>,
    diagnostics: Diagnostics,
    memo: Option<TokenMemo>,
    stats: ParseStats,
}

impl<'a> Parser<'a> {
    pub fn new(
        grammar: Arc<Grammar>,
        registry: &'a Registry,
        input: &'a str,
        config: &ParserConfig,
    ) -> Self {
        Self {
            grammar,
            registry,
            input,
            locations: SourceLocation::new(input),
            config: config.clone(),
            tree: MatchTree::new(),
            stack: Vec::new(),
            diagnostics: Diagnostics::new(),
            memo: config.memoize_tokens.then(TokenMemo::new),
            stats: ParseStats::default(),
        }
    }

    /// Parse the whole input from `start`, or from the grammar's start symbol
    pub fn parse(mut self, start: Option<&str>) -> Result<ParseTree<'a>, ParseError> {
        let started = Instant::now();

        let Some(start) = start
            .map(str::to_string)
            .or_else(|| self.grammar.start_symbol().map(str::to_string))
        else {
            return Err(ParseError::bare(ParseErrorKind::NoStartSymbol));
        };

        let root = self.tree.root();
        self.consume_whitespace(root)?;

        if !self.consume(root, &start)? {
            let offset = self.diagnostics.best_point().unwrap_or(0);
            let kind = match self.input[offset..].chars().next() {
                Some(ch) => ParseErrorKind::UnexpectedCharacter(ch),
                None => ParseErrorKind::UnexpectedEndOfInput,
            };
            return Err(self.failure(kind, offset));
        }

        let end = self.tree.end(root);
        if end < self.input.len() {
            let offset = self.diagnostics.best_point().map_or(end, |best| best.max(end));
            // something was still being attempted at the very end: the input stops short
            let kind = if offset >= self.input.len() {
                ParseErrorKind::UnexpectedEndOfInput
            } else {
                ParseErrorKind::TrailingInput
            };
            return Err(self.failure(kind, offset));
        }

        self.stats.elapsed = started.elapsed();
        if let Some(memo) = &self.memo {
            self.stats.cache_hits = memo.hits();
            self.stats.cache_misses = memo.misses();
        }
        if self.config.collect_stats {
            log::debug!(
                "Finished parsing '{}' in {:?}. Stats: {}",
                self.grammar.name(),
                self.stats.elapsed,
                self.stats
            );
        }

        Ok(ParseTree::new(self.input, self.tree, self.stats))
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn tree(&self) -> &MatchTree {
        &self.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut MatchTree {
        &mut self.tree
    }

    pub(crate) fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Make `grammar` the active grammar, returning the previous one
    pub(crate) fn swap_grammar(&mut self, grammar: Arc<Grammar>) -> Arc<Grammar> {
        std::mem::replace(&mut self.grammar, grammar)
    }

    /// Note which alternative / item / iteration the innermost rule is working on
    pub(crate) fn set_alternative(&mut self, index: usize) {
        if let Some(frame) = self.stack.last_mut() {
            frame.alternative = index;
        }
    }

    /// Try to match `rule` as the next child of `parent`
    pub(crate) fn consume(&mut self, parent: MatchId, rule: &str) -> Result<bool, ParseError> {
        self.stack.push(StackFrame::new(rule));
        let result = self.consume_rule(parent, rule);
        self.stack.pop();
        result
    }

    fn consume_rule(&mut self, parent: MatchId, rule: &str) -> Result<bool, ParseError> {
        let offset = self.tree.end(parent);
        self.stats.calls += 1;

        let Some(matcher) = self.grammar.rule(rule).cloned() else {
            return Err(self.abort(ParseErrorKind::UndefinedRule {
                rule: rule.to_string(),
            }));
        };
        self.diagnostics
            .record_candidate(offset, &matcher, &self.stack);

        if let Some(limit) = self
            .grammar
            .backtracking_depth()
            .or(self.config.max_depth)
        {
            if self.stack.len() > limit {
                return Err(self.abort(ParseErrorKind::MaxRecursionDepth(limit)));
            }
        }
        self.trace(offset, rule, '?');

        let matched = self.attempt_memoized(parent, &matcher)?;
        if matched {
            self.consume_whitespace(parent)?;
            self.stats.found += 1;
            self.trace(offset, rule, 'V');
        } else {
            self.stats.not_found += 1;
        }
        Ok(matched)
    }

    fn trace(&self, offset: usize, rule: &str, marker: char) {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "[{}]{}{} {}",
                self.locations.byte_to_position(offset),
                " ".repeat(self.stack.len()),
                rule,
                marker
            );
        }
    }

    fn attempt_memoized(
        &mut self,
        parent: MatchId,
        matcher: &Arc<Matcher>,
    ) -> Result<bool, ParseError> {
        if self.memo.is_none() || !matcher.is_token() {
            return matcher.attempt(self, parent);
        }

        let offset = self.tree.end(parent);
        if let Some(memo) = &mut self.memo {
            if let Some(outcome) = memo.lookup(matcher.grammar(), offset, matcher.name()) {
                return Ok(match outcome {
                    Some(len) => {
                        let node = self.tree.open(parent, Origin::Rule(Arc::clone(matcher)));
                        self.tree.mark_terminal(node);
                        self.tree.eat(node, len);
                        true
                    }
                    None => false,
                });
            }
        }

        let matched = matcher.attempt(self, parent)?;
        let outcome = if matched {
            self.tree
                .node(parent)
                .children()
                .last()
                .map(|child| self.tree.node(*child).consumed())
        } else {
            None
        };
        if let Some(memo) = &mut self.memo {
            memo.store(matcher.grammar(), offset, matcher.name(), outcome);
        }
        Ok(matched)
    }

    /// Skip whitespace tokens of the active grammar until none of them matches
    ///
    /// A whitespace token that matches the empty string counts as not matching.
    pub(crate) fn consume_whitespace(&mut self, parent: MatchId) -> Result<(), ParseError> {
        if self.grammar.auto_whitespace_disabled() {
            return Ok(());
        }

        let grammar = Arc::clone(&self.grammar);
        'scan: loop {
            for token in grammar.whitespace_tokens() {
                let before = self.tree.end(parent);
                if self.attempt_memoized(parent, token)? {
                    if self.tree.end(parent) > before {
                        self.tree.skip_last(parent);
                        continue 'scan;
                    }
                    self.tree.discard_last(parent);
                }
            }
            return Ok(());
        }
    }

    /// Record that the optional `rule` matched nothing
    pub(crate) fn consume_lambda(&mut self, parent: MatchId, rule: &str) {
        self.tree.open(parent, Origin::Lambda(rule.to_string()));
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{}-", " ".repeat(self.stack.len()));
        }
    }

    /// An error that ends the parse regardless of remaining alternatives
    pub(crate) fn abort(&self, kind: ParseErrorKind) -> ParseError {
        let offset = self
            .diagnostics
            .best_point()
            .unwrap_or_else(|| self.tree.end(self.tree.root()));
        self.error_at(kind, offset, self.expected_at(offset), self.stack.clone())
    }

    /// The parse could not complete; report at `offset` with what was expected there
    fn failure(&self, kind: ParseErrorKind, offset: usize) -> ParseError {
        self.error_at(
            kind,
            offset,
            self.expected_at(offset),
            self.diagnostics.best_stack().to_vec(),
        )
    }

    /// Token rules attempted at `offset`, if it is the furthest point reached
    fn expected_at(&self, offset: usize) -> Vec<String> {
        if self.diagnostics.best_point() == Some(offset) {
            self.diagnostics.expected().map(str::to_string).collect()
        } else {
            Vec::new()
        }
    }

    fn error_at(
        &self,
        kind: ParseErrorKind,
        offset: usize,
        expected: Vec<String>,
        stack: Vec<StackFrame>,
    ) -> ParseError {
        ParseError {
            kind,
            offset: Some(offset),
            position: Some(self.locations.byte_to_position(offset)),
            context: Some(self.locations.highlight(offset)),
            expected,
            stack,
        }
    }
}
