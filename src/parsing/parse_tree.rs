//! Turning a finished match tree into an AST
//!
//! The match tree is only ever read here. The synthetic root unwraps to its single semantic
//! child, lambdas become lambda nodes, and every other node is handed to the matcher that
//! produced it. Each matcher decides its own node shape, recursing through
//! [`AstBuilder::build`] for children.

use super::match_tree::{MatchId, MatchTree, Origin};
use super::stats::ParseStats;
use crate::ast::{Node, SourceLocation, Token};

/// A successful parse: the match tree plus the input it covers
#[derive(Debug, Clone)]
pub struct ParseTree<'a> {
    input: &'a str,
    tree: MatchTree,
    stats: ParseStats,
}

impl<'a> ParseTree<'a> {
    pub(crate) fn new(input: &'a str, tree: MatchTree, stats: ParseStats) -> Self {
        Self { input, tree, stats }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn tree(&self) -> &MatchTree {
        &self.tree
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn to_ast(&self) -> Node {
        AstBuilder::new(self.input, &self.tree).build(self.tree.root())
    }

    /// The raw match, e.g. `(list2: other 'oi' , planet)`
    pub fn match_string(&self) -> String {
        self.tree.match_string(self.tree.root(), self.input)
    }
}

pub struct AstBuilder<'t> {
    input: &'t str,
    tree: &'t MatchTree,
    locations: SourceLocation<'t>,
}

impl<'t> AstBuilder<'t> {
    pub fn new(input: &'t str, tree: &'t MatchTree) -> Self {
        Self {
            input,
            tree,
            locations: SourceLocation::new(input),
        }
    }

    pub fn tree(&self) -> &'t MatchTree {
        self.tree
    }

    pub fn semantic(&self, id: MatchId) -> &'t [MatchId] {
        self.tree.node(id).semantic()
    }

    /// Name of the rule that produced `id`; `None` for the root and lambdas
    pub fn rule_name(&self, id: MatchId) -> Option<&'t str> {
        self.tree.node(id).matcher().map(|matcher| matcher.name())
    }

    /// Input covered by `id`, without trailing whitespace
    pub fn source(&self, id: MatchId) -> &'t str {
        let node = self.tree.node(id);
        &self.input[node.start()..self.tree.content_end(id)]
    }

    pub fn token(&self, id: MatchId, rule: &str) -> Token {
        let node = self.tree.node(id);
        Token {
            text: self.input[node.start()..node.end()].to_string(),
            rule: rule.to_string(),
            offset: node.start(),
            position: self.locations.byte_to_position(node.start()),
        }
    }

    pub fn build(&self, id: MatchId) -> Node {
        let node = self.tree.node(id);
        match node.origin() {
            Origin::Root => match node.semantic().first() {
                Some(&child) => self.build(child),
                None => Node::lambda(""),
            },
            Origin::Lambda(rule) => Node::lambda(rule.as_str()),
            Origin::Rule(matcher) => {
                let mut ast = matcher.build_ast(self, id);
                ast.set_source(self.source(id));
                ast
            }
        }
    }
}
