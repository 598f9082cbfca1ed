//! Rule kinds of a grammar
//!
//! Every rule of a grammar is a [`Matcher`]: a name, the grammar it belongs to and one of
//! seven kinds. All kinds share the same two contracts:
//!
//! - **attempt**: try to match at the parent's current end. A node for the rule is attached
//!   to the parent before the kind-specific logic runs; if that logic reports no match the
//!   node is discarded again, giving back whatever it consumed.
//! - **build_ast**: turn a successful match node into an AST [`Node`].
//!
//! Kinds refer to other rules by name only. Names are resolved by the parser on every
//! invocation, so rules may be declared in any order.

pub mod choice;
pub mod import;
pub mod list;
pub mod operator;
pub mod sequence;
pub mod set;
pub mod token;

pub use choice::ChoiceMatcher;
pub use import::ImportMatcher;
pub use list::{ListDef, ListMatcher};
pub use operator::{Associativity, OperatorMatcher};
pub use sequence::{SequenceItem, SequenceMatcher};
pub use set::{SetDef, SetMatcher};
pub use token::TokenMatcher;

use crate::ast::{Node, ParseError};
use crate::parsing::{AstBuilder, MatchId, Origin, Parser};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum MatcherKind {
    Token(TokenMatcher),
    Sequence(SequenceMatcher),
    Choice(ChoiceMatcher),
    List(ListMatcher),
    Set(SetMatcher),
    Operator(OperatorMatcher),
    Import(ImportMatcher),
}

impl MatcherKind {
    pub fn label(&self) -> &'static str {
        match self {
            MatcherKind::Token(_) => "token",
            MatcherKind::Sequence(_) => "sequence",
            MatcherKind::Choice(_) => "choice",
            MatcherKind::List(_) => "list",
            MatcherKind::Set(_) => "set",
            MatcherKind::Operator(_) => "operator",
            MatcherKind::Import(_) => "import",
        }
    }
}

/// A named rule
#[derive(Debug, Clone)]
pub struct Matcher {
    name: String,
    grammar: String,
    kind: MatcherKind,
}

impl Matcher {
    pub(crate) fn new(name: String, grammar: String, kind: MatcherKind) -> Self {
        Self {
            name,
            grammar,
            kind,
        }
    }

    /// Rule name; also the label of the AST nodes this rule produces
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the grammar the rule was declared in
    pub fn grammar(&self) -> &str {
        &self.grammar
    }

    pub fn kind(&self) -> &MatcherKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut MatcherKind {
        &mut self.kind
    }

    pub fn as_token(&self) -> Option<&TokenMatcher> {
        match &self.kind {
            MatcherKind::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn is_token(&self) -> bool {
        self.as_token().is_some()
    }

    pub fn is_whitespace(&self) -> bool {
        self.as_token().is_some_and(TokenMatcher::is_whitespace)
    }

    pub fn is_keyword(&self) -> bool {
        self.as_token().is_some_and(TokenMatcher::is_keyword)
    }

    /// Try to match this rule as a new child of `parent`
    ///
    /// On `Ok(false)` the tree is exactly as it was before the call.
    pub(crate) fn attempt(
        self: &Arc<Self>,
        parser: &mut Parser<'_>,
        parent: MatchId,
    ) -> Result<bool, ParseError> {
        let node = parser.tree_mut().open(parent, Origin::Rule(Arc::clone(self)));

        let matched = match &self.kind {
            MatcherKind::Token(token) => token.perform(parser, node),
            MatcherKind::Sequence(sequence) => sequence.perform(parser, node),
            MatcherKind::Choice(choice) => choice.perform(parser, node),
            MatcherKind::List(list) => list.perform(&self.name, parser, node),
            MatcherKind::Set(set) => set.perform(parser, node),
            MatcherKind::Operator(operator) => operator.perform(self, parser, node),
            MatcherKind::Import(import) => import.perform(parser, node),
        }?;

        if !matched {
            parser.tree_mut().discard_last(parent);
        }
        Ok(matched)
    }

    /// AST for a successful match of this rule
    pub(crate) fn build_ast(&self, builder: &AstBuilder<'_>, id: MatchId) -> Node {
        match &self.kind {
            MatcherKind::Token(_) => Node::terminal(&self.name, builder.token(id, &self.name)),
            MatcherKind::Sequence(sequence) => sequence.build_ast(&self.name, builder, id),
            MatcherKind::Choice(choice) => choice.build_ast(&self.name, builder, id),
            MatcherKind::List(list) => list.build_ast(&self.name, builder, id),
            MatcherKind::Set(set) => set.build_ast(&self.name, builder, id),
            MatcherKind::Operator(operator) => operator.build_ast(&self.name, builder, id),
            MatcherKind::Import(import) => import.build_ast(&self.name, builder, id),
        }
    }
}

/// Indices of the semantic children of a list or set that are items, skipping the
/// `pre` delimiter, the `post` delimiter and the separators between items.
pub(crate) fn item_positions(
    count: usize,
    has_pre: bool,
    has_separator: bool,
    has_post: bool,
) -> impl Iterator<Item = usize> {
    let separator_parity = usize::from(!has_pre);
    (0..count).filter(move |&i| {
        !(has_pre && i == 0)
            && !(has_post && i + 1 == count)
            && !(has_separator && i % 2 == separator_parity)
    })
}
