use super::{Matcher, MatcherKind};
use crate::ast::{Node, ParseError};
use crate::parsing::{AstBuilder, MatchId, MatchTree, Parser};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Binary expressions: `operand (operator operand)*`
///
/// The input is always matched as a flat chain; associativity only decides how the chain
/// is folded into a tree. An operand may refer back to the operator rule itself, which a
/// top-down matcher cannot follow without consuming input in between, so such re-entries
/// fail straight away.
#[derive(Debug, Clone)]
pub struct OperatorMatcher {
    associativity: Associativity,
    operator: String,
    operand: String,
}

impl OperatorMatcher {
    pub(crate) fn new(associativity: Associativity, operator: String, operand: String) -> Self {
        Self {
            associativity,
            operator,
            operand,
        }
    }

    pub fn associativity(&self) -> Associativity {
        self.associativity
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn operand(&self) -> &str {
        &self.operand
    }

    pub(crate) fn perform(
        &self,
        this: &Arc<Matcher>,
        parser: &mut Parser<'_>,
        node: MatchId,
    ) -> Result<bool, ParseError> {
        if is_repeating(this, parser.tree(), node) {
            return Ok(false);
        }

        if !parser.consume(node, &self.operand)? {
            return Ok(false);
        }
        while parser.consume(node, &self.operator)? {
            if !parser.consume(node, &self.operand)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub(crate) fn build_ast(&self, name: &str, builder: &AstBuilder<'_>, id: MatchId) -> Node {
        self.fold(name, builder, builder.semantic(id))
    }

    /// Fold `operand (operator operand)*` into `(name operator left right)` nodes
    fn fold(&self, name: &str, builder: &AstBuilder<'_>, chain: &[MatchId]) -> Node {
        match chain {
            [] => Node::composite(name, Vec::new()),
            [single] => builder.build(*single),
            [left, operator, right] => Node::composite(
                name,
                vec![
                    builder.build(*operator),
                    builder.build(*left),
                    builder.build(*right),
                ],
            ),
            _ if self.associativity == Associativity::Left => {
                let n = chain.len();
                Node::composite(
                    name,
                    vec![
                        builder.build(chain[n - 2]),
                        self.fold(name, builder, &chain[..n - 2]),
                        builder.build(chain[n - 1]),
                    ],
                )
            }
            _ => Node::composite(
                name,
                vec![
                    builder.build(chain[1]),
                    builder.build(chain[0]),
                    self.fold(name, builder, &chain[2..]),
                ],
            ),
        }
    }
}

/// True if `this` operator is already being matched further up without any input consumed
/// since, looking through operators and choices only.
fn is_repeating(this: &Arc<Matcher>, tree: &MatchTree, node: MatchId) -> bool {
    let mut current = tree.node(node).parent();

    while let Some(id) = current {
        let ancestor = tree.node(id);
        let Some(matcher) = ancestor.matcher() else {
            break;
        };

        let transparent = matches!(
            matcher.kind(),
            MatcherKind::Operator(_) | MatcherKind::Choice(_)
        );
        if !transparent && ancestor.consumed() > 0 {
            return false;
        }
        if Arc::ptr_eq(matcher, this) {
            return true;
        }
        current = ancestor.parent();
    }

    false
}
