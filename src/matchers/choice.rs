use crate::ast::{Node, ParseError};
use crate::parsing::{AstBuilder, MatchId, Parser};

/// Ordered choice: alternatives are tried in declaration order and the first match wins
#[derive(Debug, Clone)]
pub struct ChoiceMatcher {
    alternatives: Vec<String>,
    /// Wrap the chosen alternative in a node named after the choice
    wrap: bool,
}

impl ChoiceMatcher {
    pub(crate) fn new(alternatives: Vec<String>, wrap: bool) -> Self {
        Self { alternatives, wrap }
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn wraps(&self) -> bool {
        self.wrap
    }

    pub(crate) fn perform(&self, parser: &mut Parser<'_>, node: MatchId) -> Result<bool, ParseError> {
        for (index, alternative) in self.alternatives.iter().enumerate() {
            parser.set_alternative(index);
            if parser.consume(node, alternative)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub(crate) fn build_ast(&self, name: &str, builder: &AstBuilder<'_>, id: MatchId) -> Node {
        let Some(&chosen) = builder.semantic(id).last() else {
            return Node::composite(name, Vec::new());
        };
        let inner = builder.build(chosen);
        if self.wrap {
            Node::wrap(name, inner)
        } else {
            inner
        }
    }
}
