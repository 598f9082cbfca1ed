use crate::ast::{Node, ParseError, ParseErrorKind};
use crate::parsing::{AstBuilder, MatchId, Parser};

/// A rule of another registered grammar
///
/// The imported grammar is looked up when the rule is attempted, not when it is declared,
/// and it parses the same input with the same failure tracking as the importing grammar.
#[derive(Debug, Clone)]
pub struct ImportMatcher {
    grammar: String,
    rule: String,
    wrap: bool,
}

impl ImportMatcher {
    pub(crate) fn new(grammar: String, rule: String, wrap: bool) -> Self {
        Self {
            grammar,
            rule,
            wrap,
        }
    }

    /// Name of the imported grammar
    pub fn target_grammar(&self) -> &str {
        &self.grammar
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn wraps(&self) -> bool {
        self.wrap
    }

    pub(crate) fn perform(&self, parser: &mut Parser<'_>, node: MatchId) -> Result<bool, ParseError> {
        let Some(grammar) = parser.registry().lookup(&self.grammar) else {
            return Err(parser.abort(ParseErrorKind::UnresolvedImport {
                grammar: self.grammar.clone(),
            }));
        };

        let previous = parser.swap_grammar(grammar);
        let result = parser
            .consume_whitespace(node)
            .and_then(|()| parser.consume(node, &self.rule));
        parser.swap_grammar(previous);
        result
    }

    pub(crate) fn build_ast(&self, name: &str, builder: &AstBuilder<'_>, id: MatchId) -> Node {
        let Some(&inner) = builder.semantic(id).last() else {
            return Node::composite(name, Vec::new());
        };
        let inner = builder.build(inner);
        if self.wrap {
            Node::wrap(name, inner)
        } else {
            inner
        }
    }
}
