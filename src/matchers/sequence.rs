use crate::ast::{Node, ParseError};
use crate::parsing::{AstBuilder, MatchId, Parser};
use std::collections::BTreeMap;

/// One element of a sequence rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceItem {
    pub rule: String,
    pub required: bool,
    /// Name under which the matched child can be looked up on the AST node
    pub accessor: Option<String>,
}

impl SequenceItem {
    pub fn required(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            required: true,
            accessor: None,
        }
    }

    pub fn optional(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            required: false,
            accessor: None,
        }
    }

    pub fn named(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = Some(accessor.into());
        self
    }
}

/// Items matched left to right
///
/// A missing optional item leaves a lambda in its place, so every item owns exactly one
/// semantic child of a successful match. Whitespace tokens named as items hold their slot
/// but stay out of the AST.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    items: Vec<SequenceItem>,
}

impl SequenceMatcher {
    pub(crate) fn new(items: Vec<SequenceItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[SequenceItem] {
        &self.items
    }

    pub(crate) fn perform(&self, parser: &mut Parser<'_>, node: MatchId) -> Result<bool, ParseError> {
        for (index, item) in self.items.iter().enumerate() {
            parser.set_alternative(index);
            if parser.consume(node, &item.rule)? {
                continue;
            }
            if item.required {
                return Ok(false);
            }
            parser.consume_lambda(node, &item.rule);
        }
        Ok(true)
    }

    pub(crate) fn build_ast(&self, name: &str, builder: &AstBuilder<'_>, id: MatchId) -> Node {
        let mut children = Vec::new();
        let mut accessors = BTreeMap::new();

        for (item, &child) in self.items.iter().zip(builder.semantic(id)) {
            let matched = builder.tree().node(child);
            // required literals carry no information beyond the rule itself
            if (item.required && matched.is_keyword()) || matched.is_whitespace_token() {
                continue;
            }
            let ast = builder.build(child);
            if let Some(accessor) = &item.accessor {
                if !ast.is_lambda() {
                    accessors.insert(accessor.clone(), children.len());
                }
            }
            children.push(ast);
        }

        Node::with_accessors(name, children, accessors)
    }
}
