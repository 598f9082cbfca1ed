use super::item_positions;
use crate::ast::{Node, ParseError};
use crate::parsing::{AstBuilder, MatchId, Parser};

/// Declaration of a set rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDef {
    pub items: Vec<String>,
    pub separator: Option<String>,
    pub pre: Option<String>,
    pub post: Option<String>,
}

impl SetDef {
    pub fn new(items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            separator: None,
            pre: None,
            post: None,
        }
    }

    pub fn separator(mut self, rule: impl Into<String>) -> Self {
        self.separator = Some(rule.into());
        self
    }

    pub fn pre(mut self, rule: impl Into<String>) -> Self {
        self.pre = Some(rule.into());
        self
    }

    pub fn post(mut self, rule: impl Into<String>) -> Self {
        self.post = Some(rule.into());
        self
    }
}

/// Items in any order, each at most once
///
/// Items that never show up do not fail the set. With a separator, the separator must sit
/// between every two items and must not follow the last one.
#[derive(Debug, Clone)]
pub struct SetMatcher {
    def: SetDef,
}

impl SetMatcher {
    pub(crate) fn new(def: SetDef) -> Self {
        Self { def }
    }

    pub fn def(&self) -> &SetDef {
        &self.def
    }

    pub(crate) fn perform(&self, parser: &mut Parser<'_>, node: MatchId) -> Result<bool, ParseError> {
        let def = &self.def;

        if let Some(pre) = &def.pre {
            if !parser.consume(node, pre)? {
                return Ok(false);
            }
        }

        let mut available: Vec<(usize, &str)> = def
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| (index, item.as_str()))
            .collect();
        let mut separator_pending = false;

        while !available.is_empty() {
            let mut matched = None;
            for (slot, &(index, item)) in available.iter().enumerate() {
                parser.set_alternative(index);
                if parser.consume(node, item)? {
                    matched = Some(slot);
                    break;
                }
            }
            let Some(slot) = matched else {
                break;
            };
            available.remove(slot);

            separator_pending = false;
            if let Some(separator) = &def.separator {
                if !parser.consume(node, separator)? {
                    break;
                }
                separator_pending = true;
            }
        }

        if separator_pending {
            return Ok(false);
        }

        match &def.post {
            Some(post) => parser.consume(node, post),
            None => Ok(true),
        }
    }

    pub(crate) fn build_ast(&self, name: &str, builder: &AstBuilder<'_>, id: MatchId) -> Node {
        let semantic = builder.semantic(id);
        let def = &self.def;
        let children = item_positions(
            semantic.len(),
            def.pre.is_some(),
            def.separator.is_some(),
            def.post.is_some(),
        )
        .map(|index| semantic[index])
        .filter(|&child| !builder.tree().node(child).is_whitespace_token())
        .map(|child| builder.build(child))
        .collect();

        Node::composite(name, children)
    }
}
