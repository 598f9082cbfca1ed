use super::item_positions;
use crate::ast::{Node, ParseError, ParseErrorKind};
use crate::parsing::{AstBuilder, MatchId, Parser};

/// Declaration of a list rule
///
/// ```text
/// ListDef::new("identifier").separator("','").pre("'('").post("')'").nullable(true)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDef {
    pub item: String,
    pub separator: Option<String>,
    pub pre: Option<String>,
    pub post: Option<String>,
    /// Zero items are acceptable
    pub nullable: bool,
    /// A separator may directly precede `post`
    pub allow_trailing: bool,
}

impl ListDef {
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            separator: None,
            pre: None,
            post: None,
            nullable: false,
            allow_trailing: false,
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

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn allow_trailing(mut self, allow: bool) -> Self {
        self.allow_trailing = allow;
        self
    }
}

/// Repeated items, optionally separated and delimited
#[derive(Debug, Clone)]
pub struct ListMatcher {
    def: ListDef,
}

impl ListMatcher {
    pub(crate) fn new(def: ListDef) -> Self {
        Self { def }
    }

    pub fn def(&self) -> &ListDef {
        &self.def
    }

    pub(crate) fn perform(
        &self,
        name: &str,
        parser: &mut Parser<'_>,
        node: MatchId,
    ) -> Result<bool, ParseError> {
        let def = &self.def;

        if let Some(pre) = &def.pre {
            if !parser.consume(node, pre)? {
                return Ok(false);
            }
        }

        if let Some(post) = &def.post {
            if parser.consume(node, post)? {
                return Ok(def.nullable);
            }
        }

        if !parser.consume(node, &def.item)? {
            return Ok(def.nullable && def.post.is_none());
        }

        let mut iteration = 0;
        let mut last_position = None;
        loop {
            if let Some(separator) = &def.separator {
                if !parser.consume(node, separator)? {
                    break;
                }
            }

            // items that match the empty string would repeat forever
            let position = parser.tree().end(node);
            if last_position.is_some_and(|last| position <= last) {
                return Err(parser.abort(ParseErrorKind::UnterminatedList {
                    rule: name.to_string(),
                    item: def.item.clone(),
                }));
            }
            last_position = Some(position);
            iteration += 1;
            parser.set_alternative(iteration);

            if let Some(post) = &def.post {
                if parser.consume(node, post)? {
                    return Ok(def.separator.is_none() || def.allow_trailing);
                }
            }

            if !parser.consume(node, &def.item)? {
                return Ok(match def.separator {
                    None => def.post.is_none(),
                    // a separator nothing follows
                    Some(_) => def.post.is_none() && def.allow_trailing,
                });
            }
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
        .filter(|&child| {
            def.separator.is_none() || builder.rule_name(child) != def.separator.as_deref()
        })
        .filter(|&child| !builder.tree().node(child).is_whitespace_token())
        .map(|child| builder.build(child))
        .collect();

        Node::composite(name, children)
    }
}
