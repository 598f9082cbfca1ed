//! AST nodes produced by a successful parse
//!
//! A [`Node`] is labeled with the name of the rule that produced it and keeps the slice of
//! input that rule consumed. There are three shapes:
//!
//! - **terminal**: wraps the [`Token`] a token rule matched
//! - **lambda**: an optional item that matched nothing; carries only the rule name
//! - **composite**: ordered children, plus accessor names for sequence items that declared one
//!
//! Nodes own their children and outlive the match tree they were built from.

use super::location::Position;
use super::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// Text matched by a token rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    /// Name of the token rule that matched
    pub rule: String,
    /// Byte offset of the first character
    pub offset: usize,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Terminal {
        token: Token,
    },
    Lambda,
    Composite {
        children: Vec<Node>,
        /// Accessor name to child index
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        accessors: BTreeMap<String, usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    name: String,
    source: String,
    #[serde(flatten)]
    kind: NodeKind,
}

impl Node {
    pub fn terminal(name: impl Into<String>, token: Token) -> Self {
        Self {
            name: name.into(),
            source: token.text.clone(),
            kind: NodeKind::Terminal { token },
        }
    }

    pub fn lambda(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: String::new(),
            kind: NodeKind::Lambda,
        }
    }

    pub fn composite(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::with_accessors(name, children, BTreeMap::new())
    }

    /// A composite node that wraps exactly one child
    pub fn wrap(name: impl Into<String>, child: Node) -> Self {
        Self::composite(name, vec![child])
    }

    pub fn with_accessors(
        name: impl Into<String>,
        children: Vec<Node>,
        accessors: BTreeMap<String, usize>,
    ) -> Self {
        Self {
            name: name.into(),
            source: String::new(),
            kind: NodeKind::Composite {
                children,
                accessors,
            },
        }
    }

    pub(crate) fn set_source(&mut self, source: &str) {
        self.source = source.to_string();
    }

    /// Name of the rule that produced this node
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if this node was produced by the given rule
    pub fn is(&self, rule: &str) -> bool {
        self.name == rule
    }

    /// The input consumed by the rule that produced this node
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal { .. })
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self.kind, NodeKind::Lambda)
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind, NodeKind::Composite { .. })
    }

    pub fn token(&self) -> Option<&Token> {
        match &self.kind {
            NodeKind::Terminal { token } => Some(token),
            _ => None,
        }
    }

    /// Matched text; only terminals have text
    pub fn text(&self) -> Option<&str> {
        self.token().map(|token| token.text.as_str())
    }

    pub fn position(&self) -> Option<Position> {
        self.token().map(|token| token.position)
    }

    /// Children in match order; empty for terminals and lambdas
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Composite { children, .. } => children,
            _ => &[],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children().iter()
    }

    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children().get(index)
    }

    pub fn first(&self) -> Option<&Node> {
        self.child(0)
    }

    fn accessors(&self) -> Option<&BTreeMap<String, usize>> {
        match &self.kind {
            NodeKind::Composite { accessors, .. } => Some(accessors),
            _ => None,
        }
    }

    /// True if a sequence item with this accessor name matched
    pub fn has(&self, accessor: &str) -> bool {
        self.accessors()
            .is_some_and(|accessors| accessors.contains_key(accessor))
    }

    /// Child registered under an accessor name (sequence nodes only)
    pub fn named(&self, accessor: &str) -> Option<&Node> {
        let index = *self.accessors()?.get(accessor)?;
        self.child(index)
    }

    /// Accessor names of this node, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.accessors()
            .into_iter()
            .flat_map(|accessors| accessors.keys().map(String::as_str))
    }

    /// Depth-first walk; `visit` returns false to stop the walk.
    ///
    /// Returns false if the walk was stopped early.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node) -> bool) -> bool {
        if !visit(self) {
            return false;
        }
        self.children().iter().all(|child| child.walk(visit))
    }

    /// First node anywhere at or below this one that has the accessor, resolved to that child
    pub fn find(&self, accessor: &str) -> Option<&Node> {
        let mut found = None;
        self.walk(&mut |node| match node.named(accessor) {
            Some(child) => {
                found = Some(child);
                false
            }
            None => true,
        });
        found
    }

    /// This node if terminal, otherwise the terminal reached by following first children
    pub fn first_terminal(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::Terminal { .. } => Some(self),
            NodeKind::Lambda => None,
            NodeKind::Composite { .. } => self.first()?.first_terminal(),
        }
    }

    pub fn find_text(&self) -> Option<&str> {
        self.first_terminal()?.text()
    }

    /// Text of the terminal under child `index`; index 0 of a terminal is the terminal itself
    pub fn find_text_at(&self, index: usize) -> Option<&str> {
        if index == 0 && self.is_terminal() {
            return self.text();
        }
        self.child(index)?.first_terminal()?.text()
    }

    pub fn find_text_named(&self, accessor: &str) -> Option<&str> {
        let node = self.find(accessor)?;
        if node.is_lambda() {
            return None;
        }
        node.first_terminal()?.text()
    }

    /// Texts of all terminals below this node, in depth-first order
    pub fn all_texts(&self) -> Vec<&str> {
        let mut texts = Vec::new();
        self.walk(&mut |node| {
            if let Some(text) = node.text() {
                texts.push(text);
            }
            true
        });
        texts
    }

    /// Primitive value of a terminal's text
    pub fn value(&self) -> Option<Value> {
        self.text().map(Value::from_text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
