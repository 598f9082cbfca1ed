//! The transient match tree built during one parse
//!
//! Nodes live in an arena and are addressed by [`MatchId`]. A node is attached to its parent
//! as soon as a matcher starts on it, and detached again with [`MatchTree::discard_last`] if
//! the matcher fails. Because the tree is grown depth-first and a failed attempt always
//! discards the most recently opened child, everything at or after that child's index in the
//! arena belongs to the failed attempt, so discarding is a truncate.
//!
//! Every node's `end - start` equals the input consumed by its current children. Consuming
//! input walks up the parent chain, and so does giving it back.

use crate::matchers::Matcher;
use std::sync::Arc;

/// Index of a node in a [`MatchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchId(usize);

/// What produced a match node
#[derive(Debug, Clone)]
pub enum Origin {
    /// The synthetic node a parse starts from
    Root,
    /// An optional item that matched nothing, labeled with the rule it stands in for
    Lambda(String),
    Rule(Arc<Matcher>),
}

#[derive(Debug, Clone)]
pub struct MatchNode {
    origin: Origin,
    parent: Option<MatchId>,
    start: usize,
    end: usize,
    children: Vec<MatchId>,
    /// `children` without whitespace tokens
    semantic: Vec<MatchId>,
    terminal: bool,
    whitespace: bool,
}

impl MatchNode {
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn matcher(&self) -> Option<&Arc<Matcher>> {
        match &self.origin {
            Origin::Rule(matcher) => Some(matcher),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<MatchId> {
        self.parent
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn consumed(&self) -> usize {
        self.end - self.start
    }

    pub fn children(&self) -> &[MatchId] {
        &self.children
    }

    /// Children that take part in AST construction
    pub fn semantic(&self) -> &[MatchId] {
        &self.semantic
    }

    /// True if a token matcher matched input on this node
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// True if the parser skipped this node as whitespace between rules
    pub fn is_whitespace(&self) -> bool {
        self.whitespace
    }

    /// True if a whitespace token produced this node, skipped or named by a rule
    pub fn is_whitespace_token(&self) -> bool {
        self.matcher().is_some_and(|matcher| matcher.is_whitespace())
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self.origin, Origin::Lambda(_))
    }

    pub fn is_keyword(&self) -> bool {
        self.matcher().is_some_and(|matcher| matcher.is_keyword())
    }
}

#[derive(Debug, Clone)]
pub struct MatchTree {
    nodes: Vec<MatchNode>,
}

impl MatchTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![MatchNode {
                origin: Origin::Root,
                parent: None,
                start: 0,
                end: 0,
                children: Vec::new(),
                semantic: Vec::new(),
                terminal: false,
                whitespace: false,
            }],
        }
    }

    pub fn root(&self) -> MatchId {
        MatchId(0)
    }

    pub fn node(&self, id: MatchId) -> &MatchNode {
        &self.nodes[id.0]
    }

    /// Offset at which the next child of `id` would start
    pub fn end(&self, id: MatchId) -> usize {
        self.node(id).end
    }

    /// Number of nodes currently in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Attach a new, empty child to `parent`, starting where the parent currently ends
    pub fn open(&mut self, parent: MatchId, origin: Origin) -> MatchId {
        let id = MatchId(self.nodes.len());
        let start = self.end(parent);

        self.nodes.push(MatchNode {
            origin,
            parent: Some(parent),
            start,
            end: start,
            children: Vec::new(),
            semantic: Vec::new(),
            terminal: false,
            whitespace: false,
        });

        let parent = &mut self.nodes[parent.0];
        parent.children.push(id);
        parent.semantic.push(id);
        id
    }

    /// Mark the most recent child of `parent` as skipped whitespace
    ///
    /// Only whitespace the parser skips between rules is dropped from `semantic`; a
    /// whitespace token named directly by a rule stays a semantic child.
    pub fn skip_last(&mut self, parent: MatchId) {
        let Some(&child) = self.nodes[parent.0].children.last() else {
            return;
        };
        self.nodes[child.0].whitespace = true;
        let parent = &mut self.nodes[parent.0];
        if parent.semantic.last() == Some(&child) {
            parent.semantic.pop();
        }
    }

    /// Consume `amount` bytes on `id` and all of its ancestors
    pub fn eat(&mut self, id: MatchId, amount: usize) {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &mut self.nodes[id.0];
            node.end += amount;
            current = node.parent;
        }
    }

    fn uneat(&mut self, id: MatchId, amount: usize) {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &mut self.nodes[id.0];
            node.end -= amount;
            current = node.parent;
        }
    }

    pub fn mark_terminal(&mut self, id: MatchId) {
        self.nodes[id.0].terminal = true;
    }

    /// Undo the most recent child of `parent` and give back the input it consumed
    pub fn discard_last(&mut self, parent: MatchId) {
        let Some(child) = self.nodes[parent.0].children.pop() else {
            return;
        };
        if self.nodes[parent.0].semantic.last() == Some(&child) {
            self.nodes[parent.0].semantic.pop();
        }

        let consumed = self.node(child).consumed();
        self.uneat(parent, consumed);
        self.nodes.truncate(child.0);
    }

    /// End of the input covered by `id`, ignoring trailing whitespace at any depth
    ///
    /// Whitespace skipped after a rule's last token belongs to that rule, so the end is taken
    /// from the last child that consumed anything other than skipped whitespace.
    pub fn content_end(&self, id: MatchId) -> usize {
        let node = self.node(id);
        if node.terminal || node.children.is_empty() {
            return node.end;
        }
        node.children
            .iter()
            .rev()
            .find(|child| {
                let child = self.node(**child);
                !child.whitespace && child.consumed() > 0
            })
            .map_or(node.start, |child| self.content_end(*child))
    }

    /// Render the tree below `id` as a match string, e.g. `(hw: 'hello' -)`
    ///
    /// Keywords print bare, other tokens quoted, lambdas as `-`, whitespace not at all.
    pub fn match_string(&self, id: MatchId, input: &str) -> String {
        let node = self.node(id);
        match &node.origin {
            Origin::Root => node
                .semantic
                .first()
                .map(|child| self.match_string(*child, input))
                .unwrap_or_default(),
            Origin::Lambda(_) => "-".to_string(),
            Origin::Rule(matcher) if matcher.is_token() => {
                let text = &input[node.start..node.end];
                if matcher.is_whitespace() {
                    String::new()
                } else if matcher.is_keyword() {
                    text.to_string()
                } else {
                    format!("'{}'", text)
                }
            }
            Origin::Rule(matcher) => {
                let mut out = format!("({}:", matcher.name());
                for child in &node.semantic {
                    if self.node(*child).is_whitespace_token() {
                        continue;
                    }
                    out.push(' ');
                    out.push_str(&self.match_string(*child, input));
                }
                out.push(')');
                out
            }
        }
    }
}

impl Default for MatchTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    fn matchers() -> (Arc<Matcher>, Arc<Matcher>, Arc<Matcher>) {
        let mut grammar = Grammar::new("tree");
        grammar.add_token("word", r"\w+", false).unwrap();
        grammar.add_token("ws", r"\s+", true).unwrap();
        grammar.add_keyword("let").unwrap();
        (
            Arc::clone(grammar.rule("word").unwrap()),
            Arc::clone(grammar.rule("ws").unwrap()),
            Arc::clone(grammar.rule("'let'").unwrap()),
        )
    }

    #[test]
    fn test_eat_propagates_to_ancestors() {
        let (word, _, _) = matchers();
        let mut tree = MatchTree::new();
        let root = tree.root();
        let outer = tree.open(root, Origin::Rule(Arc::clone(&word)));
        let inner = tree.open(outer, Origin::Rule(word));
        tree.eat(inner, 4);

        assert_eq!(tree.node(inner).consumed(), 4);
        assert_eq!(tree.node(outer).consumed(), 4);
        assert_eq!(tree.end(root), 4);
    }

    #[test]
    fn test_discard_restores_consumption() {
        let (word, ws, _) = matchers();
        let mut tree = MatchTree::new();
        let root = tree.root();
        let first = tree.open(root, Origin::Rule(Arc::clone(&word)));
        tree.eat(first, 3);
        let before = tree.end(root);
        let len_before = tree.len();

        let attempt = tree.open(root, Origin::Rule(Arc::clone(&word)));
        let nested = tree.open(attempt, Origin::Rule(word));
        tree.eat(nested, 5);
        let space = tree.open(attempt, Origin::Rule(ws));
        tree.eat(space, 1);
        tree.discard_last(root);

        assert_eq!(tree.end(root), before);
        assert_eq!(tree.len(), len_before);
        assert_eq!(tree.node(root).children(), &[first]);
        assert_eq!(tree.node(root).semantic(), &[first]);
    }

    #[test]
    fn test_whitespace_is_not_semantic() {
        let (word, ws, _) = matchers();
        let mut tree = MatchTree::new();
        let root = tree.root();
        let w = tree.open(root, Origin::Rule(word));
        tree.eat(w, 2);
        let s = tree.open(root, Origin::Rule(ws));
        tree.eat(s, 3);
        tree.skip_last(root);

        assert_eq!(tree.node(root).children().len(), 2);
        assert_eq!(tree.node(root).semantic(), &[w]);
        assert_eq!(tree.content_end(root), 2);

        tree.discard_last(root);
        assert_eq!(tree.node(root).semantic(), &[w]);
        assert_eq!(tree.end(root), 2);
    }

    #[test]
    fn test_content_end_ignores_nested_trailing_whitespace() {
        let (word, ws, _) = matchers();
        let mut tree = MatchTree::new();
        let root = tree.root();
        let outer = tree.open(root, Origin::Rule(Arc::clone(&word)));
        let inner = tree.open(outer, Origin::Rule(Arc::clone(&word)));
        let token = tree.open(inner, Origin::Rule(word));
        tree.mark_terminal(token);
        tree.eat(token, 4);
        let space = tree.open(inner, Origin::Rule(Arc::clone(&ws)));
        tree.mark_terminal(space);
        tree.eat(space, 2);
        tree.skip_last(inner);
        tree.open(outer, Origin::Lambda("rest".into()));

        assert_eq!(tree.end(outer), 6);
        assert_eq!(tree.content_end(inner), 4);
        assert_eq!(tree.content_end(outer), 4);
        assert_eq!(tree.content_end(root), 4);
    }

    #[test]
    fn test_whitespace_named_by_a_rule_stays_semantic() {
        let (_, ws, _) = matchers();
        let mut tree = MatchTree::new();
        let root = tree.root();
        let space = tree.open(root, Origin::Rule(ws));
        tree.mark_terminal(space);
        tree.eat(space, 1);

        assert_eq!(tree.node(root).semantic(), &[space]);
        assert!(!tree.node(space).is_whitespace());
        assert!(tree.node(space).is_whitespace_token());
        assert_eq!(tree.content_end(root), 1);
    }

    #[test]
    fn test_match_string() {
        let (word, ws, keyword) = matchers();
        let input = "let x";
        let mut tree = MatchTree::new();
        let root = tree.root();

        let k = tree.open(root, Origin::Rule(keyword));
        tree.mark_terminal(k);
        tree.eat(k, 3);
        let s = tree.open(root, Origin::Rule(ws));
        tree.eat(s, 1);
        tree.skip_last(root);
        let w = tree.open(root, Origin::Rule(word));
        tree.mark_terminal(w);
        tree.eat(w, 1);
        tree.open(root, Origin::Lambda("rest".into()));

        let rendered: Vec<String> = tree
            .node(root)
            .semantic()
            .iter()
            .map(|id| tree.match_string(*id, input))
            .collect();
        assert_eq!(rendered, vec!["let", "'x'", "-"]);
        assert_eq!(tree.match_string(s, input), "");
        assert_eq!(tree.match_string(root, input), "let");
    }
}
