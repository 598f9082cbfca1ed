//! Fluent assertion API for AST nodes

use super::text_match::TextMatch;
use crate::ast::{Node, NodeKind};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a node
pub fn assert_node(node: &Node) -> NodeAssertion<'_> {
    NodeAssertion {
        node,
        context: node.name().to_string(),
    }
}

// ============================================================================
// Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    /// Assert the rule name the node was built from
    pub fn named(self, expected: &str) -> Self {
        assert_eq!(
            self.node.name(),
            expected,
            "{}: Expected node named '{}', found '{}'",
            self.context,
            expected,
            self.node.name()
        );
        self
    }

    pub fn is_terminal(self) -> Self {
        assert!(
            self.node.is_terminal(),
            "{}: Expected a terminal, found {}",
            self.context,
            describe(self.node)
        );
        self
    }

    pub fn is_lambda(self) -> Self {
        assert!(
            self.node.is_lambda(),
            "{}: Expected a lambda, found {}",
            self.context,
            describe(self.node)
        );
        self
    }

    pub fn is_composite(self) -> Self {
        assert!(
            self.node.is_composite(),
            "{}: Expected a composite, found {}",
            self.context,
            describe(self.node)
        );
        self
    }

    /// Assert the token text of a terminal
    pub fn text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.terminal_text(), &self.context);
        self
    }

    pub fn text_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(self.terminal_text(), &self.context);
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(self.terminal_text(), &self.context);
        self
    }

    /// Assert the input slice the node was matched from
    pub fn source(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.node.source(), &self.context);
        self
    }

    /// Assert the `Display` form, e.g. `(add '+' '1' '2')`
    pub fn renders(self, expected: &str) -> Self {
        let actual = self.node.to_string();
        assert_eq!(
            actual, expected,
            "{}: Expected node to render as {}, got {}",
            self.context, expected, actual
        );
        self
    }

    /// Assert the 1-based position of a terminal
    pub fn at(self, line: usize, column: usize) -> Self {
        let Some(position) = self.node.position() else {
            panic!("{}: Expected a terminal with a position, found {}", self.context, describe(self.node));
        };
        assert_eq!(
            (position.line, position.column),
            (line, column),
            "{}: Expected position {}:{}, found {}",
            self.context,
            line,
            column,
            position
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(self.node.children())
        );
        self
    }

    /// Assert on a specific child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let Some(child) = self.node.child(index) else {
            panic!(
                "{}: Child index {} out of bounds (node has {} children)",
                self.context,
                index,
                self.node.len()
            );
        };
        assertion(NodeAssertion {
            node: child,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Assert on the child registered under `accessor`
    pub fn accessor<F>(self, accessor: &str, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let Some(child) = self.node.named(accessor) else {
            panic!(
                "{}: No child named '{}' (accessors: [{}])",
                self.context,
                accessor,
                self.node.keys().collect::<Vec<_>>().join(", ")
            );
        };
        assertion(NodeAssertion {
            node: child,
            context: format!("{}.{}", self.context, accessor),
        });
        self
    }

    pub fn no_accessor(self, accessor: &str) -> Self {
        assert!(
            !self.node.has(accessor),
            "{}: Expected no child named '{}'",
            self.context,
            accessor
        );
        self
    }

    fn terminal_text(&self) -> &'a str {
        match self.node.text() {
            Some(text) => text,
            None => panic!(
                "{}: Expected a terminal with text, found {}",
                self.context,
                describe(self.node)
            ),
        }
    }
}

fn describe(node: &Node) -> String {
    match node.kind() {
        NodeKind::Terminal { .. } => format!("terminal {}", node),
        NodeKind::Lambda => format!("lambda '{}'", node.name()),
        NodeKind::Composite { .. } => format!("composite {}", node),
    }
}

fn summarize(children: &[Node]) -> String {
    children
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
