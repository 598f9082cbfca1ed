//! Text renderings of AST nodes
//!
//! Three formats are provided:
//!
//! - `Display`: compact, single line. Terminals print as `'text'`, lambdas as `-`, composite
//!   nodes as `(name child child ...)`. This is the format tests compare against.
//! - [`to_pretty_string`]: the same notation spread over lines; nodes whose children are all
//!   leaves stay on one line, everything else puts one child per line, indented two spaces,
//!   with the closing paren on its own line.
//! - [`treeviz`]: one line per node with box-drawing connectors, handy when eyeballing large
//!   trees.

use super::node::{Node, NodeKind};
use std::fmt;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Terminal { token } => write!(f, "'{}'", token.text),
            NodeKind::Lambda => write!(f, "-"),
            NodeKind::Composite { children, .. } => {
                write!(f, "({}", self.name())?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

fn is_leaf(node: &Node) -> bool {
    !node.is_composite()
}

/// Multi-line rendering of a node
pub fn to_pretty_string(node: &Node) -> String {
    let mut out = String::new();
    write_pretty(node, 0, &mut out);
    out
}

fn write_pretty(node: &Node, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    if is_leaf(node) || node.iter().all(is_leaf) {
        out.push_str(&format!("{}{}\n", pad, node));
        return;
    }

    out.push_str(&format!("{}({}\n", pad, node.name()));
    for child in node {
        write_pretty(child, indent + 2, out);
    }
    out.push_str(&format!("{})\n", pad));
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn label(node: &Node) -> String {
    match node.kind() {
        NodeKind::Terminal { token } => {
            format!("{} '{}'", node.name(), truncate(&token.text, 30))
        }
        NodeKind::Lambda => format!("{} -", node.name()),
        NodeKind::Composite { .. } => node.name().to_string(),
    }
}

/// Outline rendering, one node per line
pub fn treeviz(node: &Node) -> String {
    let mut output = format!("{}\n", label(node));
    let count = node.len();
    for (i, child) in node.iter().enumerate() {
        format_branch(child, "", i + 1 == count, &mut output);
    }
    output
}

fn format_branch(node: &Node, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!("{}{} {}\n", prefix, connector, label(node)));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let count = node.len();
    for (i, child) in node.iter().enumerate() {
        format_branch(child, &child_prefix, i + 1 == count, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Position, Token};

    fn leaf(text: &str) -> Node {
        Node::terminal(
            "number",
            Token {
                text: text.to_string(),
                rule: "number".to_string(),
                offset: 0,
                position: Position::default(),
            },
        )
    }

    fn sum() -> Node {
        // 1 + (2 * 3)
        Node::composite(
            "add",
            vec![
                leaf("+"),
                leaf("1"),
                Node::composite("mul", vec![leaf("*"), leaf("2"), leaf("3")]),
            ],
        )
    }

    #[test]
    fn test_compact_display() {
        assert_eq!(sum().to_string(), "(add '+' '1' (mul '*' '2' '3'))");
        assert_eq!(Node::lambda("opt").to_string(), "-");
        assert_eq!(Node::composite("empty", vec![]).to_string(), "(empty)");
    }

    #[test]
    fn test_pretty_keeps_leaf_only_nodes_on_one_line() {
        assert_eq!(
            to_pretty_string(&sum()),
            "(add\n  '+'\n  '1'\n  (mul '*' '2' '3')\n)\n"
        );
    }

    #[test]
    fn test_pretty_single_leaf() {
        assert_eq!(to_pretty_string(&leaf("7")), "'7'\n");
    }

    #[test]
    fn test_treeviz() {
        let expected = [
            "add",
            "├─ number '+'",
            "├─ number '1'",
            "└─ mul",
            "  ├─ number '*'",
            "  ├─ number '2'",
            "  └─ number '3'",
        ];
        assert_eq!(treeviz(&sum()), format!("{}\n", expected.join("\n")));
    }
}
