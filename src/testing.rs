//! Testing utilities for grammars and ASTs
//!
//! # Writing parser tests
//!
//! Tests should assert on the whole shape of a result, not on generalities such as node
//! counts alone. Two tools make that cheap:
//!
//! 1. **Fixture grammars** in [`grammars`], so the same vetted grammar backs every suite
//!    instead of slight variations being rebuilt in each test file.
//! 2. **[assert_node](fn@assert_node)**, a fluent API that checks names, texts, positions
//!    and children of a [`Node`](crate::ast::Node) hierarchy in one expression.
//!
//! ```rust-example
//! use ruleparse::testing::{assert_node, grammars};
//!
//! let calc = grammars::arithmetic("calc_tests")?.register();
//! let ast = calc.parse("1 * 2", None)?;
//!
//! assert_node(&ast)
//!     .named("mul")
//!     .child_count(3)
//!     .child(0, |op| { op.is_terminal().text("*"); })
//!     .child(1, |left| { left.named("number").text("1").at(1, 1); });
//! ```
//!
//! For whole-tree checks, compare the `Display` form with
//! [`renders`](NodeAssertion::renders) or snapshot
//! [`to_pretty_string`](crate::ast::to_pretty_string) output with `insta`.
//!
//! Grammars registered globally live for the rest of the test binary, so give every suite
//! its own grammar names, or parse through a private [`Registry`](crate::grammar::Registry).

mod node_assertions;
mod text_match;

pub mod grammars;

pub use node_assertions::{assert_node, NodeAssertion};
pub use text_match::TextMatch;
