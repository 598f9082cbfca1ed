//! # ruleparse
//!
//! A grammar-driven backtracking parser engine. Grammars are assembled at run time from
//! seven kinds of rules and turn input text into a generic, name-labeled AST.
//!
//! ```rust-example
//! use ruleparse::grammar::{Associativity, Grammar};
//!
//! let mut calc = Grammar::new("calc");
//! calc.add_token("whitespace", r"\s+", true)?;
//! calc.add_token("number", r"\d+", false)?;
//! let times = calc.add_keyword("*")?;
//! let mul = calc.add_operator("mul", Associativity::Left, times, "number")?;
//! calc.set_start_symbol(mul);
//! calc.register();
//!
//! let ast = ruleparse::parse("calc", "1 * 2 * 3", None)?;
//! assert_eq!(ast.to_string(), "(mul '*' (mul '*' '1' '2') '3')");
//! ```
//!
//! ## Layout
//!
//! - [`grammar`]: grammar construction and the registry that makes grammars importable
//! - [`matchers`]: the rule kinds and how each matches and builds its AST
//! - [`parsing`]: the parse loop, the match tree, memoization and failure tracking
//! - [`ast`]: the AST, source positions, values and errors
//! - [`config`]: layered engine configuration
//! - [`testing`]: fixtures and fluent assertions for test suites

pub mod ast;
pub mod config;
pub mod grammar;
pub mod matchers;
pub mod parsing;
pub mod testing;

pub use ast::{GrammarError, Node, ParseError, ParseErrorKind};
pub use config::{EngineConfig, ParserConfig};
pub use grammar::{Grammar, Registry};
pub use parsing::ParseTree;

/// Parse `input` with a grammar from the process-wide registry
///
/// `start` overrides the grammar's start symbol.
pub fn parse(grammar: &str, input: &str, start: Option<&str>) -> Result<Node, ParseError> {
    Registry::global().parse(grammar, input, start)
}
