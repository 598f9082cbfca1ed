//! Running a grammar over an input
//!
//! [`Parser`] drives the matchers, building a [`MatchTree`] as it goes. A successful run
//! yields a [`ParseTree`], which converts to an AST on demand.

pub mod diagnostics;
pub mod match_tree;
pub mod memo;
pub mod parse_tree;
pub mod parser;
pub mod stats;

pub use diagnostics::Diagnostics;
pub use match_tree::{MatchId, MatchNode, MatchTree, Origin};
pub use memo::TokenMemo;
pub use parse_tree::{AstBuilder, ParseTree};
pub use parser::Parser;
pub use stats::ParseStats;
