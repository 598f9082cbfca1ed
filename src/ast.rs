//! Abstract syntax tree produced by a successful parse
//!
//! Also home to the types that describe *where* in the input something happened
//! ([`Position`], [`SourceLocation`]) and the error types shared by grammar construction
//! and parsing.

pub mod error;
pub mod location;
pub mod node;
pub mod pretty;
pub mod value;

pub use error::{GrammarError, ParseError, ParseErrorKind, StackFrame};
pub use location::{Position, SourceLocation};
pub use node::{Node, NodeKind, Token};
pub use pretty::{to_pretty_string, treeviz};
pub use value::{unescape, Value};
