//! Grammars and the registry that makes them importable
//!
//! Rule declaration types ([`SequenceItem`], [`ListDef`], [`SetDef`], [`Associativity`])
//! are defined next to their matchers and re-exported here, since this is where they are
//! used.

pub mod builtin;
pub mod definition;
pub mod registry;

pub use builtin::Builtin;
pub use definition::Grammar;
pub use registry::Registry;

pub use crate::matchers::{Associativity, ListDef, SequenceItem, SetDef};
