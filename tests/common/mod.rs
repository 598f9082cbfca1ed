//! Helpers shared by the integration test binaries

#![allow(dead_code)]

use ruleparse::grammar::{Grammar, Registry};
use std::sync::Arc;

/// Route `log` output through `pretty_env_logger`; set `RUST_LOG=ruleparse=trace` to see
/// every rule invocation.
pub fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

/// Register `grammar` in a registry of its own
pub fn isolated(grammar: Grammar) -> (Registry, Arc<Grammar>) {
    let registry = Registry::new();
    let grammar = registry.register(grammar);
    (registry, grammar)
}
