//! Name -> grammar table
//!
//! Imports are resolved through a registry at parse time. Most callers use the process-wide
//! instance ([`Registry::global`]); tests and embedders that need isolation create their own
//! with [`Registry::new`] and parse through it.

use super::definition::Grammar;
use crate::ast::{GrammarError, Node, ParseError, ParseErrorKind};
use crate::config::ParserConfig;
use crate::parsing::{ParseTree, Parser};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

#[derive(Debug, Default)]
pub struct Registry {
    grammars: RwLock<HashMap<String, Arc<Grammar>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Publish a grammar under its name, replacing any previous grammar of that name
    pub fn register(&self, grammar: Grammar) -> Arc<Grammar> {
        self.insert(Arc::new(grammar))
    }

    pub fn insert(&self, grammar: Arc<Grammar>) -> Arc<Grammar> {
        let mut grammars = self.grammars.write().unwrap_or_else(PoisonError::into_inner);
        let replaced = grammars.insert(grammar.name().to_string(), Arc::clone(&grammar));
        if replaced.is_some() {
            log::debug!("Replaced grammar '{}'", grammar.name());
        } else {
            log::debug!(
                "Registered grammar '{}' ({} rules)",
                grammar.name(),
                grammar.rule_count()
            );
        }
        grammar
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<Grammar>> {
        self.grammars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn get(&self, name: &str) -> Result<Arc<Grammar>, GrammarError> {
        self.lookup(name).ok_or_else(|| GrammarError::UnknownGrammar {
            name: name.to_string(),
        })
    }

    pub fn unregister(&self, name: &str) -> Option<Arc<Grammar>> {
        self.grammars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.grammars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered grammar names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .grammars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }

    /// Parse `input` with the named grammar into an AST
    pub fn parse(&self, grammar: &str, input: &str, start: Option<&str>) -> Result<Node, ParseError> {
        self.parse_with(grammar, input, start, &ParserConfig::default())
            .map(|tree| tree.to_ast())
    }

    /// Parse `input` with the named grammar, keeping the match tree and statistics
    pub fn parse_with<'a>(
        &'a self,
        grammar: &str,
        input: &'a str,
        start: Option<&str>,
        config: &ParserConfig,
    ) -> Result<ParseTree<'a>, ParseError> {
        let Some(grammar) = self.lookup(grammar) else {
            return Err(ParseError::bare(ParseErrorKind::UnknownGrammar {
                grammar: grammar.to_string(),
            }));
        };
        self.parse_grammar(grammar, input, start, config)
    }

    /// Parse with a grammar that need not be registered; imports resolve against `self`
    pub fn parse_grammar<'a>(
        &'a self,
        grammar: Arc<Grammar>,
        input: &'a str,
        start: Option<&str>,
        config: &ParserConfig,
    ) -> Result<ParseTree<'a>, ParseError> {
        Parser::new(grammar, self, input, config).parse(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = Registry::new();
        assert!(!registry.contains("a"));
        registry.register(Grammar::new("b"));
        registry.register(Grammar::new("a"));

        assert!(registry.contains("a"));
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(registry.lookup("a").map(|g| g.name().to_string()), Some("a".into()));
    }

    #[test]
    fn test_register_replaces() {
        let registry = Registry::new();
        registry.register(Grammar::new("calc"));
        let mut second = Grammar::new("calc");
        second.add_token("number", r"\d+", false).unwrap();
        registry.register(second);

        assert_eq!(registry.names().len(), 1);
        assert_eq!(registry.get("calc").unwrap().rule_count(), 1);
    }

    #[test]
    fn test_unregister() {
        let registry = Registry::new();
        registry.register(Grammar::new("tmp"));
        assert!(registry.unregister("tmp").is_some());
        assert!(registry.unregister("tmp").is_none());
        assert_eq!(
            registry.get("tmp").unwrap_err(),
            GrammarError::UnknownGrammar { name: "tmp".into() }
        );
    }

    #[test]
    fn test_parse_unknown_grammar() {
        let registry = Registry::new();
        let err = registry.parse("nope", "x", None).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnknownGrammar {
                grammar: "nope".into()
            }
        );
        assert!(err.position.is_none());
    }
}
