//! Token outcome cache
//!
//! Only token rules are cached: their outcome depends on nothing but the input at the
//! offset, so a cached length can be replayed onto any parent. Entries are keyed by grammar
//! as well, because imported grammars may reuse rule names.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct TokenMemo {
    /// grammar -> offset -> rule -> matched length, `None` for a recorded failure
    entries: HashMap<String, HashMap<usize, HashMap<String, Option<usize>>>>,
    hits: usize,
    misses: usize,
}

impl TokenMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded outcome, if this token was tried here before
    pub fn lookup(&mut self, grammar: &str, offset: usize, rule: &str) -> Option<Option<usize>> {
        let cached = self
            .entries
            .get(grammar)
            .and_then(|offsets| offsets.get(&offset))
            .and_then(|rules| rules.get(rule))
            .copied();

        match cached {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        cached
    }

    pub fn store(&mut self, grammar: &str, offset: usize, rule: &str, outcome: Option<usize>) {
        self.entries
            .entry(grammar.to_string())
            .or_default()
            .entry(offset)
            .or_default()
            .insert(rule.to_string(), outcome);
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
