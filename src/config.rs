//! Engine configuration loader.
//!
//! `defaults/ruleparse.default.toml` is embedded into the crate so the documented defaults and
//! the runtime defaults cannot drift apart. Callers layer their own files or single-key
//! overrides on top via [`Loader`] before deserializing into [`EngineConfig`].
//!
//! Settings that belong to one grammar (start symbol, case sensitivity, backtracking depth,
//! automatic whitespace) live on [`Grammar`](crate::grammar::Grammar) instead.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/ruleparse.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    pub parser: ParserConfig,
}

/// Knobs for a single parse run
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Cache token outcomes per (offset, rule)
    pub memoize_tokens: bool,
    /// Log call and cache counters once a parse succeeds
    pub collect_stats: bool,
    /// Invocation-stack bound for grammars that do not set a backtracking depth
    ///
    /// `None` (the `Default`) leaves the recursion unbounded, and deeply nested input can
    /// then exhaust the thread stack. The embedded defaults set a bound of 200.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl ParserConfig {
    pub fn memoized() -> Self {
        Self {
            memoize_tokens: true,
            ..Self::default()
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `("parser.memoize_tokens", true)`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<EngineConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(
            config.parser,
            ParserConfig {
                max_depth: Some(200),
                ..ParserConfig::default()
            }
        );
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.memoize_tokens", true)
            .expect("override to apply")
            .set_override("parser.max_depth", 64i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.parser.memoize_tokens);
        assert!(!config.parser.collect_stats);
        assert_eq!(config.parser.max_depth, Some(64));
    }

    #[test]
    fn layers_files_over_defaults() {
        let path = std::env::temp_dir().join(format!("ruleparse-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("temp file");
        writeln!(file, "[parser]\ncollect_stats = true").expect("write temp file");

        let config = Loader::new()
            .with_file(&path)
            .build()
            .expect("config to build");
        std::fs::remove_file(&path).ok();

        assert!(config.parser.collect_stats);
        assert!(!config.parser.memoize_tokens);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.max_depth, Some(200));
    }
}
