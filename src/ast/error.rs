//! Error types for grammar construction and parsing
//!
//! Construction errors ([`GrammarError`]) are raised immediately by the rule-construction
//! API and abort building the grammar. Parse errors ([`ParseError`]) surface only when a
//! parse cannot complete at the top level; ordinary "this alternative did not match"
//! outcomes never become errors.

use super::location::Position;
use std::fmt;

/// Errors raised while building or looking up grammars
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A rule with this name is already registered in the grammar
    DuplicateRule { grammar: String, rule: String },
    /// The regular expression of a token does not compile
    InvalidTokenPattern {
        rule: String,
        pattern: String,
        message: String,
    },
    /// A keyword literal collides with a whitespace or non-keyword token of the same pattern
    KeywordConflict { keyword: String },
    /// A rule name that the grammar does not define
    UndefinedRule { grammar: String, rule: String },
    /// A grammar name that is not present in the registry
    UnknownGrammar { name: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::DuplicateRule { grammar, rule } => write!(
                f,
                "A rule for '{}' has already been registered in grammar '{}'",
                rule, grammar
            ),
            GrammarError::InvalidTokenPattern {
                rule,
                pattern,
                message,
            } => write!(
                f,
                "Invalid token definition '{}', regular expression /{}/ is invalid: {}",
                rule, pattern, message
            ),
            GrammarError::KeywordConflict { keyword } => write!(
                f,
                "Failed to register keyword '{}': the same token is already defined as a non-keyword or whitespace token",
                keyword
            ),
            GrammarError::UndefinedRule { grammar, rule } => {
                write!(f, "Undefined rule / token '{}' in grammar '{}'", rule, grammar)
            }
            GrammarError::UnknownGrammar { name } => write!(f, "Unknown grammar: '{}'", name),
        }
    }
}

impl std::error::Error for GrammarError {}

/// One entry of the rule-invocation stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub rule: String,
    /// Index of the alternative, sequence item or list iteration being attempted
    pub alternative: usize,
}

impl StackFrame {
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            alternative: 0,
        }
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alternative > 0 {
            write!(f, "{} no. {}", self.rule, self.alternative + 1)
        } else {
            write!(f, "{}", self.rule)
        }
    }
}

/// What made a parse fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    NoStartSymbol,
    UnexpectedCharacter(char),
    UnexpectedEndOfInput,
    /// The start symbol matched, but input remained
    TrailingInput,
    /// A list whose items matched without consuming input
    UnterminatedList { rule: String, item: String },
    MaxRecursionDepth(usize),
    UnresolvedImport { grammar: String },
    UndefinedRule { rule: String },
    UnknownGrammar { grammar: String },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::NoStartSymbol => write!(f, "Grammar has no start symbol"),
            ParseErrorKind::UnexpectedCharacter(ch) => write!(f, "Unexpected '{}'", ch.escape_debug()),
            ParseErrorKind::UnexpectedEndOfInput => write!(f, "Unexpected end of input (EOF)"),
            ParseErrorKind::TrailingInput => {
                write!(f, "Parsing succeeded, but not all input was consumed")
            }
            ParseErrorKind::UnterminatedList { rule, item } => write!(
                f,
                "The rule '{}' never ends, its items ('{}') can match an empty string",
                rule, item
            ),
            ParseErrorKind::MaxRecursionDepth(depth) => {
                write!(f, "Maximum stack depth ({}) reached", depth)
            }
            ParseErrorKind::UnresolvedImport { grammar } => {
                write!(f, "Grammar import '{}' could not be resolved", grammar)
            }
            ParseErrorKind::UndefinedRule { rule } => write!(f, "Undefined rule / token '{}'", rule),
            ParseErrorKind::UnknownGrammar { grammar } => write!(f, "Unknown grammar: '{}'", grammar),
        }
    }
}

/// A failed parse, anchored at the furthest point the parser reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Furthest byte offset at which a rule was attempted
    pub offset: Option<usize>,
    pub position: Option<Position>,
    /// The source line at `position` with a caret under the column
    pub context: Option<String>,
    /// Token rules that were attempted at `offset`, sorted by name
    pub expected: Vec<String>,
    /// Rule-invocation stack at the time of failure
    pub stack: Vec<StackFrame>,
}

impl ParseError {
    /// An error raised before any input was examined
    pub fn bare(kind: ParseErrorKind) -> Self {
        Self {
            kind,
            offset: None,
            position: None,
            context: None,
            expected: Vec::new(),
            stack: Vec::new(),
        }
    }

    pub fn line(&self) -> Option<usize> {
        self.position.map(|p| p.line)
    }

    pub fn column(&self) -> Option<usize> {
        self.position.map(|p| p.column)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error: {}", self.kind)?;

        if let Some(position) = self.position {
            write!(
                f,
                " at line {} column {}:",
                position.line, position.column
            )?;
            if let Some(context) = &self.context {
                write!(f, "\n\n{}", context)?;
            }
        }

        if !self.expected.is_empty() {
            write!(f, "\nExpected: {}", self.expected.join(" or "))?;
        }

        if f.alternate() && !self.stack.is_empty() {
            writeln!(f, "\nParse stack:")?;
            for frame in &self.stack {
                writeln!(f, "\t{}", frame)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
