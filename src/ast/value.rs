//! Best-effort conversion of terminal text into primitive values

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BOOLEAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:true|false)$").unwrap());
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").unwrap());
static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?(e\d+)?$").unwrap());

/// A primitive guessed from a token's text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// A quoted string with its quotes stripped and escapes resolved
    Str(String),
    /// The body of a `/.../` regular expression literal
    Pattern(String),
    /// Anything else, verbatim
    Text(String),
}

impl Value {
    /// Tries, in order: boolean, integer, float, quoted string, `/regex/`, raw text.
    pub fn from_text(text: &str) -> Value {
        if BOOLEAN.is_match(text) {
            return Value::Bool(text == "true");
        }
        if INTEGER.is_match(text) {
            if let Ok(value) = text.parse() {
                return Value::Integer(value);
            }
        }
        if FLOAT.is_match(text) {
            if let Ok(value) = text.parse() {
                return Value::Float(value);
            }
        }
        if text.len() >= 2
            && ((text.starts_with('\'') && text.ends_with('\''))
                || (text.starts_with('"') && text.ends_with('"')))
        {
            return Value::Str(unescape(&text[1..text.len() - 1]));
        }
        if text.len() >= 2 && text.starts_with('/') && text.ends_with('/') {
            return Value::Pattern(text[1..text.len() - 1].replace("\\/", "/"));
        }
        Value::Text(text.to_string())
    }
}

/// Resolve the escapes `\b \t \n \f \r \\ \' \"`; unknown escapes are kept as written.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{c}'),
            Some('r') => out.push('\r'),
            Some(c @ ('\\' | '\'' | '"')) => out.push(c),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
