//! Position tracking for tokens and diagnostics
//!
//! The parser works exclusively with byte offsets into the input string. Line and column
//! numbers are only needed when a token ends up in the AST or when a failure is reported,
//! so they are computed on demand through [`SourceLocation`].
//!
//! ## Conventions
//!
//! - **1-based**: lines and columns both start at 1, matching what editors display
//! - **Columns count characters**, not bytes, so multi-byte UTF-8 input lines up with the caret
//! - **O(log n) lookups**: line starts are indexed once and binary searched afterwards

use serde::Serialize;
use std::fmt;

/// A line:column position in the parsed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Converts byte offsets of one input string to line/column positions
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a position. Offsets past the end clamp to the end of input.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());

        Position::new(line + 1, column + 1)
    }

    /// Text of a 1-based line, without its line terminator
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .map_or(self.source.len(), |next| next - 1);
        self.source
            .get(start..end)
            .map(|text| text.strip_suffix('\r').unwrap_or(text))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Render the line containing `byte_offset` with a caret under the offending column
    ///
    /// Tabs are flattened to single spaces so the caret stays aligned.
    pub fn highlight(&self, byte_offset: usize) -> String {
        let position = self.byte_to_position(byte_offset);
        let line = self
            .line_text(position.line)
            .unwrap_or_default()
            .replace('\t', " ");
        format!("{}\n{}^", line, " ".repeat(position.column - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 7).to_string(), "3:7");
    }

    #[test]
    fn test_first_offset_is_one_one() {
        let loc = SourceLocation::new("abc");
        assert_eq!(loc.byte_to_position(0), Position::new(1, 1));
        assert_eq!(loc.byte_to_position(2), Position::new(1, 3));
    }

    #[test]
    fn test_offsets_after_newlines() {
        let loc = SourceLocation::new("ab\ncd\n\nef");
        assert_eq!(loc.line_count(), 4);
        assert_eq!(loc.byte_to_position(3), Position::new(2, 1));
        assert_eq!(loc.byte_to_position(5), Position::new(2, 3));
        assert_eq!(loc.byte_to_position(6), Position::new(3, 1));
        assert_eq!(loc.byte_to_position(8), Position::new(4, 2));
    }

    #[test]
    fn test_end_of_input_clamps() {
        let loc = SourceLocation::new("1 *");
        assert_eq!(loc.byte_to_position(3), Position::new(1, 4));
        assert_eq!(loc.byte_to_position(99), Position::new(1, 4));
    }

    #[test]
    fn test_columns_count_characters() {
        let loc = SourceLocation::new("héllo x");
        // 'é' is two bytes wide
        assert_eq!(loc.byte_to_position(7), Position::new(1, 7));
    }

    #[test]
    fn test_line_text() {
        let loc = SourceLocation::new("first\r\nsecond\nthird");
        assert_eq!(loc.line_text(1), Some("first"));
        assert_eq!(loc.line_text(2), Some("second"));
        assert_eq!(loc.line_text(3), Some("third"));
        assert_eq!(loc.line_text(0), None);
        assert_eq!(loc.line_text(4), None);
    }

    #[test]
    fn test_highlight_places_caret() {
        let loc = SourceLocation::new("a = 1\nb = \t?\n");
        assert_eq!(loc.highlight(11), "b =  ?\n     ^");
    }
}
