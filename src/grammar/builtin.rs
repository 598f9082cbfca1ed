//! Stock token definitions
//!
//! Registered under their upper-case name, e.g. `IDENTIFIER`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Identifier,
    Whitespace,
    Integer,
    Float,
    SingleQuotedString,
    DoubleQuotedString,
    SingleLineComment,
    MultiLineComment,
    Boolean,
    RegularExpression,
}

impl Builtin {
    pub const ALL: [Builtin; 10] = [
        Builtin::Identifier,
        Builtin::Whitespace,
        Builtin::Integer,
        Builtin::Float,
        Builtin::SingleQuotedString,
        Builtin::DoubleQuotedString,
        Builtin::SingleLineComment,
        Builtin::MultiLineComment,
        Builtin::Boolean,
        Builtin::RegularExpression,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Identifier => "IDENTIFIER",
            Builtin::Whitespace => "WHITESPACE",
            Builtin::Integer => "INTEGER",
            Builtin::Float => "FLOAT",
            Builtin::SingleQuotedString => "SINGLEQUOTEDSTRING",
            Builtin::DoubleQuotedString => "DOUBLEQUOTEDSTRING",
            Builtin::SingleLineComment => "SINGLELINECOMMENT",
            Builtin::MultiLineComment => "MULTILINECOMMENT",
            Builtin::Boolean => "BOOLEAN",
            Builtin::RegularExpression => "REGULAREXPRESSION",
        }
    }

    pub fn pattern(self) -> &'static str {
        match self {
            Builtin::Identifier => r"[a-zA-Z_][a-zA-Z_0-9]*",
            Builtin::Whitespace => r"\s+",
            Builtin::Integer => r"-?\d+",
            Builtin::Float => r"-?\d+(\.\d+)?(e\d+)?",
            Builtin::SingleQuotedString => r#"'(?:[^\\']|\\[btnfr"'\\])*'"#,
            Builtin::DoubleQuotedString => r#""(?:[^\\"]|\\[btnfr"'\\])*""#,
            Builtin::SingleLineComment => r"//[^\n]*(\n|$)",
            Builtin::MultiLineComment => r"/\*(?s:.)*?\*/",
            Builtin::Boolean => r"true|false",
            Builtin::RegularExpression => r"/(?:[^\\/]|\\.)*/",
        }
    }

    pub fn is_whitespace(self) -> bool {
        matches!(
            self,
            Builtin::Whitespace | Builtin::SingleLineComment | Builtin::MultiLineComment
        )
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::TokenMatcher;
    use rstest::rstest;

    fn matched(builtin: Builtin, input: &str) -> Option<usize> {
        TokenMatcher::new(builtin.name(), builtin.pattern(), builtin.is_whitespace(), false)
            .unwrap()
            .match_at(input, 0)
    }

    #[test]
    fn test_all_patterns_compile() {
        for builtin in Builtin::ALL {
            assert!(
                TokenMatcher::new(builtin.name(), builtin.pattern(), false, false).is_ok(),
                "{} does not compile",
                builtin
            );
        }
    }

    #[rstest]
    #[case(Builtin::Identifier, "_foo1 bar", Some(5))]
    #[case(Builtin::Identifier, "1foo", None)]
    #[case(Builtin::Integer, "-42;", Some(3))]
    #[case(Builtin::Float, "3.14e2x", Some(6))]
    #[case(Builtin::SingleQuotedString, r"'it\'s' rest", Some(7))]
    #[case(Builtin::DoubleQuotedString, r#""a\"b" rest"#, Some(6))]
    #[case(Builtin::DoubleQuotedString, r#""unterminated"#, None)]
    #[case(Builtin::SingleLineComment, "// note\nnext", Some(8))]
    #[case(Builtin::SingleLineComment, "// at end", Some(9))]
    #[case(Builtin::MultiLineComment, "/* a\n b */ c", Some(10))]
    #[case(Builtin::Boolean, "false", Some(5))]
    #[case(Builtin::RegularExpression, r"/a\/b/ x", Some(6))]
    fn test_patterns(#[case] builtin: Builtin, #[case] input: &str, #[case] expected: Option<usize>) {
        assert_eq!(matched(builtin, input), expected);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Builtin::from_name("FLOAT"), Some(Builtin::Float));
        assert_eq!(Builtin::from_name("float"), None);
        assert!(Builtin::SingleLineComment.is_whitespace());
        assert!(!Builtin::Identifier.is_whitespace());
    }
}
