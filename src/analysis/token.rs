//! Token categories and the fixed classification vocabulary
//!
//! Classification is a pure function of the lexeme text: the vocabulary is
//! consulted first, then the identifier and number shapes. Anything else is
//! [`TokenCategory::Unexpected`].

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;

/// Source location information for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Category assigned to every lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword,
    Operator,
    AssignmentOperator,
    Delimiter,
    BooleanLiteral,
    Identifier,
    NumberLiteral,
    Unexpected,
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            TokenCategory::Keyword => "<keyword>",
            TokenCategory::Operator => "<operator>",
            TokenCategory::AssignmentOperator => "<assignment_operator>",
            TokenCategory::Delimiter => "<delimiter>",
            TokenCategory::BooleanLiteral => "<boolean>",
            TokenCategory::Identifier => "<identifier>",
            TokenCategory::NumberLiteral => "<number>",
            TokenCategory::Unexpected => "<unexpected>",
        };
        f.write_str(tag)
    }
}

const KEYWORDS: &[&str] = &[
    "int", "double", "char", "String", "if", "else", "for", "while", "return",
];

// Multi-character entries are never produced by the lexeme splitter, which
// yields punctuation one character at a time. They stay for direct lookups.
const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "==", "!=", "(", ")", "{", "}", "[", "]", ",", ".", "++", "--",
    "->",
];

const BOOLEANS: &[&str] = &["true", "false"];

/// Process-wide lexeme → category table, built on first use and never mutated.
static VOCABULARY: LazyLock<FxHashMap<&'static str, TokenCategory>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();
    for keyword in KEYWORDS {
        table.insert(*keyword, TokenCategory::Keyword);
    }
    for operator in OPERATORS {
        table.insert(*operator, TokenCategory::Operator);
    }
    for boolean in BOOLEANS {
        table.insert(*boolean, TokenCategory::BooleanLiteral);
    }
    table.insert("=", TokenCategory::AssignmentOperator);
    table.insert(";", TokenCategory::Delimiter);
    table
});

/// Look up a lexeme in the fixed vocabulary only.
pub fn vocabulary_category(lexeme: &str) -> Option<TokenCategory> {
    VOCABULARY.get(lexeme).copied()
}

/// Classify a lexeme: vocabulary, then identifier shape, then number shape.
pub fn classify(lexeme: &str) -> TokenCategory {
    if let Some(category) = vocabulary_category(lexeme) {
        category
    } else if is_identifier(lexeme) {
        TokenCategory::Identifier
    } else if is_number(lexeme) {
        TokenCategory::NumberLiteral
    } else {
        TokenCategory::Unexpected
    }
}

/// `[A-Za-z][A-Za-z0-9_]*`
pub fn is_identifier(lexeme: &str) -> bool {
    let mut chars = lexeme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

/// `-?[0-9]+(\.[0-9]+)?`
pub fn is_number(lexeme: &str) -> bool {
    let unsigned = lexeme.strip_prefix('-').unwrap_or(lexeme);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.map_or(true, all_digits)
}

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lexeme: String,
    pub category: TokenCategory,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, location: SourceLocation) -> Self {
        let lexeme = lexeme.into();
        let category = classify(&lexeme);
        Token {
            lexeme,
            category,
            location,
        }
    }

    pub fn is_unexpected(&self) -> bool {
        self.category == TokenCategory::Unexpected
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.lexeme, self.category)
    }
}
