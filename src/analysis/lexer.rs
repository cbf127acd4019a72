//! Lexer (tokenizer) for toy-language source
//!
//! Splits raw source text into lexemes and classifies each one. A lexeme is
//! either a run of ASCII word characters (`[A-Za-z0-9_]`) or a single
//! non-whitespace, non-word character, so compound punctuation such as `==`
//! always comes out one character at a time.
//!
//! The token sequence is lazy and restartable: [`tokens`] returns a cloneable
//! iterator that stops right after the first unexpected token.

use super::errors::AnalysisError;
use super::token::{SourceLocation, Token};
use tracing::{debug, instrument};

/// How the lexical pass reports success when it halts on an unexpected token.
///
/// `Lenient` is the default: string literals such as `"hi"` lex as a lone `"`
/// (unexpected), and typed `String` assignments could never reach the
/// semantic pass if that failed the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexicalPolicy {
    /// An unexpected token fails the pass.
    Strict,
    /// The pass always succeeds once it stops, even after an unexpected token.
    #[default]
    Lenient,
}

/// Raw lexeme splitter with line/column tracking.
#[derive(Debug, Clone)]
pub struct Lexemes<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexemes<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_separator) {
            self.advance();
        }
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl<'a> Iterator for Lexemes<'a> {
    type Item = (&'a str, SourceLocation);

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();

        let loc = self.current_location();
        let start = self.position;
        let first = self.advance()?;

        if is_word_char(first) {
            while self.peek().is_some_and(is_word_char) {
                self.advance();
            }
        }

        Some((&self.input[start..self.position], loc))
    }
}

/// Lazy classified token stream; ends after the first unexpected token.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    lexemes: Lexemes<'a>,
    halted: bool,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.halted {
            return None;
        }

        let (lexeme, loc) = self.lexemes.next()?;
        let token = Token::new(lexeme, loc);
        if token.is_unexpected() {
            self.halted = true;
        }
        Some(token)
    }
}

/// Start a fresh token sequence over `source`.
pub fn tokens(source: &str) -> Tokens<'_> {
    Tokens {
        lexemes: Lexemes::new(source),
        halted: false,
    }
}

/// Outcome of the lexical pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalResult {
    pub tokens: Vec<Token>,
    pub success: bool,
}

impl LexicalResult {
    /// The token that halted classification, if any.
    pub fn unexpected(&self) -> Option<&Token> {
        self.tokens.last().filter(|token| token.is_unexpected())
    }

    pub fn error(&self) -> Option<AnalysisError> {
        self.unexpected().map(|token| AnalysisError::UnexpectedToken {
            lexeme: token.lexeme.clone(),
            location: token.location,
        })
    }
}

/// Run the lexical pass over the whole input.
#[instrument(skip_all, fields(source_len = source.len(), policy = ?policy))]
pub fn analyze(source: &str, policy: LexicalPolicy) -> LexicalResult {
    let tokens: Vec<Token> = tokens(source).collect();
    let halted = tokens.last().is_some_and(Token::is_unexpected);

    let success = match policy {
        LexicalPolicy::Strict => !halted,
        LexicalPolicy::Lenient => true,
    };

    debug!(token_count = tokens.len(), halted, success, "lexical pass completed");
    LexicalResult { tokens, success }
}

/// Whitespace as separators: space, tab, newline, vertical tab, form feed, CR.
pub(crate) fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::TokenCategory;

    fn lexemes(source: &str) -> Vec<&str> {
        Lexemes::new(source).map(|(lexeme, _)| lexeme).collect()
    }

    #[test]
    fn test_simple_assignment() {
        let result = analyze("int x = 5;", LexicalPolicy::Strict);
        assert!(result.success);

        let pairs: Vec<(&str, TokenCategory)> = result
            .tokens
            .iter()
            .map(|t| (t.lexeme.as_str(), t.category))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("int", TokenCategory::Keyword),
                ("x", TokenCategory::Identifier),
                ("=", TokenCategory::AssignmentOperator),
                ("5", TokenCategory::NumberLiteral),
                (";", TokenCategory::Delimiter),
            ]
        );
    }

    #[test]
    fn test_compound_punctuation_splits() {
        assert_eq!(lexemes("a==b"), vec!["a", "=", "=", "b"]);
        assert_eq!(lexemes("p->q"), vec!["p", "-", ">", "q"]);
        assert_eq!(lexemes("3.14"), vec!["3", ".", "14"]);
    }

    #[test]
    fn test_whitespace_is_discarded() {
        assert_eq!(lexemes("  int\t\tx\r\n=\x0B5 ;  "), vec!["int", "x", "=", "5", ";"]);
        assert!(lexemes(" \n\t ").is_empty());
    }

    #[test]
    fn test_locations() {
        let toks: Vec<Token> = tokens("int x;\n  return x;").collect();
        assert_eq!(toks[0].location, SourceLocation::new(1, 1));
        assert_eq!(toks[1].location, SourceLocation::new(1, 5));
        assert_eq!(toks[3].location, SourceLocation::new(2, 3));
    }

    #[test]
    fn test_halts_on_unexpected() {
        let toks: Vec<Token> = tokens("int x = @ 5 ;").collect();
        assert_eq!(toks.len(), 4);
        assert_eq!(toks[3].lexeme, "@");
        assert!(toks[3].is_unexpected());
    }

    #[test]
    fn test_strict_policy_fails_on_unexpected() {
        let result = analyze("String s = \"hi\";", LexicalPolicy::Strict);
        assert!(!result.success);
        assert_eq!(result.unexpected().map(|t| t.lexeme.as_str()), Some("\""));
        assert!(matches!(
            result.error(),
            Some(AnalysisError::UnexpectedToken { ref lexeme, .. }) if lexeme == "\""
        ));
    }

    #[test]
    fn test_lenient_policy_always_succeeds() {
        // halting is still reported, but does not fail the pass
        let result = analyze("String s = \"hi\";", LexicalPolicy::Lenient);
        assert!(result.success);
        assert!(result.unexpected().is_some());
    }

    #[test]
    fn test_non_ascii_is_single_unexpected_lexeme() {
        let result = analyze("int é = 1;", LexicalPolicy::Strict);
        assert_eq!(result.tokens.len(), 2);
        assert_eq!(result.tokens[1].lexeme, "é");
        assert!(!result.success);
    }

    #[test]
    fn test_restartable_sequence() {
        let source = "int a = 1;\ndouble b = 2;";
        let stream = tokens(source);
        let first: Vec<Token> = stream.clone().collect();
        let second: Vec<Token> = stream.collect();
        assert_eq!(first, second);
        assert_eq!(first, tokens(source).collect::<Vec<_>>());
    }

    #[test]
    fn test_default_policy_is_lenient() {
        assert_eq!(LexicalPolicy::default(), LexicalPolicy::Lenient);
    }

    #[test]
    fn test_empty_input() {
        let result = analyze("", LexicalPolicy::Strict);
        assert!(result.success);
        assert!(result.tokens.is_empty());
        assert_eq!(result.error(), None);
    }
}
