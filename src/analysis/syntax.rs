//! Line grammar validator
//!
//! Every source line is checked on its own against two statement shapes:
//!
//! ```text
//! <type> <name> = <value> ;      typed assignment
//! return <word> ;                return statement
//! ```
//!
//! Both are whole-line matches on the trimmed line. The assignment value is
//! not parsed any further here; it is everything between `=` and the final
//! `;`. Validation stops at the first line that matches neither shape.

use super::errors::AnalysisError;
use super::lexer::{is_separator, is_word_char};
use tracing::{debug, instrument};

/// A recognized statement, borrowing from the source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    Assignment {
        var_type: &'a str,
        var_name: &'a str,
        value: &'a str,
    },
    Return {
        value: &'a str,
    },
}

/// Byte cursor over one trimmed line.
struct LineCursor<'a> {
    line: &'a str,
    position: usize,
}

impl<'a> LineCursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, position: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.line[self.position..].chars().next()
    }

    fn rest(&self) -> &'a str {
        &self.line[self.position..]
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.position += expected.len();
            true
        } else {
            false
        }
    }

    /// Consume a non-empty run of word characters.
    fn word(&mut self) -> Option<&'a str> {
        let start = self.position;
        while let Some(ch) = self.peek().filter(|ch| is_word_char(*ch)) {
            self.position += ch.len_utf8();
        }
        if self.position > start {
            Some(&self.line[start..self.position])
        } else {
            None
        }
    }

    /// Skip whitespace, returning how many characters were skipped.
    fn blanks(&mut self) -> usize {
        let mut skipped = 0;
        while let Some(ch) = self.peek().filter(|ch| is_separator(*ch)) {
            self.position += ch.len_utf8();
            skipped += 1;
        }
        skipped
    }
}

/// Recognize a line as one of the two statement shapes.
///
/// Assignment is tried first, so `return x = 1;` is an assignment whose type
/// token is `return`.
pub fn parse_statement(line: &str) -> Option<Statement<'_>> {
    let line = line.trim();
    assignment(line).or_else(|| return_statement(line))
}

fn assignment(line: &str) -> Option<Statement<'_>> {
    let mut cursor = LineCursor::new(line);

    let var_type = cursor.word()?;
    if cursor.blanks() == 0 {
        return None;
    }
    let var_name = cursor.word()?;
    cursor.blanks();
    if !cursor.eat('=') {
        return None;
    }
    let skipped = cursor.blanks();

    let mut value = cursor.rest().strip_suffix(';')?;
    if value.is_empty() {
        if skipped == 0 {
            return None;
        }
        // `int x = ;`: the last blank before ';' is the value
        value = &line[cursor.position - 1..line.len() - 1];
    }

    Some(Statement::Assignment {
        var_type,
        var_name,
        value,
    })
}

fn return_statement(line: &str) -> Option<Statement<'_>> {
    let mut cursor = LineCursor::new(line);

    if !cursor.eat_str("return") || cursor.blanks() == 0 {
        return None;
    }
    let value = cursor.word()?;
    if !cursor.eat(';') || !cursor.rest().is_empty() {
        return None;
    }

    Some(Statement::Return { value })
}

/// Split source into numbered lines (1-based).
///
/// Blank or all-whitespace input has no lines at all. Trailing blank lines are
/// dropped; blank lines in the middle are kept and will fail validation.
pub fn source_lines(source: &str) -> Vec<(usize, &str)> {
    if source.trim().is_empty() {
        return Vec::new();
    }

    let mut lines: Vec<(usize, &str)> = source
        .split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .collect();
    while lines.last().is_some_and(|(_, line)| line.trim().is_empty()) {
        lines.pop();
    }
    lines
}

/// Verdict for one checked line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxVerdict {
    pub line_number: usize,
    pub text: String,
    pub valid: bool,
}

/// Outcome of the syntax pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxResult {
    /// Lines checked so far; the last one is the failing line on failure.
    pub verdicts: Vec<SyntaxVerdict>,
    pub success: bool,
}

impl SyntaxResult {
    pub fn failed_line(&self) -> Option<&SyntaxVerdict> {
        self.verdicts.iter().find(|verdict| !verdict.valid)
    }

    pub fn error(&self) -> Option<AnalysisError> {
        self.failed_line().map(|verdict| AnalysisError::InvalidSyntax {
            line: verdict.line_number,
            text: verdict.text.clone(),
        })
    }
}

/// Validate every line, stopping at the first invalid one.
#[instrument(skip_all, fields(source_len = source.len()))]
pub fn validate(source: &str) -> SyntaxResult {
    let mut verdicts = Vec::new();

    for (line_number, line) in source_lines(source) {
        let valid = parse_statement(line).is_some();
        verdicts.push(SyntaxVerdict {
            line_number,
            text: line.trim().to_string(),
            valid,
        });

        if !valid {
            debug!(line_number, "syntax pass stopped at invalid line");
            return SyntaxResult {
                verdicts,
                success: false,
            };
        }
    }

    debug!(line_count = verdicts.len(), "syntax pass completed");
    SyntaxResult {
        verdicts,
        success: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_assignment() {
        assert_eq!(
            parse_statement("int x = 5;"),
            Some(Statement::Assignment {
                var_type: "int",
                var_name: "x",
                value: "5",
            })
        );
        assert_eq!(
            parse_statement("  double   ratio=0.5;  "),
            Some(Statement::Assignment {
                var_type: "double",
                var_name: "ratio",
                value: "0.5",
            })
        );
    }

    #[test]
    fn test_value_is_unchecked_here() {
        assert!(matches!(
            parse_statement("int x = \"hi\";"),
            Some(Statement::Assignment { value: "\"hi\"", .. })
        ));
        // value runs up to the last ';'
        assert!(matches!(
            parse_statement("int x = 1; int y = 2;"),
            Some(Statement::Assignment { value: "1; int y = 2", .. })
        ));
        // trailing blanks before ';' belong to the value
        assert!(matches!(
            parse_statement("int x = 5 ;"),
            Some(Statement::Assignment { value: "5 ", .. })
        ));
    }

    #[test]
    fn test_blank_value_is_kept() {
        assert_eq!(
            parse_statement("int x = ;"),
            Some(Statement::Assignment {
                var_type: "int",
                var_name: "x",
                value: " ",
            })
        );
        assert!(matches!(
            parse_statement("int x =   ;"),
            Some(Statement::Assignment { value: " ", .. })
        ));
        assert!(validate("int x = ;").success);
    }

    #[test]
    fn test_rejected_assignments() {
        assert_eq!(parse_statement("String s = \"hi\""), None);
        assert_eq!(parse_statement("intx = 5;"), None);
        assert_eq!(parse_statement("int x 5;"), None);
        assert_eq!(parse_statement("int x =;"), None);
        assert_eq!(parse_statement("int x = 5; // note"), None);
        assert_eq!(parse_statement("x = 5;"), None);
    }

    #[test]
    fn test_return_statement() {
        assert_eq!(parse_statement("return x;"), Some(Statement::Return { value: "x" }));
        assert_eq!(parse_statement("return   42;"), Some(Statement::Return { value: "42" }));
        assert_eq!(parse_statement("return x ;"), None);
        assert_eq!(parse_statement("returnx;"), None);
        assert_eq!(parse_statement("return;"), None);
        assert_eq!(parse_statement("return a + b;"), None);
    }

    #[test]
    fn test_return_with_assignment_is_assignment() {
        assert!(matches!(
            parse_statement("return x = 1;"),
            Some(Statement::Assignment { var_type: "return", .. })
        ));
    }

    #[test]
    fn test_source_lines() {
        assert!(source_lines("").is_empty());
        assert!(source_lines("  \n\t\n").is_empty());
        assert_eq!(
            source_lines("int a = 1;\n\nreturn a;\n\n"),
            vec![(1, "int a = 1;"), (2, ""), (3, "return a;")]
        );
    }

    #[test]
    fn test_validate_all_valid() {
        let result = validate("int x = 5;\ndouble y = 2.5;\nreturn x;\n");
        assert!(result.success);
        assert_eq!(result.verdicts.len(), 3);
        assert!(result.verdicts.iter().all(|v| v.valid));
        assert_eq!(result.error(), None);
    }

    #[test]
    fn test_validate_stops_at_first_invalid_line() {
        let result = validate("int x = 5;\nint y 6;\nbogus\nreturn x;");
        assert!(!result.success);
        assert_eq!(result.verdicts.len(), 2);

        let failed = result.failed_line().expect("expected a failing line");
        assert_eq!(failed.line_number, 2);
        assert_eq!(failed.text, "int y 6;");
        assert_eq!(
            result.error(),
            Some(AnalysisError::InvalidSyntax {
                line: 2,
                text: "int y 6;".to_string()
            })
        );
    }

    #[test]
    fn test_validate_blank_input() {
        let result = validate("   \n  ");
        assert!(result.success);
        assert!(result.verdicts.is_empty());
    }

    #[test]
    fn test_blank_line_in_the_middle_is_invalid() {
        let result = validate("int a = 1;\n   \nreturn a;");
        assert!(!result.success);
        assert_eq!(result.failed_line().map(|v| v.line_number), Some(2));
    }

    #[test]
    fn test_crlf_lines() {
        let result = validate("int a = 1;\r\nreturn a;\r\n");
        assert!(result.success);
        assert_eq!(result.verdicts[0].text, "int a = 1;");
    }
}
