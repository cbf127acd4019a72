//! Semantic checker
//!
//! Re-parses every line with the shapes from [`super::syntax`] and checks that
//! the literal assigned to a typed variable fits the declared type. Unlike the
//! syntax pass, nothing short-circuits: every line gets a verdict and all
//! mismatches are collected.
//!
//! # Type rules
//!
//! | Type     | Accepted value                                              |
//! |----------|-------------------------------------------------------------|
//! | `int`    | optional `-`, ASCII digits, fits in 32 bits, no other text  |
//! | `double` | anything `f64::from_str` accepts, after trimming            |
//! | `String` | trimmed value starts and ends with its own `"`              |
//! | other    | always a mismatch                                           |
//!
//! `return` lines carry no type and always pass.

use super::errors::AnalysisError;
use super::syntax::{parse_statement, source_lines, Statement};
use tracing::{debug, instrument};

/// Per-line semantic outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticVerdict {
    Assignment {
        line_number: usize,
        var_type: String,
        var_name: String,
        value: String,
        correct: bool,
    },
    Return {
        line_number: usize,
        text: String,
    },
    /// Neither statement shape; counts as a failure.
    Unrecognized {
        line_number: usize,
        text: String,
    },
}

impl SemanticVerdict {
    pub fn line_number(&self) -> usize {
        match self {
            SemanticVerdict::Assignment { line_number, .. }
            | SemanticVerdict::Return { line_number, .. }
            | SemanticVerdict::Unrecognized { line_number, .. } => *line_number,
        }
    }

    pub fn is_correct(&self) -> bool {
        match self {
            SemanticVerdict::Assignment { correct, .. } => *correct,
            SemanticVerdict::Return { .. } => true,
            SemanticVerdict::Unrecognized { .. } => false,
        }
    }

    /// Diagnostic for a failed line, `None` if the line is correct.
    pub fn error(&self) -> Option<AnalysisError> {
        match self {
            SemanticVerdict::Assignment {
                line_number,
                var_type,
                var_name,
                value,
                correct: false,
            } => Some(AnalysisError::TypeMismatch {
                line: *line_number,
                var_type: var_type.clone(),
                var_name: var_name.clone(),
                value: value.clone(),
            }),
            SemanticVerdict::Unrecognized { line_number, text } => {
                Some(AnalysisError::InvalidSyntax {
                    line: *line_number,
                    text: text.clone(),
                })
            }
            _ => None,
        }
    }
}

/// Outcome of the semantic pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticResult {
    pub verdicts: Vec<SemanticVerdict>,
    pub success: bool,
}

impl SemanticResult {
    /// Every failure, in line order.
    pub fn errors(&self) -> Vec<AnalysisError> {
        self.verdicts.iter().filter_map(SemanticVerdict::error).collect()
    }
}

/// Check a literal value against a declared type name.
pub fn value_fits_type(var_type: &str, value: &str) -> bool {
    match var_type {
        "int" => is_int_literal(value),
        "double" => is_double_literal(value),
        "String" => is_string_literal(value),
        _ => false,
    }
}

fn is_int_literal(value: &str) -> bool {
    // i32::from_str would also take a leading '+'
    !value.starts_with('+') && value.parse::<i32>().is_ok()
}

fn is_double_literal(value: &str) -> bool {
    let value = value.trim();
    // f64::from_str also takes "inf", "infinity" and "nan"
    value
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '+' | '-' | 'e' | 'E'))
        && value.parse::<f64>().is_ok()
}

fn is_string_literal(value: &str) -> bool {
    let value = value.trim();
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

fn check_line(line_number: usize, line: &str) -> SemanticVerdict {
    match parse_statement(line) {
        Some(Statement::Assignment {
            var_type,
            var_name,
            value,
        }) => SemanticVerdict::Assignment {
            line_number,
            var_type: var_type.to_string(),
            var_name: var_name.to_string(),
            value: value.to_string(),
            correct: value_fits_type(var_type, value),
        },
        Some(Statement::Return { .. }) => SemanticVerdict::Return {
            line_number,
            text: line.trim().to_string(),
        },
        None => SemanticVerdict::Unrecognized {
            line_number,
            text: line.trim().to_string(),
        },
    }
}

/// Check every line and collect all failures.
#[instrument(skip_all, fields(source_len = source.len()))]
pub fn check(source: &str) -> SemanticResult {
    let verdicts: Vec<SemanticVerdict> = source_lines(source)
        .into_iter()
        .map(|(line_number, line)| check_line(line_number, line))
        .collect();

    let failures = verdicts.iter().filter(|v| !v.is_correct()).count();
    debug!(line_count = verdicts.len(), failures, "semantic pass completed");

    SemanticResult {
        success: failures == 0,
        verdicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_rule() {
        assert!(value_fits_type("int", "5"));
        assert!(value_fits_type("int", "-12"));
        assert!(value_fits_type("int", "2147483647"));
        assert!(!value_fits_type("int", "2147483648"));
        assert!(!value_fits_type("int", "+5"));
        assert!(!value_fits_type("int", "5.0"));
        assert!(!value_fits_type("int", "5 "));
        assert!(!value_fits_type("int", "\"5\""));
        assert!(!value_fits_type("int", "x"));
    }

    #[test]
    fn test_double_rule() {
        assert!(value_fits_type("double", "2.5"));
        assert!(value_fits_type("double", "-3"));
        assert!(value_fits_type("double", "1e10"));
        assert!(value_fits_type("double", ".5"));
        assert!(value_fits_type("double", "2.5 "));
        assert!(!value_fits_type("double", "2.5.1"));
        assert!(!value_fits_type("double", "abc"));
        for word in ["inf", "-inf", "infinity", "nan", "NaN", "INF"] {
            assert!(!value_fits_type("double", word), "{} is not a double", word);
        }
    }

    #[test]
    fn test_string_rule() {
        assert!(value_fits_type("String", "\"hi\""));
        assert!(value_fits_type("String", "\"\""));
        assert!(value_fits_type("String", "\"hi\" "));
        assert!(!value_fits_type("String", "\""));
        assert!(!value_fits_type("String", "hi"));
        assert!(!value_fits_type("String", "'hi'"));
    }

    #[test]
    fn test_unknown_types_always_mismatch() {
        assert!(!value_fits_type("char", "'a'"));
        assert!(!value_fits_type("boolean", "true"));
        assert!(!value_fits_type("Int", "5"));
    }

    #[test]
    fn test_correct_assignment() {
        let result = check("int x = 5;");
        assert!(result.success);
        assert_eq!(
            result.verdicts,
            vec![SemanticVerdict::Assignment {
                line_number: 1,
                var_type: "int".to_string(),
                var_name: "x".to_string(),
                value: "5".to_string(),
                correct: true,
            }]
        );
    }

    #[test]
    fn test_mismatch_reported() {
        let result = check("int x = \"hi\";");
        assert!(!result.success);
        assert_eq!(
            result.errors(),
            vec![AnalysisError::TypeMismatch {
                line: 1,
                var_type: "int".to_string(),
                var_name: "x".to_string(),
                value: "\"hi\"".to_string(),
            }]
        );
    }

    #[test]
    fn test_return_is_always_correct() {
        let result = check("return undeclared;");
        assert!(result.success);
        assert!(matches!(
            result.verdicts[0],
            SemanticVerdict::Return { line_number: 1, .. }
        ));
    }

    #[test]
    fn test_collects_all_mismatches() {
        let source = "int a = 1.5;\ndouble b = 2.0;\nString c = 3;\nreturn a;";
        let result = check(source);
        assert!(!result.success);
        assert_eq!(result.verdicts.len(), 4);

        let lines: Vec<Option<usize>> = result.errors().iter().map(AnalysisError::line).collect();
        assert_eq!(lines, vec![Some(1), Some(3)]);
    }

    #[test]
    fn test_unrecognized_line_fails() {
        let result = check("int a = 1;\nwhile (a) {");
        assert!(!result.success);
        assert!(matches!(
            result.verdicts[1],
            SemanticVerdict::Unrecognized { line_number: 2, .. }
        ));
        assert!(matches!(
            result.errors()[0],
            AnalysisError::InvalidSyntax { line: 2, .. }
        ));
    }

    #[test]
    fn test_blank_value_is_a_mismatch() {
        let result = check("int x = ;");
        assert!(!result.success);
        assert_eq!(
            result.errors(),
            vec![AnalysisError::TypeMismatch {
                line: 1,
                var_type: "int".to_string(),
                var_name: "x".to_string(),
                value: " ".to_string(),
            }]
        );
    }

    #[test]
    fn test_blank_source() {
        let result = check("\n\n");
        assert!(result.success);
        assert!(result.verdicts.is_empty());
    }
}
