//! Diagnostic text for analysis results
//!
//! Turns the structured results of each stage into the lines a user reads.
//! Both front ends use it: the TUI styles lines by [`Tone`], the batch mode
//! prints [`to_text`].

use crate::analysis::errors::AnalysisError;
use crate::analysis::lexer::LexicalResult;
use crate::analysis::semantics::{SemanticResult, SemanticVerdict};
use crate::analysis::syntax::SyntaxResult;
use crate::analysis::token::TokenCategory;
use crate::analysis::Stage;

/// How a report line should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Muted,
    Success,
    Failure,
}

/// One line of diagnostic output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub text: String,
    pub tone: Tone,
    /// Source line this output refers to, if any
    pub source_line: Option<usize>,
}

impl ReportLine {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        ReportLine {
            text: text.into(),
            tone,
            source_line: None,
        }
    }

    fn at(mut self, line: usize) -> Self {
        self.source_line = Some(line);
        self
    }

    fn blank() -> Self {
        ReportLine::new("", Tone::Normal)
    }
}

pub fn lexical_report(result: &LexicalResult) -> Vec<ReportLine> {
    let mut lines: Vec<ReportLine> = result
        .tokens
        .iter()
        .map(|token| {
            let tone = if token.category == TokenCategory::Unexpected {
                Tone::Failure
            } else {
                Tone::Normal
            };
            ReportLine::new(token.to_string(), tone).at(token.location.line)
        })
        .collect();

    if result.tokens.is_empty() {
        lines.push(ReportLine::new("(no tokens)", Tone::Muted));
    }

    if result.success {
        lines.push(ReportLine::new("Lexical Analysis Successful.", Tone::Success));
    } else {
        let reason = result
            .error()
            .map(|err| err.to_string())
            .unwrap_or_else(|| "unknown token".to_string());
        lines.push(ReportLine::new(
            format!("Lexical Analysis Failed: {}.", reason),
            Tone::Failure,
        ));
    }
    lines
}

pub fn syntax_report(result: &SyntaxResult) -> Vec<ReportLine> {
    let mut lines = Vec::new();

    if result.verdicts.is_empty() {
        lines.push(ReportLine::new("(no lines to check)", Tone::Muted));
    }

    for verdict in &result.verdicts {
        lines.push(ReportLine::new(verdict.text.clone(), Tone::Normal).at(verdict.line_number));
        if verdict.valid {
            lines.push(ReportLine::new("  Syntax is valid.", Tone::Success).at(verdict.line_number));
        } else {
            lines.push(
                ReportLine::new("  Syntax is invalid.", Tone::Failure).at(verdict.line_number),
            );
        }
    }

    lines.push(ReportLine::blank());
    match result.failed_line() {
        Some(failed) => {
            lines.push(
                ReportLine::new(
                    format!("Syntax Analysis Failed at Line {}:", failed.line_number),
                    Tone::Failure,
                )
                .at(failed.line_number),
            );
            lines.push(ReportLine::new(failed.text.clone(), Tone::Failure).at(failed.line_number));
            lines.push(ReportLine::new("Syntax Analysis Failed.", Tone::Failure));
        }
        None => lines.push(ReportLine::new("Syntax Analysis Successful.", Tone::Success)),
    }
    lines
}

pub fn semantic_report(result: &SemanticResult) -> Vec<ReportLine> {
    let mut lines = Vec::new();

    for verdict in &result.verdicts {
        let line = verdict.line_number();
        let (heading, outcome) = match verdict {
            SemanticVerdict::Assignment {
                var_type,
                var_name,
                value,
                correct,
                ..
            } => (
                format!(
                    "Variable: {}, Type: {}, Assigned Value: {}",
                    var_name, var_type, value
                ),
                if *correct { "Correct" } else { "Type Mismatch" },
            ),
            SemanticVerdict::Return { text, .. } => (format!("Return Statement: {}", text), "Correct"),
            SemanticVerdict::Unrecognized { text, .. } => {
                (format!("Unrecognized Statement: {}", text), "Invalid")
            }
        };

        let tone = if verdict.is_correct() {
            Tone::Success
        } else {
            Tone::Failure
        };
        lines.push(ReportLine::new(heading, Tone::Normal).at(line));
        lines.push(ReportLine::new(format!("Semantic Result: {}", outcome), tone).at(line));
        lines.push(ReportLine::blank());
    }

    if result.success {
        lines.push(ReportLine::new(
            "Semantic Analysis Result: Semantic is correct.",
            Tone::Success,
        ));
    } else {
        lines.push(ReportLine::new(
            "Semantic Analysis Result: Type mismatch in some assignment statements.",
            Tone::Failure,
        ));
    }
    lines
}

/// Output for a stage the pipeline refused to run.
pub fn refusal_report(stage: Stage, err: &AnalysisError) -> Vec<ReportLine> {
    vec![ReportLine::new(format!("{} Result: {}", stage, err), Tone::Failure)]
}

/// Join report lines into plain text, one per line.
pub fn to_text(lines: &[ReportLine]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(&line.text);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexer::{self, LexicalPolicy};
    use crate::analysis::{semantics, syntax};

    #[test]
    fn test_lexical_report_lists_tokens() {
        let result = lexer::analyze("int x = 5;", LexicalPolicy::Lenient);
        let text = to_text(&lexical_report(&result));
        assert_eq!(
            text,
            "int: <keyword>\nx: <identifier>\n=: <assignment_operator>\n5: <number>\n;: <delimiter>\nLexical Analysis Successful.\n"
        );
    }

    #[test]
    fn test_lexical_report_strict_failure() {
        let result = lexer::analyze("int x = $;", LexicalPolicy::Strict);
        let lines = lexical_report(&result);
        let last = lines.last().unwrap();
        assert_eq!(last.tone, Tone::Failure);
        assert!(last.text.contains("Unexpected token '$' at line 1, column 9"));
    }

    #[test]
    fn test_syntax_report_failure() {
        let result = syntax::validate("int x = 5;\nString s = \"hi\"");
        let text = to_text(&syntax_report(&result));
        assert!(text.contains("int x = 5;\n  Syntax is valid.\n"));
        assert!(text.contains("Syntax Analysis Failed at Line 2:\nString s = \"hi\"\n"));
        assert!(text.ends_with("Syntax Analysis Failed.\n"));
    }

    #[test]
    fn test_semantic_report() {
        let result = semantics::check("int x = \"hi\";\nreturn x;");
        let text = to_text(&semantic_report(&result));
        assert!(text.contains("Variable: x, Type: int, Assigned Value: \"hi\"\nSemantic Result: Type Mismatch\n"));
        assert!(text.contains("Return Statement: return x;\nSemantic Result: Correct\n"));
        assert!(text.ends_with("Semantic Analysis Result: Type mismatch in some assignment statements.\n"));
    }

    #[test]
    fn test_refusal_report() {
        let err = AnalysisError::PrerequisiteNotMet {
            stage: Stage::Semantic,
        };
        let lines = refusal_report(Stage::Semantic, &err);
        assert_eq!(
            lines[0].text,
            "Semantic Analysis Result: Semantic analysis cannot proceed without successful lexical and syntax analysis."
        );
    }

    #[test]
    fn test_report_lines_point_at_source() {
        let result = syntax::validate("int x = 5;\nbad line");
        let lines = syntax_report(&result);
        assert!(lines.iter().any(|l| l.source_line == Some(2) && l.tone == Tone::Failure));
    }
}
