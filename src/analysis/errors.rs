//! Diagnostic error types for the analysis pipeline
//!
//! This module defines [`AnalysisError`]. Lexical and syntax errors are
//! first-failure-wins; type mismatches are accumulated. None of them are fatal
//! to the process: every variant is returned as a value and rendered by the
//! caller.

use super::token::SourceLocation;
use super::Stage;
use std::fmt;

/// Errors reported by the analysis stages and the pipeline controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A lexeme matched none of the known categories
    UnexpectedToken {
        lexeme: String,
        location: SourceLocation,
    },

    /// A line matched neither recognized statement shape
    InvalidSyntax { line: usize, text: String },

    /// A typed assignment's value does not satisfy its declared type
    TypeMismatch {
        line: usize,
        var_type: String,
        var_name: String,
        value: String,
    },

    /// A stage was invoked before its predecessor succeeded
    PrerequisiteNotMet { stage: Stage },

    /// Semantic analysis already completed; the session must be reset
    SessionLocked,
}

impl AnalysisError {
    /// 1-based source line this diagnostic points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            AnalysisError::UnexpectedToken { location, .. } => Some(location.line),
            AnalysisError::InvalidSyntax { line, .. } => Some(*line),
            AnalysisError::TypeMismatch { line, .. } => Some(*line),
            AnalysisError::PrerequisiteNotMet { .. } => None,
            AnalysisError::SessionLocked => None,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::UnexpectedToken { lexeme, location } => {
                write!(
                    f,
                    "Unexpected token '{}' at line {}, column {}",
                    lexeme, location.line, location.column
                )
            }
            AnalysisError::InvalidSyntax { line, text } => {
                write!(f, "Syntax Analysis Failed at Line {}: {}", line, text)
            }
            AnalysisError::TypeMismatch {
                line,
                var_type,
                var_name,
                value,
            } => {
                write!(
                    f,
                    "Type mismatch at line {}: '{}' declared as {} cannot hold {}",
                    line, var_name, var_type, value
                )
            }
            AnalysisError::PrerequisiteNotMet { stage } => match stage {
                Stage::Lexical => write!(f, "Lexical analysis has no prerequisite"),
                Stage::Syntax => write!(
                    f,
                    "Syntax analysis cannot proceed without successful lexical analysis."
                ),
                Stage::Semantic => write!(
                    f,
                    "Semantic analysis cannot proceed without successful lexical and syntax analysis."
                ),
            },
            AnalysisError::SessionLocked => {
                write!(
                    f,
                    "Semantic analysis already completed; reset the session to analyze again."
                )
            }
        }
    }
}

impl std::error::Error for AnalysisError {}
