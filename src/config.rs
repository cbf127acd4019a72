// Configuration for the analyzer and the binary

use crate::analysis::lexer::LexicalPolicy;

/// Log filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Analyzer settings held by a [`crate::pipeline::Session`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub lexical_policy: LexicalPolicy,
}

impl AnalyzerConfig {
    /// Fail the lexical pass on any unexpected token.
    pub fn strict() -> Self {
        AnalyzerConfig {
            lexical_policy: LexicalPolicy::Strict,
        }
    }
}
