//! Gate state machine for the analysis pipeline

use crate::analysis::errors::AnalysisError;
use crate::analysis::Stage;
use std::fmt;

/// Where a session stands in the lexical → syntax → semantic sequence.
///
/// The two gate bits of the pipeline are derived from this state:
///
/// | State          | lexical_ok | syntax_ok |
/// |----------------|------------|-----------|
/// | `NotStarted`   | false      | false     |
/// | `LexicalOk`    | true       | false     |
/// | `SyntaxOk`     | true       | true      |
/// | `SemanticDone` | true       | true      |
///
/// `SemanticDone` is terminal: nothing runs again until the session is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    NotStarted,
    LexicalOk,
    SyntaxOk,
    SemanticDone,
}

impl PipelineState {
    pub fn lexical_ok(self) -> bool {
        !matches!(self, PipelineState::NotStarted)
    }

    pub fn syntax_ok(self) -> bool {
        matches!(self, PipelineState::SyntaxOk | PipelineState::SemanticDone)
    }

    pub fn is_locked(self) -> bool {
        self == PipelineState::SemanticDone
    }

    /// Check whether `stage` may run from this state.
    pub fn require(self, stage: Stage) -> Result<(), AnalysisError> {
        if self.is_locked() {
            return Err(AnalysisError::SessionLocked);
        }

        let met = match stage {
            Stage::Lexical => true,
            Stage::Syntax => self.lexical_ok(),
            Stage::Semantic => self.syntax_ok(),
        };

        if met {
            Ok(())
        } else {
            Err(AnalysisError::PrerequisiteNotMet { stage })
        }
    }

    pub fn can_run(self, stage: Stage) -> bool {
        self.require(stage).is_ok()
    }

    /// State after `stage` finished with the given outcome.
    pub fn complete(self, stage: Stage, success: bool) -> Self {
        match (stage, success) {
            (Stage::Lexical, true) => PipelineState::LexicalOk,
            (Stage::Lexical, false) => PipelineState::NotStarted,
            (Stage::Syntax, true) => PipelineState::SyntaxOk,
            (Stage::Syntax, false) => PipelineState::LexicalOk,
            (Stage::Semantic, _) => PipelineState::SemanticDone,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::NotStarted => write!(f, "not started"),
            PipelineState::LexicalOk => write!(f, "lexical ok"),
            PipelineState::SyntaxOk => write!(f, "syntax ok"),
            PipelineState::SemanticDone => write!(f, "semantic done"),
        }
    }
}
