//! Analysis session: loaded source, gate state and the last results

use super::state::PipelineState;
use crate::analysis::errors::AnalysisError;
use crate::analysis::lexer::{self, LexicalResult};
use crate::analysis::semantics::{self, SemanticResult};
use crate::analysis::syntax::{self, SyntaxResult};
use crate::analysis::Stage;
use crate::config::AnalyzerConfig;
use tracing::{debug, info, instrument};

/// One analysis session over one piece of source text.
///
/// Every `analyze_*` call goes through [`PipelineState::require`] first, so a
/// stage invoked out of order fails with
/// [`AnalysisError::PrerequisiteNotMet`] without evaluating anything.
#[derive(Debug, Default)]
pub struct Session {
    config: AnalyzerConfig,
    source: String,
    state: PipelineState,
    lexical: Option<LexicalResult>,
    syntax: Option<SyntaxResult>,
    semantic: Option<SemanticResult>,
}

impl Session {
    pub fn new(config: AnalyzerConfig) -> Self {
        Session {
            config,
            ..Session::default()
        }
    }

    /// Create a session with `source` already loaded.
    pub fn with_source(config: AnalyzerConfig, source: impl Into<String>) -> Self {
        let mut session = Session::new(config);
        session.load_source(source);
        session
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn lexical_result(&self) -> Option<&LexicalResult> {
        self.lexical.as_ref()
    }

    pub fn syntax_result(&self) -> Option<&SyntaxResult> {
        self.syntax.as_ref()
    }

    pub fn semantic_result(&self) -> Option<&SemanticResult> {
        self.semantic.as_ref()
    }

    /// Replace the source text; closes both gates and drops old results.
    pub fn load_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.reset();
        info!(source_len = self.source.len(), "source loaded");
    }

    /// Close both gates and discard cached results, keeping the source.
    pub fn reset(&mut self) {
        self.state = PipelineState::NotStarted;
        self.lexical = None;
        self.syntax = None;
        self.semantic = None;
        debug!("session reset");
    }

    /// Reset and forget the source text as well.
    pub fn clear(&mut self) {
        self.source.clear();
        self.reset();
    }

    #[instrument(skip_all, fields(state = %self.state))]
    pub fn analyze_lexical(&mut self) -> Result<&LexicalResult, AnalysisError> {
        self.enter(Stage::Lexical)?;

        let result = lexer::analyze(&self.source, self.config.lexical_policy);
        self.finish(Stage::Lexical, result.success);
        self.syntax = None;
        self.semantic = None;

        Ok(&*self.lexical.insert(result))
    }

    #[instrument(skip_all, fields(state = %self.state))]
    pub fn analyze_syntax(&mut self) -> Result<&SyntaxResult, AnalysisError> {
        self.enter(Stage::Syntax)?;

        let result = syntax::validate(&self.source);
        self.finish(Stage::Syntax, result.success);
        self.semantic = None;

        Ok(&*self.syntax.insert(result))
    }

    #[instrument(skip_all, fields(state = %self.state))]
    pub fn analyze_semantic(&mut self) -> Result<&SemanticResult, AnalysisError> {
        self.enter(Stage::Semantic)?;

        let result = semantics::check(&self.source);
        self.finish(Stage::Semantic, result.success);

        Ok(&*self.semantic.insert(result))
    }

    fn enter(&self, stage: Stage) -> Result<(), AnalysisError> {
        self.state.require(stage).map_err(|err| {
            info!(%stage, %err, "stage refused");
            err
        })?;
        info!(%stage, "running stage");
        Ok(())
    }

    fn finish(&mut self, stage: Stage, success: bool) {
        let next = self.state.complete(stage, success);
        debug!(%stage, success, from = %self.state, to = %next, "pipeline transition");
        self.state = next;
    }
}
