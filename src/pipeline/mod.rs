//! Pipeline controller
//!
//! - [`state`]: the gate state machine (`NotStarted → LexicalOk → SyntaxOk →
//!   SemanticDone`) and its single prerequisite guard
//! - [`session`]: owns the loaded source and the latest result of each stage
//!
//! The controller holds no analysis logic. It only decides whether a stage may
//! run and records the outcome.

pub mod session;
pub mod state;

pub use session::Session;
pub use state::PipelineState;
