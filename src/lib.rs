//! # Introduction
//!
//! tricheck analyzes a toy C-like language in three gated passes and shows
//! the results in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//! Each pass only runs once its predecessor has succeeded on the same source.
//!
//! ## Analysis pipeline
//!
//! ```text
//! Source → Lexical → Syntax → Semantic → Report → TUI / stdout
//! ```
//!
//! 1. [`analysis`]: the three pure passes. The lexical pass splits text into
//!    classified [`analysis::token::Token`]s, the syntax pass checks each line
//!    against the two accepted statement shapes, and the semantic pass checks
//!    that assigned values fit their declared type.
//! 2. [`pipeline`]: the [`pipeline::Session`] holding the loaded source and the
//!    [`pipeline::PipelineState`] gate that refuses out-of-order runs.
//! 3. [`report`]: turns stage results into the line-oriented report shown to
//!    the user.
//! 4. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Accepted language
//!
//! Every line is either `<type> <name> = <value>;` or `return <word>;`.
//! Types checked semantically: `int`, `double`, `String`.

pub mod analysis;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod ui;
