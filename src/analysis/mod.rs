//! Three-pass source analysis
//!
//! This module turns toy-language source text into structured diagnostics:
//! - [`token`]: Token categories and the fixed vocabulary
//! - [`lexer`]: Tokenization (source text → classified tokens)
//! - [`syntax`]: Line-level statement shape validation
//! - [`semantics`]: Line-level type compatibility of assigned literals
//! - [`errors`]: Diagnostic error types
//!
//! # Supported statements
//!
//! Only two line shapes exist: `<type> <name> = <value>;` and
//! `return <word>;`. There is no expression grammar, no block structure and no
//! symbol table; every line stands alone.
//!
//! Each pass is a plain function of the source text. Ordering between the
//! passes is enforced by [`crate::pipeline::Session`], not here.

use std::fmt;

pub mod errors;
pub mod lexer;
pub mod semantics;
pub mod syntax;
pub mod token;

/// The three analysis passes, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lexical => write!(f, "Lexical Analysis"),
            Stage::Syntax => write!(f, "Syntax Analysis"),
            Stage::Semantic => write!(f, "Semantic Analysis"),
        }
    }
}
