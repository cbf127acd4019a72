//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text with category highlighting and diagnostic markers
//! - [`results`]: Output of one analysis stage, styled by report tone
//! - [`status`]: Status bar with gate state, keybindings and the open-file prompt
//!
//! Each module exports stateless `render_*` functions; scroll offsets live in
//! [`crate::ui::App`].

pub mod results;
pub mod source;
pub mod status;

pub use results::render_results_pane;
pub use source::{render_source_pane, LineMark};
pub use status::{render_path_prompt, render_status_bar};
