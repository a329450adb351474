//! pr-ui - TUI library for prompt-reviewer
//!
//! This crate provides the Terminal User Interface for reviewing records.
//!
//! # Overview
//!
//! The TUI provides:
//! - A start-index gate that must be confirmed before reviewing
//! - The current prompt, its preview reference and the record position
//! - Single-key Keep / Discard / Skip decisions and on-demand export
//! - A raw record view with JSON highlighting (via syntect)
//!
//! # Example
//!
//! ```ignore
//! use pr_ui::{App, Reviewer, ExportTarget};
//!
//! let reviewer = Reviewer::new(records, store, session_id, target);
//! let mut app = App::new(reviewer, Highlighter::new())?;
//! app.run()?;
//! ```

pub mod app;
pub mod highlight;
pub mod input;
pub mod layout;
pub mod theme;

pub use app::{App, AppMode, AppState, ExportTarget, Reviewer};
pub use highlight::Highlighter;
