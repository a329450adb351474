//! Export functionality for review buckets
//!
//! Exports are always generated from the in-memory buckets, never from the
//! durable stores, so they stay correct even when earlier writes failed.
//!
//! # Formats
//!
//! - `zip`: archive with `kept_prompts.json`, `discarded_prompts.json` and
//!   `skipped_prompts.json`
//! - `json`: one document holding all three buckets
//!
//! # Example
//!
//! ```ignore
//! use pr_core::export::ExportManager;
//!
//! let manager = ExportManager::new();
//! let bytes = manager.export(session.buckets(), "zip")?;
//! ```

mod archive;
mod exporter;
mod json;

pub use archive::{ArchiveExporter, DEFAULT_ARCHIVE_NAME};
pub use exporter::{ExportManager, Exporter};
pub use json::{CombinedExport, JsonExporter};
