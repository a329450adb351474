//! pr-core - Core library for prompt-reviewer
//!
//! This crate provides the core logic for the Prompt Review tool: record
//! loading, the review session controller, bucket persistence abstractions,
//! and archive export.

pub mod error;
pub mod types;
pub mod config;
pub mod record;
pub mod session;
pub mod export;

pub use error::{ReviewError, Result};
pub use types::*;
