//! Review session module
//!
//! A session walks a fixed list of records from a chosen starting index to the
//! end, sorting each record into one of three buckets.
//!
//! # Overview
//!
//! - [`SessionState`] is the plain, serializable state: records, cursor and
//!   buckets. It knows nothing about disk.
//! - [`ReviewSession`] wraps the state with a [`BucketStore`] and rewrites the
//!   affected bucket after every decision.
//!
//! # Example
//!
//! ```ignore
//! use pr_core::session::{Decision, ReviewSession, MemoryStore};
//! use std::sync::Arc;
//!
//! let mut session = ReviewSession::start(records, 0, Arc::new(MemoryStore::new()))?;
//! while let Some(record) = session.current_record() {
//!     println!("{}", record.prompt());
//!     session.classify(Decision::Keep)?;
//! }
//! ```

mod controller;
mod model;
mod persistence;

// Re-export public API
pub use controller::{Classification, ReviewSession};
pub use model::{Buckets, Decision, SessionState, SessionStatus, SessionSummary};
pub use persistence::memory::MemoryStore;
pub use persistence::BucketStore;
