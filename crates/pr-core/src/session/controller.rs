//! Review session controller
//!
//! Couples a [`SessionState`] with a [`BucketStore`]. The in-memory buckets
//! are the source of truth; a failed write only leaves the store stale and is
//! retried on the next flush.

use super::model::{Buckets, Decision, SessionState, SessionStatus, SessionSummary};
use super::persistence::BucketStore;
use crate::error::{ReviewError, Result};
use crate::record::Record;
use crate::types::SessionId;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a single classification
#[derive(Debug)]
pub struct Classification {
    /// Index of the classified record
    pub index: usize,
    /// Decision that was applied
    pub decision: Decision,
    /// Session status after the decision
    pub status: SessionStatus,
    /// Store writes that failed; the decision itself stands
    pub persist_errors: Vec<ReviewError>,
}

impl Classification {
    /// Whether every store write succeeded
    pub fn persisted(&self) -> bool {
        self.persist_errors.is_empty()
    }

    /// Whether this decision completed the session
    pub fn completed(&self) -> bool {
        self.status == SessionStatus::Complete
    }
}

/// A review session with durable buckets
pub struct ReviewSession {
    state: SessionState,
    store: Arc<dyn BucketStore>,
    stale: BTreeSet<Decision>,
}

impl ReviewSession {
    /// Initialize a session over `records` starting at `start_index`
    pub fn start(
        records: Vec<Record>,
        start_index: usize,
        store: Arc<dyn BucketStore>,
    ) -> Result<Self> {
        let state = SessionState::new(records, start_index)?;
        Ok(Self::from_state(state, store))
    }

    /// Initialize a session with a specific ID
    pub fn start_with_id(
        id: SessionId,
        records: Vec<Record>,
        start_index: usize,
        store: Arc<dyn BucketStore>,
    ) -> Result<Self> {
        let state = SessionState::with_id(id, records, start_index)?;
        Ok(Self::from_state(state, store))
    }

    fn from_state(state: SessionState, store: Arc<dyn BucketStore>) -> Self {
        info!(
            "Started session {} at record {} of {} (store: {})",
            state.id(),
            state.start_index(),
            state.len(),
            store.location()
        );
        Self {
            state,
            store,
            stale: BTreeSet::new(),
        }
    }

    /// Session identifier
    pub fn id(&self) -> &SessionId {
        self.state.id()
    }

    /// Read-only view of the state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Serializable copy of the state
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    /// Current buckets
    pub fn buckets(&self) -> &Buckets {
        self.state.buckets()
    }

    /// The record awaiting a decision, or `None` once complete
    pub fn current_record(&self) -> Option<&Record> {
        self.state.current()
    }

    /// Current lifecycle status
    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    /// Whether every record has been classified
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Summary for status displays
    pub fn summary(&self) -> SessionSummary {
        self.state.summary()
    }

    /// Where the buckets are persisted
    pub fn store_location(&self) -> String {
        self.store.location()
    }

    /// Buckets whose durable copy is out of date
    pub fn stale_buckets(&self) -> Vec<Decision> {
        self.stale.iter().copied().collect()
    }

    /// Apply a decision to the current record.
    ///
    /// Fails with [`ReviewError::SessionComplete`] and changes nothing when no
    /// record is left. Store failures never fail the call; they are reported
    /// in [`Classification::persist_errors`].
    pub fn classify(&mut self, decision: Decision) -> Result<Classification> {
        let index = self.state.advance(decision)?;
        debug!("Record {} -> {}", index, decision.bucket_label());

        self.stale.insert(decision);
        if self.state.is_complete() {
            info!("Session {} complete", self.state.id());
            self.stale.extend(Decision::ALL);
        }

        let persist_errors = self.flush();

        Ok(Classification {
            index,
            decision,
            status: self.state.status(),
            persist_errors,
        })
    }

    /// Rewrite every stale bucket, returning the writes that failed
    pub fn flush(&mut self) -> Vec<ReviewError> {
        let mut errors = Vec::new();

        for decision in self.stale_buckets() {
            match self.store.save(decision, self.state.buckets().get(decision)) {
                Ok(()) => {
                    self.stale.remove(&decision);
                    debug!(
                        "Persisted {} ({} records)",
                        decision.store_name(),
                        self.state.buckets().get(decision).len()
                    );
                }
                Err(e) => {
                    warn!("Failed to persist {}: {}", decision.store_name(), e);
                    errors.push(ReviewError::Persist {
                        bucket: decision.store_name(),
                        source: Box::new(e),
                    });
                }
            }
        }

        errors
    }

    /// Mark every bucket stale and rewrite them all
    pub fn persist_all(&mut self) -> Vec<ReviewError> {
        self.stale.extend(Decision::ALL);
        self.flush()
    }
}
