//! Session data models

use crate::error::{ReviewError, Result};
use crate::record::Record;
use crate::types::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator decision for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Keep the record
    Keep,
    /// Discard the record
    Discard,
    /// Skip the record without judging it
    Skip,
}

impl Decision {
    /// All decisions, in bucket order
    pub const ALL: [Decision; 3] = [Decision::Keep, Decision::Discard, Decision::Skip];

    /// Name of the durable store for this decision's bucket
    pub fn store_name(&self) -> &'static str {
        match self {
            Decision::Keep => "kept_prompts",
            Decision::Discard => "discarded_prompts",
            Decision::Skip => "skipped_prompts",
        }
    }

    /// File name used for the store and the archive entry
    pub fn file_name(&self) -> &'static str {
        match self {
            Decision::Keep => "kept_prompts.json",
            Decision::Discard => "discarded_prompts.json",
            Decision::Skip => "skipped_prompts.json",
        }
    }

    /// Bucket name as shown to the operator
    pub fn bucket_label(&self) -> &'static str {
        match self {
            Decision::Keep => "kept",
            Decision::Discard => "discarded",
            Decision::Skip => "skipped",
        }
    }

    /// Action name as shown to the operator
    pub fn action_label(&self) -> &'static str {
        match self {
            Decision::Keep => "Keep",
            Decision::Discard => "Discard",
            Decision::Skip => "Skip",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action_label())
    }
}

impl FromStr for Decision {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "keep" | "k" => Ok(Decision::Keep),
            "discard" | "d" => Ok(Decision::Discard),
            "skip" | "s" => Ok(Decision::Skip),
            _ => Err(ReviewError::Validation(format!("Unknown decision: {}", s))),
        }
    }
}

/// The three outcome buckets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buckets {
    pub kept: Vec<Record>,
    pub discarded: Vec<Record>,
    pub skipped: Vec<Record>,
}

impl Buckets {
    /// Create empty buckets
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in the bucket for a decision
    pub fn get(&self, decision: Decision) -> &[Record] {
        match decision {
            Decision::Keep => &self.kept,
            Decision::Discard => &self.discarded,
            Decision::Skip => &self.skipped,
        }
    }

    fn get_mut(&mut self, decision: Decision) -> &mut Vec<Record> {
        match decision {
            Decision::Keep => &mut self.kept,
            Decision::Discard => &mut self.discarded,
            Decision::Skip => &mut self.skipped,
        }
    }

    /// Total records across all buckets
    pub fn total(&self) -> usize {
        self.kept.len() + self.discarded.len() + self.skipped.len()
    }

    /// Whether no record has been classified
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Lifecycle status of an initialized session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Records remain to be classified
    Active,
    /// Every record from the starting index has been classified
    Complete,
}

/// Plain review state: records, cursor and buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StoredState")]
pub struct SessionState {
    id: SessionId,
    started_at: DateTime<Utc>,
    records: Vec<Record>,
    start_index: usize,
    cursor: usize,
    buckets: Buckets,
}

impl SessionState {
    /// Initialize a session at `start_index`
    pub fn new(records: Vec<Record>, start_index: usize) -> Result<Self> {
        Self::with_id(SessionId::generate(), records, start_index)
    }

    /// Initialize a session with a specific ID
    pub fn with_id(id: SessionId, records: Vec<Record>, start_index: usize) -> Result<Self> {
        Self::check_start_index(records.len(), start_index)?;

        Ok(Self {
            id,
            started_at: Utc::now(),
            records,
            start_index,
            cursor: start_index,
            buckets: Buckets::new(),
        })
    }

    /// Validate a starting index against a record count
    pub fn check_start_index(len: usize, start_index: usize) -> Result<()> {
        if start_index >= len {
            return Err(ReviewError::InvalidStartIndex {
                index: start_index,
                len,
            });
        }
        Ok(())
    }

    /// Session identifier
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// When the session was initialized
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// All records of the input
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records in the input
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Index the session started at
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Index of the next unclassified record
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current buckets
    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    /// Current lifecycle status
    pub fn status(&self) -> SessionStatus {
        if self.cursor >= self.records.len() {
            SessionStatus::Complete
        } else {
            SessionStatus::Active
        }
    }

    /// Whether every record has been classified
    pub fn is_complete(&self) -> bool {
        self.status() == SessionStatus::Complete
    }

    /// The record awaiting a decision, or `None` once complete
    pub fn current(&self) -> Option<&Record> {
        self.records.get(self.cursor)
    }

    /// Records still waiting for a decision
    pub fn remaining(&self) -> usize {
        self.records.len().saturating_sub(self.cursor)
    }

    /// Classify the current record and advance the cursor.
    ///
    /// Returns the index of the classified record. Fails without touching
    /// any state when the session is already complete.
    pub fn advance(&mut self, decision: Decision) -> Result<usize> {
        let index = self.cursor;
        let record = self
            .records
            .get(index)
            .cloned()
            .ok_or(ReviewError::SessionComplete {
                len: self.records.len(),
            })?;

        self.buckets.get_mut(decision).push(record);
        self.cursor += 1;

        debug_assert_eq!(self.buckets.total(), self.cursor - self.start_index);
        Ok(index)
    }

    /// Summary for status displays
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            position: self.cursor,
            total: self.records.len(),
            start_index: self.start_index,
            kept: self.buckets.kept.len(),
            discarded: self.buckets.discarded.len(),
            skipped: self.buckets.skipped.len(),
            status: self.status(),
        }
    }
}

/// Unchecked wire form of [`SessionState`]
#[derive(Deserialize)]
struct StoredState {
    id: SessionId,
    started_at: DateTime<Utc>,
    records: Vec<Record>,
    start_index: usize,
    cursor: usize,
    buckets: Buckets,
}

impl TryFrom<StoredState> for SessionState {
    type Error = ReviewError;

    fn try_from(stored: StoredState) -> Result<Self> {
        SessionState::check_start_index(stored.records.len(), stored.start_index)?;
        if stored.cursor < stored.start_index || stored.cursor > stored.records.len() {
            return Err(ReviewError::Validation(format!(
                "cursor {} outside {}..={}",
                stored.cursor,
                stored.start_index,
                stored.records.len()
            )));
        }
        if stored.buckets.total() != stored.cursor - stored.start_index {
            return Err(ReviewError::Validation(format!(
                "buckets hold {} records but {} were classified",
                stored.buckets.total(),
                stored.cursor - stored.start_index
            )));
        }

        Ok(Self {
            id: stored.id,
            started_at: stored.started_at,
            records: stored.records,
            start_index: stored.start_index,
            cursor: stored.cursor,
            buckets: stored.buckets,
        })
    }
}

/// Session summary information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session ID
    pub id: SessionId,
    /// Cursor position
    pub position: usize,
    /// Total number of records
    pub total: usize,
    /// Starting index
    pub start_index: usize,
    /// Kept count
    pub kept: usize,
    /// Discarded count
    pub discarded: usize,
    /// Skipped count
    pub skipped: usize,
    /// Lifecycle status
    pub status: SessionStatus,
}

impl SessionSummary {
    /// Number of records classified in this session
    pub fn reviewed(&self) -> usize {
        self.kept + self.discarded + self.skipped
    }

    /// Count for one decision
    pub fn count(&self, decision: Decision) -> usize {
        match decision {
            Decision::Keep => self.kept,
            Decision::Discard => self.discarded,
            Decision::Skip => self.skipped,
        }
    }
}
